use std::fs;
use std::path::Path;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use etiquette_quiz::deploy::{
    API_ENDPOINT_VAR, BuildError, BuildStep, ConfigError, DeployError, Deployer,
    OPERATOR_NAME_VAR, OPERATOR_PASSWORD_VAR, PutOutcome, SERVICE_NAME_VAR, StorageClient,
    StorageError, UploadTally, deploy_with_lookup,
};

struct FakeBuild {
    fail: bool,
    runs: AtomicUsize,
}

impl FakeBuild {
    fn ok() -> Self {
        Self {
            fail: false,
            runs: AtomicUsize::new(0),
        }
    }

    fn failing() -> Self {
        Self {
            fail: true,
            runs: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl BuildStep for FakeBuild {
    async fn build(&self) -> Result<(), BuildError> {
        self.runs.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            Err(BuildError::Failed {
                command: "npm run build".to_string(),
                code: Some(1),
            })
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl<'a> BuildStep for &'a FakeBuild {
    async fn build(&self) -> Result<(), BuildError> {
        (**self).build().await
    }
}

#[derive(Default)]
struct FakeStorage {
    reject_suffix: Option<&'static str>,
    error_suffix: Option<&'static str>,
    puts: Mutex<Vec<String>>,
}

#[async_trait]
impl StorageClient for FakeStorage {
    async fn put_file(
        &self,
        remote_path: &str,
        _bytes: Vec<u8>,
    ) -> Result<PutOutcome, StorageError> {
        self.puts.lock().unwrap().push(remote_path.to_string());

        if self.error_suffix.is_some_and(|s| remote_path.ends_with(s)) {
            let source = reqwest::Client::new()
                .get("not a url")
                .build()
                .unwrap_err();
            return Err(StorageError::Request {
                url: remote_path.to_string(),
                source,
            });
        }
        if self.reject_suffix.is_some_and(|s| remote_path.ends_with(s)) {
            return Ok(PutOutcome::Rejected("401 Unauthorized".to_string()));
        }
        Ok(PutOutcome::Stored)
    }
}

fn write_tree(root: &Path, files: &[&str]) {
    for file in files {
        let path = root.join(file);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, file.as_bytes()).unwrap();
    }
}

#[tokio::test]
async fn remote_paths_mirror_the_output_tree() {
    let dist = tempfile::tempdir().unwrap();
    write_tree(dist.path(), &["a.txt", "sub/b.txt"]);

    let deployer = Deployer::new(dist.path(), "/x/", FakeBuild::ok(), FakeStorage::default());
    let tally = deployer.run().await.unwrap();

    assert_eq!(tally, UploadTally { succeeded: 2, failed: 0 });
    let puts = deployer.storage().puts.lock().unwrap();
    assert_eq!(*puts, ["/x/a.txt", "/x/sub/b.txt"]);
}

#[tokio::test]
async fn failed_build_uploads_nothing() {
    let dist = tempfile::tempdir().unwrap();
    write_tree(dist.path(), &["index.html"]);

    let build = FakeBuild::failing();
    let deployer = Deployer::new(dist.path(), "/", &build, FakeStorage::default());
    let err = deployer.run().await.unwrap_err();
    assert_eq!(build.runs.load(Ordering::SeqCst), 1);

    assert!(matches!(err, DeployError::Build(_)));
    assert!(err.is_fatal());
    assert!(deployer.storage().puts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn missing_config_stops_before_building() {
    let dist = tempfile::tempdir().unwrap();
    write_tree(dist.path(), &["index.html"]);
    let build = FakeBuild::ok();

    let err = deploy_with_lookup(
        |name| (name == OPERATOR_NAME_VAR).then(|| "op".to_string()),
        dist.path(),
        &build,
    )
    .await
    .unwrap_err();

    match &err {
        DeployError::Config(ConfigError::Missing(names)) => {
            assert_eq!(*names, [SERVICE_NAME_VAR, OPERATOR_PASSWORD_VAR]);
        }
        other => panic!("unexpected error: {}", other),
    }
    assert!(err.is_fatal());
    assert_eq!(build.runs.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn bad_endpoint_stops_before_building() {
    let dist = tempfile::tempdir().unwrap();
    let build = FakeBuild::ok();

    let err = deploy_with_lookup(
        |name| match name {
            n if n == API_ENDPOINT_VAR => Some("not a url".to_string()),
            _ => Some("value".to_string()),
        },
        dist.path(),
        &build,
    )
    .await
    .unwrap_err();

    assert!(matches!(err, DeployError::Client(StorageError::Endpoint { .. })));
    assert_eq!(build.runs.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn one_failure_does_not_stop_the_run() {
    let dist = tempfile::tempdir().unwrap();
    write_tree(dist.path(), &["a.js", "b.css", "index.html"]);

    let storage = FakeStorage {
        reject_suffix: Some("b.css"),
        ..Default::default()
    };
    let deployer = Deployer::new(dist.path(), "/", FakeBuild::ok(), storage);
    let tally = deployer.run().await.unwrap();

    assert_eq!(tally.succeeded, 2);
    assert_eq!(tally.failed, 1);
    assert_eq!(tally.attempted(), 3);
    assert_eq!(
        *deployer.storage().puts.lock().unwrap(),
        ["/a.js", "/b.css", "/index.html"]
    );
}

#[tokio::test]
async fn storage_errors_count_like_rejections() {
    let dist = tempfile::tempdir().unwrap();
    write_tree(dist.path(), &["a.txt", "b.txt", "c.txt"]);

    let storage = FakeStorage {
        reject_suffix: Some("a.txt"),
        error_suffix: Some("c.txt"),
        ..Default::default()
    };
    let deployer = Deployer::new(dist.path(), "/site", FakeBuild::ok(), storage);
    let tally = deployer.run().await.unwrap();

    assert_eq!(tally, UploadTally { succeeded: 1, failed: 2 });
}

#[tokio::test]
async fn missing_output_root_is_fatal_after_building() {
    let parent = tempfile::tempdir().unwrap();
    let build = FakeBuild::ok();
    let deployer = Deployer::new(parent.path().join("dist"), "/", build, FakeStorage::default());

    let err = deployer.run().await.unwrap_err();
    assert!(matches!(err, DeployError::OutputDirMissing(_)));
    assert!(err.is_fatal());
    assert!(deployer.storage().puts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn empty_output_root_reports_zero() {
    let dist = tempfile::tempdir().unwrap();
    let deployer = Deployer::new(dist.path(), "/", FakeBuild::ok(), FakeStorage::default());

    let tally = deployer.run().await.unwrap();
    assert_eq!(tally.attempted(), 0);
}
