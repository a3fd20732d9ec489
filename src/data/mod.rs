mod bank;
mod loader;
mod validate;

pub use bank::question_bank;
pub use loader::{LoadError, load_questions_from_json};
pub use validate::{BankError, validate_bank};
