//! The built-in question bank.

use once_cell::sync::Lazy;

use crate::models::{Question, QuestionType, QuizOption};

const TRUE_FALSE: &[(&str, &str)] = &[("A", "正确"), ("B", "错误")];

static QUESTION_BANK: Lazy<Vec<Question>> = Lazy::new(build_bank);

/// The ordered, read-only question bank.
pub fn question_bank() -> &'static [Question] {
    &QUESTION_BANK
}

fn question(
    id: u32,
    kind: QuestionType,
    prompt: &str,
    options: &[(&str, &str)],
    correct: &[&str],
    score: u32,
) -> Question {
    Question {
        id,
        kind,
        prompt: prompt.to_string(),
        options: options
            .iter()
            .map(|(key, label)| QuizOption {
                key: key.to_string(),
                label: label.to_string(),
            })
            .collect(),
        correct_keys: correct.iter().map(|key| key.to_string()).collect(),
        score,
    }
}

fn single(id: u32, prompt: &str, options: &[(&str, &str)], correct: &str) -> Question {
    question(id, QuestionType::Single, prompt, options, &[correct], 4)
}

fn boolean(id: u32, prompt: &str, correct: &str) -> Question {
    question(id, QuestionType::Boolean, prompt, TRUE_FALSE, &[correct], 4)
}

fn multiple(id: u32, prompt: &str, options: &[(&str, &str)], correct: &[&str]) -> Question {
    question(id, QuestionType::Multiple, prompt, options, correct, 8)
}

fn build_bank() -> Vec<Question> {
    vec![
        single(
            1,
            "独奏类演职人员的建议到场时间是？",
            &[
                ("A", "早上 11:00"),
                ("B", "中午 12:45"),
                ("C", "下午 1:15"),
                ("D", "下午 2:00"),
            ],
            "B",
        ),
        single(
            2,
            "纯观众和有演出任务的人员，座位安排分别是？",
            &[
                ("A", "大家都随便坐"),
                ("B", "有演出任务的坐前排，纯观众坐后排"),
                ("C", "纯观众坐前排，有演出任务的坐后排"),
                ("D", "先到先得"),
            ],
            "C",
        ),
        single(
            3,
            "如果活动当天迟到了，正确的做法是？",
            &[
                ("A", "既然迟到了就不去了"),
                ("B", "到了立刻推门进去找座位"),
                ("C", "在门口等待中场休息"),
                (
                    "D",
                    "私信告知组织者，并在当前节目结束后再进场，不要在别人表演时突然进入",
                ),
            ],
            "D",
        ),
        single(
            4,
            "上半场演出结束，大家去拍合影的时间大概是？",
            &[("A", "2:00"), ("B", "3:15"), ("C", "4:20"), ("D", "6:00")],
            "B",
        ),
        single(
            5,
            "下午茶 & 沙龙时间是哪个时间段？",
            &[
                ("A", "1:45 - 2:00"),
                ("B", "2:00 - 3:15"),
                ("C", "3:15 - 4:20"),
                ("D", "4:20 - 6:00"),
            ],
            "C",
        ),
        single(
            6,
            "关于食物和饮料，以下哪项规定是正确的？",
            &[
                ("A", "可以带进琴房，但不能带进音乐厅"),
                ("B", "可以带进音乐厅，只要不洒出来就行"),
                ("C", "所有的食物饮料只能在咖啡店食用，严禁带入音乐厅和琴房"),
                ("D", "可以在钢琴旁边吃东西"),
            ],
            "C",
        ),
        single(
            7,
            "关于钢琴的使用，以下说法错误的是？",
            &[
                ("A", "只能使用提供给我们的四台钢琴"),
                ("B", "音乐厅其他楼层（一楼、二楼、三楼）的钢琴如果空着，也可以去弹"),
                ("C", "钢琴是轮流玩的，不要单个人占用太久"),
                ("D", "严禁把食物、饮料、水、乐器放在钢琴上"),
            ],
            "B",
        ),
        single(
            8,
            "在他人表演时，观众应该注意什么？",
            &[
                ("A", "可以小声交流讨论剧情"),
                ("B", "拿出手机录像并大声喝彩"),
                ("C", "保持安静，手机静音，不说话，不哼唱"),
                ("D", "可以吃零食"),
            ],
            "C",
        ),
        single(
            9,
            "如果违反了上述规定（如擅自使用其他钢琴、带食物进场等），将面临什么后果？",
            &[
                ("A", "罚款 100 元"),
                ("B", "被要求当众表演节目"),
                ("C", "踢出活动，踢出乐团"),
                ("D", "负责打扫全场卫生"),
            ],
            "C",
        ),
        single(
            10,
            "整个活动的结束时间预计是？",
            &[("A", "4:20"), ("B", "5:00"), ("C", "6:00"), ("D", "7:00")],
            "C",
        ),
        boolean(
            11,
            "主持人和合奏类演职人员早上 11 点过台，由于时间较早，中午建议回家休息。",
            "B",
        ),
        boolean(12, "观众应在 1:15 开始进场，务必在 1:45 前全部入座完毕。", "A"),
        boolean(
            13,
            "如果迟到了，为了不影响他人，应该直接推门进去并迅速找个角落坐下。",
            "B",
        ),
        boolean(
            14,
            "活动现场除了提供给我们的四台钢琴外，严禁擅自使用音乐厅一楼、二楼或三楼的其他钢琴。",
            "A",
        ),
        boolean(15, "活动全程禁止吸烟。", "A"),
        multiple(
            16,
            "关于活动结束后的安排 (6点散场后)，以下描述正确的是？",
            &[
                ("A", "所有人必须立即离开"),
                ("B", "留一部分男生打扫卫生"),
                ("C", "要吃年夜饭的出发去饭店"),
                ("D", "大家原地解散回家"),
            ],
            &["B", "C"],
        ),
        multiple(
            17,
            "以下哪些行为在活动中是严令禁止的？",
            &[
                ("A", "在音乐厅内吃东西或喝饮料"),
                ("B", "在别人表演时说话或哼唱"),
                ("C", "擅自使用非指定区域的钢琴"),
                ("D", "将水杯或乐器放在钢琴上"),
            ],
            &["A", "B", "C", "D"],
        ),
        multiple(
            18,
            "关于下午茶和沙龙时间 (3:15-4:20)，大家的安排包括？",
            &[
                ("A", "一起出发去旁边的音乐厅拍合影"),
                ("B", "在咖啡店享用下午茶"),
                ("C", "进行沙龙交流"),
                ("D", "在音乐厅内进行下半场演出"),
            ],
            &["A", "B", "C"],
        ),
        multiple(
            19,
            "对于有演出任务的人员 (包括主持人、独奏、合奏)，以下要求正确的是？",
            &[
                ("A", "坐在后排"),
                ("B", "独奏人员 12:45 过台"),
                ("C", "主持人及合奏人员 11:00 过台"),
                ("D", "必须坐在前排"),
            ],
            &["A", "B", "C"],
        ),
        multiple(
            20,
            "为保护钢琴，以下哪些做法是正确的？",
            &[
                ("A", "只能使用指定的四台钢琴"),
                ("B", "轮流使用，单人不要占用太久"),
                ("C", "不把食物饮料放在钢琴上"),
                ("D", "小心使用，避免磕碰"),
            ],
            &["A", "B", "C", "D"],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::validate_bank;

    #[test]
    fn test_bank_is_valid() {
        assert!(validate_bank(question_bank()).is_ok());
    }

    #[test]
    fn test_bank_shape() {
        let bank = question_bank();
        assert_eq!(bank.len(), 20);

        let count = |kind| bank.iter().filter(|q| q.kind == kind).count();
        assert_eq!(count(QuestionType::Single), 10);
        assert_eq!(count(QuestionType::Boolean), 5);
        assert_eq!(count(QuestionType::Multiple), 5);

        let ids: Vec<u32> = bank.iter().map(|q| q.id).collect();
        assert_eq!(ids, (1..=20).collect::<Vec<_>>());
    }

    #[test]
    fn test_correct_keys_are_nonempty_subsets_of_options() {
        for q in question_bank() {
            assert!(!q.correct_keys.is_empty(), "question {} has no answer", q.id);
            for key in &q.correct_keys {
                assert!(q.has_option(key), "question {} answer {} is not an option", q.id, key);
            }
            if !q.kind.allows_many() {
                assert_eq!(q.correct_keys.len(), 1, "question {}", q.id);
            }
        }
    }

    #[test]
    fn test_boolean_questions_have_two_options() {
        for q in question_bank().iter().filter(|q| q.kind == QuestionType::Boolean) {
            assert_eq!(q.options.len(), 2);
        }
    }

    #[test]
    fn test_max_score_is_100() {
        let total: u32 = question_bank().iter().map(|q| q.score).sum();
        assert_eq!(total, 100);
    }
}
