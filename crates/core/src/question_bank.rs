//! Question-bank seed files.
//!
//! A seed file is a JSON document of the form `{"questions": [ ... ]}`.
//! Seeds are validated here and upserted by `question_key` in the DB layer,
//! so reloading the same file is idempotent.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use validator::Validate;

use crate::error::CoreError;
use crate::flashcard::{validate_category, validate_difficulty, DIFFICULTY_MEDIUM};

/// The built-in system-design bank, embedded at compile time.
pub const BUILTIN_SYSTEM_DESIGN_BANK: &str = include_str!("../seeds/system_design_questions.json");

static QUESTION_KEY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9][a-z0-9_-]*$").expect("valid regex"));

/// One question as it appears in a seed file.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct QuestionSeed {
    #[validate(length(min = 1, max = 100))]
    pub question_key: String,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1))]
    pub prompt: String,
    #[validate(length(min = 1))]
    pub guided_answer: String,
    #[validate(length(min = 1, max = 50))]
    pub category: String,
    #[serde(default = "default_difficulty")]
    pub difficulty: String,
}

fn default_difficulty() -> String {
    DIFFICULTY_MEDIUM.to_string()
}

#[derive(Debug, Deserialize)]
struct SeedFile {
    questions: Vec<QuestionSeed>,
}

impl QuestionSeed {
    /// Run field rules plus the checks the derive cannot express.
    pub fn check(&self) -> Result<(), CoreError> {
        self.validate().map_err(|e| {
            CoreError::Validation(format!("question '{}': {e}", self.question_key))
        })?;
        if !QUESTION_KEY_RE.is_match(&self.question_key) {
            return Err(CoreError::Validation(format!(
                "question key '{}' must be a lowercase slug",
                self.question_key
            )));
        }
        validate_difficulty(&self.difficulty).map_err(CoreError::Validation)?;
        validate_category(&self.category)
    }
}

/// Parse and validate a seed document.
///
/// Rejects malformed JSON, invalid questions and duplicate keys. An empty
/// `questions` array is valid and yields an empty bank.
pub fn load_seed(json: &str) -> Result<Vec<QuestionSeed>, CoreError> {
    let file: SeedFile = serde_json::from_str(json)
        .map_err(|e| CoreError::Validation(format!("Invalid question bank file: {e}")))?;

    let mut keys = HashSet::with_capacity(file.questions.len());
    for seed in &file.questions {
        seed.check()?;
        if !keys.insert(seed.question_key.as_str()) {
            return Err(CoreError::Validation(format!(
                "Duplicate question key '{}'",
                seed.question_key
            )));
        }
    }

    Ok(file.questions)
}

/// Load the embedded system-design bank.
pub fn builtin_bank() -> Result<Vec<QuestionSeed>, CoreError> {
    load_seed(BUILTIN_SYSTEM_DESIGN_BANK)
}
