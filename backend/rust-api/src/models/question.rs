use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// A catalog question as served to clients. Immutable once the catalog is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: i32,
    pub text: String,
    pub options: Vec<String>,
    pub correct_answer: usize,
    pub explanation: String,
    pub category: String,
    pub difficulty: Difficulty,
    pub tips: Option<String>,
}

impl Question {
    pub fn is_correct(&self, selected_answer: usize) -> bool {
        selected_answer == self.correct_answer
    }
}

/// Fixture entry: a question before the catalog assigns its id.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionSeed {
    pub text: String,
    pub options: Vec<String>,
    pub correct_answer: usize,
    pub explanation: String,
    pub category: String,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub tips: Option<String>,
}

impl QuestionSeed {
    pub fn into_question(self, id: i32) -> Question {
        Question {
            id,
            text: self.text,
            options: self.options,
            correct_answer: self.correct_answer,
            explanation: self.explanation,
            category: self.category,
            difficulty: self.difficulty,
            tips: self.tips,
        }
    }
}

/// Query string accepted by `GET /api/questions`.
#[derive(Debug, Default, Deserialize)]
pub struct QuestionQuery {
    pub category: Option<String>,
    pub categories: Option<String>,
    pub random: Option<String>,
    pub limit: Option<usize>,
}

impl QuestionQuery {
    pub fn is_random(&self) -> bool {
        self.random.as_deref() == Some("true")
    }

    /// Single `category` filter; a blank value counts as absent.
    pub fn category(&self) -> Option<&str> {
        self.category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }

    /// Comma-separated `categories`, trimmed, empty entries dropped.
    /// `None` when nothing is left after trimming.
    pub fn category_list(&self) -> Option<Vec<String>> {
        let list: Vec<String> = self
            .categories
            .as_deref()?
            .split(',')
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .collect();
        (!list.is_empty()).then_some(list)
    }
}
