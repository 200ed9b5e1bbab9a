use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// One user's interaction (attempt and/or bookmark) with one question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProgress {
    pub id: i32,
    pub user_id: i32,
    pub question_id: i32,
    pub is_correct: Option<bool>,
    /// Seconds spent on the question
    pub time_spent: Option<i32>,
    pub selected_answer: Option<i32>,
    pub is_bookmarked: bool,
    pub attempted_at: DateTime<Utc>,
}

impl UserProgress {
    pub(crate) fn apply(&mut self, update: &ProgressUpdate) {
        if let Some(is_correct) = update.is_correct {
            self.is_correct = Some(is_correct);
        }
        if let Some(time_spent) = update.time_spent {
            self.time_spent = Some(time_spent);
        }
        if let Some(selected_answer) = update.selected_answer {
            self.selected_answer = Some(selected_answer);
        }
        if let Some(is_bookmarked) = update.is_bookmarked {
            self.is_bookmarked = is_bookmarked;
        }
        self.attempted_at = Utc::now();
    }
}

/// Body of `POST /api/progress`
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewProgress {
    #[validate(range(min = 1, message = "userId must be a positive integer"))]
    pub user_id: i32,

    #[validate(range(min = 1, message = "questionId must be a positive integer"))]
    pub question_id: i32,

    #[validate(range(min = 0, message = "selectedAnswer must not be negative"))]
    pub selected_answer: Option<i32>,

    pub is_correct: Option<bool>,

    #[validate(range(min = 0, message = "timeSpent must not be negative"))]
    pub time_spent: Option<i32>,

    pub is_bookmarked: Option<bool>,
}

impl NewProgress {
    pub fn bookmark(user_id: i32, question_id: i32) -> Self {
        Self {
            user_id,
            question_id,
            is_bookmarked: Some(true),
            ..Default::default()
        }
    }
}

/// Partial update; absent fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProgressUpdate {
    pub is_correct: Option<bool>,

    #[validate(range(min = 0, message = "timeSpent must not be negative"))]
    pub time_spent: Option<i32>,

    #[validate(range(min = 0, message = "selectedAnswer must not be negative"))]
    pub selected_answer: Option<i32>,

    pub is_bookmarked: Option<bool>,
}
