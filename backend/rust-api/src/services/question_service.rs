use crate::metrics::QUESTIONS_SERVED_TOTAL;
use crate::models::category::CategorySummary;
use crate::models::question::QuestionQuery;
use crate::models::Question;
use crate::services::{AppState, StoreError, StoreResult};

pub struct QuestionService<'a> {
    state: &'a AppState,
}

impl<'a> QuestionService<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// `random=true` wins over `categories`, which wins over `category`.
    pub fn list(&self, query: &QuestionQuery) -> Vec<Question> {
        let catalog = &self.state.catalog;
        let settings = &self.state.config.questions;

        let (mode, questions) = if query.is_random() {
            let limit = query
                .limit
                .unwrap_or(settings.default_random_limit)
                .min(settings.max_limit);
            (
                "random",
                catalog.get_random(query.category(), limit),
            )
        } else if let Some(categories) = query.category_list() {
            ("categories", catalog.get_by_categories(&categories))
        } else if let Some(category) = query.category() {
            ("category", catalog.get_by_category(category))
        } else {
            ("all", catalog.get_all())
        };

        let questions = match query.limit {
            Some(limit) if mode != "random" => {
                questions.into_iter().take(limit.min(settings.max_limit)).collect()
            }
            _ => questions,
        };

        QUESTIONS_SERVED_TOTAL
            .with_label_values(&[mode])
            .inc_by(questions.len() as u64);
        tracing::debug!("Serving {} questions (mode={})", questions.len(), mode);

        questions
    }

    pub fn get(&self, id: i32) -> StoreResult<Question> {
        self.state
            .catalog
            .get_by_id(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound("Question".to_string()))
    }

    /// Bookmarked questions in bookmark order; ids missing from the catalog are skipped.
    pub async fn bookmarked(&self, user_id: i32) -> Vec<Question> {
        self.state
            .progress
            .bookmarked_question_ids(user_id)
            .await
            .into_iter()
            .filter_map(|id| self.state.catalog.get_by_id(id).cloned())
            .collect()
    }

    pub fn categories(&self) -> Vec<CategorySummary> {
        self.state.catalog.category_summaries()
    }
}
