use crate::models::category::{is_known_category, CategorySummary, CATEGORIES};
use crate::models::{Question, QuestionSeed};
use anyhow::{bail, Context, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use tokio::fs;

const SEED_FIXTURE: &str = include_str!("../../data/questions.json");
const OPTIONS_PER_QUESTION: usize = 4;

/// Read-only question store. Ids are assigned from 1 in fixture order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    questions: BTreeMap<i32, Question>,
}

impl Catalog {
    pub fn from_seeds(seeds: Vec<QuestionSeed>) -> Result<Self> {
        let mut questions = BTreeMap::new();

        for (index, seed) in seeds.into_iter().enumerate() {
            let id = i32::try_from(index + 1).context("Catalog exceeds i32 id space")?;

            if seed.options.len() != OPTIONS_PER_QUESTION {
                bail!(
                    "Question {} has {} options, expected {}",
                    id,
                    seed.options.len(),
                    OPTIONS_PER_QUESTION
                );
            }
            if seed.correct_answer >= seed.options.len() {
                bail!(
                    "Question {} has correctAnswer {} outside of its {} options",
                    id,
                    seed.correct_answer,
                    seed.options.len()
                );
            }
            if !is_known_category(&seed.category) {
                tracing::warn!("Question {} uses unknown category '{}'", id, seed.category);
            }

            questions.insert(id, seed.into_question(id));
        }

        Ok(Self { questions })
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let seeds: Vec<QuestionSeed> =
            serde_json::from_str(json).context("Failed to deserialize question fixture")?;
        Self::from_seeds(seeds)
    }

    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read question fixture {}", path.display()))?;
        Self::from_json(&contents)
    }

    /// The catalog shipped with the binary
    pub fn seeded() -> Result<Self> {
        Self::from_json(SEED_FIXTURE)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get_all(&self) -> Vec<Question> {
        self.questions.values().cloned().collect()
    }

    pub fn get_by_id(&self, id: i32) -> Option<&Question> {
        self.questions.get(&id)
    }

    pub fn get_by_category(&self, category: &str) -> Vec<Question> {
        self.questions
            .values()
            .filter(|q| q.category == category)
            .cloned()
            .collect()
    }

    pub fn get_by_categories<S: AsRef<str>>(&self, categories: &[S]) -> Vec<Question> {
        let wanted: HashSet<&str> = categories.iter().map(AsRef::as_ref).collect();
        self.questions
            .values()
            .filter(|q| wanted.contains(q.category.as_str()))
            .cloned()
            .collect()
    }

    pub fn get_random(&self, category: Option<&str>, limit: usize) -> Vec<Question> {
        self.get_random_with(&mut rand::rng(), category, limit)
    }

    /// Filters by category, shuffles (Fisher-Yates), then keeps the first `limit`.
    pub fn get_random_with<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        category: Option<&str>,
        limit: usize,
    ) -> Vec<Question> {
        let mut questions = match category {
            Some(category) => self.get_by_category(category),
            None => self.get_all(),
        };
        questions.shuffle(rng);
        questions.truncate(limit);
        questions
    }

    pub fn category_counts(&self) -> BTreeMap<&str, usize> {
        let mut counts = BTreeMap::new();
        for question in self.questions.values() {
            *counts.entry(question.category.as_str()).or_insert(0) += 1;
        }
        counts
    }

    pub fn category_summaries(&self) -> Vec<CategorySummary> {
        let counts = self.category_counts();
        CATEGORIES
            .iter()
            .map(|info| CategorySummary {
                key: info.key.to_string(),
                name: info.name.to_string(),
                description: info.description.to_string(),
                question_count: counts.get(info.key).copied().unwrap_or(0),
            })
            .collect()
    }
}
