use crate::metrics::{BOOKMARK_TOGGLES_TOTAL, PROGRESS_RECORDED_TOTAL};
use crate::models::{NewProgress, ProgressUpdate, UserProgress};
use crate::services::catalog::Catalog;
use crate::services::{StoreError, StoreResult};
use chrono::Utc;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct ProgressTable {
    records: BTreeMap<i32, UserProgress>,
    /// (user_id, question_id) -> record id
    by_pair: HashMap<(i32, i32), i32>,
    last_id: i32,
}

impl ProgressTable {
    fn insert(&mut self, progress: &NewProgress) -> UserProgress {
        self.last_id += 1;
        let record = UserProgress {
            id: self.last_id,
            user_id: progress.user_id,
            question_id: progress.question_id,
            is_correct: progress.is_correct,
            time_spent: progress.time_spent,
            selected_answer: progress.selected_answer,
            is_bookmarked: progress.is_bookmarked.unwrap_or(false),
            attempted_at: Utc::now(),
        };
        self.by_pair
            .insert((record.user_id, record.question_id), record.id);
        self.records.insert(record.id, record.clone());
        record
    }

    fn find_pair_mut(&mut self, user_id: i32, question_id: i32) -> Option<&mut UserProgress> {
        let id = self.by_pair.get(&(user_id, question_id))?;
        self.records.get_mut(id)
    }
}

/// Mutable per-user attempt and bookmark records, one per (user, question) pair.
#[derive(Debug, Default)]
pub struct ProgressStore {
    table: RwLock<ProgressTable>,
}

impl ProgressStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores an attempt. A second write for the same pair overwrites the
    /// answer fields of the existing record (last write wins) and keeps its id.
    pub async fn create(&self, progress: NewProgress) -> UserProgress {
        let mut table = self.table.write().await;

        let record = match table.find_pair_mut(progress.user_id, progress.question_id) {
            Some(existing) => {
                existing.is_correct = progress.is_correct;
                existing.time_spent = progress.time_spent;
                existing.selected_answer = progress.selected_answer;
                if let Some(is_bookmarked) = progress.is_bookmarked {
                    existing.is_bookmarked = is_bookmarked;
                }
                existing.attempted_at = Utc::now();
                existing.clone()
            }
            None => table.insert(&progress),
        };

        if let Some(is_correct) = record.is_correct {
            PROGRESS_RECORDED_TOTAL
                .with_label_values(&[if is_correct { "true" } else { "false" }])
                .inc();
        }

        tracing::debug!(
            "Stored progress id={} user={} question={} correct={:?}",
            record.id,
            record.user_id,
            record.question_id,
            record.is_correct
        );

        record
    }

    /// Merges a partial update. On a catalog question `is_correct` follows the
    /// resulting `selected_answer`, so a client flag cannot contradict it.
    pub async fn update(
        &self,
        id: i32,
        update: &ProgressUpdate,
        catalog: &Catalog,
    ) -> StoreResult<UserProgress> {
        let mut table = self.table.write().await;
        let record = table
            .records
            .get_mut(&id)
            .ok_or_else(|| StoreError::NotFound("Progress".to_string()))?;

        let selected = update.selected_answer.or(record.selected_answer);
        let graded = grade(catalog, record.question_id, selected)?;

        record.apply(update);
        if graded.is_some() {
            record.is_correct = graded;
        }
        Ok(record.clone())
    }

    pub async fn get(&self, id: i32) -> Option<UserProgress> {
        self.table.read().await.records.get(&id).cloned()
    }

    pub async fn get_user_progress(&self, user_id: i32) -> Vec<UserProgress> {
        self.table
            .read()
            .await
            .records
            .values()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect()
    }

    /// Flips the bookmark flag for the pair, creating a bookmark-only record
    /// (null answer fields) when none exists yet.
    pub async fn toggle_bookmark(&self, user_id: i32, question_id: i32) -> UserProgress {
        let mut table = self.table.write().await;

        let record = match table.find_pair_mut(user_id, question_id) {
            Some(existing) => {
                existing.is_bookmarked = !existing.is_bookmarked;
                existing.attempted_at = Utc::now();
                existing.clone()
            }
            None => table.insert(&NewProgress::bookmark(user_id, question_id)),
        };

        let state = if record.is_bookmarked { "on" } else { "off" };
        BOOKMARK_TOGGLES_TOTAL.with_label_values(&[state]).inc();
        tracing::debug!(
            "Bookmark {} for user={} question={}",
            state,
            user_id,
            question_id
        );

        record
    }

    pub async fn bookmarked_question_ids(&self, user_id: i32) -> Vec<i32> {
        self.table
            .read()
            .await
            .records
            .values()
            .filter(|p| p.user_id == user_id && p.is_bookmarked)
            .map(|p| p.question_id)
            .collect()
    }

    pub async fn record_count(&self) -> usize {
        self.table.read().await.records.len()
    }
}

/// Checks the submitted answer against the catalog and sets `is_correct` from it.
/// Questions missing from the catalog keep whatever the client sent.
pub fn grade_attempt(catalog: &Catalog, progress: &mut NewProgress) -> StoreResult<()> {
    if let Some(is_correct) = grade(catalog, progress.question_id, progress.selected_answer)? {
        progress.is_correct = Some(is_correct);
    }
    Ok(())
}

/// `None` when there is nothing to grade: no answer, or no such catalog question.
fn grade(catalog: &Catalog, question_id: i32, selected: Option<i32>) -> StoreResult<Option<bool>> {
    let (Some(question), Some(selected)) = (catalog.get_by_id(question_id), selected) else {
        return Ok(None);
    };

    let index = usize::try_from(selected)
        .ok()
        .filter(|s| *s < question.options.len())
        .ok_or_else(|| {
            StoreError::InvalidInput(format!(
                "selectedAnswer {} is out of range for question {}",
                selected, question.id
            ))
        })?;

    Ok(Some(question.is_correct(index)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn attempt(user_id: i32, question_id: i32, correct: bool, time_spent: i32) -> NewProgress {
        NewProgress {
            user_id,
            question_id,
            selected_answer: Some(if correct { 1 } else { 0 }),
            is_correct: Some(correct),
            time_spent: Some(time_spent),
            is_bookmarked: None,
        }
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let store = ProgressStore::new();
        let first = store.create(attempt(1, 1, true, 10)).await;
        let second = store.create(attempt(1, 2, false, 20)).await;
        let other_user = store.create(attempt(2, 1, true, 5)).await;

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(other_user.id, 3);
        assert!(!first.is_bookmarked);
    }

    #[tokio::test]
    async fn test_created_record_is_visible_in_user_progress() {
        let store = ProgressStore::new();
        let record = store.create(attempt(9, 4, true, 12)).await;

        let progress = store.get_user_progress(9).await;
        assert_eq!(progress, vec![record]);
        assert!(store.get_user_progress(10).await.is_empty());
    }

    #[tokio::test]
    async fn test_second_attempt_for_pair_overwrites_first() {
        let store = ProgressStore::new();
        let first = store.create(attempt(1, 3, false, 40)).await;
        let second = store.create(attempt(1, 3, true, 15)).await;

        assert_eq!(first.id, second.id);
        assert_eq!(second.is_correct, Some(true));
        assert_eq!(second.time_spent, Some(15));
        assert_eq!(store.record_count().await, 1);
    }

    #[tokio::test]
    async fn test_attempt_keeps_existing_bookmark() {
        let store = ProgressStore::new();
        store.toggle_bookmark(1, 3).await;
        let record = store.create(attempt(1, 3, true, 15)).await;

        assert!(record.is_bookmarked);
        assert_eq!(record.is_correct, Some(true));
    }

    #[tokio::test]
    async fn test_toggle_bookmark_twice_clears_it() {
        let store = ProgressStore::new();
        let first = store.toggle_bookmark(1, 5).await;
        assert!(first.is_bookmarked);
        assert_eq!(first.is_correct, None);
        assert_eq!(first.selected_answer, None);
        assert_eq!(first.time_spent, None);

        let second = store.toggle_bookmark(1, 5).await;
        assert_eq!(second.id, first.id);
        assert!(!second.is_bookmarked);

        // The bookmark-only record stays behind
        assert_eq!(store.get_user_progress(1).await.len(), 1);
        assert!(store.bookmarked_question_ids(1).await.is_empty());
    }

    #[tokio::test]
    async fn test_toggle_bookmark_on_attempted_question() {
        let store = ProgressStore::new();
        let record = store.create(attempt(1, 2, true, 8)).await;
        let toggled = store.toggle_bookmark(1, 2).await;

        assert_eq!(toggled.id, record.id);
        assert!(toggled.is_bookmarked);
        assert_eq!(toggled.is_correct, Some(true));
        assert_eq!(store.bookmarked_question_ids(1).await, vec![2]);
    }

    #[tokio::test]
    async fn test_update_merges_and_reports_missing() {
        let store = ProgressStore::new();
        let record = store.create(attempt(1, 1, false, 30)).await;

        let catalog = Catalog::from_seeds(Vec::new()).unwrap();
        let updated = store
            .update(
                record.id,
                &ProgressUpdate {
                    time_spent: Some(45),
                    ..Default::default()
                },
                &catalog,
            )
            .await
            .unwrap();
        assert_eq!(updated.time_spent, Some(45));
        assert_eq!(updated.is_correct, Some(false));
        assert!(updated.attempted_at >= record.attempted_at);
        assert_eq!(store.get(record.id).await, Some(updated));

        let missing = store.update(99, &ProgressUpdate::default(), &catalog).await;
        assert!(matches!(missing, Err(StoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_grades_against_stored_answer() {
        let catalog = Catalog::seeded().unwrap();
        let store = ProgressStore::new();
        let record = store.create(attempt(1, 1, true, 10)).await;

        let flag_only = ProgressUpdate {
            is_correct: Some(false),
            ..Default::default()
        };
        let updated = store.update(record.id, &flag_only, &catalog).await.unwrap();
        assert_eq!(updated.selected_answer, Some(1));
        assert_eq!(updated.is_correct, Some(true));

        let new_answer = ProgressUpdate {
            selected_answer: Some(0),
            ..Default::default()
        };
        let updated = store.update(record.id, &new_answer, &catalog).await.unwrap();
        assert_eq!(updated.is_correct, Some(false));

        let out_of_range = ProgressUpdate {
            selected_answer: Some(7),
            time_spent: Some(99),
            ..Default::default()
        };
        let result = store.update(record.id, &out_of_range, &catalog).await;
        assert!(matches!(result, Err(StoreError::InvalidInput(_))));
        let stored = store.get(record.id).await.unwrap();
        assert_eq!(stored.selected_answer, Some(0));
        assert_eq!(stored.time_spent, Some(10));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_toggles_create_single_record() {
        let store = Arc::new(ProgressStore::new());
        let handles: Vec<_> = (0..16)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move { store.toggle_bookmark(3, 7).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }

        let progress = store.get_user_progress(3).await;
        assert_eq!(progress.len(), 1);
        // Even number of flips ends unbookmarked
        assert!(!progress[0].is_bookmarked);
    }

    #[test]
    fn test_grade_attempt_overrides_client_flag() {
        let catalog = Catalog::seeded().unwrap();

        let mut progress = NewProgress {
            user_id: 1,
            question_id: 1,
            selected_answer: Some(1),
            is_correct: Some(false),
            ..Default::default()
        };
        grade_attempt(&catalog, &mut progress).unwrap();
        assert_eq!(progress.is_correct, Some(true));

        progress.selected_answer = Some(0);
        grade_attempt(&catalog, &mut progress).unwrap();
        assert_eq!(progress.is_correct, Some(false));
    }

    #[test]
    fn test_grade_attempt_rejects_out_of_range_answer() {
        let catalog = Catalog::seeded().unwrap();
        let mut progress = NewProgress {
            user_id: 1,
            question_id: 1,
            selected_answer: Some(4),
            ..Default::default()
        };
        let result = grade_attempt(&catalog, &mut progress);
        assert!(matches!(result, Err(StoreError::InvalidInput(_))));
    }

    #[test]
    fn test_grade_attempt_leaves_unknown_question_alone() {
        let catalog = Catalog::seeded().unwrap();
        let mut progress = NewProgress {
            user_id: 1,
            question_id: 10_000,
            selected_answer: Some(9),
            is_correct: Some(true),
            ..Default::default()
        };
        grade_attempt(&catalog, &mut progress).unwrap();
        assert_eq!(progress.is_correct, Some(true));
    }
}
