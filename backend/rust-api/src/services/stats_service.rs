use crate::models::{UserProgress, UserStats};
use crate::services::catalog::Catalog;
use crate::services::AppState;

pub struct StatsService<'a> {
    state: &'a AppState,
}

impl<'a> StatsService<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    pub async fn user_stats(&self, user_id: i32) -> UserStats {
        let progress = self.state.progress.get_user_progress(user_id).await;
        compute_user_stats(user_id, &progress, &self.state.catalog)
    }
}

/// Totals count every record of the user. Category stats only cover attempts
/// whose question still resolves in the catalog.
pub fn compute_user_stats(user_id: i32, progress: &[UserProgress], catalog: &Catalog) -> UserStats {
    let mut stats = UserStats::default();

    for record in progress.iter().filter(|p| p.user_id == user_id) {
        if record.is_bookmarked {
            stats.total_bookmarked += 1;
        }

        let Some(is_correct) = record.is_correct else {
            continue;
        };
        stats.total_attempted += 1;
        if is_correct {
            stats.total_correct += 1;
        }

        let Some(question) = catalog.get_by_id(record.question_id) else {
            continue;
        };
        let entry = stats
            .category_stats
            .entry(question.category.clone())
            .or_default();
        entry.attempted += 1;
        if is_correct {
            entry.correct += 1;
        }
        // Accumulates the total here; divided below
        entry.avg_time += f64::from(record.time_spent.unwrap_or(0));
    }

    for entry in stats.category_stats.values_mut() {
        if entry.attempted > 0 {
            entry.avg_time /= f64::from(entry.attempted);
        }
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn record(
        id: i32,
        user_id: i32,
        question_id: i32,
        is_correct: Option<bool>,
        time_spent: Option<i32>,
        is_bookmarked: bool,
    ) -> UserProgress {
        UserProgress {
            id,
            user_id,
            question_id,
            is_correct,
            time_spent,
            selected_answer: is_correct.map(|_| 0),
            is_bookmarked,
            attempted_at: Utc::now(),
        }
    }

    #[test]
    fn test_empty_progress_gives_zero_stats() {
        let catalog = Catalog::seeded().unwrap();
        let stats = compute_user_stats(1, &[], &catalog);

        assert_eq!(stats.total_attempted, 0);
        assert_eq!(stats.total_correct, 0);
        assert_eq!(stats.total_bookmarked, 0);
        assert!(stats.category_stats.is_empty());
    }

    #[test]
    fn test_totals_and_category_averages() {
        let catalog = Catalog::seeded().unwrap();
        // Questions 1 and 2 are numerical, 3 is verbal in the seeded fixture
        let progress = vec![
            record(1, 1, 1, Some(true), Some(30), false),
            record(2, 1, 2, Some(false), Some(50), true),
            record(3, 1, 3, Some(true), None, false),
            record(4, 1, 4, None, None, true),
            record(5, 2, 1, Some(true), Some(999), true),
        ];

        let stats = compute_user_stats(1, &progress, &catalog);
        assert_eq!(stats.total_attempted, 3);
        assert_eq!(stats.total_correct, 2);
        assert_eq!(stats.total_bookmarked, 2);

        let numerical = &stats.category_stats["numerical"];
        assert_eq!(numerical.attempted, 2);
        assert_eq!(numerical.correct, 1);
        assert!((numerical.avg_time - 40.0).abs() < f64::EPSILON);

        let verbal = &stats.category_stats["verbal"];
        assert_eq!(verbal.attempted, 1);
        assert_eq!(verbal.correct, 1);
        assert_eq!(verbal.avg_time, 0.0);

        assert_eq!(stats.category_stats.len(), 2);
    }

    #[test]
    fn test_unknown_question_counts_in_totals_only() {
        let catalog = Catalog::seeded().unwrap();
        let progress = vec![
            record(1, 1, 50_000, Some(true), Some(10), false),
            record(2, 1, 1, Some(false), Some(20), false),
        ];

        let stats = compute_user_stats(1, &progress, &catalog);
        assert_eq!(stats.total_attempted, 2);
        assert_eq!(stats.total_correct, 1);
        assert_eq!(stats.category_stats.len(), 1);
        assert_eq!(stats.category_stats["numerical"].attempted, 1);
        assert_eq!(stats.category_stats["numerical"].correct, 0);
    }

    #[test]
    fn test_serialized_shape() {
        let catalog = Catalog::seeded().unwrap();
        let progress = vec![record(1, 1, 1, Some(true), Some(12), false)];
        let json = serde_json::to_value(compute_user_stats(1, &progress, &catalog)).unwrap();

        assert_eq!(json["totalAttempted"], 1);
        assert_eq!(json["totalCorrect"], 1);
        assert_eq!(json["totalBookmarked"], 0);
        assert_eq!(json["categoryStats"]["numerical"]["avgTime"], 12.0);
    }
}
