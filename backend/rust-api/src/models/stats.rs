use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryStat {
    pub attempted: u32,
    pub correct: u32,
    /// Mean seconds per attempted question in the category
    pub avg_time: f64,
}

/// Summary returned by `GET /api/stats/{userId}`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub total_attempted: u32,
    pub total_correct: u32,
    pub total_bookmarked: u32,
    pub category_stats: BTreeMap<String, CategoryStat>,
}
