use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressStats {
    pub average_score: f64,
    /// Mean seconds spent per answer.
    pub average_time_secs: f64,
}

/// Aggregate practice statistics sent by the frontend when asking for tips.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProgress {
    pub stats: ProgressStats,
}
