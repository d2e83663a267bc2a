use crate::models::progress::UserProgress;

const LOW_AVERAGE_SCORE: f64 = 70.0;
/// Ten minutes per answer on average.
const SLOW_AVERAGE_SECS: f64 = 600.0;

/// Practice tips tailored to the user's running averages.
pub fn personalized_tips(progress: &UserProgress) -> Vec<String> {
    let mut tips = Vec::new();

    if progress.stats.average_score < LOW_AVERAGE_SCORE {
        tips.push("💡 Practice structuring your answers with an introduction, body and conclusion");
        tips.push("📝 Always include specific examples from your experience");
    }

    if progress.stats.average_time_secs > SLOW_AVERAGE_SECS {
        tips.push("⏱️ Practice more concise answers - aim for 5-8 minutes per question");
    }

    tips.push("🎯 Use the STAR method for behavioral questions");
    tips.push("🔍 Research the company and connect your answers to its values");

    tips.into_iter().map(String::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::progress::ProgressStats;

    fn progress(average_score: f64, average_time_secs: f64) -> UserProgress {
        UserProgress {
            stats: ProgressStats {
                average_score,
                average_time_secs,
            },
        }
    }

    #[test]
    fn test_strong_fast_user_gets_baseline_tips() {
        let tips = personalized_tips(&progress(85.0, 300.0));
        assert_eq!(tips.len(), 2);
        assert!(tips[0].contains("STAR"));
    }

    #[test]
    fn test_low_score_adds_structure_tips() {
        let tips = personalized_tips(&progress(55.0, 300.0));
        assert_eq!(tips.len(), 4);
        assert!(tips[0].contains("introduction, body and conclusion"));
    }

    #[test]
    fn test_slow_user_gets_conciseness_tip() {
        let tips = personalized_tips(&progress(90.0, 720.0));
        assert!(tips.iter().any(|t| t.contains("concise")));
    }

    #[test]
    fn test_boundaries_are_exclusive() {
        let tips = personalized_tips(&progress(70.0, 600.0));
        assert_eq!(tips.len(), 2);
    }
}
