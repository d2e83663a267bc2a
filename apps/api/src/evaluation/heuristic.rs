//! Heuristic evaluator — pure-Rust, rule-based scoring. No network, no LLM.
//!
//! Algorithm:
//! 1. Fewer than 5 words → `5 × words`, never above 25.
//! 2. Otherwise base 60, plus bonuses for length, structure markers,
//!    examples, STAR vocabulary (behavioral only) and time efficiency.
//! 3. Clamp to 0 – 100, then build category-specific feedback.
//!
//! Criterion scores carry random jitter; everything else is deterministic.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use rand::Rng;
use uuid::Uuid;

use crate::evaluation::feedback::{build_feedback, Feedback};
use crate::evaluation::AnswerEvaluator;
use crate::models::evaluation::{clamp_score, EvaluationEngine, EvaluationResult};
use crate::models::question::{Answer, Question, QuestionCategory};

/// Answers with fewer words than this take the short-answer path.
pub const SHORT_ANSWER_WORDS: usize = 5;
/// Highest score a short answer can reach.
pub const SHORT_ANSWER_CEILING: u32 = 25;
const SHORT_ANSWER_POINTS_PER_WORD: u32 = 5;

const BASE_SCORE: i32 = 60;
const LENGTH_BONUSES: &[(usize, i32)] = &[(150, 15), (100, 10), (50, 5)];
const STRUCTURE_BONUS: i32 = 10;
const EXAMPLE_BONUS: i32 = 10;
const STAR_BONUS: i32 = 15;
const TIME_BONUS: i32 = 5;

const STRUCTURE_MARKERS: &[&str] = &["1.", "-", "•"];
const EXAMPLE_MARKERS: &[&str] = &["example", "for instance"];
const STAR_MARKERS: &[&str] = &["situation", "task", "action", "result"];

const CRITERION_BASE: f64 = 60.0;
const CRITERION_JITTER: f64 = 30.0;
const CRITERION_KEYWORD_BONUS: f64 = 10.0;

pub struct HeuristicEvaluator;

#[async_trait]
impl AnswerEvaluator for HeuristicEvaluator {
    async fn evaluate(&self, question: &Question, answer: &Answer) -> EvaluationResult {
        evaluate_with_rng(question, answer, &mut rand::thread_rng())
    }
}

/// Full heuristic evaluation with an explicit jitter source.
pub fn evaluate_with_rng<R: Rng>(
    question: &Question,
    answer: &Answer,
    rng: &mut R,
) -> EvaluationResult {
    let score = compute_score(question, answer);
    let Feedback {
        strengths,
        improvements,
        suggestions,
        detailed_feedback,
    } = build_feedback(question, answer, score);

    EvaluationResult {
        id: Uuid::new_v4(),
        score,
        strengths,
        improvements,
        suggestions,
        detailed_feedback,
        criteria_scores: criteria_scores(question, answer, rng),
        engine: EvaluationEngine::Heuristic,
        evaluated_at: Utc::now(),
    }
}

pub fn is_short_answer(answer: &Answer) -> bool {
    answer.word_count() < SHORT_ANSWER_WORDS
}

/// Deterministic overall score for an answer, 0 – 100.
pub fn compute_score(question: &Question, answer: &Answer) -> u32 {
    let word_count = answer.word_count();

    if word_count < SHORT_ANSWER_WORDS {
        return (word_count as u32 * SHORT_ANSWER_POINTS_PER_WORD).min(SHORT_ANSWER_CEILING);
    }

    let lower = answer.text.to_lowercase();
    let mut score = BASE_SCORE;

    if let Some((_, bonus)) = LENGTH_BONUSES.iter().find(|(min, _)| word_count > *min) {
        score += bonus;
    }
    if contains_any(&answer.text, STRUCTURE_MARKERS) {
        score += STRUCTURE_BONUS;
    }
    if contains_any(&lower, EXAMPLE_MARKERS) {
        score += EXAMPLE_BONUS;
    }
    if question.category == QuestionCategory::Behavioral && contains_any(&lower, STAR_MARKERS) {
        score += STAR_BONUS;
    }
    if let Some(efficiency) = time_efficiency(answer.time_spent_secs, question.time_limit_minutes) {
        if efficiency > 50.0 && efficiency < 90.0 {
            score += TIME_BONUS;
        }
    }

    clamp_score(score as f64)
}

/// Percentage of the time limit used, capped at 100. `None` when there is no limit.
pub fn time_efficiency(time_spent_secs: u32, time_limit_minutes: u32) -> Option<f64> {
    if time_limit_minutes == 0 {
        return None;
    }
    let limit_secs = time_limit_minutes as f64 * 60.0;
    Some((time_spent_secs as f64 / limit_secs * 100.0).min(100.0))
}

/// Per-criterion scores: jittered base plus a bonus when the answer mentions
/// the criterion's first word. Short answers are held to the short-answer ceiling.
pub fn criteria_scores<R: Rng>(
    question: &Question,
    answer: &Answer,
    rng: &mut R,
) -> BTreeMap<String, u32> {
    let lower = answer.text.to_lowercase();
    let ceiling = if is_short_answer(answer) {
        SHORT_ANSWER_CEILING
    } else {
        100
    };

    question
        .evaluation_criteria
        .iter()
        .map(|criterion| {
            let mut score = CRITERION_BASE + rng.gen::<f64>() * CRITERION_JITTER;
            let criterion_lower = criterion.to_lowercase();
            if let Some(first_word) = criterion_lower.split_whitespace().next() {
                if lower.contains(first_word) {
                    score += CRITERION_KEYWORD_BONUS;
                }
            }
            (criterion.clone(), clamp_score(score).min(ceiling))
        })
        .collect()
}

pub(crate) fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}
