//! Category-specific feedback text for heuristic evaluations.

use crate::evaluation::heuristic::{contains_any, is_short_answer};
use crate::models::question::{Answer, Question, QuestionCategory};

/// Below this score the category branch adds improvement points.
const NEEDS_WORK_BELOW: u32 = 70;
/// Answers under this many words are asked to develop further.
const THIN_ANSWER_WORDS: usize = 50;
const DETAILED_ANSWER_WORDS: usize = 100;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Feedback {
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub suggestions: Vec<String>,
    pub detailed_feedback: String,
}

impl Feedback {
    fn strength(&mut self, text: &str) {
        self.strengths.push(text.to_string());
    }

    fn improvement(&mut self, text: &str) {
        self.improvements.push(text.to_string());
    }

    fn suggestion(&mut self, text: &str) {
        self.suggestions.push(text.to_string());
    }
}

/// Three-way grade used in the prose feedback: > 80, > 60, otherwise.
fn grade<'a>(score: u32, excellent: &'a str, good: &'a str, basic: &'a str) -> &'a str {
    if score > 80 {
        excellent
    } else if score > 60 {
        good
    } else {
        basic
    }
}

pub fn build_feedback(question: &Question, answer: &Answer, score: u32) -> Feedback {
    let lower = answer.text.to_lowercase();
    let word_count = answer.word_count();
    let needs_work = score < NEEDS_WORK_BELOW;
    let mut fb = Feedback::default();

    match question.category {
        QuestionCategory::Technical => {
            if contains_any(&lower, &["example", "code"]) {
                fb.strength("You included practical examples that demonstrate your knowledge");
            }
            if word_count > DETAILED_ANSWER_WORDS {
                fb.strength("Detailed answer that covers several aspects of the topic");
            }
            if needs_work {
                fb.improvement("Add more specific technical detail");
                fb.improvement("Include code examples or use cases");
                fb.suggestion("Practice explaining technical concepts step by step");
            }
            fb.detailed_feedback = format!(
                "Your technical answer shows {} understanding of the topic. {}",
                grade(score, "an excellent", "a good", "a basic"),
                if score > 80 {
                    "You demonstrate technical depth and explain it clearly."
                } else {
                    "Consider adding more specific examples and implementation details."
                }
            );
        }

        QuestionCategory::Behavioral => {
            let has_star = contains_any(&lower, &["situation", "task"]);
            if has_star {
                fb.strength("You used the STAR method to structure your answer");
            }
            if contains_any(&lower, &["learned", "result"]) {
                fb.strength("You showed reflection and learning from the experience");
            }
            if !has_star {
                fb.improvement("Use the STAR method (Situation, Task, Action, Result)");
                fb.suggestion("Structure your behavioral answers with STAR");
            }
            if needs_work {
                fb.improvement("Be more specific about the actions you took");
                fb.improvement("Include metrics or quantifiable results");
            }
            fb.detailed_feedback = format!(
                "Your behavioral answer {} reflection and storytelling ability. {}",
                grade(score, "demonstrates excellent", "shows good", "needs to improve its"),
                if has_star {
                    "The STAR structure helps communicate your experience clearly."
                } else {
                    "Consider using the STAR method for more impact."
                }
            );
        }

        QuestionCategory::Teamwork => {
            if contains_any(&lower, &["collaborat", "team"]) {
                fb.strength("You show an understanding of why collaboration matters");
            }
            if contains_any(&lower, &["conflict", "disagree"]) {
                fb.strength("You handle challenging situations with maturity");
            }
            if needs_work {
                fb.improvement("Include specific examples of successful collaboration");
                fb.improvement("Mention how you contribute to the team's success");
                fb.suggestion("Practice describing your role in team dynamics");
            }
            fb.detailed_feedback = format!(
                "Your teamwork answer {} interpersonal skills. {}",
                grade(score, "reflects excellent", "shows good", "needs to develop more"),
                if score > 70 {
                    "You demonstrate emotional maturity and the ability to collaborate."
                } else {
                    "Consider adding concrete examples of your contribution to the team."
                }
            );
        }

        QuestionCategory::Leadership => {
            if contains_any(&lower, &["lead", "guid"]) {
                fb.strength("You understand leadership beyond formal authority");
            }
            if contains_any(&lower, &["influence", "motivat"]) {
                fb.strength("You recognize the importance of influence and motivation");
            }
            if needs_work {
                fb.improvement("Describe specific leadership techniques you have used");
                fb.improvement("Include tangible results of your leadership");
                fb.suggestion("Practice articulating your leadership style");
            }
            fb.detailed_feedback = format!(
                "Your leadership answer {} ability to influence and guide. {}",
                grade(score, "demonstrates strong", "shows potential in your", "needs to develop more"),
                if score > 70 {
                    "You articulate well how you lead without formal authority."
                } else {
                    "Consider including more specific examples of leadership situations."
                }
            );
        }

        _ => {
            fb.strength("Coherent, well-structured answer");
            if needs_work {
                fb.improvement("Add more specific details and examples");
                fb.suggestion("Practice more detailed answers for this category");
            }
            fb.detailed_feedback = format!(
                "Your answer shows {} understanding of the topic.",
                grade(score, "excellent", "good", "basic")
            );
        }
    }

    if score >= 90 {
        fb.strength("Exceptional answer that shows expertise and professional maturity");
    } else if score >= 80 {
        fb.strength("Solid answer with good examples and clear structure");
    } else if score >= 70 {
        fb.strength("Adequate answer that covers the main points");
    }

    if is_short_answer(answer) {
        fb.improvement("Your answer is too short to evaluate; write at least a few full sentences");
    }
    if word_count < THIN_ANSWER_WORDS {
        fb.improvement("Develop your answer further with additional detail");
        fb.suggestion("Aim for answers of at least 100-150 words");
    }

    fb
}
