use serde::{Deserialize, Serialize};

/// Interview question category. Unknown categories from the frontend land on `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionCategory {
    Technical,
    Behavioral,
    Teamwork,
    Leadership,
    ProblemSolving,
    Communication,
    Adaptability,
    CultureFit,
    #[serde(other)]
    Other,
}

impl QuestionCategory {
    /// Key used by the knowledge base for this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionCategory::Technical => "technical",
            QuestionCategory::Behavioral => "behavioral",
            QuestionCategory::Teamwork => "teamwork",
            QuestionCategory::Leadership => "leadership",
            QuestionCategory::ProblemSolving => "problem-solving",
            QuestionCategory::Communication => "communication",
            QuestionCategory::Adaptability => "adaptability",
            QuestionCategory::CultureFit => "culture-fit",
            QuestionCategory::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub category: QuestionCategory,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    /// Minutes allotted to answer.
    pub time_limit_minutes: u32,
    #[serde(default)]
    pub evaluation_criteria: Vec<String>,
}

/// A candidate's free-text answer and how long they took to write it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    pub text: String,
    #[serde(default)]
    pub time_spent_secs: u32,
}

impl Answer {
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}
