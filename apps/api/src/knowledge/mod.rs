//! Knowledge base — static, category-keyed reference sentences spliced into evaluation prompts.
//!
//! This is plain substring filtering over a hardcoded table, not retrieval.
//! The table lives in memory only; additions are lost on restart.

pub mod handlers;
mod seed;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Matching sentences taken from the category, before the generic fill.
const MAX_MATCHED: usize = 3;
const CATEGORY_FILL: usize = 2;
const CATEGORY_TIPS: usize = 2;
const GENERAL_TIPS: usize = 1;

/// Title words shorter than this never act as keywords.
const MIN_KEYWORD_LEN: usize = 3;

const CONFIDENCE_MATCHED: f32 = 0.8;
const CONFIDENCE_GENERIC: f32 = 0.6;

pub const SOURCES: [&str; 2] = ["Knowledge Base", "Interview Best Practices"];

/// Context block handed to the prompt builder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelevantContext {
    /// Newline-joined reference sentences.
    pub relevant_info: String,
    pub sources: Vec<String>,
    pub confidence: f32,
}

#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    knowledge: BTreeMap<String, Vec<String>>,
    tips: BTreeMap<String, Vec<String>>,
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self {
            knowledge: seed::to_map(seed::KNOWLEDGE),
            tips: seed::to_map(seed::INTERVIEW_TIPS),
        }
    }
}

impl KnowledgeBase {
    /// Returns up to three sentences matching the title's keywords, then the
    /// category's generic sentences and tips.
    pub fn relevant_context(&self, category: &str, question_title: &str) -> RelevantContext {
        let category_knowledge = self.knowledge.get(category).map(Vec::as_slice).unwrap_or(&[]);
        let category_tips = self.tips.get(category).map(Vec::as_slice).unwrap_or(&[]);
        let general_tips = self.tips.get("general").map(Vec::as_slice).unwrap_or(&[]);

        let title_lower = question_title.to_lowercase();
        let keywords: Vec<&str> = title_lower
            .split_whitespace()
            .filter(|w| w.chars().count() >= MIN_KEYWORD_LEN)
            .collect();

        let matched: Vec<&String> = category_knowledge
            .iter()
            .filter(|info| {
                let info_lower = info.to_lowercase();
                keywords.iter().any(|kw| info_lower.contains(kw))
            })
            .collect();

        let mut parts: Vec<&str> = Vec::new();
        let candidates = matched
            .iter()
            .take(MAX_MATCHED)
            .copied()
            .chain(category_knowledge.iter().take(CATEGORY_FILL))
            .chain(category_tips.iter().take(CATEGORY_TIPS))
            .chain(general_tips.iter().take(GENERAL_TIPS));
        for sentence in candidates {
            if !parts.contains(&sentence.as_str()) {
                parts.push(sentence);
            }
        }

        RelevantContext {
            relevant_info: parts.join("\n"),
            sources: SOURCES.iter().map(|s| s.to_string()).collect(),
            confidence: if matched.is_empty() {
                CONFIDENCE_GENERIC
            } else {
                CONFIDENCE_MATCHED
            },
        }
    }

    /// Appends a sentence to a category, creating the category if needed.
    pub fn add_knowledge(&mut self, category: &str, information: &str) -> Result<(), AppError> {
        let category = category.trim().to_lowercase();
        let information = information.trim();
        if category.is_empty() {
            return Err(AppError::Validation("category cannot be empty".to_string()));
        }
        if information.is_empty() {
            return Err(AppError::Validation(
                "information cannot be empty".to_string(),
            ));
        }
        self.knowledge
            .entry(category)
            .or_default()
            .push(information.to_string());
        Ok(())
    }

    /// Sentence count per category.
    pub fn stats(&self) -> BTreeMap<String, usize> {
        self.knowledge
            .iter()
            .map(|(category, sentences)| (category.clone(), sentences.len()))
            .collect()
    }
}
