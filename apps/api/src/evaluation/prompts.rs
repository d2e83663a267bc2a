// All LLM prompt templates for the Evaluation module.
// Reuses cross-cutting fragments from llm_client::prompts.

/// Answer evaluation prompt template.
/// Replace: {preamble}, {grounding_instruction}, {category}, {difficulty}, {title},
///          {description}, {criteria}, {time_spent}, {time_limit}, {answer}, {context}
pub const EVALUATION_PROMPT_TEMPLATE: &str = r#"{preamble}

You are an experienced technical interviewer grading a candidate's practice answer.

{grounding_instruction}

QUESTION
Category: {category}
Difficulty: {difficulty}
Title: {title}
Description: {description}
Evaluation criteria: {criteria}

CANDIDATE ANSWER (written in {time_spent} seconds, limit {time_limit} minutes):
"""
{answer}
"""

REFERENCE CONTEXT (interviewer notes, not part of the answer):
{context}

Return a JSON object with this EXACT schema (no extra fields):
{
  "score": 72,
  "strengths": ["Clear structure with a concrete example"],
  "improvements": ["Quantify the result of the migration"],
  "suggestions": ["Practice the STAR method for behavioral questions"],
  "detailed_feedback": "Two or three sentences of overall feedback addressed to the candidate.",
  "criteria_scores": {"<criterion label>": 70}
}

HARD RULES:
1. `score` and every `criteria_scores` value are integers from 0 to 100
2. `criteria_scores` has one entry per evaluation criterion, using the labels exactly as given
3. An answer of only a few words scores 25 or less
4. Each list holds at most 4 short sentences"#;
