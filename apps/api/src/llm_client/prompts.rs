// Shared prompt fragments for calls to the local inference server.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// The generate endpoint has no system slot, so these are prepended to the prompt text.

/// Preamble that enforces JSON-only output.
pub const JSON_ONLY_PREAMBLE: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Keeps the model from inventing facts the candidate never wrote.
pub const GROUNDING_INSTRUCTION: &str = "\
    CRITICAL: Judge only what the candidate actually wrote. \
    Do NOT credit the answer for ideas it does not contain. \
    Use the reference context to judge accuracy, not as part of the answer.";
