// Recipe suggestion pipeline: prompt building, completion parsing with
// per-endpoint fallbacks, result normalization, and the route handlers.
// All LLM calls go through llm_client; no direct OpenAI calls here.

pub mod handlers;
pub mod models;
pub mod normalize;
pub mod parser;
pub mod prompts;
