// Intake conversation: stage machine, field validation and technical
// question generation. All LLM calls go through llm_client.

pub mod conversation;
pub mod prompts;
pub mod questions;
pub mod stage;
pub mod validation;
