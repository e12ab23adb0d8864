//! Technical question generation: a pluggable, trait-based source of interview
//! questions for a declared tech stack.
//!
//! Default: `LlmQuestionGenerator`, one call to the generation backend.
//! Generation never fails from the caller's point of view: backend errors and
//! unusable responses are replaced by fixed fallback lists.

use async_trait::async_trait;
use tracing::{info, warn};

use crate::interview::prompts::{build_question_prompt, PromptStyle};
use crate::llm_client::{LlmClient, LlmError};

/// Served when the backend call itself fails.
pub const FALLBACK_QUESTIONS: [&str; 5] = [
    "Describe a challenging project you've worked on.",
    "What technologies are you most passionate about?",
    "How do you approach solving complex technical problems?",
    "Explain a recent technological innovation you find interesting.",
    "What's your strategy for continuous learning in tech?",
];

pub fn fallback_questions() -> Vec<String> {
    FALLBACK_QUESTIONS.iter().map(|q| q.to_string()).collect()
}

/// Served when the backend answers but no usable question lines come back.
pub fn tech_stack_fallback_questions(tech_stack: &str) -> Vec<String> {
    vec![
        format!("Describe a challenging project you've worked on with {tech_stack}."),
        format!("What are the key considerations when using {tech_stack}?"),
        "How do you approach learning new technologies?".to_string(),
        "Explain a complex technical concept in simple terms.".to_string(),
        "What recent technological advancement excites you most?".to_string(),
    ]
}

/// Splits raw model output into question lines.
///
/// Keeps trimmed, non-empty lines containing at least one letter, so list
/// numbering on its own line and separators are dropped. At most `cap` lines
/// are returned.
pub fn parse_questions(text: &str, cap: usize) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && line.chars().any(char::is_alphabetic))
        .take(cap)
        .map(str::to_string)
        .collect()
}

/// Resolves a backend result into the final question list.
pub fn questions_from_result(
    result: Result<String, LlmError>,
    tech_stack: &str,
    cap: usize,
) -> Vec<String> {
    match result {
        Ok(text) => {
            let questions = parse_questions(&text, cap);
            if questions.is_empty() {
                warn!("Question generation returned no usable lines; using tech stack fallback");
                tech_stack_fallback_questions(tech_stack)
            } else {
                questions
            }
        }
        Err(e) => {
            warn!("Question generation failed, using fallback questions: {e}");
            fallback_questions()
        }
    }
}

/// Source of technical questions. Implementations must always return a
/// non-empty list.
///
/// Carried in `AppState` as `Arc<dyn QuestionGenerator>`.
#[async_trait]
pub trait QuestionGenerator: Send + Sync {
    async fn generate(&self, tech_stack: &str) -> Vec<String>;
}

/// Question generator backed by the generative-language API.
#[derive(Clone)]
pub struct LlmQuestionGenerator {
    llm: LlmClient,
    style: PromptStyle,
    max_questions: usize,
}

impl LlmQuestionGenerator {
    pub fn new(llm: LlmClient, style: PromptStyle, max_questions: usize) -> Self {
        Self {
            llm,
            style,
            max_questions: max_questions.max(1),
        }
    }
}

#[async_trait]
impl QuestionGenerator for LlmQuestionGenerator {
    async fn generate(&self, tech_stack: &str) -> Vec<String> {
        let prompt = build_question_prompt(self.style, tech_stack, self.max_questions);
        let result = self.llm.generate_text(&prompt).await;
        let questions = questions_from_result(result, tech_stack, self.max_questions);
        info!(count = questions.len(), style = %self.style, "Technical questions ready");
        questions
    }
}

/// Serves a fixed list.
#[cfg(test)]
#[derive(Debug, Clone)]
pub struct StaticQuestionGenerator {
    questions: Vec<String>,
}

#[cfg(test)]
impl StaticQuestionGenerator {
    pub fn new(questions: Vec<String>) -> Self {
        Self { questions }
    }
}

#[cfg(test)]
#[async_trait]
impl QuestionGenerator for StaticQuestionGenerator {
    async fn generate(&self, tech_stack: &str) -> Vec<String> {
        if self.questions.is_empty() {
            return tech_stack_fallback_questions(tech_stack);
        }
        self.questions.clone()
    }
}
