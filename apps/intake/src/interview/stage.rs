//! Intake stages and the pure transition function that drives them.
//!
//! `advance` never performs I/O. Steps that need the outside world
//! (`GenerateQuestions`, `Terminate`) are handed back to the controller.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::interview::validation::{
    contains_exit_keyword, is_valid_email, is_valid_name, is_valid_phone, parse_experience,
    ExperienceError, MIN_NAME_CHARS,
};
use crate::models::candidate::CandidateRecord;

/// One pending field of the intake, in the order they are collected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    #[default]
    Greeting,
    Name,
    Email,
    Phone,
    Experience,
    Position,
    Location,
    TechStack,
    TechnicalQuestions,
    Complete,
}

impl Stage {
    pub const ORDER: [Stage; 10] = [
        Stage::Greeting,
        Stage::Name,
        Stage::Email,
        Stage::Phone,
        Stage::Experience,
        Stage::Position,
        Stage::Location,
        Stage::TechStack,
        Stage::TechnicalQuestions,
        Stage::Complete,
    ];

    /// The following stage. `Complete` is terminal.
    pub fn next(self) -> Stage {
        let idx = Self::ORDER.iter().position(|s| *s == self).unwrap_or(0);
        Self::ORDER
            .get(idx + 1)
            .copied()
            .unwrap_or(Stage::Complete)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Greeting => "greeting",
            Stage::Name => "name",
            Stage::Email => "email",
            Stage::Phone => "phone",
            Stage::Experience => "experience",
            Stage::Position => "position",
            Stage::Location => "location",
            Stage::TechStack => "tech_stack",
            Stage::TechnicalQuestions => "technical_questions",
            Stage::Complete => "complete",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const WELCOME: &str = "Welcome to the Hiring Assistant!\n\n\
I'm here to help you through our initial screening process. \
Let's get started by collecting some basic information about you.\n\n\
Could you please provide your full name?";

pub const ASK_PHONE: &str =
    "Thank you. What is your phone number? (Please include country code, e.g., +1234567890)";
pub const ASK_EXPERIENCE: &str = "How many years of professional experience do you have?";
pub const ASK_POSITION: &str = "What position(s) are you interested in?";
pub const ASK_LOCATION: &str = "What is your current location?";
pub const ASK_TECH_STACK: &str = "Please list the technologies you are proficient in.\n\
Include:\n\
- Programming Languages\n\
- Frameworks\n\
- Databases\n\
- Tools\n\n\
Example: Python, Django, React, PostgreSQL, Docker";

pub const INVALID_EMAIL: &str = "Invalid email format. Please enter a valid email address.";
pub const INVALID_PHONE: &str =
    "Invalid phone number. Please enter a valid phone number with country code.";
pub const EXPERIENCE_NOT_A_NUMBER: &str = "Please enter a numeric value for years of experience.";
pub const EXPERIENCE_OUT_OF_RANGE: &str =
    "Please enter a valid number of years (between 0 and 50).";
pub const EMPTY_POSITION: &str = "Please tell us which position(s) you are interested in.";

fn invalid_name() -> String {
    format!("Please enter a valid name (at least {MIN_NAME_CHARS} characters).")
}

/// Outcome of feeding one normalized input to a stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Input accepted; move to `next` and show `reply`.
    Advance { next: Stage, reply: String },
    /// Input rejected; stay on the current stage.
    Reject { reply: String },
    /// Answer recorded; ask the next technical question.
    NextQuestion { reply: String },
    /// Tech stack recorded; the controller must fetch questions.
    GenerateQuestions,
    /// End the conversation and persist.
    Terminate,
}

fn advance_to(stage: Stage, reply: impl Into<String>) -> Step {
    Step::Advance {
        next: stage.next(),
        reply: reply.into(),
    }
}

fn reject(reply: impl Into<String>) -> Step {
    Step::Reject {
        reply: reply.into(),
    }
}

/// Trims and lower-cases raw user input.
pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Applies `input` (already normalized) to `stage`, mutating `record` for
/// accepted fields.
///
/// Exit keywords win over every stage. In `TechnicalQuestions` the answer is
/// appended and the answer count doubles as the question index.
pub fn advance(stage: Stage, record: &mut CandidateRecord, input: &str) -> Step {
    if contains_exit_keyword(input) {
        return Step::Terminate;
    }

    match stage {
        Stage::Greeting => advance_to(stage, WELCOME),
        Stage::Name => {
            if !is_valid_name(input) {
                return reject(invalid_name());
            }
            record.full_name = Some(input.to_string());
            advance_to(
                stage,
                format!("Nice to meet you, {input}! What is your email address?"),
            )
        }
        Stage::Email => {
            if !is_valid_email(input) {
                return reject(INVALID_EMAIL);
            }
            record.email = Some(input.to_string());
            advance_to(stage, ASK_PHONE)
        }
        Stage::Phone => {
            if !is_valid_phone(input) {
                return reject(INVALID_PHONE);
            }
            record.phone = Some(input.to_string());
            advance_to(stage, ASK_EXPERIENCE)
        }
        Stage::Experience => match parse_experience(input) {
            Ok(years) => {
                record.years_experience = Some(years);
                advance_to(stage, ASK_POSITION)
            }
            Err(ExperienceError::NotANumber) => reject(EXPERIENCE_NOT_A_NUMBER),
            Err(ExperienceError::OutOfRange) => reject(EXPERIENCE_OUT_OF_RANGE),
        },
        Stage::Position => {
            if input.is_empty() {
                return reject(EMPTY_POSITION);
            }
            record.desired_positions = Some(input.to_string());
            advance_to(stage, ASK_LOCATION)
        }
        Stage::Location => {
            record.current_location = Some(input.to_string());
            advance_to(stage, ASK_TECH_STACK)
        }
        Stage::TechStack => {
            record.tech_stack = Some(input.to_string());
            Step::GenerateQuestions
        }
        Stage::TechnicalQuestions => {
            record.technical_answers.push(input.to_string());
            let index = record.technical_answers.len();
            match record.technical_questions.get(index) {
                Some(question) => Step::NextQuestion {
                    reply: question.clone(),
                },
                None => Step::Terminate,
            }
        }
        Stage::Complete => Step::Terminate,
    }
}
