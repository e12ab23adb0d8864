// LLM prompt templates for technical question generation.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Which instruction template is sent to the generation backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PromptStyle {
    /// Tech stack passed through verbatim.
    #[default]
    Simple,
    /// Tech stack bucketed into languages, frameworks, databases and tools.
    Categorized,
}

#[derive(Debug, Error)]
#[error("unknown prompt style '{0}' (expected 'simple' or 'categorized')")]
pub struct UnknownPromptStyle(String);

impl FromStr for PromptStyle {
    type Err = UnknownPromptStyle;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "simple" => Ok(PromptStyle::Simple),
            "categorized" => Ok(PromptStyle::Categorized),
            other => Err(UnknownPromptStyle(other.to_string())),
        }
    }
}

impl fmt::Display for PromptStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PromptStyle::Simple => f.write_str("simple"),
            PromptStyle::Categorized => f.write_str("categorized"),
        }
    }
}

/// Replace: {count}, {tech_stack}
pub const QUESTION_PROMPT_TEMPLATE: &str = "\
Generate {count} technical questions for a candidate with the following tech stack: {tech_stack}

Guidelines:
1. Create questions that test practical understanding
2. Avoid yes/no questions
3. Focus on problem-solving and depth of knowledge

Provide the questions as a clear, numbered list.";

/// Replace: {languages}, {frameworks}, {databases}, {tools}, {count}
pub const CATEGORIZED_PROMPT_TEMPLATE: &str = "\
As a senior technical interviewer, generate a comprehensive set of technical assessment questions that deeply evaluate a candidate's expertise across their declared tech stack.

Candidate's Technologies:
- Languages: {languages}
- Frameworks: {frameworks}
- Databases: {databases}
- Tools: {tools}

Assessment Guidelines:
1. Create questions that test:
   - Theoretical understanding
   - Practical application
   - Problem-solving skills
   - Advanced conceptual knowledge
2. Ensure questions are:
   - Technology-specific
   - Progressively challenging
   - Covering multiple skill depths
3. Avoid:
   - Simple recall questions
   - Yes/no type questions
   - Overly broad or vague inquiries

Generate {count} distinct questions that comprehensively assess the candidate's technical proficiency. Provide the questions as a clear, numbered list.";

const KNOWN_LANGUAGES: &[&str] = &[
    "python",
    "java",
    "javascript",
    "typescript",
    "go",
    "rust",
    "c++",
    "c#",
];

const KNOWN_FRAMEWORKS: &[&str] = &[
    "django", "flask", "react", "angular", "vue", "spring", ".net", "express",
];

const KNOWN_DATABASES: &[&str] = &[
    "postgresql",
    "mongodb",
    "mysql",
    "sqlite",
    "redis",
    "cassandra",
];

/// Comma-separated tech stack split into coarse buckets.
/// Anything not recognised lands in `tools`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TechCategories {
    pub languages: Vec<String>,
    pub frameworks: Vec<String>,
    pub databases: Vec<String>,
    pub tools: Vec<String>,
}

pub fn categorize_tech_stack(tech_stack: &str) -> TechCategories {
    let mut categories = TechCategories::default();
    for item in tech_stack
        .split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
    {
        let bucket = if KNOWN_LANGUAGES.contains(&item.as_str()) {
            &mut categories.languages
        } else if KNOWN_FRAMEWORKS.contains(&item.as_str()) {
            &mut categories.frameworks
        } else if KNOWN_DATABASES.contains(&item.as_str()) {
            &mut categories.databases
        } else {
            &mut categories.tools
        };
        bucket.push(item);
    }
    categories
}

fn join_or_na(items: &[String]) -> String {
    if items.is_empty() {
        "N/A".to_string()
    } else {
        items.join(", ")
    }
}

/// Renders the question-generation prompt for `tech_stack`.
pub fn build_question_prompt(style: PromptStyle, tech_stack: &str, count: usize) -> String {
    match style {
        PromptStyle::Simple => QUESTION_PROMPT_TEMPLATE
            .replace("{count}", &count.to_string())
            .replace("{tech_stack}", tech_stack),
        PromptStyle::Categorized => {
            let c = categorize_tech_stack(tech_stack);
            CATEGORIZED_PROMPT_TEMPLATE
                .replace("{languages}", &join_or_na(&c.languages))
                .replace("{frameworks}", &join_or_na(&c.frameworks))
                .replace("{databases}", &join_or_na(&c.databases))
                .replace("{tools}", &join_or_na(&c.tools))
                .replace("{count}", &count.to_string())
        }
    }
}
