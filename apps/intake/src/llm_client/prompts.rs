// Request fragments shared by every call to the generation backend.
// Feature-specific prompt templates live next to the feature that sends them.

use serde::Serialize;

/// One entry of the `safetySettings` request field.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SafetySetting {
    pub category: &'static str,
    pub threshold: &'static str,
}

/// Harassment and hate-speech filters are disabled for question generation.
pub const DEFAULT_SAFETY_SETTINGS: &[SafetySetting] = &[
    SafetySetting {
        category: "HARM_CATEGORY_HARASSMENT",
        threshold: "BLOCK_NONE",
    },
    SafetySetting {
        category: "HARM_CATEGORY_HATE_SPEECH",
        threshold: "BLOCK_NONE",
    },
];
