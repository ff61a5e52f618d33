use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct GeminiRequestDto {
    contents: Vec<GeminiContentDto>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct GeminiContentDto {
    parts: Vec<GeminiPartDto>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct GeminiPartDto {
    text: Option<String>,
}

impl GeminiRequestDto {
    pub fn from_prompt(prompt: &str) -> Self {
        Self {
            contents: vec![GeminiContentDto {
                parts: vec![GeminiPartDto {
                    text: Some(prompt.to_string()),
                }],
            }],
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct GeminiResponseDto {
    #[serde(default)]
    candidates: Vec<GeminiCandidateDto>,
}

#[derive(Debug, Deserialize)]
pub struct GeminiCandidateDto {
    content: GeminiContentDto,
}

impl GeminiResponseDto {
    /// Text of the first candidate's first part, if any.
    pub fn text(&self) -> Option<String> {
        self.candidates
            .first()?
            .content
            .parts
            .first()?
            .text
            .clone()
    }
}
