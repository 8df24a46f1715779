use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Any provider failure is recovered by the caller with the fallback
/// question, so the variants only need to carry enough detail for the
/// informational notice shown to the user.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("transport failure talking to Gemini: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Gemini API error ({status}): {body}")]
    Provider {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("Gemini returned an empty response")]
    EmptyResponse,
}

#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    pub model: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_p: f32,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

impl GeminiClient {
    /// Available Gemini models
    pub const MODELS: &'static [(&'static str, &'static str)] = &[
        ("gemini-2.0-flash", "Gemini 2.0 Flash - Fast and capable"),
        ("gemini-1.5-pro", "Gemini 1.5 Pro - Strongest reasoning"),
        ("gemini-1.5-flash", "Gemini 1.5 Flash - Cheapest, lowest latency"),
    ];

    /// A hung provider must not stall the practice loop; an exceeded bound
    /// is treated the same as any other transport fault.
    const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    pub fn new(api_key: String, model: Option<String>) -> Result<Self, GenerationError> {
        let client = reqwest::Client::builder()
            .timeout(Self::REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            api_key,
            model: model.unwrap_or_else(|| "gemini-2.0-flash".to_string()),
        })
    }

    /// Generate a multiple-choice question for a subtopic. The response is
    /// raw text in the prompted layout; parsing happens in `question::parser`.
    pub async fn generate_question(&self, subtopic: &str) -> Result<String, GenerationError> {
        let prompt = format!(
            "Generate a JEE-Mains or easy JEE-Advanced level multiple-choice question on '{}'.\n\
             Format the response exactly as follows:\n\n\
             Question: [question text]\n\
             A. [option A]\n\
             B. [option B]\n\
             C. [option C]\n\
             D. [option D]\n\
             Correct Answer: [letter of correct answer]\n\n\
             Do not include any explanation in this response.",
            subtopic
        );

        self.generate(
            &prompt,
            GenerationConfig {
                temperature: 0.7,
                top_p: 0.95,
                max_output_tokens: 800,
            },
        )
        .await
    }

    /// Generate an explanation for an already-parsed question. Independent
    /// of question generation: a failure here degrades to a placeholder.
    pub async fn generate_explanation(
        &self,
        subtopic: &str,
        question_text: &str,
        options: &[String],
        correct_answer: &str,
    ) -> Result<String, GenerationError> {
        let options_text: String = options
            .iter()
            .enumerate()
            .map(|(i, opt)| format!("{}. {}\n", (b'A' + i as u8) as char, opt))
            .collect();

        let prompt = format!(
            "For the following JEE-Mains level multiple-choice question on '{}', provide a \
             detailed explanation of why the correct answer is {}.\n\n\
             Question: {}\n{}Correct Answer: {}\n\n\
             Provide a clear, step-by-step explanation of why this is the correct answer. \
             Include relevant formulas, concepts, and calculations where appropriate. Also \
             include the common pitfalls to avoid while solving this type of question.",
            subtopic, correct_answer, question_text, options_text, correct_answer
        );

        // Lower temperature for a more factual response.
        self.generate(
            &prompt,
            GenerationConfig {
                temperature: 0.3,
                top_p: 0.95,
                max_output_tokens: 1000,
            },
        )
        .await
    }

    async fn generate(
        &self,
        prompt: &str,
        config: GenerationConfig,
    ) -> Result<String, GenerationError> {
        let url = format!("{}/{}:generateContent", GEMINI_API_BASE, self.model);

        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: config,
        };

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Provider { status, body });
        }

        let parsed: GenerateResponse = response.json().await?;

        let text: String = parsed
            .candidates
            .first()
            .map(|c| {
                c.content
                    .parts
                    .iter()
                    .map(|p| p.text.as_str())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(GenerationError::EmptyResponse);
        }

        Ok(text)
    }
}
