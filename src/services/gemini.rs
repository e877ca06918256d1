use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::services::labels;

const DEFAULT_API_ENDPOINT: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_SYLLABUS_MODEL: &str = "gemini-3-flash-preview";
const DEFAULT_CONTENT_MODEL: &str = "gemini-3-pro-preview";
const CONTENT_THINKING_BUDGET: u32 = 16_000;
const MAX_SYNTHESIZED_SOURCES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl DifficultyLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "beginner" => Some(Self::Beginner),
            "intermediate" => Some(Self::Intermediate),
            "advanced" => Some(Self::Advanced),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Uz,
    En,
    Ru,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Uz => "uz",
            Self::En => "en",
            Self::Ru => "ru",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "uz" => Some(Self::Uz),
            "en" => Some(Self::En),
            "ru" => Some(Self::Ru),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    #[serde(default)]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub week: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Source {
    pub university: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Syllabus {
    pub subject: String,
    pub difficulty: DifficultyLevel,
    #[serde(default)]
    pub topics: Vec<Topic>,
    #[serde(default)]
    pub sources: Vec<Source>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestItem {
    pub question: String,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub correct_answer: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedContent {
    pub lecture_note: String,
    pub educational_case: String,
    pub kazus: String,
    #[serde(default)]
    pub questions: Vec<String>,
    #[serde(default)]
    pub tests: Vec<TestItem>,
}

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("generation backend not configured: {0}")]
    NotConfigured(&'static str),
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("HTTP {status}: {body}")]
    HttpStatus {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("response contained no candidate text")]
    EmptyCandidates,
    #[error("response JSON did not match the expected shape: {0}")]
    Parse(#[from] serde_json::Error),
}

impl GenerationError {
    /// Call failures and parse failures surface with different messages
    /// on the syllabus path; the content path collapses both.
    pub fn is_parse_failure(&self) -> bool {
        matches!(self, Self::EmptyCandidates | Self::Parse(_))
    }
}

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub api_endpoint: String,
    pub syllabus_model: String,
    pub content_model: String,
}

#[derive(Clone)]
pub struct GeminiClient {
    config: GeminiConfig,
    client: reqwest::Client,
}

impl GeminiClient {
    pub fn from_env() -> Self {
        let api_key = env_string("GEMINI_API_KEY");
        let api_endpoint = env_string("GEMINI_API_ENDPOINT")
            .unwrap_or_else(|| DEFAULT_API_ENDPOINT.to_string());
        let syllabus_model = env_string("GEMINI_SYLLABUS_MODEL")
            .unwrap_or_else(|| DEFAULT_SYLLABUS_MODEL.to_string());
        let content_model = env_string("GEMINI_CONTENT_MODEL")
            .unwrap_or_else(|| DEFAULT_CONTENT_MODEL.to_string());

        Self {
            config: GeminiConfig {
                api_key,
                api_endpoint,
                syllabus_model,
                content_model,
            },
            client: reqwest::Client::new(),
        }
    }

    pub fn is_available(&self) -> bool {
        self.config
            .api_key
            .as_deref()
            .is_some_and(|v| !v.trim().is_empty())
    }

    pub async fn generate_syllabus(
        &self,
        subject: &str,
        topic_count: u32,
        difficulty: DifficultyLevel,
        language: Language,
    ) -> Result<Syllabus, GenerationError> {
        let prompt = syllabus_prompt(subject, topic_count, difficulty, language);
        let payload = serde_json::json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": { "responseMimeType": "application/json" },
            "tools": [{ "googleSearch": {} }],
        });

        let candidate = self.generate(&self.config.syllabus_model, &payload).await?;
        let text = candidate_text(&candidate).ok_or(GenerationError::EmptyCandidates)?;
        let syllabus = parse_syllabus_payload(&text, candidate.grounding_metadata.as_ref())?;
        Ok(syllabus)
    }

    pub async fn generate_detailed_content(
        &self,
        topic_title: &str,
        subject: &str,
        difficulty: DifficultyLevel,
        language: Language,
    ) -> Result<GeneratedContent, GenerationError> {
        let prompt = content_prompt(topic_title, subject, difficulty, language);
        let payload = serde_json::json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "thinkingConfig": { "thinkingBudget": CONTENT_THINKING_BUDGET },
            },
        });

        let candidate = self.generate(&self.config.content_model, &payload).await?;
        let text = candidate_text(&candidate).ok_or(GenerationError::EmptyCandidates)?;
        let content: GeneratedContent = serde_json::from_str(&text)?;
        Ok(content)
    }

    // One attempt per call: a failed request surfaces immediately to the
    // state machine, which reverts to the last stable view.
    async fn generate(
        &self,
        model: &str,
        payload: &serde_json::Value,
    ) -> Result<Candidate, GenerationError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|v| !v.trim().is_empty())
            .ok_or(GenerationError::NotConfigured("GEMINI_API_KEY"))?;

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.api_endpoint.trim_end_matches('/'),
            model
        );

        let resp = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(payload)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(GenerationError::HttpStatus { status, body });
        }

        let bytes = resp.bytes().await?;
        let parsed: GenerateContentResponse = match serde_json::from_slice(&bytes) {
            Ok(v) => v,
            Err(e) => {
                let body_str = String::from_utf8_lossy(&bytes);
                tracing::error!("Failed to parse generateContent envelope: {}. Body: {}", e, body_str);
                return Err(GenerationError::Parse(e));
            }
        };

        parsed
            .candidates
            .into_iter()
            .next()
            .ok_or(GenerationError::EmptyCandidates)
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Clone, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Clone, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Clone, Deserialize)]
struct GroundingChunk {
    web: Option<WebSource>,
}

#[derive(Debug, Clone, Deserialize)]
struct WebSource {
    uri: Option<String>,
    title: Option<String>,
}

fn candidate_text(candidate: &Candidate) -> Option<String> {
    let parts = &candidate.content.as_ref()?.parts;
    let text: String = parts
        .iter()
        .filter_map(|p| p.text.as_deref())
        .collect();
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

fn parse_syllabus_payload(
    text: &str,
    grounding: Option<&GroundingMetadata>,
) -> Result<Syllabus, serde_json::Error> {
    let mut syllabus: Syllabus = serde_json::from_str(text)?;

    if syllabus.sources.is_empty() {
        if let Some(metadata) = grounding {
            syllabus.sources = metadata
                .grounding_chunks
                .iter()
                .take(MAX_SYNTHESIZED_SOURCES)
                .map(|chunk| {
                    let web = chunk.web.as_ref();
                    Source {
                        university: web
                            .and_then(|w| w.title.clone())
                            .filter(|t| !t.trim().is_empty())
                            .unwrap_or_else(|| "Top University".to_string()),
                        url: web
                            .and_then(|w| w.uri.clone())
                            .filter(|u| !u.trim().is_empty())
                            .unwrap_or_else(|| "#".to_string()),
                        title: "Original Syllabus".to_string(),
                    }
                })
                .collect();
        }
    }

    for (idx, topic) in syllabus.topics.iter_mut().enumerate() {
        if topic.id.trim().is_empty() {
            topic.id = Uuid::new_v4().to_string();
        }
        if topic.week == 0 {
            topic.week = idx as u32 + 1;
        }
    }

    Ok(syllabus)
}

fn syllabus_prompt(
    subject: &str,
    topic_count: u32,
    difficulty: DifficultyLevel,
    language: Language,
) -> String {
    format!(
        "Top universities (like MIT, Harvard, Stanford, Oxford) are known for their \
         high-quality syllabuses.\n\
         Create a detailed educational syllabus for the subject: \"{subject}\".\n\
         Target Difficulty Level: {difficulty_desc}.\n\
         The syllabus must contain exactly {topic_count} topics/weeks.\n\n\
         For each topic, provide:\n\
         1. A clear Title.\n\
         2. A short description of what is covered, tailored to the {difficulty} level.\n\n\
         CRITICAL: Use the googleSearch tool to find real-world syllabuses from top \
         universities and reference them.\n\
         Provide the source links as 'groundingMetadata'.\n\n\
         The final output should be strictly JSON format matching this structure:\n\
         {{\n\
           \"subject\": \"{subject}\",\n\
           \"difficulty\": \"{difficulty}\",\n\
           \"topics\": [\n\
             {{ \"id\": \"1\", \"title\": \"Topic 1\", \"description\": \"...\", \"week\": 1 }}\n\
           ],\n\
           \"sources\": [\n\
             {{ \"university\": \"MIT\", \"url\": \"...\", \"title\": \"Syllabus Name\" }}\n\
           ]\n\
         }}\n\
         Output language: {language_name}.",
        subject = subject,
        difficulty_desc = labels::difficulty_description(difficulty, language),
        difficulty = difficulty.as_str(),
        topic_count = topic_count,
        language_name = labels::language_name(language),
    )
}

fn content_prompt(
    topic_title: &str,
    subject: &str,
    difficulty: DifficultyLevel,
    language: Language,
) -> String {
    format!(
        "Subject: {subject}\n\
         Topic: {topic_title}\n\
         Target Difficulty Level: {difficulty_desc}\n\n\
         Task: Prepare high-quality academic and professional educational materials \
         for this topic in {language_name}.\n\
         The complexity must strictly match the {difficulty} level.\n\n\
         REQUIREMENTS:\n\n\
         1. LECTURE_NOTE:\n\
            - At least 3000 words.\n\
            - Logical flow, historical context, interesting facts, theoretical and \
         practical foundations.\n\
            - Use Markdown and LaTeX for formulas.\n\n\
         2. EDUCATIONAL_CASE:\n\
            - Problem statement, scope, consequences if not solved, step-by-step solution.\n\n\
         3. KAZUS:\n\
            - Detailed situational problem.\n\n\
         4. QUESTIONS:\n\
            - At least 20 questions for comprehension.\n\n\
         5. TESTS:\n\
            - At least 30 multiple-choice questions (A, B, C, D) with the correct answer.\n\n\
         Return ONLY this JSON format:\n\
         {{\n\
           \"lectureNote\": \"Detailed markdown lecture text...\",\n\
           \"educationalCase\": \"Detailed case text...\",\n\
           \"kazus\": \"Detailed kazus text...\",\n\
           \"questions\": [\"1...\", \"2...\"],\n\
           \"tests\": [\n\
             {{ \"question\": \"...\", \"options\": [\"A...\", \"B...\", \"C...\", \"D...\"], \"correctAnswer\": \"A\" }}\n\
           ]\n\
         }}",
        subject = subject,
        topic_title = topic_title,
        difficulty_desc = labels::difficulty_description(difficulty, language),
        difficulty = difficulty.as_str(),
        language_name = labels::language_name(language),
    )
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
