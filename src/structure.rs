use eyre::{Result, bail};
use log::debug;
use serde::Deserialize;

/// Default structuring model
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Which generative-language API serves a model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Gemini,
    Anthropic,
    OpenAi,
}

impl Provider {
    pub fn for_model(model: &str) -> Self {
        if model.starts_with("claude") {
            Provider::Anthropic
        } else if ["gpt", "o1", "o3", "o4"].iter().any(|p| model.starts_with(p)) {
            Provider::OpenAi
        } else {
            Provider::Gemini
        }
    }

    /// Environment variable consulted when no API key is configured
    pub fn api_key_env(&self) -> &'static str {
        match self {
            Provider::Gemini => "GEMINI_API_KEY",
            Provider::Anthropic => "ANTHROPIC_API_KEY",
            Provider::OpenAi => "OPENAI_API_KEY",
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Provider::Gemini => write!(f, "Gemini"),
            Provider::Anthropic => write!(f, "Anthropic"),
            Provider::OpenAi => write!(f, "OpenAI"),
        }
    }
}

/// Build the instruction sent for one transcript chunk (`part` is 1-based)
pub fn build_prompt(chunk: &str, part: usize, total: usize) -> String {
    format!(
        r#"
Convert the following video transcript into a
Notion-ready structured document.

STRICT RULES:
- Use ONLY the transcript content
- Markdown format
- Clear headings (##, ###)
- Bullet points
- No emojis
- Professional, educational tone
- No hallucinations

Transcript chunk ({part}/{total}):

"""
{chunk}
"""

Return clean Markdown only.
"#
    )
}

/// Send one chunk to the model and return its Markdown unmodified
pub async fn structure_chunk(
    client: &reqwest::Client,
    api_key: &str,
    model: &str,
    chunk: &str,
    part: usize,
    total: usize,
) -> Result<String> {
    let prompt = build_prompt(chunk, part, total);

    match Provider::for_model(model) {
        Provider::Gemini => generate_gemini(client, api_key, model, &prompt).await,
        Provider::Anthropic => generate_anthropic(client, api_key, model, &prompt).await,
        Provider::OpenAi => generate_openai(client, api_key, model, &prompt).await,
    }
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    #[serde(rename = "promptFeedback")]
    prompt_feedback: Option<GeminiPromptFeedback>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContent>,
    #[serde(rename = "finishReason")]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Deserialize)]
struct GeminiPart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiPromptFeedback {
    #[serde(rename = "blockReason")]
    block_reason: Option<String>,
}

async fn generate_gemini(client: &reqwest::Client, api_key: &str, model: &str, prompt: &str) -> Result<String> {
    debug!("Structuring via Gemini API with model {model}");

    let body = serde_json::json!({
        "contents": [
            {
                "role": "user",
                "parts": [{ "text": prompt }]
            }
        ]
    });

    let resp = client
        .post(format!("{GEMINI_BASE_URL}/{model}:generateContent"))
        .header("x-goog-api-key", api_key)
        .header("Content-Type", "application/json")
        .json(&body)
        .send()
        .await?;

    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        bail!("Gemini API returned {status}: {body}");
    }

    let json: GeminiResponse = resp.json().await?;
    extract_gemini_text(json)
}

fn extract_gemini_text(resp: GeminiResponse) -> Result<String> {
    let Some(candidate) = resp.candidates.into_iter().next() else {
        if let Some(reason) = resp.prompt_feedback.and_then(|f| f.block_reason) {
            bail!("Gemini API blocked the prompt: {reason}");
        }
        bail!("unexpected Gemini API response format: no candidates");
    };

    let text: String = candidate
        .content
        .map(|c| c.parts)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|p| p.text)
        .collect();

    if text.is_empty() {
        let reason = candidate.finish_reason.unwrap_or_else(|| "unknown".to_string());
        bail!("Gemini API returned no text (finish reason: {reason})");
    }
    Ok(text)
}

async fn generate_anthropic(client: &reqwest::Client, api_key: &str, model: &str, prompt: &str) -> Result<String> {
    debug!("Structuring via Anthropic API with model {model}");

    let body = serde_json::json!({
        "model": model,
        "max_tokens": 8192,
        "messages": [
            {
                "role": "user",
                "content": prompt
            }
        ]
    });

    let resp = client
        .post("https://api.anthropic.com/v1/messages")
        .header("x-api-key", api_key)
        .header("anthropic-version", "2023-06-01")
        .header("Content-Type", "application/json")
        .json(&body)
        .send()
        .await?;

    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        bail!("Anthropic API returned {status}: {body}");
    }

    let json: serde_json::Value = resp.json().await?;
    extract_anthropic_text(&json)
}

fn extract_anthropic_text(json: &serde_json::Value) -> Result<String> {
    if let Some(content) = json.get("content").and_then(|c| c.as_array()) {
        let text: String = content
            .iter()
            .filter_map(|block| {
                if block.get("type")?.as_str()? == "text" {
                    block.get("text")?.as_str().map(|s| s.to_string())
                } else {
                    None
                }
            })
            .collect::<Vec<_>>()
            .join("");
        if !text.is_empty() {
            return Ok(text);
        }
    }
    bail!("unexpected Anthropic API response format");
}

async fn generate_openai(client: &reqwest::Client, api_key: &str, model: &str, prompt: &str) -> Result<String> {
    debug!("Structuring via OpenAI API with model {model}");

    let body = serde_json::json!({
        "model": model,
        "messages": [
            {
                "role": "user",
                "content": prompt
            }
        ]
    });

    let resp = client
        .post("https://api.openai.com/v1/chat/completions")
        .bearer_auth(api_key)
        .header("Content-Type", "application/json")
        .json(&body)
        .send()
        .await?;

    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        bail!("OpenAI API returned {status}: {body}");
    }

    let json: serde_json::Value = resp.json().await?;
    extract_openai_text(&json)
}

fn extract_openai_text(json: &serde_json::Value) -> Result<String> {
    if let Some(text) = json
        .get("choices")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("message"))
        .and_then(|m| m.get("content"))
        .and_then(|t| t.as_str())
    {
        return Ok(text.to_string());
    }
    bail!("unexpected OpenAI API response format");
}
