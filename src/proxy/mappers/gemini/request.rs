// Inbound body parsing and generateContent payload building
use serde_json::{json, Map, Value};

use crate::error::{AppError, AppResult};

/// Validated inbound prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptRequest {
    pub prompt: String,
    pub system_instruction: Option<String>,
}

/// Parse the raw body, anything that is not a JSON object becomes `{}`
pub fn parse_body(raw: &[u8]) -> Value {
    match serde_json::from_slice::<Value>(raw) {
        Ok(Value::Object(obj)) => Value::Object(obj),
        Ok(_) | Err(_) => Value::Object(Map::new()),
    }
}

fn non_empty_str<'a>(body: &'a Value, field: &str) -> Option<&'a str> {
    body.get(field)
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
}

impl PromptRequest {
    /// Pull `prompt` and `systemInstruction` out of a parsed body
    pub fn from_body(body: &Value) -> AppResult<Self> {
        let prompt = non_empty_str(body, "prompt").ok_or(AppError::MissingPrompt)?;
        let system_instruction = non_empty_str(body, "systemInstruction").map(str::to_string);

        Ok(Self {
            prompt: prompt.to_string(),
            system_instruction,
        })
    }
}

/// Build the generateContent payload
pub fn build_payload(request: &PromptRequest) -> Value {
    let mut payload = json!({
        "contents": [{ "parts": [{ "text": request.prompt }] }]
    });

    if let Some(instruction) = &request.system_instruction {
        if let Some(obj) = payload.as_object_mut() {
            obj.insert(
                "systemInstruction".to_string(),
                json!({ "parts": [{ "text": instruction }] }),
            );
        }
    }

    payload
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_body_degrades_to_empty_object() {
        assert_eq!(parse_body(b""), json!({}));
        assert_eq!(parse_body(b"{not json"), json!({}));
        assert_eq!(parse_body(b"null"), json!({}));
        assert_eq!(parse_body(b"[1,2]"), json!({}));
        assert_eq!(parse_body(br#"{"prompt":"hi"}"#), json!({"prompt": "hi"}));
    }

    #[test]
    fn test_missing_prompt_variants() {
        for body in [
            json!({}),
            json!({"prompt": ""}),
            json!({"prompt": null}),
            json!({"prompt": 42}),
            json!({"systemInstruction": "be brief"}),
        ] {
            assert!(matches!(
                PromptRequest::from_body(&body),
                Err(AppError::MissingPrompt)
            ));
        }
    }

    #[test]
    fn test_payload_with_system_instruction() {
        let request = PromptRequest::from_body(&json!({
            "prompt": "Hi",
            "systemInstruction": "Answer in French"
        }))
        .unwrap();

        assert_eq!(
            build_payload(&request),
            json!({
                "contents": [{"parts": [{"text": "Hi"}]}],
                "systemInstruction": {"parts": [{"text": "Answer in French"}]}
            })
        );
    }

    #[test]
    fn test_payload_without_system_instruction() {
        for body in [
            json!({"prompt": "Hi"}),
            json!({"prompt": "Hi", "systemInstruction": ""}),
            json!({"prompt": "Hi", "systemInstruction": null}),
        ] {
            let payload = build_payload(&PromptRequest::from_body(&body).unwrap());
            assert!(payload.get("systemInstruction").is_none());
            assert_eq!(payload["contents"][0]["parts"][0]["text"], "Hi");
        }
    }
}
