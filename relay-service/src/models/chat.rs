use serde::{Deserialize, Deserializer, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Speaker of a chat turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::System => "system",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One role-tagged message of the conversation.
///
/// `content` is kept as raw JSON since callers are not strict about sending
/// strings; it is coerced to text when the prompt is rendered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: Role,
    pub content: serde_json::Value,
}

impl ChatTurn {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: serde_json::Value::String(content.into()),
        }
    }

    /// Content as prompt text: strings verbatim, anything else as compact JSON.
    pub fn content_text(&self) -> Cow<'_, str> {
        match &self.content {
            serde_json::Value::String(s) => Cow::Borrowed(s),
            other => Cow::Owned(other.to_string()),
        }
    }

    /// `"<role>: <content>"`
    pub fn render(&self) -> String {
        format!("{}: {}", self.role, self.content_text())
    }
}

/// Body of `POST /api/generateResponse`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayRequest {
    pub message: String,
    pub chat_history: Vec<ChatTurn>,
    #[serde(default, deserialize_with = "null_as_false")]
    pub is_voice_mode: bool,
}

/// An explicit `null` flag reads as unset.
fn null_as_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelayResponse {
    pub text: String,
}

/// Failure payload. `text` is always safe to show to the end user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelayErrorBody {
    pub error: String,
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_uses_camel_case_fields() {
        let request: RelayRequest = serde_json::from_value(json!({
            "message": "hi",
            "chatHistory": [{ "role": "assistant", "content": "hello" }],
            "isVoiceMode": true
        }))
        .unwrap();

        assert_eq!(request.message, "hi");
        assert_eq!(request.chat_history.len(), 1);
        assert_eq!(request.chat_history[0].role, Role::Assistant);
        assert!(request.is_voice_mode);
    }

    #[test]
    fn voice_mode_defaults_to_false() {
        let request: RelayRequest =
            serde_json::from_value(json!({ "message": "hi", "chatHistory": [] })).unwrap();
        assert!(!request.is_voice_mode);
    }

    #[test]
    fn null_voice_mode_reads_as_false() {
        let request: RelayRequest = serde_json::from_value(json!({
            "message": "hi",
            "chatHistory": [],
            "isVoiceMode": null
        }))
        .unwrap();
        assert!(!request.is_voice_mode);
    }

    #[test]
    fn missing_history_is_rejected() {
        let result = serde_json::from_value::<RelayRequest>(json!({ "message": "hi" }));
        assert!(result.is_err());
    }

    #[test]
    fn unknown_role_is_rejected() {
        let result = serde_json::from_value::<ChatTurn>(json!({ "role": "tool", "content": "x" }));
        assert!(result.is_err());
    }

    #[test]
    fn non_string_content_is_coerced() {
        let number = ChatTurn {
            role: Role::User,
            content: json!(42),
        };
        let flag = ChatTurn {
            role: Role::Assistant,
            content: json!(true),
        };

        assert_eq!(number.render(), "user: 42");
        assert_eq!(flag.render(), "assistant: true");
    }

    #[test]
    fn string_content_is_not_quoted() {
        let turn = ChatTurn::new(Role::System, "be nice");
        assert_eq!(turn.render(), "system: be nice");
    }
}
