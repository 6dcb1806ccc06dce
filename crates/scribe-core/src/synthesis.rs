//! Prompt construction for note synthesis.

use serde::{Deserialize, Serialize};

use crate::release::ReleaseRecord;

/// The fixed system instruction directing the rewrite.
pub const SYSTEM_INSTRUCTIONS: &str =
    "Your task is to rewrite release notes in a more concise manner, \
     no need to mention specific commits. \
     Group things by features / bug fixes / refactors / chores /etc as appropriate. \
     Try to focus on the most important changes. \
     Try to use emojis on feature / bug fixes / refactor/ chores / etc.\
     Try to mention collaborators as well.\
     Return it in markdown format.";

/// Speaker role in a chat exchange.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
}

/// One turn of a chat exchange.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

/// Immutable two-turn prompt for rewriting one release's notes.
///
/// The user turn carries the release body coerced to text: an absent body
/// becomes the literal string `"null"`. That coercion is a preserved
/// behavior of the pipeline's contract, not an accident of serialization.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisRequest {
    system: String,
    user: String,
}

impl SynthesisRequest {
    /// Build the prompt pair for a release.
    pub fn for_release(release: &ReleaseRecord) -> Self {
        SynthesisRequest {
            system: SYSTEM_INSTRUCTIONS.to_string(),
            user: release.body.clone().unwrap_or_else(|| "null".to_string()),
        }
    }

    /// System-turn content.
    pub fn system(&self) -> &str {
        &self.system
    }

    /// User-turn content.
    pub fn user(&self) -> &str {
        &self.user
    }

    /// The exchange as an ordered message list (system first).
    pub fn messages(&self) -> Vec<ChatMessage> {
        vec![
            ChatMessage {
                role: ChatRole::System,
                content: self.system.clone(),
            },
            ChatMessage {
                role: ChatRole::User,
                content: self.user.clone(),
            },
        ]
    }
}

/// The generated replacement body. Treated as opaque markdown: no
/// structural validation is imposed on its content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynthesisResult {
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_turn_is_literal_body() {
        let release = ReleaseRecord::new(1, "v2.0").with_body("Fixed bug X. Added feature Y.");
        let request = SynthesisRequest::for_release(&release);
        assert_eq!(request.user(), "Fixed bug X. Added feature Y.");
        assert_eq!(request.system(), SYSTEM_INSTRUCTIONS);
    }

    #[test]
    fn test_absent_body_becomes_literal_null() {
        let release = ReleaseRecord::new(1, "v2.0");
        let request = SynthesisRequest::for_release(&release);
        assert_eq!(request.user(), "null");
    }

    #[test]
    fn test_messages_order_and_roles() {
        let release = ReleaseRecord::new(1, "v2.0").with_body("notes");
        let messages = SynthesisRequest::for_release(&release).messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, ChatRole::System);
        assert_eq!(messages[1].role, ChatRole::User);
        assert_eq!(messages[1].content, "notes");
    }

    #[test]
    fn test_chat_role_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&ChatRole::System).expect("serialize"),
            "\"system\""
        );
        assert_eq!(
            serde_json::to_string(&ChatRole::User).expect("serialize"),
            "\"user\""
        );
    }

    #[test]
    fn test_system_instructions_cover_directives() {
        assert!(SYSTEM_INSTRUCTIONS.contains("concise"));
        assert!(SYSTEM_INSTRUCTIONS.contains("features / bug fixes"));
        assert!(SYSTEM_INSTRUCTIONS.contains("emojis"));
        assert!(SYSTEM_INSTRUCTIONS.contains("collaborators"));
        assert!(SYSTEM_INSTRUCTIONS.contains("markdown"));
    }
}
