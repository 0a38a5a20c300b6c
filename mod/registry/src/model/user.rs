use serde::{Deserialize, Serialize};

/// A login account record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: String,
}

/// Input for creating or replacing a user.
///
/// On update, an empty `password` means "leave the stored password
/// unchanged" — the one exception to full-field-replace semantics.
#[derive(Debug, Clone, Deserialize)]
pub struct UserDraft {
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub role: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_defaults_optional_fields() {
        let draft: UserDraft = serde_json::from_str(r#"{"username": "eve"}"#).unwrap();
        assert_eq!(draft.username, "eve");
        assert!(draft.email.is_empty());
        assert!(draft.password.is_empty());
        assert!(draft.role.is_empty());
    }
}
