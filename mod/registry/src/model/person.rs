use serde::{Deserialize, Serialize};

/// A person record. The identifier is store-assigned and immutable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Person {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub ip_address: String,
}

/// Input for creating or replacing a person. All four fields are
/// required to be non-empty on create.
#[derive(Debug, Clone, Deserialize)]
pub struct PersonDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub ip_address: String,
}
