//! Customer Queue Model

use serde::{Deserialize, Serialize};

/// One waiting customer. Queue position is the position in the fetched
/// list (head first); names need not be unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Customer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            note: None,
        }
    }

    pub fn with_note(name: impl Into<String>, note: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            note: Some(note.into()),
        }
    }
}
