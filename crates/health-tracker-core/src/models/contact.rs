//! Emergency contact models.

use serde::{Deserialize, Serialize};

use crate::registry::Entity;

/// Someone to reach in an emergency.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmergencyContact {
    pub id: i64,
    pub name: String,
    pub phone: String,
    /// e.g. "spouse", "parent", "neighbour"
    pub relationship: String,
}

/// Form fields for a new emergency contact.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactDraft {
    pub name: String,
    pub phone: String,
    pub relationship: String,
}

impl ContactDraft {
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        relationship: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            relationship: relationship.into(),
        }
    }
}

impl Entity for EmergencyContact {
    type Draft = ContactDraft;

    fn from_draft(id: i64, draft: ContactDraft) -> Self {
        Self {
            id,
            name: draft.name,
            phone: draft.phone,
            relationship: draft.relationship,
        }
    }

    fn id(&self) -> i64 {
        self.id
    }
}
