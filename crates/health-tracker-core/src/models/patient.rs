//! Patient models.

use serde::{Deserialize, Serialize};

use crate::registry::Entity;

/// A patient record as entered on the patients form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Patient {
    /// Creation timestamp in milliseconds
    pub id: i64,
    pub name: String,
    /// Free text; the form does not validate it as a number
    pub age: String,
    pub disease: String,
}

/// Form fields for a new patient.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatientDraft {
    pub name: String,
    pub age: String,
    pub disease: String,
}

impl PatientDraft {
    pub fn new(name: impl Into<String>, age: impl Into<String>, disease: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            age: age.into(),
            disease: disease.into(),
        }
    }
}

impl Entity for Patient {
    type Draft = PatientDraft;

    fn from_draft(id: i64, draft: PatientDraft) -> Self {
        Self {
            id,
            name: draft.name,
            age: draft.age,
            disease: draft.disease,
        }
    }

    fn id(&self) -> i64 {
        self.id
    }
}
