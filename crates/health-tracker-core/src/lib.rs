//! Health Tracker Core Library
//!
//! Local-first core for a consumer health-tracking app: mock sign-in, a
//! vitals dashboard with a heart-rate alert banner, and append-only lists of
//! patients and emergency contacts.
//!
//! # Architecture
//!
//! ```text
//!   Host UI events (clicks, form submits, slider drags)
//!                         │
//!                 ┌───────▼────────┐
//!                 │  HealthTracker │
//!                 └───┬────┬────┬──┘
//!                     │    │    │
//!        ┌────────────┘    │    └─────────────┐
//!        ▼                 ▼                  ▼
//!   SessionGate     EntityRegistry<T>    VitalsMonitor
//!   (AuthProvider)  patients / contacts  threshold → AlertLog
//!        │                 │
//!        └────────┬────────┘
//!                 ▼
//!           KeyValueStore
//!     (MemoryStore | SQLite Database)
//! ```
//!
//! # Core Principle
//!
//! **Sign-in here is a placeholder.** [`MockAuthProvider`] decides whether the
//! demo lets someone through; it is not a security control.
//!
//! # Modules
//!
//! - [`config`]: Threshold range, alert capacity, storage keys
//! - [`db`]: SQLite key-value backing
//! - [`models`]: Domain types (User, Patient, EmergencyContact, VitalsReading)
//! - [`monitor`]: Heart-rate threshold check and rolling alert log
//! - [`registry`]: Append-only persisted entity lists
//! - [`session`]: Session gate and auth providers
//! - [`store`]: The persistence port
//! - [`tracker`]: Facade composing all of the above

pub mod config;
pub mod db;
pub mod models;
pub mod monitor;
pub mod registry;
pub mod session;
pub mod store;
pub mod tracker;

// Re-export commonly used types
pub use config::TrackerConfig;
pub use db::Database;
pub use models::{
    ContactDraft, EmergencyContact, Patient, PatientDraft, Session, User, VitalsReading,
    VitalsSummary,
};
pub use monitor::{evaluate, AlertLog, VitalsMonitor};
pub use registry::{Entity, EntityRegistry};
pub use session::{AuthProvider, MockAuthProvider, SessionGate};
pub use store::{KeyValueStore, MemoryStore};
pub use tracker::{HealthTracker, TrackerError};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::{Arc, Mutex};

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum HealthTrackerError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<TrackerError> for HealthTrackerError {
    fn from(e: TrackerError) -> Self {
        match e {
            TrackerError::Session(session::SessionError::InvalidCredentials) => {
                HealthTrackerError::InvalidCredentials
            }
            TrackerError::Session(session::SessionError::Json(e))
            | TrackerError::Registry(registry::RegistryError::Json(e)) => {
                HealthTrackerError::SerializationError(e.to_string())
            }
            TrackerError::Config(e) => HealthTrackerError::ConfigError(e.to_string()),
            other => HealthTrackerError::StorageError(other.to_string()),
        }
    }
}

impl From<db::DbError> for HealthTrackerError {
    fn from(e: db::DbError) -> Self {
        HealthTrackerError::StorageError(e.to_string())
    }
}

impl From<config::ConfigError> for HealthTrackerError {
    fn from(e: config::ConfigError) -> Self {
        HealthTrackerError::ConfigError(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for HealthTrackerError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        HealthTrackerError::StorageError(format!("Lock poisoned: {}", e))
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Open or create a tracker backed by the SQLite database at `path`.
#[uniffi::export]
pub fn open_tracker(path: String) -> Result<Arc<HealthTrackerCore>, HealthTrackerError> {
    let db = Database::open(&path)?;
    HealthTrackerCore::build(Arc::new(db), TrackerConfig::default())
}

/// Open a tracker at `path` with a JSON configuration.
#[uniffi::export]
pub fn open_tracker_with_config(
    path: String,
    config_json: String,
) -> Result<Arc<HealthTrackerCore>, HealthTrackerError> {
    let config = TrackerConfig::from_json(&config_json)?;
    let db = Database::open(&path)?;
    HealthTrackerCore::build(Arc::new(db), config)
}

/// Create an in-memory tracker (for testing).
#[uniffi::export]
pub fn open_tracker_in_memory() -> Result<Arc<HealthTrackerCore>, HealthTrackerError> {
    let db = Database::open_in_memory()?;
    HealthTrackerCore::build(Arc::new(db), TrackerConfig::default())
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe tracker wrapper for FFI.
#[derive(uniffi::Object)]
pub struct HealthTrackerCore {
    tracker: Mutex<HealthTracker>,
}

impl HealthTrackerCore {
    fn build(
        store: Arc<dyn KeyValueStore>,
        config: TrackerConfig,
    ) -> Result<Arc<Self>, HealthTrackerError> {
        let tracker = HealthTracker::with_provider(store, config, MockAuthProvider)?;
        Ok(Arc::new(Self {
            tracker: Mutex::new(tracker),
        }))
    }
}

#[uniffi::export]
impl HealthTrackerCore {
    // =========================================================================
    // Session Operations
    // =========================================================================

    /// Sign in with the mock credential check.
    pub fn login(&self, email: String, password: String) -> Result<FfiSession, HealthTrackerError> {
        let tracker = self.tracker.lock()?;
        Ok(tracker.login(&email, &password)?.into())
    }

    /// Register and sign in.
    pub fn register(
        &self,
        name: String,
        email: String,
        password: String,
    ) -> Result<FfiSession, HealthTrackerError> {
        let tracker = self.tracker.lock()?;
        Ok(tracker.register(&name, &email, &password)?.into())
    }

    /// Clear the persisted session.
    pub fn logout(&self) -> Result<(), HealthTrackerError> {
        let tracker = self.tracker.lock()?;
        tracker.logout()?;
        Ok(())
    }

    /// The signed-in user, if any.
    pub fn current_user(&self) -> Result<Option<FfiUser>, HealthTrackerError> {
        let tracker = self.tracker.lock()?;
        Ok(tracker.current_user().map(|u| u.into()))
    }

    pub fn is_authenticated(&self) -> Result<bool, HealthTrackerError> {
        let tracker = self.tracker.lock()?;
        Ok(tracker.is_authenticated())
    }

    // =========================================================================
    // Patient / Contact Operations
    // =========================================================================

    /// Append a patient.
    pub fn add_patient(
        &self,
        name: String,
        age: String,
        disease: String,
    ) -> Result<FfiPatient, HealthTrackerError> {
        let mut tracker = self.tracker.lock()?;
        let patient = tracker.add_patient(PatientDraft { name, age, disease })?;
        Ok(patient.into())
    }

    /// All patients in insertion order.
    pub fn list_patients(&self) -> Result<Vec<FfiPatient>, HealthTrackerError> {
        let tracker = self.tracker.lock()?;
        Ok(tracker.patients().iter().cloned().map(|p| p.into()).collect())
    }

    /// Append an emergency contact.
    pub fn add_contact(
        &self,
        name: String,
        phone: String,
        relationship: String,
    ) -> Result<FfiContact, HealthTrackerError> {
        let mut tracker = self.tracker.lock()?;
        let contact = tracker.add_contact(ContactDraft {
            name,
            phone,
            relationship,
        })?;
        Ok(contact.into())
    }

    /// All emergency contacts in insertion order.
    pub fn list_contacts(&self) -> Result<Vec<FfiContact>, HealthTrackerError> {
        let tracker = self.tracker.lock()?;
        Ok(tracker.contacts().iter().cloned().map(|c| c.into()).collect())
    }

    // =========================================================================
    // Monitoring Operations
    // =========================================================================

    /// Move the alert threshold. Returns the alert if one triggered.
    pub fn set_threshold(&self, threshold: u32) -> Result<Option<String>, HealthTrackerError> {
        let mut tracker = self.tracker.lock()?;
        Ok(tracker.set_threshold(threshold))
    }

    pub fn threshold(&self) -> Result<u32, HealthTrackerError> {
        let tracker = self.tracker.lock()?;
        Ok(tracker.threshold())
    }

    /// Replace the dashboard readings. Returns the alert if one triggered.
    pub fn set_readings(
        &self,
        readings: Vec<FfiVitalsReading>,
    ) -> Result<Option<String>, HealthTrackerError> {
        let mut tracker = self.tracker.lock()?;
        Ok(tracker.set_readings(readings.into_iter().map(|r| r.into()).collect()))
    }

    pub fn readings(&self) -> Result<Vec<FfiVitalsReading>, HealthTrackerError> {
        let tracker = self.tracker.lock()?;
        Ok(tracker.readings().iter().cloned().map(|r| r.into()).collect())
    }

    /// Banner text: the most recent alert.
    pub fn current_alert(&self) -> Result<Option<String>, HealthTrackerError> {
        let tracker = self.tracker.lock()?;
        Ok(tracker.current_alert().map(str::to_string))
    }

    /// Rolling alert log, most recent first.
    pub fn alerts(&self) -> Result<Vec<String>, HealthTrackerError> {
        let tracker = self.tracker.lock()?;
        Ok(tracker.alerts().to_vec())
    }

    /// Dashboard aggregates over the current readings.
    pub fn summary(&self) -> Result<FfiVitalsSummary, HealthTrackerError> {
        let tracker = self.tracker.lock()?;
        Ok(tracker.summary().into())
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe user.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiUser {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl From<User> for FfiUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

/// FFI-safe session.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiSession {
    pub token: String,
    pub user: FfiUser,
}

impl From<Session> for FfiSession {
    fn from(session: Session) -> Self {
        Self {
            token: session.token,
            user: session.user.into(),
        }
    }
}

/// FFI-safe patient.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPatient {
    pub id: i64,
    pub name: String,
    pub age: String,
    pub disease: String,
}

impl From<Patient> for FfiPatient {
    fn from(patient: Patient) -> Self {
        Self {
            id: patient.id,
            name: patient.name,
            age: patient.age,
            disease: patient.disease,
        }
    }
}

/// FFI-safe emergency contact.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiContact {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub relationship: String,
}

impl From<EmergencyContact> for FfiContact {
    fn from(contact: EmergencyContact) -> Self {
        Self {
            id: contact.id,
            name: contact.name,
            phone: contact.phone,
            relationship: contact.relationship,
        }
    }
}

/// FFI-safe vitals reading.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiVitalsReading {
    pub time: String,
    pub heart_rate: u32,
    pub blood_pressure: u32,
    pub steps: u32,
}

impl From<VitalsReading> for FfiVitalsReading {
    fn from(reading: VitalsReading) -> Self {
        Self {
            time: reading.time,
            heart_rate: reading.heart_rate,
            blood_pressure: reading.blood_pressure,
            steps: reading.steps,
        }
    }
}

impl From<FfiVitalsReading> for VitalsReading {
    fn from(reading: FfiVitalsReading) -> Self {
        VitalsReading {
            time: reading.time,
            heart_rate: reading.heart_rate,
            blood_pressure: reading.blood_pressure,
            steps: reading.steps,
        }
    }
}

/// FFI-safe dashboard summary.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiVitalsSummary {
    pub reading_count: u64,
    pub avg_heart_rate: Option<f64>,
    pub min_heart_rate: Option<u32>,
    pub max_heart_rate: Option<u32>,
    pub avg_blood_pressure: Option<f64>,
    pub total_steps: u64,
    pub latest: Option<FfiVitalsReading>,
}

impl From<VitalsSummary> for FfiVitalsSummary {
    fn from(summary: VitalsSummary) -> Self {
        Self {
            reading_count: u64::try_from(summary.reading_count).unwrap_or(u64::MAX),
            avg_heart_rate: summary.avg_heart_rate,
            min_heart_rate: summary.min_heart_rate,
            max_heart_rate: summary.max_heart_rate,
            avg_blood_pressure: summary.avg_blood_pressure,
            total_steps: summary.total_steps,
            latest: summary.latest.map(|r| r.into()),
        }
    }
}
