//! The tracker facade a host UI drives.

use std::sync::Arc;

use thiserror::Error;

use crate::config::{ConfigError, TrackerConfig};
use crate::models::{
    ContactDraft, EmergencyContact, Patient, PatientDraft, Session, User, VitalsReading,
    VitalsSummary,
};
use crate::monitor::{AlertLog, VitalsMonitor};
use crate::registry::{EntityRegistry, RegistryError};
use crate::session::{AuthProvider, MockAuthProvider, SessionError, SessionGate};
use crate::store::{KeyValueStore, StoreError};

/// Tracker errors.
#[derive(Error, Debug)]
pub enum TrackerError {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

pub type TrackerResult<T> = Result<T, TrackerError>;

/// Session, registries, and vitals monitor over one store.
pub struct HealthTracker<A: AuthProvider = MockAuthProvider> {
    config: TrackerConfig,
    session: SessionGate<A>,
    patients: EntityRegistry<Patient>,
    contacts: EntityRegistry<EmergencyContact>,
    monitor: VitalsMonitor,
}

impl HealthTracker<MockAuthProvider> {
    /// Open with default configuration and the mock auth provider.
    pub fn open(store: Arc<dyn KeyValueStore>) -> TrackerResult<Self> {
        Self::with_provider(store, TrackerConfig::default(), MockAuthProvider)
    }
}

impl<A: AuthProvider> HealthTracker<A> {
    /// Open with explicit configuration and auth provider.
    ///
    /// Registries load from `store`; the monitor starts on the sample week.
    pub fn with_provider(
        store: Arc<dyn KeyValueStore>,
        config: TrackerConfig,
        provider: A,
    ) -> TrackerResult<Self> {
        config.validate()?;
        let session = SessionGate::new(provider, store.clone(), &config.keys);
        let patients = EntityRegistry::load(store.clone(), config.keys.patients.clone())?;
        let contacts = EntityRegistry::load(store, config.keys.contacts.clone())?;
        let monitor = VitalsMonitor::new(&config, VitalsReading::sample_week());

        Ok(Self {
            config,
            session,
            patients,
            contacts,
            monitor,
        })
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    // =========================================================================
    // Session
    // =========================================================================

    pub fn login(&self, email: &str, password: &str) -> TrackerResult<Session> {
        Ok(self.session.login(email, password)?)
    }

    pub fn register(&self, name: &str, email: &str, password: &str) -> TrackerResult<Session> {
        Ok(self.session.register(name, email, password)?)
    }

    pub fn logout(&self) -> TrackerResult<()> {
        Ok(self.session.logout()?)
    }

    pub fn current_user(&self) -> Option<User> {
        self.session.current_user()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    // =========================================================================
    // Registries
    // =========================================================================

    pub fn add_patient(&mut self, draft: PatientDraft) -> TrackerResult<Patient> {
        Ok(self.patients.add(draft)?.clone())
    }

    pub fn patients(&self) -> &[Patient] {
        self.patients.items()
    }

    pub fn add_contact(&mut self, draft: ContactDraft) -> TrackerResult<EmergencyContact> {
        Ok(self.contacts.add(draft)?.clone())
    }

    pub fn contacts(&self) -> &[EmergencyContact] {
        self.contacts.items()
    }

    // =========================================================================
    // Monitoring
    // =========================================================================

    /// Move the alert threshold; returns an alert if it triggered.
    pub fn set_threshold(&mut self, threshold: u32) -> Option<String> {
        self.monitor.set_threshold(threshold).map(str::to_string)
    }

    pub fn threshold(&self) -> u32 {
        self.monitor.threshold()
    }

    /// Replace the readings; returns an alert if it triggered.
    pub fn set_readings(&mut self, readings: Vec<VitalsReading>) -> Option<String> {
        self.monitor.set_readings(readings).map(str::to_string)
    }

    pub fn readings(&self) -> &[VitalsReading] {
        self.monitor.readings()
    }

    pub fn current_alert(&self) -> Option<&str> {
        self.monitor.current_alert()
    }

    pub fn alerts(&self) -> &AlertLog {
        self.monitor.alerts()
    }

    pub fn summary(&self) -> VitalsSummary {
        self.monitor.summary()
    }
}
