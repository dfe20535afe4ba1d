//! Profile persistence through the key-value storage collaborator.

use log::{info, warn};

extern crate alloc;
use alloc::vec::Vec;

use thiserror_no_std::Error;

use super::record::{decode_record, encode_record};
use super::PlantProfile;

/// Namespace and key the profile record is stored under.
pub const PROFILE_NAMESPACE: &str = "plant_config";
pub const PROFILE_KEY: &str = "profile";

/// Errors surfaced by the key-value backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum KvError {
    #[error("key not found")]
    NotFound,
    #[error("storage backend failure")]
    Backend,
}

/// Narrow boundary to the persistent key-value collaborator (NVS on the
/// real device). Values are opaque blobs; `commit` makes prior puts
/// durable.
pub trait KvStore {
    fn get(&mut self, namespace: &str, key: &str) -> Result<Vec<u8>, KvError>;
    fn put(&mut self, namespace: &str, key: &str, value: &[u8]) -> Result<(), KvError>;
    fn commit(&mut self) -> Result<(), KvError>;
}

/// Holds the single active profile and mediates its persistence.
///
/// The in-memory profile and the persisted record may diverge: `update`
/// only replaces the active copy, and callers must `save` explicitly to
/// make a change durable.
pub struct ProfileStore<K: KvStore> {
    kv: K,
    active: PlantProfile,
}

impl<K: KvStore> ProfileStore<K> {
    pub fn new(kv: K) -> Self {
        Self {
            kv,
            active: PlantProfile::default(),
        }
    }

    /// Loads the persisted profile into the active slot.
    ///
    /// Never fails the caller: a missing, unreadable or malformed record
    /// falls back to the hard-coded default profile, which is then
    /// persisted best-effort so the next boot finds a valid record.
    pub fn load(&mut self) {
        match self.kv.get(PROFILE_NAMESPACE, PROFILE_KEY) {
            Ok(bytes) => match decode_record(&bytes) {
                Ok(profile) => {
                    info!(
                        "loaded plant profile: {} (dry >= {:.0} mV, wet <= {:.0} mV, watering after {} dry days)",
                        profile.plant_name,
                        profile.soil_dry_threshold_mv,
                        profile.soil_wet_threshold_mv,
                        profile.soil_dry_days_for_watering
                    );
                    self.active = profile;
                    return;
                }
                Err(err) => warn!("stored profile rejected ({}), using defaults", err),
            },
            Err(KvError::NotFound) => warn!("no stored profile, using defaults"),
            Err(err) => warn!("profile read failed ({}), using defaults", err),
        }

        self.active = PlantProfile::default();
        if let Err(err) = self.persist() {
            warn!("could not persist default profile ({}), continuing anyway", err);
        }
    }

    /// Persists the active profile as one record and commits.
    pub fn save(&mut self) -> Result<(), KvError> {
        self.persist()
    }

    /// Replaces the active profile in memory only.
    pub fn update(&mut self, profile: PlantProfile) {
        info!("active profile replaced: {}", profile.plant_name);
        self.active = profile;
    }

    pub fn active(&self) -> &PlantProfile {
        &self.active
    }

    fn persist(&mut self) -> Result<(), KvError> {
        let record = encode_record(&self.active);
        self.kv.put(PROFILE_NAMESPACE, PROFILE_KEY, &record)?;
        self.kv.commit()?;
        info!("plant profile saved: {}", self.active.plant_name);
        Ok(())
    }
}
