//! Participant identity generation
//!
//! Ids are a hex wall-clock component followed by a hex random component.
//! They are only practically unique among sessions created on the same
//! client; nothing checks them against a registry.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::Rng;

use crate::types::ParticipantId;

/// Source of participant identifiers
pub trait IdentityGenerator {
    /// Produce a fresh identifier
    fn generate(&self) -> ParticipantId;
}

/// Default generator: milliseconds since the epoch + random `u32`, both hex
#[derive(Debug, Default, Clone, Copy)]
pub struct ClockRandomGenerator;

impl IdentityGenerator for ClockRandomGenerator {
    fn generate(&self) -> ParticipantId {
        // A clock set before 1970 just loses the time component.
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or_default();
        let salt: u32 = rand::thread_rng().gen();
        ParticipantId::new(format!("{:x}{:x}", millis, salt))
    }
}
