//! # Participant Store
//!
//! Typed view of the participant-address → Participant logical store.
//!
//! Key layout: `b'p' ‖ address(20)`.

use crate::domain::Participant;
use shared_types::entities::Address;
use shared_types::errors::StorageError;
use shared_types::storage::{decode, encode, KeyValueStore};

const PARTICIPANT_PREFIX: u8 = b'p';

fn participant_key(address: &Address) -> Vec<u8> {
    let mut key = Vec::with_capacity(1 + address.len());
    key.push(PARTICIPANT_PREFIX);
    key.extend_from_slice(address);
    key
}

/// Participant records over any `KeyValueStore`.
pub struct ParticipantStore<S: KeyValueStore> {
    kv: S,
}

impl<S: KeyValueStore> ParticipantStore<S> {
    /// Wraps `kv`.
    pub fn new(kv: S) -> Self {
        Self { kv }
    }

    /// Loads the record for `address`, if any.
    pub fn get(&self, address: &Address) -> Result<Option<Participant>, StorageError> {
        match self.kv.get(&participant_key(address))? {
            Some(bytes) => decode(&bytes).map(Some),
            None => Ok(None),
        }
    }

    /// Writes (creates or replaces) a record.
    pub fn put(&mut self, participant: &Participant) -> Result<(), StorageError> {
        let value = encode(participant)?;
        self.kv.put(&participant_key(&participant.address), &value)
    }

    /// Number of stored records.
    pub fn count(&self) -> Result<u64, StorageError> {
        Ok(self.kv.prefix_scan(&[PARTICIPANT_PREFIX])?.len() as u64)
    }

    /// Returns the wrapped store.
    pub fn into_inner(self) -> S {
        self.kv
    }
}
