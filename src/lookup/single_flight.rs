//! Single-flight coordination
//!
//! At most one provider fetch per cache key is in flight; concurrent
//! lookups of the same key subscribe to the leader's outcome instead of
//! calling the provider themselves.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::broadcast;

use crate::cache::CacheKey;
use crate::error::ProviderError;
use crate::models::MovieRecord;

/// Result shared between the leader and its followers.
pub type Outcome = Result<Option<MovieRecord>, ProviderError>;

/// Registry of in-flight fetches keyed by cache key.
#[derive(Debug, Default)]
pub struct SingleFlight {
    in_flight: Mutex<HashMap<CacheKey, broadcast::Sender<Outcome>>>,
}

/// Role assigned to a caller by [`SingleFlight::join`].
pub enum Flight<'a> {
    /// This caller performs the fetch and must publish through the guard.
    Leader(FlightGuard<'a>),
    /// Another caller is already fetching; await its outcome here.
    Follower(broadcast::Receiver<Outcome>),
}

impl SingleFlight {
    pub fn new() -> Self {
        Self::default()
    }

    fn slots(&self) -> MutexGuard<'_, HashMap<CacheKey, broadcast::Sender<Outcome>>> {
        // The map stays consistent even if a holder panicked mid-operation.
        self.in_flight.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Claims the fetch for `key`, or subscribes to the fetch already running.
    pub fn join(&self, key: &CacheKey) -> Flight<'_> {
        let mut slots = self.slots();
        if let Some(sender) = slots.get(key) {
            return Flight::Follower(sender.subscribe());
        }

        let (sender, _) = broadcast::channel(1);
        slots.insert(key.clone(), sender);
        Flight::Leader(FlightGuard {
            flights: self,
            key: key.clone(),
            completed: false,
        })
    }

    /// Number of keys currently being fetched.
    #[cfg(test)]
    pub fn in_flight(&self) -> usize {
        self.slots().len()
    }
}

/// Leadership over one key's fetch.
///
/// Dropping the guard without calling [`FlightGuard::complete`] (e.g. when
/// the leading request is cancelled) frees the slot and closes the channel,
/// so waiting followers retry instead of hanging.
pub struct FlightGuard<'a> {
    flights: &'a SingleFlight,
    key: CacheKey,
    completed: bool,
}

impl FlightGuard<'_> {
    /// Publishes `outcome` to every follower and frees the slot.
    pub fn complete(mut self, outcome: &Outcome) {
        self.completed = true;
        let sender = self.flights.slots().remove(&self.key);
        if let Some(sender) = sender {
            // No receivers is fine: nobody was waiting.
            let _ = sender.send(outcome.clone());
        }
    }
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        if !self.completed {
            self.flights.slots().remove(&self.key);
        }
    }
}
