use std::collections::BTreeMap;

use tracing::info;
use trip_domain::Trip;
use uuid::Uuid;

use crate::{CoreError, CoreResult};

/// Read contract for whatever supplies trip snapshots.
///
/// Implementations must hand out a consistent snapshot per call; the
/// settlement engine never learns which provider supplied it.
pub trait LedgerDataProvider: Send + Sync {
    /// Loads a trip by id or by name.
    fn load_trip(&self, key: &str) -> CoreResult<Trip>;
    /// Lists the keys accepted by [`LedgerDataProvider::load_trip`].
    fn list_trips(&self) -> CoreResult<Vec<String>>;
}

/// In-memory snapshots, used for explore mode and tests.
#[derive(Debug, Clone, Default)]
pub struct LocalSnapshotProvider {
    trips: BTreeMap<Uuid, Trip>,
}

impl LocalSnapshotProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_trips(trips: impl IntoIterator<Item = Trip>) -> Self {
        let mut provider = Self::new();
        for trip in trips {
            provider.insert(trip);
        }
        provider
    }

    /// Stores or replaces the snapshot for `trip.id`.
    pub fn insert(&mut self, trip: Trip) {
        info!(trip = %trip.id, name = %trip.name, "snapshot stored");
        self.trips.insert(trip.id, trip);
    }

    pub fn remove(&mut self, id: Uuid) -> Option<Trip> {
        self.trips.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.trips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }
}

impl LedgerDataProvider for LocalSnapshotProvider {
    fn load_trip(&self, key: &str) -> CoreResult<Trip> {
        let needle = key.trim();
        if let Ok(id) = Uuid::parse_str(needle) {
            if let Some(trip) = self.trips.get(&id) {
                return Ok(trip.clone());
            }
        }
        self.trips
            .values()
            .find(|trip| trip.name.eq_ignore_ascii_case(needle))
            .cloned()
            .ok_or_else(|| CoreError::TripNotFound(needle.to_string()))
    }

    fn list_trips(&self) -> CoreResult<Vec<String>> {
        Ok(self.trips.values().map(|trip| trip.name.clone()).collect())
    }
}
