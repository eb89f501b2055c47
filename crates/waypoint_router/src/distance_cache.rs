use fxhash::FxHashMap;
use parking_lot::Mutex;

/// Road distances (km) from the user to places, keyed by place id.
///
/// Entries live for the whole session and are never evicted. A value may be
/// stale once the user has moved, callers accept that and fall back to a
/// straight line estimate on a miss.
#[derive(Default)]
pub struct DistanceCache {
    entries: Mutex<FxHashMap<String, f64>>,
}

impl DistanceCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, place_id: &str) -> Option<f64> {
        self.entries.lock().get(place_id).copied()
    }

    /// Last write wins.
    pub fn put(&self, place_id: impl Into<String>, distance_km: f64) {
        self.entries.lock().insert(place_id.into(), distance_km);
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}
