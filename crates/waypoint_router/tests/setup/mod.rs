#![allow(dead_code)]

use std::{future::Future, sync::Arc, time::Duration};

use parking_lot::Mutex;
use waypoint_client::ClientError;
use waypoint_core::{Coordinate, Place, RouteGeometry};
use waypoint_router::LegProvider;

#[derive(Clone)]
pub enum LegScript {
    Route {
        geometry: RouteGeometry,
        delay: Duration,
    },
    Fail {
        delay: Duration,
    },
    Distance {
        km: f64,
        delay: Duration,
    },
}

impl LegScript {
    pub fn route(points: &[(f64, f64)], delay_ms: u64) -> Self {
        LegScript::Route {
            geometry: geometry(points),
            delay: Duration::from_millis(delay_ms),
        }
    }

    pub fn fail(delay_ms: u64) -> Self {
        LegScript::Fail {
            delay: Duration::from_millis(delay_ms),
        }
    }

    pub fn distance(km: f64, delay_ms: u64) -> Self {
        LegScript::Distance {
            km,
            delay: Duration::from_millis(delay_ms),
        }
    }

    fn delay(&self) -> Duration {
        match self {
            LegScript::Route { delay, .. }
            | LegScript::Fail { delay }
            | LegScript::Distance { delay, .. } => *delay,
        }
    }
}

/// Answers legs from a script keyed by (from, to), records every call and
/// the order in which responses complete.
#[derive(Default)]
pub struct ScriptedProvider {
    scripts: Mutex<Vec<(Coordinate, Coordinate, LegScript)>>,
    pub calls: Mutex<Vec<(Coordinate, Coordinate)>>,
    pub completions: Arc<Mutex<Vec<(Coordinate, Coordinate)>>>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script(self, from: Coordinate, to: Coordinate, script: LegScript) -> Self {
        self.scripts.lock().push((from, to, script));
        self
    }

    pub fn set_script(&self, from: Coordinate, to: Coordinate, script: LegScript) {
        let mut scripts = self.scripts.lock();
        scripts.retain(|(f, t, _)| !(*f == from && *t == to));
        scripts.push((from, to, script));
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    fn lookup(&self, from: Coordinate, to: Coordinate) -> Option<LegScript> {
        self.calls.lock().push((from, to));
        self.scripts
            .lock()
            .iter()
            .find(|(f, t, _)| *f == from && *t == to)
            .map(|(_, _, script)| script.clone())
    }

    fn unscripted() -> ClientError {
        ClientError::Api {
            status: 404,
            message: "no script for leg".to_string(),
        }
    }

    fn unavailable() -> ClientError {
        ClientError::Api {
            status: 503,
            message: "routing backend unavailable".to_string(),
        }
    }
}

impl LegProvider for ScriptedProvider {
    fn fetch_leg(
        &self,
        from: Coordinate,
        to: Coordinate,
    ) -> impl Future<Output = Result<RouteGeometry, ClientError>> + Send {
        let script = self.lookup(from, to);
        let completions = Arc::clone(&self.completions);

        async move {
            let Some(script) = script else {
                return Err(Self::unscripted());
            };

            tokio::time::sleep(script.delay()).await;
            completions.lock().push((from, to));

            match script {
                LegScript::Route { geometry, .. } => Ok(geometry),
                LegScript::Fail { .. } | LegScript::Distance { .. } => Err(Self::unavailable()),
            }
        }
    }

    fn fetch_distance(
        &self,
        from: Coordinate,
        to: Coordinate,
    ) -> impl Future<Output = Result<f64, ClientError>> + Send {
        let script = self.lookup(from, to);
        let completions = Arc::clone(&self.completions);

        async move {
            let Some(script) = script else {
                return Err(Self::unscripted());
            };

            tokio::time::sleep(script.delay()).await;
            completions.lock().push((from, to));

            match script {
                LegScript::Distance { km, .. } => Ok(km),
                LegScript::Route { .. } | LegScript::Fail { .. } => Err(Self::unavailable()),
            }
        }
    }
}

pub fn geometry(points: &[(f64, f64)]) -> RouteGeometry {
    points
        .iter()
        .map(|&(lat, lng)| Coordinate::new(lat, lng))
        .collect::<Vec<_>>()
        .into()
}

pub fn place(id: &str, lat: f64, lng: f64) -> Place {
    Place::new(id, id.to_uppercase(), Coordinate::new(lat, lng))
}
