use serde::Serialize;
use thiserror::Error;
use waypoint_client::ClientError;
use waypoint_core::{BoundsError, Coordinate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LegFailureKind {
    Network,
    Timeout,
    Parse,
    InvalidRequest,

    /// The leg was answered but carried no usable point.
    Empty,
}

/// Why a single leg produced no geometry.
#[derive(Debug, Clone, Serialize)]
pub struct LegFailure {
    pub index: usize,
    pub from: Coordinate,
    pub to: Coordinate,
    pub kind: LegFailureKind,
    pub message: String,
}

impl LegFailure {
    pub(crate) fn empty(index: usize, from: Coordinate, to: Coordinate) -> Self {
        Self {
            index,
            from,
            to,
            kind: LegFailureKind::Empty,
            message: "Route has no points".to_string(),
        }
    }

    pub(crate) fn from_client_error(
        index: usize,
        from: Coordinate,
        to: Coordinate,
        error: &ClientError,
    ) -> Self {
        let kind = match error {
            ClientError::Timeout(_) => LegFailureKind::Timeout,
            ClientError::Parse(_) => LegFailureKind::Parse,
            ClientError::InvalidRequest(_) => LegFailureKind::InvalidRequest,
            ClientError::Network(_) | ClientError::Api { .. } => LegFailureKind::Network,
        };

        Self {
            index,
            from,
            to,
            kind,
            message: error.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ComposeError {
    #[error("No route available, {} leg(s) failed", .failures.len())]
    RouteUnavailable { failures: Vec<LegFailure> },

    #[error(transparent)]
    Bounds(#[from] BoundsError),
}
