use crate::location::Location;
use crate::policy::Lane;
use crate::unit::UnitType;
use thiserror::Error;

/// A hand-authored configuration that cannot drive a policy.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to parse policy config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{field}: {location} is not a buildable cell in our half of the arena")]
    OutOfOwnHalf {
        field: String,
        location: Location,
    },
    #[error("{field}: {location} is not on one of our spawn edges")]
    NotOnSpawnEdge {
        field: String,
        location: Location,
    },
    #[error("{field}: {location} is not on one of the opponent's spawn edges")]
    NotOnEnemyEdge {
        field: String,
        location: Location,
    },
    #[error("reinforce: no defense blocks configured")]
    NoBlocks,
    #[error("reinforce: defense block '{0}' has no locations")]
    EmptyBlock(String),
    #[error("reinforce: defense zone '{0}' has no cells")]
    EmptyZone(String),
    #[error("reinforce: exit band refers to unknown zone '{0}'")]
    UnknownZone(String),
    #[error("attack: lane {0:?} is not configured")]
    MissingLane(Lane),
    #[error("attack: lane {0:?} is configured more than once")]
    DuplicateLane(Lane),
    #[error("attack: lane {0:?} has no spawn candidates")]
    EmptyLane(Lane),
    #[error("{field}: {unit:?} is the wrong kind of unit")]
    WrongUnitKind { field: String, unit: UnitType },
    #[error("{name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

/// An action frame from the event feed that could not be read.
#[derive(Error, Debug)]
pub enum FrameError {
    #[error("failed to parse action frame: {0}")]
    Json(#[from] serde_json::Error),
    #[error("breach event has an unknown owner {0}")]
    UnknownOwner(u8),
}
