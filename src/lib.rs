pub mod action;
pub mod arena;
pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod location;
pub mod policy;
pub mod shim;
pub mod state;
pub mod unit;

pub use action::{TurnAction, TurnContext};
pub use arena::ArenaEdge;
pub use config::PolicyConfig;
pub use engine::{ArenaEngine, ArenaView};
pub use error::{ConfigError, FrameError};
pub use location::Location;
pub use policy::{AttackPlay, Lane, TurnPolicy, TurnReport};
pub use state::{BreachHistory, PolicyState};
pub use unit::{Player, Resources, UnitSnapshot, UnitType};
