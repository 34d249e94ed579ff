//! Penalty box bookkeeping for a turn based hockey simulation.
//!
//! [`PenaltyBox`] tracks who is serving time for each [`Team`], releases
//! players as the game clock runs, shortens penalties when the short-handed
//! team is scored on, and tells the simulator how to chop up a stretch of play
//! so strength changes happen exactly between chunks.

pub mod bundles;

pub mod config;

pub mod penalty;

pub mod penalty_box;

pub mod snapshot;

pub mod team;

pub use bundles::TeamBundle;
pub use penalty::{Infraction, PenaltyKind, PenaltyRule, PenaltyRules};
pub use penalty_box::{PenaltyBox, PenaltyEntry, Release, Situation};
pub use team::Team;
