use crate::{
    bundles::TeamBundle,
    penalty::{Infraction, PenaltyKind},
    penalty_box::PenaltyEntry,
};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PenaltySnapshot<P> {
    pub participant: P,
    pub infraction: Infraction,
    pub kind: PenaltyKind,
    pub minutes_left: f64,
}

impl<P: Clone> From<&PenaltyEntry<P>> for PenaltySnapshot<P> {
    fn from(entry: &PenaltyEntry<P>) -> Self {
        Self {
            participant: entry.participant.clone(),
            infraction: entry.infraction,
            kind: entry.kind,
            minutes_left: entry.minutes_left,
        }
    }
}

/// Everyone in the box, shortest remaining penalty first.
pub type BoxSnapshot<P> = TeamBundle<Vec<PenaltySnapshot<P>>>;
