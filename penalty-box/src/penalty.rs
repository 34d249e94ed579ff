use derivative::Derivative;
use enum_iterator::Sequence;
use serde::{Deserialize, Serialize};
use std::ops::Index;

#[derive(Derivative, Serialize, Deserialize, Sequence)]
#[derivative(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum PenaltyKind {
    #[derivative(Default)]
    Minor,
    DoubleMinor,
    Major,
}

impl PenaltyKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Minor => "minor",
            Self::DoubleMinor => "double-minor",
            Self::Major => "major",
        }
    }
}

impl core::fmt::Display for PenaltyKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// How long a penalty of one kind is served, in minutes of game time, and how
/// much of it is wiped out when the penalized team concedes a goal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PenaltyRule {
    pub minutes: f64,
    pub minutes_reduced_after_goal: f64,
}

impl PenaltyRule {
    pub const fn new(minutes: f64, minutes_reduced_after_goal: f64) -> Self {
        Self {
            minutes,
            minutes_reduced_after_goal,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PenaltyRules {
    pub minor: PenaltyRule,
    pub double_minor: PenaltyRule,
    pub major: PenaltyRule,
}

impl PenaltyRules {
    pub fn rule(&self, kind: PenaltyKind) -> PenaltyRule {
        self[kind]
    }
}

impl Default for PenaltyRules {
    fn default() -> Self {
        Self {
            minor: PenaltyRule::new(2.0, 2.0),
            double_minor: PenaltyRule::new(4.0, 2.0),
            major: PenaltyRule::new(5.0, 0.0),
        }
    }
}

impl Index<PenaltyKind> for PenaltyRules {
    type Output = PenaltyRule;

    fn index(&self, kind: PenaltyKind) -> &Self::Output {
        match kind {
            PenaltyKind::Minor => &self.minor,
            PenaltyKind::DoubleMinor => &self.double_minor,
            PenaltyKind::Major => &self.major,
        }
    }
}

#[derive(Derivative, Serialize, Deserialize, Sequence)]
#[derivative(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Infraction {
    Boarding,
    Charging,
    CrossChecking,
    Elbowing,
    Fighting,
    HighSticking,
    HighStickingDoubleMinor,
    Holding,
    Hooking,
    Interference,
    Roughing,
    Slashing,
    Tripping,
    #[derivative(Default)]
    Unknown,
}

impl Infraction {
    pub fn kind(self) -> PenaltyKind {
        match self {
            Self::Fighting => PenaltyKind::Major,
            Self::HighStickingDoubleMinor => PenaltyKind::DoubleMinor,
            Self::Boarding
            | Self::Charging
            | Self::CrossChecking
            | Self::Elbowing
            | Self::HighSticking
            | Self::Holding
            | Self::Hooking
            | Self::Interference
            | Self::Roughing
            | Self::Slashing
            | Self::Tripping
            | Self::Unknown => PenaltyKind::Minor,
        }
    }
}

impl core::fmt::Display for Infraction {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match *self {
            Self::Boarding => write!(f, "Boarding"),
            Self::Charging => write!(f, "Charging"),
            Self::CrossChecking => write!(f, "Cross-checking"),
            Self::Elbowing => write!(f, "Elbowing"),
            Self::Fighting => write!(f, "Fighting"),
            Self::HighSticking => write!(f, "High-sticking"),
            Self::HighStickingDoubleMinor => write!(f, "High-sticking (double minor)"),
            Self::Holding => write!(f, "Holding"),
            Self::Hooking => write!(f, "Hooking"),
            Self::Interference => write!(f, "Interference"),
            Self::Roughing => write!(f, "Roughing"),
            Self::Slashing => write!(f, "Slashing"),
            Self::Tripping => write!(f, "Tripping"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_default_rules() {
        let rules = PenaltyRules::default();

        // (kind, minutes, reduced after goal)
        let test_cases = vec![
            (PenaltyKind::Minor, 2.0, 2.0),
            (PenaltyKind::DoubleMinor, 4.0, 2.0),
            (PenaltyKind::Major, 5.0, 0.0),
        ];

        for (kind, minutes, reduced) in test_cases {
            let rule = rules.rule(kind);
            assert_eq!(rule.minutes, minutes, "{kind}");
            assert_eq!(rule.minutes_reduced_after_goal, reduced, "{kind}");
        }
    }

    #[test]
    fn test_rule_is_copied_out_of_table() {
        let mut rules = PenaltyRules::default();
        let rule = rules.rule(PenaltyKind::Minor);
        rules.minor.minutes = 3.0;
        assert_eq!(rule.minutes, 2.0);
        assert_eq!(rules[PenaltyKind::Minor].minutes, 3.0);
    }

    #[test]
    fn test_infraction_kind() {
        assert_eq!(Infraction::Fighting.kind(), PenaltyKind::Major);
        assert_eq!(
            Infraction::HighStickingDoubleMinor.kind(),
            PenaltyKind::DoubleMinor
        );
        let minors = enum_iterator::all::<Infraction>()
            .filter(|inf| inf.kind() == PenaltyKind::Minor)
            .count();
        assert_eq!(minors, enum_iterator::cardinality::<Infraction>() - 2);
    }

    #[test]
    fn test_infraction_serde() {
        assert_eq!(
            serde_json::from_str::<Infraction>("\"cross-checking\"").unwrap(),
            Infraction::CrossChecking
        );
        assert_eq!(
            serde_json::to_string(&Infraction::HighStickingDoubleMinor).unwrap(),
            "\"high-sticking-double-minor\""
        );
        assert_eq!(
            serde_json::to_string(&PenaltyKind::DoubleMinor).unwrap(),
            "\"double-minor\""
        );
    }
}
