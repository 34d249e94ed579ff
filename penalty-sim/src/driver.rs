use crate::script::{GameScript, ScriptEvent};
use log::*;
use penalty_box::{
    Infraction, PenaltyBox, Release, Situation, Team, TeamBundle, config::Config,
    snapshot::BoxSnapshot,
};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReleaseRecord {
    pub team: Team,
    pub player: u8,
    pub infraction: Infraction,
    /// Game time the player was back on the ice
    pub at: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum GoalSituation {
    EvenStrength,
    PowerPlay,
    ShortHanded,
}

impl GoalSituation {
    fn for_scorer(situation: Situation, scoring_team: Team) -> Self {
        match situation {
            Situation::EvenStrength => Self::EvenStrength,
            Situation::PowerPlay(team) if team == scoring_team => Self::PowerPlay,
            Situation::PowerPlay(_) => Self::ShortHanded,
        }
    }
}

impl core::fmt::Display for GoalSituation {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match *self {
            Self::EvenStrength => write!(f, "even strength"),
            Self::PowerPlay => write!(f, "power play"),
            Self::ShortHanded => write!(f, "short handed"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalRecord {
    pub team: Team,
    pub player: Option<u8>,
    pub at: f64,
    pub situation: GoalSituation,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub length: f64,
    pub scores: TeamBundle<u8>,
    pub goals: Vec<GoalRecord>,
    pub releases: Vec<ReleaseRecord>,
    pub still_serving: BoxSnapshot<u8>,
}

/// Stands in for the match simulator: owns the game clock and the penalty box
/// for a single game and feeds scripted events through them.
#[derive(Debug)]
pub struct MatchDriver {
    penalty_box: PenaltyBox<u8>,
    full_strength: u8,
    now: f64,
    situation: Situation,
    scores: TeamBundle<u8>,
    goals: Vec<GoalRecord>,
    releases: Vec<ReleaseRecord>,
}

impl MatchDriver {
    pub fn new(config: &Config, full_strength: Option<u8>) -> Self {
        Self {
            penalty_box: PenaltyBox::new(config.rules.clone()),
            full_strength: full_strength.unwrap_or(config.full_strength),
            now: 0.0,
            situation: Situation::EvenStrength,
            scores: Default::default(),
            goals: Vec::new(),
            releases: Vec::new(),
        }
    }

    pub fn now(&self) -> f64 {
        self.now
    }

    pub fn penalty_box(&self) -> &PenaltyBox<u8> {
        &self.penalty_box
    }

    /// Runs the game clock forward to `target`, stopping wherever a penalty
    /// ends so strength changes are seen at the right moment.
    pub fn advance_to(&mut self, target: f64) {
        let minutes = target - self.now;
        if minutes <= 0.0 {
            return;
        }

        for chunk in self.penalty_box.split_up_advance_clock(minutes) {
            self.now += chunk;
            let now = self.now;
            let releases = &mut self.releases;
            self.penalty_box.advance_clock(chunk, |release| {
                let at = now - release.minutes_ago;
                releases.push(record_release(release, at));
            });
            self.update_situation();
        }
        self.now = target;
    }

    pub fn apply(&mut self, event: &ScriptEvent) {
        self.advance_to(event.at());

        match *event {
            ScriptEvent::Penalty {
                team,
                player,
                infraction,
                kind,
                ..
            } => {
                let kind = kind.unwrap_or_else(|| infraction.kind());
                self.penalty_box.add(team, player, infraction, kind);
            }
            ScriptEvent::Goal { team, player, .. } => {
                let situation = GoalSituation::for_scorer(self.situation, team);
                info!(
                    "{:>6.2} {team} goal by {}, {situation}",
                    self.now,
                    print_player(player)
                );
                self.scores[team] += 1;
                self.goals.push(GoalRecord {
                    team,
                    player,
                    at: self.now,
                    situation,
                });

                // Anyone released by a goal comes out at the time of the goal
                let now = self.now;
                let releases = &mut self.releases;
                self.penalty_box
                    .goal(team, |release| releases.push(record_release(release, now)));
            }
        }

        self.update_situation();
    }

    pub fn finish(mut self, length: f64) -> Summary {
        self.advance_to(length);
        info!(
            "{:>6.2} Game over, Home {} Away {}",
            self.now, self.scores.home, self.scores.away
        );
        Summary {
            length,
            scores: self.scores,
            goals: self.goals,
            releases: self.releases,
            still_serving: self.penalty_box.snapshot(),
        }
    }

    fn update_situation(&mut self) {
        let situation = self.penalty_box.situation(self.full_strength);
        if situation != self.situation {
            info!(
                "{:>6.2} Now {} on {}",
                self.now,
                self.penalty_box.strength(Team::Home, self.full_strength),
                self.penalty_box.strength(Team::Away, self.full_strength),
            );
            self.situation = situation;
        }
    }
}

fn record_release(release: Release<u8>, at: f64) -> ReleaseRecord {
    info!(
        "{at:>6.2} {} player #{} released ({})",
        release.team, release.participant, release.infraction
    );
    ReleaseRecord {
        team: release.team,
        player: release.participant,
        infraction: release.infraction,
        at,
    }
}

fn print_player(player: Option<u8>) -> String {
    match player {
        Some(num) => format!("#{num}"),
        None => "unknown player".to_string(),
    }
}

/// Replays `script` from the opening faceoff to the final horn.
pub fn run(script: &GameScript, config: &Config) -> Summary {
    let mut driver = MatchDriver::new(config, script.full_strength);
    for event in script.events.iter() {
        driver.apply(event);
    }
    driver.finish(script.length)
}

#[cfg(test)]
mod test {
    use super::*;
    use indoc::indoc;
    use penalty_box::{PenaltyKind, PenaltyRule};
    use std::sync::Once;

    static INIT: Once = Once::new();

    fn initialize() {
        INIT.call_once(|| {
            let _ = env_logger::builder().is_test(true).try_init();
        });
    }

    const SCRIPT: &str = indoc!(
        r#"length = 12.0

           [[events]]
           event = "penalty"
           at = 1.0
           team = "home"
           player = 12
           infraction = "tripping"

           [[events]]
           event = "goal"
           at = 2.0
           team = "away"
           player = 9

           [[events]]
           event = "penalty"
           at = 5.0
           team = "home"
           player = 7
           infraction = "fighting"

           [[events]]
           event = "goal"
           at = 6.0
           team = "away"

           [[events]]
           event = "penalty"
           at = 7.0
           team = "away"
           player = 3
           infraction = "tripping"

           [[events]]
           event = "goal"
           at = 8.0
           team = "home"
           player = 22"#
    );

    #[test]
    fn test_run_script() {
        initialize();
        let script = GameScript::from_toml(SCRIPT).unwrap();
        let summary = run(&script, &Config::default());

        assert_eq!(summary.scores, TeamBundle::new(1, 2));
        let situations: Vec<_> = summary.goals.iter().map(|g| (g.at, g.situation)).collect();
        assert_eq!(
            situations,
            vec![
                (2.0, GoalSituation::PowerPlay),
                (6.0, GoalSituation::PowerPlay),
                (8.0, GoalSituation::EvenStrength),
            ]
        );
        assert_eq!(
            summary.releases,
            vec![
                ReleaseRecord {
                    team: Team::Home,
                    player: 12,
                    infraction: Infraction::Tripping,
                    at: 2.0,
                },
                ReleaseRecord {
                    team: Team::Away,
                    player: 3,
                    infraction: Infraction::Tripping,
                    at: 8.0,
                },
                ReleaseRecord {
                    team: Team::Home,
                    player: 7,
                    infraction: Infraction::Fighting,
                    at: 10.0,
                },
            ]
        );
        assert!(summary.still_serving.home.is_empty());
        assert!(summary.still_serving.away.is_empty());
    }

    #[test]
    fn test_release_lands_between_events() {
        initialize();
        let mut driver = MatchDriver::new(&Config::default(), None);
        driver.apply(&ScriptEvent::Penalty {
            at: 0.5,
            team: Team::Away,
            player: 4,
            infraction: Infraction::Hooking,
            kind: None,
        });
        driver.advance_to(3.0);

        assert_eq!(driver.now(), 3.0);
        assert_eq!(driver.penalty_box().count(Team::Away), 0);
        let summary = driver.finish(3.0);
        assert_eq!(summary.releases.len(), 1);
        assert_eq!(summary.releases[0].at, 2.5);
    }

    #[test]
    fn test_short_handed_goal_keeps_penalty() {
        initialize();
        let mut driver = MatchDriver::new(&Config::default(), Some(6));
        driver.apply(&ScriptEvent::Penalty {
            at: 1.0,
            team: Team::Home,
            player: 2,
            infraction: Infraction::Slashing,
            kind: None,
        });
        driver.apply(&ScriptEvent::Goal {
            at: 1.5,
            team: Team::Home,
            player: Some(2),
        });

        assert_eq!(driver.penalty_box().count(Team::Home), 1);
        let summary = driver.finish(2.0);
        assert_eq!(summary.goals[0].situation, GoalSituation::ShortHanded);
        assert_eq!(summary.still_serving.home.len(), 1);
        assert_eq!(summary.still_serving.home[0].minutes_left, 1.0);
    }

    #[test]
    fn test_config_rules_used() {
        initialize();
        let mut config = Config::default();
        config.rules.minor = PenaltyRule::new(1.5, 1.5);
        let mut driver = MatchDriver::new(&config, None);
        driver.apply(&ScriptEvent::Penalty {
            at: 0.0,
            team: Team::Home,
            player: 10,
            infraction: Infraction::Holding,
            kind: Some(PenaltyKind::Minor),
        });

        let summary = driver.finish(4.0);
        assert_eq!(summary.releases[0].at, 1.5);
    }

    #[test]
    fn test_summary_json() {
        initialize();
        let script = GameScript::from_toml(SCRIPT).unwrap();
        let summary = run(&script, &Config::default());
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["scores"], serde_json::json!({ "home": 1, "away": 2 }));
        assert_eq!(json["goals"][0]["situation"], "power-play");
        assert_eq!(json["releases"][2]["infraction"], "fighting");
    }
}
