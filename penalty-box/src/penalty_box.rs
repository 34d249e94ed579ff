use crate::{
    bundles::TeamBundle,
    penalty::{Infraction, PenaltyKind, PenaltyRule, PenaltyRules},
    snapshot::{BoxSnapshot, PenaltySnapshot},
    team::Team,
};
use enum_iterator::all;
use log::*;
use std::{cmp::Ordering, fmt::Debug};

/// Game times closer together than this many minutes are the same moment.
///
/// Chunks from [`PenaltyBox::split_up_advance_clock`] are differences of
/// stopping points, while entries subtract them one after another, so an entry
/// can end its last chunk a few ulps above zero.
pub const SAME_MOMENT: f64 = 1e-9;

/// A participant serving one penalty for one team.
#[derive(Debug, Clone, PartialEq)]
pub struct PenaltyEntry<P> {
    pub participant: P,
    pub infraction: Infraction,
    pub kind: PenaltyKind,
    pub rule: PenaltyRule,
    /// Only ever `<= SAME_MOMENT` inside the release pass that removes the entry
    pub minutes_left: f64,
}

/// Sent to the caller exactly once for every entry that leaves the box.
#[derive(Debug, Clone, PartialEq)]
pub struct Release<P> {
    pub team: Team,
    pub participant: P,
    pub infraction: Infraction,
    /// How long ago the penalty actually ran out. Zero when the clock was
    /// advanced along the chunks from [`PenaltyBox::split_up_advance_clock`].
    pub minutes_ago: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Situation {
    EvenStrength,
    /// The contained team has more players on the ice
    PowerPlay(Team),
}

/// Tracks the players sitting in each team's penalty box during one game.
///
/// The box does not own a clock. The match simulator advances it, and every
/// operation that can end a penalty takes an `on_release` callback that runs
/// before the operation returns, so strength counts are already up to date
/// when the simulator generates its next play.
#[derive(Debug, Clone, PartialEq)]
pub struct PenaltyBox<P> {
    rules: PenaltyRules,
    players: TeamBundle<Vec<PenaltyEntry<P>>>,
}

impl<P> Default for PenaltyBox<P> {
    fn default() -> Self {
        Self::new(PenaltyRules::default())
    }
}

impl<P> PenaltyBox<P> {
    pub fn new(rules: PenaltyRules) -> Self {
        Self {
            rules,
            players: TeamBundle::new(Vec::new(), Vec::new()),
        }
    }

    pub fn rules(&self) -> &PenaltyRules {
        &self.rules
    }

    pub fn count(&self, team: Team) -> usize {
        self.players[team].len()
    }

    pub fn counts(&self) -> TeamBundle<usize> {
        self.players.map(|_, entries| entries.len())
    }

    pub fn entries(&self, team: Team) -> &[PenaltyEntry<P>] {
        &self.players[team]
    }

    pub fn is_empty(&self) -> bool {
        self.players.iter().all(|(_, entries)| entries.is_empty())
    }

    /// Players a team has on the ice, never less than zero.
    pub fn strength(&self, team: Team, full_strength: u8) -> u8 {
        let in_box = u8::try_from(self.count(team)).unwrap_or(u8::MAX);
        full_strength.saturating_sub(in_box)
    }

    pub fn situation(&self, full_strength: u8) -> Situation {
        let home = self.strength(Team::Home, full_strength);
        let away = self.strength(Team::Away, full_strength);
        match home.cmp(&away) {
            Ordering::Equal => Situation::EvenStrength,
            Ordering::Greater => Situation::PowerPlay(Team::Home),
            Ordering::Less => Situation::PowerPlay(Team::Away),
        }
    }

    /// Drops every entry without notifying anyone, for starting a new game.
    pub fn clear(&mut self) {
        for team in all::<Team>() {
            self.players[team].clear();
        }
    }

    /// Splits `minutes` into chunks that end exactly where some penalty runs
    /// out.
    ///
    /// Advancing the clock by each returned chunk in turn means nobody stays
    /// in the box past the end of their penalty, so the caller can recompute
    /// strengths after every chunk. The chunks are positive and add up to
    /// `minutes`. With nothing due inside the interval the result is
    /// `[minutes]`. Stopping points within [`SAME_MOMENT`] of each other, or of
    /// either end of the interval, share a chunk.
    pub fn split_up_advance_clock(&self, minutes: f64) -> Vec<f64> {
        let mut need_to_stop_at: Vec<f64> = self
            .players
            .iter()
            .flat_map(|(_, entries)| entries.iter())
            .map(|entry| entry.minutes_left)
            // An entry that is already due does not need a stopping point of
            // its own, the first chunk releases it
            .filter(|&left| left > SAME_MOMENT && left < minutes - SAME_MOMENT)
            .collect();
        need_to_stop_at.sort_by(f64::total_cmp);
        need_to_stop_at.dedup_by(|next, prev| *next - *prev <= SAME_MOMENT);
        need_to_stop_at.push(minutes);

        let mut prev = 0.0;
        need_to_stop_at
            .into_iter()
            .map(|stop| {
                let chunk = stop - prev;
                prev = stop;
                chunk
            })
            .collect()
    }
}

impl<P: PartialEq> PenaltyBox<P> {
    pub fn contains(&self, team: Team, participant: &P) -> bool {
        self.players[team]
            .iter()
            .any(|entry| entry.participant == *participant)
    }

    /// Time until the participant is back on the ice. With stacked penalties
    /// this is the penalty that ends first.
    pub fn minutes_left(&self, team: Team, participant: &P) -> Option<f64> {
        self.players[team]
            .iter()
            .filter(|entry| entry.participant == *participant)
            .map(|entry| entry.minutes_left)
            .min_by(f64::total_cmp)
    }
}

impl<P: Clone> PenaltyBox<P> {
    pub fn snapshot(&self) -> BoxSnapshot<P> {
        self.players.map(|_, entries| {
            let mut snapshots: Vec<_> = entries.iter().map(PenaltySnapshot::from).collect();
            snapshots.sort_by(|a, b| a.minutes_left.total_cmp(&b.minutes_left));
            snapshots
        })
    }
}

impl<P: Debug> PenaltyBox<P> {
    /// Puts `participant` in the box using the rule for `kind` from this box's
    /// rule table.
    pub fn add(&mut self, team: Team, participant: P, infraction: Infraction, kind: PenaltyKind) {
        let rule = self.rules.rule(kind);
        self.add_with_rule(team, participant, infraction, kind, rule);
    }

    /// Puts `participant` in the box with an already resolved rule. Nothing is
    /// released here, even if the rule has no duration.
    pub fn add_with_rule(
        &mut self,
        team: Team,
        participant: P,
        infraction: Infraction,
        kind: PenaltyKind,
        rule: PenaltyRule,
    ) {
        info!(
            "Starting a {kind} penalty ({infraction}) for {team} player {participant:?}, {} minutes",
            rule.minutes
        );
        if rule.minutes <= 0.0 {
            warn!("{team} player {participant:?} was given a penalty with no duration");
        }
        self.players[team].push(PenaltyEntry {
            participant,
            infraction,
            kind,
            rule,
            minutes_left: rule.minutes,
        });
    }

    /// Runs `minutes` of game time off every penalty, then releases whoever is
    /// done.
    pub fn advance_clock<F: FnMut(Release<P>)>(&mut self, minutes: f64, on_release: F) {
        if minutes < 0.0 {
            warn!("Advancing the penalty clock by a negative amount: {minutes}");
        }
        trace!("Advancing the penalty clock by {minutes} minutes");

        for team in all::<Team>() {
            for entry in self.players[team].iter_mut() {
                entry.minutes_left -= minutes;
            }
        }

        self.check_if_penalties_over(on_release);
    }

    /// Shortens the penalties of the team that was scored on, then releases
    /// whoever is done. The scoring team's penalties are untouched.
    pub fn goal<F: FnMut(Release<P>)>(&mut self, scoring_team: Team, on_release: F) {
        let team = scoring_team.other();
        debug!(
            "Goal by {scoring_team}, reducing {} {team} penalties",
            self.count(team)
        );

        for entry in self.players[team].iter_mut() {
            entry.minutes_left -= entry.rule.minutes_reduced_after_goal;
        }

        self.check_if_penalties_over(on_release);
    }

    /// Removes every entry that has run out, calling `on_release` once for
    /// each. Safe to call repeatedly.
    pub fn check_if_penalties_over<F: FnMut(Release<P>)>(&mut self, mut on_release: F) {
        for team in all::<Team>() {
            let (over, still_serving): (Vec<_>, Vec<_>) = std::mem::take(&mut self.players[team])
                .into_iter()
                .partition(|entry| entry.minutes_left <= SAME_MOMENT);
            self.players[team] = still_serving;

            for entry in over {
                let minutes_ago = if entry.minutes_left < -SAME_MOMENT {
                    -entry.minutes_left
                } else {
                    0.0
                };
                if minutes_ago > 0.0 {
                    warn!(
                        "{team} player {:?} was released {minutes_ago} minutes late",
                        entry.participant
                    );
                } else {
                    debug!("{team} player {:?} released", entry.participant);
                }
                on_release(Release {
                    team,
                    participant: entry.participant,
                    infraction: entry.infraction,
                    minutes_ago,
                });
            }
        }
    }
}
