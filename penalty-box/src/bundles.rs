use crate::team::Team;
use core::ops::{Index, IndexMut};
use derivative::Derivative;
use serde::{Deserialize, Serialize};

/// One value per team, indexable by [`Team`].
#[derive(Derivative, Serialize, Deserialize)]
#[derivative(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TeamBundle<T> {
    pub home: T,
    pub away: T,
}

impl<T> TeamBundle<T> {
    pub fn new(home: T, away: T) -> Self {
        Self { home, away }
    }

    /// Home first, then Away.
    pub fn iter(&self) -> impl Iterator<Item = (Team, &T)> {
        [(Team::Home, &self.home), (Team::Away, &self.away)].into_iter()
    }

    pub fn map<U, F: FnMut(Team, &T) -> U>(&self, mut f: F) -> TeamBundle<U> {
        TeamBundle {
            home: f(Team::Home, &self.home),
            away: f(Team::Away, &self.away),
        }
    }
}

impl<T> Index<Team> for TeamBundle<T> {
    type Output = T;

    fn index(&self, team: Team) -> &Self::Output {
        match team {
            Team::Home => &self.home,
            Team::Away => &self.away,
        }
    }
}

impl<T> IndexMut<Team> for TeamBundle<T> {
    fn index_mut(&mut self, team: Team) -> &mut Self::Output {
        match team {
            Team::Home => &mut self.home,
            Team::Away => &mut self.away,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_index() {
        let mut bundle = TeamBundle::new(3u8, 5u8);
        assert_eq!(bundle[Team::Home], 3);
        assert_eq!(bundle[Team::Away], 5);
        bundle[Team::Away] += 1;
        assert_eq!(bundle, TeamBundle { home: 3, away: 6 });
    }

    #[test]
    fn test_iter_order() {
        let bundle = TeamBundle::new("h", "a");
        let teams: Vec<_> = bundle.iter().map(|(team, v)| (team, *v)).collect();
        assert_eq!(teams, vec![(Team::Home, "h"), (Team::Away, "a")]);
    }

    #[test]
    fn test_map() {
        let bundle = TeamBundle::new(1u8, 4u8);
        assert_eq!(bundle.map(|team, v| team.index() as u8 + v), TeamBundle::new(1, 5));
        assert_eq!(
            TeamBundle::new(vec![1, 2], vec![]).map(|_, v| v.len()),
            TeamBundle::new(2, 0)
        );
    }
}
