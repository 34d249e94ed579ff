use derivative::Derivative;
use enum_iterator::Sequence;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Derivative, Serialize, Deserialize, Sequence)]
#[derivative(Debug, Default, PartialEq, Eq, Hash, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum Team {
    #[derivative(Default)]
    Home,
    Away,
}

impl Team {
    pub fn other(self) -> Self {
        match self {
            Self::Home => Self::Away,
            Self::Away => Self::Home,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Self::Home => 0,
            Self::Away => 1,
        }
    }
}

impl TryFrom<u8> for Team {
    type Error = TeamError;

    fn try_from(num: u8) -> Result<Self, Self::Error> {
        match num {
            0 => Ok(Self::Home),
            1 => Ok(Self::Away),
            n => Err(TeamError::OutOfRange(n)),
        }
    }
}

impl core::fmt::Display for Team {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match *self {
            Self::Home => write!(f, "Home"),
            Self::Away => write!(f, "Away"),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Error)]
pub enum TeamError {
    #[error("Team number {0} is out of range, expected 0 or 1")]
    OutOfRange(u8),
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_other() {
        assert_eq!(Team::Home.other(), Team::Away);
        assert_eq!(Team::Away.other(), Team::Home);
        for team in enum_iterator::all::<Team>() {
            assert_eq!(team.other().other(), team);
        }
    }

    #[test]
    fn test_try_from() {
        assert_eq!(Team::try_from(0), Ok(Team::Home));
        assert_eq!(Team::try_from(1), Ok(Team::Away));
        assert_eq!(Team::try_from(2), Err(TeamError::OutOfRange(2)));
        assert_eq!(Team::try_from(0).map(Team::index), Ok(0));
        assert_eq!(Team::try_from(1).map(Team::index), Ok(1));
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&Team::Home).unwrap(), "\"home\"");
        assert_eq!(serde_json::from_str::<Team>("\"away\"").unwrap(), Team::Away);
        assert!(serde_json::from_str::<Team>("\"black\"").is_err());
    }
}
