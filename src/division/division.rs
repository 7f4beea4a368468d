use crate::division::team::{Team, TeamId};
use crate::elimination::oracle::EliminationOracle;
use crate::error::{EliminationError, Result};
use fxhash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;

/// Plain form of a division used for snapshots. Loading always goes back
/// through `Division::new`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DivisionRecord {
    pub teams: Vec<Team>,
    pub games: Vec<Vec<u32>>,
}

/// Immutable standings and remaining schedule of a division.
///
/// The leader is fixed when the division is built and never recomputed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "DivisionRecord", into = "DivisionRecord")]
pub struct Division {
    teams: Vec<Team>,
    games: Vec<Vec<u32>>,
    index: FxHashMap<String, usize>,
    leader: usize,
}

impl Division {
    pub fn new(teams: Vec<Team>, games: Vec<Vec<u32>>) -> Result<Self> {
        let n = teams.len();
        if n == 0 {
            return Err(EliminationError::malformed("division has no teams"));
        }
        if games.len() != n {
            return Err(EliminationError::malformed(format!(
                "expected {n} schedule rows, found {}",
                games.len()
            )));
        }

        let mut index = FxHashMap::default();
        let mut leader = 0;
        for (i, team) in teams.iter().enumerate() {
            if team.name.is_empty() || team.name.chars().any(char::is_whitespace) {
                return Err(EliminationError::malformed(format!(
                    "invalid team name {:?}",
                    team.name
                )));
            }
            if index.insert(team.name.clone(), i).is_some() {
                return Err(EliminationError::malformed(format!(
                    "duplicate team '{}'",
                    team.name
                )));
            }
            if games[i].len() != n {
                return Err(EliminationError::malformed(format!(
                    "schedule row for '{}' has {} entries, expected {n}",
                    team.name,
                    games[i].len()
                )));
            }
            if team.wins > teams[leader].wins {
                leader = i;
            }
        }

        for i in 0..n {
            if games[i][i] != 0 {
                return Err(EliminationError::malformed(format!(
                    "'{}' has {} games scheduled against itself",
                    teams[i].name, games[i][i]
                )));
            }
            for j in (i + 1)..n {
                if games[i][j] != games[j][i] {
                    return Err(EliminationError::malformed(format!(
                        "schedule between '{}' and '{}' is not symmetric ({} vs {})",
                        teams[i].name, teams[j].name, games[i][j], games[j][i]
                    )));
                }
            }
        }

        Ok(Division {
            teams,
            games,
            index,
            leader,
        })
    }

    pub fn team_count(&self) -> usize {
        self.teams.len()
    }

    pub fn team_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.teams.iter().map(|team| team.name.as_str())
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn team_ids(&self) -> impl Iterator<Item = TeamId> {
        (0..self.teams.len()).map(TeamId)
    }

    pub fn team_id(&self, name: &str) -> Result<TeamId> {
        self.index
            .get(name)
            .map(|&i| TeamId(i))
            .ok_or_else(|| EliminationError::InvalidTeam(name.to_string()))
    }

    /// Confirms that `id` indexes a team of this division.
    pub fn check(&self, id: TeamId) -> Result<TeamId> {
        if id.0 < self.teams.len() {
            Ok(id)
        } else {
            Err(EliminationError::InvalidTeam(format!("team {id:?}")))
        }
    }

    /// # Panics
    ///
    /// If `id` was issued by a larger division. Use `check` on ids of
    /// unknown origin.
    pub fn team(&self, id: TeamId) -> &Team {
        &self.teams[id.0]
    }

    pub fn wins(&self, name: &str) -> Result<u32> {
        Ok(self.team(self.team_id(name)?).wins)
    }

    pub fn losses(&self, name: &str) -> Result<u32> {
        Ok(self.team(self.team_id(name)?).losses)
    }

    pub fn remaining(&self, name: &str) -> Result<u32> {
        Ok(self.team(self.team_id(name)?).remaining)
    }

    pub fn against(&self, first: &str, second: &str) -> Result<u32> {
        let first = self.team_id(first)?;
        let second = self.team_id(second)?;
        Ok(self.games_between(first, second))
    }

    /// # Panics
    ///
    /// If either id was issued by a larger division.
    pub fn games_between(&self, first: TeamId, second: TeamId) -> u32 {
        self.games[first.0][second.0]
    }

    pub fn leader(&self) -> TeamId {
        TeamId(self.leader)
    }

    pub fn leader_name(&self) -> &str {
        &self.teams[self.leader].name
    }

    /// Total remaining games among the given teams, each pair counted once.
    pub fn games_among(&self, ids: &[TeamId]) -> u64 {
        let mut total = 0u64;
        for (k, &a) in ids.iter().enumerate() {
            for &b in &ids[k + 1..] {
                total += u64::from(self.games_between(a, b));
            }
        }
        total
    }

    pub fn oracle(&self) -> EliminationOracle<'_> {
        EliminationOracle::new(self)
    }
}

impl TryFrom<DivisionRecord> for Division {
    type Error = EliminationError;

    fn try_from(record: DivisionRecord) -> Result<Self> {
        Division::new(record.teams, record.games)
    }
}

impl From<Division> for DivisionRecord {
    fn from(division: Division) -> Self {
        DivisionRecord {
            teams: division.teams,
            games: division.games,
        }
    }
}
