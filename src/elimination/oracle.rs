use crate::division::{Division, TeamId};
use crate::elimination::builder::EliminationNetwork;
use crate::error::Result;
use crate::flow::FordFulkerson;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EliminationKind {
    /// The leader already has more wins than the candidate can reach.
    Trivial,
    /// Source side of the minimum cut in the candidate's network.
    Flow,
}

/// Teams that together rule the candidate out, in load order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certificate {
    pub kind: EliminationKind,
    pub teams: Vec<String>,
}

impl Certificate {
    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.teams.iter().any(|team| team == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.teams.iter().map(String::as_str)
    }

    /// Re-checks the certificate against the division without any flow
    /// computation.
    ///
    /// A trivial certificate holds when its single team has more wins than
    /// the candidate's ceiling. A flow certificate `R` holds when
    /// `sum(wins of R) + games among R > |R| * ceiling`, i.e. the teams of
    /// `R` must on average finish above the candidate.
    pub fn verify(&self, division: &Division, candidate: &str) -> Result<bool> {
        let candidate = division.team_id(candidate)?;
        let ceiling = division.team(candidate).ceiling();
        let members = self
            .teams
            .iter()
            .map(|name| division.team_id(name))
            .collect::<Result<Vec<_>>>()?;
        if members.is_empty() || members.contains(&candidate) {
            return Ok(false);
        }

        match self.kind {
            EliminationKind::Trivial => Ok(members
                .iter()
                .any(|&id| u64::from(division.team(id).wins) > ceiling)),
            EliminationKind::Flow => {
                let wins: u64 = members
                    .iter()
                    .map(|&id| u64::from(division.team(id).wins))
                    .sum();
                let total = wins + division.games_among(&members);
                Ok(total > members.len() as u64 * ceiling)
            }
        }
    }
}

impl fmt::Display for Certificate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{ ")?;
        for team in self.iter() {
            write!(f, "{team} ")?;
        }
        write!(f, "}}")
    }
}

/// Outcome of one elimination query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub team: String,
    pub certificate: Option<Certificate>,
}

impl Verdict {
    pub fn is_eliminated(&self) -> bool {
        self.certificate.is_some()
    }
}

/// Answers elimination queries against a borrowed division. Every query
/// builds and discards its own flow network.
#[derive(Debug, Clone, Copy)]
pub struct EliminationOracle<'a> {
    division: &'a Division,
}

impl<'a> EliminationOracle<'a> {
    pub fn new(division: &'a Division) -> Self {
        EliminationOracle { division }
    }

    pub fn division(&self) -> &'a Division {
        self.division
    }

    pub fn is_eliminated(&self, team: &str) -> Result<bool> {
        let id = self.division.team_id(team)?;
        if self.is_trivially_eliminated(id) {
            return Ok(true);
        }
        let (network, _) = self.solve(id)?;
        Ok(!network.source_saturated())
    }

    pub fn certificate(&self, team: &str) -> Result<Option<Certificate>> {
        let id = self.division.team_id(team)?;
        self.certificate_for(id)
    }

    pub fn evaluate(&self, team: &str) -> Result<Verdict> {
        let id = self.division.team_id(team)?;
        Ok(Verdict {
            team: self.division.team(id).name.clone(),
            certificate: self.certificate_for(id)?,
        })
    }

    /// # Panics
    ///
    /// If `id` was not issued by this oracle's division.
    pub fn is_trivially_eliminated(&self, id: TeamId) -> bool {
        let leader = self.division.team(self.division.leader());
        self.division.team(id).ceiling() < u64::from(leader.wins)
    }

    pub fn certificate_for(&self, id: TeamId) -> Result<Option<Certificate>> {
        let id = self.division.check(id)?;
        if self.is_trivially_eliminated(id) {
            debug!(
                team = %self.division.team(id).name,
                leader = self.division.leader_name(),
                "trivially eliminated"
            );
            return Ok(Some(Certificate {
                kind: EliminationKind::Trivial,
                teams: vec![self.division.leader_name().to_string()],
            }));
        }

        let (network, flow) = self.solve(id)?;
        if network.source_saturated() {
            return Ok(None);
        }

        let teams = network
            .team_vertices()
            .filter(|&(_, vertex)| flow.in_cut(vertex))
            .map(|(team, _)| self.division.team(team).name.clone())
            .collect::<Vec<_>>();
        debug!(
            team = %self.division.team(id).name,
            max_flow = flow.value(),
            expected = network.expected_flow,
            certificate = teams.len(),
            "eliminated by flow"
        );
        Ok(Some(Certificate {
            kind: EliminationKind::Flow,
            teams,
        }))
    }

    /// Builds the candidate's network and runs max flow on it.
    pub fn solve(&self, id: TeamId) -> Result<(EliminationNetwork, FordFulkerson)> {
        let id = self.division.check(id)?;
        let mut network = EliminationNetwork::build(self.division, id);
        let flow = FordFulkerson::run(&mut network.network, network.source, network.sink)?;
        Ok((network, flow))
    }
}
