use crate::division::{Division, Team};
use crate::elimination::oracle::{Certificate, EliminationOracle};
use crate::error::{EliminationError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamStanding {
    #[serde(flatten)]
    pub team: Team,
    pub eliminated: bool,
    pub certificate: Option<Certificate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EliminationReport {
    pub leader: String,
    pub standings: Vec<TeamStanding>,
}

impl EliminationReport {
    /// Evaluates every team in load order.
    pub fn compute(division: &Division) -> Result<Self> {
        let oracle = EliminationOracle::new(division);
        let standings = division
            .team_ids()
            .map(|id| {
                let certificate = oracle.certificate_for(id)?;
                Ok(TeamStanding {
                    team: division.team(id).clone(),
                    eliminated: certificate.is_some(),
                    certificate,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(EliminationReport {
            leader: division.leader_name().to_string(),
            standings,
        })
    }

    /// Restricts the report to the named team.
    pub fn for_team(division: &Division, name: &str) -> Result<Self> {
        let verdict = division.oracle().evaluate(name)?;
        let team = division.team(division.team_id(name)?).clone();
        Ok(EliminationReport {
            leader: division.leader_name().to_string(),
            standings: vec![TeamStanding {
                team,
                eliminated: verdict.is_eliminated(),
                certificate: verdict.certificate,
            }],
        })
    }

    pub fn eliminated(&self) -> impl Iterator<Item = &TeamStanding> + '_ {
        self.standings.iter().filter(|standing| standing.eliminated)
    }

    pub fn retain_eliminated(&mut self) {
        self.standings.retain(|standing| standing.eliminated);
    }

    /// Names of teams whose certificate fails independent verification.
    pub fn unverified(&self, division: &Division) -> Result<Vec<String>> {
        let mut failed = Vec::new();
        for standing in &self.standings {
            if let Some(certificate) = &standing.certificate {
                if !certificate.verify(division, &standing.team.name)? {
                    failed.push(standing.team.name.clone());
                }
            }
        }
        Ok(failed)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|err| EliminationError::Snapshot(format!("serialize report: {err}")))
    }
}

impl fmt::Display for EliminationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for standing in &self.standings {
            match &standing.certificate {
                Some(certificate) => writeln!(
                    f,
                    "{} is eliminated by the subset R = {}",
                    standing.team.name, certificate
                )?,
                None => writeln!(f, "{} is not eliminated", standing.team.name)?,
            }
        }
        Ok(())
    }
}
