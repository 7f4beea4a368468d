use crate::division::{Division, Team};
use crate::error::Result;
use rand::Rng;
use serde::{Deserialize, Serialize};

pub const SCHEDULE_PROBABILITY: f64 = 0.7;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DivisionParameters {
    pub teams: usize,
    pub max_games_per_pair: u32,
    pub max_outside_games: u32,
    pub schedule_probability: f64,
    pub division_games: u64,
}

impl DivisionParameters {
    pub fn new(teams: usize) -> Self {
        DivisionParameters {
            teams,
            max_games_per_pair: 6,
            max_outside_games: 4,
            schedule_probability: SCHEDULE_PROBABILITY,
            division_games: 0,
        }
    }
}

/// Random league with a symmetric schedule. Each team's remaining count is
/// its in-division games plus a few games against outside opponents.
pub fn generate_division(
    teams: usize,
    rng: &mut impl Rng,
) -> Result<(Division, DivisionParameters)> {
    let params = DivisionParameters::new(teams);
    generate_with(params, rng)
}

pub fn generate_with(
    mut params: DivisionParameters,
    rng: &mut impl Rng,
) -> Result<(Division, DivisionParameters)> {
    let n = params.teams;
    let mut games = vec![vec![0u32; n]; n];
    let mut division_games = 0u64;

    for i in 0..n {
        for j in (i + 1)..n {
            if rng.random::<f64>() < params.schedule_probability {
                let count = rng.random_range(1..=params.max_games_per_pair.max(1));
                games[i][j] = count;
                games[j][i] = count;
                division_games += u64::from(count);
            }
        }
    }

    let roster = games
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let scheduled: u32 = row.iter().sum();
            let remaining = scheduled + rng.random_range(0..=params.max_outside_games);
            let wins = rng.random_range(50..=90);
            let losses = rng.random_range(50..=90);
            Team::new(format!("Team_{i:02}"), wins, losses, remaining)
        })
        .collect::<Vec<_>>();

    params.division_games = division_games;
    let division = Division::new(roster, games)?;
    Ok((division, params))
}
