use crate::division::{Division, Team};
use crate::error::{EliminationError, Result};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use std::str::FromStr;

struct Tokens<'a> {
    inner: Box<dyn Iterator<Item = (usize, &'a str)> + 'a>,
    line: usize,
}

impl<'a> Tokens<'a> {
    fn new(source: &'a str) -> Self {
        let inner = source
            .lines()
            .enumerate()
            .flat_map(|(line, text)| text.split_whitespace().map(move |token| (line + 1, token)));
        Tokens {
            inner: Box::new(inner),
            line: 0,
        }
    }

    fn next_token(&mut self, what: &str) -> Result<&'a str> {
        match self.inner.next() {
            Some((line, token)) => {
                self.line = line;
                Ok(token)
            }
            None => Err(EliminationError::malformed_at(
                self.line.max(1),
                format!("unexpected end of input, expected {what}"),
            )),
        }
    }

    fn next_number<T: FromStr>(&mut self, what: &str) -> Result<T> {
        let token = self.next_token(what)?;
        token.parse().map_err(|_| {
            EliminationError::malformed_at(
                self.line,
                format!("expected non-negative integer for {what}, found '{token}'"),
            )
        })
    }
}

/// Parses a division from the whitespace-delimited league format: the team
/// count, then per team its name, wins, losses, remaining games and one
/// remaining-games entry against every team in declaration order.
pub fn parse_division(source: &str) -> Result<Division> {
    let mut tokens = Tokens::new(source);
    let n: usize = tokens.next_number("team count")?;
    if n == 0 {
        return Err(EliminationError::malformed_at(1, "team count must be positive"));
    }

    // The declared count is untrusted until its records have been read.
    let mut teams = Vec::new();
    let mut games = Vec::new();
    for i in 0..n {
        let name = tokens.next_token(&format!("name of team {}", i + 1))?;
        let wins = tokens.next_number(&format!("wins of '{name}'"))?;
        let losses = tokens.next_number(&format!("losses of '{name}'"))?;
        let remaining = tokens.next_number(&format!("remaining games of '{name}'"))?;
        let row = (0..n)
            .map(|_| tokens.next_number(&format!("schedule row of '{name}'")))
            .collect::<Result<Vec<u32>>>()?;
        teams.push(Team::new(name, wins, losses, remaining));
        games.push(row);
    }

    if let Some((line, token)) = tokens.inner.next() {
        return Err(EliminationError::malformed_at(
            line,
            format!("unexpected trailing token '{token}' after {n} teams"),
        ));
    }

    Division::new(teams, games)
}

pub fn read_division<P: AsRef<Path>>(path: P) -> Result<Division> {
    let source = fs::read_to_string(path)?;
    parse_division(&source)
}

/// Renders a division back into the league format read by `parse_division`.
pub fn write_division(division: &Division) -> String {
    let width = division.team_names().map(str::len).max().unwrap_or(0);
    let mut out = String::new();
    let _ = writeln!(out, "{}", division.team_count());
    for a in division.team_ids() {
        let team = division.team(a);
        let _ = write!(
            out,
            "{:<width$} {:>4} {:>4} {:>4}  ",
            team.name, team.wins, team.losses, team.remaining
        );
        let row = division
            .team_ids()
            .map(|b| division.games_between(a, b).to_string())
            .collect::<Vec<_>>()
            .join(" ");
        let _ = writeln!(out, "{row}");
    }
    out
}
