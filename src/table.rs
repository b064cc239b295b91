use log::{debug, warn};
use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::constants::{NRR_TOLERANCE, POINTS_FOR_WIN};
use crate::error::TableError;
use crate::overs::is_valid_mixed_radix;
use crate::team::{Team, Totals};

/// Handle to a team in a [`PointsTable`].
///
/// Only meaningful for the table that issued it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TeamId(usize);

impl TeamId {
    /// Position of the team in the table's input order
    pub fn index(self) -> usize {
        self.0
    }
}

/// Immutable league table the solver reads from.
///
/// Teams keep the order they were supplied in; that order breaks exact
/// ties in the standings.
#[derive(Clone, Debug)]
pub struct PointsTable {
    teams: Vec<Team>,
    points_for_win: u32,
}

impl PointsTable {
    pub fn new(teams: Vec<Team>) -> Result<Self, TableError> {
        if teams.is_empty() {
            return Err(TableError::Empty);
        }

        for (i, team) in teams.iter().enumerate() {
            let totals = &team.totals;
            for value in [totals.overs_for, totals.overs_against] {
                if !is_valid_mixed_radix(value) || value == 0.0 {
                    return Err(TableError::InvalidOvers {
                        team: team.name.clone(),
                        value,
                    });
                }
            }
            if teams[..i]
                .iter()
                .any(|other| other.name.trim().eq_ignore_ascii_case(team.name.trim()))
            {
                return Err(TableError::DuplicateTeam(team.name.clone()));
            }

            let computed = team.computed_net_run_rate();
            if (computed - team.net_run_rate).abs() > NRR_TOLERANCE {
                warn!(
                    "{}: published net run rate {:.3} differs from totals ({:.3})",
                    team.name, team.net_run_rate, computed
                );
            }
        }

        Ok(PointsTable {
            teams,
            points_for_win: POINTS_FOR_WIN,
        })
    }

    /// Read a table from a CSV file.
    /// Format: header line, then
    /// name,played,won,lost,points,net_run_rate,runs_for,overs_for,runs_against,overs_against
    pub fn read_from_file(filepath: impl AsRef<Path>) -> Result<Self, TableError> {
        let path = filepath.as_ref();
        let text = fs::read_to_string(path)?;
        let table = Self::from_csv_str(&text)?;
        debug!("loaded {} teams from {}", table.len(), path.display());
        Ok(table)
    }

    /// Parse a table from CSV text; see [`PointsTable::read_from_file`].
    pub fn from_csv_str(text: &str) -> Result<Self, TableError> {
        let mut teams = Vec::new();

        // First non-blank line is the header
        let rows = text
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .skip(1);

        for (index, line) in rows {
            teams.push(parse_row(index + 1, line)?);
        }

        Self::new(teams)
    }

    /// Override the points a win is worth.
    pub fn with_points_for_win(mut self, points: u32) -> Self {
        self.points_for_win = points;
        self
    }

    pub fn points_for_win(&self) -> u32 {
        self.points_for_win
    }

    /// Look up a team by name, ignoring case and surrounding whitespace.
    pub fn id_of(&self, name: &str) -> Option<TeamId> {
        let name = name.trim();
        self.teams
            .iter()
            .position(|team| team.name.trim().eq_ignore_ascii_case(name))
            .map(TeamId)
    }

    pub fn team(&self, id: TeamId) -> &Team {
        &self.teams[id.0]
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn ids(&self) -> impl Iterator<Item = TeamId> + '_ {
        (0..self.teams.len()).map(TeamId)
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }
}

fn parse_row(line_no: usize, line: &str) -> Result<Team, TableError> {
    let parts: Vec<&str> = line.split(',').map(str::trim).collect();
    if parts.len() != 10 {
        return Err(TableError::Parse {
            line: line_no,
            reason: format!("expected 10 columns, found {}", parts.len()),
        });
    }

    let name = parts[0];
    if name.is_empty() {
        return Err(TableError::Parse {
            line: line_no,
            reason: "missing team name".to_string(),
        });
    }

    Ok(Team::new(
        name,
        field(line_no, "played", parts[1])?,
        field(line_no, "won", parts[2])?,
        field(line_no, "lost", parts[3])?,
        field(line_no, "points", parts[4])?,
        field(line_no, "net_run_rate", parts[5])?,
        Totals::new(
            field(line_no, "runs_for", parts[6])?,
            field(line_no, "overs_for", parts[7])?,
            field(line_no, "runs_against", parts[8])?,
            field(line_no, "overs_against", parts[9])?,
        ),
    ))
}

fn field<T>(line_no: usize, column: &str, raw: &str) -> Result<T, TableError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse().map_err(|e| TableError::Parse {
        line: line_no,
        reason: format!("invalid {} '{}': {}", column, raw, e),
    })
}
