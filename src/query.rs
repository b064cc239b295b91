use log::debug;
use std::fmt;
use std::str::FromStr;

use crate::constants::MAX_MATCH_RUNS;
use crate::error::QueryError;
use crate::overs::is_valid_mixed_radix;
use crate::table::{PointsTable, TeamId};

/// Shape of the hypothetical match from the acting team's side.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scenario {
    /// Acting team posted `runs_scored` in the full overs; the opponent's
    /// reply is the free variable.
    BattingFirst { runs_scored: u32 },
    /// Opponent posted `runs_conceded` in the full overs; the overs the
    /// acting team takes to chase `runs_conceded + 1` are the free variable.
    BowlingFirst { runs_conceded: u32 },
}

impl Scenario {
    pub fn kind(&self) -> ScenarioKind {
        match self {
            Scenario::BattingFirst { .. } => ScenarioKind::BattingFirst,
            Scenario::BowlingFirst { .. } => ScenarioKind::BowlingFirst,
        }
    }
}

/// Scenario tag without its runs figure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScenarioKind {
    BattingFirst,
    BowlingFirst,
}

impl ScenarioKind {
    pub fn with_runs(self, runs: u32) -> Scenario {
        match self {
            ScenarioKind::BattingFirst => Scenario::BattingFirst { runs_scored: runs },
            ScenarioKind::BowlingFirst => Scenario::BowlingFirst { runs_conceded: runs },
        }
    }
}

impl FromStr for ScenarioKind {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bat" | "batting" | "batting-first" | "batting_first" => Ok(ScenarioKind::BattingFirst),
            "bowl" | "bowling" | "bowling-first" | "bowling_first" => Ok(ScenarioKind::BowlingFirst),
            _ => Err(QueryError::UnknownScenario(s.to_string())),
        }
    }
}

impl fmt::Display for ScenarioKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScenarioKind::BattingFirst => write!(f, "batting-first"),
            ScenarioKind::BowlingFirst => write!(f, "bowling-first"),
        }
    }
}

/// A validated solver input. Build one with [`QueryRequest::validate`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Query {
    pub team: TeamId,
    pub opponent: TeamId,
    /// Innings length in mixed-radix overs
    pub match_overs: f64,
    /// 1-based position the acting team must finish in
    pub desired_rank: usize,
    pub scenario: Scenario,
}

/// Raw caller input, as typed on a command line or passed from Python.
#[derive(Clone, Debug, PartialEq)]
pub struct QueryRequest {
    pub team: String,
    pub opponent: String,
    pub match_overs: f64,
    pub desired_rank: usize,
    pub scenario: String,
    pub runs: i64,
}

impl QueryRequest {
    /// Check the request against `table` and resolve team names.
    pub fn validate(&self, table: &PointsTable) -> Result<Query, QueryError> {
        let team = table
            .id_of(&self.team)
            .ok_or_else(|| QueryError::UnknownTeam(self.team.clone()))?;
        let opponent = table
            .id_of(&self.opponent)
            .ok_or_else(|| QueryError::UnknownTeam(self.opponent.clone()))?;
        if team == opponent {
            return Err(QueryError::SameTeam(self.team.clone()));
        }

        if self.match_overs.is_nan() || self.match_overs <= 0.0 {
            return Err(QueryError::NonPositiveOvers(self.match_overs));
        }
        if !is_valid_mixed_radix(self.match_overs) {
            return Err(QueryError::InvalidOvers(self.match_overs));
        }

        let runs = u32::try_from(self.runs).map_err(|_| {
            if self.runs < 0 {
                QueryError::NegativeRuns(self.runs)
            } else {
                QueryError::RunsOutOfRange(self.runs)
            }
        })?;
        if runs > MAX_MATCH_RUNS {
            return Err(QueryError::RunsOutOfRange(self.runs));
        }

        if self.desired_rank == 0 || self.desired_rank > table.len() {
            return Err(QueryError::RankOutOfRange {
                rank: self.desired_rank,
                teams: table.len(),
            });
        }

        let kind: ScenarioKind = self.scenario.parse()?;

        let query = Query {
            team,
            opponent,
            match_overs: self.match_overs,
            desired_rank: self.desired_rank,
            scenario: kind.with_runs(runs),
        };
        debug!(
            "validated query: {} vs {}, {} overs, position {}, {:?}",
            table.team(team).name,
            table.team(opponent).name,
            self.match_overs,
            self.desired_rank,
            query.scenario
        );
        Ok(query)
    }
}
