use thiserror::Error;

/// Failures while loading a points table.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("failed to read points table: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error("team '{0}' appears more than once")]
    DuplicateTeam(String),

    #[error("team '{team}' has invalid overs figure {value}")]
    InvalidOvers { team: String, value: f64 },

    #[error("points table has no teams")]
    Empty,
}

/// Caller input rejected before it reaches the solver.
#[derive(Debug, Error, PartialEq)]
pub enum QueryError {
    #[error("unknown team '{0}'")]
    UnknownTeam(String),

    #[error("a team cannot play itself ('{0}')")]
    SameTeam(String),

    #[error("match overs must be positive, got {0}")]
    NonPositiveOvers(f64),

    #[error("invalid overs figure {0}: balls must be 0-5")]
    InvalidOvers(f64),

    #[error("runs cannot be negative, got {0}")]
    NegativeRuns(i64),

    #[error("runs figure {0} exceeds the {max} run limit", max = crate::constants::MAX_MATCH_RUNS)]
    RunsOutOfRange(i64),

    #[error("desired position {rank} is outside 1..={teams}")]
    RankOutOfRange { rank: usize, teams: usize },

    #[error("unknown scenario '{0}', expected 'bat' or 'bowl'")]
    UnknownScenario(String),

    #[error("unknown strategy '{0}', expected 'live' or 'threshold'")]
    UnknownStrategy(String),
}
