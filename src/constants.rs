/// Points awarded to the winner of a league match
pub const POINTS_FOR_WIN: u32 = 2;

/// Legal deliveries in one over
pub const BALLS_PER_OVER: u32 = 6;

/// Resolution of the continuous chase-overs search, in decimal overs
pub const OVERS_PRECISION: f64 = 0.01;

/// Two net rates closer than this are treated as tied
pub const RATE_EPSILON: f64 = 1e-9;

/// Largest innings total the validator accepts
pub const MAX_MATCH_RUNS: u32 = 1_000;

/// Length of a T20 innings
pub const DEFAULT_MATCH_OVERS: f64 = 20.0;

/// Allowed drift between a stored net rate and the one recomputed from totals
pub const NRR_TOLERANCE: f64 = 0.01;
