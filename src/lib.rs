//! NRR Core - qualification ranges for cricket league tables.
//!
//! Given a points table and one upcoming match, works out how heavily a
//! team has to win to finish in an exact position, re-ranking the table on
//! net run rate for every candidate result. Python bindings are available
//! with the `python` feature.

#[cfg(feature = "python")]
use pyo3::prelude::*;

pub mod constants;
pub mod error;
pub mod net_rate;
pub mod overs;
pub mod query;
pub mod report;
pub mod solver;
pub mod standings;
pub mod table;
pub mod team;

#[cfg(feature = "python")]
pub mod python;

pub use constants::{
    BALLS_PER_OVER, DEFAULT_MATCH_OVERS, MAX_MATCH_RUNS, NRR_TOLERANCE, OVERS_PRECISION, POINTS_FOR_WIN,
    RATE_EPSILON,
};
pub use error::{QueryError, TableError};
pub use net_rate::{net_run_rate, projected_net_run_rate, MatchLine};
pub use overs::{is_valid_mixed_radix, to_decimal_overs, to_mixed_radix_overs, Overs};
pub use query::{Query, QueryRequest, Scenario, ScenarioKind};
pub use solver::{
    best_achievable_rank, evaluate, solve, solve_batch, solve_every_rank, solve_with, Boundary,
    Evaluation, Outcome, ResultRange, Solution, Strategy,
};
pub use standings::{current_standings, resolve, Resolution, Standing};
pub use table::{PointsTable, TeamId};
pub use team::{Team, Totals};

/// Python module definition
#[cfg(feature = "python")]
#[pymodule]
fn nrr_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Classes
    m.add_class::<python::PyPointsTable>()?;
    m.add_class::<python::PyRangeResult>()?;

    // Solver
    m.add_function(wrap_pyfunction!(python::py_solve, m)?)?;
    m.add_function(wrap_pyfunction!(python::py_best_achievable_rank, m)?)?;
    m.add_function(wrap_pyfunction!(python::py_render, m)?)?;

    // Overs conversion
    m.add_function(wrap_pyfunction!(python::py_to_decimal_overs, m)?)?;
    m.add_function(wrap_pyfunction!(python::py_to_mixed_radix_overs, m)?)?;

    // Constants
    m.add("POINTS_FOR_WIN", POINTS_FOR_WIN)?;
    m.add("BALLS_PER_OVER", BALLS_PER_OVER)?;
    m.add("OVERS_PRECISION", OVERS_PRECISION)?;
    m.add("DEFAULT_MATCH_OVERS", DEFAULT_MATCH_OVERS)?;
    m.add("MAX_MATCH_RUNS", MAX_MATCH_RUNS)?;

    Ok(())
}
