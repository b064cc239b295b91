use pyo3::exceptions::{PyIOError, PyKeyError, PyValueError};
use pyo3::prelude::*;

use crate::constants::POINTS_FOR_WIN;
use crate::error::{QueryError, TableError};
use crate::query::{Query, QueryRequest};
use crate::report;
use crate::solver::{self, Solution, Strategy};
use crate::standings::current_standings;
use crate::table::PointsTable;

impl From<QueryError> for PyErr {
    fn from(err: QueryError) -> Self {
        match err {
            QueryError::UnknownTeam(_) => PyKeyError::new_err(err.to_string()),
            _ => PyValueError::new_err(err.to_string()),
        }
    }
}

impl From<TableError> for PyErr {
    fn from(err: TableError) -> Self {
        match err {
            TableError::Io(_) => PyIOError::new_err(err.to_string()),
            _ => PyValueError::new_err(err.to_string()),
        }
    }
}

/// Points table exposed to Python.
#[pyclass(name = "PointsTable")]
#[derive(Clone)]
pub struct PyPointsTable {
    inner: PointsTable,
}

#[pymethods]
impl PyPointsTable {
    /// Build a table from CSV text.
    #[new]
    #[pyo3(signature = (csv_text, points_for_win = POINTS_FOR_WIN))]
    pub fn new(csv_text: &str, points_for_win: u32) -> PyResult<Self> {
        let inner = PointsTable::from_csv_str(csv_text)?.with_points_for_win(points_for_win);
        Ok(PyPointsTable { inner })
    }

    /// Read a table from a CSV file.
    #[staticmethod]
    #[pyo3(signature = (filepath, points_for_win = POINTS_FOR_WIN))]
    pub fn read_from_file(filepath: &str, points_for_win: u32) -> PyResult<Self> {
        let inner = PointsTable::read_from_file(filepath)?.with_points_for_win(points_for_win);
        Ok(PyPointsTable { inner })
    }

    pub fn team_names(&self) -> Vec<String> {
        self.inner.teams().iter().map(|t| t.name.clone()).collect()
    }

    /// Current standings as (name, points, net_run_rate) tuples.
    pub fn standings(&self) -> Vec<(String, u32, f64)> {
        current_standings(&self.inner)
            .into_iter()
            .map(|row| (self.inner.team(row.team).name.clone(), row.points, row.net_run_rate))
            .collect()
    }

    fn __len__(&self) -> usize {
        self.inner.len()
    }

    fn __str__(&self) -> String {
        report::render_current(&self.inner)
    }

    fn __repr__(&self) -> String {
        format!("PointsTable({} teams)", self.inner.len())
    }
}

/// A feasible range. Runs fields are set for batting-first results, overs
/// fields for bowling-first ones.
#[pyclass(name = "RangeResult")]
#[derive(Clone, Debug)]
pub struct PyRangeResult {
    #[pyo3(get)]
    pub scenario: String,

    #[pyo3(get)]
    pub min_runs: Option<u32>,
    #[pyo3(get)]
    pub max_runs: Option<u32>,

    /// Mixed-radix overs
    #[pyo3(get)]
    pub min_overs: Option<f64>,
    #[pyo3(get)]
    pub max_overs: Option<f64>,

    #[pyo3(get)]
    pub min_decimal_overs: Option<f64>,
    #[pyo3(get)]
    pub max_decimal_overs: Option<f64>,

    #[pyo3(get)]
    pub own_rate_at_min: f64,
    #[pyo3(get)]
    pub own_rate_at_max: f64,
    #[pyo3(get)]
    pub opponent_rate_at_min: f64,
    #[pyo3(get)]
    pub opponent_rate_at_max: f64,
}

impl From<Solution> for PyRangeResult {
    fn from(solution: Solution) -> Self {
        let scenario = solution.kind().to_string();
        match solution {
            Solution::Restrict(range) => PyRangeResult {
                scenario,
                min_runs: Some(range.min.value),
                max_runs: Some(range.max.value),
                min_overs: None,
                max_overs: None,
                min_decimal_overs: None,
                max_decimal_overs: None,
                own_rate_at_min: range.min.own_rate,
                own_rate_at_max: range.max.own_rate,
                opponent_rate_at_min: range.min.opponent_rate,
                opponent_rate_at_max: range.max.opponent_rate,
            },
            Solution::Chase(range) => PyRangeResult {
                scenario,
                min_runs: None,
                max_runs: None,
                min_overs: Some(range.min.value.mixed),
                max_overs: Some(range.max.value.mixed),
                min_decimal_overs: Some(range.min.value.decimal),
                max_decimal_overs: Some(range.max.value.decimal),
                own_rate_at_min: range.min.own_rate,
                own_rate_at_max: range.max.own_rate,
                opponent_rate_at_min: range.min.opponent_rate,
                opponent_rate_at_max: range.max.opponent_rate,
            },
        }
    }
}

#[pymethods]
impl PyRangeResult {
    fn __repr__(&self) -> String {
        match (self.min_runs, self.max_runs) {
            (Some(lo), Some(hi)) => format!(
                "RangeResult({}, runs={}..={}, nrr={:.3}..{:.3})",
                self.scenario, lo, hi, self.own_rate_at_max, self.own_rate_at_min
            ),
            _ => format!(
                "RangeResult({}, overs={:.1}..={:.1}, nrr={:.3}..{:.3})",
                self.scenario,
                self.min_overs.unwrap_or_default(),
                self.max_overs.unwrap_or_default(),
                self.own_rate_at_max,
                self.own_rate_at_min
            ),
        }
    }
}

fn validated(
    table: &PyPointsTable,
    team: &str,
    opponent: &str,
    match_overs: f64,
    desired_rank: usize,
    scenario: &str,
    runs: i64,
) -> PyResult<Query> {
    let request = QueryRequest {
        team: team.to_string(),
        opponent: opponent.to_string(),
        match_overs,
        desired_rank,
        scenario: scenario.to_string(),
        runs,
    };
    Ok(request.validate(&table.inner)?)
}

/// Range of outcomes that leaves `team` exactly at `desired_rank`.
///
/// Returns None when no outcome of the match achieves it.
#[pyfunction]
#[pyo3(name = "solve")]
#[pyo3(signature = (table, team, opponent, match_overs, desired_rank, scenario, runs, strategy = "live"))]
#[allow(clippy::too_many_arguments)]
pub fn py_solve(
    table: &PyPointsTable,
    team: &str,
    opponent: &str,
    match_overs: f64,
    desired_rank: usize,
    scenario: &str,
    runs: i64,
    strategy: &str,
) -> PyResult<Option<PyRangeResult>> {
    let strategy: Strategy = strategy.parse()?;
    let query = validated(table, team, opponent, match_overs, desired_rank, scenario, runs)?;
    Ok(solver::solve_with(&table.inner, &query, strategy).map(PyRangeResult::from))
}

/// Position reached with the most emphatic win the scenario allows.
#[pyfunction]
#[pyo3(name = "best_achievable_rank")]
#[pyo3(signature = (table, team, opponent, match_overs, scenario, runs))]
pub fn py_best_achievable_rank(
    table: &PyPointsTable,
    team: &str,
    opponent: &str,
    match_overs: f64,
    scenario: &str,
    runs: i64,
) -> PyResult<usize> {
    let query = validated(table, team, opponent, match_overs, 1, scenario, runs)?;
    Ok(solver::best_achievable_rank(&table.inner, &query))
}

/// Solve and describe the result in plain English.
#[pyfunction]
#[pyo3(name = "render")]
#[pyo3(signature = (table, team, opponent, match_overs, desired_rank, scenario, runs, strategy = "live"))]
#[allow(clippy::too_many_arguments)]
pub fn py_render(
    table: &PyPointsTable,
    team: &str,
    opponent: &str,
    match_overs: f64,
    desired_rank: usize,
    scenario: &str,
    runs: i64,
    strategy: &str,
) -> PyResult<String> {
    let strategy: Strategy = strategy.parse()?;
    let query = validated(table, team, opponent, match_overs, desired_rank, scenario, runs)?;
    let solution = solver::solve_with(&table.inner, &query, strategy);
    Ok(report::render(&table.inner, &query, solution.as_ref()))
}

#[pyfunction]
#[pyo3(name = "to_decimal_overs")]
pub fn py_to_decimal_overs(overs: f64) -> PyResult<f64> {
    if !crate::overs::is_valid_mixed_radix(overs) {
        return Err(QueryError::InvalidOvers(overs).into());
    }
    Ok(crate::overs::to_decimal_overs(overs))
}

#[pyfunction]
#[pyo3(name = "to_mixed_radix_overs")]
pub fn py_to_mixed_radix_overs(decimal: f64) -> f64 {
    crate::overs::to_mixed_radix_overs(decimal)
}
