//! Dual-phase range search.
//!
//! For one hypothetical win, find every value of the free match variable
//! (runs the opponent is held to, or overs taken to chase) that leaves the
//! acting team in exactly the requested position.
//!
//! Rank only gets worse as the free variable grows, so each scenario runs
//! two monotonic binary searches: Phase 1 finds the worst value that still
//! reaches the position or better, Phase 2 searches below it for the best
//! value that does not overshoot into a higher position.

use rayon::prelude::*;
use std::str::FromStr;

use crate::constants::{BALLS_PER_OVER, OVERS_PRECISION, RATE_EPSILON};
use crate::error::QueryError;
use crate::net_rate::{projected_net_run_rate, MatchLine};
use crate::overs::{to_decimal_overs, Overs};
use crate::query::{Query, Scenario, ScenarioKind};
use crate::standings::{current_standings, resolve, Resolution};
use crate::table::PointsTable;

/// How a candidate result is judged against the desired position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Strategy {
    /// Re-rank the whole table with both teams' new rates and require the
    /// exact position.
    #[default]
    LiveStandings,
    /// Beat the rate currently held by the team at the desired position.
    /// Ignores the opponent's own rate movement, and has no lower bound.
    StaticThreshold,
}

impl FromStr for Strategy {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "live" | "dynamic" => Ok(Strategy::LiveStandings),
            "threshold" | "static" => Ok(Strategy::StaticThreshold),
            _ => Err(QueryError::UnknownStrategy(s.to_string())),
        }
    }
}

/// One end of an admissible range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Boundary<T> {
    pub value: T,
    /// Acting team's net run rate at this value
    pub own_rate: f64,
    /// Opponent's net run rate at this value
    pub opponent_rate: f64,
}

/// Inclusive range of the free variable.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResultRange<T> {
    pub min: Boundary<T>,
    pub max: Boundary<T>,
}

impl<T> ResultRange<T> {
    /// Acting team's rates across the range as (lowest, highest).
    pub fn own_rate_range(&self) -> (f64, f64) {
        ordered(self.min.own_rate, self.max.own_rate)
    }

    /// Opponent's rates across the range as (lowest, highest).
    pub fn opponent_rate_range(&self) -> (f64, f64) {
        ordered(self.min.opponent_rate, self.max.opponent_rate)
    }
}

fn ordered(a: f64, b: f64) -> (f64, f64) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// A feasible answer for one query.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Solution {
    /// Batting first: runs the opponent must be held to.
    Restrict(ResultRange<u32>),
    /// Bowling first: overs within which the target must be reached.
    Chase(ResultRange<Overs>),
}

impl Solution {
    pub fn kind(&self) -> ScenarioKind {
        match self {
            Solution::Restrict(_) => ScenarioKind::BattingFirst,
            Solution::Chase(_) => ScenarioKind::BowlingFirst,
        }
    }
}

/// A single value of the free variable.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Outcome {
    /// Runs the opponent scores in reply (batting first)
    Conceded(u32),
    /// Decimal overs used to reach the target (bowling first)
    ChaseOvers(f64),
}

/// Both teams' projected rates and the resulting standings for one outcome.
#[derive(Clone, Debug, PartialEq)]
pub struct Evaluation {
    pub own_rate: f64,
    pub opponent_rate: f64,
    pub resolution: Resolution,
}

impl Evaluation {
    pub fn rank(&self) -> usize {
        self.resolution.rank
    }
}

struct Projector<'a> {
    table: &'a PointsTable,
    query: &'a Query,
    match_overs: f64,
}

impl<'a> Projector<'a> {
    fn new(table: &'a PointsTable, query: &'a Query) -> Self {
        Projector {
            table,
            query,
            match_overs: to_decimal_overs(query.match_overs),
        }
    }

    fn batting(&self, runs_scored: u32, conceded: u32) -> Evaluation {
        self.evaluate(MatchLine {
            runs_for: runs_scored,
            overs_for: self.match_overs,
            runs_against: conceded,
            overs_against: self.match_overs,
        })
    }

    fn bowling(&self, runs_conceded: u32, chase_overs: f64) -> Evaluation {
        self.evaluate(MatchLine {
            runs_for: runs_conceded.saturating_add(1),
            overs_for: chase_overs,
            runs_against: runs_conceded,
            overs_against: self.match_overs,
        })
    }

    fn evaluate(&self, line: MatchLine) -> Evaluation {
        let own_rate = projected_net_run_rate(self.table.team(self.query.team), &line);
        let opponent_rate =
            projected_net_run_rate(self.table.team(self.query.opponent), &line.reversed());
        let resolution = resolve(
            self.table,
            self.query.team,
            self.query.opponent,
            own_rate,
            opponent_rate,
        );
        Evaluation {
            own_rate,
            opponent_rate,
            resolution,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Phase {
    AtOrBetter,
    Exact,
}

struct Target {
    strategy: Strategy,
    desired_rank: usize,
    threshold: f64,
}

impl Target {
    fn new(table: &PointsTable, query: &Query, strategy: Strategy) -> Self {
        let threshold = match strategy {
            Strategy::LiveStandings => f64::NEG_INFINITY,
            Strategy::StaticThreshold => current_standings(table)
                .into_iter()
                .filter(|row| row.team != query.team)
                .nth(query.desired_rank - 1)
                .map(|row| row.net_run_rate)
                .unwrap_or(f64::NEG_INFINITY),
        };
        Target {
            strategy,
            desired_rank: query.desired_rank,
            threshold,
        }
    }

    /// A floating-point tie that could push the acting team across the
    /// desired position counts as a miss, which narrows the range.
    fn accepts(&self, eval: &Evaluation, phase: Phase) -> bool {
        match self.strategy {
            Strategy::LiveStandings => {
                let res = &eval.resolution;
                match phase {
                    Phase::AtOrBetter => {
                        res.rank < self.desired_rank
                            || (res.rank == self.desired_rank && !res.tied_below(RATE_EPSILON))
                    }
                    Phase::Exact => {
                        res.rank == self.desired_rank && !res.is_contested(RATE_EPSILON)
                    }
                }
            }
            Strategy::StaticThreshold => eval.own_rate - self.threshold > RATE_EPSILON,
        }
    }
}

/// Largest `x` in `[lo, hi]` with `pred(x)`, given `pred` holds on a prefix.
fn last_true_int(lo: u32, hi: u32, pred: impl Fn(u32) -> bool) -> Option<u32> {
    let (mut left, mut right) = (lo as i64, hi as i64);
    let mut best = None;
    while left <= right {
        let mid = left + (right - left) / 2;
        if pred(mid as u32) {
            best = Some(mid as u32);
            left = mid + 1;
        } else {
            right = mid - 1;
        }
    }
    best
}

/// Smallest `x` in `[lo, hi]` with `pred(x)`, given `pred` holds on a suffix.
fn first_true_int(lo: u32, hi: u32, pred: impl Fn(u32) -> bool) -> Option<u32> {
    let (mut left, mut right) = (lo as i64, hi as i64);
    let mut best = None;
    while left <= right {
        let mid = left + (right - left) / 2;
        if pred(mid as u32) {
            best = Some(mid as u32);
            right = mid - 1;
        } else {
            left = mid + 1;
        }
    }
    best
}

/// Continuous counterpart of [`last_true_int`], accurate to `precision`.
fn last_true_continuous(lo: f64, hi: f64, precision: f64, pred: impl Fn(f64) -> bool) -> Option<f64> {
    if !pred(lo) {
        return None;
    }
    if pred(hi) {
        return Some(hi);
    }
    let (mut left, mut right, mut best) = (lo, hi, lo);
    while right - left > precision {
        let mid = (left + right) / 2.0;
        if pred(mid) {
            best = mid;
            left = mid;
        } else {
            right = mid;
        }
    }
    Some(best)
}

/// Continuous counterpart of [`first_true_int`], accurate to `precision`.
fn first_true_continuous(lo: f64, hi: f64, precision: f64, pred: impl Fn(f64) -> bool) -> Option<f64> {
    if !pred(hi) {
        return None;
    }
    if pred(lo) {
        return Some(lo);
    }
    let (mut left, mut right, mut best) = (lo, hi, hi);
    while right - left > precision {
        let mid = (left + right) / 2.0;
        if pred(mid) {
            best = mid;
            right = mid;
        } else {
            left = mid;
        }
    }
    Some(best)
}

fn ball_overs(ball: u32) -> f64 {
    ball as f64 / BALLS_PER_OVER as f64
}

/// Move an approximate last-true boundary onto the largest whole ball in
/// `[lo_ball, hi_ball]` that satisfies `pred`.
fn last_true_ball(approx: f64, lo_ball: u32, hi_ball: u32, pred: impl Fn(f64) -> bool) -> Option<u32> {
    let start = (approx * BALLS_PER_OVER as f64 + 1e-9).floor().max(0.0) as u32;
    let mut ball = start.clamp(lo_ball, hi_ball);
    while ball < hi_ball && pred(ball_overs(ball + 1)) {
        ball += 1;
    }
    while !pred(ball_overs(ball)) {
        if ball == lo_ball {
            return None;
        }
        ball -= 1;
    }
    Some(ball)
}

/// Move an approximate first-true boundary onto the smallest whole ball in
/// `[lo_ball, hi_ball]` that satisfies `pred`.
fn first_true_ball(approx: f64, lo_ball: u32, hi_ball: u32, pred: impl Fn(f64) -> bool) -> Option<u32> {
    let start = (approx * BALLS_PER_OVER as f64 - 1e-9).ceil().max(0.0) as u32;
    let mut ball = start.clamp(lo_ball, hi_ball);
    while ball > lo_ball && pred(ball_overs(ball - 1)) {
        ball -= 1;
    }
    while !pred(ball_overs(ball)) {
        if ball == hi_ball {
            return None;
        }
        ball += 1;
    }
    Some(ball)
}

fn solve_batting(projector: &Projector, target: &Target, runs_scored: u32) -> Option<ResultRange<u32>> {
    // The opponent must finish at least one run short
    if runs_scored == 0 {
        return None;
    }
    let reaches = |x: u32| target.accepts(&projector.batting(runs_scored, x), Phase::AtOrBetter);
    if !reaches(0) {
        return None;
    }

    let worst = last_true_int(0, runs_scored - 1, reaches)?;
    let best = match target.strategy {
        Strategy::LiveStandings => first_true_int(0, worst, |x| {
            target.accepts(&projector.batting(runs_scored, x), Phase::Exact)
        })?,
        Strategy::StaticThreshold => 0,
    };

    let bound = |x: u32| {
        let eval = projector.batting(runs_scored, x);
        Boundary {
            value: x,
            own_rate: eval.own_rate,
            opponent_rate: eval.opponent_rate,
        }
    };
    Some(ResultRange {
        min: bound(best),
        max: bound(worst),
    })
}

/// The search runs in decimal overs to `OVERS_PRECISION`; both ends are then
/// settled on whole balls so the reported range only holds deliverable results.
fn solve_bowling(projector: &Projector, target: &Target, runs_conceded: u32) -> Option<ResultRange<Overs>> {
    let last_ball = Overs::from_mixed(projector.query.match_overs).balls();
    if last_ball == 0 {
        return None;
    }
    let (lo, hi) = (ball_overs(1), ball_overs(last_ball));
    let reaches = |t: f64| target.accepts(&projector.bowling(runs_conceded, t), Phase::AtOrBetter);
    let exact = |t: f64| target.accepts(&projector.bowling(runs_conceded, t), Phase::Exact);

    let worst = last_true_continuous(lo, hi, OVERS_PRECISION, reaches)?;
    let worst = last_true_ball(worst, 1, last_ball, reaches)?;
    let best = match target.strategy {
        Strategy::LiveStandings => {
            let approx = first_true_continuous(lo, ball_overs(worst), OVERS_PRECISION, exact)?;
            first_true_ball(approx, 1, worst, exact)?
        }
        Strategy::StaticThreshold => 1,
    };

    let bound = |ball: u32| {
        let eval = projector.bowling(runs_conceded, ball_overs(ball));
        Boundary {
            value: Overs::from_balls(ball),
            own_rate: eval.own_rate,
            opponent_rate: eval.opponent_rate,
        }
    };
    Some(ResultRange {
        min: bound(best),
        max: bound(worst),
    })
}

/// Solve a query by live re-ranking of the table.
///
/// # Returns
/// `None` when no outcome of the match leaves the acting team in exactly
/// the desired position.
pub fn solve(table: &PointsTable, query: &Query) -> Option<Solution> {
    solve_with(table, query, Strategy::LiveStandings)
}

/// Solve a query with an explicit [`Strategy`].
pub fn solve_with(table: &PointsTable, query: &Query, strategy: Strategy) -> Option<Solution> {
    let projector = Projector::new(table, query);
    let target = Target::new(table, query, strategy);
    match query.scenario {
        Scenario::BattingFirst { runs_scored } => {
            solve_batting(&projector, &target, runs_scored).map(Solution::Restrict)
        }
        Scenario::BowlingFirst { runs_conceded } => {
            solve_bowling(&projector, &target, runs_conceded).map(Solution::Chase)
        }
    }
}

/// Project a single outcome of the query's match.
///
/// Returns `None` if the outcome does not belong to the query's scenario.
pub fn evaluate(table: &PointsTable, query: &Query, outcome: Outcome) -> Option<Evaluation> {
    let projector = Projector::new(table, query);
    match (query.scenario, outcome) {
        (Scenario::BattingFirst { runs_scored }, Outcome::Conceded(runs)) => {
            Some(projector.batting(runs_scored, runs))
        }
        (Scenario::BowlingFirst { runs_conceded }, Outcome::ChaseOvers(overs)) => {
            Some(projector.bowling(runs_conceded, overs))
        }
        _ => None,
    }
}

/// Rank after the most emphatic win the scenario allows: a duck from the
/// opponent, or the target reached in one ball.
pub fn best_achievable_rank(table: &PointsTable, query: &Query) -> usize {
    let projector = Projector::new(table, query);
    match query.scenario {
        Scenario::BattingFirst { runs_scored } => projector.batting(runs_scored, 0).rank(),
        Scenario::BowlingFirst { runs_conceded } => projector.bowling(runs_conceded, ball_overs(1)).rank(),
    }
}

/// Solve the query for every position in the table, in parallel.
///
/// Results are ordered by position, starting at 1.
pub fn solve_every_rank(
    table: &PointsTable,
    query: &Query,
    strategy: Strategy,
) -> Vec<(usize, Option<Solution>)> {
    (1..=table.len())
        .into_par_iter()
        .map(|rank| {
            let q = Query {
                desired_rank: rank,
                ..*query
            };
            (rank, solve_with(table, &q, strategy))
        })
        .collect()
}

/// Solve independent queries in parallel, preserving input order.
pub fn solve_batch(table: &PointsTable, queries: &[Query], strategy: Strategy) -> Vec<Option<Solution>> {
    queries
        .par_iter()
        .map(|query| solve_with(table, query, strategy))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::Strategy;
    use crate::standings::Standing;
    use crate::table::TeamId;
    use proptest::prelude::*;

    const SAMPLE: &str = include_str!("../data/ipl_2022.csv");

    fn table() -> PointsTable {
        PointsTable::from_csv_str(SAMPLE).unwrap()
    }

    fn query(table: &PointsTable, rank: usize, scenario: Scenario) -> Query {
        Query {
            team: table.id_of("Rajasthan Royals").unwrap(),
            opponent: table.id_of("Delhi Capitals").unwrap(),
            match_overs: 20.0,
            desired_rank: rank,
            scenario,
        }
    }

    fn batting(runs: u32) -> Scenario {
        Scenario::BattingFirst { runs_scored: runs }
    }

    fn bowling(runs: u32) -> Scenario {
        Scenario::BowlingFirst { runs_conceded: runs }
    }

    fn restrict(solution: Option<Solution>) -> ResultRange<u32> {
        match solution {
            Some(Solution::Restrict(range)) => range,
            other => panic!("expected a restrict range, got {:?}", other),
        }
    }

    fn chase(solution: Option<Solution>) -> ResultRange<Overs> {
        match solution {
            Some(Solution::Chase(range)) => range,
            other => panic!("expected a chase range, got {:?}", other),
        }
    }

    fn rank_at(table: &PointsTable, q: &Query, runs: u32) -> usize {
        evaluate(table, q, Outcome::Conceded(runs)).unwrap().rank()
    }

    #[test]
    fn test_batting_first_third_place() {
        let table = table();
        let range = restrict(solve(&table, &query(&table, 3, batting(120))));

        assert_eq!(range.min.value, 69);
        assert_eq!(range.max.value, 119);
        assert!((range.min.own_rate - 0.5957).abs() < 0.001);
        assert!((range.max.own_rate - 0.2776).abs() < 0.001);
        assert!((range.max.opponent_rate - 0.2466).abs() < 0.001);
    }

    #[test]
    fn test_batting_first_second_place() {
        let table = table();
        let range = restrict(solve(&table, &query(&table, 2, batting(120))));

        assert_eq!(range.min.value, 0);
        assert_eq!(range.max.value, 68);
        assert!((range.min.own_rate - 1.0347).abs() < 0.001);
        assert!((range.max.own_rate - 0.6021).abs() < 0.001);
        assert_eq!(range.own_rate_range(), (range.max.own_rate, range.min.own_rate));
    }

    #[test]
    fn test_batting_first_infeasible_positions() {
        let table = table();
        // Chennai stay clear on points; Delhi can never pass a winning Rajasthan
        for rank in [1, 4, 5] {
            assert_eq!(solve(&table, &query(&table, rank, batting(120))), None, "rank {}", rank);
        }
    }

    #[test]
    fn test_zero_runs_cannot_win() {
        let table = table();
        assert_eq!(solve(&table, &query(&table, 3, batting(0))), None);
    }

    #[test]
    fn test_bowling_first_third_place() {
        let table = table();
        let range = chase(solve(&table, &query(&table, 3, bowling(119))));

        assert!((range.max.value.decimal - 20.0).abs() < 1e-10);
        assert!((range.max.value.mixed - 20.0).abs() < 1e-10);
        assert!((range.max.own_rate - 0.2776).abs() < 0.001);
        // 14.1 still leaves Rajasthan second; 14.2 is the first ball in third
        assert!((range.min.value.mixed - 14.2).abs() < 1e-10);
        assert!((range.min.value.decimal - 86.0 / 6.0).abs() < 1e-10);
        assert!((range.min.own_rate - 0.5952).abs() < 0.001);
    }

    #[test]
    fn test_bowling_first_second_place() {
        let table = table();
        let range = chase(solve(&table, &query(&table, 2, bowling(119))));

        assert!((range.min.value.mixed - 0.1).abs() < 1e-10);
        assert!((range.min.own_rate - 1.5117).abs() < 0.001);
        assert!((range.max.value.mixed - 14.1).abs() < 1e-10);
        assert!((range.max.value.decimal - 85.0 / 6.0).abs() < 1e-10);
        assert!((range.max.own_rate - 0.6049).abs() < 0.001);
    }

    #[test]
    fn test_chase_bounds_are_deliverable_balls() {
        let table = table();
        for rank in [2, 3] {
            let q = query(&table, rank, bowling(119));
            let range = chase(solve(&table, &q));
            for end in [range.min.value, range.max.value] {
                let eval = evaluate(&table, &q, Outcome::ChaseOvers(end.decimal)).unwrap();
                assert_eq!(eval.rank(), rank, "{} overs", end);
                assert_eq!(Overs::from_mixed(end.mixed).balls(), end.balls());
            }
        }
    }

    #[test]
    fn test_bowling_first_infeasible() {
        let table = table();
        assert_eq!(solve(&table, &query(&table, 1, bowling(119))), None);
        assert_eq!(solve(&table, &query(&table, 5, bowling(119))), None);
    }

    #[test]
    fn test_static_threshold_batting() {
        let table = table();
        let q = query(&table, 3, batting(120));
        let range = restrict(solve_with(&table, &q, Strategy::StaticThreshold));

        assert_eq!(range.min.value, 0);
        assert_eq!(range.max.value, 112);
        assert!((range.min.own_rate - 1.033).abs() < 0.005);
        assert!((range.max.own_rate - 0.321).abs() < 0.005);
    }

    #[test]
    fn test_static_threshold_bowling() {
        let table = table();
        let q = query(&table, 3, bowling(119));
        let range = chase(solve_with(&table, &q, Strategy::StaticThreshold));

        assert!((range.min.value.mixed - 0.1).abs() < 1e-10);
        assert!((range.min.own_rate - 1.5117).abs() < 0.001);
        // 19.2 would drop below Delhi's published 0.319
        assert!((range.max.value.mixed - 19.1).abs() < 1e-10);
        assert!((range.max.value.decimal - 115.0 / 6.0).abs() < 1e-10);
        assert!((range.max.own_rate - 0.3228).abs() < 0.001);
    }

    #[test]
    fn test_strategies_disagree_when_opponent_moves() {
        let table = table();
        let q = query(&table, 3, batting(120));
        assert_ne!(solve(&table, &q), solve_with(&table, &q, Strategy::StaticThreshold));
    }

    #[test]
    fn test_strategy_from_str() {
        assert_eq!("live".parse::<Strategy>(), Ok(Strategy::LiveStandings));
        assert_eq!("Threshold".parse::<Strategy>(), Ok(Strategy::StaticThreshold));
        assert!("maybe".parse::<Strategy>().is_err());
    }

    #[test]
    fn test_best_achievable_rank() {
        let table = table();
        assert_eq!(best_achievable_rank(&table, &query(&table, 1, batting(120))), 2);
        assert_eq!(best_achievable_rank(&table, &query(&table, 1, bowling(119))), 2);
    }

    #[test]
    fn test_huge_runs_do_not_overflow() {
        let table = table();
        let q = query(&table, 1, bowling(u32::MAX));
        let eval = evaluate(&table, &q, Outcome::ChaseOvers(10.0)).unwrap();
        assert!(eval.own_rate.is_finite());
        assert!(best_achievable_rank(&table, &q) >= 1);
        let _ = solve(&table, &q);
        let _ = solve(&table, &query(&table, 2, batting(u32::MAX)));
    }

    fn hand_resolution(rank: usize, rates: [f64; 5]) -> Evaluation {
        let table = table();
        let snapshot = table
            .ids()
            .zip(rates)
            .map(|(team, net_run_rate)| Standing {
                team,
                points: 8,
                net_run_rate,
            })
            .collect();
        Evaluation {
            own_rate: rates[rank - 1],
            opponent_rate: 0.0,
            resolution: Resolution { rank, snapshot },
        }
    }

    #[test]
    fn test_tie_only_counts_across_the_desired_position() {
        let target = Target {
            strategy: Strategy::LiveStandings,
            desired_rank: 3,
            threshold: f64::NEG_INFINITY,
        };

        // Level with the team above while already clear of third: still at or better
        let tied_above = hand_resolution(2, [0.5, 0.5, 0.3, 0.2, 0.1]);
        assert!(target.accepts(&tied_above, Phase::AtOrBetter));
        assert!(!target.accepts(&tied_above, Phase::Exact));

        // Level with fourth could drop the team out of third
        let tied_below = hand_resolution(3, [1.0, 0.8, 0.5, 0.5, 0.1]);
        assert!(!target.accepts(&tied_below, Phase::AtOrBetter));
        assert!(!target.accepts(&tied_below, Phase::Exact));

        // Level with second could only lift the team, which stays within reach
        let tied_into_place = hand_resolution(3, [1.0, 0.5, 0.5, 0.2, 0.1]);
        assert!(target.accepts(&tied_into_place, Phase::AtOrBetter));
        assert!(!target.accepts(&tied_into_place, Phase::Exact));

        let clear = hand_resolution(3, [1.0, 0.8, 0.5, 0.2, 0.1]);
        assert!(target.accepts(&clear, Phase::AtOrBetter));
        assert!(target.accepts(&clear, Phase::Exact));
    }

    #[test]
    fn test_ball_search_helpers() {
        // Boundary between ball 86 and 87
        let pred = |t: f64| t <= 86.0 / 6.0 + 1e-12;
        assert_eq!(last_true_ball(14.30, 1, 120, pred), Some(86));
        assert_eq!(last_true_ball(14.40, 1, 120, pred), Some(86));
        assert_eq!(last_true_ball(1.0, 1, 120, pred), Some(86));
        assert_eq!(last_true_ball(5.0, 1, 120, |_| false), None);

        let pred = |t: f64| t >= 86.0 / 6.0 - 1e-12;
        assert_eq!(first_true_ball(14.30, 1, 120, pred), Some(86));
        assert_eq!(first_true_ball(14.20, 1, 120, pred), Some(86));
        assert_eq!(first_true_ball(19.0, 1, 120, pred), Some(86));
        assert_eq!(first_true_ball(5.0, 1, 120, |_| false), None);
    }

    #[test]
    fn test_evaluate_rejects_mismatched_outcome() {
        let table = table();
        let q = query(&table, 3, batting(120));
        assert!(evaluate(&table, &q, Outcome::ChaseOvers(10.0)).is_none());
        assert!(evaluate(&table, &q, Outcome::Conceded(10)).is_some());
    }

    #[test]
    fn test_deterministic() {
        let table = table();
        for scenario in [batting(120), bowling(119)] {
            let q = query(&table, 3, scenario);
            let first = solve(&table, &q);
            for _ in 0..5 {
                assert_eq!(solve(&table, &q), first);
            }
        }
    }

    #[test]
    fn test_solve_every_rank() {
        let table = table();
        let results = solve_every_rank(&table, &query(&table, 1, batting(120)), Strategy::LiveStandings);

        let ranks: Vec<usize> = results.iter().map(|(rank, _)| *rank).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4, 5]);

        let feasible: Vec<usize> = results
            .iter()
            .filter(|(_, solution)| solution.is_some())
            .map(|(rank, _)| *rank)
            .collect();
        assert_eq!(feasible, vec![2, 3]);
        assert_eq!(results[2].1, solve(&table, &query(&table, 3, batting(120))));
    }

    #[test]
    fn test_solve_batch_preserves_order() {
        let table = table();
        let queries = vec![
            query(&table, 3, batting(120)),
            query(&table, 1, batting(120)),
            query(&table, 3, bowling(119)),
        ];
        let results = solve_batch(&table, &queries, Strategy::LiveStandings);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].map(|s| s.kind()), Some(ScenarioKind::BattingFirst));
        assert!(results[1].is_none());
        assert_eq!(results[2].map(|s| s.kind()), Some(ScenarioKind::BowlingFirst));
    }

    #[test]
    fn test_integer_search_helpers() {
        assert_eq!(last_true_int(0, 10, |x| x <= 7), Some(7));
        assert_eq!(last_true_int(0, 10, |_| false), None);
        assert_eq!(last_true_int(0, 0, |_| true), Some(0));
        assert_eq!(first_true_int(0, 10, |x| x >= 3), Some(3));
        assert_eq!(first_true_int(0, 10, |_| false), None);
    }

    #[test]
    fn test_continuous_search_helpers() {
        let last = last_true_continuous(0.0, 20.0, 0.01, |t| t <= 12.345).unwrap();
        assert!(last <= 12.345 && 12.345 - last <= 0.01);
        assert_eq!(last_true_continuous(0.0, 20.0, 0.01, |_| true), Some(20.0));

        let first = first_true_continuous(0.0, 20.0, 0.01, |t| t >= 4.2).unwrap();
        assert!(first >= 4.2 && first - 4.2 <= 0.01);
        assert_eq!(first_true_continuous(0.0, 20.0, 0.01, |_| false), None);
    }

    fn pair(table: &PointsTable, a: usize, b: usize) -> (TeamId, TeamId) {
        let ids: Vec<TeamId> = table.ids().collect();
        (ids[a], ids[b])
    }

    proptest! {
        #[test]
        fn prop_rank_monotonic_batting(a in 0usize..5, offset in 1usize..5, runs in 1u32..300) {
            let table = table();
            let (team, opponent) = pair(&table, a, (a + offset) % 5);
            let q = Query { team, opponent, match_overs: 20.0, desired_rank: 1, scenario: batting(runs) };
            let mut previous = rank_at(&table, &q, 0);
            for x in 1..runs {
                let rank = rank_at(&table, &q, x);
                prop_assert!(rank >= previous, "rank improved from {} to {} at {}", previous, rank, x);
                previous = rank;
            }
        }

        #[test]
        fn prop_rank_monotonic_bowling(a in 0usize..5, offset in 1usize..5, runs in 0u32..300) {
            let table = table();
            let (team, opponent) = pair(&table, a, (a + offset) % 5);
            let q = Query { team, opponent, match_overs: 20.0, desired_rank: 1, scenario: bowling(runs) };
            let mut previous = 0;
            for ball in 1..=120u32 {
                let overs = ball as f64 / 6.0;
                let rank = evaluate(&table, &q, Outcome::ChaseOvers(overs)).unwrap().rank();
                prop_assert!(rank >= previous);
                previous = rank;
            }
        }

        #[test]
        fn prop_batting_interval_is_exact(
            a in 0usize..5,
            offset in 1usize..5,
            runs in 1u32..300,
            desired in 1usize..=5,
        ) {
            let table = table();
            let (team, opponent) = pair(&table, a, (a + offset) % 5);
            let q = Query { team, opponent, match_overs: 20.0, desired_rank: desired, scenario: batting(runs) };

            match solve(&table, &q) {
                Some(Solution::Restrict(range)) => {
                    prop_assert!(range.min.value <= range.max.value);
                    for x in range.min.value..=range.max.value {
                        prop_assert_eq!(rank_at(&table, &q, x), desired);
                    }
                    if range.min.value > 0 {
                        prop_assert!(rank_at(&table, &q, range.min.value - 1) < desired);
                    }
                    if range.max.value + 1 < runs {
                        prop_assert!(rank_at(&table, &q, range.max.value + 1) > desired);
                    }
                }
                Some(other) => prop_assert!(false, "wrong scenario: {:?}", other),
                None => {
                    prop_assert!((0..runs).all(|x| rank_at(&table, &q, x) != desired));
                }
            }
        }

        #[test]
        fn prop_bowling_interval_is_exact(
            a in 0usize..5,
            offset in 1usize..5,
            runs in 0u32..300,
            desired in 1usize..=5,
        ) {
            let table = table();
            let (team, opponent) = pair(&table, a, (a + offset) % 5);
            let q = Query { team, opponent, match_overs: 20.0, desired_rank: desired, scenario: bowling(runs) };
            let rank_at_ball = |ball: u32| {
                evaluate(&table, &q, Outcome::ChaseOvers(ball as f64 / 6.0)).unwrap().rank()
            };

            match solve(&table, &q) {
                Some(Solution::Chase(range)) => {
                    let (first, last) = (range.min.value.balls(), range.max.value.balls());
                    prop_assert!(1 <= first && first <= last && last <= 120);
                    for ball in first..=last {
                        prop_assert_eq!(rank_at_ball(ball), desired, "ball {}", ball);
                    }
                    if first > 1 {
                        prop_assert!(rank_at_ball(first - 1) < desired);
                    }
                    if last < 120 {
                        prop_assert!(rank_at_ball(last + 1) > desired);
                    }
                }
                Some(other) => prop_assert!(false, "wrong scenario: {:?}", other),
                None => {
                    prop_assert!((1..=120).all(|ball| rank_at_ball(ball) != desired));
                }
            }
        }

        #[test]
        fn prop_infeasible_when_best_case_falls_short(
            a in 0usize..5,
            offset in 1usize..5,
            runs in 1u32..300,
            desired in 1usize..=5,
        ) {
            let table = table();
            let (team, opponent) = pair(&table, a, (a + offset) % 5);
            let q = Query { team, opponent, match_overs: 20.0, desired_rank: desired, scenario: batting(runs) };
            if best_achievable_rank(&table, &q) > desired {
                prop_assert!(solve(&table, &q).is_none());
            }
        }
    }
}
