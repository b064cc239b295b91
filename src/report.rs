use std::fmt::Write;

use crate::overs::Overs;
use crate::query::{Query, Scenario};
use crate::solver::{best_achievable_rank, Solution};
use crate::standings::{current_standings, Standing};
use crate::table::PointsTable;

fn ordinal(n: usize) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}

/// Describe a solver result in plain English.
pub fn render(table: &PointsTable, query: &Query, solution: Option<&Solution>) -> String {
    let team = &table.team(query.team).name;
    let opponent = &table.team(query.opponent).name;
    let overs = Overs::from_mixed(query.match_overs);
    let position = ordinal(query.desired_rank);

    let mut out = String::new();
    match (query.scenario, solution) {
        (Scenario::BattingFirst { runs_scored }, Some(Solution::Restrict(range))) => {
            let (low, high) = range.own_rate_range();
            let _ = writeln!(
                out,
                "If {} score {} runs in {} overs, {} need to restrict {} between {} to {} runs in {} overs to finish {}.",
                team, runs_scored, overs, team, opponent, range.min.value, range.max.value, overs, position
            );
            let _ = write!(out, "Revised NRR of {} will be between {:.3} to {:.3}.", team, low, high);
        }
        (Scenario::BowlingFirst { runs_conceded }, Some(Solution::Chase(range))) => {
            let (low, high) = range.own_rate_range();
            let _ = writeln!(
                out,
                "If {} score {} runs in {} overs, {} need to chase {} between {} and {} overs to finish {}.",
                opponent,
                runs_conceded,
                overs,
                team,
                runs_conceded.saturating_add(1),
                range.min.value,
                range.max.value,
                position
            );
            let _ = write!(out, "Revised NRR of {} will be between {:.3} to {:.3}.", team, low, high);
        }
        _ => {
            let best = best_achievable_rank(table, query);
            let _ = write!(
                out,
                "{} cannot finish exactly {} by beating {}; the best achievable position is {}.",
                team,
                position,
                opponent,
                ordinal(best)
            );
        }
    }
    out
}

/// Format standings rows as an aligned text table.
pub fn render_standings(table: &PointsTable, rows: &[Standing]) -> String {
    let width = table
        .teams()
        .iter()
        .map(|t| t.name.len())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut out = String::new();
    let _ = writeln!(out, "{:>3}  {:<width$}  {:>3}  {:>8}", "#", "Team", "Pts", "NRR", width = width);
    for (i, row) in rows.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>3}  {:<width$}  {:>3}  {:>8.3}",
            i + 1,
            table.team(row.team).name,
            row.points,
            row.net_run_rate,
            width = width
        );
    }
    out
}

/// The table as published, before any hypothetical match.
pub fn render_current(table: &PointsTable) -> String {
    render_standings(table, &current_standings(table))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::solve;

    const SAMPLE: &str = include_str!("../data/ipl_2022.csv");

    fn setup(rank: usize, scenario: Scenario) -> (PointsTable, Query) {
        let table = PointsTable::from_csv_str(SAMPLE).unwrap();
        let query = Query {
            team: table.id_of("Rajasthan Royals").unwrap(),
            opponent: table.id_of("Delhi Capitals").unwrap(),
            match_overs: 20.0,
            desired_rank: rank,
            scenario,
        };
        (table, query)
    }

    #[test]
    fn test_ordinal() {
        assert_eq!(ordinal(1), "1st");
        assert_eq!(ordinal(2), "2nd");
        assert_eq!(ordinal(3), "3rd");
        assert_eq!(ordinal(4), "4th");
        assert_eq!(ordinal(11), "11th");
        assert_eq!(ordinal(22), "22nd");
    }

    #[test]
    fn test_render_restrict() {
        let (table, query) = setup(3, Scenario::BattingFirst { runs_scored: 120 });
        let solution = solve(&table, &query);
        let text = render(&table, &query, solution.as_ref());
        assert!(text.contains("restrict Delhi Capitals between 69 to 119 runs in 20 overs"), "{}", text);
        assert!(text.contains("between 0.278 to 0.596"), "{}", text);
    }

    #[test]
    fn test_render_chase() {
        let (table, query) = setup(3, Scenario::BowlingFirst { runs_conceded: 119 });
        let solution = solve(&table, &query);
        let text = render(&table, &query, solution.as_ref());
        assert!(text.contains("need to chase 120 between 14.2 and 20 overs"), "{}", text);
        assert!(text.contains("between 0.278 to 0.595"), "{}", text);
    }

    #[test]
    fn test_render_infeasible() {
        let (table, query) = setup(1, Scenario::BattingFirst { runs_scored: 120 });
        let text = render(&table, &query, None);
        assert!(text.contains("cannot finish exactly 1st"), "{}", text);
        assert!(text.contains("best achievable position is 2nd"), "{}", text);
    }

    #[test]
    fn test_render_current() {
        let table = PointsTable::from_csv_str(SAMPLE).unwrap();
        let text = render_current(&table);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 6);
        assert!(lines[1].contains("Chennai Super Kings"));
        assert!(lines[5].contains("-1.750"));
    }
}
