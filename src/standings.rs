use std::cmp::Ordering;

use crate::table::{PointsTable, TeamId};

/// One row of a standings snapshot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Standing {
    pub team: TeamId,
    pub points: u32,
    pub net_run_rate: f64,
}

/// Standings after one hypothetical result, with the acting team's rank.
#[derive(Clone, Debug, PartialEq)]
pub struct Resolution {
    /// 1-based position of the acting team
    pub rank: usize,
    pub snapshot: Vec<Standing>,
}

impl Resolution {
    /// Whether the acting team sits level on points with a neighbour whose
    /// rate is within `epsilon`, so its rank hinges on floating-point noise.
    pub fn is_contested(&self, epsilon: f64) -> bool {
        self.tied_above(epsilon) || self.tied_below(epsilon)
    }

    /// Level with the team directly above, within `epsilon`.
    pub fn tied_above(&self, epsilon: f64) -> bool {
        self.rank >= 2 && self.ties_with(self.rank - 2, epsilon)
    }

    /// Level with the team directly below, within `epsilon`.
    pub fn tied_below(&self, epsilon: f64) -> bool {
        self.ties_with(self.rank, epsilon)
    }

    fn ties_with(&self, index: usize, epsilon: f64) -> bool {
        let me = &self.snapshot[self.rank - 1];
        self.snapshot.get(index).is_some_and(|other| {
            other.points == me.points && (other.net_run_rate - me.net_run_rate).abs() <= epsilon
        })
    }
}

/// Points descending, then net run rate descending. `sort_by` is stable, so
/// exact ties keep table order.
fn sort_standings(rows: &mut [Standing]) {
    rows.sort_by(|a, b| {
        b.points
            .cmp(&a.points)
            .then_with(|| b.net_run_rate.partial_cmp(&a.net_run_rate).unwrap_or(Ordering::Equal))
    });
}

/// Current standings of the table as published.
pub fn current_standings(table: &PointsTable) -> Vec<Standing> {
    let mut rows: Vec<Standing> = table
        .ids()
        .map(|id| {
            let team = table.team(id);
            Standing {
                team: id,
                points: team.points,
                net_run_rate: team.net_run_rate,
            }
        })
        .collect();
    sort_standings(&mut rows);
    rows
}

/// Re-rank the table after `acting` beats `opponent`.
///
/// The winner gains the table's win points and both teams take their new
/// rates; everyone else keeps their published figures.
pub fn resolve(
    table: &PointsTable,
    acting: TeamId,
    opponent: TeamId,
    acting_rate: f64,
    opponent_rate: f64,
) -> Resolution {
    let mut snapshot: Vec<Standing> = table
        .ids()
        .map(|id| {
            let team = table.team(id);
            if id == acting {
                Standing {
                    team: id,
                    points: team.points + table.points_for_win(),
                    net_run_rate: acting_rate,
                }
            } else if id == opponent {
                Standing {
                    team: id,
                    points: team.points,
                    net_run_rate: opponent_rate,
                }
            } else {
                Standing {
                    team: id,
                    points: team.points,
                    net_run_rate: team.net_run_rate,
                }
            }
        })
        .collect();
    sort_standings(&mut snapshot);

    let rank = snapshot
        .iter()
        .position(|row| row.team == acting)
        .map(|pos| pos + 1)
        .unwrap_or(snapshot.len());

    Resolution { rank, snapshot }
}
