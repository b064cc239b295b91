use crate::net_rate::net_run_rate;

/// Cumulative runs and overs a team has scored and conceded this season.
///
/// Overs are in mixed-radix form (`128.2` is 128 overs and 2 balls).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Totals {
    pub runs_for: u32,
    pub overs_for: f64,
    pub runs_against: u32,
    pub overs_against: f64,
}

impl Totals {
    pub fn new(runs_for: u32, overs_for: f64, runs_against: u32, overs_against: f64) -> Self {
        Totals {
            runs_for,
            overs_for,
            runs_against,
            overs_against,
        }
    }
}

/// One row of a league points table.
#[derive(Clone, Debug, PartialEq)]
pub struct Team {
    pub name: String,

    pub played: u32,
    pub won: u32,
    pub lost: u32,

    /// League points before the hypothetical match
    pub points: u32,

    /// Published net run rate before the hypothetical match
    pub net_run_rate: f64,

    pub totals: Totals,
}

impl Team {
    pub fn new(
        name: impl Into<String>,
        played: u32,
        won: u32,
        lost: u32,
        points: u32,
        net_run_rate: f64,
        totals: Totals,
    ) -> Self {
        Team {
            name: name.into(),
            played,
            won,
            lost,
            points,
            net_run_rate,
            totals,
        }
    }

    /// Net run rate recomputed from the cumulative totals.
    pub fn computed_net_run_rate(&self) -> f64 {
        net_run_rate(
            self.totals.runs_for,
            self.totals.overs_for,
            self.totals.runs_against,
            self.totals.overs_against,
        )
    }
}
