use crate::overs::to_decimal_overs;
use crate::team::Team;

/// Calculate a net run rate from cumulative totals.
///
/// Both overs arguments are mixed-radix and are converted before dividing.
/// Overs must be positive; zero overs yields an infinite or NaN rate.
///
/// # Returns
/// Runs scored per over minus runs conceded per over
pub fn net_run_rate(runs_for: u32, overs_for: f64, runs_against: u32, overs_against: f64) -> f64 {
    rate_from_decimal(
        runs_for as f64,
        to_decimal_overs(overs_for),
        runs_against as f64,
        to_decimal_overs(overs_against),
    )
}

fn rate_from_decimal(runs_for: f64, overs_for: f64, runs_against: f64, overs_against: f64) -> f64 {
    runs_for / overs_for - runs_against / overs_against
}

/// One team's side of a single match, with overs already in decimal form.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MatchLine {
    pub runs_for: u32,
    pub overs_for: f64,
    pub runs_against: u32,
    pub overs_against: f64,
}

impl MatchLine {
    /// Build a line from mixed-radix overs figures.
    pub fn from_mixed(runs_for: u32, overs_for: f64, runs_against: u32, overs_against: f64) -> Self {
        MatchLine {
            runs_for,
            overs_for: to_decimal_overs(overs_for),
            runs_against,
            overs_against: to_decimal_overs(overs_against),
        }
    }

    /// The same match seen from the other dressing room.
    pub fn reversed(&self) -> Self {
        MatchLine {
            runs_for: self.runs_against,
            overs_for: self.overs_against,
            runs_against: self.runs_for,
            overs_against: self.overs_for,
        }
    }
}

/// Net run rate of `team` after adding one more match to its season totals.
///
/// Overs accumulate in decimal space; adding mixed-radix figures directly
/// would let balls overflow past 5. Runs are summed as `f64`, so no total
/// can overflow. The team record is not modified.
pub fn projected_net_run_rate(team: &Team, line: &MatchLine) -> f64 {
    let totals = &team.totals;
    rate_from_decimal(
        totals.runs_for as f64 + line.runs_for as f64,
        to_decimal_overs(totals.overs_for) + line.overs_for,
        totals.runs_against as f64 + line.runs_against as f64,
        to_decimal_overs(totals.overs_against) + line.overs_against,
    )
}
