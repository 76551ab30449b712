use crate::models::VoteStats;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Percentages {
    pub boy: f64,
    pub girl: f64,
}

/// Share of each choice in `total_votes`, in percent.
///
/// An empty tally renders as an even split.
pub fn derive_percentages(stats: &VoteStats) -> Percentages {
    if stats.total_votes == 0 {
        return Percentages {
            boy: 50.0,
            girl: 50.0,
        };
    }

    let total = stats.total_votes as f64;
    Percentages {
        boy: 100.0 * stats.boy_votes as f64 / total,
        girl: 100.0 * stats.girl_votes as f64 / total,
    }
}

pub fn format_percent(value: f64) -> String {
    format!("{value:.1}")
}
