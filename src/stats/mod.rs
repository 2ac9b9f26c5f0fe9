//! Stats module - Series statistics

mod calculator;

pub use calculator::{Correlation, SeriesSummary, StatsCalculator};
