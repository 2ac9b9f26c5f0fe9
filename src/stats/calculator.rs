//! Statistics Calculator Module
//! Summary statistics for a series and the correlation between two series.

use crate::data::Series;
use statrs::distribution::{ContinuousCDF, StudentsT};
use statrs::statistics::Statistics;

/// Significance threshold for the correlation t-test
pub const SIGNIFICANCE_THRESHOLD: f64 = 0.05;

/// Descriptive statistics of the present values of a series.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSummary {
    pub count: usize,
    pub gaps: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

/// Pearson correlation between two series over their shared years.
#[derive(Debug, Clone, PartialEq)]
pub struct Correlation {
    pub r: f64,
    pub pairs: usize,
    pub p_value: f64,
    pub is_significant: bool,
}

impl Correlation {
    /// Plain-words strength of the relationship.
    pub fn strength(&self) -> &'static str {
        match self.r.abs() {
            r if r >= 0.7 => "strong",
            r if r >= 0.4 => "moderate",
            r if r >= 0.2 => "weak",
            _ => "very weak",
        }
    }

    pub fn direction(&self) -> &'static str {
        if self.r >= 0.0 {
            "positive"
        } else {
            "negative"
        }
    }
}

pub struct StatsCalculator;

impl StatsCalculator {
    /// Summarize a series; `None` when it has no present value.
    pub fn summarize(series: &Series) -> Option<SeriesSummary> {
        let values = series.present_values();
        if values.is_empty() {
            return None;
        }

        Some(SeriesSummary {
            count: values.len(),
            gaps: series.len() - values.len(),
            mean: values.iter().mean(),
            min: Statistics::min(values.iter()),
            max: Statistics::max(values.iter()),
        })
    }

    /// Correlate two series using only years where both have a value.
    ///
    /// Needs at least three pairs and non-zero variance on both sides.
    pub fn correlate(a: &Series, b: &Series) -> Option<Correlation> {
        let (xs, ys): (Vec<f64>, Vec<f64>) = a
            .points()
            .iter()
            .filter_map(|p| Some((p.value?, b.value_at(p.year)?)))
            .unzip();

        let n = xs.len();
        if n < 3 {
            return None;
        }

        let sx = xs.iter().std_dev();
        let sy = ys.iter().std_dev();
        if sx == 0.0 || sy == 0.0 || sx.is_nan() || sy.is_nan() {
            return None;
        }

        let r = (xs.iter().covariance(ys.iter()) / (sx * sy)).clamp(-1.0, 1.0);
        let p_value = Self::correlation_p_value(r, n);

        Some(Correlation {
            r,
            pairs: n,
            p_value,
            is_significant: p_value <= SIGNIFICANCE_THRESHOLD,
        })
    }

    /// Two-tailed p-value of `r` under the t-distribution with n - 2 df.
    fn correlation_p_value(r: f64, n: usize) -> f64 {
        let df = (n - 2) as f64;
        let denom = 1.0 - r * r;
        if denom <= 0.0 {
            return 0.0;
        }
        let t = r * (df / denom).sqrt();

        match StudentsT::new(0.0, 1.0, df) {
            Ok(dist) => 2.0 * (1.0 - dist.cdf(t.abs())),
            Err(_) => f64::NAN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::YearRange;

    fn series(start: i32, values: &[Option<f64>]) -> Series {
        let end = start + values.len() as i32 - 1;
        Series::from_range(YearRange::new(start, end), |y| values[(y - start) as usize])
    }

    #[test]
    fn summary_skips_gaps() {
        let s = series(2020, &[Some(1.0), None, Some(3.0)]);
        let summary = StatsCalculator::summarize(&s).unwrap();
        assert_eq!(summary.count, 2);
        assert_eq!(summary.gaps, 1);
        assert_eq!(summary.mean, 2.0);
        assert_eq!(summary.min, 1.0);
        assert_eq!(summary.max, 3.0);
    }

    #[test]
    fn summary_of_all_gaps_is_none() {
        assert!(StatsCalculator::summarize(&series(2020, &[None, None])).is_none());
        assert!(StatsCalculator::summarize(&Series::empty()).is_none());
    }

    #[test]
    fn perfectly_linear_series_correlate() {
        let a = series(2020, &[Some(1.0), Some(2.0), Some(3.0), Some(4.0)]);
        let b = series(2020, &[Some(2.0), Some(4.0), Some(6.0), Some(8.0)]);
        let c = StatsCalculator::correlate(&a, &b).unwrap();
        assert!((c.r - 1.0).abs() < 1e-9);
        assert_eq!(c.pairs, 4);
        assert_eq!(c.strength(), "strong");
        assert_eq!(c.direction(), "positive");
    }

    #[test]
    fn correlation_uses_shared_years_only() {
        let a = series(2020, &[Some(1.0), None, Some(3.0), Some(5.0)]);
        let b = series(2020, &[Some(9.0), Some(1.0), None, Some(2.0)]);
        assert!(StatsCalculator::correlate(&a, &b).is_none());
    }

    #[test]
    fn constant_series_has_no_correlation() {
        let a = series(2020, &[Some(1.0), Some(1.0), Some(1.0)]);
        let b = series(2020, &[Some(1.0), Some(2.0), Some(3.0)]);
        assert!(StatsCalculator::correlate(&a, &b).is_none());
    }

    #[test]
    fn negative_correlation_has_p_value() {
        let a = series(2020, &[Some(1.0), Some(2.0), Some(3.0), Some(4.0), Some(5.0)]);
        let b = series(2020, &[Some(5.2), Some(3.9), Some(3.1), Some(2.2), Some(0.8)]);
        let c = StatsCalculator::correlate(&a, &b).unwrap();
        assert!(c.r < -0.9);
        assert_eq!(c.direction(), "negative");
        assert!(c.p_value > 0.0 && c.p_value < SIGNIFICANCE_THRESHOLD);
        assert!(c.is_significant);
    }
}
