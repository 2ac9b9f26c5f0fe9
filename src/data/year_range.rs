//! Year Range Module
//! Start/end year selection with the end year kept at or above the start.

use std::ops::RangeInclusive;

/// Inclusive span of years currently selected for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    pub start: i32,
    pub end: i32,
}

impl YearRange {
    /// Build a range, swapping the bounds if they arrive inverted.
    pub fn new(start: i32, end: i32) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    pub fn years(&self) -> RangeInclusive<i32> {
        self.start..=self.end
    }

    pub fn contains(&self, year: i32) -> bool {
        self.years().contains(&year)
    }

    /// Clamp both ends into `bounds`, keeping `start <= end`.
    pub fn clamp_to(&self, bounds: YearRange) -> Self {
        let start = self.start.clamp(bounds.start, bounds.end);
        let end = self.end.clamp(bounds.start, bounds.end);
        Self::new(start, end)
    }
}

/// One entry of the end-year dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndYearOption {
    pub year: i32,
    pub enabled: bool,
}

/// Owns the selectable years of one view and the current range.
#[derive(Debug, Clone)]
pub struct YearRangeController {
    bounds: YearRange,
    range: YearRange,
}

impl YearRangeController {
    pub fn new(bounds: YearRange, default_range: YearRange) -> Self {
        Self {
            bounds,
            range: default_range.clamp_to(bounds),
        }
    }

    /// Full valid bound `[min_year, max_year]`.
    pub fn bounds(&self) -> YearRange {
        self.bounds
    }

    pub fn range(&self) -> YearRange {
        self.range
    }

    /// Every year offered by the start and end dropdowns.
    pub fn years(&self) -> RangeInclusive<i32> {
        self.bounds.years()
    }

    /// Select a new start year. Pulls the end year up when it falls below.
    ///
    /// Returns `true` when the stored range changed.
    pub fn set_start(&mut self, year: i32) -> bool {
        if !self.bounds.contains(year) {
            return false;
        }
        let previous = self.range;
        self.range.start = year;
        if self.range.end < year {
            self.range.end = year;
        }
        previous != self.range
    }

    /// Select a new end year. Disabled options are ignored.
    pub fn set_end(&mut self, year: i32) -> bool {
        if !self.is_end_selectable(year) || self.range.end == year {
            return false;
        }
        self.range.end = year;
        true
    }

    pub fn is_end_selectable(&self, year: i32) -> bool {
        self.bounds.contains(year) && year >= self.range.start
    }

    pub fn end_options(&self) -> Vec<EndYearOption> {
        self.years()
            .map(|year| EndYearOption {
                year,
                enabled: self.is_end_selectable(year),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> YearRangeController {
        YearRangeController::new(YearRange::new(2000, 2024), YearRange::new(2018, 2022))
    }

    #[test]
    fn defaults_are_kept_when_in_bounds() {
        let c = controller();
        assert_eq!(c.range(), YearRange { start: 2018, end: 2022 });
        assert_eq!(c.years().count(), 25);
    }

    #[test]
    fn defaults_outside_bounds_are_clamped() {
        let c = YearRangeController::new(YearRange::new(2022, 2024), YearRange::new(2018, 2030));
        assert_eq!(c.range(), YearRange { start: 2022, end: 2024 });
    }

    #[test]
    fn start_above_end_forces_end_up() {
        for start in 2000..=2024 {
            for end in 2000..start {
                let mut c = controller();
                c.set_start(2000);
                c.set_end(end);
                c.set_start(start);
                let range = c.range();
                assert_eq!(range.start, start);
                assert_eq!(range.end, start, "end should follow start {start} from {end}");
            }
        }
    }

    #[test]
    fn start_below_end_keeps_end() {
        let mut c = controller();
        assert!(c.set_start(2010));
        assert_eq!(c.range(), YearRange { start: 2010, end: 2022 });
    }

    #[test]
    fn end_options_below_start_are_disabled() {
        let mut c = controller();
        c.set_start(2020);
        let options = c.end_options();
        assert!(options
            .iter()
            .filter(|o| o.year < 2020)
            .all(|o| !o.enabled));
        assert!(options
            .iter()
            .filter(|o| o.year >= 2020)
            .all(|o| o.enabled));
    }

    #[test]
    fn disabled_end_year_is_ignored() {
        let mut c = controller();
        assert!(!c.set_end(2010));
        assert_eq!(c.range().end, 2022);
        assert!(c.set_end(2024));
        assert_eq!(c.range().end, 2024);
    }

    #[test]
    fn out_of_bounds_start_is_ignored() {
        let mut c = controller();
        assert!(!c.set_start(1999));
        assert!(!c.set_start(2025));
        assert_eq!(c.range(), YearRange { start: 2018, end: 2022 });
    }

    #[test]
    fn inverted_range_is_reordered() {
        assert_eq!(YearRange::new(2022, 2018), YearRange { start: 2018, end: 2022 });
        assert_eq!(YearRange::new(2018, 2022).years().count(), 5);
    }
}
