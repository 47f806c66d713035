//! Half-open time ranges

use chrono::{DateTime, Duration, Utc};

/// An absolute `[start, end)` range in UTC.
///
/// Every overlap decision in the engine (booking conflicts, slot
/// availability, "occupied now") goes through this type so the three read
/// and write paths can never disagree on boundary handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        debug_assert!(start <= end, "range start after end");
        Self { start, end }
    }

    /// `[a,b)` and `[c,d)` overlap iff `a < d && c < b`.
    pub fn overlaps(&self, other: &TimeRange) -> bool {
        self.start < other.end && other.start < self.end
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 2, h, m, 0).unwrap()
    }

    #[test]
    fn touching_ranges_do_not_overlap() {
        let a = TimeRange::new(at(5, 0), at(6, 0));
        let b = TimeRange::new(at(6, 0), at(7, 0));
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn nested_and_partial_ranges_overlap() {
        let a = TimeRange::new(at(5, 0), at(7, 0));
        assert!(a.overlaps(&TimeRange::new(at(5, 30), at(6, 0))));
        assert!(a.overlaps(&TimeRange::new(at(6, 30), at(8, 0))));
        assert!(a.overlaps(&TimeRange::new(at(4, 0), at(5, 30))));
    }

    #[test]
    fn contains_is_half_open() {
        let a = TimeRange::new(at(5, 0), at(6, 0));
        assert!(a.contains(at(5, 0)));
        assert!(a.contains(at(5, 59)));
        assert!(!a.contains(at(6, 0)));
    }
}
