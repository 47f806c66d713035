//! Half-hour slot grid
//!
//! A calendar day is split into 48 slots of 30 minutes, slot 0 starting at
//! local midnight in the reference time zone. Clients select slots by index;
//! this module turns a selection into an absolute [`TimeRange`].

use chrono::{
    DateTime, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone, Utc,
};
use chrono_tz::Tz;

use super::interval::TimeRange;
use crate::shared::errors::{BookingError, BookingResult};

pub const SLOT_MINUTES: i64 = 30;
pub const SLOTS_PER_DAY: i32 = 48;

const MAX_GAP_MINUTES: u32 = 24 * 60;

/// A validated, contiguous selection on a given date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotRange {
    pub range: TimeRange,
    /// Deduplicated, ascending slot indices.
    pub slots: Vec<i32>,
}

impl SlotRange {
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }
}

/// Calendar math for one reference time zone.
#[derive(Debug, Clone, Copy)]
pub struct SlotGrid {
    tz: Tz,
}

impl SlotGrid {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    pub fn time_zone(&self) -> Tz {
        self.tz
    }

    /// Validate a slot selection and compute its absolute range.
    ///
    /// Checks run in a fixed order: empty selection, then out-of-range
    /// indices, then gaps between the sorted, deduplicated indices, then
    /// slots distorted by a daylight-saving change. A returned range always
    /// lasts exactly 30 minutes per slot.
    pub fn compute_range(&self, date: NaiveDate, slots: &[i32]) -> BookingResult<SlotRange> {
        if slots.is_empty() {
            return Err(BookingError::EmptySelection);
        }

        let out_of_range: Vec<i32> = slots
            .iter()
            .copied()
            .filter(|s| !(0..SLOTS_PER_DAY).contains(s))
            .collect();
        if !out_of_range.is_empty() {
            return Err(BookingError::OutOfRange {
                slots: out_of_range,
            });
        }

        let mut sorted = slots.to_vec();
        sorted.sort_unstable();
        sorted.dedup();

        if sorted.windows(2).any(|w| w[1] != w[0] + 1) {
            return Err(BookingError::NonContiguous { slots: sorted });
        }

        // Gap slots are empty, the repeated hour of a fall-back is longer.
        let irregular: Vec<i32> = sorted
            .iter()
            .copied()
            .filter(|&s| !self.is_regular(date, s))
            .collect();
        if !irregular.is_empty() {
            return Err(BookingError::ClockChange { slots: irregular });
        }

        // Non-empty after the first check.
        let first = sorted[0];
        let last = sorted[sorted.len() - 1];

        Ok(SlotRange {
            range: TimeRange::new(self.boundary(date, first), self.boundary(date, last + 1)),
            slots: sorted,
        })
    }

    /// Absolute instant at which slot `index` begins on `date`.
    /// `index == SLOTS_PER_DAY` is the following local midnight.
    pub fn boundary(&self, date: NaiveDate, index: i32) -> DateTime<Utc> {
        self.at_minute(date, SLOT_MINUTES * index as i64)
    }

    /// Absolute instant of `minute` minutes past local midnight on `date`.
    pub fn at_minute(&self, date: NaiveDate, minute: i64) -> DateTime<Utc> {
        self.to_utc(date.and_time(NaiveTime::MIN) + Duration::minutes(minute))
    }

    /// Absolute range of a single slot.
    pub fn slot(&self, date: NaiveDate, index: i32) -> TimeRange {
        TimeRange::new(self.boundary(date, index), self.boundary(date, index + 1))
    }

    /// Whether slot `index` on `date` lasts exactly 30 minutes.
    pub fn is_regular(&self, date: NaiveDate, index: i32) -> bool {
        self.slot(date, index).duration() == Duration::minutes(SLOT_MINUTES)
    }

    /// `[local midnight, next local midnight)` for `date`.
    pub fn day(&self, date: NaiveDate) -> TimeRange {
        self.slot_span(date, 0, SLOTS_PER_DAY)
    }

    fn slot_span(&self, date: NaiveDate, from: i32, to: i32) -> TimeRange {
        TimeRange::new(self.boundary(date, from), self.boundary(date, to))
    }

    /// Interpret a wall-clock time in the reference zone.
    ///
    /// Ambiguous times (clocks going back) take the earlier instant. Times
    /// inside a spring-forward gap resolve to the transition instant, which
    /// keeps slot boundaries monotonic: slots swallowed by the gap become
    /// empty ranges instead of running backwards.
    pub fn to_utc(&self, local: NaiveDateTime) -> DateTime<Utc> {
        let mut probe = local;
        for _ in 0..MAX_GAP_MINUTES {
            match self.tz.from_local_datetime(&probe) {
                LocalResult::Single(dt) => return dt.with_timezone(&Utc),
                LocalResult::Ambiguous(earliest, _) => return earliest.with_timezone(&Utc),
                LocalResult::None => probe += Duration::minutes(1),
            }
        }

        // No zone has a gap this long; fall back to the offset in force a
        // day earlier.
        let before = self
            .tz
            .offset_from_utc_datetime(&(local - Duration::days(1)))
            .fix();
        Utc.from_utc_datetime(&(local - Duration::seconds(before.local_minus_utc() as i64)))
    }
}

/// "HH:MM" label of a minute-of-day, with 1440 rendered as "24:00".
pub fn minute_label(minute_of_day: u32) -> String {
    format!("{:02}:{:02}", minute_of_day / 60, minute_of_day % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::Europe::Paris;

    fn grid() -> SlotGrid {
        SlotGrid::new(Paris)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn single_slot_is_thirty_minutes_from_local_midnight() {
        // Winter: Paris is UTC+1.
        let r = grid().compute_range(date(2026, 1, 15), &[10]).unwrap();
        assert_eq!(r.range.start, Utc.with_ymd_and_hms(2026, 1, 15, 4, 0, 0).unwrap());
        assert_eq!(r.range.end, Utc.with_ymd_and_hms(2026, 1, 15, 4, 30, 0).unwrap());
        assert_eq!(r.slots, vec![10]);
    }

    #[test]
    fn duration_matches_slot_count_for_every_contiguous_run() {
        let g = grid();
        let d = date(2026, 6, 10);
        for start in 0..SLOTS_PER_DAY {
            for len in 1..=(SLOTS_PER_DAY - start) {
                let slots: Vec<i32> = (start..start + len).collect();
                let r = g.compute_range(d, &slots).unwrap();
                assert_eq!(r.range.duration(), Duration::minutes(30 * len as i64));
            }
        }
    }

    #[test]
    fn selection_is_sorted_and_deduplicated() {
        let r = grid().compute_range(date(2026, 6, 10), &[12, 11, 11, 13]).unwrap();
        assert_eq!(r.slots, vec![11, 12, 13]);
        assert_eq!(r.slot_count(), 3);
    }

    #[test]
    fn empty_selection_is_rejected() {
        assert_eq!(
            grid().compute_range(date(2026, 6, 10), &[]),
            Err(BookingError::EmptySelection)
        );
    }

    #[test]
    fn out_of_range_indices_are_rejected() {
        let g = grid();
        let d = date(2026, 6, 10);
        assert_eq!(
            g.compute_range(d, &[-1]),
            Err(BookingError::OutOfRange { slots: vec![-1] })
        );
        assert_eq!(
            g.compute_range(d, &[47, 48]),
            Err(BookingError::OutOfRange { slots: vec![48] })
        );
    }

    #[test]
    fn range_is_checked_before_contiguity() {
        assert!(matches!(
            grid().compute_range(date(2026, 6, 10), &[2, 60]),
            Err(BookingError::OutOfRange { .. })
        ));
    }

    #[test]
    fn gaps_are_rejected() {
        assert_eq!(
            grid().compute_range(date(2026, 6, 10), &[4, 2]),
            Err(BookingError::NonContiguous { slots: vec![2, 4] })
        );
    }

    #[test]
    fn last_slot_ends_at_next_midnight() {
        let r = grid().compute_range(date(2026, 1, 15), &[46, 47]).unwrap();
        // 2026-01-16 00:00 Paris == 2026-01-15 23:00 UTC
        assert_eq!(r.range.end, Utc.with_ymd_and_hms(2026, 1, 15, 23, 0, 0).unwrap());
    }

    #[test]
    fn spring_forward_gap_resolves_to_transition() {
        // 2026-03-29: Paris jumps from 02:00 to 03:00. Slots 4 and 5 do not
        // exist and collapse onto 03:00 CEST == 01:00 UTC.
        let g = grid();
        let d = date(2026, 3, 29);
        let transition = Utc.with_ymd_and_hms(2026, 3, 29, 1, 0, 0).unwrap();
        assert_eq!(g.boundary(d, 4), transition);
        assert_eq!(g.boundary(d, 5), transition);
        assert_eq!(g.boundary(d, 6), transition);
        assert_eq!(g.slot(d, 4).duration(), Duration::zero());
        assert_eq!(g.day(d).duration(), Duration::hours(23));
    }

    #[test]
    fn selection_inside_spring_forward_gap_is_rejected() {
        let g = grid();
        let d = date(2026, 3, 29);
        assert_eq!(
            g.compute_range(d, &[4, 5]),
            Err(BookingError::ClockChange { slots: vec![4, 5] })
        );
        assert_eq!(
            g.compute_range(d, &[3, 4]),
            Err(BookingError::ClockChange { slots: vec![4] })
        );

        // Either side of the gap books normally.
        let before = g.compute_range(d, &[2, 3]).unwrap();
        assert_eq!(before.range.duration(), Duration::hours(1));
        let after = g.compute_range(d, &[6, 7]).unwrap();
        assert_eq!(after.range.start, Utc.with_ymd_and_hms(2026, 3, 29, 1, 0, 0).unwrap());
        assert_eq!(after.range.duration(), Duration::hours(1));
    }

    #[test]
    fn repeated_fall_back_hour_is_rejected() {
        // 2026-10-25: slot 5 would run from 02:30 CEST to 03:00 CET, 90 minutes.
        let g = grid();
        let d = date(2026, 10, 25);
        assert_eq!(
            g.compute_range(d, &[4, 5]),
            Err(BookingError::ClockChange { slots: vec![5] })
        );
        assert!(!g.is_regular(d, 5));

        for slots in [vec![4], vec![6, 7], vec![0, 1, 2, 3, 4]] {
            let r = g.compute_range(d, &slots).unwrap();
            assert_eq!(r.range.duration(), Duration::minutes(30 * slots.len() as i64));
        }
    }

    #[test]
    fn regular_days_have_no_irregular_slots() {
        let g = grid();
        let d = date(2026, 6, 10);
        assert!((0..SLOTS_PER_DAY).all(|i| g.is_regular(d, i)));
    }

    #[test]
    fn fall_back_ambiguity_takes_earlier_instant() {
        // 2026-10-25: 02:30 local happens twice; the first is 00:30 UTC.
        let start = grid().boundary(date(2026, 10, 25), 5);
        assert_eq!(start, Utc.with_ymd_and_hms(2026, 10, 25, 0, 30, 0).unwrap());
    }

    #[test]
    fn day_covers_both_midnights() {
        let day = grid().day(date(2026, 1, 15));
        assert_eq!(day.start, Utc.with_ymd_and_hms(2026, 1, 14, 23, 0, 0).unwrap());
        assert_eq!(day.duration(), Duration::hours(24));
    }

    #[test]
    fn minute_labels() {
        assert_eq!(minute_label(0), "00:00");
        assert_eq!(minute_label(8 * 60 + 30), "08:30");
        assert_eq!(minute_label(1440), "24:00");
    }
}
