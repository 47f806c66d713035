//! Day availability projection

use chrono::{NaiveDate, NaiveTime, Timelike};

use super::interval::TimeRange;
use super::slot_grid::{minute_label, SlotGrid, SLOT_MINUTES};

const MINUTES_PER_DAY: u32 = 24 * 60;

/// Owner-configured daily bookable hours, `[from, to)` in local time.
///
/// An end of `00:00` means the end of the day. A window whose end is not
/// after its start has no bookable slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperatingWindow {
    pub from: NaiveTime,
    pub to: NaiveTime,
}

impl OperatingWindow {
    pub fn new(from: NaiveTime, to: NaiveTime) -> Self {
        Self { from, to }
    }

    /// Start as minutes past midnight, seconds truncated.
    pub fn start_minute(&self) -> u32 {
        self.from.hour() * 60 + self.from.minute()
    }

    /// End as minutes past midnight, with `00:00` read as `24:00`.
    pub fn end_minute(&self) -> u32 {
        match self.to.hour() * 60 + self.to.minute() {
            0 => MINUTES_PER_DAY,
            m => m,
        }
    }
}

/// One projected slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeSlot {
    /// Position on the absolute 0-47 grid.
    pub index: i32,
    /// Local start, "HH:MM".
    pub start: String,
    /// Local end, "HH:MM" ("24:00" for the last slot of the day).
    pub end: String,
    pub available: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayAvailability {
    pub date: NaiveDate,
    pub slots: Vec<TimeSlot>,
}

/// Projects a station's day into bookable and taken slots.
#[derive(Debug, Clone, Copy)]
pub struct AvailabilityProjector {
    grid: SlotGrid,
}

impl AvailabilityProjector {
    pub fn new(grid: SlotGrid) -> Self {
        Self { grid }
    }

    /// `occupied` holds the ranges of the active reservations overlapping
    /// the day. A slot is unavailable iff its range overlaps one of them,
    /// or a daylight-saving change makes it anything but 30 minutes long.
    ///
    /// Slots sit on the absolute grid: an unaligned window start is rounded
    /// up to the next slot boundary, so every projected slot has the range
    /// `SlotGrid::slot` books for the same index.
    pub fn project(
        &self,
        date: NaiveDate,
        window: Option<&OperatingWindow>,
        occupied: &[TimeRange],
    ) -> DayAvailability {
        let (from, to) = window
            .map(|w| (w.start_minute(), w.end_minute()))
            .unwrap_or((0, MINUTES_PER_DAY));

        let step = SLOT_MINUTES as u32;
        let mut slots = Vec::new();
        let mut index = from.div_ceil(step);
        // Partial trailing slots are dropped.
        while (index + 1) * step <= to {
            let range = self.grid.slot(date, index as i32);
            let free = self.grid.is_regular(date, index as i32)
                && !occupied.iter().any(|r| r.overlaps(&range));

            slots.push(TimeSlot {
                index: index as i32,
                start: minute_label(index * step),
                end: minute_label((index + 1) * step),
                available: free,
            });
            index += 1;
        }

        DayAvailability { date, slots }
    }
}
