pub mod availability;
pub mod interval;
pub mod pricing;
pub mod slot_grid;

pub use availability::{AvailabilityProjector, DayAvailability, OperatingWindow, TimeSlot};
pub use interval::TimeRange;
pub use pricing::{PriceBreakdown, PricingCalculator, SERVICE_FEE};
pub use slot_grid::{SlotGrid, SlotRange, SLOTS_PER_DAY, SLOT_MINUTES};
