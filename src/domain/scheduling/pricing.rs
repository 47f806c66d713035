//! Booking price calculation

use rust_decimal::{Decimal, RoundingStrategy};

use crate::shared::errors::{BookingError, BookingResult};

/// Flat fee added to every booking, in currency units (0.50).
pub const SERVICE_FEE: Decimal = Decimal::from_parts(50, 0, 0, false, 2);

/// Hours covered by one slot (0.5).
const HOURS_PER_SLOT: Decimal = Decimal::from_parts(5, 0, 0, false, 1);

/// Detailed price of a slot selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceBreakdown {
    pub hourly_rate: Decimal,
    pub duration_hours: Decimal,
    pub base_amount: Decimal,
    pub service_fee: Decimal,
    pub total: Decimal,
}

pub struct PricingCalculator;

impl PricingCalculator {
    /// `round_half_up(rate × slots × 0.5 + SERVICE_FEE, 2)`
    pub fn compute_price(hourly_rate: Decimal, slot_count: usize) -> BookingResult<Decimal> {
        Self::breakdown(hourly_rate, slot_count).map(|b| b.total)
    }

    pub fn breakdown(hourly_rate: Decimal, slot_count: usize) -> BookingResult<PriceBreakdown> {
        if hourly_rate.is_sign_negative() && !hourly_rate.is_zero() {
            return Err(BookingError::InvalidRate(hourly_rate));
        }

        let duration_hours = HOURS_PER_SLOT * Decimal::from(slot_count as u64);
        let base_amount = hourly_rate * duration_hours;
        let total = (base_amount + SERVICE_FEE)
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

        Ok(PriceBreakdown {
            hourly_rate,
            duration_hours,
            base_amount,
            service_fee: SERVICE_FEE,
            total,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn one_hour_at_ten_per_hour() {
        assert_eq!(PricingCalculator::compute_price(dec!(10.00), 2).unwrap(), dec!(10.50));
    }

    #[test]
    fn single_slot_is_half_an_hour() {
        let b = PricingCalculator::breakdown(dec!(3.00), 1).unwrap();
        assert_eq!(b.duration_hours, dec!(0.5));
        assert_eq!(b.base_amount, dec!(1.50));
        assert_eq!(b.service_fee, dec!(0.50));
        assert_eq!(b.total, dec!(2.00));
    }

    #[test]
    fn rounds_half_up_to_cents() {
        // 0.125 × 0.5 = 0.0625; + 0.50 = 0.5625 -> 0.56
        assert_eq!(PricingCalculator::compute_price(dec!(0.125), 1).unwrap(), dec!(0.56));
        // 0.01 × 0.5 = 0.005; + 0.50 = 0.505 -> 0.51
        assert_eq!(PricingCalculator::compute_price(dec!(0.01), 1).unwrap(), dec!(0.51));
    }

    #[test]
    fn total_always_has_two_decimal_places() {
        let total = PricingCalculator::compute_price(dec!(7), 3).unwrap();
        assert_eq!(total, dec!(11.00));
        assert_eq!(total.to_string(), "11.00");
    }

    #[test]
    fn free_station_only_charges_service_fee() {
        assert_eq!(PricingCalculator::compute_price(Decimal::ZERO, 48).unwrap(), dec!(0.50));
    }

    #[test]
    fn negative_rate_is_rejected() {
        assert_eq!(
            PricingCalculator::compute_price(dec!(-1.00), 2),
            Err(BookingError::InvalidRate(dec!(-1.00)))
        );
    }
}
