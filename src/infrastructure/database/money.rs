//! Money columns are stored as integer cents.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::domain::{DomainError, DomainResult};

pub fn to_cents(amount: Decimal) -> DomainResult<i64> {
    (amount * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or_else(|| DomainError::Validation(format!("amount {} does not fit in cents", amount)))
}

pub fn from_cents(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}
