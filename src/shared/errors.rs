use thiserror::Error;

/// Errors raised by repositories and other collaborators of the booking core.
#[derive(Debug, Clone, Error)]
pub enum DomainError {
    #[error("Validation: {0}")]
    Validation(String),

    #[error("Already exists: {0}")]
    Conflict(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        DomainError::Storage(e.to_string())
    }
}

impl<E> From<sea_orm::TransactionError<E>> for DomainError
where
    E: std::error::Error + Into<DomainError>,
{
    fn from(e: sea_orm::TransactionError<E>) -> Self {
        match e {
            sea_orm::TransactionError::Connection(db) => db.into(),
            sea_orm::TransactionError::Transaction(inner) => inner.into(),
        }
    }
}

/// Typed outcomes of the booking engine.
///
/// Every variant is recoverable at the request boundary. `SlotConflict`
/// carries only the slot indices the caller asked for, never anything about
/// the reservation it collided with.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BookingError {
    #[error("No slot selected")]
    EmptySelection,

    #[error("Slots out of range [0, 48): {slots:?}")]
    OutOfRange { slots: Vec<i32> },

    #[error("Slots must be consecutive: {slots:?}")]
    NonContiguous { slots: Vec<i32> },

    /// The slots fall on a clock change and do not span 30 minutes each.
    #[error("Slots cross a daylight-saving clock change: {slots:?}")]
    ClockChange { slots: Vec<i32> },

    #[error("Hourly rate must be a non-negative amount, got {0}")]
    InvalidRate(rust_decimal::Decimal),

    #[error("One or more slots are already booked: {slots:?}")]
    SlotConflict { slots: Vec<i32> },

    #[error("Charging station {0} not found")]
    StationNotFound(i64),

    #[error("User {0} not found")]
    UserNotFound(String),

    #[error("Booking {0} not found")]
    BookingNotFound(i64),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl BookingError {
    /// Stable machine-readable code, used in API error payloads and metrics labels.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptySelection => "EMPTY_SELECTION",
            Self::OutOfRange { .. } => "OUT_OF_RANGE",
            Self::NonContiguous { .. } => "NON_CONTIGUOUS",
            Self::ClockChange { .. } => "CLOCK_CHANGE",
            Self::InvalidRate(_) => "INVALID_RATE",
            Self::SlotConflict { .. } => "SLOT_CONFLICT",
            Self::StationNotFound(_) => "STATION_NOT_FOUND",
            Self::UserNotFound(_) => "USER_NOT_FOUND",
            Self::BookingNotFound(_) => "BOOKING_NOT_FOUND",
            Self::Storage(_) => "STORAGE_ERROR",
        }
    }
}

impl From<DomainError> for BookingError {
    fn from(e: DomainError) -> Self {
        // Repositories report missing rows as `Ok(None)`; anything surfacing
        // here is a store failure and must not be masked.
        BookingError::Storage(e.to_string())
    }
}

pub type BookingResult<T> = Result<T, BookingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn db_errors_map_to_storage() {
        let err: DomainError = sea_orm::DbErr::Custom("disk full".into()).into();
        assert!(matches!(err, DomainError::Storage(_)));
        assert!(err.to_string().contains("disk full"));
    }

    #[test]
    fn domain_errors_never_become_not_found() {
        let err: BookingError = DomainError::Validation("unknown status".into()).into();
        assert_eq!(err.code(), "STORAGE_ERROR");
    }

    #[test]
    fn conflict_message_only_mentions_requested_slots() {
        let err = BookingError::SlotConflict { slots: vec![10, 11] };
        assert_eq!(
            err.to_string(),
            "One or more slots are already booked: [10, 11]"
        );
    }
}
