use rust_decimal::Decimal;

use crate::domain::reservation::StationSnapshot;
use crate::domain::scheduling::OperatingWindow;

/// Postal address of the location a station belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostalAddress {
    pub street: String,
    pub postal_code: String,
    pub city: String,
}

impl std::fmt::Display for PostalAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {} {}", self.street, self.postal_code, self.city)
    }
}

/// A charging station with the facts needed to book and bill it.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    pub id: i64,
    pub name: String,
    /// Currency units per hour
    pub hourly_rate: Decimal,
    /// Owner switch; inactive stations show as unavailable
    pub is_active: bool,
    /// Daily bookable hours, `None` for all day
    pub operating_window: Option<OperatingWindow>,
    pub location_id: i64,
    pub address: PostalAddress,
}

impl Station {
    /// Freeze the billing-relevant facts for a new reservation.
    pub fn snapshot(&self) -> StationSnapshot {
        StationSnapshot {
            name: self.name.clone(),
            address: self.address.to_string(),
            hourly_rate: self.hourly_rate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn station() -> Station {
        Station {
            id: 1,
            name: "Borne Gare Nord".into(),
            hourly_rate: dec!(4.20),
            is_active: true,
            operating_window: None,
            location_id: 9,
            address: PostalAddress {
                street: "18 rue de Dunkerque".into(),
                postal_code: "75010".into(),
                city: "Paris".into(),
            },
        }
    }

    #[test]
    fn address_is_rendered_on_one_line() {
        assert_eq!(station().address.to_string(), "18 rue de Dunkerque, 75010 Paris");
    }

    #[test]
    fn snapshot_copies_billing_facts() {
        let snap = station().snapshot();
        assert_eq!(snap.name, "Borne Gare Nord");
        assert_eq!(snap.address, "18 rue de Dunkerque, 75010 Paris");
        assert_eq!(snap.hourly_rate, dec!(4.20));
    }
}
