//! Venue model.
//!
//! Venues are the places meetings are held. The resolver keeps one
//! interval list per venue; two meetings conflict only if they share a
//! venue and their intervals overlap.

use serde::{Deserialize, Serialize};

/// A place a meeting can be held.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    /// Unique venue identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Street address.
    pub address: String,
    /// Advertised head count, when known.
    pub capacity: Option<u32>,
}

impl Venue {
    /// Creates a venue with the given ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            address: String::new(),
            capacity: None,
        }
    }

    /// Sets the venue name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the address.
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    /// Sets the capacity.
    pub fn with_capacity(mut self, capacity: u32) -> Self {
        self.capacity = Some(capacity);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_venue_builder() {
        let v = Venue::new("12")
            .with_name("Riverside Loft")
            .with_address("3F, 8 Harbor Rd")
            .with_capacity(40);

        assert_eq!(v.id, "12");
        assert_eq!(v.name, "Riverside Loft");
        assert_eq!(v.address, "3F, 8 Harbor Rd");
        assert_eq!(v.capacity, Some(40));
    }

    #[test]
    fn test_venue_defaults() {
        let v = Venue::new("1");
        assert!(v.name.is_empty());
        assert_eq!(v.capacity, None);
    }
}
