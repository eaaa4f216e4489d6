use serde::{Deserialize, Serialize};
use std::fmt;

/// Reference to the transportation trip an attendance record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TripId(i64);

impl TripId {
    pub fn new(value: i64) -> Result<Self, String> {
        if value <= 0 {
            return Err("Trip ID must be a positive integer".to_string());
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for TripId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_values() {
        assert!(TripId::new(0).is_err());
        assert!(TripId::new(-1).is_err());
        assert_eq!(TripId::new(7).unwrap().value(), 7);
    }
}
