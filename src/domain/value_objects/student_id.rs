use serde::{Deserialize, Serialize};
use std::fmt;

/// Reference to the student an attendance record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StudentId(i64);

impl StudentId {
    pub fn new(value: i64) -> Result<Self, String> {
        if value <= 0 {
            return Err("Student ID must be a positive integer".to_string());
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_values() {
        assert!(StudentId::new(0).is_err());
        assert!(StudentId::new(-3).is_err());
        assert_eq!(StudentId::new(42).unwrap().value(), 42);
    }
}
