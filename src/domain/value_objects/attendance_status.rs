use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Outcome of one attendance observation. The serialized spellings are part
/// of the export/import format and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
}

impl AttendanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "Present",
            AttendanceStatus::Absent => "Absent",
            AttendanceStatus::Late => "Late",
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttendanceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Present" => Ok(AttendanceStatus::Present),
            "Absent" => Ok(AttendanceStatus::Absent),
            "Late" => Ok(AttendanceStatus::Late),
            other => Err(format!("Unknown attendance status: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialized_spelling_is_stable() {
        let json = serde_json::to_string(&AttendanceStatus::Present).unwrap();
        assert_eq!(json, "\"Present\"");
        let parsed: AttendanceStatus = serde_json::from_str("\"Late\"").unwrap();
        assert_eq!(parsed, AttendanceStatus::Late);
    }

    #[test]
    fn unknown_spelling_is_rejected() {
        assert!("present".parse::<AttendanceStatus>().is_err());
    }
}
