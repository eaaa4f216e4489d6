use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// How an attendance observation was captured on the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CaptureMethod {
    Manual,
    #[serde(rename = "RFID")]
    Rfid,
    Photo,
}

impl CaptureMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            CaptureMethod::Manual => "Manual",
            CaptureMethod::Rfid => "RFID",
            CaptureMethod::Photo => "Photo",
        }
    }
}

impl fmt::Display for CaptureMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CaptureMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Manual" => Ok(CaptureMethod::Manual),
            "RFID" => Ok(CaptureMethod::Rfid),
            "Photo" => Ok(CaptureMethod::Photo),
            other => Err(format!("Unknown capture method: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rfid_keeps_uppercase_spelling() {
        let json = serde_json::to_string(&CaptureMethod::Rfid).unwrap();
        assert_eq!(json, "\"RFID\"");
        let parsed: CaptureMethod = serde_json::from_str("\"RFID\"").unwrap();
        assert_eq!(parsed, CaptureMethod::Rfid);
    }
}
