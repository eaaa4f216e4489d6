use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub sync: SyncConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Base URL of the attendance backend, e.g. `https://api.ridelink.example`.
    pub endpoint: String,
    /// Per-record request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Whether the scheduler runs periodic passes while online.
    pub auto_sync: bool,
    /// Periodic pass cadence in seconds.
    pub sync_interval_secs: u64,
    /// Number of failure messages carried in a sync summary.
    pub max_reported_failures: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                url: "sqlite:data/ridelink.db?mode=rwc".to_string(),
                max_connections: 5,
            },
            sync: SyncConfig::default(),
        }
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8080".to_string(),
            request_timeout_secs: 10,
            auto_sync: true,
            sync_interval_secs: 300, // 5 minutes
            max_reported_failures: 5,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(v) = std::env::var("RIDELINK_DATABASE_URL") {
            if !v.trim().is_empty() {
                cfg.database.url = v;
            }
        }
        if let Ok(v) = std::env::var("RIDELINK_SYNC_ENDPOINT") {
            if !v.trim().is_empty() {
                cfg.sync.endpoint = v;
            }
        }
        if let Ok(v) = std::env::var("RIDELINK_SYNC_TIMEOUT_SECS") {
            if let Some(value) = parse_u64(&v) {
                cfg.sync.request_timeout_secs = value.max(1);
            }
        }
        if let Ok(v) = std::env::var("RIDELINK_AUTO_SYNC") {
            cfg.sync.auto_sync = parse_bool(&v, cfg.sync.auto_sync);
        }
        if let Ok(v) = std::env::var("RIDELINK_SYNC_INTERVAL_SECS") {
            if let Some(value) = parse_u64(&v) {
                cfg.sync.sync_interval_secs = value.max(1);
            }
        }

        cfg
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.database.max_connections == 0 {
            return Err("Database max_connections must be greater than 0".to_string());
        }
        if self.sync.endpoint.trim().is_empty() {
            return Err("Sync endpoint must not be empty".to_string());
        }
        if self.sync.request_timeout_secs == 0 {
            return Err("Sync request_timeout_secs must be greater than 0".to_string());
        }
        if self.sync.auto_sync && self.sync.sync_interval_secs == 0 {
            return Err("Sync sync_interval_secs must be greater than 0".to_string());
        }
        Ok(())
    }
}

fn parse_bool(s: &str, default: bool) -> bool {
    match s.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        _ => default,
    }
}

fn parse_u64(value: &str) -> Option<u64> {
    value.trim().parse::<u64>().ok()
}
