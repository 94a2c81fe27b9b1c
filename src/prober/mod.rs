use serde::{Serialize, Serializer};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

pub mod http;

/// Fixed user agent sent with every probe.
pub const USER_AGENT: &str = "Mozilla/5.0 (WhatsApp Bot API Checker)";

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum Status {
    Active,
    Offline,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Active => f.write_str("Active"),
            Status::Offline => f.write_str("Offline"),
        }
    }
}

impl Status {
    /// Any response below 500 means the host is up, client errors included.
    pub fn from_status_code(code: u16) -> Self {
        if (200..500).contains(&code) {
            Status::Active
        } else {
            Status::Offline
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ping {
    Millis(u128),
    Timeout,
    Error,
}

impl Ping {
    pub fn from_elapsed(elapsed: Duration) -> Self {
        Ping::Millis(elapsed.as_millis())
    }
}

impl fmt::Display for Ping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ping::Millis(ms) => write!(f, "{} ms", ms),
            Ping::Timeout => f.write_str("Timeout"),
            Ping::Error => f.write_str("Error"),
        }
    }
}

impl Serialize for Ping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Why a probe produced no usable response.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("no response headers within {0:?}")]
    Timeout(Duration),

    #[error("endpoint has no string url")]
    MissingUrl,

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
}

impl ProbeError {
    pub fn ping(&self) -> Ping {
        match self {
            ProbeError::Timeout(_) => Ping::Timeout,
            ProbeError::Request(e) if e.is_timeout() => Ping::Timeout,
            ProbeError::MissingUrl | ProbeError::Request(_) => Ping::Error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_code_policy() {
        assert_eq!(Status::from_status_code(200), Status::Active);
        assert_eq!(Status::from_status_code(301), Status::Active);
        assert_eq!(Status::from_status_code(401), Status::Active);
        assert_eq!(Status::from_status_code(499), Status::Active);
        assert_eq!(Status::from_status_code(500), Status::Offline);
        assert_eq!(Status::from_status_code(503), Status::Offline);
        assert_eq!(Status::from_status_code(101), Status::Offline);
    }

    #[test]
    fn ping_renders_as_plain_strings() {
        assert_eq!(Ping::from_elapsed(Duration::from_micros(123_900)).to_string(), "123 ms");
        assert_eq!(serde_json::to_value(Ping::Millis(0)).unwrap(), "0 ms");
        assert_eq!(serde_json::to_value(Ping::Timeout).unwrap(), "Timeout");
        assert_eq!(serde_json::to_value(Ping::Error).unwrap(), "Error");
        assert_eq!(serde_json::to_value(Status::Offline).unwrap(), "Offline");
    }

    #[test]
    fn timeout_error_maps_to_timeout_ping() {
        assert_eq!(ProbeError::Timeout(Duration::from_secs(10)).ping(), Ping::Timeout);
        assert_eq!(ProbeError::MissingUrl.ping(), Ping::Error);
    }
}
