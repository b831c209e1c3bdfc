use std::fmt;
use std::str::FromStr;

use thiserror::Error;

const PER_REQUEST_PREFIX: &str = "uploads";

/// How the object key for an upload is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ObjectKeyStrategy {
    /// Every upload overwrites the same key. Concurrent invocations race.
    #[default]
    Fixed,
    /// Every upload gets its own key, partitioned by date and request id.
    PerRequest,
}

impl ObjectKeyStrategy {
    fn as_str(self) -> &'static str {
        match self {
            Self::Fixed => "fixed",
            Self::PerRequest => "per_request",
        }
    }
}

impl fmt::Display for ObjectKeyStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown object key strategy `{0}` (expected `fixed` or `per_request`)")]
pub struct UnknownKeyStrategy(pub String);

impl FromStr for ObjectKeyStrategy {
    type Err = UnknownKeyStrategy;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "fixed" => Ok(Self::Fixed),
            "per_request" | "per-request" => Ok(Self::PerRequest),
            other => Err(UnknownKeyStrategy(other.to_string())),
        }
    }
}

pub fn upload_object_key(
    strategy: ObjectKeyStrategy,
    base_key: &str,
    run_date: &str,
    request_id: &str,
) -> String {
    let base_key = base_key.trim_matches('/');
    match strategy {
        ObjectKeyStrategy::Fixed => base_key.to_string(),
        ObjectKeyStrategy::PerRequest => format!(
            "{PER_REQUEST_PREFIX}/run_date={run_date}/request_id={request_id}/{base_key}"
        ),
    }
}
