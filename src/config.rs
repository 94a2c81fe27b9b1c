use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;

const DEFAULT_INPUT_FILE: &str = "api_list.json";
const DEFAULT_OUTPUT_FILE: &str = "data.json";
const DEFAULT_TIMEOUT_MS: u64 = 10_000;

#[derive(Debug, Clone, PartialEq)]
pub struct CheckerConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub timeout_ms: u64,
    pub log_level: String,
}

impl CheckerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary variable source. Unset variables fall
    /// back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let input_path = lookup("API_LIST").unwrap_or_else(|| DEFAULT_INPUT_FILE.to_string());
        let output_path = lookup("OUTPUT_FILE").unwrap_or_else(|| DEFAULT_OUTPUT_FILE.to_string());

        let timeout_ms = match lookup("CHECK_TIMEOUT_MS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("Invalid CHECK_TIMEOUT_MS: {}", raw))?,
            None => DEFAULT_TIMEOUT_MS,
        };
        if timeout_ms == 0 {
            return Err(anyhow::anyhow!("CHECK_TIMEOUT_MS must be greater than zero"));
        }

        let config = CheckerConfig {
            input_path: PathBuf::from(input_path),
            output_path: PathBuf::from(output_path),
            timeout_ms,
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        };
        config.validate_log_level()?;
        Ok(config)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Get the log level as a tracing::Level
    pub fn get_tracing_level(&self) -> Result<tracing::Level> {
        match self.log_level.to_lowercase().as_str() {
            "trace" => Ok(tracing::Level::TRACE),
            "debug" => Ok(tracing::Level::DEBUG),
            "info" => Ok(tracing::Level::INFO),
            "warn" | "warning" => Ok(tracing::Level::WARN),
            "error" => Ok(tracing::Level::ERROR),
            _ => Err(anyhow::anyhow!("Invalid log level: {}. Valid levels are: trace, debug, info, warn, error", self.log_level))
        }
    }

    pub fn validate_log_level(&self) -> Result<()> {
        self.get_tracing_level().map(|_| ())
    }
}

/// One entry of the input list. All fields are kept in their original order.
/// `name` and `url` are not checked here; a bad `url` fails at probe time.
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoint {
    fields: Map<String, Value>,
}

impl Endpoint {
    pub fn from_fields(fields: Map<String, Value>) -> Self {
        Endpoint { fields }
    }

    /// Label for progress lines and logs. A missing `name` reads `undefined`,
    /// a non-string one is rendered as JSON.
    pub fn name(&self) -> String {
        match self.fields.get("name") {
            Some(Value::String(name)) => name.clone(),
            Some(other) => other.to_string(),
            None => "undefined".to_string(),
        }
    }

    /// `None` when `url` is missing or not a string.
    pub fn url(&self) -> Option<&str> {
        self.fields.get("url").and_then(Value::as_str)
    }

    /// String-valued entries of the optional `headers` object.
    pub fn headers(&self) -> Vec<(&str, &str)> {
        let Some(Value::Object(headers)) = self.fields.get("headers") else {
            return Vec::new();
        };
        headers
            .iter()
            .filter_map(|(name, value)| match value.as_str() {
                Some(v) => Some((name.as_str(), v)),
                None => {
                    tracing::warn!(endpoint = %self.name(), header = %name, "skipping non-string header value");
                    None
                }
            })
            .collect()
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

pub async fn load_endpoints(file_path: &Path) -> Result<Vec<Endpoint>> {
    if !file_path.exists() {
        return Err(anyhow::anyhow!(
            "Endpoint list not found: {}. Please create it with your API array.",
            file_path.display()
        ));
    }

    let content = fs::read_to_string(file_path)
        .await
        .with_context(|| format!("Failed to read {}", file_path.display()))?;
    let document: Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {} as JSON", file_path.display()))?;

    let Value::Array(entries) = document else {
        return Err(anyhow::anyhow!("{} must contain a JSON array of endpoints", file_path.display()));
    };

    entries
        .into_iter()
        .enumerate()
        .map(|(idx, entry)| match entry {
            Value::Object(fields) => Ok(Endpoint::from_fields(fields)),
            _ => Err(anyhow::anyhow!("Endpoint at index {} in {} is not an object", idx, file_path.display())),
        })
        .collect()
}
