use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::Path;
use tokio::fs;

use crate::config::Endpoint;
use crate::prober::{Ping, Status};

/// An endpoint descriptor annotated with its probe outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CheckResult {
    fields: Map<String, Value>,
}

impl CheckResult {
    /// Copies every descriptor field, then sets `status` and `ping`. Keys that
    /// already exist keep their position and take the new value.
    pub fn new(endpoint: &Endpoint, status: Status, ping: Ping) -> Self {
        let mut fields = Map::with_capacity(endpoint.fields().len() + 2);
        for (key, value) in endpoint.fields() {
            fields.insert(key.clone(), value.clone());
        }
        fields.insert("status".to_string(), Value::String(status.to_string()));
        fields.insert("ping".to_string(), Value::String(ping.to_string()));
        CheckResult { fields }
    }

    pub fn status(&self) -> Option<&str> {
        self.fields.get("status").and_then(Value::as_str)
    }

    pub fn ping(&self) -> Option<&str> {
        self.fields.get("ping").and_then(Value::as_str)
    }

    #[cfg(test)]
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

/// Write the full result list as indented JSON, replacing whatever was there.
pub async fn write_report(path: &Path, results: &[CheckResult]) -> Result<()> {
    let mut body = serde_json::to_string_pretty(results).context("Failed to serialize results")?;
    body.push('\n');
    fs::write(path, body)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))
}
