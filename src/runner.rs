use anyhow::Result;
use tracing::info;

use crate::config::{load_endpoints, CheckerConfig};
use crate::prober::http::HttpChecker;
use crate::report::{write_report, CheckResult};

pub struct Runner {
    config: CheckerConfig,
    checker: HttpChecker,
}

impl Runner {
    pub fn new(config: CheckerConfig) -> Result<Self> {
        let checker = HttpChecker::new(config.timeout())?;
        Ok(Self { config, checker })
    }

    /// Load, probe one endpoint at a time in input order, then write the report.
    /// Only loading and writing can fail.
    pub async fn run(&self) -> Result<Vec<CheckResult>> {
        let endpoints = load_endpoints(&self.config.input_path).await?;

        println!("Starting API checks...");
        let mut results = Vec::with_capacity(endpoints.len());
        for endpoint in &endpoints {
            println!("Checking ping for {}...", endpoint.name());
            results.push(self.checker.check(endpoint).await);
        }

        let active = results.iter().filter(|r| r.status() == Some("Active")).count();
        let timeouts = results.iter().filter(|r| r.ping() == Some("Timeout")).count();
        info!(total = results.len(), active, offline = results.len() - active, timeouts, "checks finished");

        write_report(&self.config.output_path, &results).await?;
        println!("Successfully updated {}", self.config.output_path.display());
        Ok(results)
    }
}
