//! # Health Provider
//!
//! `/health` serializes whatever map the injected provider returns.

use async_trait::async_trait;
use std::collections::BTreeMap;

/// Flat string map reported by `/health`
pub type HealthReport = BTreeMap<String, String>;

/// Source of the `/health` payload
#[async_trait]
pub trait HealthProvider: Send + Sync {
    async fn health(&self) -> HealthReport;
}

/// Reports fixed process-level facts
#[derive(Debug, Clone)]
pub struct StaticHealth {
    report: HealthReport,
}

impl StaticHealth {
    pub fn new(service: impl Into<String>, version: impl Into<String>) -> Self {
        let mut report = HealthReport::new();
        report.insert("status".to_string(), "up".to_string());
        report.insert("service".to_string(), service.into());
        report.insert("version".to_string(), version.into());
        Self { report }
    }

    /// Builder: add an entry
    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.report.insert(key.into(), value.into());
        self
    }
}

#[async_trait]
impl HealthProvider for StaticHealth {
    async fn health(&self) -> HealthReport {
        self.report.clone()
    }
}
