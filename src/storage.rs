use crate::models::DashboardSummary;
use std::{env, path::Path, path::PathBuf};
use tokio::fs;
use tracing::error;

pub fn resolve_summary_path() -> PathBuf {
    if let Ok(path) = env::var("SUMMARY_PATH") {
        return PathBuf::from(path);
    }

    PathBuf::from("data/summary.json")
}

/// Load the dashboard summary written by the reporting job. A missing or
/// unreadable file degrades to an empty dashboard rather than refusing to
/// start.
pub async fn load_summary(path: &Path) -> DashboardSummary {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(summary) => summary,
            Err(err) => {
                error!("failed to parse summary file: {err}");
                DashboardSummary::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => DashboardSummary::default(),
        Err(err) => {
            error!("failed to read summary file: {err}");
            DashboardSummary::default()
        }
    }
}
