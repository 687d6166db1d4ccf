//! Centralized configuration management for cartorio

use std::path::PathBuf;
use std::time::Duration;
use anyhow::{Result, Context};

use crate::escritura::review::Reviewer;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the SQLite database file
    pub database_path: PathBuf,
    /// Directory for exported deed text files
    pub export_dir: PathBuf,
    /// Directory where submitted PDF attachments are stored
    pub attachments_dir: PathBuf,
    /// Reviewer identity stamped on approve/reject
    pub reviewer: Reviewer,
    /// Pacing of the simulated generation pipeline
    pub timings: PipelineTimings,
}

/// Phase delays of the submission pipeline (milliseconds)
#[derive(Debug, Clone)]
pub struct PipelineTimings {
    /// Pause after attachments are registered (submitted, 20%)
    pub upload_ms: u64,
    /// Pause while the draft is generated (processing, 60%)
    pub generation_ms: u64,
    /// Pause after completion before navigating back to the dashboard
    pub completion_ms: u64,
}

impl Default for PipelineTimings {
    fn default() -> Self {
        Self {
            upload_ms: 1200,
            generation_ms: 1200,
            completion_ms: 800,
        }
    }
}

impl PipelineTimings {
    /// All-zero timings, used by tests and batch CLI runs
    pub fn zero() -> Self {
        Self {
            upload_ms: 0,
            generation_ms: 0,
            completion_ms: 0,
        }
    }
}

impl Config {
    /// Load configuration from environment variables and defaults
    pub fn from_env() -> Result<Self> {
        let database_path = std::env::var("CARTORIO_DB_PATH")
            .unwrap_or_else(|_| "./cartorio.db".to_string())
            .into();

        let export_dir = std::env::var("CARTORIO_EXPORT_DIR")
            .unwrap_or_else(|_| "./exportados".to_string())
            .into();

        let attachments_dir = std::env::var("CARTORIO_ANEXOS_DIR")
            .unwrap_or_else(|_| "./anexos".to_string())
            .into();

        let reviewer = Reviewer {
            full_name: std::env::var("CARTORIO_REVISOR_NOME")
                .unwrap_or_else(|_| "Usuário Exemplo".to_string()),
            email: std::env::var("CARTORIO_REVISOR_EMAIL")
                .unwrap_or_else(|_| "usuario@exemplo.com".to_string()),
        };

        let timings = PipelineTimings {
            upload_ms: parse_env_var("CARTORIO_FASE_UPLOAD_MS")?.unwrap_or(1200),
            generation_ms: parse_env_var("CARTORIO_FASE_GERACAO_MS")?.unwrap_or(1200),
            completion_ms: parse_env_var("CARTORIO_FASE_CONCLUSAO_MS")?.unwrap_or(800),
        };

        Ok(Config {
            database_path,
            export_dir,
            attachments_dir,
            reviewer,
            timings,
        })
    }

    /// Get database path as string
    pub fn database_path_str(&self) -> &str {
        self.database_path.to_str().unwrap_or("./cartorio.db")
    }

    /// Get export directory as string
    pub fn export_dir_str(&self) -> &str {
        self.export_dir.to_str().unwrap_or("./exportados")
    }

    /// Get completion pause as Duration
    pub fn completion_delay(&self) -> Duration {
        Duration::from_millis(self.timings.completion_ms)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        // Check if parent directory of database exists
        if let Some(parent) = self.database_path.parent() {
            if !parent.exists() {
                return Err(anyhow::anyhow!(
                    "Database parent directory does not exist: {}",
                    parent.display()
                ));
            }
        }

        std::fs::create_dir_all(&self.export_dir)
            .with_context(|| format!("Cannot create export directory: {}", self.export_dir.display()))?;

        std::fs::create_dir_all(&self.attachments_dir)
            .with_context(|| format!("Cannot create attachments directory: {}", self.attachments_dir.display()))?;

        Ok(())
    }
}

/// Helper function to parse environment variable as a specific type
fn parse_env_var<T>(var_name: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display + Send + Sync + std::error::Error + 'static,
{
    match std::env::var(var_name) {
        Ok(val) => val.parse().map(Some).with_context(|| {
            format!("Failed to parse environment variable {} = '{}'", var_name, val)
        }),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::from_env().unwrap();
        assert_eq!(config.database_path_str(), "./cartorio.db");
        assert_eq!(config.export_dir_str(), "./exportados");
        assert_eq!(config.reviewer.email, "usuario@exemplo.com");
        assert_eq!(config.timings.upload_ms, 1200);
        assert_eq!(config.timings.generation_ms, 1200);
        assert_eq!(config.timings.completion_ms, 800);
    }

    #[test]
    fn test_zero_timings() {
        let timings = PipelineTimings::zero();
        assert_eq!(timings.upload_ms, 0);
        assert_eq!(timings.generation_ms, 0);
        assert_eq!(timings.completion_ms, 0);
    }
}
