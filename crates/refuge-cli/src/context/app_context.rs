use std::path::Path;

use anyhow::Context;
use refuge_config::RefugeConfig;
use refuge_db::retry::RetryConfig;
use refuge_db::service::RefugeService;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub service: RefugeService,
    pub config: RefugeConfig,
}

impl AppContext {
    /// Open the database named by `db_override` or `config.database.path`,
    /// creating its parent directory when needed.
    pub async fn init(mut config: RefugeConfig, db_override: Option<&str>) -> anyhow::Result<Self> {
        if let Some(path) = db_override {
            config.database.path = path.to_string();
        }
        config.validate()?;

        let db_path = config.database.path.clone();
        if !config.database.is_in_memory() {
            ensure_parent_dir(Path::new(&db_path))?;
        }

        let retry = RetryConfig::from(&config.resolver);
        let service = RefugeService::new_local(&db_path, retry)
            .await
            .with_context(|| format!("failed to open refuge database at {db_path}"))?;
        tracing::debug!(path = %db_path, "refuge database ready");

        Ok(Self { service, config })
    }
}

fn ensure_parent_dir(path: &Path) -> anyhow::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.exists() => {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))
        }
        _ => Ok(()),
    }
}
