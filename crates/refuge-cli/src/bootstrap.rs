use anyhow::Context;
use refuge_config::RefugeConfig;

/// Load `.env` from the current directory or its ancestors, then the layered config.
pub fn load_config() -> anyhow::Result<RefugeConfig> {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!(path = %path.display(), "loaded dotenv file"),
        Err(error) if error.not_found() => {}
        Err(error) => return Err(error).context("failed to load .env file"),
    }

    RefugeConfig::load().context("failed to load refuge configuration")
}
