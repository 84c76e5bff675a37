//! Infrastructure implementation of the `ConfigStore` port.

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::debug;

use crate::application::ports::ConfigStore;
use crate::domain::config::{CONFIG_ENV, KtestConfig, validate_config};

/// Production implementation of `ConfigStore` that uses a YAML file on disk.
pub struct YamlConfigStore;

impl ConfigStore for YamlConfigStore {
    fn load(&self) -> Result<KtestConfig> {
        let path = self.path()?;
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(KtestConfig::default());
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        let config: KtestConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("cannot parse {}", path.display()))?;
        validate_config(&config).with_context(|| format!("invalid config {}", path.display()))?;
        Ok(config)
    }

    fn save(&self, config: &KtestConfig) -> Result<()> {
        let path = self.path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("cannot create {}", parent.display()))?;
        }
        let content = serde_yaml::to_string(config).context("cannot serialize config")?;
        std::fs::write(&path, content)
            .with_context(|| format!("cannot write {}", path.display()))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o600))
                .with_context(|| format!("cannot set permissions on {}", path.display()))?;
        }
        Ok(())
    }

    fn path(&self) -> Result<PathBuf> {
        if let Ok(val) = std::env::var(CONFIG_ENV) {
            return Ok(PathBuf::from(val));
        }
        let home =
            dirs::home_dir().ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))?;
        Ok(home.join(".ktest").join("config.yaml"))
    }
}
