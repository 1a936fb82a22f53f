//! Shared command context: config, session store, API backend

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use appraise_core::{ApiBackend, HttpBackend, IdentityStore};

use crate::config::{AppraiseConfig, ConfigLoader};

pub struct AppContext {
    pub config: AppraiseConfig,
    pub store: Arc<IdentityStore>,
    pub api: Arc<dyn ApiBackend>,
}

impl AppContext {
    pub fn init() -> Result<Self> {
        let config = ConfigLoader::load()?;

        let config_dir = appraise_paths::config_dir();
        std::fs::create_dir_all(&config_dir)
            .with_context(|| format!("failed to create {}", config_dir.display()))?;
        let store = Arc::new(
            IdentityStore::open(&config_dir).context("failed to open the session store")?,
        );

        let backend = HttpBackend::new(
            &config.base_url,
            Duration::from_secs(config.timeout_seconds),
            Arc::clone(&store),
        )
        .with_context(|| format!("invalid base URL: {}", config.base_url))?;

        Ok(Self {
            config,
            store,
            api: Arc::new(backend),
        })
    }
}
