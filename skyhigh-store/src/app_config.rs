use serde::Deserialize;
use std::env;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub search: SearchConfig,
    pub session: SessionConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SearchConfig {
    /// Artificial latency before offers are generated
    pub delay_ms: u64,
    /// Fixed seed for reproducible demos; fresh entropy per search when unset
    pub rng_seed: Option<u64>,
}

impl SearchConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    pub idle_timeout_seconds: u64,
    pub sweep_interval_seconds: u64,
}

impl SessionConfig {
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_seconds)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_seconds)
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = Self::defaults()?
            // Checked-in defaults, optional so the binary runs from any directory
            .add_source(config::File::with_name("config/default").required(false))
            // Per-environment overrides
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local overrides, not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // Eg.. `SKYHIGH__SEARCH__DELAY_MS=0` disables the artificial latency
            .add_source(config::Environment::with_prefix("SKYHIGH").separator("__"))
            .build()?;

        let config: Self = s.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), config::ConfigError> {
        // tokio's interval panics on a zero period
        if self.session.sweep_interval_seconds == 0 {
            return Err(config::ConfigError::Message(
                "session.sweep_interval_seconds must be at least 1".into(),
            ));
        }
        Ok(())
    }

    fn defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>, config::ConfigError> {
        config::Config::builder()
            .set_default("server.port", 8080_i64)?
            .set_default("search.delay_ms", 1500_i64)?
            .set_default("session.idle_timeout_seconds", 1800_i64)?
            .set_default("session.sweep_interval_seconds", 60_i64)
    }
}
