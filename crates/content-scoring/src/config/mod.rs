use chrono::Duration;
use std::env;
use std::fmt;
use std::path::{Path, PathBuf};

const DEFAULT_CACHE_TTL_SECS: u64 = 3600;

/// Distinguishes runtime behavior for different stages of the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }

    /// Log level used when `APP_LOG_LEVEL` is unset.
    pub fn default_log_level(self) -> &'static str {
        match self {
            Self::Development => "debug",
            Self::Test => "warn",
            Self::Production => "info",
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub guides: GuideConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let ttl_secs = match env::var("GUIDE_CACHE_TTL_SECS") {
            Ok(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidCacheTtl { value: raw })?,
            Err(_) => DEFAULT_CACHE_TTL_SECS,
        };
        let cache_ttl = i64::try_from(ttl_secs)
            .ok()
            .and_then(Duration::try_seconds)
            .ok_or(ConfigError::InvalidCacheTtl {
                value: ttl_secs.to_string(),
            })?;

        let directory = env::var("GUIDE_DIR")
            .ok()
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from);

        let log_level = env::var("APP_LOG_LEVEL")
            .unwrap_or_else(|_| environment.default_log_level().to_string());

        Ok(Self {
            environment,
            guides: GuideConfig {
                cache_ttl,
                directory,
            },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Where guide payloads live and how long a loaded guide stays cached.
#[derive(Debug, Clone)]
pub struct GuideConfig {
    pub cache_ttl: Duration,
    pub directory: Option<PathBuf>,
}

impl GuideConfig {
    /// Resolves relative guide paths against the configured directory.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        match &self.directory {
            Some(dir) if path.is_relative() => dir.join(path),
            _ => path.to_path_buf(),
        }
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidCacheTtl { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidCacheTtl { value } => write!(
                f,
                "GUIDE_CACHE_TTL_SECS must be a whole number of seconds, got '{value}'"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("APP_ENV");
        env::remove_var("APP_LOG_LEVEL");
        env::remove_var("GUIDE_CACHE_TTL_SECS");
        env::remove_var("GUIDE_DIR");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.guides.cache_ttl, Duration::seconds(3600));
        assert!(config.guides.directory.is_none());
        assert_eq!(config.telemetry.log_level, "debug");
    }

    #[test]
    fn reads_overrides_from_env() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_ENV", "prod");
        env::set_var("GUIDE_CACHE_TTL_SECS", " 90 ");
        env::set_var("GUIDE_DIR", "/srv/guides");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.environment, AppEnvironment::Production);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.guides.cache_ttl, Duration::seconds(90));
        assert_eq!(
            config.guides.resolve(Path::new("whey.json")),
            PathBuf::from("/srv/guides/whey.json")
        );
        assert_eq!(
            config.guides.resolve(Path::new("/tmp/whey.json")),
            PathBuf::from("/tmp/whey.json")
        );
        reset_env();
    }

    #[test]
    fn log_level_follows_environment_unless_overridden() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_ENV", "ci");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.environment, AppEnvironment::Test);
        assert_eq!(config.telemetry.log_level, "warn");

        env::set_var("APP_LOG_LEVEL", "content_scoring=trace");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.telemetry.log_level, "content_scoring=trace");
        reset_env();
    }

    #[test]
    fn rejects_non_numeric_ttl() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("GUIDE_CACHE_TTL_SECS", "an hour");
        let error = AppConfig::load().expect_err("ttl must be numeric");
        assert!(error.to_string().contains("an hour"));
        reset_env();
    }
}
