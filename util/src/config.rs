//! Global application configuration manager.
//!
//! `AppConfig` is a lazily initialized, globally accessible singleton containing
//! runtime configuration values loaded from environment variables. It provides
//! thread-safe access and mutation for testing or overrides in runtime environments.

use std::env;
use std::str::FromStr;
use std::sync::{OnceLock, RwLock};

/// Represents the complete application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: String,
    pub log_level: String,
    pub log_file: String,
    pub log_to_stdout: bool,
    pub storage_root: String,
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub completion_timeout_secs: u64,
    pub demo_mode: bool,
}

/// Lazily-initialized, thread-safe singleton instance of `AppConfig`.
static CONFIG_INSTANCE: OnceLock<RwLock<AppConfig>> = OnceLock::new();

/// Parses an environment variable, falling back to `default` when it is unset or malformed.
fn parse_var<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|raw| raw.trim().parse().ok())
        .unwrap_or(default)
}

fn flag_var(key: &str) -> Option<bool> {
    env::var(key)
        .ok()
        .map(|raw| matches!(raw.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
}

impl AppConfig {
    /// Loads the configuration from `.env` and environment variables.
    ///
    /// Every field has a default, so loading never fails. Malformed numbers fall
    /// back to their defaults.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let app_env = env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let demo_mode = flag_var("DEMO_MODE").unwrap_or(app_env != "development");

        Self {
            log_level: env::var("LOG_LEVEL")
                .unwrap_or_else(|_| "grader=info,services=info".into()),
            log_file: env::var("LOG_FILE").unwrap_or_else(|_| "grade-calc.log".into()),
            log_to_stdout: flag_var("LOG_TO_STDOUT").unwrap_or(false),
            storage_root: env::var("STORAGE_ROOT").unwrap_or_else(|_| "data".into()),
            gemini_api_key: env::var("GEMINI_API_KEY")
                .or_else(|_| env::var("GOOGLE_AI_API_KEY"))
                .unwrap_or_default(),
            gemini_model: env::var("GEMINI_MODEL").unwrap_or_else(|_| "gemini-2.0-flash".into()),
            gemini_base_url: env::var("GEMINI_BASE_URL")
                .unwrap_or_else(|_| "https://generativelanguage.googleapis.com".into()),
            completion_timeout_secs: parse_var("COMPLETION_TIMEOUT_SECS", 30),
            demo_mode,
            env: app_env,
        }
    }

    /// Returns a shared reference to the global configuration.
    ///
    /// # Panics
    /// Panics if the lock cannot be acquired.
    pub fn global() -> std::sync::RwLockReadGuard<'static, AppConfig> {
        CONFIG_INSTANCE
            .get_or_init(|| RwLock::new(AppConfig::from_env()))
            .read()
            .expect("Failed to acquire AppConfig read lock")
    }

    /// Resets the configuration by reloading from environment variables.
    ///
    /// Useful in tests to clear overrides.
    pub fn reset() {
        if let Some(lock) = CONFIG_INSTANCE.get() {
            let mut guard = lock
                .write()
                .expect("Failed to acquire AppConfig write lock");
            *guard = AppConfig::from_env();
        }
    }

    /// Generic internal setter for any field in the config.
    ///
    /// Used by public per-field setter methods.
    fn set_field<F>(setter: F)
    where
        F: FnOnce(&mut AppConfig),
    {
        let lock = CONFIG_INSTANCE.get_or_init(|| RwLock::new(AppConfig::from_env()));
        let mut guard = lock
            .write()
            .expect("Failed to acquire AppConfig write lock");
        setter(&mut guard);
    }

    // --- Per-field setters below ---

    pub fn set_storage_root(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.storage_root = value.into());
    }

    pub fn set_gemini_api_key(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.gemini_api_key = value.into());
    }

    pub fn set_gemini_model(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.gemini_model = value.into());
    }

    pub fn set_gemini_base_url(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.gemini_base_url = value.into());
    }

    pub fn set_completion_timeout_secs(value: u64) {
        AppConfig::set_field(|cfg| cfg.completion_timeout_secs = value);
    }

    pub fn set_demo_mode(value: bool) {
        AppConfig::set_field(|cfg| cfg.demo_mode = value);
    }
}

// --- Free accessors ---

pub fn log_level() -> String {
    AppConfig::global().log_level.clone()
}

pub fn log_file() -> String {
    AppConfig::global().log_file.clone()
}

pub fn log_to_stdout() -> bool {
    AppConfig::global().log_to_stdout
}

pub fn storage_root() -> String {
    AppConfig::global().storage_root.clone()
}

pub fn gemini_api_key() -> String {
    AppConfig::global().gemini_api_key.clone()
}

pub fn gemini_model() -> String {
    AppConfig::global().gemini_model.clone()
}

pub fn gemini_base_url() -> String {
    AppConfig::global().gemini_base_url.clone()
}

pub fn completion_timeout_secs() -> u64 {
    AppConfig::global().completion_timeout_secs
}

pub fn demo_mode() -> bool {
    AppConfig::global().demo_mode
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_vars() {
        for key in [
            "APP_ENV",
            "DEMO_MODE",
            "GEMINI_API_KEY",
            "GOOGLE_AI_API_KEY",
            "COMPLETION_TIMEOUT_SECS",
        ] {
            unsafe {
                env::remove_var(key);
            }
        }
    }

    #[test]
    #[serial]
    fn test_defaults_when_unset() {
        clear_vars();
        let cfg = AppConfig::from_env();
        assert_eq!(cfg.env, "development");
        assert!(!cfg.demo_mode);
        assert_eq!(cfg.completion_timeout_secs, 30);
        assert!(cfg.gemini_api_key.is_empty());
    }

    #[test]
    #[serial]
    fn test_production_env_implies_demo_mode() {
        clear_vars();
        unsafe {
            env::set_var("APP_ENV", "production");
        }
        assert!(AppConfig::from_env().demo_mode);

        unsafe {
            env::set_var("DEMO_MODE", "false");
        }
        assert!(!AppConfig::from_env().demo_mode);
        clear_vars();
    }

    #[test]
    #[serial]
    fn test_google_key_is_accepted_as_fallback() {
        clear_vars();
        unsafe {
            env::set_var("GOOGLE_AI_API_KEY", "legacy-key");
        }
        assert_eq!(AppConfig::from_env().gemini_api_key, "legacy-key");

        unsafe {
            env::set_var("GEMINI_API_KEY", "primary-key");
        }
        assert_eq!(AppConfig::from_env().gemini_api_key, "primary-key");
        clear_vars();
    }

    #[test]
    #[serial]
    fn test_malformed_timeout_uses_default() {
        clear_vars();
        unsafe {
            env::set_var("COMPLETION_TIMEOUT_SECS", "soon");
        }
        assert_eq!(AppConfig::from_env().completion_timeout_secs, 30);
        clear_vars();
    }

    #[test]
    #[serial]
    fn test_setters_override_global() {
        AppConfig::set_gemini_model("gemini-test");
        AppConfig::set_gemini_base_url("http://127.0.0.1:8089");
        AppConfig::set_completion_timeout_secs(5);
        assert_eq!(gemini_model(), "gemini-test");
        assert_eq!(gemini_base_url(), "http://127.0.0.1:8089");
        assert_eq!(completion_timeout_secs(), 5);
        AppConfig::reset();
    }
}
