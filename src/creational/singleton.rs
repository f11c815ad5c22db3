// Singleton: a lazily created process logger reachable through one accessor,
// and a configuration manager that accepts exactly one initialization.

use std::collections::BTreeMap;
use std::io;
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

use lazy_static::lazy_static;

use crate::transcript::Transcript;

// ============================================================================
// Example: Lazily initialized global logger
// ============================================================================

const DEFAULT_LEVEL: &str = "INFO";

pub struct Logger {
    level: Mutex<String>,
}

lazy_static! {
    static ref LOGGER: Logger = Logger {
        level: Mutex::new(DEFAULT_LEVEL.to_string()),
    };

    // The logger is process-wide; runs of this demo must not interleave.
    static ref RUN_GUARD: Mutex<()> = Mutex::new(());
}

impl Logger {
    /// Global accessor. The instance is created on first use.
    pub fn instance() -> &'static Logger {
        &LOGGER
    }

    fn level_slot(&self) -> MutexGuard<'_, String> {
        self.level.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn level(&self) -> String {
        self.level_slot().clone()
    }

    pub fn set_level(&self, level: &str) {
        *self.level_slot() = level.to_string();
    }

    pub fn format(&self, message: &str) -> String {
        format!("[{}] {}", self.level(), message)
    }
}

// ============================================================================
// Example: One-shot configuration with OnceLock
// ============================================================================

pub struct ConfigManager {
    values: BTreeMap<String, String>,
}

static CONFIG: OnceLock<ConfigManager> = OnceLock::new();

impl ConfigManager {
    fn load() -> Self {
        let values = [("app.name", "design-patterns"), ("app.mode", "demo")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Self { values }
    }

    pub fn global() -> &'static ConfigManager {
        CONFIG.get_or_init(ConfigManager::load)
    }

    /// Fails once the manager exists; the rejected value is handed back.
    pub fn initialize(manager: ConfigManager) -> Result<(), ConfigManager> {
        CONFIG.set(manager)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

// ============================================================================
// Demo
// ============================================================================

pub fn run(out: &mut Transcript<'_>) -> io::Result<()> {
    let _exclusive = RUN_GUARD.lock().unwrap_or_else(PoisonError::into_inner);

    let first = Logger::instance();
    let second = Logger::instance();
    out.line("logger.level", first.level())?;
    out.check("accessor.identity-eq", std::ptr::eq(first, second))?;

    let previous = first.level();
    first.set_level("DEBUG");
    out.line("logger.set-level", "DEBUG via first accessor")?;
    out.line("logger.level-via-second", second.level())?;
    out.check("accessor.mutation-visible", second.level() == "DEBUG")?;
    out.line("log", second.format("singleton logger in use"))?;

    // Put the shared state back so the next run starts from the same place.
    first.set_level(&previous);
    out.line("logger.restored", first.level())?;

    let config = ConfigManager::global();
    out.line("config.app-name", config.get("app.name").unwrap_or("<unset>"))?;
    out.check("config.identity-eq", std::ptr::eq(config, ConfigManager::global()))?;
    let rejected = ConfigManager::initialize(ConfigManager::load()).is_err();
    out.check("config.reinit-rejected", rejected)?;
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::capture;

    #[test]
    fn test_same_instance() {
        assert!(std::ptr::eq(Logger::instance(), Logger::instance()));
        assert!(std::ptr::eq(ConfigManager::global(), ConfigManager::global()));
    }

    #[test]
    fn test_reinitialization_rejected() {
        let _ = ConfigManager::global();
        let rejected = ConfigManager::initialize(ConfigManager::load());
        assert!(rejected.is_err());
        assert_eq!(ConfigManager::global().get("app.mode"), Some("demo"));
    }

    #[test]
    fn test_transcript_contract() {
        let text = capture(run).unwrap();
        assert!(text.contains("accessor.identity-eq: true\n"));
        assert!(text.contains("accessor.mutation-visible: true\n"));
        assert!(text.contains("log: [DEBUG] singleton logger in use\n"));
        assert!(text.contains("config.reinit-rejected: true\n"));
    }

    #[test]
    fn test_level_restored_after_run() {
        let first = capture(run).unwrap();
        let second = capture(run).unwrap();
        assert_eq!(first, second);
        assert!(first.starts_with("logger.level: INFO\n"));
        assert!(first.contains("logger.restored: INFO\n"));
    }
}
