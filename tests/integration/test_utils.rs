//! Shared test utilities for integration tests
//!
//! Centralized setup/teardown for XDG directories and `CTXSTORE_*`
//! variables so config-dependent tests run in isolation.

use std::path::PathBuf;
use std::sync::Mutex;
use tempfile::TempDir;

/// Global mutex to serialize environment variable access across all tests
static XDG_ENV_MUTEX: Mutex<()> = Mutex::new(());

const MANAGED_VARS: &[&str] = &[
    "HOME",
    "XDG_CONFIG_HOME",
    "XDG_DATA_HOME",
    "CTXSTORE_LOG",
    "CTXSTORE_STORE__ROOT",
    "CTXSTORE_CURRENT_CONTEXT",
    "CTXSTORE_LOGGING__LEVEL",
];

/// Environment variable state to restore after test
struct EnvState {
    vars: Vec<(&'static str, Option<String>)>,
}

impl EnvState {
    fn capture() -> Self {
        Self {
            vars: MANAGED_VARS
                .iter()
                .map(|key| (*key, std::env::var(key).ok()))
                .collect(),
        }
    }

    fn restore(self) {
        for (key, value) in self.vars {
            match value {
                Some(orig) => std::env::set_var(key, orig),
                None => std::env::remove_var(key),
            }
        }
    }
}

/// Directories handed to a test running under [`with_xdg_env`]
pub struct XdgDirs {
    pub home: PathBuf,
    pub config_home: PathBuf,
    pub data_home: PathBuf,
}

impl XdgDirs {
    /// Directory holding the global ctxstore config and default store
    pub fn app_config_dir(&self) -> PathBuf {
        self.config_home.join("ctxstore")
    }

    pub fn write_global_config(&self, body: &str) -> PathBuf {
        let dir = self.app_config_dir();
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, body).unwrap();
        path
    }
}

/// Run `f` with HOME and the XDG directories pointed into `test_dir` and
/// every `CTXSTORE_*` variable cleared. The original environment is
/// restored afterwards, even if `f` panics.
pub fn with_xdg_env<F, R>(test_dir: &TempDir, f: F) -> R
where
    F: FnOnce(&XdgDirs) -> R,
{
    let _guard = XDG_ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let env_state = EnvState::capture();

    let dirs = XdgDirs {
        home: test_dir.path().join("home"),
        config_home: test_dir.path().join("config"),
        data_home: test_dir.path().join("data"),
    };
    std::fs::create_dir_all(&dirs.home).unwrap();
    std::fs::create_dir_all(&dirs.config_home).unwrap();
    std::fs::create_dir_all(&dirs.data_home).unwrap();

    for key in MANAGED_VARS {
        std::env::remove_var(key);
    }
    std::env::set_var("HOME", &dirs.home);
    std::env::set_var("XDG_CONFIG_HOME", &dirs.config_home);
    std::env::set_var("XDG_DATA_HOME", &dirs.data_home);

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| f(&dirs)));

    env_state.restore();

    match result {
        Ok(value) => value,
        Err(panic) => std::panic::resume_unwind(panic),
    }
}

