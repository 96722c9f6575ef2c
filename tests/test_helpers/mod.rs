//! Shared helpers for integration tests: environment guards and seed data.

pub mod storefront;

use std::env;
use std::ffi::OsString;
use std::sync::{Mutex, MutexGuard, OnceLock};

static ENV_MUTEX: OnceLock<Mutex<()>> = OnceLock::new();

/// Restores the touched environment variables when dropped.
///
/// Holding the guard also holds a process-wide lock, so two tests never
/// rewrite the environment at the same time.
pub struct EnvVarGuard {
    previous: Vec<(OsString, Option<OsString>)>,
    _lock: MutexGuard<'static, ()>,
}

impl EnvVarGuard {
    /// Applies `changes`; `None` removes the variable.
    pub fn set_many(changes: &[(OsString, Option<OsString>)]) -> Self {
        let lock = ENV_MUTEX
            .get_or_init(|| Mutex::new(()))
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let previous = changes
            .iter()
            .map(|(key, value)| {
                let old = env::var_os(key);
                apply(key, value.as_ref());
                (key.clone(), old)
            })
            .collect();
        Self {
            previous,
            _lock: lock,
        }
    }

    /// Converts string pairs and applies them.
    pub fn set_strings(changes: &[(String, Option<String>)]) -> Self {
        let converted: Vec<_> = changes
            .iter()
            .map(|(key, value)| (OsString::from(key), value.as_ref().map(OsString::from)))
            .collect();
        Self::set_many(&converted)
    }
}

fn apply(key: &OsString, value: Option<&OsString>) {
    // SAFETY: ENV_MUTEX serialises environment mutation across tests.
    unsafe {
        match value {
            Some(new_value) => env::set_var(key, new_value),
            None => env::remove_var(key),
        }
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        for (key, value) in self.previous.drain(..) {
            apply(&key, value.as_ref());
        }
    }
}
