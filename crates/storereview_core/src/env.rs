//! Scoped process-environment overrides for tests that read configuration.

use std::sync::{Mutex, MutexGuard, OnceLock};

fn global_env_lock() -> &'static Mutex<()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(()))
}

#[allow(unused_unsafe)]
fn write_var(key: &str, value: Option<&str>) {
    // SAFETY: every writer holds the global env lock through `ScopedEnv`.
    unsafe {
        match value {
            Some(value) => std::env::set_var(key, value),
            None => std::env::remove_var(key),
        }
    }
}

/// Holds the process-wide env lock and restores every touched variable on drop.
///
/// Variables are restored in reverse order, so overriding the same key twice
/// still ends with its original value.
pub struct ScopedEnv {
    saved: Vec<(String, Option<String>)>,
    _lock: MutexGuard<'static, ()>,
}

impl ScopedEnv {
    /// Acquire the env lock. A poisoned lock is recovered, since the guarded
    /// data is the environment itself.
    pub fn lock() -> Self {
        let lock = global_env_lock()
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Self {
            saved: Vec::new(),
            _lock: lock,
        }
    }

    /// Set `key=value` until this guard drops.
    pub fn set(&mut self, key: &str, value: &str) -> &mut Self {
        self.save(key);
        write_var(key, Some(value));
        self
    }

    /// Remove `key` until this guard drops.
    pub fn unset(&mut self, key: &str) -> &mut Self {
        self.save(key);
        write_var(key, None);
        self
    }

    fn save(&mut self, key: &str) {
        self.saved.push((key.to_string(), std::env::var(key).ok()));
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        while let Some((key, previous)) = self.saved.pop() {
            write_var(&key, previous.as_deref());
        }
    }
}
