//! Shared helpers for tests that touch process environment variables.

use std::env;

/// Run `f` with `key` set to `value` (or removed for `None`), restoring the
/// previous value afterwards. Callers must serialize with `#[serial]`.
pub(crate) fn with_env_var<F: FnOnce()>(key: &str, value: Option<&str>, f: F) {
    let original = env::var(key).ok();

    match value {
        Some(v) => unsafe { env::set_var(key, v) },
        None => unsafe { env::remove_var(key) },
    }

    f();

    match original {
        Some(v) => unsafe { env::set_var(key, v) },
        None => unsafe { env::remove_var(key) },
    }
}
