use std::sync::LazyLock;

/// Name of the refresh-token cookie, scoped to the auth route prefix.
///
/// Default: "session"
pub static SESSION_COOKIE_NAME: LazyLock<String> = LazyLock::new(session_cookie_name);

/// Name of the access-token cookie, sent on every request.
///
/// Default: "access"
pub static ACCESS_COOKIE_NAME: LazyLock<String> = LazyLock::new(access_cookie_name);

fn session_cookie_name() -> String {
    std::env::var("SESSION_COOKIE_NAME").unwrap_or_else(|_| "session".to_string())
}

fn access_cookie_name() -> String {
    std::env::var("ACCESS_COOKIE_NAME").unwrap_or_else(|_| "access".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::with_env_var;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_cookie_name_defaults() {
        with_env_var("SESSION_COOKIE_NAME", None, || {
            assert_eq!(session_cookie_name(), "session");
        });
        with_env_var("ACCESS_COOKIE_NAME", None, || {
            assert_eq!(access_cookie_name(), "access");
        });
    }

    #[test]
    #[serial]
    fn test_cookie_names_from_env() {
        with_env_var("SESSION_COOKIE_NAME", Some("__Host-Refresh"), || {
            assert_eq!(session_cookie_name(), "__Host-Refresh");
        });
        with_env_var("ACCESS_COOKIE_NAME", Some("__Host-Access"), || {
            assert_eq!(access_cookie_name(), "__Host-Access");
        });
    }
}
