mod cookie;
mod manager;

#[cfg(test)]
pub(crate) mod test_utils;

pub use cookie::cookie_value;
pub use manager::SessionManager;
