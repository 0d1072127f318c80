mod config;
mod errors;
mod memory;
mod redis;
mod types;

pub use config::session_store_from_env;
pub use errors::StoreError;
pub use types::{Device, MemorySessionStore, RedisSessionStore, Session, SessionStore};
