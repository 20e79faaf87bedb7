//! SQLite persistence layer.
//!
//! Implements the repository traits from `ada-core` using sqlx with a split
//! reader/writer pool in WAL mode.

pub mod guest;
pub mod pool;
pub mod profile;
pub mod session;

pub use guest::SqliteGuestRepository;
pub use pool::DatabasePool;
pub use profile::SqliteProfileRepository;
pub use session::SqliteSessionRepository;
