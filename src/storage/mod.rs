// Storage module: SQLite-backed campaign data behind the pledge-source trait.

pub mod sqlite;
pub mod traits;

pub use sqlite::SqliteStore;
pub use traits::PledgeSource;
