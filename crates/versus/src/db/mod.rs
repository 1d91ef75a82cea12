//! Win/loss persistence: the SQLite repository and an in-memory store.

mod error;
mod memory;
mod models;
mod repository;
mod schema;
mod store;

pub use error::DbError;
pub use memory::MemoryStore;
pub use models::{NewWinLoss, Tally, WinLossRecord};
pub use repository::GameRepository;
pub use store::GameStore;
