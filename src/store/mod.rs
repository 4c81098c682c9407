//! Persistence traits and their PostgreSQL / in-memory implementations.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::error::AppError;
use crate::models::user::{NewUser, User};
use crate::models::{Document, Record};

pub use memory::{MemoryRepository, MemoryUserStore};
pub use postgres::{PgRepository, PgUserStore};

/// Whole-document CRUD over one collection.
///
/// `list` returns newest first: by record date descending (undated last),
/// then by id descending.
#[async_trait]
pub trait Repository<T: Document>: Send + Sync {
    async fn list(&self) -> Result<Vec<Record<T>>, AppError>;

    async fn get(&self, id: i64) -> Result<Option<Record<T>>, AppError>;

    async fn insert(&self, data: T) -> Result<Record<T>, AppError>;

    /// Replaces the whole document. `None` when `id` does not exist.
    async fn replace(&self, id: i64, data: T) -> Result<Option<Record<T>>, AppError>;

    /// `false` when `id` does not exist.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fails with a conflict when the username or email is taken.
    async fn create(&self, user: NewUser) -> Result<User, AppError>;

    /// Looks a user up by username or email.
    async fn find_by_login(&self, login: &str) -> Result<Option<User>, AppError>;

    async fn get(&self, id: i64) -> Result<Option<User>, AppError>;
}
