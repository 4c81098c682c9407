use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::Utc;

use super::{Repository, UserStore};
use crate::error::AppError;
use crate::models::user::{NewUser, User};
use crate::models::{Document, Record};

struct Collection<T> {
    next_id: i64,
    records: BTreeMap<i64, Record<T>>,
}

/// Keeps documents in a map behind a lock. Used by tests and local runs.
pub struct MemoryRepository<T> {
    inner: Arc<RwLock<Collection<T>>>,
}

impl<T> MemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Collection {
                next_id: 1,
                records: BTreeMap::new(),
            })),
        }
    }
}

impl<T> Default for MemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for MemoryRepository<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

fn poisoned<E: std::fmt::Display>(e: E) -> AppError {
    AppError::internal(format!("Store lock poisoned: {e}"))
}

#[async_trait]
impl<T: Document> Repository<T> for MemoryRepository<T> {
    async fn list(&self) -> Result<Vec<Record<T>>, AppError> {
        let collection = self.inner.read().map_err(poisoned)?;
        let mut records: Vec<Record<T>> = collection.records.values().cloned().collect();
        records.sort_by(|a, b| {
            b.data
                .record_date()
                .cmp(&a.data.record_date())
                .then(b.id.cmp(&a.id))
        });
        Ok(records)
    }

    async fn get(&self, id: i64) -> Result<Option<Record<T>>, AppError> {
        let collection = self.inner.read().map_err(poisoned)?;
        Ok(collection.records.get(&id).cloned())
    }

    async fn insert(&self, data: T) -> Result<Record<T>, AppError> {
        let mut collection = self.inner.write().map_err(poisoned)?;
        let id = collection.next_id;
        collection.next_id += 1;

        let now = Utc::now();
        let record = Record {
            id,
            data,
            created_at: now,
            updated_at: now,
        };
        collection.records.insert(id, record.clone());
        Ok(record)
    }

    async fn replace(&self, id: i64, data: T) -> Result<Option<Record<T>>, AppError> {
        let mut collection = self.inner.write().map_err(poisoned)?;
        Ok(collection.records.get_mut(&id).map(|record| {
            record.data = data;
            record.updated_at = Utc::now();
            record.clone()
        }))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let mut collection = self.inner.write().map_err(poisoned)?;
        Ok(collection.records.remove(&id).is_some())
    }
}

#[derive(Clone, Default)]
pub struct MemoryUserStore {
    users: Arc<RwLock<Vec<User>>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create(&self, user: NewUser) -> Result<User, AppError> {
        let mut users = self.users.write().map_err(poisoned)?;
        if users.iter().any(|u| u.username == user.username || u.email == user.email) {
            return Err(AppError::conflict("Username or email already exists"));
        }

        let created = User {
            id: users.len() as i64 + 1,
            username: user.username,
            email: user.email,
            mobile_no: user.mobile_no,
            password_hash: user.password_hash,
            role: user.role,
            is_active: true,
            created_at: Utc::now(),
        };
        users.push(created.clone());
        Ok(created)
    }

    async fn find_by_login(&self, login: &str) -> Result<Option<User>, AppError> {
        let users = self.users.read().map_err(poisoned)?;
        Ok(users
            .iter()
            .find(|u| u.username == login || u.email == login)
            .cloned())
    }

    async fn get(&self, id: i64) -> Result<Option<User>, AppError> {
        let users = self.users.read().map_err(poisoned)?;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }
}
