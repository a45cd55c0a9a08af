//! Repository for the `users` table.

use bagline_core::types::RecordId;
use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use super::{decode_all, decode_first, encode};
use crate::models::user::{CreateUser, User};
use crate::store::{Direction, RecordStore, SelectQuery, StoreError, StoreResult, Table};

const TABLE: Table = Table::Users;

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(store: &dyn RecordStore, input: &CreateUser) -> StoreResult<User> {
        let mut row = encode(TABLE, input)?;
        row.insert("id".into(), json!(Uuid::new_v4()));
        row.insert("created_at".into(), json!(Utc::now()));
        let rows = store.insert(TABLE, row).await?;
        decode_first(rows)?.ok_or(StoreError::EmptyRow(TABLE.name()))
    }

    pub async fn find_by_id(store: &dyn RecordStore, id: RecordId) -> StoreResult<Option<User>> {
        let query = SelectQuery::new().eq("id", id.to_string());
        decode_first(store.select(TABLE, &query).await?)
    }

    /// Find a user by email (exact match; callers normalize first).
    pub async fn find_by_email(store: &dyn RecordStore, email: &str) -> StoreResult<Option<User>> {
        let query = SelectQuery::new().eq("email", email);
        decode_first(store.select(TABLE, &query).await?)
    }

    /// List all users ordered by most recently created first.
    pub async fn list(store: &dyn RecordStore) -> StoreResult<Vec<User>> {
        let query = SelectQuery::new().order_by("created_at", Direction::Desc);
        decode_all(store.select(TABLE, &query).await?)
    }

    /// Returns `true` if a row was removed.
    pub async fn delete(store: &dyn RecordStore, id: RecordId) -> StoreResult<bool> {
        Ok(!store.delete(TABLE, id).await?.is_empty())
    }
}
