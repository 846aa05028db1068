//! In-memory stores backed by `DashMap`.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use uuid::Uuid;

use super::{BookStore, StoreError, UserStore};
use crate::books::models::{Book, BookCreate, BookUpdate};
use crate::user_auth::models::User;

/// Users keyed by username.
#[derive(Default)]
pub struct InMemoryUserStore {
    users: DashMap<String, User>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Drop a user; tokens already issued for it stop resolving.
    pub fn remove(&self, username: &str) -> Option<User> {
        self.users.remove(username).map(|(_, user)| user)
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn get_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        Ok(self.users.get(username).map(|u| u.value().clone()))
    }

    async fn create(&self, user: User) -> Result<User, StoreError> {
        // entry() holds the shard lock, so check and insert are one step
        match self.users.entry(user.username.clone()) {
            Entry::Occupied(_) => Err(StoreError::Duplicate(user.username)),
            Entry::Vacant(slot) => {
                slot.insert(user.clone());
                Ok(user)
            }
        }
    }
}

/// Books keyed by id, each tagged with its insertion sequence number.
#[derive(Default)]
pub struct InMemoryBookStore {
    books: DashMap<Uuid, (u64, Book)>,
    next_seq: AtomicU64,
}

impl InMemoryBookStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookStore for InMemoryBookStore {
    async fn create(&self, data: BookCreate) -> Result<Book, StoreError> {
        let book = Book::new(data);
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        self.books.insert(book.id, (seq, book.clone()));
        Ok(book)
    }

    async fn list(&self, skip: u32, limit: u32) -> Result<Vec<Book>, StoreError> {
        let mut books: Vec<(u64, Book)> = self.books.iter().map(|e| e.value().clone()).collect();
        books.sort_unstable_by_key(|(seq, _)| *seq);
        Ok(books
            .into_iter()
            .map(|(_, book)| book)
            .skip(skip as usize)
            .take(limit as usize)
            .collect())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Book>, StoreError> {
        Ok(self.books.get(&id).map(|e| e.value().1.clone()))
    }

    async fn update(&self, id: Uuid, data: BookUpdate) -> Result<Option<Book>, StoreError> {
        Ok(self.books.get_mut(&id).map(|mut e| {
            let book = &mut e.value_mut().1;
            book.apply(data);
            book.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        Ok(self.books.remove(&id).is_some())
    }
}
