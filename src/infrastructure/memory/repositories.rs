//! In-Memory Repositories
//!
//! `storage.backend = "memory"` 时使用，进程退出后数据丢失

use async_trait::async_trait;
use dashmap::DashMap;
use std::collections::HashSet;
use tokio::sync::RwLock;

use crate::application::ports::{
    BookTextRepositoryPort, BookmarkRepositoryPort, LibraryRepositoryPort, RepositoryError,
    UserRepositoryPort,
};
use crate::domain::account::User;
use crate::domain::library::{merge_rebuilt, Book};
use crate::domain::reader::BookmarkSet;

/// 内存书库
#[derive(Default)]
pub struct InMemoryLibraryRepository {
    books: RwLock<Vec<Book>>,
}

impl InMemoryLibraryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_books(books: Vec<Book>) -> Self {
        Self {
            books: RwLock::new(books),
        }
    }
}

#[async_trait]
impl LibraryRepositoryPort for InMemoryLibraryRepository {
    async fn find_all(&self) -> Result<Vec<Book>, RepositoryError> {
        Ok(self.books.read().await.clone())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Book>, RepositoryError> {
        Ok(self.books.read().await.iter().find(|b| b.id == id).cloned())
    }

    async fn replace_all(&self, books: &[Book]) -> Result<(), RepositoryError> {
        *self.books.write().await = books.to_vec();
        Ok(())
    }

    async fn rebuild(
        &self,
        snapshot: &HashSet<String>,
        rebuilt: Vec<Book>,
    ) -> Result<Vec<Book>, RepositoryError> {
        let mut books = self.books.write().await;
        let merged = merge_rebuilt(std::mem::take(&mut *books), snapshot, rebuilt);
        *books = merged.clone();
        Ok(merged)
    }

    async fn insert_front(&self, book: &Book) -> Result<bool, RepositoryError> {
        let mut books = self.books.write().await;
        if books.iter().any(|b| b.id == book.id) {
            return Ok(false);
        }
        books.insert(0, book.clone());
        Ok(true)
    }

    async fn remove(&self, id: &str) -> Result<bool, RepositoryError> {
        let mut books = self.books.write().await;
        let before = books.len();
        books.retain(|b| b.id != id);
        Ok(books.len() != before)
    }
}

/// 内存用户表（按邮箱索引）
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: DashMap<String, User>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepositoryPort for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        Ok(self.users.get(email).map(|u| u.clone()))
    }

    async fn insert(&self, user: &User) -> Result<(), RepositoryError> {
        match self.users.entry(user.email.clone()) {
            dashmap::mapref::entry::Entry::Occupied(_) => {
                Err(RepositoryError::Duplicate(user.email.clone()))
            }
            dashmap::mapref::entry::Entry::Vacant(slot) => {
                slot.insert(user.clone());
                Ok(())
            }
        }
    }
}

/// 内存书签
#[derive(Default)]
pub struct InMemoryBookmarkRepository {
    bookmarks: DashMap<String, BookmarkSet>,
}

impl InMemoryBookmarkRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookmarkRepositoryPort for InMemoryBookmarkRepository {
    async fn find(&self, book_id: &str) -> Result<BookmarkSet, RepositoryError> {
        Ok(self
            .bookmarks
            .get(book_id)
            .map(|b| b.clone())
            .unwrap_or_default())
    }

    async fn toggle(&self, book_id: &str, page: usize) -> Result<(bool, BookmarkSet), RepositoryError> {
        // entry 持有分片写锁，读改写是原子的
        let mut bookmarks = self.bookmarks.entry(book_id.to_string()).or_default();
        let bookmarked = bookmarks.toggle(page);
        Ok((bookmarked, bookmarks.clone()))
    }
}

/// 内存正文
#[derive(Default)]
pub struct InMemoryBookTextRepository {
    texts: DashMap<String, String>,
}

impl InMemoryBookTextRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookTextRepositoryPort for InMemoryBookTextRepository {
    async fn find(&self, book_id: &str) -> Result<Option<String>, RepositoryError> {
        Ok(self.texts.get(book_id).map(|t| t.clone()))
    }

    async fn save(&self, book_id: &str, text: &str) -> Result<(), RepositoryError> {
        self.texts.insert(book_id.to_string(), text.to_string());
        Ok(())
    }

    async fn delete(&self, book_id: &str) -> Result<(), RepositoryError> {
        self.texts.remove(book_id);
        Ok(())
    }
}
