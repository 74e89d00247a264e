//! Sled Library Repository

use async_trait::async_trait;
use std::collections::HashSet;
use tokio::sync::Mutex;

use super::SledStore;
use crate::application::ports::{LibraryRepositoryPort, RepositoryError};
use crate::domain::library::{merge_rebuilt, Book};

const LIBRARY_KEY: &str = "bookverse_library";

/// 书库列表整体存为一个 JSON 数组，写操作串行化
pub struct SledLibraryRepository {
    store: SledStore,
    write_lock: Mutex<()>,
}

impl SledLibraryRepository {
    pub fn new(store: SledStore) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    fn load(&self) -> Result<Vec<Book>, RepositoryError> {
        Ok(self.store.get_json(LIBRARY_KEY)?.unwrap_or_default())
    }
}

#[async_trait]
impl LibraryRepositoryPort for SledLibraryRepository {
    async fn find_all(&self) -> Result<Vec<Book>, RepositoryError> {
        self.load()
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Book>, RepositoryError> {
        Ok(self.load()?.into_iter().find(|b| b.id == id))
    }

    async fn replace_all(&self, books: &[Book]) -> Result<(), RepositoryError> {
        let _guard = self.write_lock.lock().await;
        self.store.put_json(LIBRARY_KEY, books)?;
        tracing::debug!(total = books.len(), "Library saved");
        Ok(())
    }

    async fn rebuild(
        &self,
        snapshot: &HashSet<String>,
        rebuilt: Vec<Book>,
    ) -> Result<Vec<Book>, RepositoryError> {
        let _guard = self.write_lock.lock().await;
        let merged = merge_rebuilt(self.load()?, snapshot, rebuilt);
        self.store.put_json(LIBRARY_KEY, &merged)?;
        tracing::debug!(total = merged.len(), "Library rebuilt");
        Ok(merged)
    }

    async fn insert_front(&self, book: &Book) -> Result<bool, RepositoryError> {
        let _guard = self.write_lock.lock().await;
        let mut books = self.load()?;
        if books.iter().any(|b| b.id == book.id) {
            return Ok(false);
        }
        books.insert(0, book.clone());
        self.store.put_json(LIBRARY_KEY, &books)?;
        Ok(true)
    }

    async fn remove(&self, id: &str) -> Result<bool, RepositoryError> {
        let _guard = self.write_lock.lock().await;
        let mut books = self.load()?;
        let before = books.len();
        books.retain(|b| b.id != id);
        if books.len() == before {
            return Ok(false);
        }
        self.store.put_json(LIBRARY_KEY, &books)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::library::{curated_books, Category};
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_library_persists_order() {
        let dir = tempdir().unwrap();
        let store = SledStore::open(dir.path().join("lib.sled")).unwrap();
        let repo = SledLibraryRepository::new(store.clone());

        assert!(repo.find_all().await.unwrap().is_empty());

        let books = curated_books();
        repo.replace_all(&books).await.unwrap();

        let uploaded = Book::local("Diary", "Me", Category::Fiction);
        assert!(repo.insert_front(&uploaded).await.unwrap());
        assert!(!repo.insert_front(&uploaded).await.unwrap());

        // 另一个实例读取同一存储
        let reopened = SledLibraryRepository::new(store);
        let all = reopened.find_all().await.unwrap();
        assert_eq!(all.len(), books.len() + 1);
        assert_eq!(all[0], uploaded);
        assert_eq!(all[1].id, books[0].id);

        assert_eq!(
            reopened.find_by_id("g-1342").await.unwrap().map(|b| b.title),
            Some("Pride and Prejudice".to_string())
        );
    }

    #[tokio::test]
    async fn test_rebuild_keeps_books_added_after_snapshot() {
        let dir = tempdir().unwrap();
        let repo = SledLibraryRepository::new(SledStore::open(dir.path().join("lib.sled")).unwrap());
        let stale = Book::gutenberg(9, "Stale", "Someone", Category::Fiction, "");
        repo.replace_all(&[stale.clone()]).await.unwrap();
        let snapshot: HashSet<String> = [stale.id.clone()].into_iter().collect();

        let uploaded = Book::local("Diary", "Me", Category::Fiction);
        repo.insert_front(&uploaded).await.unwrap();

        let merged = repo.rebuild(&snapshot, curated_books()).await.unwrap();
        assert_eq!(merged.len(), curated_books().len() + 1);
        assert_eq!(repo.find_all().await.unwrap(), merged);
        assert_eq!(merged[0], uploaded);
        assert!(repo.find_by_id(&stale.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_remove_missing_book() {
        let dir = tempdir().unwrap();
        let repo = SledLibraryRepository::new(SledStore::open(dir.path().join("lib.sled")).unwrap());
        repo.replace_all(&curated_books()).await.unwrap();

        assert!(repo.remove("g-84").await.unwrap());
        assert!(!repo.remove("g-84").await.unwrap());
        assert_eq!(repo.find_all().await.unwrap().len(), curated_books().len() - 1);
    }
}
