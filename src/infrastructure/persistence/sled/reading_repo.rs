//! Sled Bookmark / Book Text Repositories
//!
//! 每本书一个键，互不影响

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::SledStore;
use crate::application::ports::{BookTextRepositoryPort, BookmarkRepositoryPort, RepositoryError};
use crate::domain::reader::BookmarkSet;

fn bookmarks_key(book_id: &str) -> String {
    format!("bookverse_bookmarks:{}", book_id)
}

fn text_key(book_id: &str) -> String {
    format!("bookverse_text:{}", book_id)
}

/// 书签：页码数组，切换操作串行化
pub struct SledBookmarkRepository {
    store: SledStore,
    write_lock: Mutex<()>,
}

impl SledBookmarkRepository {
    pub fn new(store: SledStore) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    fn load(&self, book_id: &str) -> Result<BookmarkSet, RepositoryError> {
        Ok(self
            .store
            .get_json(&bookmarks_key(book_id))?
            .unwrap_or_default())
    }
}

#[async_trait]
impl BookmarkRepositoryPort for SledBookmarkRepository {
    async fn find(&self, book_id: &str) -> Result<BookmarkSet, RepositoryError> {
        self.load(book_id)
    }

    async fn toggle(&self, book_id: &str, page: usize) -> Result<(bool, BookmarkSet), RepositoryError> {
        let _guard = self.write_lock.lock().await;
        let mut bookmarks = self.load(book_id)?;
        let bookmarked = bookmarks.toggle(page);
        self.store.put_json(&bookmarks_key(book_id), &bookmarks)?;
        Ok((bookmarked, bookmarks))
    }
}

/// 上传书籍的正文
pub struct SledBookTextRepository {
    store: SledStore,
}

impl SledBookTextRepository {
    pub fn new(store: SledStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl BookTextRepositoryPort for SledBookTextRepository {
    async fn find(&self, book_id: &str) -> Result<Option<String>, RepositoryError> {
        self.store.get_json(&text_key(book_id))
    }

    async fn save(&self, book_id: &str, text: &str) -> Result<(), RepositoryError> {
        self.store.put_json(&text_key(book_id), text)
    }

    async fn delete(&self, book_id: &str) -> Result<(), RepositoryError> {
        self.store.remove(&text_key(book_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_bookmarks_are_per_book() {
        let dir = tempdir().unwrap();
        let repo = SledBookmarkRepository::new(SledStore::open(dir.path().join("bm.sled")).unwrap());

        assert!(repo.find("g-11").await.unwrap().is_empty());

        repo.toggle("g-11", 7).await.unwrap();
        let (bookmarked, marks) = repo.toggle("g-11", 1).await.unwrap();
        assert!(bookmarked);
        assert_eq!(marks.pages(), &[7, 1]);

        assert_eq!(repo.find("g-11").await.unwrap().pages(), &[7, 1]);
        assert!(repo.find("g-84").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_toggles_keep_every_page() {
        let dir = tempdir().unwrap();
        let repo = std::sync::Arc::new(SledBookmarkRepository::new(
            SledStore::open(dir.path().join("bm.sled")).unwrap(),
        ));

        let tasks: Vec<_> = (1..=20)
            .map(|page| {
                let repo = repo.clone();
                tokio::spawn(async move { repo.toggle("g-84", page).await.unwrap() })
            })
            .collect();
        for task in tasks {
            assert!(task.await.unwrap().0);
        }

        let mut pages = repo.find("g-84").await.unwrap().pages().to_vec();
        pages.sort_unstable();
        assert_eq!(pages, (1..=20).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_text_save_and_delete() {
        let dir = tempdir().unwrap();
        let repo = SledBookTextRepository::new(SledStore::open(dir.path().join("txt.sled")).unwrap());

        repo.save("local-1", "Once upon a time.").await.unwrap();
        assert_eq!(
            repo.find("local-1").await.unwrap().as_deref(),
            Some("Once upon a time.")
        );

        repo.delete("local-1").await.unwrap();
        assert_eq!(repo.find("local-1").await.unwrap(), None);
        // 删除不存在的键不报错
        repo.delete("local-1").await.unwrap();
    }
}
