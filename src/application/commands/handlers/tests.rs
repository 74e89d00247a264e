//! Command handler 测试：内存存储 + 脚本化的目录服务

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::*;
use crate::application::book_text::BookTextResolver;
use crate::application::commands::*;
use crate::application::error::ApplicationError;
use crate::application::ports::{
    BookTextRepositoryPort, CatalogError, GutenbergCatalogPort, LibraryRepositoryPort,
    OpenLibraryPort, ReaderSession, ReaderSessionManagerPort, RepositoryError, SubjectWork,
};
use crate::application::queries::handlers::{GetPageHandler, GetTocHandler, SearchCatalogHandler};
use crate::application::queries::{GetPage, GetToc, SearchCatalog};
use crate::domain::library::{merge_rebuilt, Book, CatalogHit, Category};
use crate::domain::reader::{BookDocument, KeyPress, Pager};
use crate::infrastructure::adapters::OfflineCatalog;
use crate::infrastructure::memory::{
    InMemoryBookTextRepository, InMemoryBookmarkRepository, InMemoryLibraryRepository,
    InMemorySessionManager, InMemoryUserRepository,
};

// ============================================================================
// Fakes
// ============================================================================

/// 只有 horror 主题有作品，fiction 主题和 Open Library 检索总是失败
struct ScriptedCatalog {
    gutenberg_hits: Vec<CatalogHit>,
}

#[async_trait]
impl OpenLibraryPort for ScriptedCatalog {
    async fn search(&self, _query: &str, _limit: usize) -> Result<Vec<CatalogHit>, CatalogError> {
        Err(CatalogError::Timeout)
    }

    async fn subject_works(
        &self,
        subject: &str,
        _limit: usize,
    ) -> Result<Vec<SubjectWork>, CatalogError> {
        match subject {
            "fiction" => Err(CatalogError::ServiceError("503".to_string())),
            "horror" => Ok(vec![
                SubjectWork {
                    key: Some("/works/OL100W".to_string()),
                    title: Some("Carmilla".to_string()),
                    author: Some("Sheridan Le Fanu".to_string()),
                    cover_id: None,
                    cover_edition_key: Some("OL5M".to_string()),
                },
                // 与内置书目重复
                SubjectWork {
                    key: Some("/works/OL100W".to_string()),
                    title: Some("Carmilla".to_string()),
                    author: None,
                    cover_id: None,
                    cover_edition_key: None,
                },
                SubjectWork {
                    key: None,
                    title: None,
                    author: None,
                    cover_id: Some(42),
                    cover_edition_key: None,
                },
            ]),
            _ => Ok(Vec::new()),
        }
    }

    async fn archive_ids(&self, _work_id: &str) -> Result<Vec<String>, CatalogError> {
        Ok(Vec::new())
    }
}

#[async_trait]
impl GutenbergCatalogPort for ScriptedCatalog {
    async fn search(&self, _query: &str) -> Result<Vec<CatalogHit>, CatalogError> {
        Ok(self.gutenberg_hits.clone())
    }
}

/// 写入超过 3 本书时失败
struct SmallLibraryRepository {
    inner: InMemoryLibraryRepository,
}

#[async_trait]
impl LibraryRepositoryPort for SmallLibraryRepository {
    async fn find_all(&self) -> Result<Vec<Book>, RepositoryError> {
        self.inner.find_all().await
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Book>, RepositoryError> {
        self.inner.find_by_id(id).await
    }

    async fn replace_all(&self, books: &[Book]) -> Result<(), RepositoryError> {
        if books.len() > 3 {
            return Err(RepositoryError::DatabaseError("quota exceeded".to_string()));
        }
        self.inner.replace_all(books).await
    }

    async fn rebuild(
        &self,
        snapshot: &HashSet<String>,
        rebuilt: Vec<Book>,
    ) -> Result<Vec<Book>, RepositoryError> {
        let merged = merge_rebuilt(self.inner.find_all().await?, snapshot, rebuilt);
        self.replace_all(&merged).await?;
        Ok(merged)
    }

    async fn insert_front(&self, book: &Book) -> Result<bool, RepositoryError> {
        self.inner.insert_front(book).await
    }

    async fn remove(&self, id: &str) -> Result<bool, RepositoryError> {
        self.inner.remove(id).await
    }
}

/// 抓取 horror 主题时，有用户同时上传了一本书
struct UploadDuringFetch {
    upload: UploadBookHandler,
    uploaded: Mutex<Option<Book>>,
}

#[async_trait]
impl OpenLibraryPort for UploadDuringFetch {
    async fn search(&self, _query: &str, _limit: usize) -> Result<Vec<CatalogHit>, CatalogError> {
        Ok(Vec::new())
    }

    async fn subject_works(
        &self,
        subject: &str,
        _limit: usize,
    ) -> Result<Vec<SubjectWork>, CatalogError> {
        if subject == "horror" {
            let book = self
                .upload
                .handle(UploadBook {
                    title: "Night Journal".to_string(),
                    author: "Me".to_string(),
                    category: Category::Horror,
                    text: "It was late.".to_string(),
                })
                .await
                .unwrap();
            *self.uploaded.lock().await = Some(book);
        }
        Ok(Vec::new())
    }

    async fn archive_ids(&self, _work_id: &str) -> Result<Vec<String>, CatalogError> {
        Ok(Vec::new())
    }
}

fn gutenberg_hit(id: u64, title: &str) -> CatalogHit {
    CatalogHit {
        key: format!("gutenberg-{}", id),
        title: title.to_string(),
        author: "Someone".to_string(),
        cover_id: None,
        cover_url: None,
        first_publish_year: None,
        subject: "fiction".to_string(),
        gutenberg_id: Some(id),
        has_full_text: true,
    }
}

fn open_library_hit(key: &str, title: &str) -> CatalogHit {
    CatalogHit {
        key: key.to_string(),
        title: title.to_string(),
        author: "Someone".to_string(),
        cover_id: Some(7),
        cover_url: None,
        first_publish_year: Some("1872".to_string()),
        subject: "horror".to_string(),
        gutenberg_id: None,
        has_full_text: false,
    }
}

// ============================================================================
// Library
// ============================================================================

#[tokio::test]
async fn test_load_library_skips_failed_subjects() {
    let library_repo = Arc::new(InMemoryLibraryRepository::new());
    let local = Book::local("Notes", "Me", Category::Philosophy);
    library_repo.insert_front(&local).await.unwrap();

    let catalog = Arc::new(ScriptedCatalog {
        gutenberg_hits: Vec::new(),
    });
    let handler = LoadLibraryHandler::new(library_repo.clone(), catalog, 100);
    let result = handler.handle(LoadLibrary::default()).await.unwrap();

    assert_eq!(result.source, LibrarySource::Remote);
    // 本地书 + 15 本内置 + Carmilla + 无 key 的作品
    assert_eq!(result.total, 18);

    let books = library_repo.find_all().await.unwrap();
    assert_eq!(books[0].id, local.id);
    assert_eq!(books[1].id, "g-1342");

    let carmilla = library_repo.find_by_id("OL100W").await.unwrap().unwrap();
    assert_eq!(carmilla.category, Category::Horror);
    assert_eq!(carmilla.cover, "https://covers.openlibrary.org/b/olid/OL5M-L.jpg");
    assert!(!carmilla.has_full_text);

    let untitled = library_repo.find_by_id("horror-1").await.unwrap().unwrap();
    assert_eq!(untitled.title, "Unknown Title");
    assert_eq!(untitled.author, "Unknown Author");
    assert_eq!(untitled.cover, "https://covers.openlibrary.org/b/id/42-L.jpg");
}

#[tokio::test]
async fn test_load_library_keeps_upload_made_during_fetch() {
    let library_repo = Arc::new(InMemoryLibraryRepository::new());
    let text_repo = Arc::new(InMemoryBookTextRepository::new());
    let catalog = Arc::new(UploadDuringFetch {
        upload: UploadBookHandler::new(library_repo.clone(), text_repo.clone()),
        uploaded: Mutex::new(None),
    });
    let handler = LoadLibraryHandler::new(library_repo.clone(), catalog.clone(), 100);

    let result = handler.handle(LoadLibrary { force: true }).await.unwrap();
    assert_eq!(result.source, LibrarySource::Remote);
    assert_eq!(result.total, 16);

    let uploaded = catalog.uploaded.lock().await.clone().unwrap();
    let books = library_repo.find_all().await.unwrap();
    assert_eq!(books[0].id, uploaded.id);
    assert_eq!(books.len(), 16);
    assert_eq!(
        text_repo.find(&uploaded.id).await.unwrap().as_deref(),
        Some("It was late.")
    );
}

#[tokio::test]
async fn test_load_library_uses_large_cache() {
    let books: Vec<Book> = (1..=101)
        .map(|i| Book::gutenberg(i, format!("Book {}", i), "Author", Category::Fiction, ""))
        .collect();
    let library_repo = Arc::new(InMemoryLibraryRepository::with_books(books));
    let handler = LoadLibraryHandler::new(library_repo.clone(), Arc::new(OfflineCatalog::new()), 100);

    let result = handler.handle(LoadLibrary::default()).await.unwrap();
    assert_eq!(result.source, LibrarySource::Cache);
    assert_eq!(result.total, 101);

    let result = handler.handle(LoadLibrary { force: true }).await.unwrap();
    assert_eq!(result.source, LibrarySource::Remote);
    assert_eq!(result.total, 15);
}

#[tokio::test]
async fn test_load_library_falls_back_when_save_fails() {
    let library_repo = Arc::new(SmallLibraryRepository {
        inner: InMemoryLibraryRepository::new(),
    });
    let handler = LoadLibraryHandler::new(library_repo.clone(), Arc::new(OfflineCatalog::new()), 100);

    let result = handler.handle(LoadLibrary::default()).await.unwrap();
    assert_eq!(result.source, LibrarySource::Fallback);
    assert_eq!(result.total, 3);

    let ids: Vec<String> = library_repo
        .find_all()
        .await
        .unwrap()
        .into_iter()
        .map(|b| b.id)
        .collect();
    assert_eq!(ids, vec!["g-1342", "g-84", "g-1661"]);
}

#[tokio::test]
async fn test_add_book_finds_gutenberg_text() {
    let library_repo = Arc::new(InMemoryLibraryRepository::new());
    let catalog = Arc::new(ScriptedCatalog {
        gutenberg_hits: vec![
            gutenberg_hit(1, "Something Else"),
            gutenberg_hit(10007, "Carmilla"),
        ],
    });
    let handler = AddBookToLibraryHandler::new(library_repo.clone(), catalog);

    let hit = open_library_hit("/works/OL100W", "Carmilla");
    let result = handler
        .handle(AddBookToLibrary { hit: hit.clone() })
        .await
        .unwrap();
    assert!(result.added);
    assert_eq!(result.book.id, "OL100W");
    assert_eq!(result.book.gutenberg_id, Some(10007));
    assert!(result.book.has_full_text);
    assert_eq!(result.book.open_library_key.as_deref(), Some("/works/OL100W"));
    assert_eq!(result.book.cover, "https://covers.openlibrary.org/b/id/7-L.jpg");

    let again = handler.handle(AddBookToLibrary { hit }).await.unwrap();
    assert!(!again.added);
    assert_eq!(library_repo.find_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_add_book_without_gutenberg_match() {
    let library_repo = Arc::new(InMemoryLibraryRepository::new());
    let catalog = Arc::new(ScriptedCatalog {
        gutenberg_hits: Vec::new(),
    });
    let handler = AddBookToLibraryHandler::new(library_repo, catalog);

    let result = handler
        .handle(AddBookToLibrary {
            hit: open_library_hit("/works/OL9W", "Obscure"),
        })
        .await
        .unwrap();
    assert_eq!(result.book.gutenberg_id, None);
    assert!(!result.book.has_full_text);
}

#[tokio::test]
async fn test_upload_then_remove() {
    let library_repo = Arc::new(InMemoryLibraryRepository::new());
    let text_repo = Arc::new(InMemoryBookTextRepository::new());
    let upload = UploadBookHandler::new(library_repo.clone(), text_repo.clone());
    let remove = RemoveBookHandler::new(library_repo.clone(), text_repo.clone());

    let err = upload
        .handle(UploadBook {
            title: "Empty".to_string(),
            author: String::new(),
            category: Category::Fiction,
            text: "  \n ".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::ValidationError(_)));

    let book = upload
        .handle(UploadBook {
            title: "  Diary ".to_string(),
            author: " ".to_string(),
            category: Category::History,
            text: "Dear diary.".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(book.title, "Diary");
    assert_eq!(book.author, "Unknown Author");
    assert!(book.is_local());
    assert_eq!(
        text_repo.find(&book.id).await.unwrap().as_deref(),
        Some("Dear diary.")
    );

    remove
        .handle(RemoveBook {
            book_id: book.id.clone(),
        })
        .await
        .unwrap();
    assert!(library_repo.find_by_id(&book.id).await.unwrap().is_none());
    assert!(text_repo.find(&book.id).await.unwrap().is_none());

    let err = remove.handle(RemoveBook { book_id: book.id }).await.unwrap_err();
    assert!(matches!(err, ApplicationError::NotFound { .. }));
}

// ============================================================================
// Catalog search
// ============================================================================

#[tokio::test]
async fn test_search_survives_one_failing_side() {
    let catalog = Arc::new(ScriptedCatalog {
        gutenberg_hits: vec![gutenberg_hit(84, "Frankenstein")],
    });
    let handler = SearchCatalogHandler::new(catalog.clone(), catalog, 30);

    let hits = handler
        .handle(SearchCatalog {
            query: "frankenstein".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].gutenberg_id, Some(84));

    let hits = handler
        .handle(SearchCatalog {
            query: "   ".to_string(),
        })
        .await
        .unwrap();
    assert!(hits.is_empty());
}

// ============================================================================
// Reader
// ============================================================================

struct Reader {
    open: OpenBookHandler,
    navigate: NavigateHandler,
    toggle: ToggleBookmarkHandler,
    press: PressKeyHandler,
    close: CloseReaderHandler,
    get_page: GetPageHandler,
}

fn reader(text: &str) -> Reader {
    let session_manager = Arc::new(InMemorySessionManager::new());
    let bookmark_repo = Arc::new(InMemoryBookmarkRepository::new());
    let library_repo = Arc::new(InMemoryLibraryRepository::with_books(vec![Book::gutenberg(
        84,
        "Frankenstein",
        "Mary Shelley",
        Category::Horror,
        "",
    )]));
    let catalog = Arc::new(OfflineCatalog::new().with_text("g-84", text));
    let resolver = Arc::new(BookTextResolver::new(
        Arc::new(InMemoryBookTextRepository::new()),
        catalog,
    ));

    Reader {
        open: OpenBookHandler::new(
            library_repo,
            bookmark_repo.clone(),
            session_manager.clone(),
            resolver,
            Pager::new(100),
        ),
        navigate: NavigateHandler::new(session_manager.clone(), bookmark_repo.clone()),
        toggle: ToggleBookmarkHandler::new(session_manager.clone(), bookmark_repo.clone()),
        press: PressKeyHandler::new(session_manager.clone(), bookmark_repo.clone()),
        close: CloseReaderHandler::new(session_manager.clone()),
        get_page: GetPageHandler::new(session_manager, bookmark_repo),
    }
}

/// 5 页，每页以一个章节标题开头
fn five_chapters() -> String {
    (1..=5)
        .map(|i| format!("Chapter {}\n{}.", i, "word ".repeat(17).trim_end()))
        .collect::<Vec<_>>()
        .join("\n")
}

#[tokio::test]
async fn test_open_unknown_book() {
    let r = reader("text");
    let err = r
        .open
        .handle(OpenBook {
            book_id: "g-1".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::NotFound { .. }));
}

#[tokio::test]
async fn test_navigation_clamps() {
    let r = reader(&five_chapters());
    let opened = r
        .open
        .handle(OpenBook {
            book_id: "g-84".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(opened.text_origin, "remote");
    assert_eq!(opened.chapters, 5);
    assert_eq!(opened.view.page, 1);
    assert_eq!(opened.view.page_count, 5);
    assert_eq!(opened.view.progress_percent, 20.0);

    let session_id = opened.view.session_id;
    let turn = |direction| TurnPage {
        session_id: session_id.clone(),
        direction,
    };

    let view = r.navigate.turn(turn(PageDirection::Prev)).await.unwrap();
    assert_eq!(view.page, 1);
    let view = r.navigate.turn(turn(PageDirection::Next)).await.unwrap();
    assert_eq!(view.page, 2);
    assert!(view.content.starts_with("Chapter 2"));

    let view = r
        .navigate
        .go_to(GoToPage {
            session_id: session_id.clone(),
            page: -3,
        })
        .await
        .unwrap();
    assert_eq!(view.page, 1);

    let view = r
        .navigate
        .go_to(GoToPage {
            session_id: session_id.clone(),
            page: 50,
        })
        .await
        .unwrap();
    assert_eq!(view.page, 5);
    let view = r.navigate.turn(turn(PageDirection::Next)).await.unwrap();
    assert_eq!(view.page, 5);
    assert_eq!(view.progress_percent, 100.0);

    let view = r
        .navigate
        .go_to_chapter(GoToChapter {
            session_id: session_id.clone(),
            chapter: 2,
        })
        .await
        .unwrap();
    assert_eq!(view.page, 3);

    let err = r
        .navigate
        .go_to_chapter(GoToChapter {
            session_id: session_id.clone(),
            chapter: 5,
        })
        .await
        .unwrap_err();
    match err {
        ApplicationError::ValidationError(msg) => {
            assert_eq!(msg, "Invalid chapter: 5 (total chapters: 5)")
        }
        other => panic!("unexpected error: {:?}", other),
    }

    // 导航会持久化到会话
    let view = r
        .get_page
        .handle(GetPage {
            session_id: session_id.clone(),
        })
        .await
        .unwrap();
    assert_eq!(view.page, 3);
}

#[tokio::test]
async fn test_bookmarks_and_keys() {
    let r = reader(&five_chapters());
    let session_id = r
        .open
        .handle(OpenBook {
            book_id: "g-84".to_string(),
        })
        .await
        .unwrap()
        .view
        .session_id;

    let added = r
        .toggle
        .handle(ToggleBookmark {
            session_id: session_id.clone(),
        })
        .await
        .unwrap();
    assert!(added.bookmarked);
    assert_eq!(added.pages, vec![1]);

    let press = |key: KeyPress| PressKey {
        session_id: session_id.clone(),
        key,
    };

    match r.press.handle(press(KeyPress::new("ArrowRight"))).await.unwrap() {
        KeyOutcome::Page(view) => {
            assert_eq!(view.page, 2);
            assert!(!view.bookmarked);
        }
        other => panic!("unexpected outcome: {:?}", other.kind()),
    }

    match r.press.handle(press(KeyPress::new("B").with_ctrl())).await.unwrap() {
        KeyOutcome::Bookmark(result) => assert_eq!(result.pages, vec![1, 2]),
        other => panic!("unexpected outcome: {:?}", other.kind()),
    }

    match r.press.handle(press(KeyPress::new("ArrowLeft"))).await.unwrap() {
        KeyOutcome::Page(view) => {
            assert_eq!(view.page, 1);
            assert!(view.bookmarked);
        }
        other => panic!("unexpected outcome: {:?}", other.kind()),
    }

    // 取消第 1 页书签
    let removed = r
        .toggle
        .handle(ToggleBookmark {
            session_id: session_id.clone(),
        })
        .await
        .unwrap();
    assert!(!removed.bookmarked);
    assert_eq!(removed.pages, vec![2]);

    let outcome = r.press.handle(press(KeyPress::new("b"))).await.unwrap();
    assert_eq!(outcome.kind(), "ignored");

    let outcome = r.press.handle(press(KeyPress::new("Escape"))).await.unwrap();
    assert_eq!(outcome.kind(), "closed");

    let err = r
        .close
        .handle(CloseReader {
            session_id: session_id.clone(),
        })
        .unwrap_err();
    assert!(matches!(err, ApplicationError::NotFound { .. }));

    // 会话已关闭
    let err = r.press.handle(press(KeyPress::new("ArrowRight"))).await.unwrap_err();
    assert!(matches!(err, ApplicationError::NotFound { .. }));
}

// ============================================================================
// Account
// ============================================================================

#[tokio::test]
async fn test_register_and_login() {
    let user_repo = Arc::new(InMemoryUserRepository::new());
    let register = RegisterHandler::new(user_repo.clone());
    let login = LoginHandler::new(user_repo);

    let profile = register
        .handle(Register {
            name: "Ada".to_string(),
            email: " ada@example.com ".to_string(),
            password: "engine".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(profile.email, "ada@example.com");

    let err = register
        .handle(Register {
            name: "Other".to_string(),
            email: "ada@example.com".to_string(),
            password: "x".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::Conflict(_)));

    let err = register
        .handle(Register {
            name: "Nobody".to_string(),
            email: "nobody@example.com".to_string(),
            password: String::new(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::ValidationError(_)));

    let profile = login
        .handle(Login {
            email: "ada@example.com".to_string(),
            password: "engine".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(profile.name, "Ada");

    for (email, password) in [("ada@example.com", "Engine"), ("bob@example.com", "engine")] {
        let err = login
            .handle(Login {
                email: email.to_string(),
                password: password.to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::Unauthorized(_)));
    }
}

#[tokio::test]
async fn test_read_only_requests_keep_session_alive() {
    let session_manager = Arc::new(InMemorySessionManager::new());
    let bookmark_repo = Arc::new(InMemoryBookmarkRepository::new());
    let get_page = GetPageHandler::new(session_manager.clone(), bookmark_repo.clone());
    let get_toc = GetTocHandler::new(session_manager.clone());
    let toggle = ToggleBookmarkHandler::new(session_manager.clone(), bookmark_repo);

    let stale_session = || {
        let book = Book::local("Idle", "Me", Category::Fiction);
        let mut session = ReaderSession::new(book, BookDocument::new(&five_chapters(), &Pager::new(100)));
        session.last_activity = chrono::Utc::now() - chrono::Duration::seconds(600);
        session_manager.create(session).unwrap()
    };

    let id = stale_session();
    assert_eq!(session_manager.get_expired_sessions(60), vec![id.clone()]);
    get_page.handle(GetPage { session_id: id.clone() }).await.unwrap();
    assert!(session_manager.get_expired_sessions(60).is_empty());
    session_manager.close(&id).unwrap();

    let id = stale_session();
    get_toc.handle(GetToc { session_id: id.clone() }).unwrap();
    assert!(session_manager.get_expired_sessions(60).is_empty());
    session_manager.close(&id).unwrap();

    let id = stale_session();
    toggle.handle(ToggleBookmark { session_id: id }).await.unwrap();
    assert!(session_manager.get_expired_sessions(60).is_empty());
}
