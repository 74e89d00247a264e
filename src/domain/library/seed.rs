//! 内置书目
//!
//! 精选的 Gutenberg 经典作品，总是带全文，排在书库最前面。

use std::collections::HashSet;

use super::{Book, Category};

const CURATED: &[(u64, &str, &str, Category, u64)] = &[
    (1342, "Pride and Prejudice", "Jane Austen", Category::Romance, 8479576),
    (84, "Frankenstein", "Mary Shelley", Category::Horror, 6788810),
    (1661, "The Adventures of Sherlock Holmes", "Arthur Conan Doyle", Category::Adventure, 12645651),
    (345, "Dracula", "Bram Stoker", Category::Horror, 8477477),
    (11, "Alice's Adventures in Wonderland", "Lewis Carroll", Category::Fantasy, 8477639),
    (2701, "Moby Dick", "Herman Melville", Category::Adventure, 8258627),
    (98, "A Tale of Two Cities", "Charles Dickens", Category::Classics, 12803766),
    (174, "The Picture of Dorian Gray", "Oscar Wilde", Category::Fiction, 8479609),
    (1260, "Jane Eyre", "Charlotte Brontë", Category::Romance, 8314135),
    (36, "The War of the Worlds", "H.G. Wells", Category::Science, 8479583),
    (120, "Treasure Island", "Robert Louis Stevenson", Category::Adventure, 8410249),
    (1232, "The Prince", "Niccolò Machiavelli", Category::Philosophy, 8231990),
    (768, "Wuthering Heights", "Emily Brontë", Category::Romance, 12803558),
    (1400, "Great Expectations", "Charles Dickens", Category::Classics, 8478381),
    (46, "A Christmas Carol", "Charles Dickens", Category::Classics, 12803708),
];

/// 书库初始化时遍历的 Open Library 主题
pub const LIBRARY_SUBJECTS: &[&str] = &[
    "fiction",
    "adventure",
    "romance",
    "horror",
    "fantasy",
    "classics",
    "science",
    "history",
    "philosophy",
    "mystery",
    "thriller",
    "biography",
    "poetry",
    "drama",
    "children",
];

/// 缓存书库超过该数量时直接复用，不再重新抓取
pub const CACHED_LIBRARY_THRESHOLD: usize = 100;

fn curated_book(&(id, title, author, category, cover_id): &(u64, &str, &str, Category, u64)) -> Book {
    Book::gutenberg(
        id,
        title,
        author,
        category,
        super::book::cover_url_by_id(cover_id),
    )
}

/// 精选 Gutenberg 书目
pub fn curated_books() -> Vec<Book> {
    CURATED.iter().map(curated_book).collect()
}

/// 书库加载失败时的最小书目
pub fn fallback_books() -> Vec<Book> {
    CURATED.iter().take(3).map(curated_book).collect()
}

/// 合并重建后的书目与当前书库
///
/// `snapshot` 为开始重建时书库中的 ID。当前书库里的本地书籍，以及重建期间新加入的书籍
/// （不在 `snapshot` 中）按原顺序排在最前，其后是 `rebuilt` 中不重复的条目。
pub fn merge_rebuilt(current: Vec<Book>, snapshot: &HashSet<String>, rebuilt: Vec<Book>) -> Vec<Book> {
    let mut merged: Vec<Book> = current
        .into_iter()
        .filter(|b| b.is_local() || !snapshot.contains(&b.id))
        .collect();
    let mut seen: HashSet<String> = merged.iter().map(|b| b.id.clone()).collect();

    merged.extend(rebuilt.into_iter().filter(|b| seen.insert(b.id.clone())));
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_curated_books_have_full_text() {
        let books = curated_books();
        assert_eq!(books.len(), 15);
        assert!(books.iter().all(|b| b.has_full_text && b.gutenberg_id.is_some()));

        let ids: HashSet<&str> = books.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids.len(), books.len());
    }

    #[test]
    fn test_fallback_books() {
        let ids: Vec<String> = fallback_books().into_iter().map(|b| b.id).collect();
        assert_eq!(ids, vec!["g-1342", "g-84", "g-1661"]);
    }

    #[test]
    fn test_merge_keeps_local_and_newly_added_books() {
        let kept_local = Book::local("Old Notes", "Me", Category::Fiction);
        let removed_local = Book::local("Deleted", "Me", Category::Fiction);
        let stale = Book::gutenberg(9, "Stale", "Someone", Category::Fiction, "");
        let snapshot: HashSet<String> = [&kept_local, &removed_local, &stale]
            .iter()
            .map(|b| b.id.clone())
            .collect();

        // 重建期间：上传了一本，从检索添加了一本，删除了一本本地书
        let uploaded = Book::local("New Notes", "Me", Category::Philosophy);
        let added = Book::gutenberg(1342, "Pride and Prejudice", "Jane Austen", Category::Romance, "");
        let current = vec![added.clone(), uploaded.clone(), kept_local.clone(), stale];

        let merged = merge_rebuilt(current, &snapshot, curated_books());
        let ids: Vec<&str> = merged.iter().map(|b| b.id.as_str()).collect();

        assert_eq!(&ids[..3], &[added.id.as_str(), uploaded.id.as_str(), kept_local.id.as_str()]);
        assert!(!ids.contains(&"g-9"));
        assert!(!ids.contains(&removed_local.id.as_str()));
        // g-1342 已在前面，不重复
        assert_eq!(merged.len(), 3 + curated_books().len() - 1);
    }
}
