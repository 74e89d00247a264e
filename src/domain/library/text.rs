//! 书籍正文的整理与占位正文生成

use super::Book;

const HEAVY_RULE: char = '═';
const LIGHT_RULE: char = '─';

fn rule(ch: char, width: usize) -> String {
    std::iter::repeat(ch).take(width).collect()
}

/// 判断抓取到的文本是否像一个 HTML 页面
pub fn looks_like_html(text: &str) -> bool {
    text.contains("<!DOCTYPE") || text.contains("<html") || text.contains("</head>")
}

/// 校验远程文本：长度超过 `min_len` 且不是 HTML
pub fn is_usable_text(text: &str, min_len: usize) -> bool {
    text.chars().count() > min_len && !looks_like_html(text)
}

/// 整理 Internet Archive 的 OCR 文本并加上书名页
///
/// - 连续 3 个以上换行压缩为 2 个
/// - 去掉每行行首空白
/// - 首尾 trim
pub fn format_archive_text(book: &Book, raw: &str) -> String {
    let mut cleaned = String::with_capacity(raw.len());
    let mut blank_run = 0;

    for line in raw.split('\n') {
        let line = line.trim_start();
        if line.is_empty() {
            blank_run += 1;
            if blank_run > 1 {
                continue;
            }
        } else {
            blank_run = 0;
        }
        cleaned.push_str(line);
        cleaned.push('\n');
    }

    format!(
        "{}\n\nBy {}\n\n{}\n\n{}",
        book.title.to_uppercase(),
        book.author,
        rule(HEAVY_RULE, 50),
        cleaned.trim()
    )
}

/// 无法获取全文时使用的占位正文
///
/// 内容只依赖书名、作者和分类，同一本书总是得到相同的文本。
pub fn fallback_content(book: &Book) -> String {
    let heavy = rule(HEAVY_RULE, 60);
    let light = rule(LIGHT_RULE, 40);
    let title = &book.title;
    let author = &book.author;
    let category = book.category.as_str();

    let sections: [(&str, Vec<String>); 8] = [
        (
            "ABOUT THIS BOOK",
            vec![format!(
                "Welcome to your reading experience of \"{title}\" by {author}. This book belongs to the {category} category and is part of our curated digital library collection."
            )],
        ),
        (
            "CHAPTER ONE",
            vec![
                format!("The story begins here, in the pages of {title}. Every memorable tale begins with its opening lines."),
                format!("{author} crafted this work with close attention to detail, weaving together themes that resonate across time and earned it a place in the {category} genre."),
                "The world within these pages awaits your exploration. Characters come alive, settings unfold, and the narrative carries you through tension and revelation.".to_string(),
            ],
        ),
        (
            "CHAPTER TWO",
            vec![
                format!("As the narrative develops, we find ourselves deeper in the world that {author} has created. The stakes become clearer."),
                format!("In the {category} tradition, certain elements emerge that define the genre, and this work delivers on the promises made to its readers."),
                "The characters we meet are reflections of humanity, with virtues and flaws we recognize in ourselves.".to_string(),
            ],
        ),
        (
            "CHAPTER THREE",
            vec![
                "The middle of any great book is a turning point. Conflicts intensify, relationships deepen, and the path forward grows both clearer and more treacherous.".to_string(),
                format!("{title} shows the craft of storytelling at this stage. The pacing shifts, and the reader is drawn forward by the need to know what happens next."),
                format!("Notice the language throughout. {author} has a distinctive voice, one of the reasons readers return to this work again and again."),
            ],
        ),
        (
            "CHAPTER FOUR",
            vec![
                "Themes introduced quietly in earlier chapters now take center stage. Great literature shows rather than tells.".to_string(),
                format!("The {category} genre has a rich history, and {title} contributes meaningfully to it while bringing fresh perspectives of its own."),
                "Characters face choices with real consequences, and the reader is invited to weigh the same questions alongside them.".to_string(),
            ],
        ),
        (
            "CHAPTER FIVE",
            vec![
                "The narrative builds toward its climax. The threads laid so carefully begin to converge, though the resolution remains uncertain.".to_string(),
                format!("{author} calibrates the tension precisely in these passages. Each scene serves a purpose in the larger design."),
                "Recurring motifs gain significance through repetition and variation, rewarding close attention.".to_string(),
            ],
        ),
        (
            "CONTINUING YOUR READING EXPERIENCE",
            vec![
                format!("This preview represents a portion of the complete work. To read the full text of \"{title}\" by {author}:"),
                "1. Visit your local library for a physical or digital copy\n2. Check Open Library at openlibrary.org for borrowing options\n3. Search for available editions through online booksellers\n4. Explore Project Gutenberg for public domain classics".to_string(),
            ],
        ),
        (
            "ABOUT THE AUTHOR",
            vec![format!(
                "{author} has made significant contributions to the world of literature. Their works continue to be read, studied, and celebrated around the globe."
            )],
        ),
    ];

    let mut out = format!(
        "{heavy}\n\n{}\n\nBy {author}\n\nCategory: {category}\n\n{heavy}\n\n",
        title.to_uppercase()
    );
    for (heading, paragraphs) in sections {
        out.push_str(heading);
        out.push('\n');
        out.push_str(&light);
        out.push_str("\n\n");
        out.push_str(&paragraphs.join("\n\n"));
        out.push_str("\n\n");
        out.push_str(&heavy);
        out.push_str("\n\n");
    }
    out.push_str("Thank you for reading with BookVerse.\n\n");
    out.push_str(&heavy);
    out
}

/// 导出用的纯文本：书名页 + 正文
pub fn export_text(book: &Book, body: &str) -> String {
    format!(
        "{}\n\nby {}\n\n{}\n\n{}\n\n{}",
        book.title,
        book.author,
        book.category.display_name(),
        rule(HEAVY_RULE, 60),
        body
    )
}

/// 导出文件名：非字母数字替换为下划线并转小写
pub fn export_file_name(book: &Book) -> String {
    let stem: String = book
        .title
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect();
    format!("{}.txt", stem)
}
