//! 书籍分类

use serde::{Deserialize, Serialize};

/// 书库分类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Fiction,
    Adventure,
    Romance,
    Horror,
    Fantasy,
    Classics,
    Science,
    History,
    Philosophy,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Category::Fiction,
        Category::Adventure,
        Category::Romance,
        Category::Horror,
        Category::Fantasy,
        Category::Classics,
        Category::Science,
        Category::History,
        Category::Philosophy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Fiction => "fiction",
            Category::Adventure => "adventure",
            Category::Romance => "romance",
            Category::Horror => "horror",
            Category::Fantasy => "fantasy",
            Category::Classics => "classics",
            Category::Science => "science",
            Category::History => "history",
            Category::Philosophy => "philosophy",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == s)
    }

    /// 将 Open Library / Gutendex 的主题映射为分类，未知主题归入 fiction
    pub fn from_subject(subject: &str) -> Self {
        match subject.trim().to_lowercase().as_str() {
            "adventure" => Category::Adventure,
            "romance" => Category::Romance,
            "horror" => Category::Horror,
            "fantasy" | "children" => Category::Fantasy,
            "classics" | "poetry" | "drama" => Category::Classics,
            "science" => Category::Science,
            "history" | "biography" => Category::History,
            "philosophy" => Category::Philosophy,
            _ => Category::Fiction,
        }
    }

    /// 首字母大写的展示名
    pub fn display_name(&self) -> String {
        let name = self.as_str();
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 列表筛选条件中的分类（`all` 表示不过滤）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// 解析筛选参数，无法识别的值返回 None
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "" | "all" => Some(CategoryFilter::All),
            other => Category::from_str(other).map(CategoryFilter::Only),
        }
    }

    pub fn matches(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(c) => *c == category,
        }
    }
}
