//! Library Queries

/// 书库列表查询
#[derive(Debug, Clone, Default)]
pub struct ListBooks {
    /// 分类名，空或 "all" 表示全部
    pub category: String,
    pub search: String,
    /// 已展示的条目数；`None` 时取默认步长
    pub displayed: Option<usize>,
}

/// 导出纯文本
#[derive(Debug, Clone)]
pub struct ExportBook {
    pub book_id: String,
}
