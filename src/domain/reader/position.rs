//! 阅读位置

use serde::{Deserialize, Serialize};

/// 阅读位置（页码从 1 开始）
///
/// 不变量: 1 <= current <= page_count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadingPosition {
    current: usize,
    page_count: usize,
}

impl ReadingPosition {
    /// 新书从第 1 页开始；`page_count` 为 0 时按 1 页处理
    pub fn new(page_count: usize) -> Self {
        Self {
            current: 1,
            page_count: page_count.max(1),
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// 下一页，已在末页时不变
    pub fn next(&mut self) -> usize {
        if self.current < self.page_count {
            self.current += 1;
        }
        self.current
    }

    /// 上一页，已在首页时不变
    pub fn prev(&mut self) -> usize {
        if self.current > 1 {
            self.current -= 1;
        }
        self.current
    }

    /// 跳转到指定页，越界时截断到有效范围
    pub fn go_to(&mut self, page: i64) -> usize {
        let clamped = page.clamp(1, self.page_count as i64);
        self.current = clamped as usize;
        self.current
    }

    /// 阅读进度百分比
    pub fn progress_percent(&self) -> f64 {
        self.current as f64 / self.page_count as f64 * 100.0
    }

    /// 重新加载文本后回到第 1 页
    pub fn reset(&mut self, page_count: usize) {
        *self = Self::new(page_count);
    }
}
