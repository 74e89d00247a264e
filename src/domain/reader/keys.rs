//! 阅读界面快捷键

use serde::{Deserialize, Serialize};

/// 阅读动作
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReaderAction {
    NextPage,
    PrevPage,
    Close,
    ToggleBookmark,
}

/// 客户端上报的按键事件（`key` 取值同浏览器 `KeyboardEvent.key`）
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KeyPress {
    pub key: String,
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub meta: bool,
}

impl KeyPress {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Default::default()
        }
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn with_meta(mut self) -> Self {
        self.meta = true;
        self
    }

    /// 映射到阅读动作，无绑定的按键返回 None
    pub fn action(&self) -> Option<ReaderAction> {
        match self.key.as_str() {
            "ArrowRight" | "PageDown" => Some(ReaderAction::NextPage),
            "ArrowLeft" | "PageUp" => Some(ReaderAction::PrevPage),
            "Escape" => Some(ReaderAction::Close),
            "b" | "B" if self.ctrl || self.meta => Some(ReaderAction::ToggleBookmark),
            _ => None,
        }
    }
}
