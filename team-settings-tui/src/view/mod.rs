//!
//! src/view/mod.rs
//! View 层：UI 渲染
//!
//! View 层只读取 Model，不修改任何状态。
//! 团队设置页的内容来自核心库的 ViewModel（TeamSettingsView::render），
//! 这里只负责把它画到终端上。
//!
//!
//! 有模块结构：
//!     src/view/mod.rs
//!         mod components;     // 状态栏、确认弹窗
//!         mod layout;         // 主布局
//!         mod pages;          // 团队列表页、团队设置页
//!         pub mod theme;      // 主题和样式
//!

mod components;
mod layout;
mod pages;
pub mod theme;

pub use layout::render;
