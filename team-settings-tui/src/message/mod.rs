//!
//! src/message/mod.rs
//! Message 层：事件消息定义
//!
//! 作为 Event —→ Update 之间的桥梁。
//! 所有的用户操作和后台结果都通过 Message 来表达，
//! Update 层根据 Message 来更新 Model。
//!
//!
//! 有模块结构：
//!     src/message/mod.rs
//!         mod app;            // 主消息
//!         mod editor;         // 团队设置页子消息
//!         mod list;           // 团队列表页子消息
//!
//!     后台任务的结果（保存、移除、加载、通知、跳转）以
//!     AppMessage::Backend(BackendEvent) 的形式进入 Update 层，
//!     与键盘输入走同一条路径。
//!

mod app;
mod editor;
mod list;

pub use app::AppMessage;
pub use editor::EditorMessage;
pub use list::ListMessage;
