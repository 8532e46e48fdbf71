//!
//! src/event/mod.rs
//! Event 层：事件处理
//!
//! 负责将键盘输入转换为 Message。
//!
//!
//! 有模块结构：
//!     src/event/mod.rs
//!         mod handler;        // 事件处理器
//!         mod keymap;         // 快捷键映射
//!
//!
//!     handle_event 根据当前页面分发：
//!         - 全局快捷键（Ctrl+C）就地处理；
//!         - 团队列表页：↑/↓ 选择，Enter 打开，r 刷新，q 退出；
//!         - 团队设置页：
//!             · 移除确认中：y/Enter 确认，n/Esc 取消，其余按键忽略；
//!             · 否则 Tab/↓ 与 Shift+Tab/↑ 切换字段（失焦即保存），
//!               Ctrl+Z 撤销，Ctrl+D 移除，Esc 返回，其余字符写入焦点字段。
//!

mod handler;
mod keymap;

pub use handler::{handle_event, poll_event};
