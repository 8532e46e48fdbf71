//!
//! src/util/mod.rs
//! Util 层：与团队设置无关的基础设施
//!
//!
//! 有模块结构：
//!     src/util/mod.rs
//!         mod logging;        // 按天滚动的文件日志（标准输出属于 TUI）
//!         mod terminal;       // 原始模式 / 备用屏幕的进入与恢复
//!
//!
//! main.rs 的顺序是：先 init_logging，再 init_terminal；
//! app::run 返回后无论成败都要 restore_terminal。
//! 程序 panic 时由 init_terminal 安装的钩子负责恢复终端。
//!

mod logging;
mod terminal;

pub use logging::init_logging;
pub use terminal::{init_terminal, restore_terminal, Term};
