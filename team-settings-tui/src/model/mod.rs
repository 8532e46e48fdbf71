//!
//! src/model/mod.rs
//! Model 层：应用状态定义
//!
//! Model 层是应用状态的 “唯一真相来源”。
//! 所有状态变更都通过 Update 层来触发。
//!
//!
//! 有模块结构：
//!     src/model/mod.rs
//!         mod app;            // 主应用状态
//!         mod page;           // 页面路由状态
//!         mod status;         // 状态栏消息
//!
//!         pub mod state;      // 页面数据状态
//!
//!     与原先一样，page.rs 与 state/ 各司其职：
//!         - Page 只标识当前处于哪个页面；
//!         - State 存储页面的数据（团队列表、已挂载的编辑器、焦点字段等）。
//!
//!     团队设置页的字段状态（Clean / Dirty / Saving / Saved / Errored）由
//!     team-settings-core 的 TeamSettingsView 持有，TUI 只保存焦点位置。
//!

mod app;
mod page;
mod status;
pub mod state;

pub use app::App;
pub use page::Page;
pub use state::{TeamListState, TeamSettingsState};
pub use status::StatusLine;
