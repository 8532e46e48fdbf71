//!
//! src/backend/mod.rs
//! Backend 层：业务服务
//!
//! Backend 层与 UI 完全解耦，通过 team-settings-core 实现团队设置的
//! 保存、撤销和移除。
//!
//!
//! 有模块结构：
//!     src/backend/mod.rs
//!         mod core_service;       // 核心服务入口
//!         mod team_store;         // 团队持久化（JSON 文件，兼做"远程 API"）
//!         mod channel_sinks;      // 通知 / 导航 -> BackendEvent
//!         mod config_service;     // 应用配置
//!
//!
//! ═══════════════════════════════════════════════════════════════════════════
//! 数据流
//! ═══════════════════════════════════════════════════════════════════════════
//!
//!     用户把焦点移出字段
//!         ↓
//!     Update 层调用 TeamSettingsView::begin_blur，得到 SaveRequest
//!         ↓
//!     CoreService::submit_save 在 tokio 任务中执行请求
//!         ↓
//!     BackendEvent::SaveResolved 经通道回到主循环
//!         ↓
//!     Update 层调用 apply_save_outcome，View 层重新渲染
//!

mod channel_sinks;
mod config_service;
mod core_service;
mod team_store;

pub use channel_sinks::{BackendEvent, StatusLevel};
pub use config_service::AppConfig;
pub use core_service::CoreService;
pub use team_store::Team;
