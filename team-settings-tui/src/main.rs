//! Team Settings TUI
//!
//! ## 架构
//!
//! 采用 Elm Architecture (TEA) 模式：
//! - **Model**: 应用状态 (`model/`)
//! - **Message**: 事件消息 (`message/`)
//! - **Update**: 状态更新 (`update/`)
//! - **View**: UI 渲染 (`view/`)
//! - **Event**: 输入处理 (`event/`)
//! - **Backend**: 业务服务 (`backend/`)
//!
//!
//! main.rs
//! Team Settings TUI 的程序入口
//!
//! 其执行：
//! fn `main()` {
//!
//!     AppConfig::load()       // 读取配置，并设置主题
//!     init_logging()          // 文件日志（终端被 TUI 占用）
//!     Runtime::new()          // 后台任务运行时
//!     CoreService::new()      // 组装核心服务，写入示例数据
//!     init_terminal()         // 初始化终端
//!     model::App:new()        // 创建 APP 实例
//!     app::run()              // 运行 app.rs 主循环
//!     restore_terminal()      // 无论成功与否，都恢复终端
//!
//! }
//!
//!
//! 远程调用运行在 tokio 运行时的后台线程上，主循环本身是同步的：
//! 它只通过 `CoreService` 提交请求，再从通道中取回结果。

mod app;
mod backend;
mod event;
mod message;
mod model;
mod update;
mod util;
mod view;

use anyhow::{Context, Result};

use backend::{AppConfig, CoreService};
use util::{init_logging, init_terminal, restore_terminal};

fn main() -> Result<(), anyhow::Error> {
    // 1. 读取配置
    let config = AppConfig::load()?;
    view::theme::set_theme(config.theme);

    // 2. 初始化日志（guard 持有到程序结束）
    let _log_guard = init_logging(&config.log_dir())?;

    // 3. 启动后台运行时
    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;

    // 4. 创建核心服务
    let (backend, events) = CoreService::new(config, runtime.handle().clone())?;
    runtime.block_on(backend.initialize())?;

    // 5. 初始化终端
    let mut terminal = init_terminal()?;

    // 6. 创建应用实例
    let mut app = model::App::new(backend, events);

    // 7. 运行主循环
    let result = app::run(&mut terminal, &mut app);

    // 8. 恢复终端（无论成功失败都执行）
    restore_terminal(&mut terminal)?;

    if let Err(e) = &result {
        log::error!("Application exited with error: {e:#}");
    }
    result
}
