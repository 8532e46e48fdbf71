//! 核心服务
//!
//! 封装 team-settings-core，提供给 TUI 层使用的统一接口。
//! 所有远程调用都在 tokio 任务中执行，结果通过通道回到 UI 主循环。

use std::sync::Arc;

use team_settings_core::types::{CapabilitySet, RecordKey, RemovalRequest, SaveRequest};
use team_settings_core::{CoreResult, EditorContext, RouteConfig, TeamSettingsView};
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use super::channel_sinks::{send, BackendEvent, ChannelNavigator, ChannelNotifier};
use super::config_service::AppConfig;
use super::team_store::{JsonTeamStore, Team};

/// TUI 核心服务
pub struct CoreService {
    config: AppConfig,
    /// 编辑器上下文（供各页面使用）
    ctx: Arc<EditorContext>,
    store: Arc<JsonTeamStore>,
    handle: Handle,
    tx: UnboundedSender<BackendEvent>,
}

impl CoreService {
    /// 创建核心服务实例，返回事件接收端
    pub fn new(
        config: AppConfig,
        handle: Handle,
    ) -> CoreResult<(Self, UnboundedReceiver<BackendEvent>)> {
        let (tx, rx) = mpsc::unbounded_channel();

        // 1. 创建基础依赖
        let store = Arc::new(JsonTeamStore::new(&config.data_dir())?);
        let notifier = Arc::new(ChannelNotifier::new(tx.clone()));
        let navigator = Arc::new(ChannelNavigator::new(tx.clone()));

        // 2. 组装 EditorContext
        let ctx = Arc::new(EditorContext::new(
            store.clone(),
            notifier,
            navigator,
            Arc::new(config.editor.clone()),
        ));

        Ok((
            Self {
                config,
                ctx,
                store,
                handle,
                tx,
            },
            rx,
        ))
    }

    /// 初始化：首次运行时写入示例数据
    ///
    /// 应在应用启动时调用
    pub async fn initialize(&self) -> CoreResult<()> {
        self.store.ensure_seeded(&self.config.org_id).await
    }

    pub fn org_id(&self) -> &str {
        &self.config.org_id
    }

    pub fn routes(&self) -> &RouteConfig {
        &self.config.editor.routes
    }

    pub fn capabilities(&self) -> CapabilitySet {
        self.config.capabilities()
    }

    // ========== 页面数据 ==========

    /// 后台加载团队列表
    pub fn load_teams(&self, org_id: &str) {
        let store = Arc::clone(&self.store);
        let tx = self.tx.clone();
        let org_id = org_id.to_string();
        self.handle.spawn(async move {
            let result = store.list(&org_id).await.map_err(|e| {
                log::error!("Failed to list teams of {org_id}: {e}");
                e.to_string()
            });
            send(&tx, BackendEvent::TeamsLoaded { org_id, result });
        });
    }

    /// 后台加载单个团队
    pub fn load_team(&self, key: RecordKey) {
        let store = Arc::clone(&self.store);
        let tx = self.tx.clone();
        self.handle.spawn(async move {
            let result = store.find(&key).await.map_err(|e| {
                log::error!("Failed to load {key}: {e}");
                e.to_string()
            });
            send(&tx, BackendEvent::TeamLoaded { key, result });
        });
    }

    /// 用团队数据挂载设置页
    pub fn mount(&self, team: &Team) -> CoreResult<TeamSettingsView> {
        TeamSettingsView::mount(
            Arc::clone(&self.ctx),
            team.key(),
            &team.snapshot(),
            self.capabilities(),
        )
    }

    // ========== 远程调用 ==========

    pub fn submit_save(&self, request: SaveRequest) {
        let api = Arc::clone(&self.ctx.api);
        let tx = self.tx.clone();
        self.handle.spawn(async move {
            let outcome = request.execute(api.as_ref()).await;
            send(&tx, BackendEvent::SaveResolved(outcome));
        });
    }

    pub fn submit_removal(&self, request: RemovalRequest) {
        let api = Arc::clone(&self.ctx.api);
        let tx = self.tx.clone();
        self.handle.spawn(async move {
            let outcome = request.execute(api.as_ref()).await;
            send(&tx, BackendEvent::RemovalResolved(outcome));
        });
    }
}
