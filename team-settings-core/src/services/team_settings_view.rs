//! 团队设置页面
//!
//! Binds the field schema, the save coordinator and the removal action to
//! one team and produces the render model.

use std::sync::Arc;

use crate::error::CoreResult;
use crate::services::{EditorContext, RecordModel, RemovalAction, SaveCoordinator};
use crate::types::{
    CapabilitySet, FieldValue, FieldView, RecordKey, RecordSnapshot, RemovalOutcome,
    RemovalPanel, RemovalRequest, RemovalState, SaveOutcome, SaveRequest, SaveState, Severity,
    ViewModel,
};

/// Team settings page for one mounted team
pub struct TeamSettingsView {
    ctx: Arc<EditorContext>,
    coordinator: SaveCoordinator,
    removal: RemovalAction,
    capabilities: CapabilitySet,
    location: String,
}

impl TeamSettingsView {
    /// Mount the page with the team's current server data.
    pub fn mount(
        ctx: Arc<EditorContext>,
        key: RecordKey,
        initial: &RecordSnapshot,
        capabilities: CapabilitySet,
    ) -> CoreResult<Self> {
        ctx.config.validate()?;
        let model = RecordModel::from_schema(key.clone(), &ctx.config.fields, initial)?;
        let epoch = model.epoch();
        let location = ctx.config.routes.record_address(&key);

        log::info!("Mounted team settings for {key}");
        Ok(Self {
            removal: RemovalAction::new(Arc::clone(&ctx), key, epoch),
            coordinator: SaveCoordinator::new(Arc::clone(&ctx), model),
            ctx,
            capabilities,
            location,
        })
    }

    /// Override the current location (defaults to the record address).
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn record_key(&self) -> &RecordKey {
        self.coordinator.model().record_key()
    }

    pub fn coordinator(&self) -> &SaveCoordinator {
        &self.coordinator
    }

    pub fn epoch(&self) -> u64 {
        self.coordinator.epoch()
    }

    pub fn is_loading(&self) -> bool {
        self.coordinator.is_loading()
    }

    /// The page went away; anything still in flight is ignored on return.
    pub fn unmount(&mut self) {
        self.coordinator.teardown();
        self.removal.teardown();
    }

    // ===== 字段 =====

    pub fn on_field_change(&mut self, id: &str, raw: FieldValue) -> CoreResult<SaveState> {
        self.coordinator.on_field_change(id, raw)
    }

    pub fn current_value(&self, id: &str) -> CoreResult<&FieldValue> {
        self.coordinator.current_value(id)
    }

    pub fn save_state(&self, id: &str) -> CoreResult<SaveState> {
        self.coordinator.save_state(id)
    }

    pub fn begin_blur(&mut self, id: &str) -> CoreResult<Option<SaveRequest>> {
        self.coordinator.begin_save(id)
    }

    pub fn begin_undo(&mut self, id: &str) -> CoreResult<Option<SaveRequest>> {
        self.coordinator.begin_undo(id)
    }

    pub fn apply_save_outcome(&mut self, outcome: SaveOutcome) -> CoreResult<Option<SaveRequest>> {
        self.coordinator.apply_outcome(outcome)
    }

    pub async fn on_field_blur(&mut self, id: &str) -> CoreResult<()> {
        self.coordinator.on_field_blur(id).await
    }

    pub async fn on_undo(&mut self, id: &str) -> CoreResult<()> {
        self.coordinator.on_undo(id).await
    }

    // ===== 移除 =====

    pub fn is_removal_offered(&self) -> bool {
        self.removal.is_offered(&self.capabilities)
    }

    pub fn removal_state(&self) -> RemovalState {
        self.removal.state()
    }

    pub fn trigger_removal(&mut self) -> bool {
        if self.is_loading() {
            return false;
        }
        self.removal.trigger(&self.capabilities)
    }

    pub fn cancel_removal(&mut self) -> bool {
        self.removal.cancel()
    }

    pub fn begin_removal(&mut self) -> CoreResult<RemovalRequest> {
        self.removal.begin_confirm()
    }

    pub fn apply_removal_outcome(&mut self, outcome: RemovalOutcome) -> bool {
        self.removal.apply_outcome(outcome, &self.location)
    }

    pub async fn confirm_removal(&mut self) -> CoreResult<bool> {
        self.removal.confirm(&self.location).await
    }

    // ===== 渲染 =====

    pub fn render(&self) -> ViewModel {
        let config = &self.ctx.config;
        let model = self.coordinator.model();

        let fields = config
            .fields
            .iter()
            .filter_map(|descriptor| {
                let field = model.field(&descriptor.id).ok()?;
                Some(FieldView {
                    id: descriptor.id.clone(),
                    label: descriptor.label.clone(),
                    kind: descriptor.kind,
                    help: descriptor.help.clone(),
                    placeholder: descriptor.placeholder.clone(),
                    value: field.pending_value().clone(),
                    state: field.save_state(),
                    can_undo: field.can_undo(),
                })
            })
            .collect();

        let removal = self.is_removal_offered().then(|| RemovalPanel {
            title: config.messages.removal_title.clone(),
            help: config.messages.removal_help.clone(),
            button_label: config.messages.removal_title.clone(),
            prompt: self.removal.prompt(),
            severity: Severity::Danger,
            state: self.removal.state(),
        });

        ViewModel {
            title: config.messages.title.clone(),
            loading: self.is_loading(),
            fields,
            removal,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::EditorConfig;
    use crate::error::CoreError;
    use crate::test_utils::{
        core_team_data, create_test_context, create_test_context_with, test_key, ApiCall,
        NavigationRequest,
    };
    use serde_json::json;

    fn admin() -> CapabilitySet {
        ["team:admin"].into_iter().collect()
    }

    #[test]
    fn render_lists_fields_in_schema_order() {
        let (ctx, _, _, _) = create_test_context();
        let view = TeamSettingsView::mount(ctx, test_key(), &core_team_data(), admin()).unwrap();

        let rendered = view.render();
        assert_eq!(rendered.title, "Team Settings");
        assert!(!rendered.loading);
        let ids: Vec<&str> = rendered.fields.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, ["slug", "name"]);
        assert_eq!(rendered.fields[0].label, "Name");
        assert_eq!(rendered.fields[0].value, json!("core-team"));
        assert_eq!(rendered.fields[1].label, "Display Name");
        assert!(rendered.fields.iter().all(|f| !f.can_undo));

        let panel = rendered.removal.unwrap();
        assert_eq!(panel.title, "Remove Team");
        assert_eq!(panel.severity, Severity::Danger);
        assert_eq!(panel.state, RemovalState::Idle);
    }

    #[test]
    fn removal_panel_hidden_without_permission() {
        let (ctx, _, _, _) = create_test_context();
        let mut view =
            TeamSettingsView::mount(ctx, test_key(), &core_team_data(), CapabilitySet::new())
                .unwrap();

        assert!(view.render().removal.is_none());
        assert!(!view.trigger_removal());
        assert_eq!(view.removal_state(), RemovalState::Idle);
    }

    #[test]
    fn mount_rejects_incomplete_key() {
        let (ctx, _, _, _) = create_test_context();
        let result =
            TeamSettingsView::mount(ctx, RecordKey::new("", "core-team"), &core_team_data(), admin());
        assert!(matches!(result, Err(CoreError::Configuration(_))));
    }

    #[test]
    fn mount_rejects_invalid_config() {
        let config = EditorConfig {
            fields: Vec::new(),
            ..EditorConfig::default()
        };
        let (ctx, _, _, _) = create_test_context_with(config);
        let result = TeamSettingsView::mount(ctx, test_key(), &core_team_data(), admin());
        assert!(matches!(result, Err(CoreError::Configuration(_))));
    }

    #[tokio::test]
    async fn renaming_the_slug_reloads_the_new_address() {
        let (ctx, api, _, navigator) = create_test_context();
        let mut view = TeamSettingsView::mount(ctx, test_key(), &core_team_data(), admin()).unwrap();

        view.on_field_change("slug", json!("core-team-2")).unwrap();
        view.on_field_blur("slug").await.unwrap();

        assert_eq!(api.calls().await.len(), 1);
        assert_eq!(view.current_value("slug").unwrap(), &json!("core-team-2"));
        assert!(navigator
            .requests()
            .contains(&NavigationRequest::Navigate(
                "/settings/acme/teams/core-team-2/settings/".to_string()
            )));

        let rendered = view.render();
        assert!(rendered.loading);
        assert!(rendered.fields[0].can_undo);
        // removal is suspended along with everything else
        assert!(!view.trigger_removal());
    }

    #[tokio::test]
    async fn render_tracks_save_state_and_undo() {
        let (ctx, _, _, _) = create_test_context();
        let mut view = TeamSettingsView::mount(ctx, test_key(), &core_team_data(), admin()).unwrap();

        view.on_field_change("name", json!("Platform")).unwrap();
        assert_eq!(view.render().fields[1].state, SaveState::Dirty);

        let request = view.begin_blur("name").unwrap().unwrap();
        let rendered = view.render();
        assert_eq!(rendered.fields[1].state, SaveState::Saving);
        assert!(!rendered.fields[1].can_undo);

        let api = Arc::clone(&view.ctx.api);
        let outcome = request.execute(api.as_ref()).await;
        assert_eq!(view.apply_save_outcome(outcome).unwrap(), None);

        let rendered = view.render();
        assert_eq!(rendered.fields[1].state, SaveState::Saved);
        assert_eq!(rendered.fields[1].value, json!("Platform"));
        assert!(rendered.fields[1].can_undo);

        view.on_undo("name").await.unwrap();
        let rendered = view.render();
        assert_eq!(rendered.fields[1].value, json!("Core"));
        assert!(!rendered.fields[1].can_undo);
    }

    #[tokio::test]
    async fn removal_returns_to_list_derived_from_location() {
        let (ctx, api, _, navigator) = create_test_context();
        let mut view = TeamSettingsView::mount(ctx, test_key(), &core_team_data(), admin())
            .unwrap()
            .with_location("/settings/acme/teams/core-team/settings/?tab=general");

        assert!(view.trigger_removal());
        assert_eq!(
            view.render().removal.map(|p| p.state),
            Some(RemovalState::AwaitingConfirmation)
        );
        assert!(view.confirm_removal().await.unwrap());

        assert_eq!(
            api.calls().await,
            vec![ApiCall::Remove {
                team_id: "core-team".to_string()
            }]
        );
        assert_eq!(
            navigator.requests(),
            vec![NavigationRequest::Navigate("/settings/acme/teams/".to_string())]
        );
    }

    #[tokio::test]
    async fn unmount_drops_late_outcomes() {
        let (ctx, _, notifier, navigator) = create_test_context();
        let mut view = TeamSettingsView::mount(ctx, test_key(), &core_team_data(), admin()).unwrap();

        view.on_field_change("slug", json!("renamed")).unwrap();
        let request = view.begin_blur("slug").unwrap().unwrap();
        view.unmount();

        let api = Arc::clone(&view.ctx.api);
        let outcome = request.execute(api.as_ref()).await;
        assert_eq!(view.apply_save_outcome(outcome).unwrap(), None);
        assert!(navigator.requests().is_empty());
        assert!(notifier.notices().is_empty());
    }
}
