//! 保存协调器
//!
//! Save-on-blur protocol for one record:
//!
//! 1. blur with `pending == committed` is a no-op
//! 2. otherwise the field goes `Saving` and a `SaveRequest` is issued
//! 3. success commits (server value wins), identity fields re-address the page
//! 4. failure reverts, notifies, never retries
//! 5. undo restores the previous value and saves it like any other change
//!
//! At most one request per field is outstanding. An edit made while a field
//! is `Saving` is held back and submitted once the in-flight request resolves.

use std::sync::Arc;

use chrono::Utc;

use crate::error::CoreResult;
use crate::services::{EditorContext, RecordModel};
use crate::types::{
    FieldChange, FieldValue, InFlight, SaveOrigin, SaveOutcome, SaveRequest, SaveState,
};

/// Drives per-field persistence for one mounted record
pub struct SaveCoordinator {
    ctx: Arc<EditorContext>,
    model: RecordModel,
    /// Suspended until a requested navigation completes
    loading: bool,
    torn_down: bool,
}

impl SaveCoordinator {
    /// Take ownership of a freshly initialized record
    #[must_use]
    pub fn new(ctx: Arc<EditorContext>, model: RecordModel) -> Self {
        Self {
            ctx,
            model,
            loading: false,
            torn_down: false,
        }
    }

    /// Read-only view of the record
    pub fn model(&self) -> &RecordModel {
        &self.model
    }

    pub fn epoch(&self) -> u64 {
        self.model.epoch()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Owning view went away; late outcomes become no-ops.
    pub fn teardown(&mut self) {
        if !self.torn_down {
            log::debug!("Record {} torn down", self.model.record_key());
        }
        self.torn_down = true;
    }

    fn accepts_input(&self) -> bool {
        !self.loading && !self.torn_down
    }

    fn is_identity(&self, id: &str) -> bool {
        self.ctx.config.field(id).is_some_and(|f| f.identity)
    }

    // ===== 查询 =====

    pub fn current_value(&self, id: &str) -> CoreResult<&FieldValue> {
        self.model.get_value(id)
    }

    pub fn save_state(&self, id: &str) -> CoreResult<SaveState> {
        self.model.field(id).map(|f| f.save_state())
    }

    // ===== 输入事件 =====

    /// Raw input from the view; normalised by the field's transform.
    pub fn on_field_change(&mut self, id: &str, raw: FieldValue) -> CoreResult<SaveState> {
        let state = self.save_state(id)?;
        if !self.accepts_input() {
            return Ok(state);
        }

        let value = match self.ctx.config.field(id) {
            Some(descriptor) => descriptor.transform.apply(raw),
            None => raw,
        };
        self.model.set_pending_value(id, value)
    }

    /// Blur: issue a save if the field has an unsaved edit.
    pub fn begin_save(&mut self, id: &str) -> CoreResult<Option<SaveRequest>> {
        let field = self.model.field(id)?;
        if !self.accepts_input() {
            return Ok(None);
        }
        // an edit made while saving was already flagged by set_pending_value
        if field.save_state().is_saving() || !field.is_modified() {
            return Ok(None);
        }

        let value = field.pending_value().clone();
        self.issue(id, value, SaveOrigin::Edit, None).map(Some)
    }

    /// Undo the last successful change and persist the restored value.
    pub fn begin_undo(&mut self, id: &str) -> CoreResult<Option<SaveRequest>> {
        self.model.field(id)?;
        if !self.accepts_input() {
            return Ok(None);
        }
        let Some(applied) = self.model.undo(id)? else {
            log::debug!("Nothing to undo for '{id}'");
            return Ok(None);
        };

        log::info!(
            "Undoing '{id}' on {}: {} -> {}",
            self.model.record_key(),
            applied.replaced,
            applied.restored
        );
        self.issue(id, applied.restored, SaveOrigin::Undo, Some(applied.replaced))
            .map(Some)
    }

    fn issue(
        &mut self,
        id: &str,
        value: FieldValue,
        origin: SaveOrigin,
        rollback: Option<FieldValue>,
    ) -> CoreResult<SaveRequest> {
        self.model.mark_saving(
            id,
            InFlight {
                value: value.clone(),
                origin,
                rollback,
            },
        )?;
        Ok(SaveRequest {
            epoch: self.model.epoch(),
            key: self.model.record_key().clone(),
            field_id: id.to_string(),
            value,
            origin,
        })
    }

    // ===== 结果处理 =====

    /// Apply a resolved request.
    ///
    /// Returns the follow-up request when an edit was queued behind the one
    /// that just resolved.
    pub fn apply_outcome(&mut self, outcome: SaveOutcome) -> CoreResult<Option<SaveRequest>> {
        if self.torn_down || outcome.epoch != self.model.epoch() {
            log::debug!(
                "Dropping stale outcome for '{}' (epoch {}, current {})",
                outcome.field_id,
                outcome.epoch,
                self.model.epoch()
            );
            return Ok(None);
        }

        let id = outcome.field_id.as_str();
        let field = self.model.field(id)?;
        let Some(in_flight) = field.in_flight().cloned() else {
            log::warn!("Outcome for '{id}' arrived without an outstanding request");
            return Ok(None);
        };
        let queued = field
            .has_queued_edit()
            .then(|| field.pending_value().clone());
        let previous = match (&in_flight.origin, &in_flight.rollback) {
            (SaveOrigin::Undo, Some(replaced)) => replaced.clone(),
            _ => field.committed_value().clone(),
        };

        match outcome.result {
            Ok(snapshot) => {
                let value = snapshot.get(id).cloned().unwrap_or(outcome.value);
                match in_flight.origin {
                    SaveOrigin::Edit => self.model.commit(id, value.clone())?,
                    SaveOrigin::Undo => self.model.commit_restored(id, value.clone())?,
                }
                log::info!(
                    "Saved '{id}' on {}: {previous} -> {value}",
                    self.model.record_key()
                );

                self.ctx.notifier.notify_success(&FieldChange {
                    field_id: id.to_string(),
                    old: previous.clone(),
                    new: value.clone(),
                    origin: in_flight.origin,
                    changed_at: Utc::now(),
                });

                if self.is_identity(id) && value != previous {
                    self.enter_identity_change(id, &value);
                    return Ok(None);
                }

                if let Some(next) = queued {
                    self.model.set_pending_value(id, next)?;
                    return self.begin_save(id);
                }
                Ok(None)
            }
            Err(err) => {
                match (in_flight.origin, in_flight.rollback) {
                    (SaveOrigin::Undo, Some(server_value)) => {
                        self.model.rollback_undo(id, server_value, in_flight.value)?;
                    }
                    _ => self.model.revert(id)?,
                }
                self.ctx.report_api_error(
                    &format!("Failed to save '{id}' on {}", self.model.record_key()),
                    &err,
                    &self.ctx.config.messages.save_failed,
                );

                // The failed value is gone, but a newer edit still gets its turn.
                if let Some(next) = queued {
                    self.model.set_pending_value(id, next)?;
                    return self.begin_save(id);
                }
                Ok(None)
            }
        }
    }

    /// The record's address changed: tell the user, navigate, stop accepting input.
    fn enter_identity_change(&mut self, id: &str, value: &FieldValue) {
        let Some(team_id) = value.as_str() else {
            log::error!("Identity field '{id}' committed a non-string value: {value}");
            return;
        };

        let new_key = self.model.record_key().with_team_id(team_id);
        let address = self.ctx.config.routes.record_address(&new_key);
        log::info!(
            "Record {} re-addressed to {new_key}, navigating to {address}",
            self.model.record_key()
        );

        self.ctx
            .notifier
            .notify_progress(&self.ctx.config.messages.identity_changed);
        self.ctx.navigator.navigate_to(&address);
        if self.ctx.config.hard_reload_on_identity_change {
            self.ctx.navigator.hard_reload(&address);
        }
        self.loading = true;
    }

    // ===== 异步驱动 =====

    /// Blur and wait until the field (and any queued edit) settles.
    pub async fn on_field_blur(&mut self, id: &str) -> CoreResult<()> {
        let request = self.begin_save(id)?;
        self.drive(request).await
    }

    /// Undo and wait for the restored value to be saved.
    pub async fn on_undo(&mut self, id: &str) -> CoreResult<()> {
        let request = self.begin_undo(id)?;
        self.drive(request).await
    }

    async fn drive(&mut self, mut next: Option<SaveRequest>) -> CoreResult<()> {
        while let Some(request) = next {
            let api = Arc::clone(&self.ctx.api);
            let outcome = request.execute(api.as_ref()).await;
            next = self.apply_outcome(outcome)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::{ApiError, CoreError};
    use crate::test_utils::{create_test_coordinator, ApiCall, NavigationRequest, Notice};
    use futures::future::join;
    use serde_json::json;

    fn validation(field: &str) -> ApiError {
        ApiError::Validation {
            field: field.to_string(),
            message: "This field may not be blank.".to_string(),
        }
    }

    #[tokio::test]
    async fn successful_save_commits_and_reports_change() {
        let (mut coordinator, api, notifier, navigator) = create_test_coordinator();

        coordinator.on_field_change("name", json!("Platform")).unwrap();
        assert_eq!(coordinator.save_state("name").unwrap(), SaveState::Dirty);

        coordinator.on_field_blur("name").await.unwrap();

        let field = coordinator.model().field("name").unwrap();
        assert_eq!(field.committed_value(), &json!("Platform"));
        assert_eq!(field.pending_value(), &json!("Platform"));
        assert_eq!(field.save_state(), SaveState::Saved);

        assert_eq!(
            api.calls().await,
            vec![ApiCall::Update {
                team_id: "core-team".to_string(),
                field_id: "name".to_string(),
                value: json!("Platform"),
            }]
        );
        let notices = notifier.notices();
        assert!(matches!(
            notices.as_slice(),
            [Notice::Success(change)] if change.old == json!("Core") && change.new == json!("Platform")
        ));
        assert!(navigator.requests().is_empty());
        assert!(!coordinator.is_loading());
    }

    #[tokio::test]
    async fn blur_without_change_is_a_noop() {
        let (mut coordinator, api, notifier, _) = create_test_coordinator();

        coordinator.on_field_blur("name").await.unwrap();
        coordinator.on_field_change("name", json!("Core")).unwrap();
        coordinator.on_field_blur("name").await.unwrap();

        assert!(api.calls().await.is_empty());
        assert!(notifier.notices().is_empty());
        assert_eq!(coordinator.save_state("name").unwrap(), SaveState::Clean);
    }

    #[tokio::test]
    async fn failed_save_reverts_and_notifies_without_navigation() {
        let (mut coordinator, api, notifier, navigator) = create_test_coordinator();
        api.fail_field("name", validation("name")).await;

        coordinator.on_field_change("name", json!("")).unwrap();
        coordinator.on_field_blur("name").await.unwrap();

        let field = coordinator.model().field("name").unwrap();
        assert_eq!(field.pending_value(), &json!("Core"));
        assert_eq!(field.committed_value(), &json!("Core"));
        assert_eq!(field.save_state(), SaveState::Errored);
        assert!(!field.can_undo());

        assert_eq!(
            notifier.notices(),
            vec![Notice::Error("Unable to save change".to_string())]
        );
        assert!(navigator.requests().is_empty());
        assert_eq!(api.calls().await.len(), 1);
    }

    #[tokio::test]
    async fn failed_save_is_not_retried() {
        let (mut coordinator, api, _, _) = create_test_coordinator();
        api.fail_field("name", validation("name")).await;

        coordinator.on_field_change("name", json!("")).unwrap();
        coordinator.on_field_blur("name").await.unwrap();
        coordinator.on_field_blur("name").await.unwrap();

        assert_eq!(api.calls().await.len(), 1);
    }

    #[tokio::test]
    async fn slug_change_navigates_to_new_address_and_suspends() {
        let (mut coordinator, api, notifier, navigator) = create_test_coordinator();

        coordinator
            .on_field_change("slug", json!("core-team-2"))
            .unwrap();
        coordinator.on_field_blur("slug").await.unwrap();

        assert_eq!(
            api.calls().await,
            vec![ApiCall::Update {
                team_id: "core-team".to_string(),
                field_id: "slug".to_string(),
                value: json!("core-team-2"),
            }]
        );
        assert_eq!(
            coordinator.current_value("slug").unwrap(),
            &json!("core-team-2")
        );
        assert_eq!(
            coordinator.model().field("slug").unwrap().committed_value(),
            &json!("core-team-2")
        );

        let address = "/settings/acme/teams/core-team-2/settings/".to_string();
        assert_eq!(
            navigator.requests(),
            vec![
                NavigationRequest::Navigate(address.clone()),
                NavigationRequest::Reload(address),
            ]
        );
        assert!(notifier
            .notices()
            .contains(&Notice::Progress("Slug changed, refreshing page...".to_string())));
        assert!(coordinator.is_loading());

        // suspended: further edits are ignored
        coordinator.on_field_change("name", json!("Other")).unwrap();
        assert_eq!(coordinator.current_value("name").unwrap(), &json!("Core"));
    }

    #[tokio::test]
    async fn slug_is_slugified_on_input() {
        let (mut coordinator, _, _, _) = create_test_coordinator();
        coordinator
            .on_field_change("slug", json!("Core Team 2"))
            .unwrap();
        assert_eq!(
            coordinator.current_value("slug").unwrap(),
            &json!("core-team-2")
        );
    }

    #[tokio::test]
    async fn failed_slug_change_never_navigates() {
        let (mut coordinator, api, _, navigator) = create_test_coordinator();
        api.fail_field(
            "slug",
            ApiError::Conflict {
                field: "slug".to_string(),
                message: "A team with this slug already exists.".to_string(),
            },
        )
        .await;

        coordinator.on_field_change("slug", json!("taken")).unwrap();
        coordinator.on_field_blur("slug").await.unwrap();

        assert!(navigator.requests().is_empty());
        assert!(!coordinator.is_loading());
        assert_eq!(coordinator.current_value("slug").unwrap(), &json!("core-team"));
    }

    #[tokio::test]
    async fn server_normalised_value_is_committed() {
        let (mut coordinator, api, _, _) = create_test_coordinator();
        api.normalize_field("name", json!("Platform Team")).await;

        coordinator
            .on_field_change("name", json!("  Platform Team "))
            .unwrap();
        coordinator.on_field_blur("name").await.unwrap();

        assert_eq!(
            coordinator.current_value("name").unwrap(),
            &json!("Platform Team")
        );
    }

    #[tokio::test]
    async fn undo_resaves_previous_value_once() {
        let (mut coordinator, api, notifier, _) = create_test_coordinator();

        coordinator.on_field_change("name", json!("Platform")).unwrap();
        coordinator.on_field_blur("name").await.unwrap();
        assert!(coordinator.model().field("name").unwrap().can_undo());

        coordinator.on_undo("name").await.unwrap();

        let field = coordinator.model().field("name").unwrap();
        assert_eq!(field.committed_value(), &json!("Core"));
        assert_eq!(field.pending_value(), &json!("Core"));
        assert_eq!(field.save_state(), SaveState::Saved);
        assert!(!field.can_undo());

        let after_first = field.clone();
        coordinator.on_undo("name").await.unwrap();
        assert_eq!(coordinator.model().field("name").unwrap(), &after_first);

        let calls = api.calls().await;
        assert_eq!(calls.len(), 2);
        assert!(matches!(
            &calls[1],
            ApiCall::Update { value, .. } if *value == json!("Core")
        ));
        assert!(notifier.notices().iter().any(|n| matches!(
            n,
            Notice::Success(change) if change.origin == SaveOrigin::Undo && change.old == json!("Platform")
        )));
    }

    #[tokio::test]
    async fn failed_undo_restores_server_value_and_rearms_undo() {
        let (mut coordinator, api, notifier, _) = create_test_coordinator();

        coordinator.on_field_change("name", json!("Platform")).unwrap();
        coordinator.on_field_blur("name").await.unwrap();

        api.fail_field(
            "name",
            ApiError::Network {
                detail: "connection reset".to_string(),
            },
        )
        .await;
        coordinator.on_undo("name").await.unwrap();

        let field = coordinator.model().field("name").unwrap();
        assert_eq!(field.committed_value(), &json!("Platform"));
        assert_eq!(field.pending_value(), &json!("Platform"));
        assert_eq!(field.save_state(), SaveState::Errored);
        assert_eq!(field.previous_committed_value(), Some(&json!("Core")));
        assert!(notifier
            .notices()
            .contains(&Notice::Error("Unable to save change".to_string())));
    }

    #[tokio::test]
    async fn undoing_display_name_never_navigates() {
        let (mut coordinator, _, _, navigator) = create_test_coordinator();
        coordinator.on_field_change("name", json!("Platform")).unwrap();
        coordinator.on_field_blur("name").await.unwrap();
        assert!(navigator.requests().is_empty());

        // renaming then undoing the display name never re-addresses
        coordinator.on_undo("name").await.unwrap();
        assert!(navigator.requests().is_empty());
        assert!(!coordinator.is_loading());
    }

    #[tokio::test]
    async fn different_fields_save_concurrently() {
        let (mut coordinator, _, _, _) = create_test_coordinator();

        coordinator.on_field_change("name", json!("Platform")).unwrap();
        coordinator
            .on_field_change("slug", json!("platform"))
            .unwrap();

        let name = coordinator.begin_save("name").unwrap();
        let slug = coordinator.begin_save("slug").unwrap();
        assert!(name.is_some());
        assert!(slug.is_some());
        assert_eq!(coordinator.save_state("name").unwrap(), SaveState::Saving);
        assert_eq!(coordinator.save_state("slug").unwrap(), SaveState::Saving);

        // a second blur on a saving field never issues another request
        assert_eq!(coordinator.begin_save("name").unwrap(), None);
    }

    #[tokio::test]
    async fn saves_of_different_fields_overlap_remotely() {
        let (mut coordinator, api, _, _) = create_test_coordinator();

        coordinator.on_field_change("name", json!("Platform")).unwrap();
        coordinator.on_field_change("slug", json!("platform")).unwrap();
        let name = coordinator.begin_save("name").unwrap().unwrap();
        let slug = coordinator.begin_save("slug").unwrap().unwrap();

        let (name, slug) = join(name.execute(api.as_ref()), slug.execute(api.as_ref())).await;
        assert_eq!(api.max_concurrent(), 2);

        assert_eq!(coordinator.apply_outcome(name).unwrap(), None);
        assert_eq!(coordinator.apply_outcome(slug).unwrap(), None);
        assert_eq!(coordinator.save_state("name").unwrap(), SaveState::Saved);
        assert_eq!(coordinator.current_value("slug").unwrap(), &json!("platform"));
    }

    #[tokio::test]
    async fn queued_edit_supersedes_after_in_flight_resolves() {
        let (mut coordinator, api, _, _) = create_test_coordinator();

        coordinator.on_field_change("name", json!("A")).unwrap();
        let first = coordinator.begin_save("name").unwrap().unwrap();

        coordinator.on_field_change("name", json!("B")).unwrap();
        assert_eq!(coordinator.save_state("name").unwrap(), SaveState::Saving);
        assert_eq!(coordinator.begin_save("name").unwrap(), None);

        let outcome = first.execute(api.as_ref()).await;
        let second = coordinator.apply_outcome(outcome).unwrap().unwrap();
        assert_eq!(second.value, json!("B"));
        assert_eq!(coordinator.save_state("name").unwrap(), SaveState::Saving);
        assert_eq!(
            coordinator.model().field("name").unwrap().committed_value(),
            &json!("A")
        );

        let outcome = second.execute(api.as_ref()).await;
        assert_eq!(coordinator.apply_outcome(outcome).unwrap(), None);
        assert_eq!(coordinator.current_value("name").unwrap(), &json!("B"));
        assert_eq!(coordinator.save_state("name").unwrap(), SaveState::Saved);

        let values: Vec<FieldValue> = api
            .calls()
            .await
            .into_iter()
            .filter_map(|call| match call {
                ApiCall::Update { value, .. } => Some(value),
                ApiCall::Remove { .. } => None,
            })
            .collect();
        assert_eq!(values, vec![json!("A"), json!("B")]);
    }

    #[tokio::test]
    async fn queued_edit_is_sent_after_in_flight_failure() {
        let (mut coordinator, api, notifier, _) = create_test_coordinator();
        api.fail_field("name", validation("name")).await;

        coordinator.on_field_change("name", json!("")).unwrap();
        let first = coordinator.begin_save("name").unwrap().unwrap();
        coordinator.on_field_change("name", json!("Platform")).unwrap();

        let outcome = first.execute(api.as_ref()).await;
        api.clear_failure("name").await;
        let second = coordinator.apply_outcome(outcome).unwrap().unwrap();
        assert_eq!(second.value, json!("Platform"));
        assert_eq!(coordinator.save_state("name").unwrap(), SaveState::Saving);
        assert_eq!(
            notifier.errors(),
            vec!["Unable to save change".to_string()]
        );

        let outcome = second.execute(api.as_ref()).await;
        assert_eq!(coordinator.apply_outcome(outcome).unwrap(), None);
        let field = coordinator.model().field("name").unwrap();
        assert_eq!(field.committed_value(), &json!("Platform"));
        assert_eq!(field.save_state(), SaveState::Saved);
        assert_eq!(api.calls().await.len(), 2);
    }

    #[tokio::test]
    async fn outcome_after_teardown_is_ignored() {
        let (mut coordinator, api, notifier, _) = create_test_coordinator();

        coordinator.on_field_change("name", json!("Platform")).unwrap();
        let request = coordinator.begin_save("name").unwrap().unwrap();
        coordinator.teardown();

        let outcome = request.execute(api.as_ref()).await;
        assert_eq!(coordinator.apply_outcome(outcome).unwrap(), None);
        assert_eq!(coordinator.save_state("name").unwrap(), SaveState::Saving);
        assert!(notifier.notices().is_empty());
    }

    #[tokio::test]
    async fn outcome_from_another_mount_is_ignored() {
        let (mut coordinator, _, _, _) = create_test_coordinator();
        coordinator.on_field_change("name", json!("Platform")).unwrap();
        coordinator.begin_save("name").unwrap();

        let stale = SaveOutcome {
            epoch: coordinator.epoch() + 1_000,
            field_id: "name".to_string(),
            value: json!("Platform"),
            origin: SaveOrigin::Edit,
            result: Err(ApiError::Server {
                detail: "boom".to_string(),
            }),
        };
        assert_eq!(coordinator.apply_outcome(stale).unwrap(), None);
        assert_eq!(coordinator.save_state("name").unwrap(), SaveState::Saving);
    }

    #[tokio::test]
    async fn unknown_field_fails_loudly() {
        let (mut coordinator, _, _, _) = create_test_coordinator();
        assert!(matches!(
            coordinator.on_field_change("color", json!("red")),
            Err(CoreError::FieldNotFound(_))
        ));
        assert!(matches!(
            coordinator.on_field_blur("color").await,
            Err(CoreError::FieldNotFound(_))
        ));
        assert!(matches!(
            coordinator.on_undo("color").await,
            Err(CoreError::FieldNotFound(_))
        ));
    }
}
