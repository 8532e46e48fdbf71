//! 移除团队操作
//!
//! `Idle -> AwaitingConfirmation -> Executing -> Idle`. Cancelling returns
//! to `Idle` without touching the API.

use std::sync::Arc;

use crate::error::{CoreError, CoreResult};
use crate::services::EditorContext;
use crate::types::{CapabilitySet, RecordKey, RemovalOutcome, RemovalRequest, RemovalState};

/// Whether the removal affordance is shown at all.
#[must_use]
pub fn removal_offered(capabilities: &CapabilitySet, required_permission: &str) -> bool {
    capabilities.has(required_permission)
}

/// Destructive, confirmation-gated removal of the mounted record
pub struct RemovalAction {
    ctx: Arc<EditorContext>,
    key: RecordKey,
    epoch: u64,
    state: RemovalState,
    torn_down: bool,
}

impl RemovalAction {
    #[must_use]
    pub fn new(ctx: Arc<EditorContext>, key: RecordKey, epoch: u64) -> Self {
        Self {
            ctx,
            key,
            epoch,
            state: RemovalState::Idle,
            torn_down: false,
        }
    }

    pub fn state(&self) -> RemovalState {
        self.state
    }

    pub fn is_offered(&self, capabilities: &CapabilitySet) -> bool {
        removal_offered(capabilities, &self.ctx.config.required_permission)
    }

    /// Confirmation text naming the record
    pub fn prompt(&self) -> String {
        self.ctx.config.messages.removal_prompt_for(&self.key)
    }

    pub fn teardown(&mut self) {
        self.torn_down = true;
    }

    /// Ask for confirmation. Has no effect without the required permission.
    pub fn trigger(&mut self, capabilities: &CapabilitySet) -> bool {
        if !self.is_offered(capabilities) {
            log::warn!(
                "Removal of {} requested without '{}'",
                self.key,
                self.ctx.config.required_permission
            );
            return false;
        }
        if self.torn_down || self.state != RemovalState::Idle {
            return false;
        }
        self.state = RemovalState::AwaitingConfirmation;
        true
    }

    pub fn cancel(&mut self) -> bool {
        if self.state != RemovalState::AwaitingConfirmation {
            return false;
        }
        log::debug!("Removal of {} cancelled", self.key);
        self.state = RemovalState::Idle;
        true
    }

    /// The user confirmed; returns the request to run.
    pub fn begin_confirm(&mut self) -> CoreResult<RemovalRequest> {
        if self.state != RemovalState::AwaitingConfirmation {
            return Err(CoreError::InvalidTransition(format!(
                "cannot confirm removal of {} from {:?}",
                self.key, self.state
            )));
        }
        self.state = RemovalState::Executing;
        Ok(RemovalRequest {
            epoch: self.epoch,
            key: self.key.clone(),
        })
    }

    /// Apply a resolved removal. `location` is the page the user is on.
    ///
    /// Returns whether the record is gone.
    pub fn apply_outcome(&mut self, outcome: RemovalOutcome, location: &str) -> bool {
        if self.torn_down || outcome.epoch != self.epoch || self.state != RemovalState::Executing
        {
            log::debug!("Dropping stale removal outcome for {}", outcome.key);
            return false;
        }
        self.state = RemovalState::Idle;

        match outcome.result {
            Ok(()) => {
                let address = self.ctx.config.routes.list_address_from(location, &self.key);
                log::info!("Removed {}, returning to {address}", self.key);
                self.ctx.navigator.navigate_to(&address);
                true
            }
            Err(err) => {
                self.ctx.report_api_error(
                    &format!("Failed to remove {}", self.key),
                    &err,
                    &self.ctx.config.messages.removal_failed,
                );
                false
            }
        }
    }

    /// Confirm and wait for the removal to resolve.
    pub async fn confirm(&mut self, location: &str) -> CoreResult<bool> {
        let request = self.begin_confirm()?;
        let api = Arc::clone(&self.ctx.api);
        let outcome = request.execute(api.as_ref()).await;
        Ok(self.apply_outcome(outcome, location))
    }
}
