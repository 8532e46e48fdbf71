//! 测试辅助模块
//!
//! 提供 mock 实现和便捷的测试工厂方法。

#![allow(clippy::unwrap_used)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;
use tokio::sync::RwLock;

use crate::config::EditorConfig;
use crate::error::ApiError;
use crate::services::{EditorContext, RecordModel, SaveCoordinator};
use crate::traits::{NavigationSink, NotificationSink, PersistenceApi};
use crate::types::{FieldChange, FieldValue, RecordKey, RecordSnapshot};

// ===== MockPersistenceApi =====

/// A call the editor made against the API
#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    Update {
        team_id: String,
        field_id: String,
        value: FieldValue,
    },
    Remove {
        team_id: String,
    },
}

pub struct MockPersistenceApi {
    record: RwLock<RecordSnapshot>,
    calls: RwLock<Vec<ApiCall>>,
    /// 字段 -> 要返回的错误
    failures: RwLock<HashMap<String, ApiError>>,
    /// 字段 -> 服务端规范化后的值
    normalized: RwLock<HashMap<String, FieldValue>>,
    removal_error: RwLock<Option<ApiError>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MockPersistenceApi {
    pub fn new(record: RecordSnapshot) -> Self {
        Self {
            record: RwLock::new(record),
            calls: RwLock::new(Vec::new()),
            failures: RwLock::new(HashMap::new()),
            normalized: RwLock::new(HashMap::new()),
            removal_error: RwLock::new(None),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    pub async fn fail_field(&self, field_id: &str, err: ApiError) {
        self.failures
            .write()
            .await
            .insert(field_id.to_string(), err);
    }

    pub async fn clear_failure(&self, field_id: &str) {
        self.failures.write().await.remove(field_id);
    }

    /// Store `value` instead of whatever is submitted for `field_id`.
    pub async fn normalize_field(&self, field_id: &str, value: FieldValue) {
        self.normalized
            .write()
            .await
            .insert(field_id.to_string(), value);
    }

    pub async fn fail_removal(&self, err: ApiError) {
        *self.removal_error.write().await = Some(err);
    }

    pub async fn calls(&self) -> Vec<ApiCall> {
        self.calls.read().await.clone()
    }

    /// Highest number of updates that were outstanding at the same time
    pub fn max_concurrent(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PersistenceApi for MockPersistenceApi {
    async fn update_field(
        &self,
        key: &RecordKey,
        field_id: &str,
        value: &FieldValue,
    ) -> Result<RecordSnapshot, ApiError> {
        self.calls.write().await.push(ApiCall::Update {
            team_id: key.team_id.clone(),
            field_id: field_id.to_string(),
            value: value.clone(),
        });

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        // let sibling requests start before this one resolves
        tokio::task::yield_now().await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if let Some(err) = self.failures.read().await.get(field_id) {
            return Err(err.clone());
        }

        let stored = self
            .normalized
            .read()
            .await
            .get(field_id)
            .cloned()
            .unwrap_or_else(|| value.clone());
        let mut record = self.record.write().await;
        record.insert(field_id.to_string(), stored);
        Ok(record.clone())
    }

    async fn remove_record(&self, key: &RecordKey) -> Result<(), ApiError> {
        self.calls.write().await.push(ApiCall::Remove {
            team_id: key.team_id.clone(),
        });
        match self.removal_error.read().await.clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

// ===== RecordingNotifier =====

#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    Error(String),
    Progress(String),
    Success(FieldChange),
}

#[derive(Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.notices()
            .into_iter()
            .filter_map(|n| match n {
                Notice::Error(message) => Some(message),
                _ => None,
            })
            .collect()
    }
}

impl NotificationSink for RecordingNotifier {
    fn notify_error(&self, message: &str) {
        self.notices
            .lock()
            .unwrap()
            .push(Notice::Error(message.to_string()));
    }

    fn notify_progress(&self, message: &str) {
        self.notices
            .lock()
            .unwrap()
            .push(Notice::Progress(message.to_string()));
    }

    fn notify_success(&self, change: &FieldChange) {
        self.notices
            .lock()
            .unwrap()
            .push(Notice::Success(change.clone()));
    }
}

// ===== RecordingNavigator =====

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationRequest {
    Navigate(String),
    Reload(String),
}

#[derive(Default)]
pub struct RecordingNavigator {
    requests: Mutex<Vec<NavigationRequest>>,
}

impl RecordingNavigator {
    pub fn requests(&self) -> Vec<NavigationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl NavigationSink for RecordingNavigator {
    fn navigate_to(&self, address: &str) {
        self.requests
            .lock()
            .unwrap()
            .push(NavigationRequest::Navigate(address.to_string()));
    }

    fn hard_reload(&self, address: &str) {
        self.requests
            .lock()
            .unwrap()
            .push(NavigationRequest::Reload(address.to_string()));
    }
}

// ===== 工厂方法 =====

pub fn test_key() -> RecordKey {
    RecordKey::new("acme", "core-team")
}

/// Server snapshot of the team used throughout the tests
pub fn core_team_data() -> RecordSnapshot {
    let mut data = serde_json::Map::new();
    data.insert("slug".to_string(), json!("core-team"));
    data.insert("name".to_string(), json!("Core"));
    data
}

pub fn create_test_context() -> (
    Arc<EditorContext>,
    Arc<MockPersistenceApi>,
    Arc<RecordingNotifier>,
    Arc<RecordingNavigator>,
) {
    create_test_context_with(EditorConfig::default())
}

pub fn create_test_context_with(
    config: EditorConfig,
) -> (
    Arc<EditorContext>,
    Arc<MockPersistenceApi>,
    Arc<RecordingNotifier>,
    Arc<RecordingNavigator>,
) {
    let api = Arc::new(MockPersistenceApi::new(core_team_data()));
    let notifier = Arc::new(RecordingNotifier::default());
    let navigator = Arc::new(RecordingNavigator::default());
    let ctx = Arc::new(EditorContext::new(
        api.clone(),
        notifier.clone(),
        navigator.clone(),
        Arc::new(config),
    ));
    (ctx, api, notifier, navigator)
}

pub fn create_test_coordinator() -> (
    SaveCoordinator,
    Arc<MockPersistenceApi>,
    Arc<RecordingNotifier>,
    Arc<RecordingNavigator>,
) {
    let (ctx, api, notifier, navigator) = create_test_context();
    let model = RecordModel::from_schema(test_key(), &ctx.config.fields, &core_team_data())
        .unwrap();
    (SaveCoordinator::new(ctx, model), api, notifier, navigator)
}
