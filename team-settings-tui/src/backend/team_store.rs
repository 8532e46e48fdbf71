//! 团队仓库
//!
//! 使用 JSON 文件存储团队数据，扮演远程 API 的角色：
//! 实现 team-settings-core 的 PersistenceApi trait，并做服务端校验。

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use team_settings_core::traits::PersistenceApi;
use team_settings_core::types::{FieldValue, RecordKey, RecordSnapshot};
use team_settings_core::{ApiError, CoreError, CoreResult};
use thiserror::Error;
use tokio::fs;
use tokio::sync::Mutex;

const TEAMS_FILE: &str = "teams.json";
const NAME_MAX_LENGTH: usize = 64;
const SLUG_MAX_LENGTH: usize = 50;
const SLUG_PATTERN: &str = "^[a-z0-9_-]+$";

/// 持久化的团队
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: String,
    pub org_id: String,
    pub slug: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Team {
    pub fn new(org_id: &str, slug: &str, name: &str) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            org_id: org_id.to_string(),
            slug: slug.to_string(),
            name: name.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn key(&self) -> RecordKey {
        RecordKey::new(&self.org_id, &self.slug)
    }

    /// 编辑器可见的字段
    pub fn snapshot(&self) -> RecordSnapshot {
        let mut data = serde_json::Map::new();
        data.insert("slug".to_string(), Value::String(self.slug.clone()));
        data.insert("name".to_string(), Value::String(self.name.clone()));
        data
    }

    fn matches(&self, key: &RecordKey) -> bool {
        self.org_id == key.org_id && self.slug == key.team_id
    }
}

/// 仓库内部错误
#[derive(Debug, Error)]
enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed team file: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self::Server {
            detail: err.to_string(),
        }
    }
}

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Io { .. } => Self::StorageError(err.to_string()),
            StoreError::Json(e) => Self::SerializationError(e.to_string()),
        }
    }
}

/// 基于 JSON 文件的团队仓库
pub struct JsonTeamStore {
    path: PathBuf,
    /// 内存缓存（None 表示尚未从文件加载）
    cache: Mutex<Option<Vec<Team>>>,
    slug_pattern: Regex,
}

impl JsonTeamStore {
    pub fn new(data_dir: &Path) -> CoreResult<Self> {
        let slug_pattern =
            Regex::new(SLUG_PATTERN).map_err(|e| CoreError::Configuration(e.to_string()))?;
        Ok(Self {
            path: data_dir.join(TEAMS_FILE),
            cache: Mutex::new(None),
            slug_pattern,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 从文件加载团队列表
    async fn load_from_file(&self) -> Result<Vec<Team>, StoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.path)
            .await
            .map_err(|source| StoreError::Io {
                path: self.path.clone(),
                source,
            })?;
        Ok(serde_json::from_str(&content)?)
    }

    /// 保存团队列表到文件
    async fn save_to_file(&self, teams: &[Team]) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .await
                .map_err(|source| StoreError::Io {
                    path: dir.to_path_buf(),
                    source,
                })?;
        }

        let content = serde_json::to_string_pretty(teams)?;
        fs::write(&self.path, content)
            .await
            .map_err(|source| StoreError::Io {
                path: self.path.clone(),
                source,
            })
    }

    /// Run `f` against the loaded teams while holding the lock.
    async fn with_teams<T>(
        &self,
        f: impl FnOnce(&mut Vec<Team>) -> T,
    ) -> Result<T, StoreError> {
        let mut cache = self.cache.lock().await;
        if cache.is_none() {
            *cache = Some(self.load_from_file().await?);
        }
        let teams = cache.get_or_insert_with(Vec::new);
        Ok(f(teams))
    }

    /// 首次运行时写入示例团队
    pub async fn ensure_seeded(&self, org_id: &str) -> CoreResult<()> {
        let mut cache = self.cache.lock().await;
        let mut teams = match cache.take() {
            Some(teams) => teams,
            None => self.load_from_file().await?,
        };

        if !teams.iter().any(|t| t.org_id == org_id) {
            log::info!("Seeding sample team for {org_id} in {}", self.path.display());
            teams.push(Team::new(org_id, "core-team", "Core"));
            self.save_to_file(&teams).await?;
        }
        *cache = Some(teams);
        Ok(())
    }

    /// 列出组织下的团队（按 slug 排序）
    pub async fn list(&self, org_id: &str) -> CoreResult<Vec<Team>> {
        let mut teams = self
            .with_teams(|teams| {
                teams
                    .iter()
                    .filter(|t| t.org_id == org_id)
                    .cloned()
                    .collect::<Vec<_>>()
            })
            .await?;
        teams.sort_by(|a, b| a.slug.cmp(&b.slug));
        Ok(teams)
    }

    pub async fn find(&self, key: &RecordKey) -> CoreResult<Option<Team>> {
        Ok(self
            .with_teams(|teams| teams.iter().find(|t| t.matches(key)).cloned())
            .await?)
    }

    /// 服务端校验，返回规范化后的值
    fn validate(
        &self,
        teams: &[Team],
        key: &RecordKey,
        field_id: &str,
        value: &FieldValue,
    ) -> Result<String, ApiError> {
        let invalid = |message: &str| ApiError::Validation {
            field: field_id.to_string(),
            message: message.to_string(),
        };

        let Some(text) = value.as_str() else {
            return Err(invalid("Expected a string."));
        };

        match field_id {
            "name" => {
                let name = text.trim();
                if name.is_empty() {
                    return Err(invalid("This field may not be blank."));
                }
                if name.chars().count() > NAME_MAX_LENGTH {
                    return Err(invalid(&format!(
                        "Ensure this field has no more than {NAME_MAX_LENGTH} characters."
                    )));
                }
                Ok(name.to_string())
            }
            "slug" => {
                if text.is_empty() {
                    return Err(invalid("This field may not be blank."));
                }
                if text.len() > SLUG_MAX_LENGTH {
                    return Err(invalid(&format!(
                        "Ensure this field has no more than {SLUG_MAX_LENGTH} characters."
                    )));
                }
                if !self.slug_pattern.is_match(text) {
                    return Err(invalid(
                        "Enter a valid slug consisting of lowercase letters, numbers, underscores or hyphens.",
                    ));
                }
                let taken = teams
                    .iter()
                    .any(|t| t.org_id == key.org_id && t.slug == text && t.slug != key.team_id);
                if taken {
                    return Err(ApiError::Conflict {
                        field: field_id.to_string(),
                        message: "A team with this slug already exists.".to_string(),
                    });
                }
                Ok(text.to_string())
            }
            _ => Err(invalid("Unknown field.")),
        }
    }

    fn apply_update(
        &self,
        teams: &mut [Team],
        key: &RecordKey,
        field_id: &str,
        value: &FieldValue,
    ) -> Result<RecordSnapshot, ApiError> {
        let normalized = self.validate(teams, key, field_id, value)?;
        let team = teams
            .iter_mut()
            .find(|t| t.matches(key))
            .ok_or_else(|| ApiError::NotFound {
                detail: key.to_string(),
            })?;
        match field_id {
            "slug" => team.slug = normalized,
            _ => team.name = normalized,
        }
        team.updated_at = Utc::now();
        Ok(team.snapshot())
    }
}

#[async_trait]
impl PersistenceApi for JsonTeamStore {
    async fn update_field(
        &self,
        key: &RecordKey,
        field_id: &str,
        value: &FieldValue,
    ) -> Result<RecordSnapshot, ApiError> {
        let mut cache = self.cache.lock().await;
        let mut teams = match cache.take() {
            Some(teams) => teams,
            None => self.load_from_file().await?,
        };

        let result = self.apply_update(&mut teams, key, field_id, value);

        if result.is_ok() {
            if let Err(e) = self.save_to_file(&teams).await {
                // 磁盘写入失败时丢弃缓存，下次重新从文件加载
                log::error!("Failed to persist teams: {e}");
                return Err(e.into());
            }
        }
        *cache = Some(teams);
        result
    }

    async fn remove_record(&self, key: &RecordKey) -> Result<(), ApiError> {
        let mut cache = self.cache.lock().await;
        let mut teams = match cache.take() {
            Some(teams) => teams,
            None => self.load_from_file().await?,
        };

        let before = teams.len();
        teams.retain(|t| !t.matches(key));
        if teams.len() == before {
            *cache = Some(teams);
            return Err(ApiError::NotFound {
                detail: key.to_string(),
            });
        }

        self.save_to_file(&teams).await?;
        *cache = Some(teams);
        Ok(())
    }
}
