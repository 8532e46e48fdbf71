//! 配置服务
//!
//! 读取 `<config_dir>/team-settings/config.json`，文件不存在时使用默认配置。
//! 编辑器配置可以内联在 `editor` 中，也可以通过 `editorFile` 指向单独的文件
//! （相对路径基于配置文件所在目录）。

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use team_settings_core::types::CapabilitySet;
use team_settings_core::EditorConfig;

use crate::view::theme::Theme;

const APP_DIR: &str = "team-settings";

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    /// 要管理的组织
    pub org_id: String,
    /// 当前用户持有的权限
    pub access: Vec<String>,
    /// 团队数据目录，缺省为系统数据目录
    pub data_dir: Option<PathBuf>,
    pub theme: Theme,
    pub editor: EditorConfig,
    /// 单独的编辑器配置文件，设置后覆盖 `editor`
    pub editor_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            org_id: "acme".to_string(),
            access: vec!["team:admin".to_string(), "team:write".to_string()],
            data_dir: None,
            theme: Theme::Dark,
            editor: EditorConfig::default(),
            editor_file: None,
        }
    }
}

impl AppConfig {
    /// 默认配置文件路径
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
            .join("config.json")
    }

    /// 加载配置（文件不存在时返回默认值）
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let mut config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse {}", path.display()))?;

        match &config.editor_file {
            Some(file) => {
                let file = path.parent().map_or_else(|| file.clone(), |dir| dir.join(file));
                config.editor = EditorConfig::load(&file)
                    .with_context(|| format!("failed to load editor config {}", file.display()))?;
            }
            None => config.editor.validate()?,
        }
        Ok(config)
    }

    /// 团队数据目录
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(APP_DIR)
        })
    }

    /// 日志目录
    pub fn log_dir(&self) -> PathBuf {
        self.data_dir().join("logs")
    }

    pub fn capabilities(&self) -> CapabilitySet {
        self.access.iter().cloned().collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config.org_id, "acme");
        assert!(config.capabilities().has("team:admin"));
    }

    #[test]
    fn partial_file_keeps_editor_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"orgId": "initech", "access": ["team:write"]}}"#).unwrap();

        let config = AppConfig::load_from(file.path()).unwrap();
        assert_eq!(config.org_id, "initech");
        assert!(!config.capabilities().has("team:admin"));
        assert_eq!(config.editor.required_permission, "team:admin");
    }

    #[test]
    fn editor_file_is_loaded_relative_to_config() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("editor.json"),
            r#"{"requiredPermission": "org:owner", "hardReloadOnIdentityChange": false}"#,
        )
        .unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"editorFile": "editor.json"}"#).unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.editor.required_permission, "org:owner");
        assert!(!config.editor.hard_reload_on_identity_change);
        assert_eq!(config.editor.fields.len(), 2);
    }

    #[test]
    fn broken_editor_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("editor.json"), r#"{"fields": []}"#).unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"editorFile": "editor.json"}"#).unwrap();

        assert!(AppConfig::load_from(&path).is_err());
    }

    #[test]
    fn data_dir_override_is_used() {
        let config = AppConfig {
            data_dir: Some(PathBuf::from("/tmp/teams")),
            ..AppConfig::default()
        };
        assert_eq!(config.log_dir(), PathBuf::from("/tmp/teams/logs"));
    }
}
