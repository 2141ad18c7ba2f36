//! 窗口设置：JSON 文件存放在用户配置目录下

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// 设置文件名（放在应用配置目录下）
pub const SETTINGS_FILENAME: &str = "settings.json";

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("settings io: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings parse: {0}")]
    Parse(#[from] serde_json::Error),
}

/// 宿主窗口设置；表盘颜色与样式不在这里
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub window_width: f32,
    pub window_height: f32,
    /// 是否钉在桌面右上角并置顶
    pub pinned: bool,
    /// env_logger 过滤串，优先于 RUST_LOG
    pub log_filter: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_width: 420.0,
            window_height: 560.0,
            pinned: false,
            log_filter: None,
        }
    }
}

/// 应用配置目录
pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("clok")
}

pub fn settings_path() -> PathBuf {
    config_dir().join(SETTINGS_FILENAME)
}

impl Settings {
    /// 读取设置；文件不存在时返回默认值
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        match std::fs::read_to_string(path) {
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// 写入设置，必要时创建目录
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let text = serde_json::to_string_pretty(self)?;
        std::fs::write(path, text)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let s = Settings::load(&dir.path().join("nope.json")).unwrap();
        assert_eq!(s, Settings::default());
    }

    #[test]
    fn save_then_load_in_nested_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clok").join(SETTINGS_FILENAME);
        let s = Settings {
            pinned: true,
            log_filter: Some("clok=debug".to_owned()),
            ..Settings::default()
        };
        s.save(&path).unwrap();
        assert_eq!(Settings::load(&path).unwrap(), s);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILENAME);
        std::fs::write(&path, r#"{ "pinned": true }"#).unwrap();
        let s = Settings::load(&path).unwrap();
        assert!(s.pinned);
        assert_eq!(s.window_width, 420.0);
        assert_eq!(s.log_filter, None);
    }

    #[test]
    fn malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILENAME);
        std::fs::write(&path, "{ pinned: ").unwrap();
        assert!(matches!(Settings::load(&path), Err(SettingsError::Parse(_))));
    }

    #[test]
    fn settings_path_ends_with_app_dir() {
        let p = settings_path();
        assert!(p.ends_with(Path::new("clok").join(SETTINGS_FILENAME)));
    }
}
