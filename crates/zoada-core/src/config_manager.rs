//! 설정 파일 관리.
//!
//! `config.json` 하나를 읽고 쓴다. 파일이 없으면 기본값으로 만든다.
//! 어느 디렉토리를 쓸지는 앱 crate가 정한다.

use parking_lot::RwLock;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::error::CoreError;

/// 설정 파일 이름
pub const CONFIG_FILE_NAME: &str = "config.json";

/// 파일에 묶인 설정 핸들 (복제해도 같은 설정을 공유)
#[derive(Debug, Clone)]
pub struct ConfigManager {
    path: PathBuf,
    current: Arc<RwLock<AppConfig>>,
}

impl ConfigManager {
    /// 경로의 설정 파일을 연다. 없으면 기본 설정으로 생성
    pub fn open(path: PathBuf) -> Result<Self, CoreError> {
        let config = if path.exists() {
            read_config(&path)?
        } else {
            let defaults = AppConfig::default_config();
            write_config(&path, &defaults)?;
            info!("기본 설정 파일 생성: {}", path.display());
            defaults
        };

        Ok(Self {
            path,
            current: Arc::new(RwLock::new(config)),
        })
    }

    /// `dir/config.json`을 연다
    pub fn in_dir(dir: &Path) -> Result<Self, CoreError> {
        Self::open(dir.join(CONFIG_FILE_NAME))
    }

    /// 현재 설정 스냅샷
    pub fn get(&self) -> AppConfig {
        self.current.read().clone()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 설정을 수정하고 파일에 저장
    ///
    /// 수정 함수가 실패하면 파일과 메모리 모두 그대로 둔다.
    pub fn update_with<F>(&self, edit: F) -> Result<AppConfig, CoreError>
    where
        F: FnOnce(&mut AppConfig) -> Result<(), CoreError>,
    {
        let mut guard = self.current.write();
        let mut next = guard.clone();
        edit(&mut next)?;

        write_config(&self.path, &next)?;
        *guard = next.clone();
        debug!("설정 저장: {}", self.path.display());
        Ok(next)
    }
}

fn read_config(path: &Path) -> Result<AppConfig, CoreError> {
    let text = fs::read_to_string(path)
        .map_err(|e| CoreError::Config(format!("{} 읽기 실패: {e}", path.display())))?;
    serde_json::from_str(&text)
        .map_err(|e| CoreError::Config(format!("{} 파싱 실패: {e}", path.display())))
}

/// 같은 디렉토리의 임시 파일에 쓴 뒤 교체
fn write_config(path: &Path, config: &AppConfig) -> Result<(), CoreError> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .map_err(|e| CoreError::Config(format!("{} 생성 실패: {e}", dir.display())))?;
    }

    let tmp = path.with_extension("json.tmp");
    let json = serde_json::to_string_pretty(config)?;
    fs::write(&tmp, json)
        .and_then(|_| fs::rename(&tmp, path))
        .map_err(|e| CoreError::Config(format!("{} 저장 실패: {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigKey;
    use crate::messages::Locale;
    use crate::models::settings::ProcessingMode;

    #[test]
    fn missing_file_is_created_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a").join("b").join(CONFIG_FILE_NAME);

        let manager = ConfigManager::open(path.clone()).unwrap();
        assert!(path.exists());
        assert_eq!(manager.path(), path.as_path());
        assert_eq!(manager.get().server.request_timeout_ms, 60_000);
    }

    #[test]
    fn update_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let manager = ConfigManager::in_dir(dir.path()).unwrap();

        manager
            .update_with(|c| {
                c.set(ConfigKey::Locale, "en")?;
                c.set(ConfigKey::StartMode, "manual")
            })
            .unwrap();

        let reopened = ConfigManager::in_dir(dir.path()).unwrap().get();
        assert_eq!(reopened.ui.locale, Locale::En);
        assert_eq!(reopened.ui.start_mode, ProcessingMode::Manual);
        assert!(!dir.path().join("config.json.tmp").exists());
    }

    #[test]
    fn failed_edit_changes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let manager = ConfigManager::in_dir(dir.path()).unwrap();
        let before = fs::read_to_string(manager.path()).unwrap();

        let result = manager.update_with(|c| {
            c.set(ConfigKey::Locale, "en")?;
            c.set(ConfigKey::TimeoutMs, "never")
        });

        assert!(matches!(result, Err(CoreError::Config(_))));
        assert_eq!(manager.get().ui.locale, Locale::Pt);
        assert_eq!(fs::read_to_string(manager.path()).unwrap(), before);
    }

    #[test]
    fn clones_share_state() {
        let dir = tempfile::tempdir().unwrap();
        let manager = ConfigManager::in_dir(dir.path()).unwrap();
        let handle = manager.clone();

        manager
            .update_with(|c| c.set(ConfigKey::Server, "http://localhost:8080/api"))
            .unwrap();
        assert_eq!(handle.get().server.base_url, "http://localhost:8080/api");
    }

    #[test]
    fn broken_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            ConfigManager::open(path),
            Err(CoreError::Config(_))
        ));
    }
}
