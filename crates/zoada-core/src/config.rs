//! 애플리케이션 설정 구조체.
//!
//! 백엔드 URL, 요청 타임아웃, 업로드 제한, 표시 언어/시작 모드를 정의한다.
//! `ConfigManager`가 JSON 파일에서 로드하고 CLI 인자가 덮어쓴다.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

use crate::error::CoreError;
use crate::messages::Locale;
use crate::models::settings::ProcessingMode;

/// 최상위 애플리케이션 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// 백엔드 연결 설정
    pub server: ServerConfig,
    /// 업로드 제한
    #[serde(default)]
    pub upload: UploadConfig,
    /// 표시 설정
    #[serde(default)]
    pub ui: UiConfig,
}

// ============================================================
// 서버/업로드/표시 설정
// ============================================================

/// 백엔드 연결 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// API 기본 URL (예: "https://api.example.com/api")
    pub base_url: String,
    /// 요청 타임아웃 (밀리초)
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

/// 업로드 제한
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// 최대 파일 크기 (바이트)
    #[serde(default = "default_max_bytes")]
    pub max_bytes: u64,
    /// 최소 파일 크기 (바이트): 이보다 작으면 손상 파일로 간주
    #[serde(default = "default_min_bytes")]
    pub min_bytes: u64,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_bytes: default_max_bytes(),
            min_bytes: default_min_bytes(),
        }
    }
}

/// 표시 설정
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UiConfig {
    /// 메시지 언어
    #[serde(default)]
    pub locale: Locale,
    /// 업로드 직후 처리 방식
    #[serde(default)]
    pub start_mode: ProcessingMode,
}

// ============================================================
// AppConfig impl
// ============================================================

impl AppConfig {
    /// 기본 설정값 반환
    pub fn default_config() -> Self {
        Self {
            server: ServerConfig {
                base_url: DEFAULT_API_URL.to_string(),
                request_timeout_ms: default_request_timeout_ms(),
            },
            upload: UploadConfig::default(),
            ui: UiConfig::default(),
        }
    }

    /// 요청 타임아웃을 Duration으로 반환
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.server.request_timeout_ms)
    }

    /// 키 하나의 값을 문자열에서 파싱해 설정
    pub fn set(&mut self, key: ConfigKey, value: &str) -> Result<(), CoreError> {
        match key {
            ConfigKey::Server => {
                let value = value.trim();
                if !(value.starts_with("http://") || value.starts_with("https://")) {
                    return Err(CoreError::Config(format!("http(s) URL이 아님: {value}")));
                }
                self.server.base_url = value.trim_end_matches('/').to_string();
            }
            ConfigKey::TimeoutMs => {
                let ms: u64 = value
                    .trim()
                    .parse()
                    .map_err(|e| CoreError::Config(format!("잘못된 타임아웃 {value}: {e}")))?;
                if ms == 0 {
                    return Err(CoreError::Config("타임아웃은 0보다 커야 함".to_string()));
                }
                self.server.request_timeout_ms = ms;
            }
            ConfigKey::Locale => {
                self.ui.locale = value.parse().map_err(CoreError::Config)?;
            }
            ConfigKey::StartMode => {
                self.ui.start_mode = value.parse()?;
            }
        }
        Ok(())
    }

    /// 키 하나의 현재 값을 문자열로 반환
    pub fn get(&self, key: ConfigKey) -> String {
        match key {
            ConfigKey::Server => self.server.base_url.clone(),
            ConfigKey::TimeoutMs => self.server.request_timeout_ms.to_string(),
            ConfigKey::Locale => self.ui.locale.as_str().to_string(),
            ConfigKey::StartMode => self.ui.start_mode.as_str().to_string(),
        }
    }
}

/// `zoada config get/set`으로 바꿀 수 있는 키
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    Server,
    TimeoutMs,
    Locale,
    StartMode,
}

impl ConfigKey {
    pub const ALL: [ConfigKey; 4] = [
        ConfigKey::Server,
        ConfigKey::TimeoutMs,
        ConfigKey::Locale,
        ConfigKey::StartMode,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Server => "server",
            Self::TimeoutMs => "timeout-ms",
            Self::Locale => "locale",
            Self::StartMode => "start-mode",
        }
    }
}

impl FromStr for ConfigKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| {
                CoreError::Config(format!(
                    "알 수 없는 설정 키: {s} (server, timeout-ms, locale, start-mode)"
                ))
            })
    }
}

// ============================================================
// 기본값 함수
// ============================================================

/// 운영 백엔드 주소
pub const DEFAULT_API_URL: &str = "https://baixarqualidadeimagem-backend.onrender.com/api";

fn default_request_timeout_ms() -> u64 {
    // 무료 호스팅 콜드 스타트 고려
    60_000
}
fn default_max_bytes() -> u64 {
    10 * 1024 * 1024
}
fn default_min_bytes() -> u64 {
    100
}
