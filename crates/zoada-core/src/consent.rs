//! 쿠키 동의 관리 (LGPD/GDPR).
//!
//! 수락 여부 하나만 로컬 JSON 파일에 저장한다. 만료 시각은 기록하지만
//! 타이머로 강제하지 않으며, 파일이 지워져야만 다시 동의를 받는다.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

use crate::error::CoreError;

/// 동의 유효 기간 (일)
pub const CONSENT_EXPIRY_DAYS: i64 = 365;

/// 동의 파일 이름
pub const CONSENT_FILE_NAME: &str = "consent.json";

/// 동의 기록
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsentRecord {
    /// 수락 여부
    pub accepted: bool,
    /// 수락 시각
    pub granted_at: DateTime<Utc>,
    /// 명목상 만료 시각
    pub expires_at: DateTime<Utc>,
}

/// 동의 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsentStatus {
    /// 동의 기록 없음 (배너 표시 대상)
    NotGranted,
    /// 수락됨
    Accepted,
}

/// 동의 관리자: 로컬 JSON 파일 기반
pub struct ConsentManager {
    /// 동의 파일 저장 경로
    storage_path: PathBuf,
    /// 현재 동의 기록
    current: Option<ConsentRecord>,
}

impl ConsentManager {
    /// 새 ConsentManager 생성 + 기존 파일 로드
    pub fn new(storage_path: PathBuf) -> Self {
        let current = Self::load_from_file(&storage_path);
        Self {
            storage_path,
            current,
        }
    }

    /// 동의 상태 확인 (만료 시각은 보지 않음)
    pub fn status(&self) -> ConsentStatus {
        match &self.current {
            Some(record) if record.accepted => ConsentStatus::Accepted,
            _ => ConsentStatus::NotGranted,
        }
    }

    /// 현재 동의 기록
    pub fn record(&self) -> Option<&ConsentRecord> {
        self.current.as_ref()
    }

    /// 동의 수락
    pub fn accept(&mut self) -> Result<&ConsentRecord, CoreError> {
        let now = Utc::now();
        let record = ConsentRecord {
            accepted: true,
            granted_at: now,
            expires_at: now + Duration::days(CONSENT_EXPIRY_DAYS),
        };

        self.save_to_file(&record)?;
        debug!("동의 저장: {}", self.storage_path.display());
        Ok(self.current.insert(record))
    }

    /// 동의 철회 (파일 삭제)
    pub fn revoke(&mut self) -> Result<(), CoreError> {
        if self.storage_path.exists() {
            std::fs::remove_file(&self.storage_path)?;
        }
        self.current = None;
        Ok(())
    }

    // --- 내부 유틸 ---

    fn load_from_file(path: &PathBuf) -> Option<ConsentRecord> {
        let data = std::fs::read_to_string(path).ok()?;
        serde_json::from_str(&data).ok()
    }

    fn save_to_file(&self, record: &ConsentRecord) -> Result<(), CoreError> {
        if let Some(parent) = self.storage_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(record)?;
        std::fs::write(&self.storage_path, json)?;
        Ok(())
    }
}
