//! ZOADA 핵심 에러 타입.
//!
//! 어댑터 crate와 앱은 이 타입을 그대로 반환한다.
//! 모든 에러는 시도한 동작에 대해 종료성이며 자동 재시도하지 않는다.

use thiserror::Error;

use crate::messages::{Locale, Message};

/// 코어 레이어 에러.
#[derive(Debug, Error)]
pub enum CoreError {
    /// 네트워크 호출 전에 잡히는 입력 검증 실패 (형식, 크기)
    #[error("유효성 검증 실패: {field}: {message}")]
    Validation {
        /// 검증 실패한 필드명
        field: String,
        /// 실패 사유
        message: String,
    },

    /// 업로드 실패 (전송 실패, 비정상 상태 코드, 응답 파싱 실패)
    #[error("업로드 실패: {0}")]
    Upload(String),

    /// 처리 요청 실패
    #[error("처리 실패: {0}")]
    Process(String),

    /// 결과 이미지 다운로드 실패
    #[error("다운로드 실패: {0}")]
    Download(String),

    /// 클립보드 복사 미지원 또는 거부
    #[error("클립보드 에러: {0}")]
    Clipboard(String),

    /// 업로드된 이미지 없음
    #[error("선택된 이미지 없음")]
    NoImage,

    /// 처리된 이미지 없음
    #[error("처리된 이미지 없음")]
    NoProcessedImage,

    /// 같은 동작의 요청이 이미 진행 중
    #[error("요청 진행 중: 중복 제출 거부")]
    Busy,

    /// 이미지 디코딩 실패 (크기 확인, RGBA 변환)
    #[error("디코딩 에러: {0}")]
    Decode(String),

    /// 설정값 오류
    #[error("설정 에러: {0}")]
    Config(String),

    /// JSON 직렬화/역직렬화 실패
    #[error("직렬화 에러: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O 에러
    #[error("I/O 에러: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    /// 검증 에러 생성 헬퍼
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// 사용자에게 보여줄 메시지 키
    ///
    /// 검증 에러는 필드별로 구분하고, 나머지는 동작 단위로 묶는다.
    pub fn message_key(&self) -> Message {
        match self {
            Self::Validation { field, .. } => match field.as_str() {
                "size" => Message::FileTooLarge,
                "size_min" => Message::FileCorrupt,
                "dimensions" => Message::FileCorrupt,
                _ => Message::InvalidFormat,
            },
            Self::Upload(_) => Message::UploadFailed,
            Self::Process(_) | Self::Busy => Message::ProcessFailed,
            Self::Download(_) => Message::DownloadFailed,
            Self::Clipboard(_) => Message::CopyFailed,
            Self::NoImage => Message::NoImageSelected,
            Self::NoProcessedImage => Message::NoProcessedImage,
            Self::Decode(_) => Message::FileCorrupt,
            Self::Config(_) | Self::Serialization(_) | Self::Io(_) => Message::Unexpected,
        }
    }

    /// 지정한 언어의 사용자 메시지
    pub fn user_message(&self, locale: Locale) -> &'static str {
        locale.text(self.message_key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_helper_builds_fields() {
        let err = CoreError::validation("size", "too big");
        match err {
            CoreError::Validation { field, message } => {
                assert_eq!(field, "size");
                assert_eq!(message, "too big");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn message_keys_by_kind() {
        assert_eq!(
            CoreError::validation("size", "x").message_key(),
            Message::FileTooLarge
        );
        assert_eq!(
            CoreError::validation("size_min", "x").message_key(),
            Message::FileCorrupt
        );
        assert_eq!(
            CoreError::validation("format", "x").message_key(),
            Message::InvalidFormat
        );
        assert_eq!(
            CoreError::Upload("500".into()).message_key(),
            Message::UploadFailed
        );
        assert_eq!(CoreError::NoImage.message_key(), Message::NoImageSelected);
        assert_eq!(
            CoreError::Download("connection refused".into()).message_key(),
            Message::DownloadFailed
        );
    }

    #[test]
    fn user_message_is_localized() {
        let err = CoreError::Process("boom".into());
        assert_ne!(
            err.user_message(Locale::Pt),
            err.user_message(Locale::En)
        );
    }
}
