//! # zoada-core
//!
//! ZOADA 도메인 모델, 설정 조정기, 포트(trait) 정의, 에러 타입.
//! 픽셀 연산은 하지 않는다. 원격 백엔드에 보낼 파라미터를 결정하고
//! 서버가 돌려준 값을 세션 상태에 다시 반영하는 순수 로직만 담는다.
//!
//! ## 구조
//!
//! - [`models`] - 이미지 크기, 처리 설정, 요청/응답 구조체 (serde)
//! - [`reconciler`] - 자동 리사이즈 휴리스틱, 요청 생성, 프리셋, 적용값 병합
//! - [`validation`] - 업로드 전 파일 형식/크기 검증
//! - [`session`] - 세션 상태 객체 (컨트롤러가 소유)
//! - [`ports`] - 어댑터 인터페이스 (async_trait)
//! - [`error`] - 핵심 에러 타입 (thiserror)
//! - [`config`] - 애플리케이션 설정 구조체
//! - [`config_manager`] - 설정 파일 관리 (로드/저장)
//! - [`consent`] - 쿠키 동의 플래그 저장
//! - [`messages`] - 언어별 사용자 메시지

pub mod config;
pub mod config_manager;
pub mod consent;
pub mod error;
pub mod messages;
pub mod models;
pub mod ports;
pub mod reconciler;
pub mod session;
pub mod validation;

#[cfg(test)]
mod tests {
    use crate::models::request::ProcessingRequest;
    use crate::models::settings::OutputFormat;

    #[test]
    fn processing_request_serde_roundtrip() {
        let request = ProcessingRequest {
            file_id: "file_001".to_string(),
            pixelization: 4,
            quality: 20,
            noise: 10,
            blur: 2,
            output_format: Some(OutputFormat::Jpeg),
            legacy_format: None,
            target_width: Some(500),
            target_height: Some(250),
        };

        let json = serde_json::to_string(&request).unwrap();
        let deserialized: ProcessingRequest = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized, request);
        assert!(json.contains("\"fileId\":\"file_001\""));
        assert!(json.contains("\"outputFormat\":\"jpeg\""));
    }

    #[test]
    fn config_defaults() {
        let config = crate::config::AppConfig::default_config();
        assert_eq!(
            config.server.base_url,
            "https://baixarqualidadeimagem-backend.onrender.com/api"
        );
        assert_eq!(config.server.request_timeout_ms, 60_000);
        assert_eq!(config.upload.max_bytes, 10 * 1024 * 1024);
        assert_eq!(config.upload.min_bytes, 100);
    }
}
