//! 원격 이미지 처리 API 포트.
//!
//! 구현: `zoada-network` crate (reqwest)

use async_trait::async_trait;

use crate::error::CoreError;
use crate::models::request::{ProcessResponse, ProcessingRequest, UploadResponse};

/// 원격 처리 백엔드 클라이언트
///
/// 모든 호출은 한 번만 보낸다. 재시도, 백오프, 멱등 키 없음.
#[async_trait]
pub trait ProcessingApi: Send + Sync {
    /// 원본 업로드 (multipart `file` 필드)
    ///
    /// 비정상 응답은 `CoreError::Upload`.
    async fn upload(
        &self,
        file_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<UploadResponse, CoreError>;

    /// 처리 요청 (JSON)
    ///
    /// 비정상 응답은 `CoreError::Process`.
    async fn process(&self, request: &ProcessingRequest) -> Result<ProcessResponse, CoreError>;

    /// 저장된 파일의 다운로드 URL: 네트워크 호출 없음
    fn download_url(&self, file_id: &str) -> String;

    /// 저장된 파일 바이트 수신
    ///
    /// 비정상 응답은 `CoreError::Download`.
    async fn download(&self, file_id: &str) -> Result<Vec<u8>, CoreError>;
}
