//! HTTP REST API 클라이언트.
//!
//! `ProcessingApi` 포트 구현. 업로드(multipart), 처리(JSON), 다운로드(GET).
//! 요청은 한 번만 보내며 실패 시 재시도하지 않는다. 재시도는 사용자가 직접 한다.
//! 전송 실패, 비정상 상태 코드, 응답 파싱 실패는 모두 해당 동작의 에러로 보고한다.

use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;
use zoada_core::error::CoreError;
use zoada_core::models::request::{ProcessResponse, ProcessingRequest, UploadResponse};
use zoada_core::ports::processing_api::ProcessingApi;

/// 처리 백엔드 REST 클라이언트: `ProcessingApi` 포트 구현
#[derive(Debug)]
pub struct HttpProcessingClient {
    client: reqwest::Client,
    base: Url,
    base_url: String,
}

impl HttpProcessingClient {
    /// 새 HTTP 클라이언트 생성
    ///
    /// `base_url`은 http(s) 절대 URL이어야 한다 (끝의 `/`는 제거).
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, CoreError> {
        let base = Url::parse(base_url)
            .map_err(|e| CoreError::Config(format!("잘못된 API URL: {base_url}: {e}")))?;
        if base.cannot_be_a_base() || !matches!(base.scheme(), "http" | "https") {
            return Err(CoreError::Config(format!(
                "http(s) URL이 아님: {base_url}"
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CoreError::Config(format!("HTTP 클라이언트 빌드 실패: {e}")))?;

        Ok(Self {
            client,
            base,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// 기본 URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// 기본 경로 뒤에 세그먼트를 붙인 URL (각 세그먼트는 퍼센트 인코딩)
    fn segment_url(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// 응답 상태 코드 확인: 실패 시 호출한 동작의 에러로 매핑
    async fn check_response(
        resp: reqwest::Response,
        into_error: fn(String) -> CoreError,
    ) -> Result<reqwest::Response, CoreError> {
        let status = resp.status();

        if status.is_success() {
            return Ok(resp);
        }

        let text = resp.text().await.unwrap_or_else(|e| {
            warn!("응답 본문 읽기 실패: {e}");
            String::new()
        });

        Err(into_error(format!("API 에러 ({status}): {text}")))
    }
}

#[async_trait]
impl ProcessingApi for HttpProcessingClient {
    async fn upload(
        &self,
        file_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<UploadResponse, CoreError> {
        debug!("업로드 요청: {file_name} ({} bytes, {content_type})", bytes.len());

        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(content_type)
            .map_err(|e| CoreError::Upload(format!("잘못된 content type {content_type}: {e}")))?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let resp = self
            .client
            .post(self.endpoint("/upload"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| CoreError::Upload(format!("업로드 요청 전송 실패: {e}")))?;

        let resp = Self::check_response(resp, CoreError::Upload).await?;
        let upload: UploadResponse = resp
            .json()
            .await
            .map_err(|e| CoreError::Upload(format!("업로드 응답 파싱 실패: {e}")))?;

        debug!("업로드 성공: file_id={}", upload.file_id);
        Ok(upload)
    }

    async fn process(&self, request: &ProcessingRequest) -> Result<ProcessResponse, CoreError> {
        debug!(
            "처리 요청: file_id={} pixel={} quality={} noise={} blur={} target={:?}x{:?}",
            request.file_id,
            request.pixelization,
            request.quality,
            request.noise,
            request.blur,
            request.target_width,
            request.target_height
        );

        let resp = self
            .client
            .post(self.endpoint("/process"))
            .json(request)
            .send()
            .await
            .map_err(|e| CoreError::Process(format!("처리 요청 전송 실패: {e}")))?;

        let resp = Self::check_response(resp, CoreError::Process).await?;
        let processed: ProcessResponse = resp
            .json()
            .await
            .map_err(|e| CoreError::Process(format!("처리 응답 파싱 실패: {e}")))?;

        debug!(
            "처리 성공: processed_file_id={} ({}x{}, {} KB)",
            processed.processed_file_id,
            processed.info.width,
            processed.info.height,
            processed.info.size_kb
        );
        Ok(processed)
    }

    fn download_url(&self, file_id: &str) -> String {
        self.segment_url(&["download", file_id]).to_string()
    }

    async fn download(&self, file_id: &str) -> Result<Vec<u8>, CoreError> {
        debug!("다운로드 요청: {file_id}");

        let resp = self
            .client
            .get(self.segment_url(&["download", file_id]))
            .send()
            .await
            .map_err(|e| CoreError::Download(format!("다운로드 요청 전송 실패: {e}")))?;

        let resp = Self::check_response(resp, CoreError::Download).await?;
        let bytes = resp
            .bytes()
            .await
            .map_err(|e| CoreError::Download(format!("다운로드 본문 수신 실패: {e}")))?;

        Ok(bytes.to_vec())
    }
}
