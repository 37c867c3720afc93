//! 세션 컨트롤러.
//!
//! 하나의 `SessionState`를 소유하고 업로드 → 자동 처리 → 수동 재처리 → 다운로드
//! 흐름을 구동한다. 결정은 `reconciler`가, 전송은 `ProcessingApi` 포트가 맡는다.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};
use zoada_core::config::UploadConfig;
use zoada_core::error::CoreError;
use zoada_core::models::request::ProcessingRequest;
use zoada_core::models::settings::{OutputFormat, ProcessingMode};
use zoada_core::ports::clipboard::ClipboardSink;
use zoada_core::ports::processing_api::ProcessingApi;
use zoada_core::reconciler;
use zoada_core::session::{ProcessedImage, SessionState, UploadedImage};
use zoada_core::validation::{content_type_for_path, validate_upload};

use crate::probe;

/// 선언된 content type이 없을 때 업로드에 쓰는 값
const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// 다운로드 파일 이름 (`imagem_zoada_{millis}.{ext}`)
pub fn download_file_name(format: OutputFormat, timestamp_millis: i64) -> String {
    format!("imagem_zoada_{timestamp_millis}.{}", format.extension())
}

/// 세션 컨트롤러
pub struct SessionController {
    api: Arc<dyn ProcessingApi>,
    state: SessionState,
    limits: UploadConfig,
}

impl SessionController {
    pub fn new(api: Arc<dyn ProcessingApi>, mode: ProcessingMode, limits: UploadConfig) -> Self {
        Self {
            api,
            state: SessionState::new(mode),
            limits,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// 슬라이더/프리셋 변경용 가변 접근
    pub fn state_mut(&mut self) -> &mut SessionState {
        &mut self.state
    }

    /// 파일 경로에서 읽어 업로드
    ///
    /// 자동 모드면 업로드 직후 처리까지 진행하고 그 결과를 돌려준다.
    pub async fn load_file(&mut self, path: &Path) -> Result<Option<ProcessedImage>, CoreError> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("image")
            .to_string();

        let size = tokio::fs::metadata(path).await?.len();
        // 읽기 전에 크기부터 확인
        validate_upload(&file_name, content_type_for_path(path), size, &self.limits)?;

        let bytes = tokio::fs::read(path).await?;
        self.load_bytes(&file_name, content_type_for_path(path), bytes)
            .await
    }

    /// 메모리의 바이트를 업로드
    pub async fn load_bytes(
        &mut self,
        file_name: &str,
        content_type: Option<&str>,
        bytes: Vec<u8>,
    ) -> Result<Option<ProcessedImage>, CoreError> {
        let size = bytes.len() as u64;
        validate_upload(file_name, content_type, size, &self.limits)?;

        // 업로드 전에 디코딩 가능한지 확인해 깨진 파일은 서버로 보내지 않는다
        let probe_bytes = bytes.clone();
        let dimensions = tokio::task::spawn_blocking(move || probe::probe_dimensions(&probe_bytes))
            .await
            .map_err(|e| CoreError::Decode(format!("프로빙 태스크 실패: {e}")))??;

        info!("업로드 시작: {file_name} ({size} bytes, {dimensions})");
        let uploaded = self
            .api
            .upload(
                file_name,
                content_type.unwrap_or(FALLBACK_CONTENT_TYPE),
                bytes,
            )
            .await?;

        self.state.record_upload(UploadedImage {
            file_id: uploaded.file_id,
            file_name: file_name.to_string(),
            size_bytes: size,
            dimensions,
        });

        if self.state.mode() == ProcessingMode::Auto {
            let processed = self.process_auto().await?;
            return Ok(Some(processed));
        }

        Ok(None)
    }

    /// 자동 모드 처리: 고정 파라미터 + 리사이즈 휴리스틱
    ///
    /// 적용된 값은 세션 설정에 병합된다.
    pub async fn process_auto(&mut self) -> Result<ProcessedImage, CoreError> {
        let uploaded = self.state.uploaded().ok_or(CoreError::NoImage)?;
        let request = reconciler::build_auto_request(&uploaded.file_id, uploaded.dimensions);
        let plan = reconciler::compute_auto_resize_plan(uploaded.dimensions);
        debug!(
            "자동 처리: {} → {}x{} (resize={})",
            uploaded.dimensions, plan.target_width, plan.target_height, plan.did_resize
        );

        self.state.set_mode(ProcessingMode::Auto);
        self.send(request).await
    }

    /// 수동 모드 처리: 현재 슬라이더 설정 사용
    pub async fn process_manual(&mut self) -> Result<ProcessedImage, CoreError> {
        let uploaded = self.state.uploaded().ok_or(CoreError::NoImage)?;
        let request = reconciler::build_manual_request(
            &uploaded.file_id,
            self.state.settings(),
            uploaded.dimensions,
        );

        self.state.set_mode(ProcessingMode::Manual);
        self.send(request).await
    }

    async fn send(&mut self, request: ProcessingRequest) -> Result<ProcessedImage, CoreError> {
        self.state.try_begin_request()?;
        let result = self.api.process(&request).await;
        self.state.finish_request();

        let response = result?;
        info!(
            "처리 완료: {} ({}x{}, {} KB)",
            response.processed_file_id,
            response.info.width,
            response.info.height,
            response.info.size_kb
        );
        self.state.record_processed(request, response);
        self.state
            .processed()
            .cloned()
            .ok_or(CoreError::NoProcessedImage)
    }

    /// 처리 결과 미리보기 URL
    pub fn preview_url(&self) -> Option<String> {
        self.state
            .processed()
            .map(|p| self.api.download_url(&p.file_id))
    }

    /// 처리 결과를 디렉토리에 저장하고 파일 경로 반환
    pub async fn download_to(&self, dir: &Path) -> Result<PathBuf, CoreError> {
        let processed = self.state.processed().ok_or(CoreError::NoProcessedImage)?;
        let format = processed
            .applied
            .effective_format()
            .unwrap_or(self.state.settings().output_format);

        let bytes = self.api.download(&processed.file_id).await?;

        tokio::fs::create_dir_all(dir).await?;
        let path = dir.join(download_file_name(
            format,
            chrono::Utc::now().timestamp_millis(),
        ));
        tokio::fs::write(&path, &bytes).await?;

        info!("저장 완료: {} ({} bytes)", path.display(), bytes.len());
        Ok(path)
    }

    /// 처리 결과를 클립보드로 복사
    ///
    /// 다운로드/디코딩/쓰기 실패는 모두 `CoreError::Clipboard`로 보고한다.
    pub async fn copy_to_clipboard(&self, sink: &dyn ClipboardSink) -> Result<(), CoreError> {
        let processed = self.state.processed().ok_or(CoreError::NoProcessedImage)?;

        let bytes = self
            .api
            .download(&processed.file_id)
            .await
            .map_err(|e| CoreError::Clipboard(format!("이미지 수신 실패: {e}")))?;

        let image = tokio::task::spawn_blocking(move || probe::to_clipboard_image(&bytes))
            .await
            .map_err(|e| CoreError::Clipboard(format!("변환 태스크 실패: {e}")))?
            .map_err(|e| CoreError::Clipboard(e.to_string()))?;

        sink.write_image(image).map_err(|e| match e {
            CoreError::Clipboard(_) => e,
            other => CoreError::Clipboard(other.to_string()),
        })
    }

    /// 세션 초기화
    pub fn reset(&mut self) {
        if self.state.is_in_flight() {
            warn!("요청 진행 중 초기화: 늦게 도착한 응답은 새 상태에 기록될 수 있음");
        }
        self.state.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn download_name_uses_format_extension() {
        assert_eq!(
            download_file_name(OutputFormat::Jpeg, 1_700_000_000_000),
            "imagem_zoada_1700000000000.jpg"
        );
        assert_eq!(
            download_file_name(OutputFormat::Webp, 42),
            "imagem_zoada_42.webp"
        );
    }
}
