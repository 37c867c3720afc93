//! 세션 상태.
//!
//! 페이지 한 번 로드에 해당하는 유일한 가변 상태 객체.
//! 컨트롤러가 소유하고 핸들러에는 참조로 넘긴다.

use crate::error::CoreError;
use crate::models::dimensions::ImageDimensions;
use crate::models::request::{ProcessResponse, ProcessedInfo, ProcessingRequest};
use crate::models::settings::{OutputFormat, PresetMode, ProcessingMode, ProcessingSettings};
use crate::reconciler::{self, AppliedSettingsSummary};

/// 업로드된 원본 정보
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedImage {
    /// 백엔드가 발급한 파일 ID
    pub file_id: String,
    /// 원본 파일명
    pub file_name: String,
    /// 원본 바이트 크기
    pub size_bytes: u64,
    /// 원본 자연 크기
    pub dimensions: ImageDimensions,
}

/// 마지막 처리 결과
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedImage {
    pub file_id: String,
    pub info: ProcessedInfo,
    /// 실제로 보낸 요청
    pub applied: ProcessingRequest,
}

/// 세션 상태
#[derive(Debug, Clone)]
pub struct SessionState {
    mode: ProcessingMode,
    settings: ProcessingSettings,
    uploaded: Option<UploadedImage>,
    processed: Option<ProcessedImage>,
    in_flight: bool,
}

impl SessionState {
    pub fn new(mode: ProcessingMode) -> Self {
        Self {
            mode,
            settings: ProcessingSettings::default(),
            uploaded: None,
            processed: None,
            in_flight: false,
        }
    }

    pub fn mode(&self) -> ProcessingMode {
        self.mode
    }

    pub fn settings(&self) -> &ProcessingSettings {
        &self.settings
    }

    pub fn uploaded(&self) -> Option<&UploadedImage> {
        self.uploaded.as_ref()
    }

    pub fn processed(&self) -> Option<&ProcessedImage> {
        self.processed.as_ref()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// 새 파일 업로드 기록: 이전 파일의 결과와 설정은 버린다
    pub fn record_upload(&mut self, uploaded: UploadedImage) {
        self.settings = ProcessingSettings::default();
        self.processed = None;
        self.uploaded = Some(uploaded);
    }

    /// 처리 결과 기록
    ///
    /// 자동 모드 결과면 적용된 값을 슬라이더 설정에 병합한다.
    pub fn record_processed(&mut self, applied: ProcessingRequest, response: ProcessResponse) {
        if self.mode == ProcessingMode::Auto {
            self.settings = reconciler::reconcile_applied_settings(&self.settings, &applied);
        }
        self.processed = Some(ProcessedImage {
            file_id: response.processed_file_id,
            info: response.info,
            applied,
        });
    }

    /// 마지막 적용 설정 요약
    pub fn applied_summary(&self) -> Option<AppliedSettingsSummary> {
        self.processed
            .as_ref()
            .map(|p| AppliedSettingsSummary::from_request(&p.applied))
    }

    /// 처리 방식 전환
    pub fn set_mode(&mut self, mode: ProcessingMode) {
        self.mode = mode;
    }

    /// 프리셋 선택: 수동 모드로 전환
    pub fn select_preset(&mut self, preset: PresetMode) {
        self.mode = ProcessingMode::Manual;
        self.settings = reconciler::apply_preset(&self.settings, preset);
    }

    pub fn set_format(&mut self, format: OutputFormat) {
        self.settings.output_format = format;
    }

    pub fn set_pixelization(&mut self, factor: u32) {
        self.settings.pixelization_factor = factor;
    }

    pub fn set_quality(&mut self, percent: u8) {
        self.settings.quality_percent = percent;
    }

    pub fn set_noise(&mut self, percent: u8) {
        self.settings.noise_percent = percent;
    }

    pub fn set_blur(&mut self, radius: u32) {
        self.settings.blur_radius = radius;
    }

    pub fn set_resolution_scale(&mut self, percent: u8) {
        self.settings.resolution_scale_percent = percent;
    }

    /// 요청 시작: 이미 진행 중이면 `Busy`
    pub fn try_begin_request(&mut self) -> Result<(), CoreError> {
        if self.in_flight {
            return Err(CoreError::Busy);
        }
        self.in_flight = true;
        Ok(())
    }

    /// 요청 종료 (성공/실패 무관)
    pub fn finish_request(&mut self) {
        self.in_flight = false;
    }

    /// 초기화: 업로드/결과 제거, `media` 프리셋으로 복귀
    ///
    /// 처리 방식은 유지한다.
    pub fn reset(&mut self) {
        self.uploaded = None;
        self.processed = None;
        self.in_flight = false;
        self.settings = reconciler::apply_preset(&ProcessingSettings::default(), PresetMode::Media);
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(ProcessingMode::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uploaded() -> UploadedImage {
        UploadedImage {
            file_id: "up_1".to_string(),
            file_name: "cat.png".to_string(),
            size_bytes: 2048,
            dimensions: ImageDimensions::new(1200, 600).unwrap(),
        }
    }

    fn response(id: &str) -> ProcessResponse {
        ProcessResponse {
            processed_file_id: id.to_string(),
            info: ProcessedInfo {
                width: 500,
                height: 250,
                size_kb: 12.5,
            },
        }
    }

    #[test]
    fn auto_result_is_reconciled_into_settings() {
        let mut state = SessionState::new(ProcessingMode::Auto);
        state.record_upload(uploaded());

        let dims = state.uploaded().unwrap().dimensions;
        let request = reconciler::build_auto_request("up_1", dims);
        state.record_processed(request, response("p_1"));

        let s = state.settings();
        assert_eq!(s.pixelization_factor, 4);
        assert_eq!(s.quality_percent, 20);
        assert_eq!(s.noise_percent, 10);
        assert_eq!(s.blur_radius, 2);
        assert_eq!(state.processed().unwrap().file_id, "p_1");
        assert_eq!(
            state.applied_summary().unwrap().resolution.as_deref(),
            Some("500x250")
        );
    }

    #[test]
    fn manual_result_leaves_settings_alone() {
        let mut state = SessionState::new(ProcessingMode::Auto);
        state.record_upload(uploaded());
        state.select_preset(PresetMode::Extrema);
        assert_eq!(state.mode(), ProcessingMode::Manual);

        let before = *state.settings();
        let dims = state.uploaded().unwrap().dimensions;
        let request = reconciler::build_auto_request("up_1", dims);
        state.record_processed(request, response("p_2"));
        assert_eq!(*state.settings(), before);
    }

    #[test]
    fn in_flight_guard_rejects_duplicates() {
        let mut state = SessionState::default();
        state.try_begin_request().unwrap();
        assert!(matches!(state.try_begin_request(), Err(CoreError::Busy)));
        state.finish_request();
        assert!(state.try_begin_request().is_ok());
    }

    #[test]
    fn new_upload_discards_previous_result() {
        let mut state = SessionState::default();
        state.record_upload(uploaded());
        let dims = state.uploaded().unwrap().dimensions;
        state.record_processed(reconciler::build_auto_request("up_1", dims), response("p"));
        state.set_format(OutputFormat::Webp);

        state.record_upload(uploaded());
        assert!(state.processed().is_none());
        assert_eq!(*state.settings(), ProcessingSettings::default());
    }

    #[test]
    fn reset_restores_media_and_keeps_mode() {
        let mut state = SessionState::new(ProcessingMode::Auto);
        state.record_upload(uploaded());
        state.select_preset(PresetMode::Baixa);
        state.set_resolution_scale(30);

        state.reset();
        assert!(state.uploaded().is_none());
        assert_eq!(state.mode(), ProcessingMode::Manual);
        assert_eq!(*state.settings(), ProcessingSettings::default());
    }
}
