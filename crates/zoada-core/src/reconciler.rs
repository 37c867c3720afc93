//! 설정 조정기 (Settings Reconciler).
//!
//! 원격 처리 API에 보낼 파라미터를 결정하고, 자동 모드 응답 후 실제 적용된
//! 값을 세션 설정에 다시 병합한다. I/O가 없는 순수 함수만 있으며 실패하지 않는다.

use crate::models::dimensions::ImageDimensions;
use crate::models::request::ProcessingRequest;
use crate::models::settings::{OutputFormat, PresetMode, ProcessingSettings};

/// 이 값을 넘는 긴 변은 축소 대상
pub const AUTO_RESIZE_THRESHOLD: u32 = 600;

/// 축소 후 긴 변 목표 길이
pub const AUTO_RESIZE_TARGET: u32 = 500;

/// 이 값 미만은 확대하지 않고 그대로 둔다
pub const AUTO_RESIZE_LOWER_BOUND: u32 = 450;

/// 자동 모드 고정 파라미터 ("밈 준비" 프리셋, 사용자 조정 불가)
pub const AUTO_PARAMS: PresetValues = PresetValues {
    pixelization: 4,
    quality: 20,
    noise: 10,
    blur: 2,
};

/// 자동 모드 출력 형식
pub const AUTO_FORMAT: OutputFormat = OutputFormat::Jpeg;

/// 프리셋이 덮어쓰는 네 값
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresetValues {
    pub pixelization: u32,
    pub quality: u8,
    pub noise: u8,
    pub blur: u32,
}

/// 자동 리사이즈 계획 (저장하지 않고 매번 계산)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoResizePlan {
    pub target_width: u32,
    pub target_height: u32,
    pub did_resize: bool,
}

/// 프리셋 모드별 값 조회
pub fn preset_values(mode: PresetMode) -> PresetValues {
    match mode {
        PresetMode::Baixa => PresetValues {
            pixelization: 2,
            quality: 75,
            noise: 10,
            blur: 0,
        },
        PresetMode::Media => PresetValues {
            pixelization: 4,
            quality: 50,
            noise: 30,
            blur: 2,
        },
        PresetMode::Extrema => PresetValues {
            pixelization: 12,
            quality: 20,
            noise: 70,
            blur: 5,
        },
    }
}

/// 한 변에 배율을 곱해 반올림 (하한 없음, 0이 될 수 있음)
fn scale_side(side: u32, scale: f64) -> u32 {
    (side as f64 * scale).round() as u32
}

/// 자동 리사이즈 휴리스틱
///
/// - 긴 변 > 600: 긴 변이 약 500이 되도록 균일 축소 (축별 독립 반올림, ±1px 허용)
/// - 450 ≤ 긴 변 ≤ 600: 그대로
/// - 긴 변 < 450: 그대로 (확대하지 않음)
pub fn compute_auto_resize_plan(dims: ImageDimensions) -> AutoResizePlan {
    let max_side = dims.max_side();

    if max_side > AUTO_RESIZE_THRESHOLD {
        let scale = AUTO_RESIZE_TARGET as f64 / max_side as f64;
        return AutoResizePlan {
            target_width: scale_side(dims.width, scale),
            target_height: scale_side(dims.height, scale),
            did_resize: true,
        };
    }

    // 450..=600 구간과 450 미만 구간 모두 원본 유지
    AutoResizePlan {
        target_width: dims.width,
        target_height: dims.height,
        did_resize: false,
    }
}

/// 자동 모드 요청 생성: 고정 파라미터 + 리사이즈 계획
pub fn build_auto_request(file_id: &str, dims: ImageDimensions) -> ProcessingRequest {
    let plan = compute_auto_resize_plan(dims);
    let (target_width, target_height) = if plan.did_resize {
        (Some(plan.target_width), Some(plan.target_height))
    } else {
        (None, None)
    };

    ProcessingRequest {
        file_id: file_id.to_string(),
        pixelization: AUTO_PARAMS.pixelization,
        quality: AUTO_PARAMS.quality,
        noise: AUTO_PARAMS.noise,
        blur: AUTO_PARAMS.blur,
        output_format: Some(AUTO_FORMAT),
        legacy_format: None,
        target_width,
        target_height,
    }
}

/// 수동 모드 요청 생성
///
/// 해상도 비율이 100 미만일 때만 목표 크기를 포함한다.
pub fn build_manual_request(
    file_id: &str,
    settings: &ProcessingSettings,
    dims: ImageDimensions,
) -> ProcessingRequest {
    let (target_width, target_height) = if settings.resolution_scale_percent < 100 {
        let scale = settings.resolution_scale_percent as f64 / 100.0;
        (
            Some(scale_side(dims.width, scale)),
            Some(scale_side(dims.height, scale)),
        )
    } else {
        (None, None)
    };

    ProcessingRequest {
        file_id: file_id.to_string(),
        pixelization: settings.pixelization_factor,
        quality: settings.quality_percent,
        noise: settings.noise_percent,
        blur: settings.blur_radius,
        output_format: Some(settings.output_format),
        legacy_format: None,
        target_width,
        target_height,
    }
}

/// 프리셋 적용: 네 값만 덮어쓰고 형식/해상도 비율은 유지
pub fn apply_preset(settings: &ProcessingSettings, mode: PresetMode) -> ProcessingSettings {
    let values = preset_values(mode);
    ProcessingSettings {
        pixelization_factor: values.pixelization,
        quality_percent: values.quality,
        noise_percent: values.noise,
        blur_radius: values.blur,
        ..*settings
    }
}

/// 에코된 요청 값을 현재 설정에 병합
///
/// 자동 모드는 슬라이더를 거치지 않으므로, 이후 수동 모드로 전환했을 때
/// 슬라이더가 마지막으로 적용된 값을 보여주도록 한다.
pub fn reconcile_applied_settings(
    settings: &ProcessingSettings,
    echoed: &ProcessingRequest,
) -> ProcessingSettings {
    ProcessingSettings {
        pixelization_factor: echoed.pixelization,
        quality_percent: echoed.quality,
        noise_percent: echoed.noise,
        blur_radius: echoed.blur,
        output_format: echoed.effective_format().unwrap_or(settings.output_format),
        resolution_scale_percent: settings.resolution_scale_percent,
    }
}

/// "적용된 설정" 표시용 요약
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedSettingsSummary {
    pub pixelization: String,
    pub quality: String,
    pub noise: String,
    pub blur: String,
    /// 목표 크기가 없으면 None (원본 유지)
    pub resolution: Option<String>,
    pub format: Option<String>,
}

impl AppliedSettingsSummary {
    pub fn from_request(echoed: &ProcessingRequest) -> Self {
        let resolution = match (echoed.target_width, echoed.target_height) {
            (Some(w), Some(h)) => Some(format!("{w}x{h}")),
            _ => None,
        };

        Self {
            pixelization: format!("{}x", echoed.pixelization),
            quality: format!("{}%", echoed.quality),
            noise: format!("{}%", echoed.noise),
            blur: echoed.blur.to_string(),
            resolution,
            format: echoed
                .effective_format()
                .map(|f| f.as_str().to_ascii_uppercase()),
        }
    }
}
