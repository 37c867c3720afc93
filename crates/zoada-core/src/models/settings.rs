//! 처리 설정 모델.
//!
//! 출력 형식, 프리셋 모드, 슬라이더 상태(`ProcessingSettings`)를 정의한다.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// 출력 이미지 형식
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    #[serde(alias = "jpg")]
    Jpeg,
    Png,
    Webp,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Jpeg => "jpeg",
            Self::Png => "png",
            Self::Webp => "webp",
        }
    }

    /// 저장 파일 확장자
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png => "png",
            Self::Webp => "webp",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Webp => "image/webp",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "jpeg" | "jpg" => Ok(Self::Jpeg),
            "png" => Ok(Self::Png),
            "webp" => Ok(Self::Webp),
            other => Err(CoreError::validation(
                "output_format",
                format!("지원하지 않는 형식: {other} (jpeg, png, webp)"),
            )),
        }
    }
}

/// 내장 강도 프리셋
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresetMode {
    /// 약한 열화
    Baixa,
    /// 중간 열화 (초기화 시 기본값)
    Media,
    /// 강한 열화
    Extrema,
}

impl FromStr for PresetMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "baixa" => Ok(Self::Baixa),
            "media" => Ok(Self::Media),
            "extrema" => Ok(Self::Extrema),
            other => Err(CoreError::validation(
                "preset",
                format!("알 수 없는 프리셋: {other} (baixa, media, extrema)"),
            )),
        }
    }
}

/// 처리 방식
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessingMode {
    /// 업로드 직후 고정 파라미터로 자동 처리
    #[default]
    Auto,
    /// 사용자 슬라이더/프리셋 값으로 처리
    Manual,
}

impl ProcessingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Manual => "manual",
        }
    }
}

impl FromStr for ProcessingMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "manual" => Ok(Self::Manual),
            other => Err(CoreError::validation(
                "mode",
                format!("알 수 없는 처리 방식: {other} (auto, manual)"),
            )),
        }
    }
}

/// 슬라이더 상태: 세션당 하나, 새 업로드나 초기화 시 리셋
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingSettings {
    /// 픽셀화 배율 (≥ 1)
    pub pixelization_factor: u32,
    /// 압축 품질 (0–100)
    pub quality_percent: u8,
    /// 노이즈 강도 (0–100)
    pub noise_percent: u8,
    /// 블러 반경 (≥ 0)
    pub blur_radius: u32,
    pub output_format: OutputFormat,
    /// 원본 대비 해상도 비율 (1–100)
    pub resolution_scale_percent: u8,
}

impl Default for ProcessingSettings {
    /// 기본값: `media` 프리셋 + jpeg + 원본 해상도
    fn default() -> Self {
        Self {
            pixelization_factor: 4,
            quality_percent: 50,
            noise_percent: 30,
            blur_radius: 2,
            output_format: OutputFormat::Jpeg,
            resolution_scale_percent: 100,
        }
    }
}

impl ProcessingSettings {
    /// 범위 검증: CLI처럼 UI 슬라이더 범위 밖 값이 들어올 수 있는 경로에서 사용
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.pixelization_factor < 1 {
            return Err(CoreError::validation("pixelization", "1 이상이어야 함"));
        }
        if self.quality_percent > 100 {
            return Err(CoreError::validation("quality", "0–100 범위를 벗어남"));
        }
        if self.noise_percent > 100 {
            return Err(CoreError::validation("noise", "0–100 범위를 벗어남"));
        }
        if self.resolution_scale_percent == 0 || self.resolution_scale_percent > 100 {
            return Err(CoreError::validation(
                "resolution_scale",
                "1–100 범위를 벗어남",
            ));
        }
        Ok(())
    }
}
