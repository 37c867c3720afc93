//! 수동 처리 인자.
//!
//! CLI 옵션을 슬라이더 조작과 같은 순서로 세션 상태에 적용한다:
//! 프리셋 먼저, 그다음 개별 값.

use clap::Args;
use zoada_core::error::CoreError;
use zoada_core::models::settings::{OutputFormat, PresetMode, ProcessingMode};
use zoada_core::session::SessionState;

#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct ManualOverrides {
    /// 강도 프리셋 (baixa, media, extrema)
    #[arg(long)]
    pub preset: Option<PresetMode>,
    /// 픽셀화 배율 (≥ 1)
    #[arg(long)]
    pub pixelization: Option<u32>,
    /// 압축 품질 (0–100)
    #[arg(long)]
    pub quality: Option<u8>,
    /// 노이즈 강도 (0–100)
    #[arg(long)]
    pub noise: Option<u8>,
    /// 블러 반경
    #[arg(long)]
    pub blur: Option<u32>,
    /// 출력 형식 (jpeg, png, webp)
    #[arg(long)]
    pub format: Option<OutputFormat>,
    /// 원본 대비 해상도 비율 (1–100)
    #[arg(long)]
    pub scale: Option<u8>,
}

impl ManualOverrides {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// 세션 설정에 적용
    ///
    /// 결과가 범위를 벗어나면 에러를 돌려주고 상태는 바꾸지 않는다.
    pub fn apply(&self, state: &mut SessionState) -> Result<(), CoreError> {
        let mut next = state.clone();

        if let Some(preset) = self.preset {
            next.select_preset(preset);
        }
        if let Some(v) = self.pixelization {
            next.set_pixelization(v);
        }
        if let Some(v) = self.quality {
            next.set_quality(v);
        }
        if let Some(v) = self.noise {
            next.set_noise(v);
        }
        if let Some(v) = self.blur {
            next.set_blur(v);
        }
        if let Some(v) = self.format {
            next.set_format(v);
        }
        if let Some(v) = self.scale {
            next.set_resolution_scale(v);
        }

        next.settings().validate()?;
        *state = next;
        Ok(())
    }

    /// 업로드 전에 인자만 검증
    pub fn check(&self) -> Result<(), CoreError> {
        self.apply(&mut SessionState::new(ProcessingMode::Manual))
    }
}
