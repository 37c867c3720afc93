//! 이미지 크기 모델.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CoreError;

/// 업로드된 원본의 자연 픽셀 크기
///
/// 업로드 후 한 번 얻으며 해당 파일이 유지되는 동안 변하지 않는다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

impl ImageDimensions {
    /// 크기 생성: 0인 변은 거부
    pub fn new(width: u32, height: u32) -> Result<Self, CoreError> {
        if width == 0 || height == 0 {
            return Err(CoreError::validation(
                "dimensions",
                format!("이미지 크기가 0: {width}x{height}"),
            ));
        }
        Ok(Self { width, height })
    }

    /// 긴 변 길이
    pub fn max_side(&self) -> u32 {
        self.width.max(self.height)
    }
}

impl fmt::Display for ImageDimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
