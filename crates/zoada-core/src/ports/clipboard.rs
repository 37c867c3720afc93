//! 클립보드 포트.
//!
//! 플랫폼 클립보드 구현은 앱 쪽 어댑터가 제공한다.

use crate::error::CoreError;

/// 클립보드에 넣을 RGBA 이미지
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardImage {
    pub width: usize,
    pub height: usize,
    /// RGBA 바이트 (`width * height * 4`)
    pub rgba: Vec<u8>,
}

/// 클립보드 쓰기
///
/// 미지원 또는 거부 시 `CoreError::Clipboard`.
pub trait ClipboardSink: Send + Sync {
    fn write_image(&self, image: ClipboardImage) -> Result<(), CoreError>;
}
