//! 시스템 클립보드 어댑터 (arboard).
//!
//! Linux에서는 프로세스가 끝난 뒤에도 이미지가 남으려면 클립보드 매니저가 필요하다.

use std::borrow::Cow;
use tracing::debug;
use zoada_core::error::CoreError;
use zoada_core::ports::clipboard::{ClipboardImage, ClipboardSink};

/// OS 클립보드: `ClipboardSink` 포트 구현
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl SystemClipboard {
    pub fn new() -> Self {
        Self
    }
}

/// 포트의 RGBA 버퍼를 arboard 형식으로 변환
fn to_image_data(image: ClipboardImage) -> Result<arboard::ImageData<'static>, CoreError> {
    let expected = image.width * image.height * 4;
    if image.rgba.len() != expected {
        return Err(CoreError::Clipboard(format!(
            "RGBA 길이 불일치: {} != {}x{}x4",
            image.rgba.len(),
            image.width,
            image.height
        )));
    }

    Ok(arboard::ImageData {
        width: image.width,
        height: image.height,
        bytes: Cow::Owned(image.rgba),
    })
}

impl ClipboardSink for SystemClipboard {
    fn write_image(&self, image: ClipboardImage) -> Result<(), CoreError> {
        let data = to_image_data(image)?;
        debug!("클립보드 쓰기: {}x{}", data.width, data.height);

        let mut clipboard = arboard::Clipboard::new()
            .map_err(|e| CoreError::Clipboard(format!("클립보드 열기 실패: {e}")))?;
        clipboard
            .set_image(data)
            .map_err(|e| CoreError::Clipboard(format!("이미지 쓰기 실패: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_matching_buffer() {
        let data = to_image_data(ClipboardImage {
            width: 3,
            height: 2,
            rgba: vec![7u8; 3 * 2 * 4],
        })
        .unwrap();
        assert_eq!((data.width, data.height), (3, 2));
        assert_eq!(data.bytes.len(), 24);
    }

    #[test]
    fn rejects_short_buffer() {
        let result = to_image_data(ClipboardImage {
            width: 3,
            height: 2,
            rgba: vec![0u8; 10],
        });
        assert!(matches!(result, Err(CoreError::Clipboard(_))));
    }
}
