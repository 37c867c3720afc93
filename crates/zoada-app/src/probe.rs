//! 로컬 이미지 프로빙.
//!
//! 픽셀 처리는 하지 않는다. 원본의 자연 크기를 읽고,
//! 클립보드 전달용으로 결과 이미지를 RGBA로 풀어내는 것만 한다.

use image::ImageReader;
use std::io::Cursor;
use zoada_core::error::CoreError;
use zoada_core::models::dimensions::ImageDimensions;
use zoada_core::ports::clipboard::ClipboardImage;

/// 헤더만 읽어 자연 크기 확인
pub fn probe_dimensions(bytes: &[u8]) -> Result<ImageDimensions, CoreError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| CoreError::Decode(format!("형식 판별 실패: {e}")))?;

    let (width, height) = reader
        .into_dimensions()
        .map_err(|e| CoreError::Decode(format!("크기 읽기 실패: {e}")))?;

    ImageDimensions::new(width, height)
}

/// 전체 디코딩 후 RGBA 변환 (JPEG 결과도 클립보드에는 RGBA로 넘긴다)
pub fn to_clipboard_image(bytes: &[u8]) -> Result<ClipboardImage, CoreError> {
    let decoded = image::load_from_memory(bytes)
        .map_err(|e| CoreError::Decode(format!("디코딩 실패: {e}")))?;
    let rgba = decoded.to_rgba8();

    Ok(ClipboardImage {
        width: rgba.width() as usize,
        height: rgba.height() as usize,
        rgba: rgba.into_raw(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, RgbImage};

    fn encode(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
        let img = RgbImage::new(width, height);
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, format).unwrap();
        buf.into_inner()
    }

    #[test]
    fn probes_png_dimensions() {
        let bytes = encode(320, 200, ImageFormat::Png);
        let dims = probe_dimensions(&bytes).unwrap();
        assert_eq!((dims.width, dims.height), (320, 200));
    }

    #[test]
    fn probes_jpeg_dimensions() {
        let bytes = encode(64, 48, ImageFormat::Jpeg);
        let dims = probe_dimensions(&bytes).unwrap();
        assert_eq!((dims.width, dims.height), (64, 48));
    }

    #[test]
    fn garbage_is_decode_error() {
        let result = probe_dimensions(b"definitely not an image, just text bytes");
        assert!(matches!(result, Err(CoreError::Decode(_))));
    }

    #[test]
    fn clipboard_image_is_rgba() {
        let bytes = encode(4, 3, ImageFormat::Png);
        let image = to_clipboard_image(&bytes).unwrap();
        assert_eq!((image.width, image.height), (4, 3));
        assert_eq!(image.rgba.len(), 4 * 3 * 4);
    }
}
