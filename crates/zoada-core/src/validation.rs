//! 업로드 전 파일 검증.
//!
//! 네트워크 호출 전에 형식과 크기를 확인한다. 형식은 선언된 content type
//! 또는 파일 확장자 중 하나만 맞으면 통과한다.

use std::path::Path;

use crate::config::UploadConfig;
use crate::error::CoreError;

/// 허용 content type
pub const ACCEPTED_CONTENT_TYPES: &[&str] = &["image/png", "image/jpeg", "image/jpg", "image/webp"];

/// 허용 확장자 (소문자, 점 포함)
pub const ACCEPTED_EXTENSIONS: &[&str] = &[".png", ".jpg", ".jpeg", ".webp"];

/// 파일명 확장자가 허용 목록에 있는지
fn has_accepted_extension(file_name: &str) -> bool {
    let lower = file_name.to_ascii_lowercase();
    ACCEPTED_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// 업로드 후보 검증
pub fn validate_upload(
    file_name: &str,
    content_type: Option<&str>,
    size: u64,
    limits: &UploadConfig,
) -> Result<(), CoreError> {
    let type_ok = content_type
        .map(|ct| ACCEPTED_CONTENT_TYPES.contains(&ct.to_ascii_lowercase().as_str()))
        .unwrap_or(false);

    if !type_ok && !has_accepted_extension(file_name) {
        return Err(CoreError::validation(
            "format",
            format!("허용되지 않는 형식: {file_name} ({})", content_type.unwrap_or("?")),
        ));
    }

    if size > limits.max_bytes {
        return Err(CoreError::validation(
            "size",
            format!("파일 크기 {size}B > 최대 {}B", limits.max_bytes),
        ));
    }

    if size < limits.min_bytes {
        return Err(CoreError::validation(
            "size_min",
            format!("파일 크기 {size}B < 최소 {}B (손상 또는 빈 파일)", limits.min_bytes),
        ));
    }

    Ok(())
}

/// 확장자로 content type 추정
pub fn content_type_for_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}
