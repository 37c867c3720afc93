//! 백엔드 요청/응답 모델.
//!
//! `POST /upload`, `POST /process` 와이어 형식 (camelCase JSON).

use serde::{Deserialize, Deserializer, Serialize};

use super::settings::OutputFormat;

/// 정규화된 처리 요청
///
/// `target_width`/`target_height`는 리사이즈가 결정된 경우에만 존재한다.
/// 없으면 원본 크기 유지.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingRequest {
    pub file_id: String,
    pub pixelization: u32,
    pub quality: u8,
    pub noise: u8,
    pub blur: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_format: Option<OutputFormat>,
    /// 구 응답 형식의 `format` 필드 (에코 병합 호환용, 전송 시 생략)
    #[serde(
        default,
        rename = "format",
        skip_serializing_if = "Option::is_none"
    )]
    pub legacy_format: Option<OutputFormat>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_height: Option<u32>,
}

impl ProcessingRequest {
    /// 적용된 형식: `outputFormat` 우선, 없으면 `format`
    pub fn effective_format(&self) -> Option<OutputFormat> {
        self.output_format.or(self.legacy_format)
    }
}

/// 업로드 응답
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub file_id: String,
}

/// 처리 결과 정보
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedInfo {
    pub width: u32,
    pub height: u32,
    /// 결과 파일 크기 (KB): 서버는 숫자 또는 문자열로 보낸다
    #[serde(rename = "sizeKB", deserialize_with = "number_or_string")]
    pub size_kb: f64,
}

/// 처리 응답
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessResponse {
    pub processed_file_id: String,
    pub info: ProcessedInfo,
}

fn number_or_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_request() -> ProcessingRequest {
        ProcessingRequest {
            file_id: "abc".to_string(),
            pixelization: 2,
            quality: 75,
            noise: 10,
            blur: 0,
            output_format: Some(OutputFormat::Png),
            legacy_format: None,
            target_width: None,
            target_height: None,
        }
    }

    #[test]
    fn absent_targets_are_omitted_from_json() {
        let json = serde_json::to_value(base_request()).unwrap();
        let obj = json.as_object().unwrap();
        assert!(!obj.contains_key("targetWidth"));
        assert!(!obj.contains_key("targetHeight"));
        assert!(!obj.contains_key("format"));
        assert_eq!(obj["outputFormat"], "png");
    }

    #[test]
    fn legacy_format_echo_is_accepted() {
        let json = r#"{"fileId":"x","pixelization":4,"quality":20,"noise":10,"blur":2,"format":"webp"}"#;
        let req: ProcessingRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.output_format, None);
        assert_eq!(req.effective_format(), Some(OutputFormat::Webp));
    }

    #[test]
    fn output_format_wins_over_legacy() {
        let json = r#"{"fileId":"x","pixelization":4,"quality":20,"noise":10,"blur":2,"outputFormat":"png","format":"jpeg"}"#;
        let req: ProcessingRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.effective_format(), Some(OutputFormat::Png));
    }

    #[test]
    fn process_response_accepts_string_size() {
        let json = r#"{"processedFileId":"p1","info":{"width":500,"height":250,"sizeKB":"12.34"}}"#;
        let resp: ProcessResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.processed_file_id, "p1");
        assert_eq!(resp.info.width, 500);
        assert!((resp.info.size_kb - 12.34).abs() < f64::EPSILON);

        let json = r#"{"processedFileId":"p2","info":{"width":1,"height":1,"sizeKB":3.5}}"#;
        let resp: ProcessResponse = serde_json::from_str(json).unwrap();
        assert!((resp.info.size_kb - 3.5).abs() < f64::EPSILON);
    }
}
