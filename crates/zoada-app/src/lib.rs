//! # zoada-app
//!
//! 세션 컨트롤러, 로컬 이미지 프로빙, 수동 처리 인자, 시스템 클립보드.
//! 바이너리(`zoada`)와 통합 테스트가 함께 사용한다.

pub mod clipboard;
pub mod controller;
pub mod overrides;
pub mod probe;
