//! ZOADA 도메인 모델.
//!
//! 백엔드와 주고받는 요청/응답과 세션에서 다루는 값 타입을 정의한다.
//! 와이어 구조체는 `serde` Serialize/Deserialize를 구현한다 (camelCase).

pub mod dimensions;
pub mod request;
pub mod settings;
