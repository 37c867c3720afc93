//! # zoada-network
//!
//! 이미지 처리 백엔드 HTTP 어댑터.
//! `ProcessingApi` 포트를 reqwest로 구현한다 (업로드, 처리, 다운로드).
//!
//! ## 사용 예시
//!
//! ```rust,ignore
//! use std::time::Duration;
//! use zoada_network::http_client::HttpProcessingClient;
//!
//! let client = HttpProcessingClient::new("https://api.example.com/api", Duration::from_secs(60))?;
//! let url = client.download_url("abc123");
//! ```

pub mod http_client;
