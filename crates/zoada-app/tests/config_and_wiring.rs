//! 설정 + 의존성 와이어링 테스트.
//!
//! 설정 파일에서 읽은 값으로 클라이언트와 컨트롤러를 조립할 수 있는지 확인한다.

use std::sync::Arc;
use zoada_app::controller::SessionController;
use zoada_core::config::{ConfigKey, DEFAULT_API_URL};
use zoada_core::config_manager::ConfigManager;
use zoada_core::messages::Locale;
use zoada_core::models::settings::ProcessingMode;
use zoada_core::ports::processing_api::ProcessingApi;
use zoada_network::http_client::HttpProcessingClient;

#[test]
fn default_config_wires_production_client() {
    let dir = tempfile::tempdir().unwrap();
    let manager = ConfigManager::in_dir(dir.path()).unwrap();
    let config = manager.get();

    assert_eq!(config.server.base_url, DEFAULT_API_URL);
    assert_eq!(config.ui.locale, Locale::Pt);

    let client = HttpProcessingClient::new(&config.server.base_url, config.request_timeout()).unwrap();
    assert_eq!(
        client.download_url("p_1"),
        format!("{DEFAULT_API_URL}/download/p_1")
    );
}

#[test]
fn updated_config_survives_reload() {
    let dir = tempfile::tempdir().unwrap();
    let manager = ConfigManager::in_dir(dir.path()).unwrap();
    manager
        .update_with(|c| {
            c.set(ConfigKey::Server, "http://localhost:3000/api/")?;
            c.set(ConfigKey::Locale, "en")?;
            c.set(ConfigKey::StartMode, "manual")
        })
        .unwrap();

    let reopened = ConfigManager::in_dir(dir.path()).unwrap();
    let config = reopened.get();
    assert_eq!(config.server.base_url, "http://localhost:3000/api");
    assert_eq!(config.ui.locale, Locale::En);

    let api: Arc<dyn ProcessingApi> = Arc::new(
        HttpProcessingClient::new(&config.server.base_url, config.request_timeout()).unwrap(),
    );
    let controller = SessionController::new(api, config.ui.start_mode, config.upload.clone());
    assert_eq!(controller.state().mode(), ProcessingMode::Manual);
    assert!(controller.preview_url().is_none());
}
