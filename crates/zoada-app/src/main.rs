//! # zoada
//!
//! ZOADA 이미지 열화 클라이언트 바이너리 진입점.
//! 설정 로드, 로깅 초기화, 의존성 조립 후 서브커맨드를 실행한다.

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use zoada_app::clipboard::SystemClipboard;
use zoada_app::controller::{download_file_name, SessionController};
use zoada_app::overrides::ManualOverrides;
use zoada_core::config::{AppConfig, ConfigKey};
use zoada_core::config_manager::ConfigManager;
use zoada_core::consent::{ConsentManager, ConsentStatus, CONSENT_FILE_NAME};
use zoada_core::error::CoreError;
use zoada_core::messages::{Locale, Message};
use zoada_core::models::dimensions::ImageDimensions;
use zoada_core::models::settings::{OutputFormat, ProcessingMode};
use zoada_core::ports::processing_api::ProcessingApi;
use zoada_core::reconciler;
use zoada_core::session::ProcessedImage;
use zoada_network::http_client::HttpProcessingClient;

/// ZOADA: 이미지 화질을 일부러 떨어뜨리는 클라이언트
#[derive(Parser, Debug)]
#[command(name = "zoada")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// 백엔드 API URL 지정 (기본: 설정 파일 값)
    #[arg(long, short = 's', global = true)]
    server: Option<String>,

    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, short = 'l', default_value = "info", global = true)]
    log_level: String,

    /// 메시지 언어 (pt, en)
    #[arg(long, global = true)]
    locale: Option<Locale>,

    /// 설정 파일 경로 (기본: 플랫폼 설정 디렉토리)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

/// 처리 결과를 어디로 보낼지
#[derive(clap::Args, Debug, Clone, Default)]
struct OutputArgs {
    /// 결과 저장 디렉토리
    #[arg(long)]
    out: Option<PathBuf>,
    /// 결과를 시스템 클립보드로 복사
    #[arg(long)]
    copy: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 설정의 시작 모드(start-mode)로 처리. 수동 인자가 있으면 그 값으로 재처리
    Run {
        input: PathBuf,
        #[command(flatten)]
        overrides: ManualOverrides,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// 업로드 후 자동 처리 (고정 파라미터 + 리사이즈)
    Auto {
        input: PathBuf,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// 수동 설정으로 처리
    Process {
        input: PathBuf,
        #[command(flatten)]
        overrides: ManualOverrides,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// 처리된 파일 ID로 결과 저장
    Download {
        id: String,
        #[arg(long, default_value = ".")]
        out: PathBuf,
        /// 저장 파일 확장자 결정용 형식
        #[arg(long, default_value = "jpeg")]
        format: OutputFormat,
    },
    /// 다운로드 URL 출력
    Url { id: String },
    /// 자동 리사이즈 계획 출력 (오프라인)
    Plan { width: u32, height: u32 },
    /// 쿠키 동의 관리
    Consent {
        #[command(subcommand)]
        action: ConsentAction,
    },
    /// 설정 파일 조회/변경
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum ConsentAction {
    Accept,
    Status,
    Revoke,
}

#[derive(Subcommand, Debug, Clone)]
enum ConfigAction {
    /// 저장된 값 전체 출력
    Show,
    /// 키 하나 출력 (server, timeout-ms, locale, start-mode)
    Get { key: ConfigKey },
    /// 키 하나 저장
    Set { key: ConfigKey, value: String },
    /// 설정 파일 경로 출력
    Path,
}

/// 설정 디렉토리 결정 (CLI 인자 또는 플랫폼별 기본 경로)
fn resolve_config_dir(config_arg: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = config_arg {
        return Ok(path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(".")));
    }

    ProjectDirs::from("com", "zoada", "zoada")
        .map(|p| p.config_dir().to_path_buf())
        .ok_or_else(|| anyhow!("설정 디렉토리를 찾을 수 없음"))
}

fn open_config(args: &Args, config_dir: &Path) -> Result<ConfigManager> {
    match &args.config {
        Some(path) => ConfigManager::open(path.clone()),
        None => ConfigManager::in_dir(config_dir),
    }
    .context("설정 로드 실패")
}

/// 저장된 설정에 CLI 인자 덮어쓰기 (파일에는 반영하지 않음)
fn effective_config(args: &Args, manager: &ConfigManager) -> AppConfig {
    let mut config = manager.get();
    if let Some(ref server_url) = args.server {
        config.server.base_url = server_url.clone();
    }
    if let Some(locale) = args.locale {
        config.ui.locale = locale;
    }
    config
}

fn print_result(controller: &SessionController, processed: &ProcessedImage) {
    println!(
        "{}x{} • {} KB",
        processed.info.width, processed.info.height, processed.info.size_kb
    );
    if let Some(summary) = controller.state().applied_summary() {
        println!("  pixelization: {}", summary.pixelization);
        println!("  quality:      {}", summary.quality);
        println!("  noise:        {}", summary.noise);
        println!("  blur:         {}", summary.blur);
        println!(
            "  resolution:   {}",
            summary.resolution.as_deref().unwrap_or("original")
        );
        if let Some(format) = summary.format {
            println!("  format:       {format}");
        }
    }
    if let Some(url) = controller.preview_url() {
        println!("{url}");
    }
}

async fn finish(
    controller: &SessionController,
    output: &OutputArgs,
    locale: Locale,
) -> Result<(), CoreError> {
    if let Some(dir) = output.out.as_deref() {
        let path = controller.download_to(dir).await?;
        println!("{}", path.display());
    }
    if output.copy {
        controller
            .copy_to_clipboard(&SystemClipboard::new())
            .await?;
        println!("{}", locale.text(Message::CopySucceeded));
    }
    Ok(())
}

/// 업로드 → (자동 처리) → 수동 인자가 있으면 재처리 → 출력
async fn process_session(
    api: Arc<dyn ProcessingApi>,
    config: &AppConfig,
    mode: ProcessingMode,
    input: &Path,
    overrides: &ManualOverrides,
    output: &OutputArgs,
) -> Result<(), CoreError> {
    let locale = config.ui.locale;
    // 업로드 전에 인자부터 검증
    overrides.check()?;

    let mut controller = SessionController::new(api, mode, config.upload.clone());
    eprintln!("{}", locale.text(Message::Uploading));
    let auto = controller.load_file(input).await?;

    let processed = match auto {
        Some(processed) if overrides.is_empty() => processed,
        auto => {
            if let Some(first) = auto {
                print_result(&controller, &first);
            }
            overrides.apply(controller.state_mut())?;
            eprintln!("{}", locale.text(Message::Processing));
            controller.process_manual().await?
        }
    };

    print_result(&controller, &processed);
    finish(&controller, output, locale).await
}

fn run_config(action: ConfigAction, manager: &ConfigManager) -> Result<(), CoreError> {
    match action {
        ConfigAction::Show => {
            let stored = manager.get();
            for key in ConfigKey::ALL {
                println!("{} = {}", key.as_str(), stored.get(key));
            }
        }
        ConfigAction::Get { key } => println!("{}", manager.get().get(key)),
        ConfigAction::Set { key, value } => {
            let updated = manager.update_with(|c| c.set(key, &value))?;
            println!("{} = {}", key.as_str(), updated.get(key));
        }
        ConfigAction::Path => println!("{}", manager.path().display()),
    }
    Ok(())
}

fn run_consent(action: ConsentAction, config_dir: &Path, locale: Locale) -> Result<(), CoreError> {
    let mut consent = ConsentManager::new(config_dir.join(CONSENT_FILE_NAME));
    match action {
        ConsentAction::Accept => {
            let record = consent.accept()?;
            println!("accepted {} (expires {})", record.granted_at, record.expires_at);
        }
        ConsentAction::Status => match (consent.status(), consent.record()) {
            (ConsentStatus::Accepted, Some(record)) => {
                println!("accepted {} (expires {})", record.granted_at, record.expires_at)
            }
            _ => println!("{}", locale.text(Message::ConsentNotice)),
        },
        ConsentAction::Revoke => {
            consent.revoke()?;
            println!("revoked");
        }
    }
    Ok(())
}

async fn run(
    command: Command,
    manager: ConfigManager,
    config: AppConfig,
    config_dir: PathBuf,
) -> Result<(), CoreError> {
    let locale = config.ui.locale;

    // 오프라인 명령
    let command = match command {
        Command::Plan { width, height } => {
            let plan = reconciler::compute_auto_resize_plan(ImageDimensions::new(width, height)?);
            println!(
                "{}x{} (resize: {})",
                plan.target_width, plan.target_height, plan.did_resize
            );
            return Ok(());
        }
        Command::Consent { action } => return run_consent(action, &config_dir, locale),
        Command::Config { action } => return run_config(action, &manager),
        online => online,
    };

    if ConsentManager::new(config_dir.join(CONSENT_FILE_NAME)).status() == ConsentStatus::NotGranted
    {
        eprintln!("{}", locale.text(Message::ConsentNotice));
    }

    info!("서버: {}", config.server.base_url);
    let client = Arc::new(HttpProcessingClient::new(
        &config.server.base_url,
        config.request_timeout(),
    )?);
    let api: Arc<dyn ProcessingApi> = client;

    match command {
        Command::Run {
            input,
            overrides,
            output,
        } => {
            let mode = config.ui.start_mode;
            info!("시작 모드: {}", mode.as_str());
            process_session(api, &config, mode, &input, &overrides, &output).await?;
        }
        Command::Auto { input, output } => {
            let overrides = ManualOverrides::default();
            process_session(api, &config, ProcessingMode::Auto, &input, &overrides, &output)
                .await?;
        }
        Command::Process {
            input,
            overrides,
            output,
        } => {
            process_session(api, &config, ProcessingMode::Manual, &input, &overrides, &output)
                .await?;
        }
        Command::Download { id, out, format } => {
            let bytes = api.download(&id).await?;
            tokio::fs::create_dir_all(&out).await?;
            let path = out.join(download_file_name(
                format,
                chrono::Utc::now().timestamp_millis(),
            ));
            tokio::fs::write(&path, &bytes).await?;
            println!("{}", path.display());
        }
        Command::Url { id } => {
            println!("{}", api.download_url(&id));
        }
        Command::Plan { .. } | Command::Consent { .. } | Command::Config { .. } => {}
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // tracing 초기화
    let log_filter = format!(
        "zoada={},zoada_app={},zoada_core={},zoada_network={}",
        args.log_level, args.log_level, args.log_level, args.log_level
    );
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_filter)),
        )
        .init();

    let config_dir = resolve_config_dir(args.config.as_deref())?;
    let manager = open_config(&args, &config_dir)?;
    let config = effective_config(&args, &manager);
    let locale = config.ui.locale;

    if let Err(e) = run(args.command, manager, config, config_dir).await {
        error!("실행 실패: {e}");
        eprintln!("{}", e.user_message(locale));
        std::process::exit(1);
    }

    Ok(())
}
