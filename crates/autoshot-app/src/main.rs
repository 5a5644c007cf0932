//! # autoshot-app
//!
//! AutoShot 바이너리 진입점.
//! 설정 조립, 어댑터 와이어링, 실행 모드(연속/한 번/픽셀 조회) 분기.

mod controller;
mod lifecycle;

use anyhow::{anyhow, bail, Context, Result};
use autoshot_core::config::AppConfig;
use autoshot_core::config_manager::ConfigManager;
use autoshot_core::ports::vision::ScreenCapture;
use autoshot_vision::capture::XcapScreenCapture;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::controller::{CaptureController, CycleOutcome};
use crate::lifecycle::LifecycleManager;

/// 창 하나를 주기적으로 캡처하고 거의 같은 스크린샷은 최신 것만 남긴다
#[derive(Parser, Debug)]
#[command(name = "autoshot")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// 캡처할 창 제목 (정확히 일치)
    #[arg(long, short = 't')]
    title: Option<String>,

    /// 창 너비 (픽셀)
    #[arg(long)]
    width: Option<u32>,

    /// 창 높이 (픽셀)
    #[arg(long)]
    height: Option<u32>,

    /// 캡처 간격 (초)
    #[arg(long, short = 'i')]
    interval: Option<u64>,

    /// 한 번만 캡처하고 종료
    #[arg(long)]
    once: bool,

    /// 스크린샷 좌표 (X, Y)의 실시간 화면 픽셀 색상 조회
    #[arg(long, num_args = 2, value_names = ["X", "Y"], allow_negative_numbers = true)]
    query_pixel: Option<Vec<i32>>,

    /// 창을 화면 좌표 (X, Y)로 이동
    #[arg(long, num_args = 2, value_names = ["X", "Y"], allow_negative_numbers = true)]
    position: Option<Vec<i32>>,

    /// 스크린샷 저장 디렉토리
    #[arg(long, short = 'o')]
    output_dir: Option<PathBuf>,

    /// 중복 판정 유사도 임계값 (0.0 ~ 1.0)
    #[arg(long)]
    threshold: Option<f64>,

    /// JSON 설정 파일 경로 (없으면 기본값으로 생성)
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, short = 'l', default_value = "info")]
    log_level: String,
}

/// `[X, Y]` 인자 쌍
fn pair(values: &[i32]) -> Result<(i32, i32)> {
    match values {
        [x, y] => Ok((*x, *y)),
        _ => bail!("좌표는 X Y 두 값이어야 합니다"),
    }
}

/// 설정 파일(선택) 위에 CLI 값을 덮어써서 최종 설정 조립
fn build_config(args: &Args) -> Result<AppConfig> {
    let mut config = match &args.config {
        Some(path) => ConfigManager::with_path(path.clone())
            .with_context(|| format!("설정 파일 로드 실패: {}", path.display()))?
            .get(),
        None => AppConfig::default_config(),
    };

    if let Some(title) = &args.title {
        config.capture.window_title = title.clone();
    }
    if let Some(width) = args.width {
        config.capture.width = width;
    }
    if let Some(height) = args.height {
        config.capture.height = height;
    }
    if let Some(interval) = args.interval {
        config.capture.interval_secs = interval;
    }
    if let Some(position) = &args.position {
        config.capture.position = Some(pair(position)?);
    }
    if let Some(dir) = &args.output_dir {
        config.storage.output_dir = dir.clone();
    }
    if let Some(threshold) = args.threshold {
        config.similarity.threshold = threshold;
    }

    config.validate().map_err(|e| anyhow!("설정 오류: {e}"))?;
    Ok(config)
}

/// 배너 출력
fn print_banner(config: &AppConfig) {
    println!();
    println!("  AutoShot v{}", env!("CARGO_PKG_VERSION"));
    println!("  대상 창   : {}", config.capture.window_title);
    println!(
        "  창 크기   : {}x{}",
        config.capture.width, config.capture.height
    );
    println!("  캡처 간격 : {}초", config.capture.interval_secs);
    println!("  저장 위치 : {}", config.storage.output_dir.display());
    println!("  종료      : Ctrl+C");
    println!();
}

async fn query_pixel(controller: &CaptureController, x: i32, y: i32) -> Result<()> {
    let pixel = controller
        .query_pixel(x, y)
        .await
        .map_err(|e| anyhow!("픽셀 조회 실패: {e}"))?;

    match pixel {
        Some(rgb) => {
            println!("Pixel at ({x}, {y}) in screenshot corresponds to screen pixel with {rgb}");
            Ok(())
        }
        None => bail!("Failed to read pixel at ({x}, {y})"),
    }
}

async fn run_once(controller: &CaptureController) -> Result<()> {
    let outcome = controller
        .run_once()
        .await
        .map_err(|e| anyhow!("캡처 실패: {e}"))?;

    match outcome {
        CycleOutcome::Kept { path } => println!("Saved {}", path.display()),
        CycleOutcome::Deduplicated { kept, removed } => println!(
            "Saved {} (removed duplicate {})",
            kept.display(),
            removed.display()
        ),
        CycleOutcome::Skipped => bail!("캡처 실패: 창을 찾을 수 없습니다"),
        CycleOutcome::Aborted => bail!("캡처 실패: 사이클이 중단되었습니다"),
    }
    Ok(())
}

async fn run_continuous(controller: &CaptureController) {
    let lifecycle = Arc::new(LifecycleManager::new());
    let signal_lifecycle = Arc::clone(&lifecycle);
    tokio::spawn(async move {
        signal_lifecycle.wait_for_signal().await;
    });

    controller.start();
    lifecycle.wait_for_shutdown().await;
    controller.stop().await;
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // 환경 변수는 참조하지 않고 --log-level만 사용
    let level = &args.log_level;
    let log_filter = format!(
        "autoshot={level},autoshot_app={level},autoshot_core={level},autoshot_monitor={level},autoshot_vision={level}"
    );
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&log_filter))
        .init();

    let config = build_config(&args)?;

    let locator = autoshot_monitor::create_platform_locator();
    let capture: Arc<dyn ScreenCapture> = Arc::new(XcapScreenCapture::new());
    let controller = CaptureController::new(&config, locator, capture);

    if let Some(values) = &args.query_pixel {
        let (x, y) = pair(values)?;
        return query_pixel(&controller, x, y).await;
    }

    if args.once {
        return run_once(&controller).await;
    }

    print_banner(&config);
    info!("AutoShot 시작: '{}'", config.capture.window_title);
    run_continuous(&controller).await;
    info!("AutoShot 종료");
    Ok(())
}
