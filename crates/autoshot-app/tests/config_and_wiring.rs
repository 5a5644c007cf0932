//! 설정 및 어댑터 와이어링 통합 테스트.
//!
//! AppConfig → 설정 파일 → 어댑터 생성 검증.

use autoshot_core::config::AppConfig;
use autoshot_core::config_manager::ConfigManager;
use autoshot_core::error::CoreError;
use autoshot_core::ports::monitor::WindowLocator;
use autoshot_core::ports::vision::ScreenCapture;
use autoshot_vision::capture::XcapScreenCapture;
use autoshot_vision::frame_dir::FrameDirectory;
use autoshot_vision::processor::FrameProcessor;
use autoshot_vision::similarity::SimilarityDetector;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

#[test]
fn defaults_match_documented_values() {
    let config = AppConfig::default_config();

    assert_eq!(config.capture.width, 800);
    assert_eq!(config.capture.height, 600);
    assert_eq!(config.capture_interval(), Duration::from_secs(2));
    assert_eq!(config.stop_grace(), Duration::from_secs(5));
    assert_eq!(config.storage.output_dir.to_str(), Some("chat_shot"));
    assert_eq!(config.storage.file_prefix, "screenshot");
    assert_eq!(config.storage.file_extension, ".png");
    assert!((config.similarity.threshold - 0.999).abs() < f64::EPSILON);
}

#[test]
fn default_config_needs_window_title() {
    let mut config = AppConfig::default_config();
    assert!(matches!(
        config.validate(),
        Err(CoreError::Validation { .. })
    ));

    config.capture.window_title = "Chat".to_string();
    assert!(config.validate().is_ok());
}

#[test]
fn config_file_roundtrip_through_manager() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("autoshot.json");

    let mut manager = ConfigManager::with_path(path.clone()).unwrap();
    let mut config = manager.get();
    config.capture.window_title = "Team Chat".to_string();
    config.similarity.threshold = 0.95;
    manager.update(config).unwrap();

    let reloaded = ConfigManager::with_path(path).unwrap().get();
    assert_eq!(reloaded.capture.window_title, "Team Chat");
    assert!((reloaded.similarity.threshold - 0.95).abs() < f64::EPSILON);
}

#[test]
fn adapters_instantiate_from_config() {
    let dir = TempDir::new().unwrap();
    let mut config = AppConfig::default_config();
    config.storage.output_dir = dir.path().join("out");

    let _locator: Arc<dyn WindowLocator> = autoshot_monitor::create_platform_locator();
    let _capture: Arc<dyn ScreenCapture> = Arc::new(XcapScreenCapture::new());

    let processor = FrameProcessor::from_config(&config.storage);
    assert_eq!(processor.output_dir(), config.storage.output_dir.as_path());

    let frames = FrameDirectory::new(&config.storage.output_dir, &config.storage.file_extension);
    assert_eq!(frames.count_frames().unwrap(), 0);

    let detector = SimilarityDetector::new(config.similarity.threshold);
    assert!((detector.threshold() - 0.999).abs() < f64::EPSILON);
}
