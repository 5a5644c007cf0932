//! # autoshot-core
//!
//! AutoShot 도메인 모델, 포트(trait) 정의, 에러 타입.
//! 모든 크레이트가 공유하는 핵심 타입과 인터페이스를 제공한다.
//!
//! ## 구조
//!
//! - [`models`]: 좌표/프레임 데이터 구조체
//! - [`ports`]: Hexagonal Architecture 포트 인터페이스 (창 조회, 화면 캡처)
//! - [`error`]: 핵심 에러 타입 (thiserror)
//! - [`config`]: 애플리케이션 설정 구조체
//! - [`config_manager`]: 설정 파일 관리 (로드/저장)

pub mod config;
pub mod config_manager;
pub mod error;
pub mod models;
pub mod ports;

#[cfg(test)]
mod tests {
    use crate::models::geometry::Rect;

    #[test]
    fn config_defaults() {
        let config = crate::config::AppConfig::default_config();
        assert_eq!(config.capture.interval_secs, 2);
        assert_eq!(config.capture.stop_grace_secs, 5);
        assert_eq!(config.storage.output_dir.to_str(), Some("chat_shot"));
        assert_eq!(config.storage.file_prefix, "screenshot");
        assert_eq!(config.storage.file_extension, ".png");
        assert!((config.similarity.threshold - 0.999).abs() < f64::EPSILON);
    }

    #[test]
    fn rect_serde_roundtrip() {
        let rect = Rect::new(10, 20, 110, 220).unwrap();
        let json = serde_json::to_string(&rect).unwrap();
        let back: Rect = serde_json::from_str(&json).unwrap();
        assert_eq!(back, rect);
    }
}
