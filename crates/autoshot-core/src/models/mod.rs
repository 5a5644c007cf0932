//! AutoShot 도메인 모델.
//!
//! 화면 좌표, 창 핸들, 캡처 프레임 등 파이프라인 전 구간에서
//! 공유하는 데이터 구조체를 정의한다.

pub mod frame;
pub mod geometry;
