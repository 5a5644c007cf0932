//! 포트 인터페이스 (trait).
//!
//! Hexagonal Architecture의 포트 레이어.
//! 각 어댑터 crate가 이 trait들을 구현하며,
//! `autoshot-app`에서 `Arc<dyn T>`로 와이어링한다.
//!
//! 창 조회와 화면 캡처는 모두 블로킹 OS 호출이므로 동기 trait으로 정의하고,
//! 호출 측이 `spawn_blocking` 안에서 실행한다.

pub mod monitor;
pub mod vision;
