//! # autoshot-vision
//!
//! 캡처 프레임 처리 크레이트.
//! 화면 영역 캡처, 상단 절반 잘라내기, 고유 파일명 저장,
//! 평균 해시 기반 직전 프레임 중복 판정을 담당한다.

pub mod capture;
pub mod frame_dir;
pub mod processor;
pub mod similarity;
