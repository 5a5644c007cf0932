//! # autoshot-monitor
//!
//! 창 조회 어댑터.
//! 제목으로 최상위 창을 찾고, 창/클라이언트 사각형 조회와 크기 변경을 제공한다.
//! Windows는 Win32 API로 클라이언트 영역까지 구하고,
//! 그 외 플랫폼은 xcap 창 목록을 사용한다.

use std::sync::Arc;

use autoshot_core::ports::monitor::WindowLocator;

pub mod xcap_window;

#[cfg(target_os = "windows")]
pub mod windows;

/// 현재 플랫폼에 맞는 창 조회기 생성
pub fn create_platform_locator() -> Arc<dyn WindowLocator> {
    #[cfg(target_os = "windows")]
    {
        Arc::new(windows::Win32WindowLocator::new())
    }

    #[cfg(not(target_os = "windows"))]
    {
        Arc::new(xcap_window::XcapWindowLocator::new())
    }
}
