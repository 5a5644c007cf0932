//! 창 조회 포트.
//!
//! 구현: `autoshot-monitor` crate (Win32 FFI, xcap)

use crate::error::CoreError;
use crate::models::geometry::{Rect, WindowHandle};

/// 창 제목 → 핸들 조회 및 좌표/크기 제어.
///
/// 상태를 갖지 않는 capability 인터페이스. 반환된 [`WindowHandle`]은
/// 다음 조회 전까지만 유효하며, 구현체는 네이티브 핸들을 캐싱하지 않는다.
pub trait WindowLocator: Send + Sync {
    /// 최상위 창 중 제목이 정확히(대소문자 구분) 일치하는 창 조회.
    ///
    /// 없으면 `CoreError::WindowNotFound` (재시도 가능).
    fn locate(&self, title: &str) -> Result<WindowHandle, CoreError>;

    /// 장식(제목 표시줄, 테두리) 포함 창 사각형
    fn window_rect(&self, handle: WindowHandle) -> Result<Rect, CoreError>;

    /// 콘텐츠 영역 사각형 (화면 좌표).
    ///
    /// 창이 사라진 핸들은 과거 좌표를 돌려주지 않고 `CoreError::LookupFailed`.
    fn client_rect(&self, handle: WindowHandle) -> Result<Rect, CoreError>;

    /// 위치는 유지한 채 크기 변경. OS가 요청을 수락했는지 반환.
    fn resize(&self, handle: WindowHandle, width: u32, height: u32) -> bool;

    /// 위치 이동 + 크기 변경. 미지원 플랫폼은 `false`.
    fn move_to(&self, handle: WindowHandle, x: i32, y: i32, width: u32, height: u32) -> bool {
        let _ = (handle, x, y, width, height);
        false
    }
}
