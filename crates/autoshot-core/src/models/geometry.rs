//! 화면 좌표 모델.
//!
//! 창 사각형(장식 포함)과 클라이언트 사각형(콘텐츠 영역)은 모두
//! 화면 픽셀 좌표계의 `Rect`로 표현된다.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CoreError;

/// 화면 좌표 사각형 `(left, top, right, bottom)`.
///
/// 불변식: `right >= left`, `bottom >= top`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    /// 모서리 좌표로 사각형 생성 (불변식 검증)
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Result<Self, CoreError> {
        if right < left || bottom < top {
            return Err(CoreError::Validation {
                field: "rect".to_string(),
                message: format!("뒤집힌 사각형: ({left}, {top}, {right}, {bottom})"),
            });
        }
        Ok(Self {
            left,
            top,
            right,
            bottom,
        })
    }

    /// 원점 + 크기로 사각형 생성
    pub fn from_origin_size(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            left: x,
            top: y,
            right: x.saturating_add(width.min(i32::MAX as u32) as i32),
            bottom: y.saturating_add(height.min(i32::MAX as u32) as i32),
        }
    }

    /// 너비 (픽셀)
    pub fn width(&self) -> u32 {
        self.right.abs_diff(self.left)
    }

    /// 높이 (픽셀)
    pub fn height(&self) -> u32 {
        self.bottom.abs_diff(self.top)
    }

    /// 넓이가 0인 사각형
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// 스크린샷 좌표 → 화면 좌표 (좌상단 오프셋 가산)
    pub fn offset(&self, x: i32, y: i32) -> (i32, i32) {
        (self.left.saturating_add(x), self.top.saturating_add(y))
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{} at ({}, {})",
            self.width(),
            self.height(),
            self.left,
            self.top
        )
    }
}

/// 조회된 창의 불투명 식별자.
///
/// 한 번의 조회 결과로만 유효하다. 사이클마다 제목으로 다시 조회하며
/// 사이클을 넘어 보관하지 않는다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowHandle(u64);

impl WindowHandle {
    /// 플랫폼 원시 값으로 핸들 생성
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// 플랫폼 원시 값
    pub fn as_raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for WindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// 화면 픽셀 색상
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RGB({}, {}, {})", self.r, self.g, self.b)
    }
}
