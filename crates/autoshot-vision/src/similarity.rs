//! 지각 해시 기반 중복 판정.
//!
//! 64비트 평균 해시(aHash, image_hasher): 그레이스케일 → 8x8 축소 → 평균 밝기 대비 이진화.
//! 유사도는 `max(0, 1 - hamming / 64)`.
//!
//! 새 프레임은 수정 시각이 가장 늦은 직전 프레임 **하나**와만 비교한다.
//! 스크롤되는 채팅 로그처럼 화면이 대체로 한 방향으로 진행한다는 가정이며,
//! 과거 전체와의 쌍별 비교는 하지 않는다. 지문은 저장하지 않고 비교할 때마다
//! 저장된 이미지에서 다시 계산한다.

use autoshot_core::error::CoreError;
use image::imageops::FilterType;
use image::DynamicImage;
use image_hasher::{HashAlg, HasherConfig};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::frame_dir::FrameDirectory;

/// 해시 격자 한 변 (8x8 = 64비트)
const HASH_SIDE: u32 = 8;

/// 해시 비트 수
pub const HASH_BITS: u32 = HASH_SIDE * HASH_SIDE;

/// 기본 중복 임계값 (거의 동일한 경우만)
pub const DEFAULT_THRESHOLD: f64 = 0.999;

/// 64비트 지각 지문
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint(u64);

impl Fingerprint {
    /// 원시 비트 패턴으로 생성
    pub fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    /// 원시 비트 패턴
    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// 서로 다른 비트 수
    pub fn hamming_distance(&self, other: &Fingerprint) -> u32 {
        (self.0 ^ other.0).count_ones()
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// 유사도 점수 (0.0 ~ 1.0)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct SimilarityScore(f64);

impl SimilarityScore {
    /// 점수 값
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for SimilarityScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}", self.0)
    }
}

/// 이미지의 64비트 평균 해시 계산 (image_hasher `HashAlg::Mean`, 8x8, Lanczos3).
///
/// 해시 바이트를 빅엔디언으로 묶어 행 우선 첫 칸이 최상위 비트가 되게 한다.
/// 빈 이미지(너비 또는 높이 0)는 모든 비트 0.
pub fn fingerprint(image: &DynamicImage) -> Fingerprint {
    if image.width() == 0 || image.height() == 0 {
        return Fingerprint(0);
    }

    let gray = DynamicImage::ImageLuma8(image.to_luma8());
    let hasher = HasherConfig::new()
        .hash_alg(HashAlg::Mean)
        .hash_size(HASH_SIDE, HASH_SIDE)
        .resize_filter(FilterType::Lanczos3)
        .to_hasher();
    let hash = hasher.hash_image(&gray);

    let bits = hash
        .as_bytes()
        .iter()
        .fold(0u64, |acc, &byte| (acc << 8) | u64::from(byte));
    Fingerprint(bits)
}

/// 저장된 이미지 파일의 지문 계산
pub fn fingerprint_file(path: &Path) -> Result<Fingerprint, CoreError> {
    let image = image::open(path).map_err(|e| CoreError::DecodeFailed {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    Ok(fingerprint(&image))
}

/// 두 지문의 유사도: `max(0, 1 - hamming / 64)`
pub fn similarity(a: Fingerprint, b: Fingerprint) -> SimilarityScore {
    let distance = a.hamming_distance(&b) as f64;
    SimilarityScore((1.0 - distance / HASH_BITS as f64).max(0.0))
}

/// 중복 판정기
#[derive(Debug, Clone)]
pub struct SimilarityDetector {
    threshold: f64,
}

impl SimilarityDetector {
    /// 임계값 지정 생성 (0.0 ~ 1.0으로 보정)
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
        }
    }

    /// 임계값
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// 두 이미지가 임계값 이상으로 유사한지
    pub fn compare_images(&self, a: &DynamicImage, b: &DynamicImage) -> bool {
        similarity(fingerprint(a), fingerprint(b)).value() >= self.threshold
    }

    /// 새 프레임이 직전 프레임의 중복인지 판정해 직전 프레임 경로 반환.
    ///
    /// 후보는 `new_frame`을 제외한 프레임 중 수정 시각이 가장 늦은 하나뿐이다.
    /// 후보를 열 수 없으면 중복 없음으로 처리한다. `new_frame` 자체는 절대
    /// 반환하지 않는다.
    pub fn find_duplicate_of(&self, new_frame: &Path, frames: &FrameDirectory) -> Option<PathBuf> {
        let candidate = match frames.latest_frame(new_frame) {
            Ok(Some(path)) => path,
            Ok(None) => return None,
            Err(e) => {
                warn!("프레임 목록 조회 실패 (중복 검사 생략): {e}");
                return None;
            }
        };

        let new_fp = match fingerprint_file(new_frame) {
            Ok(fp) => fp,
            Err(e) => {
                warn!("새 프레임 지문 계산 실패 (중복 검사 생략): {e}");
                return None;
            }
        };

        let candidate_fp = match fingerprint_file(&candidate) {
            Ok(fp) => fp,
            Err(e) => {
                debug!("후보 프레임 건너뜀: {e}");
                return None;
            }
        };

        let score = similarity(new_fp, candidate_fp);
        debug!(
            "유사도 {score} (임계값 {}): {} ↔ {} [{new_fp} / {candidate_fp}]",
            self.threshold,
            new_frame.display(),
            candidate.display()
        );

        (score.value() >= self.threshold).then_some(candidate)
    }
}

impl Default for SimilarityDetector {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}
