//! Runtime SIMD capability detection and lane widths
//!
//! Kernels never branch per element on the SIMD level; the detected vector
//! width only sizes the data-parallel batches of the unit and step paths
//! (the loop descriptor's `simd_bound` / `simd_step`).

use crate::dtype::Element;
use std::sync::OnceLock;

/// SIMD capability level detected at runtime
///
/// Ordered: higher values indicate wider vector registers.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum SimdLevel {
    /// Scalar fallback (no SIMD)
    Scalar = 0,
    /// NEON baseline for AArch64 (128-bit vectors)
    Neon = 1,
    /// AVX2 with FMA support (256-bit vectors)
    Avx2Fma = 2,
    /// AVX-512F (512-bit vectors)
    Avx512 = 3,
}

impl SimdLevel {
    /// Vector register width in bytes (1 for the scalar fallback)
    #[inline]
    pub const fn width_bytes(self) -> usize {
        match self {
            Self::Avx512 => 64,
            Self::Avx2Fma => 32,
            Self::Neon => 16,
            Self::Scalar => 1,
        }
    }

    /// Name of this level as a string
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Avx512 => "AVX-512",
            Self::Avx2Fma => "AVX2+FMA",
            Self::Neon => "NEON",
            Self::Scalar => "Scalar",
        }
    }
}

impl std::fmt::Display for SimdLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cached SIMD level detection
static SIMD_LEVEL: OnceLock<SimdLevel> = OnceLock::new();

/// Detect the best available SIMD level for the current CPU
///
/// The first call performs detection; subsequent calls return the cached
/// result.
#[inline]
pub fn detect_simd() -> SimdLevel {
    *SIMD_LEVEL.get_or_init(detect_simd_uncached)
}

#[cold]
fn detect_simd_uncached() -> SimdLevel {
    #[cfg(target_arch = "x86_64")]
    {
        if is_x86_feature_detected!("avx512f") && is_x86_feature_detected!("avx512vl") {
            return SimdLevel::Avx512;
        }
        if is_x86_feature_detected!("avx2") && is_x86_feature_detected!("fma") {
            return SimdLevel::Avx2Fma;
        }
    }

    #[cfg(target_arch = "aarch64")]
    {
        // NEON is mandatory for AArch64
        return SimdLevel::Neon;
    }

    #[allow(unreachable_code)]
    SimdLevel::Scalar
}

/// Data-parallel width in elements for one dtype
///
/// At least 1 even on the scalar fallback, so `simd_bound` arithmetic never
/// divides by zero.
#[inline]
pub fn lanes<T: Element>() -> usize {
    (detect_simd().width_bytes() / std::mem::size_of::<T>()).max(1)
}
