//! `x86_64` kernels.
//!
//! Each kernel method asserts its lane length and then performs unaligned
//! loads and stores of exactly one lane, so the `unsafe` blocks only rely on
//! slice bounds that were just checked plus CPU support for the instruction
//! set. SSE2 is part of the `x86_64` baseline; AVX2 is reached only through
//! [`Backend::Avx2`](crate::Backend::Avx2) after runtime detection.

use core::arch::x86_64::{
    __m128i, __m256i, _mm256_and_si256, _mm256_cvtepu8_epi16, _mm256_loadu_si256,
    _mm256_movemask_epi8, _mm256_or_si256, _mm256_packus_epi16, _mm256_permute4x64_epi64,
    _mm256_set1_epi16, _mm256_storeu_si256, _mm256_testz_si256, _mm_and_si128, _mm_cmpeq_epi8,
    _mm_loadu_si128, _mm_movemask_epi8, _mm_or_si128, _mm_packus_epi16, _mm_set1_epi16,
    _mm_setzero_si128, _mm_storeu_si128, _mm_unpackhi_epi8, _mm_unpacklo_epi8,
};

use super::LaneKernel;

/// `0xFF80` as a signed 16-bit lane: the bits that must be clear for ASCII.
const NON_ASCII_U16: i16 = -0x80;

pub(crate) struct Sse2;

// Every pointer cast below feeds an unaligned `loadu`/`storeu`.
#[allow(clippy::cast_ptr_alignment)]
impl LaneKernel for Sse2 {
    const WIDTH: usize = 16;

    #[inline]
    fn utf8_lane_is_ascii(lane: &[u8]) -> bool {
        assert_eq!(lane.len(), 16);
        // SAFETY: 16 readable bytes; `loadu` has no alignment requirement.
        unsafe {
            let v = _mm_loadu_si128(lane.as_ptr().cast::<__m128i>());
            _mm_movemask_epi8(v) == 0
        }
    }

    #[inline]
    fn utf16_lane_is_ascii(lane: &[u16]) -> bool {
        assert_eq!(lane.len(), 16);
        // SAFETY: 32 readable bytes, read as two unaligned 16-byte loads.
        unsafe {
            let p = lane.as_ptr().cast::<__m128i>();
            let any = _mm_or_si128(_mm_loadu_si128(p), _mm_loadu_si128(p.add(1)));
            let high = _mm_and_si128(any, _mm_set1_epi16(NON_ASCII_U16));
            _mm_movemask_epi8(_mm_cmpeq_epi8(high, _mm_setzero_si128())) == 0xFFFF
        }
    }

    #[inline]
    fn widen_lane(src: &[u8], dst: &mut [u16]) {
        assert!(src.len() == 16 && dst.len() == 16);
        // SAFETY: 16 readable bytes in, 32 writable bytes out.
        unsafe {
            let v = _mm_loadu_si128(src.as_ptr().cast::<__m128i>());
            let zero = _mm_setzero_si128();
            let out = dst.as_mut_ptr().cast::<__m128i>();
            _mm_storeu_si128(out, _mm_unpacklo_epi8(v, zero));
            _mm_storeu_si128(out.add(1), _mm_unpackhi_epi8(v, zero));
        }
    }

    #[inline]
    fn narrow_lane(src: &[u16], dst: &mut [u8]) {
        assert!(src.len() == 16 && dst.len() == 16);
        // SAFETY: 32 readable bytes in, 16 writable bytes out. Lanes are ASCII
        // so the unsigned saturation in `packus` never clamps.
        unsafe {
            let p = src.as_ptr().cast::<__m128i>();
            let packed = _mm_packus_epi16(_mm_loadu_si128(p), _mm_loadu_si128(p.add(1)));
            _mm_storeu_si128(dst.as_mut_ptr().cast::<__m128i>(), packed);
        }
    }
}

pub(crate) struct Avx2;

impl LaneKernel for Avx2 {
    const WIDTH: usize = 32;

    #[inline]
    fn utf8_lane_is_ascii(lane: &[u8]) -> bool {
        assert_eq!(lane.len(), 32);
        debug_assert!(crate::Backend::Avx2.is_available());
        // SAFETY: length checked above; AVX2 support was detected before this
        // kernel was dispatched.
        unsafe { utf8_is_ascii_avx2(lane) }
    }

    #[inline]
    fn utf16_lane_is_ascii(lane: &[u16]) -> bool {
        assert_eq!(lane.len(), 32);
        debug_assert!(crate::Backend::Avx2.is_available());
        // SAFETY: as above.
        unsafe { utf16_is_ascii_avx2(lane) }
    }

    #[inline]
    fn widen_lane(src: &[u8], dst: &mut [u16]) {
        assert!(src.len() == 32 && dst.len() == 32);
        // SAFETY: as above.
        unsafe { widen_avx2(src, dst) }
    }

    #[inline]
    fn narrow_lane(src: &[u16], dst: &mut [u8]) {
        assert!(src.len() == 32 && dst.len() == 32);
        // SAFETY: as above.
        unsafe { narrow_avx2(src, dst) }
    }
}

/// # Safety
///
/// `lane` must hold 32 bytes and the CPU must support AVX2.
#[target_feature(enable = "avx2")]
#[allow(clippy::cast_ptr_alignment)]
unsafe fn utf8_is_ascii_avx2(lane: &[u8]) -> bool {
    // SAFETY: guaranteed by the caller.
    unsafe {
        let v = _mm256_loadu_si256(lane.as_ptr().cast::<__m256i>());
        _mm256_movemask_epi8(v) == 0
    }
}

/// # Safety
///
/// `lane` must hold 32 units and the CPU must support AVX2.
#[target_feature(enable = "avx2")]
#[allow(clippy::cast_ptr_alignment)]
unsafe fn utf16_is_ascii_avx2(lane: &[u16]) -> bool {
    // SAFETY: guaranteed by the caller.
    unsafe {
        let p = lane.as_ptr().cast::<__m256i>();
        let any = _mm256_or_si256(_mm256_loadu_si256(p), _mm256_loadu_si256(p.add(1)));
        let high = _mm256_and_si256(any, _mm256_set1_epi16(NON_ASCII_U16));
        _mm256_testz_si256(high, high) == 1
    }
}

/// # Safety
///
/// Both slices must hold 32 units and the CPU must support AVX2.
#[target_feature(enable = "avx2")]
#[allow(clippy::cast_ptr_alignment)]
unsafe fn widen_avx2(src: &[u8], dst: &mut [u16]) {
    // SAFETY: guaranteed by the caller.
    unsafe {
        let p = src.as_ptr().cast::<__m128i>();
        let out = dst.as_mut_ptr().cast::<__m256i>();
        _mm256_storeu_si256(out, _mm256_cvtepu8_epi16(_mm_loadu_si128(p)));
        _mm256_storeu_si256(out.add(1), _mm256_cvtepu8_epi16(_mm_loadu_si128(p.add(1))));
    }
}

/// # Safety
///
/// Both slices must hold 32 units, `src` must be ASCII and the CPU must
/// support AVX2.
#[target_feature(enable = "avx2")]
#[allow(clippy::cast_ptr_alignment)]
unsafe fn narrow_avx2(src: &[u16], dst: &mut [u8]) {
    // SAFETY: guaranteed by the caller.
    unsafe {
        let p = src.as_ptr().cast::<__m256i>();
        // `packus` works per 128-bit half; the permute restores text order.
        let packed = _mm256_packus_epi16(_mm256_loadu_si256(p), _mm256_loadu_si256(p.add(1)));
        let ordered = _mm256_permute4x64_epi64::<0b11_01_10_00>(packed);
        _mm256_storeu_si256(dst.as_mut_ptr().cast::<__m256i>(), ordered);
    }
}
