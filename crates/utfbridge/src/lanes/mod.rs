//! Lane kernels and backend selection.
//!
//! A kernel answers two questions about a lane of exactly
//! [`LaneKernel::WIDTH`] code units (is it all ASCII?) and performs the
//! packed ASCII widen/narrow. Everything else in the bulk loop is shared
//! code, so kernels stay tiny and the scalar kernel (`Portable<1>`) is the
//! differential baseline for all of them.

mod portable;
#[cfg(target_arch = "x86_64")]
mod x86;

pub(crate) use portable::Portable;
#[cfg(target_arch = "x86_64")]
pub(crate) use x86::{Avx2, Sse2};

/// Per-lane primitives. All slice arguments are exactly `WIDTH` long.
pub(crate) trait LaneKernel {
    /// Code units per lane.
    const WIDTH: usize;

    fn utf8_lane_is_ascii(lane: &[u8]) -> bool;

    fn utf16_lane_is_ascii(lane: &[u16]) -> bool;

    fn widen_lane(src: &[u8], dst: &mut [u16]) {
        crate::ascii::widen_ascii(src, dst);
    }

    fn narrow_lane(src: &[u16], dst: &mut [u8]) {
        crate::ascii::narrow_ascii(src, dst);
    }
}

/// Lane width of a [`Backend::Portable`] kernel, in code units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LaneWidth {
    /// 2 units per lane.
    X2,
    /// 4 units per lane.
    X4,
    /// 8 units per lane.
    X8,
    /// 16 units per lane.
    X16,
    /// 32 units per lane.
    X32,
}

impl LaneWidth {
    /// Code units per lane.
    #[must_use]
    pub const fn units(self) -> usize {
        match self {
            LaneWidth::X2 => 2,
            LaneWidth::X4 => 4,
            LaneWidth::X8 => 8,
            LaneWidth::X16 => 16,
            LaneWidth::X32 => 32,
        }
    }
}

/// Strategy used for the lane loop.
///
/// All backends produce identical results; they differ only in speed.
/// [`Backend::Scalar`] decodes one scalar at a time and is the correctness
/// baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Backend {
    /// One code unit per lane, no ASCII prefix skipping.
    Scalar,
    /// Plain Rust lanes of the given width, left to the autovectorizer.
    Portable(LaneWidth),
    /// SSE2 intrinsics, 16 units per lane (`x86_64` only).
    Sse2,
    /// AVX2 intrinsics, 32 units per lane (`x86_64` with runtime support).
    Avx2,
}

impl Backend {
    /// Every backend, available or not.
    pub const ALL: [Backend; 8] = [
        Backend::Scalar,
        Backend::Portable(LaneWidth::X2),
        Backend::Portable(LaneWidth::X4),
        Backend::Portable(LaneWidth::X8),
        Backend::Portable(LaneWidth::X16),
        Backend::Portable(LaneWidth::X32),
        Backend::Sse2,
        Backend::Avx2,
    ];

    /// Code units per lane.
    #[must_use]
    pub const fn lane_width(self) -> usize {
        match self {
            Backend::Scalar => 1,
            Backend::Portable(width) => width.units(),
            Backend::Sse2 => 16,
            Backend::Avx2 => 32,
        }
    }

    /// Whether the running target can execute this backend.
    #[must_use]
    pub fn is_available(self) -> bool {
        match self {
            Backend::Scalar | Backend::Portable(_) => true,
            Backend::Sse2 => cfg!(target_arch = "x86_64"),
            Backend::Avx2 => avx2_detected(),
        }
    }

    /// Iterator over the backends [`Backend::is_available`] accepts.
    pub fn available() -> impl Iterator<Item = Backend> {
        Self::ALL.into_iter().filter(|b| b.is_available())
    }

    /// The widest available backend. Detected once and cached with `std`.
    #[must_use]
    pub fn detect() -> Self {
        #[cfg(feature = "std")]
        {
            static DETECTED: std::sync::OnceLock<Backend> = std::sync::OnceLock::new();
            *DETECTED.get_or_init(|| {
                let backend = Self::fastest();
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    ?backend,
                    lanes = backend.lane_width(),
                    "selected transcoding backend"
                );
                backend
            })
        }
        #[cfg(not(feature = "std"))]
        {
            Self::fastest()
        }
    }

    /// `requested` if the CPU supports it, the detected backend otherwise.
    pub(crate) fn resolve(requested: Option<Self>) -> Self {
        match requested {
            Some(backend) if backend.is_available() => backend,
            #[cfg(feature = "tracing")]
            Some(backend) => {
                tracing::warn!(?backend, "requested backend unavailable, using detected one");
                Self::detect()
            }
            _ => Self::detect(),
        }
    }

    fn fastest() -> Self {
        if Backend::Avx2.is_available() {
            Backend::Avx2
        } else if Backend::Sse2.is_available() {
            Backend::Sse2
        } else if cfg!(any(target_arch = "aarch64", target_arch = "wasm32")) {
            Backend::Portable(LaneWidth::X16)
        } else {
            Backend::Portable(LaneWidth::X8)
        }
    }
}

#[cfg(all(target_arch = "x86_64", feature = "std"))]
fn avx2_detected() -> bool {
    std::is_x86_feature_detected!("avx2")
}

#[cfg(all(target_arch = "x86_64", not(feature = "std")))]
fn avx2_detected() -> bool {
    cfg!(target_feature = "avx2")
}

#[cfg(not(target_arch = "x86_64"))]
fn avx2_detected() -> bool {
    false
}

/// Calls `$func::<Kernel>($args)` with the kernel type matching `$backend`.
///
/// The backend must already be resolved to an available one.
macro_rules! dispatch {
    ($backend:expr, $func:ident ( $($arg:expr),* $(,)? )) => {{
        use $crate::lanes::{Backend, LaneWidth, Portable};
        match $backend {
            Backend::Scalar => $func::<Portable<1>>($($arg),*),
            Backend::Portable(LaneWidth::X2) => $func::<Portable<2>>($($arg),*),
            Backend::Portable(LaneWidth::X4) => $func::<Portable<4>>($($arg),*),
            Backend::Portable(LaneWidth::X8) => $func::<Portable<8>>($($arg),*),
            Backend::Portable(LaneWidth::X16) => $func::<Portable<16>>($($arg),*),
            Backend::Portable(LaneWidth::X32) => $func::<Portable<32>>($($arg),*),
            #[cfg(target_arch = "x86_64")]
            Backend::Sse2 => $func::<$crate::lanes::Sse2>($($arg),*),
            #[cfg(target_arch = "x86_64")]
            Backend::Avx2 => $func::<$crate::lanes::Avx2>($($arg),*),
            #[cfg(not(target_arch = "x86_64"))]
            Backend::Sse2 | Backend::Avx2 => $func::<Portable<16>>($($arg),*),
        }
    }};
}

pub(crate) use dispatch;
