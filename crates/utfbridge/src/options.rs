use crate::lanes::Backend;

/// Configuration for one transcoding call.
///
/// # Examples
///
/// ```rust
/// use utfbridge::{Backend, OperationStatus, TranscodeOptions, transcode_utf8_to_utf16_with};
///
/// let options = TranscodeOptions::new()
///     .with_replacement(true)
///     .with_backend(Backend::Scalar);
/// let mut dest = [0u16; 4];
/// let (read, written, status) = transcode_utf8_to_utf16_with(b"a\xFFb", &mut dest, options);
/// assert_eq!((read, written, status), (3, 3, OperationStatus::Done));
/// assert_eq!(dest[..3], [0x61_u16, 0xFFFD, 0x62]);
/// ```
///
/// # Default
///
/// No replacement, final chunk, detected backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TranscodeOptions {
    /// Substitute U+FFFD for each maximal malformed subpart instead of
    /// stopping with [`OperationStatus::InvalidData`](crate::OperationStatus::InvalidData).
    ///
    /// # Default
    ///
    /// `false`
    pub replace_invalid: bool,

    /// Whether the source is the last chunk of its stream.
    ///
    /// When `false`, a sequence cut off by the end of the source suspends the
    /// call with [`OperationStatus::NeedMoreData`](crate::OperationStatus::NeedMoreData).
    /// When `true`, it is malformed.
    ///
    /// # Default
    ///
    /// `true`
    pub is_final: bool,

    /// Lane backend to use. `None`, or a backend the running CPU lacks, falls
    /// back to [`Backend::detect`].
    ///
    /// # Default
    ///
    /// `None`
    pub backend: Option<Backend>,
}

impl Default for TranscodeOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl TranscodeOptions {
    /// Same as [`TranscodeOptions::default`], usable in `const` contexts.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            replace_invalid: false,
            is_final: true,
            backend: None,
        }
    }

    /// Sets [`TranscodeOptions::replace_invalid`].
    #[must_use]
    pub const fn with_replacement(mut self, replace_invalid: bool) -> Self {
        self.replace_invalid = replace_invalid;
        self
    }

    /// Sets [`TranscodeOptions::is_final`].
    #[must_use]
    pub const fn with_final(mut self, is_final: bool) -> Self {
        self.is_final = is_final;
        self
    }

    /// Pins the lane backend.
    #[must_use]
    pub const fn with_backend(mut self, backend: Backend) -> Self {
        self.backend = Some(backend);
        self
    }

    pub(crate) fn resolved_backend(&self) -> Backend {
        Backend::resolve(self.backend)
    }
}
