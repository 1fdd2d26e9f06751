use core::fmt;

use thiserror::Error;

/// Outcome of one transcoding call. Always returned, never raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OperationStatus {
    /// The entire source was consumed.
    Done,
    /// The destination cannot hold the next scalar (or replacement).
    DestinationTooSmall,
    /// The source ends in the middle of a sequence and the chunk is not final.
    NeedMoreData,
    /// The source contains malformed data and replacement was not requested.
    InvalidData,
}

impl OperationStatus {
    /// `true` for [`OperationStatus::Done`].
    #[must_use]
    pub const fn is_done(self) -> bool {
        matches!(self, OperationStatus::Done)
    }

    /// Converts a status and the counts returned alongside it into a
    /// `Result`.
    ///
    /// # Errors
    ///
    /// Every status other than [`OperationStatus::Done`] maps to the matching
    /// [`TranscodeError`]; offsets are taken from `read`.
    pub const fn into_result(self, read: usize, written: usize) -> Result<(), TranscodeError> {
        match self {
            OperationStatus::Done => Ok(()),
            OperationStatus::DestinationTooSmall => {
                Err(TranscodeError::DestinationTooSmall { read, written })
            }
            OperationStatus::NeedMoreData => Err(TranscodeError::Truncated { offset: read }),
            OperationStatus::InvalidData => Err(TranscodeError::InvalidData { offset: read }),
        }
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OperationStatus::Done => "done",
            OperationStatus::DestinationTooSmall => "destination too small",
            OperationStatus::NeedMoreData => "need more data",
            OperationStatus::InvalidData => "invalid data",
        })
    }
}

/// A non-`Done` outcome as an error value.
///
/// Offsets are in source code units.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranscodeError {
    /// The source holds a malformed sequence.
    #[error("malformed sequence at offset {offset}")]
    InvalidData {
        /// Start of the malformed sequence.
        offset: usize,
    },
    /// The source ends inside a sequence.
    #[error("truncated sequence at offset {offset}")]
    Truncated {
        /// Start of the incomplete sequence.
        offset: usize,
    },
    /// The destination filled up before the source was consumed.
    #[error("destination too small after reading {read} and writing {written} code units")]
    DestinationTooSmall {
        /// Source code units consumed.
        read: usize,
        /// Destination code units produced.
        written: usize,
    },
}
