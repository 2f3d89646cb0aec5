//! Driver error type

use crate::init::InitStage;

/// Errors returned by [`Eve`](crate::Eve) operations.
///
/// `E` is the transport's error type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Bus or pin failure reported by the transport
    Transport(E),
    /// A register never reached the expected value
    Timeout {
        /// Register that was polled
        register: u32,
    },
    /// `REG_CHIP_ID` does not match the profile
    ChipIdMismatch {
        /// Identifier named by the profile
        expected: u32,
        /// Identifier read from the chip
        found: u32,
    },
    /// The co-processor stopped on an illegal command (`REG_CMD_READ == 0xFFF`)
    CoprocessorFault,
    /// The command or register set is not available on the profile's chip
    Unsupported,
    /// An initialization hook rejected the stage
    Hook(InitStage),
}

impl<E> Error<E> {
    /// True for errors the caller can clear with
    /// [`recover_from_fault`](crate::Eve::recover_from_fault).
    pub const fn is_fault(&self) -> bool {
        matches!(self, Error::CoprocessorFault)
    }
}

impl<E> core::fmt::Display for Error<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Transport(_) => write!(f, "transport error"),
            Error::Timeout { register } => {
                write!(f, "timed out polling register {register:#08x}")
            }
            Error::ChipIdMismatch { expected, found } => write!(
                f,
                "chip id mismatch: expected {expected:#08x}, found {found:#08x}"
            ),
            Error::CoprocessorFault => write!(f, "co-processor fault"),
            Error::Unsupported => write!(f, "not supported by this chip"),
            Error::Hook(stage) => write!(f, "init hook failed during {}", stage.name()),
        }
    }
}

#[cfg(feature = "std")]
impl<E: core::fmt::Debug> std::error::Error for Error<E> {}
