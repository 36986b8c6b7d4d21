//! Platforms without a real-time setup implementation.

use crate::error::{RtResult, RtSetupError};

pub(crate) fn set_fifo_max_priority() -> RtResult<i32> {
    Err(RtSetupError::Unsupported)
}

pub(crate) fn lock_all_memory() -> RtResult<()> {
    Err(RtSetupError::Unsupported)
}
