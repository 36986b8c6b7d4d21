//! Linux scheduler and memory-lock syscalls.

#![expect(unsafe_code, reason = "libc exposes these syscalls only as unsafe fns")]

use std::io;

use libc::{MCL_CURRENT, MCL_FUTURE, SCHED_FIFO, mlockall, sched_get_priority_max, sched_param, sched_setscheduler};

use crate::error::{RtResult, RtSetupError};

/// Move the calling process to `SCHED_FIFO` at the highest priority.
///
/// Returns the priority that was set.
pub(crate) fn set_fifo_max_priority() -> RtResult<i32> {
    // SAFETY: takes a policy constant by value and reads no memory.
    let priority = unsafe { sched_get_priority_max(SCHED_FIFO) };
    if priority < 0 {
        return Err(RtSetupError::Priority(io::Error::last_os_error()));
    }

    let param = sched_param {
        sched_priority: priority,
    };
    // SAFETY: `param` is initialized and outlives the call; pid 0 is this process.
    let rc = unsafe { sched_setscheduler(0, SCHED_FIFO, &raw const param) };
    if rc != 0 {
        return Err(RtSetupError::Priority(io::Error::last_os_error()));
    }
    Ok(priority)
}

/// Lock all current and future pages into RAM.
pub(crate) fn lock_all_memory() -> RtResult<()> {
    // SAFETY: takes flag bits by value and reads no memory.
    let rc = unsafe { mlockall(MCL_CURRENT | MCL_FUTURE) };
    if rc != 0 {
        return Err(RtSetupError::MemoryLock(io::Error::last_os_error()));
    }
    Ok(())
}
