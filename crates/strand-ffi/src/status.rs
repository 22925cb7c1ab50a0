//! C-compatible status codes.
//!
//! [`StrandStatus`] is a `repr(i32)` enum covering every failure a C
//! caller can observe. [`ListError`]s convert into it.

use strand::ListError;

/// Status code returned by every FFI function.
///
/// `Ok` = 0, all errors are negative. Values are ABI-stable.
#[repr(i32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrandStatus {
    /// Success.
    Ok = 0,
    /// Handle is unknown, was destroyed, or refers to a destroyed list.
    InvalidHandle = -1,
    /// The registered allocator returned null.
    AllocationFailed = -2,
    /// Index or start position lies outside the list.
    OutOfBounds = -3,
    /// No element holds the requested value.
    NotFound = -4,
    /// The list changed structure after the iterator last moved.
    StaleIterator = -5,
    /// The iterator is past the last element.
    Exhausted = -6,
    /// The list is at its node limit, or no more handles can be issued.
    CapacityExceeded = -7,
    /// A required out-pointer is null or an argument is otherwise invalid.
    InvalidArgument = -8,
    /// Internal error (e.g. poisoned mutex after a prior panic).
    InternalError = -20,
    /// A Rust panic was caught at the FFI boundary.
    Panicked = -128,
}

impl From<&ListError> for StrandStatus {
    fn from(e: &ListError) -> Self {
        match e {
            ListError::AllocationFailed { .. } => StrandStatus::AllocationFailed,
            ListError::OutOfBounds { .. } => StrandStatus::OutOfBounds,
            ListError::NotFound => StrandStatus::NotFound,
            ListError::ForeignCursor { .. } => StrandStatus::InvalidHandle,
            ListError::StaleCursor { .. } => StrandStatus::StaleIterator,
            ListError::Exhausted => StrandStatus::Exhausted,
            ListError::CapacityExceeded { .. } => StrandStatus::CapacityExceeded,
            ListError::Config(_) => StrandStatus::InvalidArgument,
        }
    }
}

impl From<Result<(), ListError>> for StrandStatus {
    fn from(result: Result<(), ListError>) -> Self {
        match result {
            Ok(()) => StrandStatus::Ok,
            Err(e) => StrandStatus::from(&e),
        }
    }
}
