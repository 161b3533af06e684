//! Boot manager error handling
//!
//! This module defines the error type used by the boot manager and by every
//! collaborator interface, together with its mapping onto EFI status codes.

use core::fmt;

use r_efi::efi::Status;

/// Boot manager error type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootError {
    /// Requested item (protocol, option, variable, HOB) does not exist
    NotFound(&'static str),

    /// Caller supplied malformed data
    InvalidParameter(&'static str),

    /// Operation is not supported by the platform
    Unsupported,

    /// Supplied buffer or blob is smaller than its declared layout
    BufferTooSmall,

    /// Firmware device or service reported a hardware failure
    DeviceError(&'static str),

    /// Allocation or variable storage exhausted
    OutOfResources,

    /// The item was already installed or registered
    AlreadyStarted,

    /// Raw firmware status that has no dedicated variant
    Firmware(Status),
}

impl BootError {
    /// Convert to the EFI status code reported to firmware
    pub fn as_status(&self) -> Status {
        match self {
            BootError::NotFound(_) => Status::NOT_FOUND,
            BootError::InvalidParameter(_) => Status::INVALID_PARAMETER,
            BootError::Unsupported => Status::UNSUPPORTED,
            BootError::BufferTooSmall => Status::BUFFER_TOO_SMALL,
            BootError::DeviceError(_) => Status::DEVICE_ERROR,
            BootError::OutOfResources => Status::OUT_OF_RESOURCES,
            BootError::AlreadyStarted => Status::ALREADY_STARTED,
            BootError::Firmware(status) => *status,
        }
    }

    /// Get a human-readable description of the error
    pub fn description(&self) -> &'static str {
        match self {
            BootError::NotFound(msg) => msg,
            BootError::InvalidParameter(msg) => msg,
            BootError::Unsupported => "Operation not supported",
            BootError::BufferTooSmall => "Buffer too small",
            BootError::DeviceError(msg) => msg,
            BootError::OutOfResources => "Out of resources",
            BootError::AlreadyStarted => "Already started",
            BootError::Firmware(_) => "Firmware error",
        }
    }
}

impl fmt::Display for BootError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BootError::Firmware(status) => write!(f, "Firmware error: {:#x}", status.as_usize()),
            _ => write!(f, "{} ({:#x})", self.description(), self.as_status().as_usize()),
        }
    }
}

impl From<Status> for BootError {
    fn from(status: Status) -> Self {
        match status {
            Status::NOT_FOUND => BootError::NotFound("Not found"),
            Status::INVALID_PARAMETER => BootError::InvalidParameter("Invalid parameter"),
            Status::UNSUPPORTED => BootError::Unsupported,
            Status::BUFFER_TOO_SMALL => BootError::BufferTooSmall,
            Status::DEVICE_ERROR => BootError::DeviceError("Device error"),
            Status::OUT_OF_RESOURCES => BootError::OutOfResources,
            Status::ALREADY_STARTED => BootError::AlreadyStarted,
            other => BootError::Firmware(other),
        }
    }
}

/// Result type for boot manager operations
pub type Result<T> = core::result::Result<T, BootError>;
