//! Load options
//!
//! A load option is a named, typed reference to an executable device path
//! that the boot manager can load (`Driver####`, `SysPrep####`, `Boot####`,
//! `PlatformRecovery####`). Only the fields that take part in identity are
//! modelled; the variable encoding belongs to the option store.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::device_path::DevicePath;
use crate::error::{BootError, Result};

/// Option number (`####` in `Boot####`)
pub type OptionNumber = u16;

/// Load option kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum LoadOptionType {
    Driver = 0,
    SysPrep = 1,
    Boot = 2,
    PlatformRecovery = 3,
}

impl fmt::Display for LoadOptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadOptionType::Driver => write!(f, "Driver"),
            LoadOptionType::SysPrep => write!(f, "SysPrep"),
            LoadOptionType::Boot => write!(f, "Boot"),
            LoadOptionType::PlatformRecovery => write!(f, "PlatformRecovery"),
        }
    }
}

bitflags::bitflags! {
    /// `LOAD_OPTION_*` attribute bits
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct LoadOptionAttributes: u32 {
        /// Option takes part in boot order processing
        const ACTIVE = 0x0000_0001;
        /// Reconnect all drivers after loading (driver options)
        const FORCE_RECONNECT = 0x0000_0002;
        /// Hidden from boot menus
        const HIDDEN = 0x0000_0008;
        /// Application category (not a boot target)
        const CATEGORY_APP = 0x0000_0100;
    }
}

/// Boot manager load option
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOption {
    /// Assigned number, `None` until the option store persists it
    pub number: Option<OptionNumber>,
    pub option_type: LoadOptionType,
    pub attributes: LoadOptionAttributes,
    pub description: String,
    pub file_path: DevicePath,
    pub optional_data: Vec<u8>,
}

impl LoadOption {
    /// Initialize an unassigned load option.
    ///
    /// Fails when the description is empty or the file path carries no
    /// terminator, mirroring the checks firmware applies before it will
    /// persist the option.
    pub fn new(
        option_type: LoadOptionType,
        attributes: LoadOptionAttributes,
        description: &str,
        file_path: DevicePath,
    ) -> Result<Self> {
        if description.is_empty() {
            return Err(BootError::InvalidParameter("Load option description is empty"));
        }
        if !file_path.is_terminated() {
            return Err(BootError::InvalidParameter("Load option file path is not terminated"));
        }
        Ok(Self {
            number: None,
            option_type,
            attributes,
            description: String::from(description),
            file_path,
            optional_data: Vec::new(),
        })
    }

    /// Attach optional data passed to the image on load
    pub fn with_optional_data(mut self, data: &[u8]) -> Self {
        self.optional_data = data.to_vec();
        self
    }

    /// Attach an already assigned option number
    pub fn with_number(mut self, number: OptionNumber) -> Self {
        self.number = Some(number);
        self
    }

    /// Whether the option takes part in boot order processing
    pub fn is_active(&self) -> bool {
        self.attributes.contains(LoadOptionAttributes::ACTIVE)
    }
}

impl fmt::Display for LoadOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.number {
            Some(number) => write!(f, "{}{:04X} \"{}\"", self.option_type, number, self.description),
            None => write!(f, "{}(unassigned) \"{}\"", self.option_type, self.description),
        }
    }
}

/// Where a newly persisted option lands in the boot order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootOrderPosition {
    /// Appended after every existing entry
    End,
    /// Inserted at the given index
    At(usize),
}
