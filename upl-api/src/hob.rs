//! Universal payload GUID HOB layouts
//!
//! The bootloader hands configuration to the payload as GUID-extension HOBs
//! whose data begins with a generic header. Only the boot manager menu HOB
//! is consumed by the boot manager.

use core::mem::size_of;

use crate::error::{BootError, Result};
use crate::guid::Guid;

/// Only recognized revision of the boot manager menu HOB
pub const BOOT_MANAGER_MENU_REVISION: u8 = 1;

/// Generic header at the start of every universal payload HOB
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(C)]
pub struct GenericHeader {
    pub revision: u8,
    pub reserved: u8,
    /// Length of the HOB data, header included
    pub length: u16,
}

static_assertions::assert_eq_size!(GenericHeader, [u8; 4]);

impl GenericHeader {
    pub const SIZE: usize = size_of::<GenericHeader>();

    /// Read the header from the start of `data`
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < Self::SIZE {
            return Err(BootError::BufferTooSmall);
        }
        Ok(Self {
            revision: data[0],
            reserved: data[1],
            length: u16::from_le_bytes([data[2], data[3]]),
        })
    }
}

/// Boot manager menu HOB: names the firmware volume file of the menu app
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BootManagerMenuHob {
    pub header: GenericHeader,
    pub file_name: Guid,
}

impl BootManagerMenuHob {
    /// Bytes through the end of `file_name`
    pub const SIZE_THROUGH_FILE_NAME: usize = GenericHeader::SIZE + 16;

    /// Parse and validate HOB data.
    ///
    /// The declared length must fit in `data`, the revision must be
    /// [`BOOT_MANAGER_MENU_REVISION`] and the declared length must cover the
    /// file name.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let header = GenericHeader::parse(data)?;
        if header.length as usize > data.len() {
            return Err(BootError::BufferTooSmall);
        }
        if header.revision != BOOT_MANAGER_MENU_REVISION {
            return Err(BootError::Unsupported);
        }
        if (header.length as usize) < Self::SIZE_THROUGH_FILE_NAME {
            return Err(BootError::BufferTooSmall);
        }
        let mut file_name = [0u8; 16];
        file_name.copy_from_slice(&data[GenericHeader::SIZE..Self::SIZE_THROUGH_FILE_NAME]);
        Ok(Self {
            header,
            file_name: Guid::from_bytes(&file_name),
        })
    }

    /// Encode the HOB data, used by bootloader-side tooling and tests
    pub fn to_bytes(&self) -> [u8; Self::SIZE_THROUGH_FILE_NAME] {
        let mut out = [0u8; Self::SIZE_THROUGH_FILE_NAME];
        out[0] = self.header.revision;
        out[1] = self.header.reserved;
        out[2..4].copy_from_slice(&self.header.length.to_le_bytes());
        out[GenericHeader::SIZE..].copy_from_slice(self.file_name.as_bytes());
        out
    }
}
