//! UPL API - Boot manager types and collaborator interfaces
//!
//! This crate provides the types and abstractions shared between the
//! platform boot manager library of a universal payload and the firmware
//! services it drives. Everything the boot manager treats as an external
//! collaborator (option store, protocol database, consoles, splash screen,
//! physical presence, HOBs) is described here as a trait so that the
//! decision logic can be built and tested without firmware underneath.
//!
//! # Architecture
//!
//! - **Error**: The [`BootError`] enum and its mapping onto EFI status codes
//! - **Guid**: Well-known protocol, event group and file GUIDs
//! - **Device path**: Byte-level device path model and node builders
//! - **Load option**: Boot/driver load options and their attributes
//! - **Console**: Input keys and splash pixel colors
//! - **Hob**: Universal payload GUID HOB layouts
//! - **Interfaces**: Collaborator traits implemented by the host firmware
//!
//! # Usage
//!
//! ```rust
//! use upl_api::device_path::{DevicePath, fw_vol_file_node};
//! use upl_api::guid::SHELL_FILE_GUID;
//!
//! let path = DevicePath::end().append_node(&fw_vol_file_node(&SHELL_FILE_GUID));
//! assert_eq!(path.size(), 24);
//! ```

#![cfg_attr(not(any(test, feature = "std")), no_std)]

extern crate alloc;

pub mod console;
pub mod device_path;
pub mod error;
pub mod guid;
pub mod hob;
pub mod interfaces;
pub mod load_option;

// Re-export commonly used types
pub use crate::error::{BootError, Result};
pub use crate::guid::Guid;
pub use crate::load_option::{LoadOption, LoadOptionAttributes, LoadOptionType, OptionNumber};
