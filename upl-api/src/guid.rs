//! Well-known GUIDs used by the platform boot manager
//!
//! Protocols are identified by GUID in the firmware handle database; event
//! groups, HOBs and firmware volume files use the same namespace.

pub use r_efi::efi::Guid;

/// Platform boot manager override protocol published by a platform driver
pub const PLATFORM_BOOT_MANAGER_OVERRIDE_PROTOCOL_GUID: Guid = Guid::from_fields(
    0xdb3f_c2df,
    0x7376,
    0x4a02,
    0x9c,
    0x4e,
    &[0x4b, 0x4a, 0x32, 0x8c, 0x8c, 0x32],
);

/// Vendor security driver that may request an immediate boot
pub const SECURITY_PROTOCOL_GUID: Guid = Guid::from_fields(
    0x7642_47c4,
    0xa859,
    0x4a6b,
    0xb5,
    0x00,
    &[0xed, 0x5d, 0x7a, 0x70, 0x7d, 0xd4],
);

/// GUID HOB carrying the boot manager menu file name from the bootloader
pub const BOOT_MANAGER_MENU_FILE_HOB_GUID: Guid = Guid::from_fields(
    0xdf93_9333,
    0x42fc,
    0x4b2a,
    0xa5,
    0x9e,
    &[0xbb, 0xae, 0x82, 0x81, 0xfe, 0xef],
);

/// End-of-DXE event group
pub const END_OF_DXE_EVENT_GROUP_GUID: Guid = Guid::from_fields(
    0x02ce_967a,
    0xdd7e,
    0x4ffc,
    0x9e,
    0xe7,
    &[0x81, 0x0c, 0xf0, 0x47, 0x08, 0x80],
);

/// SMM access protocol; its presence means SMRAM can be locked
pub const SMM_ACCESS2_PROTOCOL_GUID: Guid = Guid::from_fields(
    0xc270_2b74,
    0x800c,
    0x4131,
    0x87,
    0x46,
    &[0x8f, 0xb5, 0xb8, 0x9c, 0xe4, 0xac],
);

/// Marker protocol whose installation locks SMM
pub const DXE_SMM_READY_TO_LOCK_PROTOCOL_GUID: Guid = Guid::from_fields(
    0x60ff_8964,
    0xe906,
    0x41d0,
    0xaf,
    0xed,
    &[0xf2, 0x41, 0xe9, 0x74, 0xe0, 0x8e],
);

/// Built-in boot manager menu application (UiApp)
pub const UI_APP_FILE_GUID: Guid = Guid::from_fields(
    0x462c_aa21,
    0x7614,
    0x4503,
    0x83,
    0x6e,
    &[0x8a, 0xb6, 0xf4, 0x66, 0x23, 0x31],
);

/// UEFI Shell application
pub const SHELL_FILE_GUID: Guid = Guid::from_fields(
    0x7c04_a583,
    0x9e3e,
    0x4f1c,
    0xad,
    0x65,
    &[0xe0, 0x52, 0x68, 0xd0, 0xb4, 0xd1],
);
