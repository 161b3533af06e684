//! Effective boot manager configuration
//!
//! The boot manager menu file defaults to the built-in UiApp and may be
//! replaced once, at library construction, by the file named in the
//! bootloader's boot manager menu HOB. The boot timeout is read by the
//! external boot trial loop; this library only ever lowers it to zero.

use core::sync::atomic::{AtomicU16, Ordering};

use spin::Once;
use upl_api::guid::{Guid, BOOT_MANAGER_MENU_FILE_HOB_GUID, SHELL_FILE_GUID, UI_APP_FILE_GUID};
use upl_api::hob::BootManagerMenuHob;
use upl_api::interfaces::HobList;
use upl_api::BootError;

/// Compiled-in boot manager menu file
pub const DEFAULT_BOOT_MANAGER_MENU_FILE: Guid = UI_APP_FILE_GUID;

/// Compiled-in UEFI Shell file
pub const DEFAULT_SHELL_FILE: Guid = SHELL_FILE_GUID;

/// Compiled-in boot timeout in seconds
pub const DEFAULT_BOOT_TIMEOUT: u16 = 3;

/// Process-wide configuration used by the firmware binding
pub static PLATFORM_CONFIG: EffectiveConfig = EffectiveConfig::new(DEFAULT_BOOT_TIMEOUT);

/// Boot manager configuration in effect for this boot
pub struct EffectiveConfig {
    boot_manager_menu_file: Once<Guid>,
    shell_file: Guid,
    boot_timeout: AtomicU16,
}

impl EffectiveConfig {
    pub const fn new(boot_timeout: u16) -> Self {
        Self {
            boot_manager_menu_file: Once::new(),
            shell_file: DEFAULT_SHELL_FILE,
            boot_timeout: AtomicU16::new(boot_timeout),
        }
    }

    /// Firmware volume file of the boot manager menu application
    pub fn boot_manager_menu_file(&self) -> Guid {
        self.boot_manager_menu_file
            .get()
            .copied()
            .unwrap_or(DEFAULT_BOOT_MANAGER_MENU_FILE)
    }

    /// Replace the menu file. Only the first call takes effect; returns
    /// whether this call did.
    pub fn set_boot_manager_menu_file(&self, file: Guid) -> bool {
        let mut applied = false;
        self.boot_manager_menu_file.call_once(|| {
            applied = true;
            file
        });
        applied
    }

    pub fn shell_file(&self) -> Guid {
        self.shell_file
    }

    /// Seconds the boot trial loop waits for user interrupt
    pub fn boot_timeout(&self) -> u16 {
        self.boot_timeout.load(Ordering::Acquire)
    }

    /// Skip the user-interrupt wait entirely
    pub fn skip_boot_timeout(&self) {
        self.boot_timeout.store(0, Ordering::Release);
    }
}

impl Default for EffectiveConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BOOT_TIMEOUT)
    }
}

/// Outcome of looking for the boot manager menu HOB
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuFileResolution {
    /// No HOB; the compiled-in default stays in effect
    Absent,
    /// HOB present but malformed or of an unknown revision; default kept
    Rejected(BootError),
    /// HOB names this file
    Payload(Guid),
}

/// Read the boot manager menu file from the HOB list
pub fn resolve_boot_manager_menu_file(hobs: &dyn HobList) -> MenuFileResolution {
    let Some(data) = hobs.first_guid_hob(&BOOT_MANAGER_MENU_FILE_HOB_GUID) else {
        return MenuFileResolution::Absent;
    };
    match BootManagerMenuHob::parse(data) {
        Ok(hob) => MenuFileResolution::Payload(hob.file_name),
        Err(err) => MenuFileResolution::Rejected(err),
    }
}

/// Library constructor: apply the bootloader's menu file choice to `config`
pub fn library_constructor(hobs: &dyn HobList, config: &EffectiveConfig) -> MenuFileResolution {
    let resolution = resolve_boot_manager_menu_file(hobs);
    match resolution {
        MenuFileResolution::Absent => {
            log::debug!("No boot manager menu HOB, using default menu file");
        }
        MenuFileResolution::Rejected(err) => {
            log::warn!("Ignoring boot manager menu HOB: {}", err);
        }
        MenuFileResolution::Payload(file) => {
            if config.set_boot_manager_menu_file(file) {
                log::info!("Boot manager menu file set from HOB: {:?}", file);
            } else {
                log::warn!("Boot manager menu file already configured, HOB ignored");
            }
        }
    }
    resolution
}
