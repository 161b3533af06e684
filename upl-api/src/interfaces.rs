//! Collaborator interfaces
//!
//! The boot manager drives firmware services it does not own. Each service
//! is described by a small trait so that the host firmware can bind the
//! real protocols and tests can bind recording doubles. All methods take
//! `&self`: firmware services are shared handles and the boot manager runs
//! single-threaded, so implementations use interior mutability where they
//! keep state.

use alloc::rc::Rc;
use alloc::vec::Vec;

use crate::console::{InputKey, Pixel};
use crate::device_path::DevicePath;
use crate::error::Result;
use crate::guid::Guid;
use crate::load_option::{BootOrderPosition, LoadOption, LoadOptionType, OptionNumber};

/// Platform override of the four boot manager hooks.
///
/// When a platform publishes this protocol, every hook is forwarded to it
/// and the built-in behavior is skipped.
pub trait PlatformBootManagerOverride {
    fn before_console(&self);
    fn after_console(&self);
    fn wait_callback(&self, timeout_remain: u16);
    fn unable_to_boot(&self);
}

/// Vendor security driver
pub trait SecurityProtocol {
    /// Run the driver; `true` requests an immediate boot
    fn run(&self) -> bool;
}

/// Boot services subset used by the boot manager
pub trait BootServices {
    /// Whether any handle carries `protocol`
    fn locate_protocol(&self, protocol: &Guid) -> bool;

    /// Install `protocol` with a null interface on a new handle
    fn install_protocol(&self, protocol: &Guid) -> Result<()>;

    /// Signal every event in the given event group and run their notifies
    fn signal_event_group(&self, group: &Guid);

    /// Busy-wait
    fn stall(&self, microseconds: usize);

    /// Look up the platform boot manager override published under `protocol`
    fn locate_override_protocol(&self, protocol: &Guid) -> Option<Rc<dyn PlatformBootManagerOverride>>;

    /// Look up the vendor security driver published under `protocol`
    fn locate_security_protocol(&self, protocol: &Guid) -> Option<Rc<dyn SecurityProtocol>>;
}

/// Persistent load option storage (`Boot####`, `BootOrder`, `Key####`)
///
/// Options are returned by value; dropping them releases them.
pub trait LoadOptionStore {
    /// Every persisted option of `option_type`, in order
    fn load_options(&self, option_type: LoadOptionType) -> Vec<LoadOption>;

    /// Persist `option`, assigning its number, and place it in the order
    fn add_load_option(&self, option: &mut LoadOption, position: BootOrderPosition) -> Result<()>;

    /// The boot manager menu option for the firmware volume file
    /// `menu_file`, created on demand by the store
    fn boot_manager_menu(&self, menu_file: &Guid) -> Result<LoadOption>;

    /// Register a hot key that launches `target`
    fn add_key_option(&self, target: OptionNumber, modifier: u32, keys: &[InputKey]) -> Result<()>;
}

/// Generic boot manager services
pub trait BootManager {
    /// Connect every controller to its drivers
    fn connect_all(&self);

    /// Enumerate bootable devices and sync the boot option list
    fn refresh_all_boot_options(&self);

    /// Dispatch images whose load was deferred until after lockdown
    fn dispatch_deferred_images(&self);

    /// Attempt to boot `option`; returns when the option returns or fails
    fn boot(&self, option: &LoadOption);
}

/// System table text console
pub trait TextConsole {
    /// Set up console variables and connect platform consoles
    fn init_platform_consoles(&self);

    fn has_output(&self) -> bool;
    fn has_input(&self) -> bool;
    fn clear_screen(&self);
    fn output_string(&self, text: &str);

    /// Block until the input console signals a key
    fn wait_for_key(&self) -> Result<()>;

    /// Pop one queued keystroke, `None` when the queue is empty
    fn read_key_stroke(&self) -> Option<InputKey>;
}

/// Boot logo and progress rendering
pub trait SplashScreen {
    fn enable_logo(&self);

    fn update_progress(
        &self,
        title: &str,
        title_foreground: Pixel,
        title_background: Pixel,
        progress_color: Pixel,
        progress: usize,
        previous_progress: usize,
    );

    /// Publish the boot logo through the BGRT ACPI table
    fn publish_bgrt(&self);
}

/// TPM physical presence interface
pub trait PhysicalPresence {
    /// Process any pending physical presence request
    fn process_request(&self);
}

/// The loaded image protocol of the running boot manager image
pub trait LoadedImage {
    /// Device path of the device the image was loaded from
    fn device_path(&self) -> Result<DevicePath>;
}

/// HOB list handed over by the bootloader
pub trait HobList {
    /// Data of the first GUID-extension HOB named `guid`
    fn first_guid_hob(&self, guid: &Guid) -> Option<&[u8]>;
}
