//! UPL Boot Manager - Platform boot manager library for universal payloads
//!
//! Decides, at each phase of BDS, what the platform does before the first
//! boot option is tried:
//!
//! - [`config`]: one-shot startup resolution of the boot manager menu file
//! - [`matcher`]: load option identity used to deduplicate boot options
//! - [`registrar`]: register firmware volume applications as boot options
//! - [`delegate`]: all-or-nothing hand-off to a platform override protocol
//! - [`lock`]: end-of-DXE signal and SMM ready-to-lock installation
//! - [`lifecycle`]: the four BDS hooks and their ordering contract
//!
//! Everything outside this decision layer (option storage, consoles, splash
//! rendering, TPM physical presence, the boot trial loop) is reached through
//! the traits in [`upl_api::interfaces`].

#![cfg_attr(not(any(test, feature = "std")), no_std)]

extern crate alloc;

/// Log a failed firmware call that must never fail on a correctly
/// configured platform, and halt debug builds.
macro_rules! assert_efi_error {
    ($result:expr, $what:literal) => {
        if let Err(err) = $result {
            log::error!(concat!($what, " failed: {}"), err);
            debug_assert!(false, concat!($what, " failed: {}"), err);
        }
    };
}

pub mod config;
pub mod delegate;
pub mod lifecycle;
pub mod lock;
pub mod matcher;
pub mod registrar;

pub use config::{library_constructor, EffectiveConfig, MenuFileResolution, PLATFORM_CONFIG};
pub use delegate::{Hook, OverrideDelegate};
pub use lifecycle::{BootEnvironment, LifecyclePhase, PlatformBootManager, UnableToBootExit};
pub use matcher::{find_load_option, is_same_load_option};
pub use registrar::{OptionRegistrar, RegistrationOutcome};
