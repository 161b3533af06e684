//! Platform override delegation
//!
//! A platform may publish the boot manager override protocol to take over
//! all four BDS hooks. The choice is made once: either every hook runs the
//! built-in behavior or every hook forwards to the override.

use alloc::rc::Rc;
use core::fmt;

use upl_api::guid::PLATFORM_BOOT_MANAGER_OVERRIDE_PROTOCOL_GUID;
use upl_api::interfaces::{BootServices, PlatformBootManagerOverride};

/// A boot manager hook invocation, with its parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hook {
    BeforeConsole,
    AfterConsole,
    WaitCallback(u16),
    UnableToBoot,
}

impl fmt::Display for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Hook::BeforeConsole => write!(f, "BeforeConsole"),
            Hook::AfterConsole => write!(f, "AfterConsole"),
            Hook::WaitCallback(remain) => write!(f, "WaitCallback({})", remain),
            Hook::UnableToBoot => write!(f, "UnableToBoot"),
        }
    }
}

/// Which implementation services the boot manager hooks
#[derive(Clone)]
pub enum OverrideDelegate {
    /// No override published; hooks run the built-in behavior
    BuiltIn,
    /// Every hook forwards to the platform override
    Override(Rc<dyn PlatformBootManagerOverride>),
}

impl OverrideDelegate {
    /// Look up the override protocol. Absence selects the built-in hooks.
    pub fn locate(boot_services: &dyn BootServices) -> Self {
        match boot_services.locate_override_protocol(&PLATFORM_BOOT_MANAGER_OVERRIDE_PROTOCOL_GUID) {
            Some(instance) => {
                log::info!("Platform boot manager override protocol found");
                OverrideDelegate::Override(instance)
            }
            None => {
                log::debug!("No platform boot manager override, using built-in hooks");
                OverrideDelegate::BuiltIn
            }
        }
    }

    pub fn built_in() -> Self {
        OverrideDelegate::BuiltIn
    }

    pub fn with_override(instance: Rc<dyn PlatformBootManagerOverride>) -> Self {
        OverrideDelegate::Override(instance)
    }

    pub fn is_override(&self) -> bool {
        matches!(self, OverrideDelegate::Override(_))
    }

    /// Forward `hook` to the override if there is one.
    ///
    /// Returns `true` when the hook was forwarded; the caller must then skip
    /// its built-in behavior.
    pub fn forward(&self, hook: Hook) -> bool {
        let OverrideDelegate::Override(instance) = self else {
            return false;
        };
        log::info!("Delegating {} to platform override", hook);
        match hook {
            Hook::BeforeConsole => instance.before_console(),
            Hook::AfterConsole => instance.after_console(),
            Hook::WaitCallback(remain) => instance.wait_callback(remain),
            Hook::UnableToBoot => instance.unable_to_boot(),
        }
        true
    }
}

impl fmt::Debug for OverrideDelegate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverrideDelegate::BuiltIn => write!(f, "BuiltIn"),
            OverrideDelegate::Override(_) => write!(f, "Override"),
        }
    }
}
