//! Boot manager lifecycle
//!
//! BDS calls four platform hooks in a fixed order:
//!
//! 1. [`PlatformBootManager::before_console`] before any console is usable
//! 2. [`PlatformBootManager::after_console`] once consoles are connected
//! 3. [`PlatformBootManager::wait_callback`] once per second of the boot
//!    timeout countdown owned by the boot trial loop
//! 4. [`PlatformBootManager::unable_to_boot`] when every boot option failed
//!
//! The override protocol is looked up on the first `before_console` and the
//! result is kept for the rest of the boot: if an override exists, every
//! hook forwards to it and none of the built-in side effects happen.

use alloc::format;
use core::fmt;
use core::cell::Cell;

use spin::Once;
use upl_api::console::{InputKey, Pixel};
use upl_api::guid::SECURITY_PROTOCOL_GUID;
use upl_api::interfaces::{
    BootManager, BootServices, LoadOptionStore, LoadedImage, PhysicalPresence, SplashScreen,
    TextConsole,
};
use upl_api::BootError;

use crate::config::EffectiveConfig;
use crate::delegate::{Hook, OverrideDelegate};
use crate::lock::install_ready_to_lock;

/// USB devices are not detected unless enumeration gets this long
pub const USB_ENUMERATION_STALL_US: usize = 100 * 1000;

/// Prompt drawn at the bottom of the boot logo
pub const BOOT_PROMPT: &str = "Press ESC for Boot Options/Settings";

/// Name printed in front of last-resort diagnostics
pub const CALLER_BASE_NAME: &str = "BdsDxe";

/// External collaborators driven by the hooks
#[derive(Clone, Copy)]
pub struct BootEnvironment<'a> {
    pub boot_services: &'a dyn BootServices,
    pub options: &'a dyn LoadOptionStore,
    pub boot_manager: &'a dyn BootManager,
    pub console: &'a dyn TextConsole,
    pub splash: &'a dyn SplashScreen,
    pub physical_presence: &'a dyn PhysicalPresence,
    pub image: &'a dyn LoadedImage,
}

/// Last hook entered. Phases only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LifecyclePhase {
    Initial,
    BeforeConsole,
    AfterConsole,
    UnableToBoot,
}

impl fmt::Display for LifecyclePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LifecyclePhase::Initial => write!(f, "Initial"),
            LifecyclePhase::BeforeConsole => write!(f, "BeforeConsole"),
            LifecyclePhase::AfterConsole => write!(f, "AfterConsole"),
            LifecyclePhase::UnableToBoot => write!(f, "UnableToBoot"),
        }
    }
}

/// The ways [`PlatformBootManager::unable_to_boot`] can return.
///
/// The built-in path with a boot manager menu never returns: it launches
/// the menu forever.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnableToBootExit {
    /// The platform override handled the hook
    Delegated,
    /// The boot manager menu option could not be fetched; no recovery left
    NoBootManagerMenu(BootError),
}

/// Platform boot manager: the BDS platform hooks
pub struct PlatformBootManager<'a> {
    env: BootEnvironment<'a>,
    config: &'a EffectiveConfig,
    delegate: Once<OverrideDelegate>,
    phase: Cell<LifecyclePhase>,
}

impl<'a> PlatformBootManager<'a> {
    /// Hooks whose override is looked up on the first `before_console`
    pub fn new(env: BootEnvironment<'a>, config: &'a EffectiveConfig) -> Self {
        Self {
            env,
            config,
            delegate: Once::new(),
            phase: Cell::new(LifecyclePhase::Initial),
        }
    }

    /// Hooks with an already chosen delegate; no lookup will happen
    pub fn with_delegate(
        env: BootEnvironment<'a>,
        config: &'a EffectiveConfig,
        delegate: OverrideDelegate,
    ) -> Self {
        Self {
            env,
            config,
            delegate: Once::initialized(delegate),
            phase: Cell::new(LifecyclePhase::Initial),
        }
    }

    pub fn phase(&self) -> LifecyclePhase {
        self.phase.get()
    }

    pub fn config(&self) -> &EffectiveConfig {
        self.config
    }

    /// The resolved delegate, `None` before the first `before_console`
    pub fn delegate(&self) -> Option<&OverrideDelegate> {
        self.delegate.get()
    }

    fn enter(&self, phase: LifecyclePhase) {
        let previous = self.phase.get();
        if previous > phase {
            log::warn!("{} entered after {}, phase not rewound", phase, previous);
            return;
        }
        self.phase.set(phase);
    }

    /// Forward `hook` if an override was resolved. Hooks that run before
    /// resolution use the built-in behavior.
    fn forward(&self, hook: Hook) -> bool {
        self.delegate
            .get()
            .is_some_and(|delegate| delegate.forward(hook))
    }

    /// Platform actions before the console is connected: hot key, end-of-DXE
    /// and ready-to-lock, deferred image dispatch, console setup.
    pub fn before_console(&self) {
        log::info!("PlatformBootManagerBeforeConsole");
        self.enter(LifecyclePhase::BeforeConsole);

        let delegate = self
            .delegate
            .call_once(|| OverrideDelegate::locate(self.env.boot_services));
        if delegate.forward(Hook::BeforeConsole) {
            return;
        }

        self.register_escape_hot_key();

        // Must precede option ROM dispatch
        install_ready_to_lock(self.env.boot_services);

        self.env.boot_manager.dispatch_deferred_images();

        self.env.console.init_platform_consoles();
    }

    /// Map Escape to the boot manager menu. Re-registering an existing key
    /// option overwrites it.
    fn register_escape_hot_key(&self) {
        let menu_file = self.config.boot_manager_menu_file();
        let menu = match self.env.options.boot_manager_menu(&menu_file) {
            Ok(menu) => menu,
            Err(err) => {
                log::warn!("No boot manager menu for the Escape hot key: {}", err);
                return;
            }
        };
        let Some(number) = menu.number else {
            log::warn!("Boot manager menu option has no number, Escape not mapped");
            return;
        };
        if let Err(err) = self.env.options.add_key_option(number, 0, &[InputKey::ESCAPE]) {
            log::warn!("Failed to map Escape to Boot{:04X}: {}", number, err);
        }
    }

    /// Platform actions once consoles exist: splash, device connection, TPM
    /// physical presence, prompt and the security gate.
    pub fn after_console(&self) {
        log::info!("PlatformBootManagerAfterConsole");
        self.enter(LifecyclePhase::AfterConsole);

        if self.forward(Hook::AfterConsole) {
            return;
        }

        let env = &self.env;
        env.console.clear_screen();
        env.splash.enable_logo();

        env.boot_services.stall(USB_ENUMERATION_STALL_US);

        env.boot_manager.connect_all();
        env.boot_manager.refresh_all_boot_options();

        env.physical_presence.process_request();

        #[cfg(feature = "shell-boot-option")]
        self.register_shell();

        env.splash.update_progress(BOOT_PROMPT, Pixel::WHITE, Pixel::BLACK, Pixel::WHITE, 0, 0);
        env.splash.publish_bgrt();

        self.run_security_gate();
    }

    #[cfg(feature = "shell-boot-option")]
    fn register_shell(&self) {
        use upl_api::LoadOptionAttributes;

        let registrar = crate::registrar::OptionRegistrar::new(self.env.image, self.env.options);
        let result = registrar.register_if_absent(
            &self.config.shell_file(),
            "UEFI Shell",
            LoadOptionAttributes::ACTIVE,
        );
        assert_efi_error!(result, "Registering UEFI Shell boot option");
    }

    /// Run the vendor security driver if present. It can only shorten the
    /// boot decision window.
    fn run_security_gate(&self) -> bool {
        let Some(security) = self.env.boot_services.locate_security_protocol(&SECURITY_PROTOCOL_GUID) else {
            log::debug!("Security protocol not present");
            return false;
        };
        let boot_now = security.run();
        if boot_now {
            log::info!("Security driver requested immediate boot, skipping timeout");
            self.config.skip_boot_timeout();
        }
        boot_now
    }

    /// Called once per second while the boot trial loop counts down
    pub fn wait_callback(&self, timeout_remain: u16) {
        if self.forward(Hook::WaitCallback(timeout_remain)) {
            return;
        }
        log::trace!("Boot timeout remaining: {}", timeout_remain);
    }

    /// Last resort after every boot option failed.
    ///
    /// Returns only when the override handled the hook or the boot manager
    /// menu option cannot be fetched. Otherwise it waits for a key (when an
    /// input and output console exist) and then launches the boot manager
    /// menu forever.
    pub fn unable_to_boot(&self) -> UnableToBootExit {
        log::info!("PlatformBootManagerUnableToBoot");
        self.enter(LifecyclePhase::UnableToBoot);

        if self.forward(Hook::UnableToBoot) {
            return UnableToBootExit::Delegated;
        }

        let menu_file = self.config.boot_manager_menu_file();
        let menu = match self.env.options.boot_manager_menu(&menu_file) {
            Ok(menu) => menu,
            Err(err) => {
                log::error!("Boot manager menu unavailable: {}", err);
                return UnableToBootExit::NoBootManagerMenu(err);
            }
        };

        let console = self.env.console;
        if console.has_output() && console.has_input() {
            console.clear_screen();
            console.output_string(&format!(
                "{0}: No bootable option or device was found.\n\
                 {0}: Press any key to enter the Boot Manager Menu.\n",
                CALLER_BASE_NAME
            ));
            assert_efi_error!(console.wait_for_key(), "Waiting for a keystroke");

            // Keys queued during the wait must not reach the menu
            while console.read_key_stroke().is_some() {}
        }

        log::info!("Entering boot manager menu loop: {}", menu);
        loop {
            self.env.boot_manager.boot(&menu);
        }
    }
}
