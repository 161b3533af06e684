//! Recording firmware double shared by the integration tests

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use upl_api::console::{InputKey, Pixel};
use upl_api::device_path::DevicePath;
use upl_api::guid::Guid;
use upl_api::interfaces::{
    BootManager, BootServices, HobList, LoadOptionStore, LoadedImage, PhysicalPresence,
    PlatformBootManagerOverride, SecurityProtocol, SplashScreen, TextConsole,
};
use upl_api::load_option::BootOrderPosition;
use upl_api::{BootError, LoadOption, LoadOptionAttributes, LoadOptionType, OptionNumber, Result};
use upl_bootmgr::lifecycle::BootEnvironment;

/// Panic message raised by [`FakeFirmware::boot`] once the menu loop is reached
pub const MENU_LOOP_SENTINEL: &str = "boot manager menu loop entered";

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    LocateProtocol(Guid),
    InstallProtocol(Guid),
    SignalEventGroup(Guid),
    Stall(usize),
    LocateOverride(Guid),
    LocateSecurity(Guid),
    LoadOptions(LoadOptionType),
    AddLoadOption(String),
    BootManagerMenu(Guid),
    AddKeyOption(OptionNumber, Vec<InputKey>),
    ConnectAll,
    RefreshAll,
    DispatchDeferred,
    Boot(String),
    InitConsoles,
    ClearScreen,
    Output(String),
    WaitForKey,
    ReadKey(Option<InputKey>),
    EnableLogo,
    UpdateProgress(String, Pixel, Pixel),
    PublishBgrt,
    ProcessPhysicalPresence,
    ImageDevicePath,
    Override(&'static str),
}

pub type EventLog = Rc<RefCell<Vec<Event>>>;

pub struct FakeFirmware {
    pub events: EventLog,
    pub smm_present: bool,
    pub override_protocol: Option<Rc<dyn PlatformBootManagerOverride>>,
    pub security: Option<Rc<dyn SecurityProtocol>>,
    pub menu: Result<LoadOption>,
    pub options: RefCell<Vec<LoadOption>>,
    pub store_write_error: Option<BootError>,
    pub has_output: bool,
    pub has_input: bool,
    pub key_queue: RefCell<VecDeque<InputKey>>,
    pub boots_before_sentinel: Cell<usize>,
    pub menu_hob: Option<Vec<u8>>,
}

impl FakeFirmware {
    pub fn new() -> Self {
        Self {
            events: Rc::new(RefCell::new(Vec::new())),
            smm_present: true,
            override_protocol: None,
            security: None,
            menu: Ok(menu_option()),
            options: RefCell::new(Vec::new()),
            store_write_error: None,
            has_output: true,
            has_input: true,
            key_queue: RefCell::new(VecDeque::new()),
            boots_before_sentinel: Cell::new(1),
            menu_hob: None,
        }
    }

    pub fn env(&self) -> BootEnvironment<'_> {
        BootEnvironment {
            boot_services: self,
            options: self,
            boot_manager: self,
            console: self,
            splash: self,
            physical_presence: self,
            image: self,
        }
    }

    pub fn record(&self, event: Event) {
        self.events.borrow_mut().push(event);
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }

    pub fn position(&self, event: &Event) -> Option<usize> {
        self.events.borrow().iter().position(|e| e == event)
    }

    pub fn count(&self, predicate: impl Fn(&Event) -> bool) -> usize {
        self.events.borrow().iter().filter(|e| predicate(e)).count()
    }
}

pub fn volume_path() -> DevicePath {
    DevicePath::end()
        .append_node(&[0x02, 0x01, 12, 0, 0xd0, 0x41, 0x03, 0x0a, 0, 0, 0, 0])
        .append_node(&[0x01, 0x01, 6, 0, 0, 0x1f])
}

/// Keystroke of a printable ASCII character
pub fn printable(c: u8) -> InputKey {
    InputKey {
        scan_code: 0,
        unicode_char: u16::from(c),
    }
}

pub fn menu_option() -> LoadOption {
    LoadOption::new(
        LoadOptionType::Boot,
        LoadOptionAttributes::CATEGORY_APP | LoadOptionAttributes::HIDDEN,
        "UEFI Boot Manager Menu",
        volume_path(),
    )
    .unwrap()
    .with_number(0x0001)
}

impl BootServices for FakeFirmware {
    fn locate_protocol(&self, protocol: &Guid) -> bool {
        self.record(Event::LocateProtocol(*protocol));
        self.smm_present
    }

    fn install_protocol(&self, protocol: &Guid) -> Result<()> {
        self.record(Event::InstallProtocol(*protocol));
        Ok(())
    }

    fn signal_event_group(&self, group: &Guid) {
        self.record(Event::SignalEventGroup(*group));
    }

    fn stall(&self, microseconds: usize) {
        self.record(Event::Stall(microseconds));
    }

    fn locate_override_protocol(&self, protocol: &Guid) -> Option<Rc<dyn PlatformBootManagerOverride>> {
        self.record(Event::LocateOverride(*protocol));
        self.override_protocol.clone()
    }

    fn locate_security_protocol(&self, protocol: &Guid) -> Option<Rc<dyn SecurityProtocol>> {
        self.record(Event::LocateSecurity(*protocol));
        self.security.clone()
    }
}

impl LoadOptionStore for FakeFirmware {
    fn load_options(&self, option_type: LoadOptionType) -> Vec<LoadOption> {
        self.record(Event::LoadOptions(option_type));
        self.options
            .borrow()
            .iter()
            .filter(|o| o.option_type == option_type)
            .cloned()
            .collect()
    }

    fn add_load_option(&self, option: &mut LoadOption, position: BootOrderPosition) -> Result<()> {
        assert_eq!(position, BootOrderPosition::End);
        self.record(Event::AddLoadOption(option.description.clone()));
        if let Some(err) = self.store_write_error {
            return Err(err);
        }
        let number = 0x1000 + self.options.borrow().len() as OptionNumber;
        option.number = Some(number);
        self.options.borrow_mut().push(option.clone());
        Ok(())
    }

    fn boot_manager_menu(&self, menu_file: &Guid) -> Result<LoadOption> {
        self.record(Event::BootManagerMenu(*menu_file));
        self.menu.clone()
    }

    fn add_key_option(&self, target: OptionNumber, _modifier: u32, keys: &[InputKey]) -> Result<()> {
        self.record(Event::AddKeyOption(target, keys.to_vec()));
        Ok(())
    }
}

impl BootManager for FakeFirmware {
    fn connect_all(&self) {
        self.record(Event::ConnectAll);
    }

    fn refresh_all_boot_options(&self) {
        self.record(Event::RefreshAll);
    }

    fn dispatch_deferred_images(&self) {
        self.record(Event::DispatchDeferred);
    }

    fn boot(&self, option: &LoadOption) {
        self.record(Event::Boot(option.description.clone()));
        let remaining = self.boots_before_sentinel.get().saturating_sub(1);
        self.boots_before_sentinel.set(remaining);
        if remaining == 0 {
            panic!("{}", MENU_LOOP_SENTINEL);
        }
    }
}

impl TextConsole for FakeFirmware {
    fn init_platform_consoles(&self) {
        self.record(Event::InitConsoles);
    }

    fn has_output(&self) -> bool {
        self.has_output
    }

    fn has_input(&self) -> bool {
        self.has_input
    }

    fn clear_screen(&self) {
        self.record(Event::ClearScreen);
    }

    fn output_string(&self, text: &str) {
        self.record(Event::Output(text.to_string()));
    }

    fn wait_for_key(&self) -> Result<()> {
        self.record(Event::WaitForKey);
        if self.key_queue.borrow().is_empty() {
            return Err(BootError::NotFound("no key queued"));
        }
        Ok(())
    }

    fn read_key_stroke(&self) -> Option<InputKey> {
        let key = self.key_queue.borrow_mut().pop_front();
        self.record(Event::ReadKey(key));
        key
    }
}

impl SplashScreen for FakeFirmware {
    fn enable_logo(&self) {
        self.record(Event::EnableLogo);
    }

    fn update_progress(
        &self,
        title: &str,
        title_foreground: Pixel,
        title_background: Pixel,
        _progress_color: Pixel,
        _progress: usize,
        _previous_progress: usize,
    ) {
        self.record(Event::UpdateProgress(title.to_string(), title_foreground, title_background));
    }

    fn publish_bgrt(&self) {
        self.record(Event::PublishBgrt);
    }
}

impl PhysicalPresence for FakeFirmware {
    fn process_request(&self) {
        self.record(Event::ProcessPhysicalPresence);
    }
}

impl LoadedImage for FakeFirmware {
    fn device_path(&self) -> Result<DevicePath> {
        self.record(Event::ImageDevicePath);
        Ok(volume_path())
    }
}

impl HobList for FakeFirmware {
    fn first_guid_hob(&self, _guid: &Guid) -> Option<&[u8]> {
        self.menu_hob.as_deref()
    }
}

/// Override double that only records which hooks reached it
pub struct RecordingOverride {
    pub events: EventLog,
}

impl PlatformBootManagerOverride for RecordingOverride {
    fn before_console(&self) {
        self.events.borrow_mut().push(Event::Override("before_console"));
    }

    fn after_console(&self) {
        self.events.borrow_mut().push(Event::Override("after_console"));
    }

    fn wait_callback(&self, _timeout_remain: u16) {
        self.events.borrow_mut().push(Event::Override("wait_callback"));
    }

    fn unable_to_boot(&self) {
        self.events.borrow_mut().push(Event::Override("unable_to_boot"));
    }
}
