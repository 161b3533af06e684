//! End-of-DXE and SMM ready-to-lock
//!
//! Signalling end-of-DXE lets every agent finish its one-time platform
//! configuration; installing the ready-to-lock protocol then locks SMM.
//! The signal must always come first.

use upl_api::guid::{DXE_SMM_READY_TO_LOCK_PROTOCOL_GUID, END_OF_DXE_EVENT_GROUP_GUID, SMM_ACCESS2_PROTOCOL_GUID};
use upl_api::interfaces::BootServices;

/// What [`install_ready_to_lock`] did after signalling end-of-DXE
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockState {
    /// Ready-to-lock protocol installed
    Locked,
    /// No SMM access protocol on this platform, nothing to lock
    NoSmm,
    /// Installation was attempted and failed
    Failed,
}

/// Signal end-of-DXE, then lock SMM if the platform has it
pub fn install_ready_to_lock(boot_services: &dyn BootServices) -> LockState {
    log::info!("InstallReadyToLock entering");

    boot_services.signal_event_group(&END_OF_DXE_EVENT_GROUP_GUID);
    log::debug!("All EndOfDxe callbacks have returned successfully");

    if !boot_services.locate_protocol(&SMM_ACCESS2_PROTOCOL_GUID) {
        log::debug!("SMM access protocol not present, skipping ready-to-lock");
        return LockState::NoSmm;
    }

    let result = boot_services.install_protocol(&DXE_SMM_READY_TO_LOCK_PROTOCOL_GUID);
    let state = if result.is_ok() { LockState::Locked } else { LockState::Failed };
    assert_efi_error!(result, "Installing DXE SMM ready-to-lock protocol");

    log::info!("InstallReadyToLock end");
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use core::cell::RefCell;
    use upl_api::guid::Guid;
    use upl_api::interfaces::{PlatformBootManagerOverride, SecurityProtocol};
    use upl_api::{BootError, Result};

    #[derive(Debug, PartialEq)]
    enum Call {
        Signal(Guid),
        Locate(Guid),
        Install(Guid),
    }

    struct Services {
        smm: bool,
        install_result: Result<()>,
        calls: RefCell<Vec<Call>>,
    }

    impl Services {
        fn new(smm: bool, install_result: Result<()>) -> Self {
            Self { smm, install_result, calls: RefCell::new(Vec::new()) }
        }
    }

    impl BootServices for Services {
        fn locate_protocol(&self, protocol: &Guid) -> bool {
            self.calls.borrow_mut().push(Call::Locate(*protocol));
            self.smm
        }
        fn install_protocol(&self, protocol: &Guid) -> Result<()> {
            self.calls.borrow_mut().push(Call::Install(*protocol));
            self.install_result
        }
        fn signal_event_group(&self, group: &Guid) {
            self.calls.borrow_mut().push(Call::Signal(*group));
        }
        fn stall(&self, _microseconds: usize) {}
        fn locate_override_protocol(&self, _protocol: &Guid) -> Option<Rc<dyn PlatformBootManagerOverride>> {
            None
        }
        fn locate_security_protocol(&self, _protocol: &Guid) -> Option<Rc<dyn SecurityProtocol>> {
            None
        }
    }

    #[test]
    fn test_signal_precedes_lock() {
        let services = Services::new(true, Ok(()));
        assert_eq!(install_ready_to_lock(&services), LockState::Locked);
        assert_eq!(
            *services.calls.borrow(),
            vec![
                Call::Signal(END_OF_DXE_EVENT_GROUP_GUID),
                Call::Locate(SMM_ACCESS2_PROTOCOL_GUID),
                Call::Install(DXE_SMM_READY_TO_LOCK_PROTOCOL_GUID),
            ]
        );
    }

    #[test]
    fn test_no_smm_skips_lock() {
        let services = Services::new(false, Ok(()));
        assert_eq!(install_ready_to_lock(&services), LockState::NoSmm);
        assert_eq!(services.calls.borrow().len(), 2);
        assert_eq!(services.calls.borrow()[0], Call::Signal(END_OF_DXE_EVENT_GROUP_GUID));
    }

    #[test]
    #[cfg_attr(debug_assertions, should_panic(expected = "ready-to-lock protocol failed"))]
    fn test_install_failure_is_assertion_level() {
        let services = Services::new(true, Err(BootError::OutOfResources));
        assert_eq!(install_ready_to_lock(&services), LockState::Failed);
    }
}
