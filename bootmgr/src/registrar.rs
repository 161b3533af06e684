//! Firmware volume boot option registration
//!
//! Builds a boot option for an application shipped in the firmware volume
//! this image was loaded from and persists it unless an identical option
//! already exists, so repeated boots never accumulate duplicates.

use upl_api::device_path::fw_vol_file_node;
use upl_api::guid::Guid;
use upl_api::interfaces::{LoadOptionStore, LoadedImage};
use upl_api::load_option::BootOrderPosition;
use upl_api::{BootError, LoadOption, LoadOptionAttributes, LoadOptionType, OptionNumber, Result};

use crate::matcher::find_load_option;

/// What [`OptionRegistrar::register_if_absent`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationOutcome {
    /// Appended to the boot order under the assigned number
    Registered(Option<OptionNumber>),
    /// An identical option is already stored at this index
    AlreadyPresent(usize),
    /// The candidate could not be built; nothing was written
    Skipped(BootError),
}

/// Registers firmware volume files as `Boot####` options
pub struct OptionRegistrar<'a> {
    image: &'a dyn LoadedImage,
    store: &'a dyn LoadOptionStore,
}

impl<'a> OptionRegistrar<'a> {
    pub fn new(image: &'a dyn LoadedImage, store: &'a dyn LoadOptionStore) -> Self {
        Self { image, store }
    }

    /// Build a boot option for `file` and persist it at the end of the boot
    /// order unless it is already present.
    ///
    /// Failure to build the candidate is not an error: boot proceeds
    /// without the entry. Only a failed store write is returned as `Err`.
    pub fn register_if_absent(
        &self,
        file: &Guid,
        description: &str,
        attributes: LoadOptionAttributes,
    ) -> Result<RegistrationOutcome> {
        let mut candidate = match self.build_candidate(file, description, attributes) {
            Ok(candidate) => candidate,
            Err(err) => {
                log::warn!("Not registering \"{}\": {}", description, err);
                return Ok(RegistrationOutcome::Skipped(err));
            }
        };

        let existing = self.store.load_options(LoadOptionType::Boot);
        if let Some(index) = find_load_option(&candidate, &existing) {
            log::debug!("\"{}\" already registered at index {}", description, index);
            return Ok(RegistrationOutcome::AlreadyPresent(index));
        }

        self.store.add_load_option(&mut candidate, BootOrderPosition::End)?;
        log::info!("Registered boot option {}", candidate);
        Ok(RegistrationOutcome::Registered(candidate.number))
    }

    fn build_candidate(
        &self,
        file: &Guid,
        description: &str,
        attributes: LoadOptionAttributes,
    ) -> Result<LoadOption> {
        let base = self.image.device_path()?;
        let path = base.append_node(&fw_vol_file_node(file));
        LoadOption::new(LoadOptionType::Boot, attributes, description, path)
    }
}
