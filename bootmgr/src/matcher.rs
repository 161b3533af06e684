//! Load option identity
//!
//! Two load options are the same option when type, attributes, description,
//! file path and optional data all match. The file path comparison is
//! bounded by the size the *key* reports, so a stored option whose path is
//! shorter than the key's never matches, while bytes a stored option carries
//! past the key's terminator are not examined.

use upl_api::LoadOption;

/// Whether `candidate` is the same load option as `key`
pub fn is_same_load_option(key: &LoadOption, candidate: &LoadOption) -> bool {
    let path_size = key.file_path.size();

    key.option_type == candidate.option_type
        && key.attributes == candidate.attributes
        && key.description == candidate.description
        && key.file_path.as_bytes().get(..path_size) == candidate.file_path.as_bytes().get(..path_size)
        && key.optional_data == candidate.optional_data
}

/// Index of the first option in `candidates` that is the same as `key`
pub fn find_load_option(key: &LoadOption, candidates: &[LoadOption]) -> Option<usize> {
    candidates
        .iter()
        .position(|candidate| is_same_load_option(key, candidate))
}
