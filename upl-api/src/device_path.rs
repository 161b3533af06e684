//! Device path model
//!
//! A device path is a packed sequence of variable-length nodes. Each node
//! starts with a four byte header `{type: u8, sub_type: u8, length: u16}`
//! (little-endian length, header included) and the sequence is terminated
//! by an End-Entire node. Only the operations the boot manager needs are
//! modelled: measuring, appending and building firmware volume file nodes.

use alloc::vec::Vec;
use core::fmt;

use crate::guid::Guid;

/// Size of a device path node header
pub const NODE_HEADER_SIZE: usize = 4;

/// Media device path type
pub const MEDIA_DEVICE_PATH: u8 = 0x04;
/// PIWG firmware file sub-type of the media type
pub const MEDIA_PIWG_FW_FILE_DP: u8 = 0x06;
/// End of hardware device path type
pub const END_DEVICE_PATH_TYPE: u8 = 0x7f;
/// End of entire device path sub-type
pub const END_ENTIRE_DEVICE_PATH_SUBTYPE: u8 = 0xff;
/// End of this instance sub-type
pub const END_INSTANCE_DEVICE_PATH_SUBTYPE: u8 = 0x01;

/// Length of a firmware volume file node
pub const FW_VOL_FILE_NODE_SIZE: usize = NODE_HEADER_SIZE + 16;

const END_ENTIRE_NODE: [u8; NODE_HEADER_SIZE] = [
    END_DEVICE_PATH_TYPE,
    END_ENTIRE_DEVICE_PATH_SUBTYPE,
    NODE_HEADER_SIZE as u8,
    0,
];

/// Single device path node, borrowed from its containing path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DevicePathNode<'a> {
    bytes: &'a [u8],
}

impl<'a> DevicePathNode<'a> {
    /// Node type
    pub fn node_type(&self) -> u8 {
        self.bytes[0]
    }

    /// Node sub-type
    pub fn sub_type(&self) -> u8 {
        self.bytes[1]
    }

    /// Declared node length, header included
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the node has no payload beyond its header
    pub fn is_empty(&self) -> bool {
        self.bytes.len() == NODE_HEADER_SIZE
    }

    /// Node payload following the header
    pub fn data(&self) -> &'a [u8] {
        &self.bytes[NODE_HEADER_SIZE..]
    }

    /// Raw node bytes, header included
    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// End-Entire terminator
    pub fn is_end_entire(&self) -> bool {
        self.node_type() == END_DEVICE_PATH_TYPE
            && self.sub_type() == END_ENTIRE_DEVICE_PATH_SUBTYPE
    }
}

/// Iterator over the nodes of a device path, stopping after the terminator
pub struct Nodes<'a> {
    remaining: &'a [u8],
    done: bool,
}

impl<'a> Iterator for Nodes<'a> {
    type Item = DevicePathNode<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.remaining.len() < NODE_HEADER_SIZE {
            return None;
        }
        let len = u16::from_le_bytes([self.remaining[2], self.remaining[3]]) as usize;
        if len < NODE_HEADER_SIZE || len > self.remaining.len() {
            #[cfg(feature = "log")]
            log::trace!("Truncated device path node (length {})", len);
            self.done = true;
            return None;
        }
        let (node, rest) = self.remaining.split_at(len);
        let node = DevicePathNode { bytes: node };
        self.remaining = rest;
        self.done = node.is_end_entire();
        Some(node)
    }
}

/// Owned device path
///
/// The byte buffer may carry trailing data after the terminator; such bytes
/// are retained but not counted by [`DevicePath::size`].
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct DevicePath {
    bytes: Vec<u8>,
}

impl DevicePath {
    /// Device path consisting only of the End-Entire node
    pub fn end() -> Self {
        Self {
            bytes: END_ENTIRE_NODE.to_vec(),
        }
    }

    /// Wrap raw device path bytes without validation
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            bytes: bytes.to_vec(),
        }
    }

    /// Whether the node chain is well formed up to an End-Entire node
    pub fn is_terminated(&self) -> bool {
        self.terminator_len() != 0
    }

    /// Iterate over nodes up to and including the terminator
    pub fn nodes(&self) -> Nodes<'_> {
        Nodes {
            remaining: &self.bytes,
            done: false,
        }
    }

    /// Size in bytes up to and including the first End-Entire node.
    ///
    /// A path without a terminator reports the length of its well-formed
    /// node prefix.
    pub fn size(&self) -> usize {
        self.nodes().map(|node| node.len()).sum()
    }

    /// Raw bytes, including any trailing data after the terminator
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Number of nodes before the terminator
    pub fn node_count(&self) -> usize {
        self.nodes().filter(|node| !node.is_end_entire()).count()
    }

    /// Append a single node, replacing this path's terminator.
    ///
    /// `node` must be a complete node (header plus payload).
    pub fn append_node(&self, node: &[u8]) -> Self {
        let body = self.size().saturating_sub(self.terminator_len());
        let mut bytes = Vec::with_capacity(body + node.len() + NODE_HEADER_SIZE);
        bytes.extend_from_slice(&self.bytes[..body]);
        bytes.extend_from_slice(node);
        bytes.extend_from_slice(&END_ENTIRE_NODE);
        Self { bytes }
    }

    fn terminator_len(&self) -> usize {
        match self.nodes().last() {
            Some(node) if node.is_end_entire() => node.len(),
            _ => 0,
        }
    }
}

impl fmt::Debug for DevicePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        for node in self.nodes() {
            list.entry(&format_args!(
                "{:02x}/{:02x}[{}]",
                node.node_type(),
                node.sub_type(),
                node.len()
            ));
        }
        list.finish()
    }
}

/// Build a firmware volume file node naming `file` in the current volume
pub fn fw_vol_file_node(file: &Guid) -> [u8; FW_VOL_FILE_NODE_SIZE] {
    let mut node = [0u8; FW_VOL_FILE_NODE_SIZE];
    node[0] = MEDIA_DEVICE_PATH;
    node[1] = MEDIA_PIWG_FW_FILE_DP;
    node[2..4].copy_from_slice(&(FW_VOL_FILE_NODE_SIZE as u16).to_le_bytes());
    node[NODE_HEADER_SIZE..].copy_from_slice(file.as_bytes());
    node
}
