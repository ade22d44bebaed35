//! Protocol selection and decoder limits.

use serde::{Deserialize, Serialize};

/// Wire protocol used for one encode or decode call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Protocol {
    /// Standard Binary Protocol: fixed-width big-endian fields.
    #[default]
    Standard,
    /// Compact Protocol: varints, delta field ids, nibble-packed headers.
    Compact,
}

/// Optional resource limits applied while decoding.
///
/// Both limits are off by default: nesting depth and collection counts are
/// otherwise bounded only by the input itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct DecoderConfig {
    /// Maximum nesting of structs and collections below the root.
    pub max_depth: Option<usize>,
    /// Maximum element count of a single list, set or map.
    pub max_container_size: Option<usize>,
}

impl DecoderConfig {
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    pub fn with_max_container_size(mut self, size: usize) -> Self {
        self.max_container_size = Some(size);
        self
    }
}
