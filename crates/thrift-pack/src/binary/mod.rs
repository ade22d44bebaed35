//! Standard Binary Protocol.
//!
//! Reference: <https://github.com/apache/thrift/blob/master/doc/specs/thrift-binary-protocol.md>

mod codec;

pub use codec::BinaryCodec;
pub(crate) use codec::{put_i16, take_i16};
