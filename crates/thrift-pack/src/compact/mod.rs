//! Compact Protocol.
//!
//! Reference: <https://github.com/apache/thrift/blob/master/doc/specs/thrift-compact-protocol.md>

mod codec;

pub use codec::CompactCodec;
