#![allow(dead_code)]

pub mod schemas;

use base64::Engine;

/// Decodes a base64 wire capture.
pub fn b64(s: &str) -> Vec<u8> {
    base64::engine::general_purpose::STANDARD
        .decode(s)
        .unwrap_or_else(|e| panic!("bad fixture base64 {s:?}: {e}"))
}

pub mod fixtures {
    pub const FOUNDATION_STANDARD: &str =
        "AgABAAQAAj/zvnbItDlYBgADAIAIAAQAAAAXCgAFAAAAAAABh8ULAAYAAAALc29tZSBzdHJpbmcA";
    pub const FOUNDATION_COMPACT: &str = "EhdYObTIdr7zPxSAAhUuFoqfDBgLc29tZSBzdHJpbmcA";

    pub const OPTIONAL_STANDARD: &str = "BgABAAwCAAIBAA==";
    pub const OPTIONAL_COMPACT: &str = "FBgRAA==";
    pub const OPTIONAL_NIL_STANDARD: &str = "AgACAQA=";
    pub const OPTIONAL_NIL_COMPACT: &str = "IQA=";

    pub const SUBOBJECT_STANDARD: &str = "DAABBgABAAwCAAIBAAYAAgAyAA==";
    pub const SUBOBJECT_COMPACT: &str = "HBQYEQAUZAA=";
    pub const SUBOBJECT_NIL_COMPACT: &str = "JGQA";
    pub const SUBOBJECT_NESTED_NIL_COMPACT: &str = "HCEAFGQA";

    pub const COLLECTIONS_STANDARD: &str =
        "DwABBAAAAAI/8ZmZmZmZmkABmZmZmZmaDQACCwsAAAABAAAAAWEAAAAEYXNkZg4AAwgAAAABAAAAAQA=";
    pub const COLLECTIONS_COMPACT: &str = "GSeamZmZmZnxP5qZmZmZmQFAGwGIAWEEYXNkZhoVAgA=";
    pub const COLLECTIONS_EMPTY_COMPACT: &str = "GQcbABoFAA==";

    pub const LETTER_STANDARD: &str = "CAABAAAAAQA=";
    pub const LETTER_COMPACT: &str = "FQIA";

    pub const DATA_STANDARD: &str = "CwABAAAABHRlc3QDAAIFAA==";
    pub const DATA_COMPACT: &str = "GAR0ZXN0EwUA";

    pub const UNION_A_STANDARD: &str = "DAABDAABCwABAAAABnN0cmluZwAAAA==";
    pub const UNION_A_COMPACT: &str = "HBwYBnN0cmluZwAAAA==";
    pub const UNION_B_STANDARD: &str = "DAABDAACCgABAAAAAAAAAHsAAAA=";
    pub const UNION_B_COMPACT: &str = "HCwW9gEAAAA=";
}
