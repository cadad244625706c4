//! # X-VERIFY Checksum
//!
//! `sha256_hex(payload || endpoint || salt_key) + "###" + salt_index`
//!
//! Recomputed for every request; never cached.

use base64::{engine::general_purpose::STANDARD, Engine};
use pay_core::{PaymentError, PaymentResult};
use sha2::{Digest, Sha256};

/// Separator between the hex digest and the salt index
pub const CHECKSUM_SEPARATOR: &str = "###";

/// Compute the X-VERIFY header value for an encoded payload
pub fn sign(encoded_payload: &str, endpoint_path: &str, salt_key: &str, salt_index: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(encoded_payload.as_bytes());
    hasher.update(endpoint_path.as_bytes());
    hasher.update(salt_key.as_bytes());

    format!(
        "{}{}{}",
        hex::encode(hasher.finalize()),
        CHECKSUM_SEPARATOR,
        salt_index
    )
}

/// Base64-encode canonical JSON bytes
pub fn encode_payload(canonical_json: &[u8]) -> String {
    STANDARD.encode(canonical_json)
}

/// Decode a base64 payload back to its JSON bytes
pub fn decode_payload(encoded: &str) -> PaymentResult<Vec<u8>> {
    STANDARD
        .decode(encoded)
        .map_err(|e| PaymentError::EncodingError(format!("invalid base64 payload: {}", e)))
}
