// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shareable wrapped ids.
//!
//! The id is a keyed hash of the owner and year, so regenerating the same
//! year lands on the same record while ids stay unguessable without the key.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::{AppError, Result};

type HmacSha256 = Hmac<Sha256>;

/// Bytes of the MAC kept in the id (22 base64url characters).
const ID_BYTES: usize = 16;

/// Deterministic id for `user_id`'s wrapped of `year`.
pub fn wrapped_id(key: &[u8], user_id: u64, year: i32) -> Result<String> {
    let mut mac = HmacSha256::new_from_slice(key)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("HMAC init failed: {}", e)))?;
    mac.update(format!("{}:{}", user_id, year).as_bytes());
    let digest = mac.finalize().into_bytes();

    Ok(URL_SAFE_NO_PAD.encode(&digest[..ID_BYTES]))
}

/// Cheap shape check before hitting the store.
pub fn is_well_formed(id: &str) -> bool {
    id.len() == 22
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}
