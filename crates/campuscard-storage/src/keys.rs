//! Shared key generation for storage backends.
//!
//! Key format: `cards/{user_id}/{label}-{timestamp}-{uuid8}.{ext}`.

use chrono::Utc;
use uuid::Uuid;

/// Generate a storage key for a card asset owned by `user_id`.
///
/// `label` names the asset kind (`photo`, `proof`). The timestamp plus a
/// short random suffix makes the key unique per request, so the write is
/// at-most-once and concurrent uploads for the same user cannot collide.
pub fn card_asset_key(user_id: Uuid, label: &str, extension: &str) -> String {
    let stamp = Utc::now().format("%Y%m%d%H%M%S");
    let suffix = &Uuid::new_v4().simple().to_string()[..8];
    format!("cards/{}/{}-{}-{}.{}", user_id, label, stamp, suffix, extension)
}
