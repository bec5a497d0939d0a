//! Campuscard Storage Library
//!
//! Storage abstraction for approved card assets (photos and proof
//! documents). The verification pipeline writes here only after an upload
//! has been accepted; rejected uploads never reach a backend.
//!
//! # Storage key format
//!
//! Keys are user-scoped and timestamp-qualified so concurrent requests can
//! never collide on a path:
//!
//! - `cards/{user_id}/{label}-{timestamp}-{uuid8}.{ext}`
//!
//! Keys must not contain `..` or a leading `/`. Key generation is
//! centralized in the `keys` module.

pub mod keys;
pub mod local;
pub mod traits;

// Re-export commonly used types
pub use keys::card_asset_key;
pub use local::LocalStorage;
pub use traits::{Storage, StorageError, StorageResult};
