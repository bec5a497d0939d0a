use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of identity card being issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardKind {
    Student,
    Staff,
}

impl CardKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CardKind::Student => "student",
            CardKind::Staff => "staff",
        }
    }
}

/// Identity card record as persisted by the surrounding service.
///
/// The verification pipeline never writes this record itself; it only hands
/// back storage keys. A key lands in `photo_key` / `proof_key` strictly after
/// the corresponding check returned an accepted decision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityCard {
    pub id: Uuid,
    pub user_id: Uuid,
    pub kind: CardKind,
    pub full_name: String,
    /// Storage key of the approved face photo.
    pub photo_key: Option<String>,
    /// Storage key of the approved proof document.
    pub proof_key: Option<String>,
    pub issued_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
