//! OTP-style verification record, keyed by WhatsApp number.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationToken {
    pub id: String,
    pub whatsapp_number: String,
    /// 6-digit numeric code.
    pub token: String,
    pub created_at: DateTime<Utc>,
}

impl VerificationToken {
    pub fn issue(whatsapp_number: String, token: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            whatsapp_number,
            token,
            created_at: Utc::now(),
        }
    }
}
