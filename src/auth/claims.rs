use serde::{Deserialize, Serialize};

/// Token payload: the account's phone number plus an absolute expiry.
/// Tokens are self-contained; nothing is persisted server-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub phone: String,
    pub exp: usize, // unix timestamp
}
