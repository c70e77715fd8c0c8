use serde::{Deserialize, Serialize};

/// JWT claims carried by a bearer credential.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// The user identity the token was minted for.
    pub sub: String,
    /// Expiry as a unix timestamp in seconds.
    pub exp: u64,
}
