//! HMAC-SHA256 request signing for the Binance REST API.
//!
//! Signature format: `hex(HMAC-SHA256(secret, query_string))`, appended to the
//! query as `signature=`. The api key travels in the `X-MBX-APIKEY` header.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::domain::Credentials;
use crate::error::VenueError;

type HmacSha256 = Hmac<Sha256>;

/// Holds the api key and a keyed MAC ready for signing.
#[derive(Clone)]
pub struct BinanceAuth {
    api_key: String,
    mac: HmacSha256,
}

impl std::fmt::Debug for BinanceAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BinanceAuth")
            .field("api_key", &self.api_key)
            .field("mac", &"<redacted>")
            .finish()
    }
}

impl BinanceAuth {
    /// Key a MAC with the account secret.
    ///
    /// # Errors
    ///
    /// Returns [`VenueError::Construction`] if the api key or secret is empty.
    pub fn new(venue: &str, credentials: &Credentials) -> Result<Self, VenueError> {
        let construction = |reason: &str| VenueError::Construction {
            venue: venue.to_string(),
            reason: reason.to_string(),
        };

        if credentials.api_key().trim().is_empty() {
            return Err(construction("api key is empty"));
        }
        if credentials.api_secret().is_empty() {
            return Err(construction("api secret is empty"));
        }

        let mac = HmacSha256::new_from_slice(credentials.api_secret().as_bytes())
            .map_err(|e| construction(&e.to_string()))?;

        Ok(Self {
            api_key: credentials.api_key().to_string(),
            mac,
        })
    }

    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Sign a query string, returning the lowercase hex signature.
    #[must_use]
    pub fn sign(&self, query: &str) -> String {
        let mut mac = self.mac.clone();
        mac.update(query.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signs_documented_example() {
        let creds = Credentials::new(
            "vmPUZE6mv9SD5VNHk4HlWFsOr6aKE2zvsw0MuIgwCIPy6utIco14y7Ju91duEh8A",
            "NhqPtmdSJYdKjVHjA7PZj4Mge3R5YNiP1e3UZjInClVN65XAbvqqM6A7H5fATj0j",
        );
        let auth = BinanceAuth::new("binance", &creds).expect("auth");
        let query = "symbol=LTCBTC&side=BUY&type=LIMIT&timeInForce=GTC&quantity=1&price=0.1&recvWindow=5000&timestamp=1499827319559";
        assert_eq!(
            auth.sign(query),
            "c8db56825ae71d6d79447849e617115f4a920fa2acdcab2b053c4b2838bd6b71"
        );
    }

    #[test]
    fn signing_is_repeatable() {
        let auth = BinanceAuth::new("binance", &Credentials::new("k", "s")).expect("auth");
        assert_eq!(auth.sign("timestamp=1"), auth.sign("timestamp=1"));
        assert_ne!(auth.sign("timestamp=1"), auth.sign("timestamp=2"));
    }

    #[test]
    fn rejects_empty_credentials() {
        assert!(matches!(
            BinanceAuth::new("binance", &Credentials::new("", "s")),
            Err(VenueError::Construction { .. })
        ));
        assert!(matches!(
            BinanceAuth::new("binance", &Credentials::new("k", "")),
            Err(VenueError::Construction { .. })
        ));
    }

    #[test]
    fn debug_hides_secret() {
        let auth = BinanceAuth::new("binance", &Credentials::new("k", "topsecret")).expect("auth");
        assert!(!format!("{auth:?}").contains("topsecret"));
    }
}
