//! Binance USDⓈ-M futures account client.
//!
//! Uses two signed endpoints:
//! - `GET /fapi/v2/balance` - wallet balance per asset
//! - `GET /fapi/v2/positionRisk` - positions for every symbol
//!
//! Requests are not retried. A failed query closes the gate for the current
//! file only; the next file asks again.

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use super::auth::BinanceAuth;
use super::dto::{ApiErrorBody, FuturesBalance, PositionRisk};
use crate::domain::VenueIdentity;
use crate::error::{GateError, VenueError};
use crate::port::{AccountClient, AssetBalance, BalanceSheet, ClientOptions, OpenPosition};

const BALANCE_PATH: &str = "/fapi/v2/balance";
const POSITION_RISK_PATH: &str = "/fapi/v2/positionRisk";

/// HTTP client for one Binance futures account.
pub struct BinanceFuturesClient {
    http: HttpClient,
    base_url: Url,
    auth: BinanceAuth,
    recv_window_ms: u128,
    venue: String,
}

impl BinanceFuturesClient {
    /// Build a client for `identity` against `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`VenueError::Construction`] if the base URL does not parse,
    /// the credentials are empty, or the HTTP client cannot be built.
    pub fn new(
        identity: &VenueIdentity,
        base_url: &str,
        options: &ClientOptions,
    ) -> Result<Self, VenueError> {
        let venue = identity.venue().to_string();
        let construction = |reason: String| VenueError::Construction {
            venue: venue.clone(),
            reason,
        };

        let base_url = Url::parse(base_url).map_err(|e| construction(e.to_string()))?;
        let auth = BinanceAuth::new(&venue, identity.credentials())?;
        let http = HttpClient::builder()
            .timeout(options.timeout)
            .connect_timeout(options.connect_timeout)
            .build()
            .map_err(|e| construction(e.to_string()))?;

        Ok(Self {
            http,
            base_url,
            auth,
            recv_window_ms: options.recv_window.as_millis(),
            venue,
        })
    }

    fn signed_url(&self, path: &str, timestamp_ms: i64) -> Result<Url, GateError> {
        let query = format!(
            "recvWindow={}&timestamp={}",
            self.recv_window_ms, timestamp_ms
        );
        let signature = self.auth.sign(&query);

        let mut url = self
            .base_url
            .join(path)
            .map_err(|e| GateError::Decode(format!("invalid request path {path}: {e}")))?;
        url.set_query(Some(&format!("{query}&signature={signature}")));
        Ok(url)
    }

    async fn signed_get<T>(&self, path: &str) -> Result<T, GateError>
    where
        T: DeserializeOwned,
    {
        let url = self.signed_url(path, chrono::Utc::now().timestamp_millis())?;
        debug!(venue = %self.venue, path, "Signed GET");

        let response = self
            .http
            .get(url)
            .header("X-MBX-APIKEY", self.auth.api_key())
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|err| format!("{} ({})", err.msg, err.code))
                .unwrap_or(body);
            warn!(venue = %self.venue, path, status = status.as_u16(), error = %message, "Venue rejected request");
            return Err(GateError::Api {
                status: status.as_u16(),
                body: message,
            });
        }

        serde_json::from_str(&body).map_err(|e| GateError::Decode(e.to_string()))
    }
}

#[async_trait]
impl AccountClient for BinanceFuturesClient {
    async fn fetch_balance(&self) -> Result<BalanceSheet, GateError> {
        let balances: Vec<FuturesBalance> = self.signed_get(BALANCE_PATH).await?;
        Ok(balances
            .into_iter()
            .map(|b| {
                (
                    b.asset,
                    AssetBalance {
                        total: b.balance,
                        free: b.available_balance,
                    },
                )
            })
            .collect())
    }

    async fn fetch_positions(&self) -> Result<Vec<OpenPosition>, GateError> {
        let positions: Vec<PositionRisk> = self.signed_get(POSITION_RISK_PATH).await?;
        Ok(positions
            .into_iter()
            .map(|p| OpenPosition::new(p.symbol, p.position_amt))
            .collect())
    }

    fn venue_name(&self) -> &str {
        &self.venue
    }
}
