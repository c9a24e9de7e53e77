//! Binance USDⓈ-M futures integration.

pub mod auth;
pub mod client;
pub mod dto;

use std::sync::Arc;

pub use client::BinanceFuturesClient;

use crate::domain::VenueIdentity;
use crate::error::VenueError;
use crate::port::{AccountClient, ClientOptions};

/// Production USDⓈ-M futures REST endpoint.
pub const MAINNET_URL: &str = "https://fapi.binance.com";

/// Futures testnet REST endpoint.
pub const TESTNET_URL: &str = "https://testnet.binancefuture.com";

/// Construct a mainnet client.
///
/// # Errors
///
/// Returns [`VenueError::Construction`] when the client cannot be built.
pub fn connect_mainnet(
    identity: &VenueIdentity,
    options: &ClientOptions,
) -> Result<Arc<dyn AccountClient>, VenueError> {
    Ok(Arc::new(BinanceFuturesClient::new(
        identity,
        MAINNET_URL,
        options,
    )?))
}

/// Construct a testnet client.
///
/// # Errors
///
/// Returns [`VenueError::Construction`] when the client cannot be built.
pub fn connect_testnet(
    identity: &VenueIdentity,
    options: &ClientOptions,
) -> Result<Arc<dyn AccountClient>, VenueError> {
    Ok(Arc::new(BinanceFuturesClient::new(
        identity,
        TESTNET_URL,
        options,
    )?))
}
