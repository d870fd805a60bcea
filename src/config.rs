// SPDX-License-Identifier: MIT

//! Application configuration loaded from environment variables.
//!
//! Secrets are read once at startup and cached in memory; nothing
//! re-reads the environment per request.

use std::env;

/// Price of the one-time unlock, in the currency's smallest unit
/// (paise). ₹299. Fixed server-side so the client cannot tamper with
/// the amount.
pub const UNLOCK_AMOUNT: u64 = 29_900;

/// Currency for the unlock price.
pub const UNLOCK_CURRENCY: &str = "INR";

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // --- Environment Variables (non-sensitive) ---
    /// Razorpay key id (public, shared with the hosted checkout)
    pub razorpay_key_id: String,
    /// Frontend URL for CORS
    pub frontend_url: String,
    /// Server port
    pub port: u16,

    // --- Secrets ---
    /// Razorpay key secret; also the HMAC key for receipt verification
    pub razorpay_key_secret: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// For local development, secrets can be set via a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            razorpay_key_id: env::var("RAZORPAY_KEY_ID")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("RAZORPAY_KEY_ID"))?,
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),

            razorpay_key_secret: env::var("RAZORPAY_KEY_SECRET")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("RAZORPAY_KEY_SECRET"))?,
        })
    }

    /// Default config for testing only.
    pub fn test_default() -> Self {
        Self {
            razorpay_key_id: "rzp_test_key_id".to_string(),
            frontend_url: "http://localhost:5173".to_string(),
            port: 8080,
            razorpay_key_secret: "rzp_test_key_secret".to_string(),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}
