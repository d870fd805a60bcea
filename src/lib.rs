// SPDX-License-Identifier: MIT

//! Backdrop Gateway: payment-gated access to the Backdrop image editor.
//!
//! This crate provides the backend API that takes a visitor through
//! sign-in, Razorpay checkout, and payment signature verification, and
//! persists the entitlement flag that unlocks the editor.

pub mod access;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;

use config::Config;
use services::RazorpayClient;
use store::SharedStore;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub store: SharedStore,
    pub razorpay: RazorpayClient,
}
