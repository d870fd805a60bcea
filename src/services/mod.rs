// SPDX-License-Identifier: MIT

//! External service clients.

pub mod razorpay;

pub use razorpay::RazorpayClient;
