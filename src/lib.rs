//! Stripe Connection - payment processor adapter for Stripe
//!
//! This crate translates a payment-orchestration host's authorize, capture and
//! cancel calls into Stripe payment-intent API calls and maps the responses
//! back into normalized transaction results.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
