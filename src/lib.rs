//! Rust SDK for the maib MIA QR and Request-to-Pay API.
//!
//! The SDK covers three areas:
//!
//! * [`client`] – typed HTTP client for the REST endpoints (authentication
//!   token, QR code lifecycle, payments, request-to-pay, sandbox
//!   simulation);
//! * [`objects`] – wire types for requests, responses, and callback
//!   notifications;
//! * [`signature`] – computation and verification of the signature sent
//!   with every callback notification.
//!
//! The HTTP client is gated behind the `client` cargo feature (enabled by
//! default). A webhook receiver that only needs the shared types and the
//! signature codec can disable it and skip the `reqwest` stack entirely.

#[cfg(feature = "client")]
pub mod client;
pub mod config;
pub mod objects;
pub mod signature;
