//! Quidax exchange integration.
//!
//! Wraps the authenticated `POST /users/{user_id}/wallets/{currency}/addresses`
//! call and unwraps the `{ status, data }` envelope the exchange returns.

pub mod client;

pub use client::QuidaxClient;
