//! Network layer for the browser client.
//!
//! SYSTEM CONTEXT
//! ==============
//! All backend traffic goes through one [`api::Api`] gateway so the bearer
//! credential is attached in exactly one place.

pub mod api;
