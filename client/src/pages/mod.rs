//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration and delegates rendering details
//! to `components`. Pages behind [`crate::components::require_auth`] may
//! assume an authenticated session.

pub mod auth;
pub mod home;
pub mod project_details;
pub mod projects;
