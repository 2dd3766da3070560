//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components read the shared session signal from Leptos context; pages pass
//! them plain data for everything else.

pub mod navbar;
pub mod project_card;
pub mod require_auth;
pub mod task_card;
