//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by domain (`auth`, `projects`) so individual components can
//! depend on small focused models. Only `auth` is app-wide context; project
//! state is owned by the page that shows it.

pub mod auth;
pub mod projects;
