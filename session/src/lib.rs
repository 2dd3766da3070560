//! Client-side session core shared by the web UI and the CLI.
//!
//! This crate owns the authentication state machine, the route-guard
//! decision, the persisted-storage contract and the bearer-attaching API
//! gateway. It has no UI or HTTP-stack dependency of its own: callers plug in
//! a [`KeyValueStore`] (browser `localStorage`, a file, memory) and a
//! [`Transport`] (`gloo-net`, `reqwest`, a test double).
//!
//! ```text
//! startup ──► SessionStore::hydrate ──► guard::decide on every protected navigation
//!                   ▲                              │
//!   log_in / log_out (write-through)               ▼
//!                   └──── KeyValueStore ◄──── ApiClient attaches bearer token
//! ```

pub mod error;
pub mod gateway;
pub mod guard;
pub mod projects;
pub mod storage;
pub mod store;
pub mod types;
pub mod validate;

#[cfg(test)]
mod testing;

pub use error::{ApiError, SessionError, StorageError, ValidationError};
pub use gateway::{ApiClient, ApiRequest, ApiResponse, Method, Transport};
pub use guard::{GuardDecision, RedirectLatch, SIGN_IN_PATH, decide};
pub use storage::{KeyValueStore, MemoryStore};
pub use store::{Session, SessionState, SessionStore, authenticate, register};
pub use types::{Credential, NewProject, NewTask, Project, Task, TaskStatus, User};
