//! Request/response adapter over the employee record service.
//!
//! Callers (an HTTP router, the CLI) hand in raw request parts and get back a
//! status code plus a JSON body; no function in this crate panics.

mod api;
mod envelope;

pub use api::{health, DirectoryApi};
pub use envelope::ApiResponse;
