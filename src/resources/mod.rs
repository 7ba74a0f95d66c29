//! Per-entity accessors for the Repository service
//!
//! Each resource is a thin wrapper that builds a URL and delegates to the
//! HTTP layer; all of them read the session token through the shared
//! [`Repository`](crate::Repository) handle.

pub use annotations::Annotations;
pub use objects::Objects;
pub use seed_data::SeedData;
pub use timelines::Timelines;
pub use tokens::Tokens;

mod annotations;
mod objects;
mod seed_data;
mod timelines;
mod tokens;

use serde::Deserialize;

/// Response shape of the create endpoints: `{"id": n}`.
#[derive(Debug, Deserialize)]
pub(crate) struct Created {
    pub(crate) id: u64,
}
