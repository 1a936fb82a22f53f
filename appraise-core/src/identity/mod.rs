//! Login session state: the persisted token and identity record

mod store;
mod types;

pub use store::IdentityStore;
pub use types::{Identity, Role};
