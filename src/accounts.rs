//! User accounts: credentials, roles and the in-memory directory.

mod directory;
mod model;

pub use directory::UserDirectory;
pub use model::{Role, User};
