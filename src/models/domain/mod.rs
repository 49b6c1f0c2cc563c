pub mod user;
pub use user::{Role, User};
