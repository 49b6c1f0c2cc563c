pub mod user_service;

pub use user_service::{LoginOutcome, UserService};
