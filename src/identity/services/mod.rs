//! Services built on top of verified identities.

mod profiles;

pub use profiles::{ProfileDirectory, UserProfile};
