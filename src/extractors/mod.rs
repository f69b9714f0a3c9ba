//! Request extractors.

mod caller;
pub use caller::{CurrentCaller, AUTHORIZATION_SCHEME};
