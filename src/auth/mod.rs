mod issuer;
mod token;

pub use issuer::{TokenIssuer, basic_authorization};
pub use token::{CachedToken, DEFAULT_SAFETY_MARGIN};
