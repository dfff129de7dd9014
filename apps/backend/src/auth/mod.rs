pub mod claims;
pub mod credentials;
pub mod jwt;

pub use claims::{Claims, TokenClaims, GOLD_CODES_READ};
pub use jwt::{mint_access_token, verify_access_token, TokenError};
