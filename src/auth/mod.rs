//! Authentication: token decoding, backend auth calls and the client session

pub mod claims;
pub mod extract;
pub mod service;
pub mod session;
pub mod store;

pub use claims::{decode_claims, sign_claims, verify_claims, TokenClaims, TokenDecoder, User};
pub use extract::{bearer_token, AdminUser, AuthenticatedUser, BearerToken};
pub use service::{AuthService, LoginSuccess};
pub use session::{landing_path, AuthSession, LOGIN_PAGE};
pub use store::{FileStore, MemoryStore, TokenStore, TOKEN_KEY};
