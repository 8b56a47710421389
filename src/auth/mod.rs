pub mod credentials;
pub mod session;

pub use credentials::credential_digest;
pub use session::{issue_cookie, removal_cookie, SessionState, SESSION_COOKIE};
