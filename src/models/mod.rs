pub mod client;
pub mod message;
pub mod session;
pub mod template;
pub mod user;

pub use client::ClientMatch;
pub use message::SendMessageRequest;
pub use session::{AssignVendorRequest, CreateSessionRequest, SessionData};
pub use template::Template;
pub use user::{LoginRequest, RegisterRequest, Role, User};
