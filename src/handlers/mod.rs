// Um módulo por área do painel, espelhando as rotas /api/*.
pub mod auth;
pub mod health;
pub mod messages;
pub mod reports;
pub mod sessions;
pub mod users;
pub mod vendors;

pub use auth::*;
pub use health::*;
pub use messages::*;
pub use reports::*;
pub use sessions::*;
pub use users::*;
pub use vendors::*;
