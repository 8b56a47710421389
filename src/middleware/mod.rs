pub mod role_guard;

pub use role_guard::{require_admin, require_atendimento, require_gestao, require_vendedor};
