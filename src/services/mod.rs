pub mod n8n_api;

pub use n8n_api::N8nApiService;
