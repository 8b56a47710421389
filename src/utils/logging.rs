use tracing::{debug, error, info, warn};

pub fn log_request_received(endpoint: &str, method: &str) {
    info!("Request received: {} {}", method, endpoint);
}

pub fn log_request_processed(endpoint: &str, status: u16, duration_ms: u64) {
    info!(
        "Request processed: {} - Status: {} - Duration: {}ms",
        endpoint, status, duration_ms
    );
}

pub fn log_webhook_call(operation: &str, call_id: &str) {
    info!("Webhook call: {} - Call ID: {}", operation, call_id);
}

pub fn log_webhook_error(operation: &str, status: Option<u16>, error: &str) {
    error!(
        "Webhook error: {} - Status: {:?} - Error: {}",
        operation, status, error
    );
}

pub fn log_config_loaded(env: &str) {
    info!("Configuration loaded successfully for environment: {}", env);
}

pub fn log_server_startup(port: u16) {
    info!("🚀 Meta Vendedores middleware server starting on port {}", port);
}

pub fn log_server_ready(port: u16) {
    info!("✅ Server ready and listening on http://0.0.0.0:{}", port);
}

pub fn log_health_check() {
    debug!("Health check requested");
}

pub fn log_validation_error(field: &str, message: &str) {
    warn!("Validation error: {} - {}", field, message);
}

pub fn log_login_success(email: &str, role: &str) {
    info!("✅ Login realizado: {} ({})", email, role);
}

pub fn log_session_cleared(reason: &str) {
    warn!("Cookie de sessão removido: {}", reason);
}

pub fn log_info(message: &str) {
    info!("{}", message);
}

pub fn log_error(message: &str) {
    error!("{}", message);
}

pub fn log_warning(message: &str) {
    warn!("{}", message);
}
