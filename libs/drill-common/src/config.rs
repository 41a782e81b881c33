// Endpoint constants shared by the proxy and its clients.
// Keeping them here means the server routes and client URLs never drift.

/// Path of the code execution proxy endpoint
pub const RUN_PATH: &str = "/api/run";

/// Path of the health check endpoint
pub const STATUS_PATH: &str = "/status";

/// Address the proxy listens on
pub const BIND_ADDR: &str = "0.0.0.0:3000";

/// Where clients look for the proxy unless told otherwise
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:3000";

/// Full URL of the run endpoint for a server base URL
pub fn run_url(server_url: &str) -> String {
    format!("{}{}", server_url.trim_end_matches('/'), RUN_PATH)
}
