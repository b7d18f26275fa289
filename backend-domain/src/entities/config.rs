// Runtime configuration shared across layers

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub bind_addr: String,
    pub api_token: Option<String>,
    pub roster_dir: String,
    pub default_page_limit: usize,
    pub max_page_limit: usize,
    pub max_body_bytes: u64,
    pub request_timeout_seconds: u64,
}
