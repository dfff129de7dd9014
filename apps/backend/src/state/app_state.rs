use super::security_config::SecurityConfig;

/// Default upper bound for request bodies (64 KiB).
pub const DEFAULT_MAX_PAYLOAD_SIZE: usize = 64 * 1024;

/// Application state containing shared resources
#[derive(Debug, Clone)]
pub struct AppState {
    /// Security configuration including JWT settings
    pub security: SecurityConfig,
    /// Largest accepted request body, in bytes
    pub max_payload_size: usize,
}

impl AppState {
    /// Create a new AppState with the given security config
    pub fn new(security: SecurityConfig) -> Self {
        Self {
            security,
            max_payload_size: DEFAULT_MAX_PAYLOAD_SIZE,
        }
    }

    pub fn with_max_payload_size(mut self, max_payload_size: usize) -> Self {
        self.max_payload_size = max_payload_size;
        self
    }

    /// Create a test AppState with a random security config
    pub fn for_tests() -> Self {
        Self::new(SecurityConfig::for_tests())
    }
}
