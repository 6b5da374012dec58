//! Application Configuration
//!
//! Configuration for the Payment application layer.

use std::env;
use std::time::Duration;

use platform::retry::RetryConfig;

/// Default chain RPC endpoint
pub const DEFAULT_RPC_URL: &str = "https://api.devnet.solana.com";

/// Payment application configuration
#[derive(Debug, Clone)]
pub struct PaymentConfig {
    /// Simulated signing latency in test mode
    pub test_settle_delay: Duration,
    /// Sender address reported for test-mode payments
    pub test_sender: String,
    /// Chain confirmation polling bounds
    pub confirmation: RetryConfig,
    /// Verify retries (transport failures only)
    pub verify_retry: RetryConfig,
    pub rpc_url: String,
    pub rpc_timeout: Duration,
    /// Cluster name used in explorer links
    pub explorer_cluster: String,
    pub create_endpoint: String,
    pub verify_endpoint: String,
    pub cancel_endpoint: String,
    pub history_endpoint: String,
    pub status_endpoint: String,
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            test_settle_delay: Duration::from_secs(2),
            test_sender: "TEST_WALLET".to_string(),
            confirmation: RetryConfig {
                max_attempts: u32::MAX,
                initial_delay: Duration::from_secs(1),
                max_delay: Duration::from_secs(5),
                multiplier: 2,
                deadline: Duration::from_secs(60),
            },
            verify_retry: RetryConfig::new(2, Duration::from_millis(500), Duration::from_secs(30)),
            rpc_url: DEFAULT_RPC_URL.to_string(),
            rpc_timeout: Duration::from_secs(10),
            explorer_cluster: "devnet".to_string(),
            create_endpoint: "/payments/create".to_string(),
            verify_endpoint: "/payments/verify".to_string(),
            cancel_endpoint: "/payments/cancel".to_string(),
            history_endpoint: "/payments/history".to_string(),
            status_endpoint: "/payments/status".to_string(),
        }
    }
}

impl PaymentConfig {
    /// Short delays for local testing
    pub fn development() -> Self {
        Self {
            test_settle_delay: Duration::ZERO,
            confirmation: RetryConfig::fixed(Duration::from_millis(50), Duration::from_secs(2)),
            verify_retry: RetryConfig::new(2, Duration::from_millis(10), Duration::from_secs(2)),
            ..Default::default()
        }
    }

    /// Load configuration from the environment
    ///
    /// ## Variables
    /// * `NEWSAI_SOLANA_RPC_URL` - chain RPC endpoint (default [`DEFAULT_RPC_URL`])
    /// * `NEWSAI_SOLANA_CLUSTER` - explorer cluster (default `devnet`)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(url) = non_empty_var("NEWSAI_SOLANA_RPC_URL") {
            config.rpc_url = url;
        }
        if let Some(cluster) = non_empty_var("NEWSAI_SOLANA_CLUSTER") {
            config.explorer_cluster = cluster;
        }

        config
    }

    pub fn with_test_settle_delay(mut self, delay: Duration) -> Self {
        self.test_settle_delay = delay;
        self
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
