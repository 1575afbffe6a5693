use std::net::{IpAddr, Ipv4Addr};
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, redirect};
use tokio::sync::Semaphore;

use crate::error::{AppError, AppResult, HttpError};

pub const DEFAULT_REDIRECTS: usize = 10;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_LOCAL_ADDR: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
const TCP_KEEPALIVE: Duration = Duration::from_secs(30);

/// Client settings shared by every request of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttackerConfig {
    /// Redirects followed before giving up. `0` disables following.
    pub redirects: usize,
    /// Whole-request timeout. `None` waits forever.
    pub timeout: Option<Duration>,
    pub local_addr: IpAddr,
    /// Cap on concurrent requests in rate mode.
    pub max_in_flight: Option<NonZeroUsize>,
}

impl Default for AttackerConfig {
    fn default() -> Self {
        Self {
            redirects: DEFAULT_REDIRECTS,
            timeout: Some(DEFAULT_TIMEOUT),
            local_addr: DEFAULT_LOCAL_ADDR,
            max_in_flight: None,
        }
    }
}

/// Fires targets through one configured HTTP client.
///
/// Cloning is cheap and every clone shares the same connection pool.
#[derive(Debug, Clone)]
pub struct Attacker {
    pub(super) client: Client,
    pub(super) in_flight: Option<Arc<Semaphore>>,
}

impl Attacker {
    /// Builds the shared client.
    ///
    /// Certificate validation is disabled so that self-signed endpoints can be
    /// load tested.
    ///
    /// # Errors
    ///
    /// Returns an error when the TLS backend or client cannot be initialized.
    pub fn new(config: &AttackerConfig) -> AppResult<Self> {
        let mut builder = Client::builder()
            .danger_accept_invalid_certs(true)
            .danger_accept_invalid_hostnames(true)
            .tcp_keepalive(TCP_KEEPALIVE);

        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout).connect_timeout(timeout);
        }

        builder = if config.redirects == 0 {
            builder.redirect(redirect::Policy::none())
        } else {
            builder.redirect(redirect::Policy::limited(config.redirects))
        };

        if !config.local_addr.is_unspecified() {
            builder = builder.local_address(config.local_addr);
        }

        let client = builder
            .build()
            .map_err(|err| AppError::http(HttpError::BuildClientFailed { source: err }))?;

        Ok(Self {
            client,
            in_flight: config
                .max_in_flight
                .map(|limit| Arc::new(Semaphore::new(limit.get()))),
        })
    }

    #[must_use]
    pub const fn client(&self) -> &Client {
        &self.client
    }
}
