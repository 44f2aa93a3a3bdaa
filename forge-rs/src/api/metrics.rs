//! Prometheus metrics for API monitoring

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// Simple metrics collector
pub struct Metrics {
    /// Total HTTP requests
    pub http_requests_total: AtomicU64,
    /// Total registrations
    pub registrations_total: AtomicU64,
    /// Total authentication attempts
    pub auth_attempts_total: AtomicU64,
    /// Failed authentication attempts
    pub auth_failures_total: AtomicU64,
    /// Total products generated
    pub generations_total: AtomicU64,
    /// Requests denied for an exhausted free tier
    pub quota_denials_total: AtomicU64,
    /// Server start time
    start_time: Instant,
}

impl Metrics {
    /// Create a new metrics collector
    pub fn new() -> Self {
        Self {
            http_requests_total: AtomicU64::new(0),
            registrations_total: AtomicU64::new(0),
            auth_attempts_total: AtomicU64::new(0),
            auth_failures_total: AtomicU64::new(0),
            generations_total: AtomicU64::new(0),
            quota_denials_total: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    /// Increment HTTP requests counter
    pub fn inc_requests(&self) {
        self.http_requests_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment registrations counter
    pub fn inc_registrations(&self) {
        self.registrations_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment auth attempts
    pub fn inc_auth_attempts(&self) {
        self.auth_attempts_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment auth failures
    pub fn inc_auth_failures(&self) {
        self.auth_failures_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment generated products counter
    pub fn inc_generations(&self) {
        self.generations_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment quota denials counter
    pub fn inc_quota_denials(&self) {
        self.quota_denials_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Render metrics in Prometheus text exposition format
    pub fn to_prometheus(&self) -> String {
        format!(
            "# HELP forge_http_requests_total Total HTTP requests\n\
             # TYPE forge_http_requests_total counter\n\
             forge_http_requests_total {}\n\
             # HELP forge_registrations_total Total account registrations\n\
             # TYPE forge_registrations_total counter\n\
             forge_registrations_total {}\n\
             # HELP forge_auth_attempts_total Total authentication attempts\n\
             # TYPE forge_auth_attempts_total counter\n\
             forge_auth_attempts_total {}\n\
             # HELP forge_auth_failures_total Failed authentication attempts\n\
             # TYPE forge_auth_failures_total counter\n\
             forge_auth_failures_total {}\n\
             # HELP forge_generations_total Products generated\n\
             # TYPE forge_generations_total counter\n\
             forge_generations_total {}\n\
             # HELP forge_quota_denials_total Requests denied on exhausted free tier\n\
             # TYPE forge_quota_denials_total counter\n\
             forge_quota_denials_total {}\n\
             # HELP forge_uptime_seconds Server uptime in seconds\n\
             # TYPE forge_uptime_seconds gauge\n\
             forge_uptime_seconds {}\n",
            self.http_requests_total.load(Ordering::Relaxed),
            self.registrations_total.load(Ordering::Relaxed),
            self.auth_attempts_total.load(Ordering::Relaxed),
            self.auth_failures_total.load(Ordering::Relaxed),
            self.generations_total.load(Ordering::Relaxed),
            self.quota_denials_total.load(Ordering::Relaxed),
            self.uptime_seconds(),
        )
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
