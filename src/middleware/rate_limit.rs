use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::{
    extract::{ConnectInfo, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::models::AppState;

/// Fixed-window request counter, one window per client IP.
///
/// Counters live for a single window; once the window elapses the next
/// request from that IP starts a fresh one. Expired entries are swept at
/// most once per window so the map stays bounded by the number of IPs
/// seen in the current window, not over the process lifetime. State is
/// process-wide and guarded by a plain mutex since no holder ever awaits.
#[derive(Debug)]
pub struct RateLimiter {
    window: Duration,
    max_requests: u32,
    state: Mutex<LimiterState>,
}

#[derive(Debug)]
struct LimiterState {
    windows: HashMap<IpAddr, FixedWindow>,
    last_sweep: Instant,
}

#[derive(Debug)]
struct FixedWindow {
    started: Instant,
    count: u32,
}

impl Default for RateLimiter {
    /// Limit each IP to 100 requests per 15 minutes.
    fn default() -> Self {
        Self::new(Duration::from_secs(15 * 60), 100)
    }
}

impl RateLimiter {
    pub fn new(window: Duration, max_requests: u32) -> Self {
        Self {
            window,
            max_requests,
            state: Mutex::new(LimiterState {
                windows: HashMap::new(),
                last_sweep: Instant::now(),
            }),
        }
    }

    /// Counts one request from `ip` and reports whether it is within the
    /// ceiling for the current window.
    pub fn check(&self, ip: IpAddr) -> bool {
        self.check_at(ip, Instant::now())
    }

    fn check_at(&self, ip: IpAddr, now: Instant) -> bool {
        let mut state = self.state.lock().unwrap();

        // Drop counters for IPs whose window already elapsed, at most once
        // per window, so one-time clients don't accumulate forever.
        if now.duration_since(state.last_sweep) >= self.window {
            let window = self.window;
            state
                .windows
                .retain(|_, w| now.duration_since(w.started) < window);
            state.last_sweep = now;
        }

        let window = state.windows.entry(ip).or_insert(FixedWindow {
            started: now,
            count: 0,
        });
        if now.duration_since(window.started) >= self.window {
            window.started = now;
            window.count = 0;
        }
        window.count += 1;
        window.count <= self.max_requests
    }

    #[cfg(test)]
    fn tracked_ips(&self) -> usize {
        self.state.lock().unwrap().windows.len()
    }
}

/// Pipeline stage 1: reject over-limit clients before anything else runs.
pub async fn enforce(
    State(state): State<Arc<AppState>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    req: Request,
    next: Next,
) -> Response {
    if !state.rate_limiter.check(addr.ip()) {
        return (
            StatusCode::TOO_MANY_REQUESTS,
            "Too many requests, please try again later.",
        )
            .into_response();
    }
    next.run(req).await
}
