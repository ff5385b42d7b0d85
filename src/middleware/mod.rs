// src/middleware/mod.rs

pub mod cookies;
pub mod rate_limit;

pub use cookies::Cookies;
pub use rate_limit::RateLimiter;
