//! Demo route handlers.

pub mod echo;
pub mod health;
pub mod hello;

pub use echo::echo;
pub use health::{HealthResponse, health_check};
pub use hello::hello;
