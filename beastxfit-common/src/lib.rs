//! BeastXFit Common Types
//!
//! Shared types used by both the user service and the gateway.

pub mod error;
pub mod user;

pub use error::{ErrorDetail, ErrorResponse};
pub use user::{RegisterRequest, UserResponse};
