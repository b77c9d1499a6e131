//! BeastXFit gateway
//!
//! Client used by edge services to talk to the user service. Responses use the
//! shared `UserResponse` shape from `beastxfit-common`.

pub mod user;

pub use beastxfit_common::{RegisterRequest, UserResponse};
pub use user::{GatewayError, UserServiceClient};
