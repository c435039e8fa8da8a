//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `SessionStore` - persistence of sessions, generated timelines and
//!   recorded selections
//! - `SocialGateway` - the third-party OAuth + REST API

mod session_store;
mod social_gateway;

pub use session_store::{SessionStore, StoreError};
pub use social_gateway::{
    AccountSnapshot, AuthorizationRequest, GatewayError, RequestToken, SocialGateway,
};
