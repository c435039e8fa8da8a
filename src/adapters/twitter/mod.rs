//! Twitter adapter - `SocialGateway` over the v1.1 REST API.

mod client;
pub mod oauth;
mod wire;

pub use client::TwitterGateway;
