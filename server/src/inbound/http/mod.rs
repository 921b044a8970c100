//! HTTP inbound adapter exposing REST endpoints.

pub mod accounts;
pub mod collections;
pub mod documents;
pub mod error;
pub mod health;
pub mod schemas;
pub mod state;
pub mod validation;

pub use error::ApiResult;
