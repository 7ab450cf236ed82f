//! Client library for the DNS Gateway API: a REST gateway fronting an EPP
//! registrar backend.
//!
//! Domains, contacts, and zones are exposed as [`RemoteRecord`]s — lazily
//! listed, schema-validated snapshots of server-side resources whose field
//! writes are translated into partial updates and whose state always mirrors
//! the last server response.
//!
//! ```no_run
//! use dnsgateway::{GatewayClient, DEVELOPMENT_ENDPOINT};
//!
//! let client = GatewayClient::new(DEVELOPMENT_ENDPOINT, "user", "secret");
//! for domain in client.domains() {
//!     println!("{}", domain?);
//! }
//! # Ok::<(), dnsgateway::Error>(())
//! ```

pub mod authinfo;
pub mod client;
pub mod entity;
pub mod error;
pub mod record;
pub mod schema;
pub mod transport;

#[cfg(test)]
pub(crate) mod testutil;

pub use client::{
    CheckOp, GatewayClient, NewContact, NewDomain, PostalAddress, RecordPages,
    DEVELOPMENT_ENDPOINT, PRODUCTION_ENDPOINT,
};
pub use entity::Entity;
pub use error::{Error, Result};
pub use record::RemoteRecord;
pub use schema::{FieldSchema, Validator};
pub use transport::{HttpTransport, Method, Response, Transport};
