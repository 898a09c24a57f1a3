//! Mediation between domain requests and the gateway wire format.
//!
//! - [`RequestBuilder`] shapes a [`WireRequest`] from a domain request and an
//!   explicit payment method, enforcing the [`is_supported`] table
//! - [`QueryResolver`] reduces every transaction lookup to one canonical filter
//! - [`ResponseMapper`] classifies gateway bodies into [`Outcome`](crate::model::Outcome)s
//! - [`EndpointResolver`] turns endpoints into paths, honouring configured overrides
//!
//! Nothing in this module performs I/O.

mod builder;
mod endpoint;
mod mapper;
mod operation;
mod query;

pub use builder::{HttpMethod, RequestBuilder, WireRequest, is_supported};
pub use endpoint::{Endpoint, EndpointConfig, EndpointResolver};
pub use mapper::ResponseMapper;
pub use operation::Operation;
pub use query::QueryResolver;
