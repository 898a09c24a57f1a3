//! Rapid Client: typed mediation layer for the eWAY Rapid payment gateway.
//!
//! The crate sits between merchant code and the gateway's REST/JSON API. It
//! turns domain requests into wire requests, sends them through a pluggable
//! transport, and classifies what comes back.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │  Merchant code   │  Transaction, Customer, Refund, TransactionFilter, ...
//! └────────┬─────────┘
//!          │
//! ┌────────▼─────────────────────────────────────────────┐
//! │                RapidClient (façade)                  │
//! │  ┌────────────────┐ ┌───────────────┐ ┌────────────┐ │
//! │  │ RequestBuilder │ │ QueryResolver │ │ Response   │ │
//! │  │ (PaymentMethod │ │ (one canonical│ │ Mapper     │ │
//! │  │  driven)       │ │  filter)      │ │ (Outcome)  │ │
//! │  └────────────────┘ └───────────────┘ └────────────┘ │
//! └────────┬─────────────────────────────────────────────┘
//!          │ Transport (HttpTransport or your own)
//! ┌────────▼─────────┐
//! │  Rapid gateway   │  sandbox, production or custom
//! └──────────────────┘
//! ```
//!
//! # Outcomes and errors
//!
//! A declined payment is not an error. Every response carries an
//! [`Outcome`](model::Outcome): `Success`, `Pending` (the buyer still has to
//! enter card details on a hosted page) or `Failed` with the gateway's codes.
//! [`RapidError`] is reserved for requests the client refuses to send and for
//! calls where no usable gateway response was obtained.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use rapid_client::{
//!     RapidClient,
//!     config::ClientConfig,
//!     model::{GatewayResponse, TransactionFilter},
//! };
//!
//! # async fn example() -> rapid_client::Result<()> {
//! let config = ClientConfig::from_file("rapid.toml")?;
//! let client = RapidClient::new(&config)?;
//!
//! let response = client.query_transaction(TransactionFilter::by_invoice_reference("INV-1001")).await?;
//! for record in &response.transactions {
//!     println!("{:?} approved={}", record.transaction_id, record.approved);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! ```rust,no_run
//! use rapid_client::RapidClient;
//!
//! # async fn example(client: RapidClient) {
//! match client.query_transaction_by_id(11_929_054).await {
//!     Ok(response) => println!("{} record(s)", response.transactions.len()),
//!     Err(e) if e.is_validation() => eprintln!("request rejected locally: {e}"),
//!     Err(e) if e.is_transient() => eprintln!("gateway unreachable, try again: {e}"),
//!     Err(e) => eprintln!("gateway call failed: {e}"),
//! }
//! # }
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![allow(clippy::multiple_crate_versions, reason = "transitive dependencies from reqwest")]

pub mod client;
pub mod config;
pub mod error;
pub mod gateway;
pub mod model;
pub mod transport;

mod wire;

pub use client::RapidClient;
pub use error::{RapidError, Result};
