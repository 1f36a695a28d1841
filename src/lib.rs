//! Consumer configuration for JetStream-style streaming servers.
//!
//! This crate models every tunable policy a durable stream consumer can
//! have: where delivery starts, the acknowledgment discipline, replay
//! pacing, and flow limits. A configuration is assembled with a builder,
//! encoded as the JSON creation request sent to the server, and decoded
//! back from the server's consumer info responses. Transport, delivery,
//! and session management belong to the client that sends the requests.
//!
//! ```rust
//! use std::time::Duration;
//!
//! use jetstream::{AckPolicy, ConsumerConfiguration};
//!
//! # fn run() -> Result<(), jetstream::Error> {
//! let config = ConsumerConfiguration::builder()
//!     .durable("orders-durable")
//!     .ack_policy(AckPolicy::Explicit)
//!     .ack_wait(Duration::from_secs(10))
//!     .max_deliver(5)
//!     .build();
//!
//! let request = config.encode_request("ORDERS");
//!
//! // the server echoes the applied configuration back
//! let applied = ConsumerConfiguration::decode_response(&request)?;
//! assert_eq!(applied, config);
//! # Ok(())
//! # }
//! # run().unwrap();
//! ```

#[macro_use]
extern crate log;

mod api;
pub mod consumer;
pub mod error;
mod json;

pub use consumer::{
    AckPolicy, ConsumerConfiguration, ConsumerConfigurationBuilder, DeliverPolicy, ReplayPolicy,
};
pub use error::{DecodeError, Error};
