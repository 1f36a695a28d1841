//! Stream consumer configuration
//!
//! A consumer is a named cursor over a stream's messages with its own
//! delivery, acknowledgment, and replay policy. This module holds the
//! configuration contract for creating and describing one: the
//! [ConsumerConfiguration] value, its [builder](ConsumerConfigurationBuilder),
//! the policy vocabularies, and the JSON wire mapping used to talk to the
//! server.

pub mod builder;
pub mod config;
pub mod policy;

pub use builder::ConsumerConfigurationBuilder;
pub use config::ConsumerConfiguration;
pub use policy::{AckPolicy, DeliverPolicy, ReplayPolicy};
