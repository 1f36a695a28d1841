use std::time::Duration;

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value};

use crate::{
    api,
    consumer::{
        builder::ConsumerConfigurationBuilder,
        policy::{AckPolicy, DeliverPolicy, ReplayPolicy},
    },
    error::{DecodeError, Error},
    json,
};

pub(crate) const DEFAULT_ACK_WAIT: Duration = Duration::from_secs(30);
pub(crate) const DEFAULT_MAX_DELIVER: i64 = -1;

/// the complete configuration of a stream consumer
///
/// A configuration is created either through
/// [`builder`](ConsumerConfiguration::builder) or by decoding the server's
/// consumer info response with
/// [`decode_response`](ConsumerConfiguration::decode_response). Once created
/// it is an immutable value and can be shared freely across threads.
///
/// `start_sequence` and `start_time` only take effect under their matching
/// deliver policy (`by_start_sequence` and `by_start_time` respectively);
/// the configuration does not enforce that pairing, the server does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsumerConfiguration {
    pub(crate) durable: Option<String>,
    pub(crate) deliver_subject: Option<String>,
    pub(crate) deliver_policy: DeliverPolicy,
    pub(crate) start_sequence: u64,
    pub(crate) start_time: Option<DateTime<Utc>>,
    pub(crate) ack_policy: AckPolicy,
    pub(crate) ack_wait: Duration,
    pub(crate) max_deliver: i64,
    pub(crate) filter_subject: Option<String>,
    pub(crate) replay_policy: ReplayPolicy,
    pub(crate) sample_frequency: Option<String>,
    pub(crate) rate_limit: i64,
    pub(crate) max_ack_pending: i64,
}

impl ConsumerConfiguration {
    /// creates a builder with every setting at its default
    pub fn builder() -> ConsumerConfigurationBuilder {
        ConsumerConfigurationBuilder::default()
    }

    /// creates a builder seeded with this configuration's settings
    pub fn to_builder(&self) -> ConsumerConfigurationBuilder {
        ConsumerConfigurationBuilder::from(self)
    }

    /// name of the durable, if this consumer's position is server-persisted
    pub fn durable(&self) -> Option<&str> {
        self.durable.as_deref()
    }

    /// subject push deliveries are sent to; a consumer without one is a
    /// pull consumer
    pub fn deliver_subject(&self) -> Option<&str> {
        self.deliver_subject.as_deref()
    }

    /// where in the stream the consumer starts reading
    pub fn deliver_policy(&self) -> DeliverPolicy {
        self.deliver_policy
    }

    /// stream sequence to start at under `by_start_sequence`
    pub fn start_sequence(&self) -> u64 {
        self.start_sequence
    }

    /// point in time to start at under `by_start_time`
    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        self.start_time
    }

    /// the acknowledgment discipline required of the consumer
    pub fn ack_policy(&self) -> AckPolicy {
        self.ack_policy
    }

    /// time the server waits for an ack before redelivering a message
    pub fn ack_wait(&self) -> Duration {
        self.ack_wait
    }

    /// redelivery attempt cap, `-1` for unlimited
    pub fn max_deliver(&self) -> i64 {
        self.max_deliver
    }

    /// subject filter applied within the stream
    pub fn filter_subject(&self) -> Option<&str> {
        self.filter_subject.as_deref()
    }

    /// pacing of historical messages during replay
    pub fn replay_policy(&self) -> ReplayPolicy {
        self.replay_policy
    }

    /// metrics sampling hint, an opaque percentage string
    pub fn sample_frequency(&self) -> Option<&str> {
        self.sample_frequency.as_deref()
    }

    /// delivery rate cap in bits per second, `0` for unlimited
    pub fn rate_limit(&self) -> i64 {
        self.rate_limit
    }

    /// cap on in-flight unacknowledged messages, `0` for unlimited
    pub fn max_ack_pending(&self) -> i64 {
        self.max_ack_pending
    }

    /// Encodes this configuration as a consumer creation request for the
    /// given stream.
    ///
    /// Optional settings that are unset are left out of the document
    /// entirely; numeric and policy settings are always present, defaults
    /// included. The ack wait is carried as integer nanoseconds and the
    /// start time as an RFC 3339 timestamp.
    #[cfg_attr(feature = "telemetry", tracing::instrument(skip_all))]
    pub fn encode_request(&self, stream_name: &str) -> String {
        let mut config = Map::new();
        if let Some(durable) = &self.durable {
            config.insert(api::DURABLE_NAME.to_string(), Value::from(durable.clone()));
        }
        if let Some(subject) = &self.deliver_subject {
            config.insert(
                api::DELIVER_SUBJECT.to_string(),
                Value::from(subject.clone()),
            );
        }
        config.insert(
            api::DELIVER_POLICY.to_string(),
            Value::from(self.deliver_policy.as_str()),
        );
        config.insert(
            api::OPT_START_SEQ.to_string(),
            Value::from(self.start_sequence),
        );
        if let Some(start_time) = &self.start_time {
            config.insert(
                api::OPT_START_TIME.to_string(),
                Value::from(start_time.to_rfc3339_opts(SecondsFormat::Nanos, true)),
            );
        }
        config.insert(
            api::ACK_POLICY.to_string(),
            Value::from(self.ack_policy.as_str()),
        );
        config.insert(
            api::ACK_WAIT.to_string(),
            Value::from(self.ack_wait.as_nanos() as u64),
        );
        config.insert(api::MAX_DELIVER.to_string(), Value::from(self.max_deliver));
        config.insert(
            api::MAX_ACK_PENDING.to_string(),
            Value::from(self.max_ack_pending),
        );
        if let Some(filter) = &self.filter_subject {
            config.insert(api::FILTER_SUBJECT.to_string(), Value::from(filter.clone()));
        }
        config.insert(
            api::REPLAY_POLICY.to_string(),
            Value::from(self.replay_policy.as_str()),
        );
        if let Some(frequency) = &self.sample_frequency {
            config.insert(api::SAMPLE_FREQ.to_string(), Value::from(frequency.clone()));
        }
        config.insert(api::RATE_LIMIT.to_string(), Value::from(self.rate_limit));

        let mut request = Map::new();
        request.insert(api::STREAM_NAME.to_string(), Value::from(stream_name));
        request.insert(api::CONFIG.to_string(), Value::Object(config));
        let request = Value::Object(request);

        trace!("consumer creation request for stream {}", stream_name);
        request.to_string()
    }

    /// Decodes the `config` section of a consumer info response.
    ///
    /// Fields absent from the response resolve to their documented
    /// defaults and unknown fields are ignored. A field that is present
    /// but malformed, or a policy whose wire name is not recognized,
    /// fails the decode.
    #[cfg_attr(feature = "telemetry", tracing::instrument(skip_all))]
    pub fn decode_response(response: &str) -> Result<ConsumerConfiguration, Error> {
        let document: Value = serde_json::from_str(response).map_err(DecodeError::from)?;
        let root = document
            .as_object()
            .ok_or_else(|| DecodeError::InvalidDocument("expected a JSON object".to_string()))?;
        let config = match root.get(api::CONFIG) {
            Some(Value::Object(config)) => config,
            Some(_) => {
                return Err(DecodeError::InvalidDocument(format!(
                    "\"{}\" is not an object",
                    api::CONFIG
                ))
                .into())
            }
            None => {
                warn!(
                    "response has no \"{}\" object, reading fields from the document root",
                    api::CONFIG
                );
                root
            }
        };

        Ok(ConsumerConfiguration {
            durable: json::read_string(config, api::DURABLE_NAME)?,
            deliver_subject: json::read_string(config, api::DELIVER_SUBJECT)?,
            deliver_policy: read_policy(
                config,
                api::DELIVER_POLICY,
                DeliverPolicy::from_str,
                DeliverPolicy::All,
            )?,
            start_sequence: json::read_u64(config, api::OPT_START_SEQ, 0)?,
            start_time: json::read_datetime(config, api::OPT_START_TIME)?,
            ack_policy: read_policy(
                config,
                api::ACK_POLICY,
                AckPolicy::from_str,
                AckPolicy::Explicit,
            )?,
            ack_wait: json::read_duration(config, api::ACK_WAIT, DEFAULT_ACK_WAIT)?,
            max_deliver: json::read_i64(config, api::MAX_DELIVER, DEFAULT_MAX_DELIVER)?,
            filter_subject: json::read_string(config, api::FILTER_SUBJECT)?,
            replay_policy: read_policy(
                config,
                api::REPLAY_POLICY,
                ReplayPolicy::from_str,
                ReplayPolicy::Instant,
            )?,
            sample_frequency: json::read_string(config, api::SAMPLE_FREQ)?,
            rate_limit: json::read_i64(config, api::RATE_LIMIT, 0)?,
            max_ack_pending: json::read_i64(config, api::MAX_ACK_PENDING, 0)?,
        })
    }
}

// Setters used while finalizing a consumer creation handshake. Not part of
// the public contract: to external callers a configuration is immutable
// once constructed.
#[allow(dead_code)]
impl ConsumerConfiguration {
    pub(crate) fn set_durable<S: Into<String>>(&mut self, durable: S) {
        self.durable = Some(durable.into());
    }

    pub(crate) fn set_deliver_subject<S: Into<String>>(&mut self, subject: S) {
        self.deliver_subject = Some(subject.into());
    }

    pub(crate) fn set_filter_subject<S: Into<String>>(&mut self, subject: S) {
        self.filter_subject = Some(subject.into());
    }

    pub(crate) fn set_max_ack_pending(&mut self, max_ack_pending: i64) {
        self.max_ack_pending = max_ack_pending;
    }
}

impl Default for ConsumerConfiguration {
    fn default() -> Self {
        ConsumerConfiguration::builder().build()
    }
}

// A policy absent from the response takes its documented default; a policy
// carrying an unrecognized wire name rejects the whole response rather than
// leaving the field silently unset.
fn read_policy<P>(
    obj: &json::JsonObject,
    tag: &'static str,
    lookup: fn(&str) -> Option<P>,
    default: P,
) -> Result<P, DecodeError> {
    match json::read_string(obj, tag)? {
        None => Ok(default),
        Some(name) => match lookup(&name) {
            Some(policy) => Ok(policy),
            None => Err(DecodeError::UnknownPolicy {
                field: tag,
                value: name,
            }),
        },
    }
}
