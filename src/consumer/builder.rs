use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::consumer::{
    config::{ConsumerConfiguration, DEFAULT_ACK_WAIT, DEFAULT_MAX_DELIVER},
    policy::{AckPolicy, DeliverPolicy, ReplayPolicy},
};

/// Builder structure for consumer configurations
///
/// This is the main way to create a [ConsumerConfiguration]. Every setting
/// has a working default, so a freshly created builder already builds a
/// valid configuration: deliver policy `all`, ack policy `explicit`, a 30
/// second ack wait, unlimited redeliveries, and no rate or pending limits.
///
/// The builder is a plain accumulator: it can be mutated further and built
/// again after [`build`](ConsumerConfigurationBuilder::build), and each
/// build produces an independent configuration.
#[derive(Clone, Debug)]
pub struct ConsumerConfigurationBuilder {
    durable: Option<String>,
    deliver_subject: Option<String>,
    deliver_policy: DeliverPolicy,
    start_sequence: u64,
    start_time: Option<DateTime<Utc>>,
    ack_policy: AckPolicy,
    ack_wait: Duration,
    max_deliver: i64,
    filter_subject: Option<String>,
    replay_policy: ReplayPolicy,
    sample_frequency: Option<String>,
    rate_limit: i64,
    max_ack_pending: i64,
}

impl Default for ConsumerConfigurationBuilder {
    fn default() -> Self {
        ConsumerConfigurationBuilder {
            durable: None,
            deliver_subject: None,
            deliver_policy: DeliverPolicy::All,
            start_sequence: 0,
            start_time: None,
            ack_policy: AckPolicy::Explicit,
            ack_wait: DEFAULT_ACK_WAIT,
            max_deliver: DEFAULT_MAX_DELIVER,
            filter_subject: None,
            replay_policy: ReplayPolicy::Instant,
            sample_frequency: None,
            rate_limit: 0,
            max_ack_pending: 0,
        }
    }
}

impl ConsumerConfigurationBuilder {
    /// sets the name of the durable
    #[cfg_attr(feature = "telemetry", tracing::instrument(skip_all))]
    pub fn durable<S: Into<String>>(mut self, durable: S) -> Self {
        self.durable = Some(durable.into());
        self
    }

    /// sets the subject to deliver messages to, making this a push consumer
    #[cfg_attr(feature = "telemetry", tracing::instrument(skip_all))]
    pub fn deliver_subject<S: Into<String>>(mut self, subject: S) -> Self {
        self.deliver_subject = Some(subject.into());
        self
    }

    /// sets where in the stream delivery starts
    #[cfg_attr(feature = "telemetry", tracing::instrument(skip_all))]
    pub fn deliver_policy(mut self, policy: DeliverPolicy) -> Self {
        self.deliver_policy = policy;
        self
    }

    /// sets the stream sequence to start at, for
    /// [`DeliverPolicy::ByStartSequence`]
    #[cfg_attr(feature = "telemetry", tracing::instrument(skip_all))]
    pub fn start_sequence(mut self, sequence: u64) -> Self {
        self.start_sequence = sequence;
        self
    }

    /// sets the point in time to start at, for
    /// [`DeliverPolicy::ByStartTime`]
    #[cfg_attr(feature = "telemetry", tracing::instrument(skip_all))]
    pub fn start_time(mut self, start_time: DateTime<Utc>) -> Self {
        self.start_time = Some(start_time);
        self
    }

    /// sets the acknowledgment policy
    #[cfg_attr(feature = "telemetry", tracing::instrument(skip_all))]
    pub fn ack_policy(mut self, policy: AckPolicy) -> Self {
        self.ack_policy = policy;
        self
    }

    /// sets how long the server waits for an ack before redelivering
    #[cfg_attr(feature = "telemetry", tracing::instrument(skip_all))]
    pub fn ack_wait(mut self, timeout: Duration) -> Self {
        self.ack_wait = timeout;
        self
    }

    /// sets the redelivery attempt cap, `-1` for unlimited
    #[cfg_attr(feature = "telemetry", tracing::instrument(skip_all))]
    pub fn max_deliver(mut self, max_deliver: i64) -> Self {
        self.max_deliver = max_deliver;
        self
    }

    /// sets the subject filter applied within the stream
    #[cfg_attr(feature = "telemetry", tracing::instrument(skip_all))]
    pub fn filter_subject<S: Into<String>>(mut self, filter_subject: S) -> Self {
        self.filter_subject = Some(filter_subject.into());
        self
    }

    /// sets the replay pacing policy
    #[cfg_attr(feature = "telemetry", tracing::instrument(skip_all))]
    pub fn replay_policy(mut self, policy: ReplayPolicy) -> Self {
        self.replay_policy = policy;
        self
    }

    /// sets the metrics sampling frequency, an opaque percentage string
    #[cfg_attr(feature = "telemetry", tracing::instrument(skip_all))]
    pub fn sample_frequency<S: Into<String>>(mut self, frequency: S) -> Self {
        self.sample_frequency = Some(frequency.into());
        self
    }

    /// Sets the delivery rate cap in bits per second.
    ///
    /// Not range checked: any value, negative included, is forwarded as-is
    /// and the server decides what it accepts.
    #[cfg_attr(feature = "telemetry", tracing::instrument(skip_all))]
    pub fn rate_limit(mut self, rate_limit: i64) -> Self {
        self.rate_limit = rate_limit;
        self
    }

    /// sets the cap on in-flight unacknowledged messages
    #[cfg_attr(feature = "telemetry", tracing::instrument(skip_all))]
    pub fn max_ack_pending(mut self, max_ack_pending: i64) -> Self {
        self.max_ack_pending = max_ack_pending;
        self
    }

    /// Builds a [ConsumerConfiguration] from the accumulated settings.
    ///
    /// The builder stays usable afterwards; building twice yields two
    /// equal, independent configurations.
    #[cfg_attr(feature = "telemetry", tracing::instrument(skip_all))]
    pub fn build(&self) -> ConsumerConfiguration {
        ConsumerConfiguration {
            durable: self.durable.clone(),
            deliver_subject: self.deliver_subject.clone(),
            deliver_policy: self.deliver_policy,
            start_sequence: self.start_sequence,
            start_time: self.start_time,
            ack_policy: self.ack_policy,
            ack_wait: self.ack_wait,
            max_deliver: self.max_deliver,
            filter_subject: self.filter_subject.clone(),
            replay_policy: self.replay_policy,
            sample_frequency: self.sample_frequency.clone(),
            rate_limit: self.rate_limit,
            max_ack_pending: self.max_ack_pending,
        }
    }
}

impl From<&ConsumerConfiguration> for ConsumerConfigurationBuilder {
    #[cfg_attr(feature = "telemetry", tracing::instrument(skip_all))]
    fn from(config: &ConsumerConfiguration) -> Self {
        ConsumerConfigurationBuilder {
            durable: config.durable.clone(),
            deliver_subject: config.deliver_subject.clone(),
            deliver_policy: config.deliver_policy,
            start_sequence: config.start_sequence,
            start_time: config.start_time,
            ack_policy: config.ack_policy,
            ack_wait: config.ack_wait,
            max_deliver: config.max_deliver,
            filter_subject: config.filter_subject.clone(),
            replay_policy: config.replay_policy,
            sample_frequency: config.sample_frequency.clone(),
            rate_limit: config.rate_limit,
            max_ack_pending: config.max_ack_pending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_builder_builds_the_defaults() {
        let config = ConsumerConfiguration::builder().build();

        assert_eq!(config.durable(), None);
        assert_eq!(config.deliver_subject(), None);
        assert_eq!(config.deliver_policy(), DeliverPolicy::All);
        assert_eq!(config.start_sequence(), 0);
        assert_eq!(config.start_time(), None);
        assert_eq!(config.ack_policy(), AckPolicy::Explicit);
        assert_eq!(config.ack_wait(), Duration::from_secs(30));
        assert_eq!(config.max_deliver(), -1);
        assert_eq!(config.filter_subject(), None);
        assert_eq!(config.replay_policy(), ReplayPolicy::Instant);
        assert_eq!(config.sample_frequency(), None);
        assert_eq!(config.rate_limit(), 0);
        assert_eq!(config.max_ack_pending(), 0);
    }

    #[test]
    fn setters_accumulate() {
        let config = ConsumerConfiguration::builder()
            .durable("workers")
            .deliver_subject("deliver.workers")
            .deliver_policy(DeliverPolicy::ByStartSequence)
            .start_sequence(1001)
            .ack_policy(AckPolicy::None)
            .ack_wait(Duration::from_secs(5))
            .max_deliver(3)
            .filter_subject("orders.us.*")
            .replay_policy(ReplayPolicy::Original)
            .sample_frequency("100%")
            .rate_limit(-1)
            .max_ack_pending(64)
            .build();

        assert_eq!(config.durable(), Some("workers"));
        assert_eq!(config.deliver_subject(), Some("deliver.workers"));
        assert_eq!(config.deliver_policy(), DeliverPolicy::ByStartSequence);
        assert_eq!(config.start_sequence(), 1001);
        assert_eq!(config.ack_policy(), AckPolicy::None);
        assert_eq!(config.ack_wait(), Duration::from_secs(5));
        assert_eq!(config.max_deliver(), 3);
        assert_eq!(config.filter_subject(), Some("orders.us.*"));
        assert_eq!(config.replay_policy(), ReplayPolicy::Original);
        assert_eq!(config.sample_frequency(), Some("100%"));
        // rate limit is not range checked, the server is the authority
        assert_eq!(config.rate_limit(), -1);
        assert_eq!(config.max_ack_pending(), 64);
    }

    #[test]
    fn builder_is_reusable_after_build() {
        let builder = ConsumerConfiguration::builder()
            .durable("workers")
            .max_deliver(2);

        let first = builder.build();
        let second = builder.build();
        assert_eq!(first, second);

        // the built configurations are independent of later builds
        let third = builder.max_ack_pending(9).build();
        assert_eq!(first.max_ack_pending(), 0);
        assert_eq!(third.max_ack_pending(), 9);
    }

    #[test]
    fn copy_construction_clones_every_field() {
        let original = ConsumerConfiguration::builder()
            .durable("workers")
            .deliver_subject("deliver.workers")
            .deliver_policy(DeliverPolicy::Last)
            .start_sequence(7)
            .start_time(chrono::DateTime::UNIX_EPOCH)
            .ack_policy(AckPolicy::All)
            .ack_wait(Duration::from_secs(1))
            .max_deliver(4)
            .filter_subject("a.b")
            .replay_policy(ReplayPolicy::Original)
            .sample_frequency("50%")
            .rate_limit(77)
            .max_ack_pending(11)
            .build();

        let rebuilt = original.to_builder().build();
        assert_eq!(rebuilt, original);

        // modify-and-rebuild leaves the source untouched
        let relaxed = original.to_builder().max_deliver(-1).build();
        assert_eq!(relaxed.max_deliver(), -1);
        assert_eq!(relaxed.durable(), Some("workers"));
        assert_eq!(original.max_deliver(), 4);
    }
}
