use std::fmt;

/// where in the stream a newly created consumer starts reading
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DeliverPolicy {
    /// deliver every message in the stream
    #[default]
    All,
    /// start with the last message added to the stream
    Last,
    /// deliver only messages published after the consumer was created
    New,
    /// start at the configured start sequence
    ByStartSequence,
    /// start at the first message received on or after the configured start time
    ByStartTime,
}

impl DeliverPolicy {
    /// wire name of this policy
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliverPolicy::All => "all",
            DeliverPolicy::Last => "last",
            DeliverPolicy::New => "new",
            DeliverPolicy::ByStartSequence => "by_start_sequence",
            DeliverPolicy::ByStartTime => "by_start_time",
        }
    }

    /// looks a policy up by its wire name
    #[cfg_attr(feature = "telemetry", tracing::instrument(skip_all))]
    pub fn from_str(s: &str) -> Option<DeliverPolicy> {
        match s {
            "all" => Some(DeliverPolicy::All),
            "last" => Some(DeliverPolicy::Last),
            "new" => Some(DeliverPolicy::New),
            "by_start_sequence" => Some(DeliverPolicy::ByStartSequence),
            "by_start_time" => Some(DeliverPolicy::ByStartTime),
            _ => None,
        }
    }
}

impl fmt::Display for DeliverPolicy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// the acknowledgment discipline the server requires of a consumer
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AckPolicy {
    /// no acknowledgments are expected
    None,
    /// acknowledging a message acknowledges everything up to it
    All,
    /// every message must be acknowledged individually
    #[default]
    Explicit,
}

impl AckPolicy {
    /// wire name of this policy
    pub fn as_str(&self) -> &'static str {
        match self {
            AckPolicy::None => "none",
            AckPolicy::All => "all",
            AckPolicy::Explicit => "explicit",
        }
    }

    /// looks a policy up by its wire name
    #[cfg_attr(feature = "telemetry", tracing::instrument(skip_all))]
    pub fn from_str(s: &str) -> Option<AckPolicy> {
        match s {
            "none" => Some(AckPolicy::None),
            "all" => Some(AckPolicy::All),
            "explicit" => Some(AckPolicy::Explicit),
            _ => None,
        }
    }
}

impl fmt::Display for AckPolicy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// pacing of historical messages during replay
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReplayPolicy {
    /// deliver as fast as the consumer can take them
    #[default]
    Instant,
    /// deliver at the original publish pacing
    Original,
}

impl ReplayPolicy {
    /// wire name of this policy
    pub fn as_str(&self) -> &'static str {
        match self {
            ReplayPolicy::Instant => "instant",
            ReplayPolicy::Original => "original",
        }
    }

    /// looks a policy up by its wire name
    #[cfg_attr(feature = "telemetry", tracing::instrument(skip_all))]
    pub fn from_str(s: &str) -> Option<ReplayPolicy> {
        match s {
            "instant" => Some(ReplayPolicy::Instant),
            "original" => Some(ReplayPolicy::Original),
            _ => None,
        }
    }
}

impl fmt::Display for ReplayPolicy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELIVER_POLICIES: [DeliverPolicy; 5] = [
        DeliverPolicy::All,
        DeliverPolicy::Last,
        DeliverPolicy::New,
        DeliverPolicy::ByStartSequence,
        DeliverPolicy::ByStartTime,
    ];

    const ACK_POLICIES: [AckPolicy; 3] = [AckPolicy::None, AckPolicy::All, AckPolicy::Explicit];

    const REPLAY_POLICIES: [ReplayPolicy; 2] = [ReplayPolicy::Instant, ReplayPolicy::Original];

    #[test]
    fn deliver_policy_round_trips() {
        for policy in DELIVER_POLICIES {
            assert_eq!(DeliverPolicy::from_str(policy.as_str()), Some(policy));
        }
    }

    #[test]
    fn ack_policy_round_trips() {
        for policy in ACK_POLICIES {
            assert_eq!(AckPolicy::from_str(policy.as_str()), Some(policy));
        }
    }

    #[test]
    fn replay_policy_round_trips() {
        for policy in REPLAY_POLICIES {
            assert_eq!(ReplayPolicy::from_str(policy.as_str()), Some(policy));
        }
    }

    #[test]
    fn wire_names_are_stable() {
        assert_eq!(DeliverPolicy::ByStartSequence.as_str(), "by_start_sequence");
        assert_eq!(DeliverPolicy::ByStartTime.as_str(), "by_start_time");
        assert_eq!(AckPolicy::Explicit.as_str(), "explicit");
        assert_eq!(ReplayPolicy::Original.as_str(), "original");
    }

    #[test]
    fn unknown_wire_names_have_no_mapping() {
        assert_eq!(DeliverPolicy::from_str("sometimes"), None);
        assert_eq!(AckPolicy::from_str("Explicit"), None);
        assert_eq!(ReplayPolicy::from_str(""), None);
    }

    #[test]
    fn defaults_match_the_server_defaults() {
        assert_eq!(DeliverPolicy::default(), DeliverPolicy::All);
        assert_eq!(AckPolicy::default(), AckPolicy::Explicit);
        assert_eq!(ReplayPolicy::default(), ReplayPolicy::Instant);
    }

    #[test]
    fn display_uses_the_wire_name() {
        assert_eq!(DeliverPolicy::ByStartTime.to_string(), "by_start_time");
        assert_eq!(AckPolicy::None.to_string(), "none");
    }
}
