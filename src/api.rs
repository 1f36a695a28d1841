//! Wire tags of the consumer management API.
//!
//! Both the request encoder and the response decoder read field names from
//! this table, so the two paths cannot drift apart. The strings must match
//! the server's published API tags exactly.

pub(crate) const STREAM_NAME: &str = "stream_name";
pub(crate) const CONFIG: &str = "config";

pub(crate) const DURABLE_NAME: &str = "durable_name";
pub(crate) const DELIVER_SUBJECT: &str = "deliver_subject";
pub(crate) const DELIVER_POLICY: &str = "deliver_policy";
pub(crate) const OPT_START_SEQ: &str = "opt_start_seq";
pub(crate) const OPT_START_TIME: &str = "opt_start_time";
pub(crate) const ACK_POLICY: &str = "ack_policy";
pub(crate) const ACK_WAIT: &str = "ack_wait";
pub(crate) const MAX_DELIVER: &str = "max_deliver";
pub(crate) const MAX_ACK_PENDING: &str = "max_ack_pending";
pub(crate) const FILTER_SUBJECT: &str = "filter_subject";
pub(crate) const REPLAY_POLICY: &str = "replay_policy";
pub(crate) const SAMPLE_FREQ: &str = "sample_freq";
pub(crate) const RATE_LIMIT: &str = "rate_limit_bps";
