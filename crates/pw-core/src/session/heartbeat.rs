//! Heartbeat and periodic timers

use std::time::Duration;

use bytes::Bytes;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

use pw_protocol::{encode_structured, BodyFormat, Heartbeat, MessageTag, ProtocolError, WireFrame};

use crate::time::current_time_millis;

/// Fixed-period timer whose first tick is one period from now
fn periodic(period: Duration) -> Interval {
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker
}

/// Emits a `Ping` probe on every heartbeat tick
///
/// Firing is unconditional: no acknowledgment tracking, no backoff.
pub struct HeartbeatEmitter {
    ticker: Interval,
    /// Encoded probe, identical for every tick
    probe: Bytes,
    emitted: u64,
}

impl HeartbeatEmitter {
    /// Create an emitter, encoding the probe up front
    pub fn new(period: Duration, format: BodyFormat) -> Result<Self, ProtocolError> {
        let probe = encode_structured(MessageTag::Ping, &Heartbeat::default(), format)?;

        Ok(Self {
            ticker: periodic(period),
            probe,
            emitted: 0,
        })
    }

    /// Heartbeat period
    pub fn period(&self) -> Duration {
        self.ticker.period()
    }

    /// Wait for the next tick and return the probe frame with its sequence number
    pub async fn tick(&mut self) -> (WireFrame, u64) {
        self.ticker.tick().await;
        self.emitted += 1;
        (WireFrame::Binary(self.probe.clone()), self.emitted)
    }
}

/// Emits the current Unix time (milliseconds) as a text frame
pub struct TimestampTicker {
    ticker: Interval,
}

impl TimestampTicker {
    /// Create a ticker with the given period
    pub fn new(period: Duration) -> Self {
        Self {
            ticker: periodic(period),
        }
    }

    /// Wait for the next tick and return the timestamp frame
    pub async fn tick(&mut self) -> WireFrame {
        self.ticker.tick().await;
        WireFrame::Text(current_time_millis().to_string())
    }
}
