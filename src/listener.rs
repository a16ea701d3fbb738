use anyhow::Result;

use crate::config::MarkerConfig;
use crate::converter::FrameToMarkersConverter;
use crate::frame::Frame;
use crate::marker::Time;
use crate::rate_gate::RateGate;
use crate::sink::MarkerSink;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListenerStats {
    pub frames: usize,
    pub throttled: usize,
    /// Accepted by the gate but nothing to draw.
    pub empty: usize,
    pub published: usize,
    pub publish_failures: usize,
}

/// Receives frames one at a time and publishes their markers at a bounded rate.
pub struct LeapListener<S: MarkerSink> {
    gate: RateGate,
    converter: FrameToMarkersConverter,
    sink: S,
    stats: ListenerStats,
}

impl<S: MarkerSink> LeapListener<S> {
    /// The gate window starts at `start_ns`.
    pub fn new(config: MarkerConfig, sink: S, start_ns: i64) -> LeapListener<S> {
        let gate = RateGate::from_rate_hz(config.max_rate_hz, start_ns);
        LeapListener {
            gate,
            converter: FrameToMarkersConverter::new(config),
            sink,
            stats: ListenerStats::default(),
        }
    }

    /// Returns the number of markers published, or `None` when nothing was sent.
    ///
    /// The gate is checked before the frame is inspected, so an accepted frame
    /// without right hands still uses up the current window. A failed publish
    /// does too.
    pub fn on_frame(&mut self, frame: &Frame, now_ns: i64) -> Result<Option<usize>> {
        self.stats.frames += 1;
        if !self.gate.should_process(now_ns) {
            self.stats.throttled += 1;
            log::trace!("frame {} throttled", frame.id);
            return Ok(None);
        }
        if frame.is_empty() {
            self.stats.empty += 1;
            return Ok(None);
        }

        let batch = self.converter.convert(frame, Time::from_nanos(now_ns));
        if batch.is_empty() {
            self.stats.empty += 1;
            log::debug!("frame {} has no right hand", frame.id);
            return Ok(None);
        }

        let topic = &self.converter.config().topic;
        if let Err(e) = self.sink.publish(topic, &batch) {
            self.stats.publish_failures += 1;
            return Err(e.context(format!("publishing frame {} to {}", frame.id, topic)));
        }
        self.stats.published += 1;
        log::trace!("frame {}: published {} markers", frame.id, batch.len());
        Ok(Some(batch.len()))
    }

    pub fn stats(&self) -> ListenerStats {
        self.stats
    }

    pub fn gate(&self) -> &RateGate {
        &self.gate
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}
