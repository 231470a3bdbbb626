use std::fmt::Debug;
use tracing::{
  field::{Field, Visit},
  Event,
  Subscriber
};
use tracing_subscriber::{
  Layer,
  layer::Context,
  registry::LookupSpan
};

use super::get_global_logging_threshold;

/// A layer that drops every event whose `threshold` field exceeds the global logging threshold.
pub(crate) struct ThresholdFilterLayer;

impl<S> Layer<S> for ThresholdFilterLayer
where
    S: Subscriber + for<'lookup> LookupSpan<'lookup>,
{
  fn event_enabled(&self, event: &Event<'_>, _ctx: Context<'_, S>) -> bool {
    let mut visitor = ThresholdVisitor { threshold: None };
    event.record(&mut visitor);

    // Events without a usable threshold are treated as threshold 0.
    visitor.threshold.unwrap_or(0) <= get_global_logging_threshold()
  }
}

/// Extracts the threshold from an event's fields.
struct ThresholdVisitor {
  threshold: Option<u8>,
}

impl Visit for ThresholdVisitor {
  fn record_i64(&mut self, field: &Field, value: i64) {
    if field.name() == "threshold" {
      self.threshold = Some(value.clamp(0, u8::MAX as i64) as u8);
    }
  }

  fn record_u64(&mut self, field: &Field, value: u64) {
    if field.name() == "threshold" {
      self.threshold = Some(value.min(u8::MAX as u64) as u8);
    }
  }

  fn record_debug(&mut self, _field: &Field, _value: &dyn Debug) {}
}
