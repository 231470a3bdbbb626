use tracing::field::{Field, Visit};
use tracing_subscriber::{
  field::RecordFields,
  fmt::{
    format::Writer,
    FormatFields
  }
};

/// Renders the message first and every other field after it as `name=value`. The `threshold` field is consumed by
/// the filter layer and never printed.
pub(crate) struct EngineFieldFormatter;

impl<'writer> FormatFields<'writer> for EngineFieldFormatter {
  fn format_fields<R: RecordFields>(
    &self,
    writer: Writer<'writer>,
    fields: R,
  ) -> std::fmt::Result {
    let mut visitor = EngineFieldVisitor { writer, extra: Vec::new(), message: None };
    fields.record(&mut visitor);
    visitor.finish()
  }
}

struct EngineFieldVisitor<'writer> {
  writer : Writer<'writer>,
  message: Option<String>,
  extra  : Vec<String>,
}

impl<'writer> EngineFieldVisitor<'writer> {
  fn push(&mut self, field: &Field, value: String) {
    match field.name() {
      "threshold" => {}
      "message"   => self.message = Some(value),
      name        => self.extra.push(format!("{}={}", name, value)),
    }
  }

  fn finish(mut self) -> std::fmt::Result {
    if let Some(message) = self.message.take() {
      write!(self.writer, "{}", message)?;
    }
    for field in self.extra.iter() {
      write!(self.writer, " {}", field)?;
    }
    Ok(())
  }
}

impl<'writer> Visit for EngineFieldVisitor<'writer> {
  fn record_i64(&mut self, field: &Field, value: i64) {
    self.push(field, value.to_string());
  }

  fn record_u64(&mut self, field: &Field, value: u64) {
    self.push(field, value.to_string());
  }

  fn record_bool(&mut self, field: &Field, value: bool) {
    self.push(field, value.to_string());
  }

  fn record_str(&mut self, field: &Field, value: &str) {
    self.push(field, value.to_string());
  }

  fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
    self.push(field, format!("{:?}", value));
  }
}
