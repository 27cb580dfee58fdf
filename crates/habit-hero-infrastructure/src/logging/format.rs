use serde_json::{json, Map, Value};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::{format::Writer, FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

/// One-line JSON records
pub(super) struct JsonFormatter {
    pid: u32,
    version: String,
}

impl JsonFormatter {
    pub(super) fn new(version: &str) -> Self {
        Self {
            pid: std::process::id(),
            version: version.to_string(),
        }
    }

    fn render(
        &self,
        timestamp: &str,
        meta: &tracing::Metadata<'_>,
        fields: FieldCollector,
    ) -> Value {
        let mut record = json!({
            "timestamp": timestamp,
            "level": meta.level().to_string(),
            "target": meta.target(),
            "pid": self.pid,
            "version": self.version,
        });

        if let (Some(file), Some(line)) = (meta.file(), meta.line()) {
            record["file"] = json!(file);
            record["line"] = json!(line);
        }

        let mut fields = fields.fields;
        if let Some(message) = fields.remove("message") {
            record["message"] = message;
        }
        if !fields.is_empty() {
            record["fields"] = Value::Object(fields);
        }

        record
    }
}

impl<S, N> FormatEvent<S, N> for JsonFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let timestamp = chrono::Local::now()
            .format("%Y-%m-%dT%H:%M:%S%.3f%:z")
            .to_string();

        let mut fields = FieldCollector::default();
        event.record(&mut fields);

        let record = self.render(&timestamp, event.metadata(), fields);
        writeln!(writer, "{}", record)
    }
}

/// `2025-12-09 10:32:15.123 [INFO] (target) key=value message`
pub(super) struct HumanReadableFormatter;

impl HumanReadableFormatter {
    pub(super) fn new() -> Self {
        Self
    }
}

fn colored_level(level: &Level) -> &'static str {
    match *level {
        Level::ERROR => "\x1b[31mERROR\x1b[0m",
        Level::WARN => "\x1b[33mWARN\x1b[0m",
        Level::INFO => "\x1b[32mINFO\x1b[0m",
        Level::DEBUG => "\x1b[36mDEBUG\x1b[0m",
        Level::TRACE => "\x1b[35mTRACE\x1b[0m",
    }
}

impl<S, N> FormatEvent<S, N> for HumanReadableFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let metadata = event.metadata();
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f");

        let mut fields = FieldCollector::default();
        event.record(&mut fields);

        let message = fields
            .fields
            .get("message")
            .and_then(|v| v.as_str())
            .unwrap_or("")
            .to_string();

        let extras: String = fields
            .fields
            .iter()
            .filter(|(key, _)| key.as_str() != "message")
            .map(|(key, value)| format!(" {}={}", key, value))
            .collect();

        writeln!(
            writer,
            "{} [{}] ({}){} {}",
            timestamp,
            colored_level(metadata.level()),
            metadata.target(),
            extras,
            message
        )
    }
}

/// Collects event fields as JSON values
#[derive(Default)]
struct FieldCollector {
    fields: Map<String, Value>,
}

impl Visit for FieldCollector {
    fn record_f64(&mut self, field: &Field, value: f64) {
        self.fields.insert(field.name().to_string(), json!(value));
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.fields.insert(field.name().to_string(), json!(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.fields.insert(field.name().to_string(), json!(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.fields.insert(field.name().to_string(), json!(value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.fields.insert(field.name().to_string(), json!(value));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.fields
            .insert(field.name().to_string(), json!(format!("{:?}", value)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::fmt::MakeWriter;
    use tracing_subscriber::layer::SubscriberExt;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Captured {
        type Writer = Captured;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn test_json_formatter_writes_one_line_records() {
        let captured = Captured::default();
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(captured.clone())
            .event_format(JsonFormatter::new("1.2.3"));
        let subscriber = tracing_subscriber::registry().with(layer);

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(target: "habit_hero::test", xp = 12u64, "XP gained");
        });

        let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 1);

        let record: Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(record["level"], "INFO");
        assert_eq!(record["target"], "habit_hero::test");
        assert_eq!(record["message"], "XP gained");
        assert_eq!(record["fields"]["xp"], 12);
        assert_eq!(record["version"], "1.2.3");
    }

    #[test]
    fn test_human_formatter_includes_fields_and_message() {
        let captured = Captured::default();
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(captured.clone())
            .event_format(HumanReadableFormatter::new());
        let subscriber = tracing_subscriber::registry().with(layer);

        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!(target: "habit_hero::test", streak = 3u64, "Streak reset");
        });

        let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("(habit_hero::test) streak=3 Streak reset"));
        assert!(output.contains("WARN"));
    }
}
