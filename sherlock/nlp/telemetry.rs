use std::{fmt, path::PathBuf, sync::Arc};

use anyhow::Result;
use serde_json::Value;
use shared_logging::{JsonLogger, LogLevel, LogRecord, LogSink};

/// Builder for NLP telemetry sinks.
pub struct NlpTelemetryBuilder {
    module: String,
    log_path: Option<PathBuf>,
    min_level: LogLevel,
    sink: Option<Arc<dyn LogSink>>,
}

impl NlpTelemetryBuilder {
    /// Creates the builder.
    #[must_use]
    pub fn new(module: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            log_path: None,
            min_level: LogLevel::Debug,
            sink: None,
        }
    }

    /// Writes JSON lines to the given file.
    #[must_use]
    pub fn log_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_path = Some(path.into());
        self
    }

    /// Drops file records below this level.
    #[must_use]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    /// Routes records to a custom sink instead of a file.
    #[must_use]
    pub fn sink(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Builds the telemetry handle.
    ///
    /// # Errors
    ///
    /// Fails when the log file cannot be opened.
    pub fn build(self) -> Result<NlpTelemetry> {
        let sink = match (self.sink, self.log_path) {
            (Some(sink), _) => Some(sink),
            (None, Some(path)) => {
                Some(Arc::new(JsonLogger::with_min_level(path, self.min_level)?) as Arc<dyn LogSink>)
            }
            (None, None) => None,
        };
        Ok(NlpTelemetry {
            inner: Arc::new(TelemetryInner {
                module: self.module,
                sink,
            }),
        })
    }
}

/// Telemetry handle shared across NLP components.
#[derive(Clone)]
pub struct NlpTelemetry {
    inner: Arc<TelemetryInner>,
}

impl fmt::Debug for NlpTelemetry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NlpTelemetry")
            .field("module", &self.inner.module)
            .field("enabled", &self.inner.sink.is_some())
            .finish()
    }
}

struct TelemetryInner {
    module: String,
    sink: Option<Arc<dyn LogSink>>,
}

impl NlpTelemetry {
    /// Returns a builder.
    #[must_use]
    pub fn builder(module: impl Into<String>) -> NlpTelemetryBuilder {
        NlpTelemetryBuilder::new(module)
    }

    /// Logs structured metadata.
    ///
    /// # Errors
    ///
    /// Fails when the sink cannot write the record.
    pub fn log(&self, level: LogLevel, message: &str, metadata: Value) -> Result<()> {
        self.emit(level, message, None, metadata)
    }

    /// Logs structured metadata tagged with a story id.
    ///
    /// # Errors
    ///
    /// Fails when the sink cannot write the record.
    pub fn log_story(
        &self,
        level: LogLevel,
        message: &str,
        story_id: &str,
        metadata: Value,
    ) -> Result<()> {
        self.emit(level, message, Some(story_id), metadata)
    }

    fn emit(
        &self,
        level: LogLevel,
        message: &str,
        story_id: Option<&str>,
        metadata: Value,
    ) -> Result<()> {
        if let Some(sink) = &self.inner.sink {
            let mut record = LogRecord::new(&self.inner.module, level, message);
            if let Some(id) = story_id {
                record = record.with_story(id);
            }
            if let Value::Object(map) = metadata {
                record.metadata = map;
            }
            sink.write(&record)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use shared_logging::MemorySink;
    use tempfile::tempdir;

    #[test]
    fn telemetry_writes_log_file() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("nlp.log");
        let telemetry = NlpTelemetry::builder("nlp").log_path(&path).build().unwrap();
        telemetry
            .log_story(
                LogLevel::Info,
                "nlp.story.annotated",
                "1999-W03-2",
                json!({ "sentences": 12 }),
            )
            .unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("nlp.story.annotated"));
        assert!(content.contains("1999-W03-2"));
    }

    #[test]
    fn telemetry_routes_to_custom_sink() {
        let sink = Arc::new(MemorySink::new());
        let telemetry = NlpTelemetry::builder("nlp")
            .sink(sink.clone())
            .build()
            .unwrap();
        telemetry
            .log(LogLevel::Debug, "nlp.batch.start", json!({ "count": 2 }))
            .unwrap();
        let records = sink.snapshot();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].metadata["count"], 2);
    }

    #[test]
    fn disabled_telemetry_is_silent() {
        let telemetry = NlpTelemetry::builder("nlp").build().unwrap();
        assert!(telemetry
            .log(LogLevel::Error, "nothing", json!({}))
            .is_ok());
    }
}
