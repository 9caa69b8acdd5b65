use std::sync::Arc;

use anyhow::Result;
use serde_json::json;
use uuid::Uuid;

use crate::{
    answer::AnswerKey, dataset::Story, error::QaError, runtime::Sherlock,
    telemetry::NlpTelemetry,
};

/// Result of answering one story of a batch.
#[derive(Debug)]
pub struct StoryOutcome {
    /// Story the outcome belongs to.
    pub story_id: String,
    /// Correlation id for tracing.
    pub correlation_id: Uuid,
    /// Answers, or the failure that sank the story.
    pub result: Result<AnswerKey, QaError>,
}

/// Controller answering stories concurrently on blocking worker tasks.
pub struct BatchAnswerController {
    engine: Arc<Sherlock>,
    telemetry: Option<NlpTelemetry>,
}

impl BatchAnswerController {
    /// Creates a new controller.
    #[must_use]
    pub fn new(engine: Arc<Sherlock>, telemetry: Option<NlpTelemetry>) -> Self {
        Self { engine, telemetry }
    }

    /// Processes a batch concurrently; outcomes keep the input order.
    ///
    /// # Errors
    ///
    /// Fails only when a worker task panics; story failures land in [`StoryOutcome::result`].
    pub async fn process_batch(&self, stories: Vec<Story>) -> Result<Vec<StoryOutcome>> {
        self.log("nlp.batch.start", json!({ "count": stories.len() }));
        let tasks: Vec<_> = stories
            .into_iter()
            .map(|story| {
                let engine = Arc::clone(&self.engine);
                let tel = self.telemetry.clone();
                tokio::task::spawn_blocking(move || {
                    let correlation_id = Uuid::new_v4();
                    if let Some(t) = &tel {
                        let _ = t.log_story(
                            shared_logging::LogLevel::Debug,
                            "nlp.story.request",
                            &story.id,
                            json!({ "correlation_id": correlation_id }),
                        );
                    }
                    StoryOutcome {
                        result: engine.process_story(&story),
                        story_id: story.id,
                        correlation_id,
                    }
                })
            })
            .collect();

        let mut outcomes = Vec::with_capacity(tasks.len());
        for task in tasks {
            outcomes.push(task.await?);
        }
        let failed = outcomes.iter().filter(|outcome| outcome.result.is_err()).count();
        self.log(
            "nlp.batch.complete",
            json!({ "count": outcomes.len(), "failed": failed }),
        );
        Ok(outcomes)
    }

    fn log(&self, message: &str, metadata: serde_json::Value) {
        if let Some(tel) = &self.telemetry {
            let _ = tel.log(shared_logging::LogLevel::Info, message, metadata);
        }
    }
}
