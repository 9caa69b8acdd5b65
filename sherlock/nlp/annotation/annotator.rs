use std::time::Duration;

use reqwest::blocking::Client;
use serde_json::json;

use super::{corenlp, model::Document};
use crate::{config::AnnotatorSettings, error::QaError};

/// Source of linguistic annotations for raw text.
pub trait Annotator: Send + Sync {
    /// Annotates a story body.
    fn annotate(&self, text: &str) -> Result<Document, QaError>;

    /// Annotates a question, which must come back as a single sentence.
    fn annotate_question(&self, text: &str) -> Result<Document, QaError> {
        self.annotate(text)
    }
}

const ANNOTATORS: &str = "tokenize,ssplit,pos,lemma,ner,parse,dcoref";
const NER_MODEL: &str = "edu/stanford/nlp/models/ner/english.muc.7class.distsim.crf.ser.gz";

/// Annotator backed by a running Stanford CoreNLP server.
#[derive(Debug, Clone)]
pub struct CoreNlpClient {
    client: Client,
    url: String,
}

impl CoreNlpClient {
    /// Creates a client for the server described by `settings`.
    ///
    /// # Errors
    ///
    /// Returns [`QaError::Http`] when the HTTP client cannot be built.
    pub fn new(settings: &AnnotatorSettings) -> Result<Self, QaError> {
        let client = Client::builder()
            .user_agent("sherlock-nlp/0.1")
            .timeout(Duration::from_millis(settings.timeout_ms))
            .build()?;
        Ok(Self {
            client,
            url: settings.url.trim_end_matches('/').to_string(),
        })
    }

    /// Server base URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    fn request(&self, text: &str, one_sentence: bool) -> Result<Document, QaError> {
        let properties = request_properties(one_sentence);
        let response = self
            .client
            .post(format!("{}/", self.url))
            .query(&[("properties", properties.to_string())])
            .body(text.to_owned())
            .send()?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(QaError::Annotator(format!(
                "server answered {status}: {}",
                body.trim()
            )));
        }
        let value: serde_json::Value = response.json()?;
        corenlp::from_value(value)
    }
}

impl Annotator for CoreNlpClient {
    fn annotate(&self, text: &str) -> Result<Document, QaError> {
        self.request(text, false)
    }

    fn annotate_question(&self, text: &str) -> Result<Document, QaError> {
        self.request(text, true)
    }
}

fn request_properties(one_sentence: bool) -> serde_json::Value {
    let mut properties = json!({
        "annotators": ANNOTATORS,
        "outputFormat": "json",
        "ner.model": NER_MODEL,
        "ner.useSUTime": "false",
        "ner.applyNumericClassifiers": "false",
        "tokenize.options": "invertible=true",
    });
    if one_sentence {
        properties["ssplit.isOneSentence"] = json!("true");
    }
    properties
}
