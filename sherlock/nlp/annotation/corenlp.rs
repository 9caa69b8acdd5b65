//! Decoder for the JSON document produced by a Stanford CoreNLP server
//! (`outputFormat=json`). CoreNLP counts sentences and tokens from 1; the
//! decoded [`Document`] counts from 0.

use std::collections::BTreeMap;

use serde::Deserialize;

use super::model::{CorefChain, Document, Mention, Sentence, Token};
use crate::error::QaError;

#[derive(Debug, Deserialize)]
struct RawDocument {
    #[serde(default)]
    sentences: Vec<RawSentence>,
    #[serde(default)]
    corefs: BTreeMap<String, Vec<RawMention>>,
}

#[derive(Debug, Deserialize)]
struct RawSentence {
    #[serde(default)]
    tokens: Vec<RawToken>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawToken {
    word: String,
    #[serde(default)]
    original_text: Option<String>,
    #[serde(default)]
    lemma: String,
    #[serde(default)]
    pos: String,
    #[serde(default)]
    ner: Option<String>,
    #[serde(default)]
    before: String,
    #[serde(default)]
    after: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMention {
    sent_num: usize,
    start_index: usize,
    end_index: usize,
    #[serde(default)]
    is_representative_mention: bool,
}

impl RawMention {
    fn to_mention(&self) -> Result<Mention, QaError> {
        if self.sent_num == 0 || self.start_index == 0 || self.end_index < self.start_index {
            return Err(QaError::Annotator(format!(
                "malformed coreference mention: sentence {} span {}..{}",
                self.sent_num, self.start_index, self.end_index
            )));
        }
        Ok(Mention::new(
            self.sent_num - 1,
            self.start_index - 1,
            self.end_index - 1,
        ))
    }
}

impl From<RawToken> for Token {
    fn from(raw: RawToken) -> Self {
        let original_text = raw.original_text.unwrap_or_else(|| raw.word.clone());
        Self {
            word: raw.word,
            original_text,
            before: raw.before,
            after: raw.after,
            pos: raw.pos,
            ner: raw.ner.unwrap_or_else(|| "O".into()),
            lemma: raw.lemma,
        }
    }
}

/// Parses CoreNLP JSON into a [`Document`].
///
/// # Errors
///
/// Returns [`QaError::Json`] for malformed JSON and [`QaError::Annotator`] for spans outside their sentence.
pub fn parse_document(json: &str) -> Result<Document, QaError> {
    let raw: RawDocument = serde_json::from_str(json)?;
    into_document(raw)
}

/// Converts an already-parsed CoreNLP JSON value into a [`Document`].
///
/// # Errors
///
/// Returns [`QaError::Json`] for an unexpected shape and [`QaError::Annotator`] for spans outside their sentence.
pub fn from_value(value: serde_json::Value) -> Result<Document, QaError> {
    let raw: RawDocument = serde_json::from_value(value)?;
    into_document(raw)
}

fn into_document(raw: RawDocument) -> Result<Document, QaError> {
    let sentences = raw
        .sentences
        .into_iter()
        .map(|sentence| Sentence {
            tokens: sentence.tokens.into_iter().map(Token::from).collect(),
        })
        .collect();

    // Chain ids are numeric strings; order them numerically rather than lexically.
    let mut keyed: Vec<(u64, Vec<RawMention>)> = raw
        .corefs
        .into_iter()
        .map(|(id, mentions)| (id.parse().unwrap_or(u64::MAX), mentions))
        .collect();
    keyed.sort_by_key(|(id, _)| *id);

    let mut chains = Vec::with_capacity(keyed.len());
    for (_, raw_mentions) in keyed {
        if raw_mentions.is_empty() {
            continue;
        }
        let representative = raw_mentions
            .iter()
            .find(|mention| mention.is_representative_mention)
            .unwrap_or(&raw_mentions[0])
            .to_mention()?;
        let mut mentions = raw_mentions
            .iter()
            .map(RawMention::to_mention)
            .collect::<Result<Vec<_>, _>>()?;
        mentions.sort_by_key(|mention| (mention.sentence, mention.start));
        chains.push(CorefChain {
            representative,
            mentions,
        });
    }

    Ok(Document { sentences, chains })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tok(word: &str, pos: &str, ner: &str, before: &str, after: &str) -> serde_json::Value {
        json!({
            "word": word,
            "originalText": word,
            "lemma": word.to_lowercase(),
            "pos": pos,
            "ner": ner,
            "before": before,
            "after": after,
        })
    }

    #[test]
    fn converts_one_based_indices() {
        let value = json!({
            "sentences": [
                { "index": 0, "tokens": [
                    tok("Mary", "NNP", "PERSON", "", " "),
                    tok("sings", "VBZ", "O", " ", ""),
                    tok(".", ".", "O", "", " "),
                ]},
                { "index": 1, "tokens": [
                    tok("She", "PRP", "O", " ", " "),
                    tok("won", "VBD", "O", " ", ""),
                    tok(".", ".", "O", "", ""),
                ]}
            ],
            "corefs": {
                "12": [
                    { "id": 3, "sentNum": 2, "startIndex": 1, "endIndex": 2, "isRepresentativeMention": false },
                    { "id": 1, "sentNum": 1, "startIndex": 1, "endIndex": 2, "isRepresentativeMention": true }
                ],
                "2": [
                    { "id": 5, "sentNum": 2, "startIndex": 2, "endIndex": 3, "isRepresentativeMention": true }
                ]
            }
        });
        let doc = from_value(value).unwrap();
        assert_eq!(doc.sentences.len(), 2);
        assert_eq!(doc.sentences[0].tokens[1].lemma, "sings");
        assert_eq!(doc.chains.len(), 2);
        // "2" sorts before "12" numerically.
        assert_eq!(doc.chains[0].representative, Mention::new(1, 1, 2));
        let mary = &doc.chains[1];
        assert_eq!(mary.representative, Mention::new(0, 0, 1));
        assert_eq!(
            mary.mentions,
            vec![Mention::new(0, 0, 1), Mention::new(1, 0, 1)]
        );
    }

    #[test]
    fn missing_fields_fall_back() {
        let doc = parse_document(r#"{"sentences":[{"tokens":[{"word":"-LRB-","originalText":"("},{"word":"hi"}]}]}"#)
            .unwrap();
        let tokens = &doc.sentences[0].tokens;
        assert_eq!(tokens[0].original_text, "(");
        assert_eq!(tokens[1].original_text, "hi");
        assert_eq!(tokens[1].ner, "O");
        assert!(doc.chains.is_empty());
    }

    #[test]
    fn rejects_zero_based_mentions() {
        let err = parse_document(
            r#"{"sentences":[],"corefs":{"1":[{"sentNum":0,"startIndex":1,"endIndex":2}]}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, QaError::Annotator(_)));
    }
}
