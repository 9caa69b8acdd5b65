use serde::{Deserialize, Serialize};

/// One annotated token, carrying enough whitespace to rebuild the source text exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Normalized surface word (`-LRB-` for `(`, etc.).
    pub word: String,
    /// Text exactly as it appeared in the source.
    pub original_text: String,
    /// Whitespace preceding the token.
    #[serde(default)]
    pub before: String,
    /// Whitespace following the token.
    #[serde(default)]
    pub after: String,
    /// Penn Treebank part-of-speech tag.
    #[serde(default)]
    pub pos: String,
    /// Named-entity tag, `O` when outside any entity.
    #[serde(default = "outside_tag")]
    pub ner: String,
    /// Lemma supplied by the annotator; empty when unknown.
    #[serde(default)]
    pub lemma: String,
}

fn outside_tag() -> String {
    "O".into()
}

impl Token {
    /// Returns true when the part-of-speech tag names a verb form.
    #[must_use]
    pub fn is_verb(&self) -> bool {
        VERB_TAGS.contains(&self.pos.as_str())
    }

    /// Returns true when the token carries one of `tags` as its entity tag.
    #[must_use]
    pub fn has_entity(&self, tags: &[&str]) -> bool {
        tags.contains(&self.ner.as_str())
    }
}

/// Part-of-speech tags treated as verbs.
pub const VERB_TAGS: [&str; 6] = ["VB", "VBD", "VBG", "VBN", "VBP", "VBZ"];

/// Ordered tokens of one sentence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    /// Tokens in source order.
    pub tokens: Vec<Token>,
}

impl Sentence {
    /// Number of tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns true when the sentence has no tokens.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// A `[start, end)` token span inside one sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mention {
    /// Zero-based sentence index.
    pub sentence: usize,
    /// First token of the span.
    pub start: usize,
    /// One past the last token of the span.
    pub end: usize,
}

impl Mention {
    /// Creates a mention.
    #[must_use]
    pub const fn new(sentence: usize, start: usize, end: usize) -> Self {
        Self {
            sentence,
            start,
            end,
        }
    }
}

/// Mentions that refer to the same entity, plus the one that names it best.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorefChain {
    /// Mention standing in for the whole chain.
    pub representative: Mention,
    /// Every mention of the entity in textual order.
    pub mentions: Vec<Mention>,
}

/// Annotated text: sentences plus coreference chains over them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Sentences in document order.
    pub sentences: Vec<Sentence>,
    /// Coreference chains over the whole document.
    #[serde(default)]
    pub chains: Vec<CorefChain>,
}

impl Document {
    /// Tokens covered by `mention`, or `None` when the span falls outside its sentence.
    #[must_use]
    pub fn span(&self, mention: &Mention) -> Option<&[Token]> {
        let sentence = self.sentences.get(mention.sentence)?;
        if mention.start > mention.end {
            return None;
        }
        sentence.tokens.get(mention.start..mention.end)
    }

    /// All tokens of the document in order, across sentence boundaries.
    pub fn tokens(&self) -> impl Iterator<Item = &Token> {
        self.sentences.iter().flat_map(|sentence| sentence.tokens.iter())
    }

    /// Total token count.
    #[must_use]
    pub fn token_count(&self) -> usize {
        self.sentences.iter().map(Sentence::len).sum()
    }
}
