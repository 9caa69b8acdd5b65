use crate::annotation::{Document, Token};

/// Replacement of one mention span by the tokens of its chain's representative.
#[derive(Debug, Clone, Copy)]
struct Block<'a> {
    start: usize,
    end: usize,
    tokens: &'a [Token],
}

/// Returns the tokens of `sentence_index` with every mention of an entity named elsewhere
/// replaced by that entity's representative mention.
///
/// Overlapping mentions are resolved by start order: once a block is applied, any later block
/// starting inside it is dropped. The result borrows tokens from the document; the
/// document itself is never modified. Out-of-range indices yield an empty list.
#[must_use]
pub fn expand(document: &Document, sentence_index: usize) -> Vec<&Token> {
    let Some(sentence) = document.sentences.get(sentence_index) else {
        return Vec::new();
    };
    let mut blocks = replacement_blocks(document, sentence_index);
    if blocks.is_empty() {
        return sentence.tokens.iter().collect();
    }
    // Stable: equal starts keep chain order.
    blocks.sort_by_key(|block| block.start);

    let extra: usize = blocks.iter().map(|block| block.tokens.len()).sum();
    let mut output: Vec<&Token> = Vec::with_capacity(sentence.len() + extra);
    let mut cursor = 0;
    for block in blocks {
        if block.start < cursor {
            continue;
        }
        output.extend(&sentence.tokens[cursor..block.start]);
        output.extend(block.tokens);
        cursor = block.end;
    }
    output.extend(&sentence.tokens[cursor..]);
    output
}

/// Size of the expanded token stream, used as the selector's tie-break.
#[must_use]
pub fn expanded_len(document: &Document, sentence_index: usize) -> usize {
    expand(document, sentence_index).len()
}

fn replacement_blocks(document: &Document, sentence_index: usize) -> Vec<Block<'_>> {
    let mut blocks = Vec::new();
    for chain in &document.chains {
        if chain.representative.sentence == sentence_index {
            continue;
        }
        let Some(representative) = document.span(&chain.representative) else {
            continue;
        };
        for mention in &chain.mentions {
            if mention.sentence != sentence_index || document.span(mention).is_none() {
                continue;
            }
            blocks.push(Block {
                start: mention.start,
                end: mention.end,
                tokens: representative,
            });
        }
    }
    blocks
}
