use std::ops::Range;

pub trait Matcher {
    /// Byte ranges of every non-overlapping occurrence of `query` in `candidate`,
    /// left to right. Empty for an empty query.
    fn occurrences(&self, candidate: &str, query: &str) -> Vec<Range<usize>>;

    fn is_match(&self, candidate: &str, query: &str) -> bool {
        query.is_empty() || !self.occurrences(candidate, query).is_empty()
    }
}

/// v0: case-insensitive substring containment.
///
/// The candidate is lowercased once, each lowered char remembering the byte
/// range of the source char it came from. Matches are found in the lowered
/// text and widened to whole source chars, so ranges always land on char
/// boundaries of the original candidate even when one char lowercases to
/// several (`İ` becomes `i` plus a combining dot).
#[derive(Debug, Default, Clone, Copy)]
pub struct CaseInsensitiveMatcher;

impl Matcher for CaseInsensitiveMatcher {
    fn occurrences(&self, candidate: &str, query: &str) -> Vec<Range<usize>> {
        let needle: Vec<char> = query.chars().flat_map(char::to_lowercase).collect();
        if needle.is_empty() {
            return Vec::new();
        }

        let lowered = lowercase_with_sources(candidate);
        let mut spans: Vec<Range<usize>> = Vec::new();
        let mut i = 0;
        while i + needle.len() <= lowered.len() {
            let window = &lowered[i..i + needle.len()];
            if !window.iter().zip(&needle).all(|(l, n)| l.ch == *n) {
                i += 1;
                continue;
            }

            let span = window[0].source.start..window[needle.len() - 1].source.end;
            i += needle.len();
            // The next match may not reuse any part of a widened source char
            while i < lowered.len() && lowered[i].source.start < span.end {
                i += 1;
            }
            spans.push(span);
        }
        spans
    }
}

struct LoweredChar {
    ch: char,
    source: Range<usize>,
}

fn lowercase_with_sources(text: &str) -> Vec<LoweredChar> {
    text.char_indices()
        .flat_map(|(offset, ch)| {
            let source = offset..offset + ch.len_utf8();
            ch.to_lowercase().map(move |lower| LoweredChar {
                ch: lower,
                source: source.clone(),
            })
        })
        .collect()
}
