use std::ops::Range;

/// A candidate that survived filtering, with the ranges to emphasize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionMatch {
    pub text: String,
    /// Byte ranges into `text`, sorted and non-overlapping.
    pub highlights: Vec<Range<usize>>,
}

impl SuggestionMatch {
    /// Split the text into `(run, emphasized)` pieces for rendering.
    pub fn segments(&self) -> Vec<(&str, bool)> {
        let mut out = Vec::with_capacity(self.highlights.len() * 2 + 1);
        let mut cursor = 0;
        for span in &self.highlights {
            if span.start > cursor {
                out.push((&self.text[cursor..span.start], false));
            }
            out.push((&self.text[span.clone()], true));
            cursor = span.end;
        }
        if cursor < self.text.len() {
            out.push((&self.text[cursor..], false));
        }
        out
    }

    pub fn is_highlighted(&self) -> bool {
        !self.highlights.is_empty()
    }
}

/// The filtered view behind one suggestion panel.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Suggestions {
    query: String,
    matches: Vec<SuggestionMatch>,
}

impl Suggestions {
    pub(crate) fn new(query: impl Into<String>, matches: Vec<SuggestionMatch>) -> Self {
        Self {
            query: query.into(),
            matches,
        }
    }

    /// Empty view; the panel is hidden.
    pub fn hidden() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn matches(&self) -> &[SuggestionMatch] {
        &self.matches
    }

    pub fn texts(&self) -> Vec<&str> {
        self.matches.iter().map(|m| m.text.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// The panel is shown iff there is at least one match.
    pub fn is_panel_visible(&self) -> bool {
        !self.matches.is_empty()
    }
}
