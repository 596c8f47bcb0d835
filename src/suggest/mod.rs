pub mod highlight;
pub mod matching;

pub use highlight::{SuggestionMatch, Suggestions};
pub use matching::{CaseInsensitiveMatcher, Matcher};

/// Filters one level's candidate list against the text typed into its field.
#[derive(Debug, Clone)]
pub struct SuggestionIndex<M = CaseInsensitiveMatcher> {
	matcher: M,
}

impl Default for SuggestionIndex<CaseInsensitiveMatcher> {
	fn default() -> Self {
		Self {
			matcher: CaseInsensitiveMatcher,
		}
	}
}

impl<M> SuggestionIndex<M>
where
	M: Matcher,
{
	pub fn new(matcher: M) -> Self {
		Self { matcher }
	}

	pub fn filter<S: AsRef<str>>(&self, candidates: &[S], query: &str) -> Suggestions {
		// Empty query: everything, unmarked, in source order
		if query.is_empty() {
			let matches = candidates
				.iter()
				.map(|c| SuggestionMatch {
					text: c.as_ref().to_string(),
					highlights: Vec::new(),
				})
				.collect();
			return Suggestions::new(query, matches);
		}

		let matches: Vec<SuggestionMatch> = candidates
			.iter()
			.filter_map(|c| {
				let text = c.as_ref();
				let highlights = self.matcher.occurrences(text, query);
				if highlights.is_empty() {
					None
				} else {
					Some(SuggestionMatch {
						text: text.to_string(),
						highlights,
					})
				}
			})
			.collect();

		debug_assert!(matches.iter().all(|m| m.is_highlighted()));

		Suggestions::new(query, matches)
	}
}

/// Filter with the default case-insensitive matcher.
pub fn filter<S: AsRef<str>>(candidates: &[S], query: &str) -> Suggestions {
	SuggestionIndex::default().filter(candidates, query)
}
