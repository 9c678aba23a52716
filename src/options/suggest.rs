/// Fuzzy "did you mean" hints for misspelled option names and values.
use nucleo_matcher::{
    Matcher, Utf32Str,
    pattern::{CaseMatching, Normalization, Pattern},
};

/// Return the candidate that best fuzzy-matches `query`, if any scores.
///
/// Ties keep the earlier candidate, so callers control precedence through
/// iteration order.
#[must_use]
pub fn suggest<'c, I>(query: &str, candidates: I) -> Option<String>
where
    I: IntoIterator<Item = &'c str>,
{
    if query.is_empty() {
        return None;
    }

    let pattern = Pattern::parse(query, CaseMatching::Smart, Normalization::Smart);
    let mut matcher = Matcher::new(nucleo_matcher::Config::DEFAULT);

    let mut best: Option<(&str, u32)> = None;
    for candidate in candidates {
        let mut buf = Vec::new();
        let haystack = Utf32Str::new(candidate, &mut buf);
        let Some(score) = pattern.score(haystack, &mut matcher) else {
            continue;
        };
        if best.is_none_or(|(_, top)| score > top) {
            best = Some((candidate, score));
        }
    }

    best.map(|(candidate, _)| candidate.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subsequence_is_suggested() {
        let names = ["threads", "verbose", "output"];
        assert_eq!(suggest("thread", names), Some("threads".to_owned()));
        assert_eq!(suggest("verb", names), Some("verbose".to_owned()));
    }

    #[test]
    fn test_nothing_close() {
        assert_eq!(suggest("zzz", ["threads", "verbose"]), None);
        assert_eq!(suggest("", ["threads"]), None);
        assert_eq!(suggest("threads", std::iter::empty()), None);
    }
}
