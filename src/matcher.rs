//! Fuzzy subsequence matching over candidate keywords.

/// Relevance of a subsequence match: a tighter span ranks higher, with an
/// earlier first-match position breaking ties.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchScore {
    /// Distance from the first to the last matched character.
    pub span: usize,
    /// Position of the first matched character.
    pub first: usize,
}

/// Matches `query` against `target` as a case-insensitive subsequence:
/// every query character must appear in the target, in order, not
/// necessarily contiguously. Positions are assigned greedily left to
/// right. Returns `None` when the query is not a subsequence.
pub fn subsequence_score(query: &str, target: &str) -> Option<MatchScore> {
    let needle: Vec<char> = query.chars().flat_map(char::to_lowercase).collect();
    if needle.is_empty() {
        return Some(MatchScore { span: 0, first: 0 });
    }

    let mut wanted = 0;
    let mut first = 0;
    for (pos, ch) in target.chars().flat_map(char::to_lowercase).enumerate() {
        if ch == needle[wanted] {
            if wanted == 0 {
                first = pos;
            }
            wanted += 1;
            if wanted == needle.len() {
                return Some(MatchScore {
                    span: pos - first,
                    first,
                });
            }
        }
    }

    None
}

/// Filters `items` to those whose keyword matches `query` and orders them
/// by relevance. The sort is stable, so equally scored candidates keep
/// their original order.
pub fn rank_by_key<T, F>(query: &str, items: Vec<T>, key: F) -> Vec<T>
where
    F: Fn(&T) -> &str,
{
    let mut scored: Vec<(MatchScore, T)> = items
        .into_iter()
        .filter_map(|item| subsequence_score(query, key(&item)).map(|score| (score, item)))
        .collect();
    scored.sort_by_key(|(score, _)| (score.span, score.first));
    scored.into_iter().map(|(_, item)| item).collect()
}
