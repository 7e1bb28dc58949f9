pub mod aliases;
pub mod index;

/// Gate for matching generic items (window titles, file names).
pub const GENERIC_THRESHOLD: u8 = 70;
/// Stricter gate for resolving a spoken app name to a launch term.
pub const ALIAS_THRESHOLD: u8 = 80;

/// Best candidate for a query plus its confidence score (0–100).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    pub name: String,
    pub score: u8,
}

/// Matches `query` against `candidates`.
///
/// Case-insensitive substring containment always wins over fuzzy scoring and
/// is checked first: a literal substring hit is unambiguous, while a purely
/// fuzzy best-match can pick a wrong but similar-sounding name. Only when no
/// candidate contains the query does the fuzzy path apply, and it must score
/// strictly above `threshold`. An empty candidate list yields `None`.
pub fn resolve<'a, I>(query: &str, candidates: I, threshold: u8) -> Option<MatchResult>
where
    I: IntoIterator<Item = &'a str> + Clone,
{
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }

    for candidate in candidates.clone() {
        if candidate.to_lowercase().contains(&needle) {
            tracing::debug!(query = %query, matched = %candidate, "substring match");
            return Some(MatchResult {
                name: candidate.to_string(),
                score: 100,
            });
        }
    }

    let mut best: Option<MatchResult> = None;
    for candidate in candidates {
        let score = similarity(&needle, &candidate.to_lowercase());
        if best.as_ref().map_or(true, |b| score > b.score) {
            best = Some(MatchResult {
                name: candidate.to_string(),
                score,
            });
        }
    }

    match best {
        Some(m) if m.score > threshold => {
            tracing::debug!(query = %query, matched = %m.name, score = m.score, "fuzzy match");
            Some(m)
        }
        Some(m) => {
            tracing::debug!(query = %query, best = %m.name, score = m.score, threshold, "below threshold");
            None
        }
        None => None,
    }
}

/// Similarity in 0–100: the best of a plain edit-distance ratio, a
/// token-sort ratio (word order must not sink "code vs" vs "vs code"), and a
/// partial ratio (a candidate buried inside a longer spoken directive, as in
/// "open music folder" vs "Music"). Inputs are expected pre-lowercased.
pub fn similarity(a: &str, b: &str) -> u8 {
    let plain = ratio(a, b);
    let sorted_a = token_sort(a);
    let sorted_b = token_sort(b);
    let tokens = ratio(&sorted_a, &sorted_b);
    plain.max(tokens).max(partial_ratio(a, b))
}

/// Best ratio of the shorter string against every equal-length window of the
/// longer one.
fn partial_ratio(a: &str, b: &str) -> u8 {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let (short, long) = if a_chars.len() <= b_chars.len() {
        (&a_chars, &b_chars)
    } else {
        (&b_chars, &a_chars)
    };
    if short.is_empty() || short.len() == long.len() {
        return ratio(a, b);
    }

    let mut best = 0u8;
    for start in 0..=(long.len() - short.len()) {
        let window = &long[start..start + short.len()];
        let dist = levenshtein(short, window);
        let score = (((short.len() - dist.min(short.len())) as f64 / short.len() as f64) * 100.0)
            .round() as u8;
        best = best.max(score);
        if best == 100 {
            break;
        }
    }
    best
}

fn token_sort(s: &str) -> String {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

fn ratio(a: &str, b: &str) -> u8 {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let longest = a_chars.len().max(b_chars.len());
    if longest == 0 {
        return 100;
    }
    let dist = levenshtein(&a_chars, &b_chars);
    (((longest - dist) as f64 / longest as f64) * 100.0).round() as u8
}

fn levenshtein(a: &[char], b: &[char]) -> usize {
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0usize; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j] + cost).min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_candidates_return_none() {
        assert!(resolve("notepad", std::iter::empty(), GENERIC_THRESHOLD).is_none());
    }

    #[test]
    fn empty_query_returns_none() {
        let candidates = ["Notepad"];
        assert!(resolve("  ", candidates.iter().copied(), GENERIC_THRESHOLD).is_none());
    }

    #[test]
    fn substring_containment_beats_fuzzy_score() {
        // "Notepads Anonymous" contains the query; "Notepad" would win on
        // pure edit distance. Substring priority must pick the container.
        let candidates = ["Notepod", "Notepads Anonymous — meeting notes"];
        let m = resolve("notepads anonymous", candidates.iter().copied(), GENERIC_THRESHOLD)
            .expect("substring hit");
        assert_eq!(m.name, "Notepads Anonymous — meeting notes");
        assert_eq!(m.score, 100);
    }

    #[test]
    fn substring_is_case_insensitive() {
        let candidates = ["Untitled - NOTEPAD"];
        let m = resolve("notepad", candidates.iter().copied(), GENERIC_THRESHOLD).unwrap();
        assert_eq!(m.name, "Untitled - NOTEPAD");
    }

    #[test]
    fn fuzzy_fallback_applies_when_no_substring() {
        let candidates = ["calculater", "spreadsheet"];
        let m = resolve("calculator", candidates.iter().copied(), GENERIC_THRESHOLD).unwrap();
        assert_eq!(m.name, "calculater");
        assert!(m.score > GENERIC_THRESHOLD && m.score < 100);
    }

    #[test]
    fn score_at_threshold_is_not_found() {
        // similarity("ab", "cd") == 0; anything ≤ threshold must be rejected.
        let candidates = ["zzzzzzzzzz"];
        assert!(resolve("notepad", candidates.iter().copied(), GENERIC_THRESHOLD).is_none());
    }

    #[test]
    fn token_order_does_not_sink_the_score() {
        assert!(similarity("code vs", "vs code") == 100);
    }

    #[test]
    fn candidate_inside_a_longer_directive_scores_high() {
        assert_eq!(similarity("open music folder", "music"), 100);
    }

    #[test]
    fn deterministic_first_best_wins_ties() {
        let candidates = ["abcd", "abce"];
        let a = resolve("abcf", candidates.iter().copied(), 50).unwrap();
        let b = resolve("abcf", candidates.iter().copied(), 50).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.name, "abcd");
    }
}
