//! Longest-common-subsequence scoring
//!
//! Case-sensitive: the query is compared exactly as typed.

/// Length of the longest subsequence of `query` found, in order but not
/// necessarily contiguous, inside `target`
pub fn lcs_length(query: &str, target: &str) -> usize {
    let query: Vec<char> = query.chars().collect();
    let target: Vec<char> = target.chars().collect();
    if query.is_empty() || target.is_empty() {
        return 0;
    }

    // Two rows are enough: each cell only looks up and to the left.
    let mut prev = vec![0usize; target.len() + 1];
    let mut curr = vec![0usize; target.len() + 1];

    for &q in &query {
        for (j, &t) in target.iter().enumerate() {
            curr[j + 1] = if q == t {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[target.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lcs_basic() {
        assert_eq!(lcs_length("\\alp", "\\alpha"), 4);
        assert_eq!(lcs_length("\\alp", "\\aleph"), 4);
        assert_eq!(lcs_length("\\alp", "\\beta"), 2);
        assert_eq!(lcs_length("\\fr", "\\frac"), 3);
    }

    #[test]
    fn test_lcs_non_contiguous() {
        assert_eq!(lcs_length("\\lrr", "\\leftrightarrow"), 4);
        assert_eq!(lcs_length("ace", "abcde"), 3);
    }

    #[test]
    fn test_lcs_case_sensitive() {
        assert_eq!(lcs_length("\\Alpha", "\\alpha"), 5);
        assert_eq!(lcs_length("\\Delta", "\\Delta"), 6);
    }

    #[test]
    fn test_lcs_empty() {
        assert_eq!(lcs_length("", "\\alpha"), 0);
        assert_eq!(lcs_length("\\alpha", ""), 0);
        assert_eq!(lcs_length("", ""), 0);
    }
}
