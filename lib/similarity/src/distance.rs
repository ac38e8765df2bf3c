//! Edit distance and similarity functions
//!
//! Lengths are measured in `char`s, so multi-byte symbols count as one edit.

use ahash::AHashMap;

/// Damerau-Levenshtein distance between two strings
///
/// Insertion, deletion, substitution and transposition each cost 1.
/// Unlike the restricted "optimal string alignment" variant, transposed
/// characters may have other characters between them: the last row in which
/// each source character appeared is tracked so the lookback is O(1).
///
/// # Returns
/// The minimum number of edits turning `source` into `target`
pub fn damerau_levenshtein(source: &str, target: &str) -> usize {
    let source: Vec<char> = source.chars().collect();
    let target: Vec<char> = target.chars().collect();
    let source_len = source.len();
    let target_len = target.len();

    if source_len == 0 {
        return target_len;
    }
    if target_len == 0 {
        return source_len;
    }

    // Larger than any real distance; fills the boundary row and column.
    let infinity = source_len + target_len;

    // Offset by one so that row/column 0 hold the sentinel.
    let mut matrix = vec![vec![0usize; target_len + 2]; source_len + 2];
    matrix[0][0] = infinity;
    for i in 0..=source_len {
        matrix[i + 1][0] = infinity;
        matrix[i + 1][1] = i;
    }
    for j in 0..=target_len {
        matrix[0][j + 1] = infinity;
        matrix[1][j + 1] = j;
    }

    let mut last_row_of: AHashMap<char, usize> = AHashMap::new();

    for row in 1..=source_len {
        let source_char = source[row - 1];
        let mut last_matching_col = 0;

        for col in 1..=target_len {
            let target_char = target[col - 1];
            let last_matching_row = last_row_of.get(&target_char).copied().unwrap_or(0);
            let cost = usize::from(source_char != target_char);

            let insertion = matrix[row][col + 1] + 1;
            let deletion = matrix[row + 1][col] + 1;
            let substitution = matrix[row][col] + cost;
            let transposition = matrix[last_matching_row][last_matching_col]
                + (row - last_matching_row - 1)
                + 1
                + (col - last_matching_col - 1);

            matrix[row + 1][col + 1] = insertion
                .min(deletion)
                .min(substitution)
                .min(transposition);

            if cost == 0 {
                last_matching_col = col;
            }
        }

        last_row_of.insert(source_char, row);
    }

    matrix[source_len + 1][target_len + 1]
}

/// Similarity ratio derived from [`damerau_levenshtein`]
///
/// `1 - distance / (len(a) + len(b))`. Two empty strings are a perfect
/// match. The value is not clamped and can be negative for short, very
/// different inputs; only the relative order matters for ranking.
pub fn similarity(a: &str, b: &str) -> f64 {
    let total_len = a.chars().count() + b.chars().count();
    if total_len == 0 {
        return 1.0;
    }
    1.0 - damerau_levenshtein(a, b) as f64 / total_len as f64
}
