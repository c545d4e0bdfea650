//! Small string helpers that have nothing to do with parsing.
use itertools::Itertools;

/// Return `s` with ASCII letters upper-cased. Other characters are unchanged.
pub fn upper_case(s: &str) -> String {
    s.to_ascii_uppercase()
}

/// Return `s` with ASCII letters lower-cased. Other characters are unchanged.
pub fn lower_case(s: &str) -> String {
    s.to_ascii_lowercase()
}

/// Levenshtein distance between `a` and `b`, counted in chars.
///
/// Insertions, deletions and substitutions all cost 1. Only one row of the
/// table is kept, sized to the shorter input.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a = a.chars().collect_vec();
    let b = b.chars().collect_vec();
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };

    // previous[j] is the distance between the prefix of `long` seen so far
    // and the first j chars of `short`
    let mut previous = (0..=short.len()).collect_vec();
    let mut current = vec![0; short.len() + 1];

    for (i, lc) in long.iter().enumerate() {
        current[0] = i + 1;
        for (j, sc) in short.iter().enumerate() {
            let substitution = previous[j] + usize::from(lc != sc);
            let deletion = previous[j + 1] + 1;
            let insertion = current[j] + 1;
            current[j + 1] = substitution.min(deletion).min(insertion);
        }
        std::mem::swap(&mut previous, &mut current);
    }
    previous[short.len()]
}
