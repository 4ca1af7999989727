// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Did-you-mean hints for misspelled names.

/// Levenshtein distance over chars, one row at a time.
fn edit_distance(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut row: Vec<usize> = (0..=b.len()).collect();

    for (i, a_ch) in a.chars().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, &b_ch) in b.iter().enumerate() {
            let substitution = diagonal + usize::from(a_ch != b_ch);
            diagonal = row[j + 1];
            row[j + 1] = substitution.min(row[j] + 1).min(diagonal + 1);
        }
    }

    row[b.len()]
}

/// Closest candidate to `name`, phrased as a hint.
///
/// Short names tolerate fewer edits. Ties go to the earliest candidate.
pub fn did_you_mean<'a>(name: &str, candidates: impl IntoIterator<Item = &'a str>) -> Option<String> {
    let max_distance = match name.chars().count() {
        0..=2 => 1,
        3..=5 => 2,
        _ => 3,
    };

    candidates
        .into_iter()
        .filter(|candidate| name.len().abs_diff(candidate.len()) <= max_distance)
        .map(|candidate| (edit_distance(name, candidate), candidate))
        .filter(|&(distance, _)| distance <= max_distance)
        .min_by_key(|&(distance, _)| distance)
        .map(|(_, closest)| format!("did you mean `{}`?", closest))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggests_the_closest_name() {
        let builtins = ["size", "read", "lines", "exists", "cat", "count"];

        assert_eq!(
            did_you_mean("sise", builtins),
            Some("did you mean `size`?".to_string())
        );
        assert_eq!(
            did_you_mean("cont", builtins),
            Some("did you mean `count`?".to_string())
        );
        assert_eq!(did_you_mean("glob", builtins), None);
    }

    #[test]
    fn distance() {
        assert_eq!(edit_distance("kitten", "sitting"), 3);
        assert_eq!(edit_distance("", "File"), 4);
        assert_eq!(edit_distance("Str", "Str"), 0);
        assert_eq!(edit_distance("Int", "Num"), 3);
    }
}
