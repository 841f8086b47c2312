//! Delimited-list helpers for gene-id columns and report cells

use std::collections::HashSet;
use std::fmt::Display;

/// Split a delimited list into trimmed, non-empty tokens (order preserved).
pub fn split_to_vec(input: &str, delimiter: &str) -> Vec<String> {
    input
        .split(delimiter)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Split a delimited list into a set of trimmed, non-empty tokens.
pub fn split_to_set(input: &str, delimiter: &str) -> HashSet<String> {
    split_to_vec(input, delimiter).into_iter().collect()
}

/// Join displayable items with a delimiter.
pub fn join<I, T>(items: I, delimiter: &str) -> String
where
    I: IntoIterator<Item = T>,
    T: Display,
{
    items
        .into_iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(delimiter)
}

/// Count distinct tokens across a column of delimited lists.
///
/// `["hi,how,are,you", "hi,hi,today"]` has 5 distinct tokens.
pub fn count_unique_elements<S: AsRef<str>>(column: &[S], delimiter: &str) -> usize {
    column
        .iter()
        .flat_map(|cell| split_to_vec(cell.as_ref(), delimiter))
        .collect::<HashSet<_>>()
        .len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_trims_and_drops_empty_tokens() {
        assert_eq!(split_to_vec(" a, b,,c ,", ","), vec!["a", "b", "c"]);
        assert!(split_to_vec("", ",").is_empty());
    }

    #[test]
    fn test_split_to_set_deduplicates() {
        let set = split_to_set("g1;g2;g1", ";");
        assert_eq!(set.len(), 2);
        assert!(set.contains("g1"));
    }

    #[test]
    fn test_join() {
        assert_eq!(join([1, 2, 3], ", "), "1, 2, 3");
        assert_eq!(join(Vec::<String>::new(), ", "), "");
    }

    #[test]
    fn test_count_unique_elements() {
        assert_eq!(
            count_unique_elements(&["hi,how,are,you", "hi,hi,today"], ","),
            5
        );
    }
}
