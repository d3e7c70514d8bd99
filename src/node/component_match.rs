use super::PATH_SEPARATOR;

/// One occurrence of a needle within a path, with its component boundary status.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ComponentMatch {
    /// Byte offset of the first matched character.
    pub start: usize,
    /// Byte offset one past the last matched character.
    pub end: usize,
    /// The match starts on a component boundary.
    ///
    /// True if the first matched character is a separator or the character before the match is a separator.
    pub start_bounded: bool,
    /// The match ends on a component boundary.
    ///
    /// True if the last matched character is a separator, the character after the match is a separator, or the match reaches the end of the path.
    pub end_bounded: bool,
}

impl ComponentMatch {
    /// Indicates if the match is bounded at both ends.
    #[must_use]
    pub fn is_bounded(&self) -> bool {
        self.start_bounded && self.end_bounded
    }

    /// Indicates if the match runs to the end of `haystack`.
    #[must_use]
    pub fn reaches_end(&self, haystack: &str) -> bool {
        self.end == haystack.len()
    }
}

/// Returns every occurrence of `needle` in `haystack`, including overlapping occurrences, in order of increasing offset.
///
/// An empty `needle` has no occurrences.
pub fn component_matches<'a>(
    haystack: &'a str,
    needle: &'a str,
) -> impl Iterator<Item = ComponentMatch> + 'a {
    let mut offset = 0;
    std::iter::from_fn(move || {
        if needle.is_empty() || offset > haystack.len() {
            return None;
        }
        let start = offset + haystack[offset..].find(needle)?;
        let end = start + needle.len();
        offset = start
            + haystack[start..]
                .chars()
                .next()
                .map_or(1, char::len_utf8);

        let start_bounded = needle.starts_with(PATH_SEPARATOR)
            || haystack[..start].ends_with(PATH_SEPARATOR);
        let end_bounded = needle.ends_with(PATH_SEPARATOR)
            || end == haystack.len()
            || haystack[end..].starts_with(PATH_SEPARATOR);
        Some(ComponentMatch {
            start,
            end,
            start_bounded,
            end_bounded,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounded(haystack: &str, needle: &str) -> Vec<usize> {
        component_matches(haystack, needle)
            .filter(ComponentMatch::is_bounded)
            .map(|m| m.start)
            .collect()
    }

    #[test]
    fn component_match_boundaries() {
        assert_eq!(bounded("/g1/lon", "lon"), vec![4]);
        assert!(bounded("/lat_lon", "lon").is_empty());
        assert!(bounded("/g1/longitude", "lon").is_empty());
        assert_eq!(bounded("/g1/lon", "/g1"), vec![0]);
        assert_eq!(bounded("/g1/lon", "g1/"), vec![1]);
        assert!(bounded("/g10/lon", "g1").is_empty());
    }

    #[test]
    fn component_match_every_occurrence() {
        // First occurrence is unbounded, the second is bounded.
        assert_eq!(bounded("/lon_lon/lon", "lon"), vec![9]);
        let all: Vec<usize> = component_matches("/aaa", "aa").map(|m| m.start).collect();
        assert_eq!(all, vec![1, 2]);
        assert_eq!(component_matches("/a", "").count(), 0);
    }

    #[test]
    fn component_match_reaches_end() {
        let m = component_matches("/g5/g5g1", "g5").next().unwrap();
        assert!(m.is_bounded());
        assert!(!m.reaches_end("/g5/g5g1"));
        let m = component_matches("/g5/g5g1", "g5g1").next().unwrap();
        assert!(m.reaches_end("/g5/g5g1"));
    }
}
