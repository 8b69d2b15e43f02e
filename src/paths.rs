use std::path::{Component, Path};

/// True when `name` is exactly one ordinary path segment, so joining it onto a
/// directory always lands directly inside that directory. Absolute paths,
/// drive prefixes, `.`/`..` and anything containing a separator are refused.
pub fn is_single_segment(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    ) && !name.contains(['/', '\\'])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_names_are_accepted() {
        assert!(is_single_segment("Alice"));
        assert!(is_single_segment("Mary Ann"));
        assert!(is_single_segment("gradebook.csv"));
        assert!(is_single_segment(".hidden"));
    }

    #[test]
    fn test_paths_are_refused() {
        assert!(!is_single_segment(""));
        assert!(!is_single_segment("/tmp/outside"));
        assert!(!is_single_segment("nested/name"));
        assert!(!is_single_segment("trailing/"));
        assert!(!is_single_segment("back\\slash"));
        assert!(!is_single_segment(".."));
        assert!(!is_single_segment("."));
    }
}
