//! Naming rules for collection items.
//!
//! Two rules live here:
//! - **Default names**: a blank name is replaced at save time by the record
//!   type's label, so a stored name is never empty.
//! - **Duplicate names**: a copy of `N` is called `N (k)`, where `k` counts
//!   the siblings already named `N` or `N (j)`. Any suffix on `N` is part of
//!   the base, so copies of `X (1)` become `X (1) (1)`, `X (1) (2)`, ...

/// Returns true if `candidate` is `base` or `base (j)` for a decimal `j`.
pub fn matches_base(candidate: &str, base: &str) -> bool {
    let Some(rest) = candidate.strip_prefix(base) else {
        return false;
    };
    if rest.is_empty() {
        return true;
    }
    let Some(digits) = rest
        .strip_prefix(" (")
        .and_then(|inner| inner.strip_suffix(')'))
    else {
        return false;
    };
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Trim a user-entered name, returning `None` if nothing remains.
pub fn normalize(name: Option<&str>) -> Option<String> {
    name.map(str::trim)
        .filter(|trimmed| !trimmed.is_empty())
        .map(str::to_string)
}

/// Name for a copy of an item called `base`.
///
/// `siblings` are the names currently in the collection, including the
/// source item. If the counted suffix is already taken (an earlier copy was
/// renamed or removed), the counter keeps increasing until it is free.
pub fn duplicate_name<'a>(base: &str, siblings: impl IntoIterator<Item = &'a str>) -> String {
    let siblings: Vec<&str> = siblings.into_iter().collect();
    let count = siblings
        .iter()
        .filter(|name| matches_base(name, base))
        .count();
    first_free(base, count.max(1), &siblings)
}

/// Name for a new item saved without one.
///
/// The label is used as-is the first time; afterwards it is suffixed like
/// a duplicate so several default-named items stay distinguishable.
pub fn default_name<'a>(label: &str, siblings: impl IntoIterator<Item = &'a str>) -> String {
    let siblings: Vec<&str> = siblings.into_iter().collect();
    let count = siblings
        .iter()
        .filter(|name| matches_base(name, label))
        .count();
    if count == 0 {
        label.to_string()
    } else {
        first_free(label, count, &siblings)
    }
}

fn first_free(base: &str, mut counter: usize, siblings: &[&str]) -> String {
    loop {
        let candidate = format!("{} ({})", base, counter);
        if !siblings.contains(&candidate.as_str()) {
            return candidate;
        }
        counter += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_base() {
        assert!(matches_base("Ceiling 1", "Ceiling 1"));
        assert!(matches_base("Ceiling 1 (1)", "Ceiling 1"));
        assert!(matches_base("Ceiling 1 (12)", "Ceiling 1"));
        assert!(!matches_base("Ceiling 1 (1) (1)", "Ceiling 1"));
        assert!(!matches_base("Ceiling 10", "Ceiling 1"));
        assert!(!matches_base("Ceiling 1 ()", "Ceiling 1"));
        assert!(!matches_base("Ceiling 1 (a)", "Ceiling 1"));
        assert!(!matches_base("Ceiling", "Ceiling 1"));
    }

    #[test]
    fn test_matches_base_with_parentheses_in_base() {
        assert!(matches_base("Roof (north)", "Roof (north)"));
        assert!(matches_base("Roof (north) (2)", "Roof (north)"));
        assert!(!matches_base("Roof (north)", "Roof"));
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(None), None);
        assert_eq!(normalize(Some("")), None);
        assert_eq!(normalize(Some("   ")), None);
        assert_eq!(normalize(Some("  Bath  ")), Some("Bath".to_string()));
    }

    #[test]
    fn test_duplicate_name_counts_original() {
        assert_eq!(duplicate_name("X", ["X"]), "X (1)");
        assert_eq!(duplicate_name("X", ["X", "Y", "X (1)"]), "X (2)");
    }

    #[test]
    fn test_duplicate_name_of_suffixed_source() {
        let siblings = ["X", "X (1)", "X (2)"];
        assert_eq!(duplicate_name("X (1)", siblings), "X (1) (1)");

        let siblings = ["X", "X (1)", "X (2)", "X (1) (1)"];
        assert_eq!(duplicate_name("X (1)", siblings), "X (1) (2)");
    }

    #[test]
    fn test_duplicate_name_skips_taken_suffix() {
        // "X (1)" was removed, leaving a count of two but "X (2)" taken.
        assert_eq!(duplicate_name("X", ["X", "X (2)"]), "X (3)");
    }

    #[test]
    fn test_default_name() {
        assert_eq!(default_name("Ceiling", Vec::<&str>::new()), "Ceiling");
        assert_eq!(default_name("Ceiling", ["Roof"]), "Ceiling");
        assert_eq!(default_name("Ceiling", ["Ceiling"]), "Ceiling (1)");
        assert_eq!(default_name("Ceiling", ["Ceiling", "Ceiling (1)"]), "Ceiling (2)");
    }
}
