/// Lowercase ASCII alphanumerics joined by single dashes. Falls back to `gym` when nothing
/// usable remains.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;

    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    if slug.is_empty() {
        "gym".to_string()
    } else {
        slug
    }
}

/// Candidate slug for the given collision count: `base`, `base-1`, `base-2`, ...
pub fn slug_candidate(base: &str, attempt: usize) -> String {
    if attempt == 0 {
        base.to_string()
    } else {
        format!("{}-{}", base, attempt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_separators() {
        assert_eq!(slugify("  Iron   Paradise & Spa!! "), "iron-paradise-spa");
        assert_eq!(slugify("Gold's Gym 24x7"), "gold-s-gym-24x7");
    }

    /// Expect the fallback slug for names without ASCII alphanumerics
    #[test]
    fn falls_back_to_gym() {
        assert_eq!(slugify("!!!"), "gym");
        assert_eq!(slugify("जिम"), "gym");
    }

    #[test]
    fn numbers_candidates() {
        assert_eq!(slug_candidate("iron", 0), "iron");
        assert_eq!(slug_candidate("iron", 2), "iron-2");
    }
}
