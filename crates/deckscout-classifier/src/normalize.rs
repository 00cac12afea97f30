//! Whitespace normalization for model input

/// Collapse every run of whitespace (spaces, tabs, newlines) into one space
///
/// Leading and trailing runs collapse too but are not removed.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_whitespace = false;

    for c in text.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                out.push(' ');
                in_whitespace = true;
            }
        } else {
            out.push(c);
            in_whitespace = false;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_collapses_mixed_runs() {
        assert_eq!(normalize("Hi\n\n  there\t\tfriend"), "Hi there friend");
    }

    #[test]
    fn test_edges_collapse_but_stay() {
        assert_eq!(normalize("\r\n deck \n"), " deck ");
    }

    #[test]
    fn test_empty() {
        assert_eq!(normalize(""), "");
    }

    proptest! {
        #[test]
        fn prop_no_whitespace_runs(s in "\\PC*") {
            let out = normalize(&s);
            prop_assert!(!out.contains("  "));
            prop_assert!(out.chars().all(|c| c == ' ' || !c.is_whitespace()));
        }

        #[test]
        fn prop_idempotent(s in "\\PC*") {
            let once = normalize(&s);
            prop_assert_eq!(normalize(&once), once.clone());
        }

        #[test]
        fn prop_preserves_words(s in "[a-z \\n\\t]*") {
            let expected: Vec<&str> = s.split_whitespace().collect();
            let out = normalize(&s);
            let actual: Vec<&str> = out.split_whitespace().collect();
            prop_assert_eq!(actual, expected);
        }
    }
}
