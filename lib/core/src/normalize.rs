// Text canonicalization applied to a field before vectorization

/// Whether a character survives punctuation stripping: word characters
/// (alphanumeric or underscore) and whitespace
#[inline]
fn is_kept(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c.is_whitespace()
}

/// Lowercase `text` and strip every character that is neither a word
/// character nor whitespace. Total: the empty string maps to itself.
#[inline]
pub fn normalize(text: &str) -> String {
    text.to_lowercase().chars().filter(|&c| is_kept(c)).collect()
}

/// Collapse every run of two or more whitespace characters into a single
/// space. A lone whitespace character is left untouched.
///
/// Applied by the character analyzer before n-gram extraction.
pub fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut run = String::new();

    for c in text.chars() {
        if c.is_whitespace() {
            run.push(c);
            continue;
        }
        flush_run(&mut out, &mut run);
        out.push(c);
    }
    flush_run(&mut out, &mut run);

    out
}

fn flush_run(out: &mut String, run: &mut String) {
    match run.chars().count() {
        0 => {}
        1 => out.push_str(run),
        _ => out.push(' '),
    }
    run.clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercase_and_strip_punctuation() {
        assert_eq!(
            normalize("What's the capital city of Italy?"),
            "whats the capital city of italy"
        );
        assert_eq!(normalize("The verb is 'sleeps'."), "the verb is sleeps");
    }

    #[test]
    fn test_keeps_underscore_digits_and_whitespace() {
        assert_eq!(normalize("snake_case  42\tTabs!"), "snake_case  42\ttabs");
    }

    #[test]
    fn test_keeps_non_ascii_letters() {
        assert_eq!(normalize("Città, ÜBER!"), "città über");
    }

    #[test]
    fn test_empty_and_punctuation_only() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("?!..."), "");
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("a  b"), "a b");
        assert_eq!(collapse_whitespace("a\n\n\tb c"), "a b c");
        assert_eq!(collapse_whitespace("a\nb"), "a\nb");
        assert_eq!(collapse_whitespace("   "), " ");
        assert_eq!(collapse_whitespace(""), "");
    }
}
