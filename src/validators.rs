use regex::Regex;

pub type ValidationError = String;
pub type Validator = Box<dyn Fn(&str) -> Result<(), ValidationError> + Send + Sync>;

/// Run a list of validators against `value`, returning the first error.
pub fn run_validators(validators: &[Validator], value: &str) -> Result<(), ValidationError> {
    for validator in validators {
        validator(value)?;
    }
    Ok(())
}

/// Fails on the empty string only. Whitespace counts as content.
pub fn required(message: impl Into<String>) -> Validator {
    let message = message.into();
    Box::new(move |value: &str| {
        if value.is_empty() {
            Err(message.clone())
        } else {
            Ok(())
        }
    })
}

/// Length is counted in chars (Unicode scalar values), not UTF-16 code
/// units as a browser form would: one astral character such as an emoji
/// counts as 1 here and as 2 in a browser.
pub fn min_length(min_len: usize, message: impl Into<String>) -> Validator {
    let message = message.into();
    Box::new(move |value: &str| {
        if value.chars().count() < min_len {
            Err(message.clone())
        } else {
            Ok(())
        }
    })
}

pub fn matches(re: &'static Regex, message: impl Into<String>) -> Validator {
    let message = message.into();
    Box::new(move |value: &str| {
        if re.is_match(value) {
            Ok(())
        } else {
            Err(message.clone())
        }
    })
}

/// Skips `inner` when the value is empty.
pub fn optional(inner: Validator) -> Validator {
    Box::new(move |value: &str| {
        if value.is_empty() {
            Ok(())
        } else {
            inner(value)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::LazyLock;

    static DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]+$").expect("regex"));

    #[test]
    fn required_accepts_whitespace() {
        let v = required("needed");
        assert_eq!(v(""), Err("needed".to_string()));
        assert_eq!(v("  "), Ok(()));
    }

    #[test]
    fn min_length_counts_chars_not_bytes() {
        let v = min_length(2, "short");
        assert_eq!(v("é"), Err("short".to_string()));
        assert_eq!(v("éé"), Ok(()));
    }

    #[test]
    fn astral_character_counts_once() {
        let v = min_length(2, "short");
        assert_eq!(v("😀"), Err("short".to_string()));
        assert_eq!(v("😀😀"), Ok(()));
    }

    #[test]
    fn optional_skips_empty_values() {
        let v = optional(matches(&DIGITS, "digits only"));
        assert_eq!(v(""), Ok(()));
        assert_eq!(v("12"), Ok(()));
        assert_eq!(v("1a"), Err("digits only".to_string()));
    }

    #[test]
    fn run_validators_returns_first_error() {
        let chain = vec![required("missing"), min_length(3, "too short")];
        assert_eq!(run_validators(&chain, ""), Err("missing".to_string()));
        assert_eq!(run_validators(&chain, "ab"), Err("too short".to_string()));
        assert_eq!(run_validators(&chain, "abc"), Ok(()));
    }
}
