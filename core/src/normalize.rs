//! Field cleaning for raw catalog cells.
//!
//! The dataset stores list-valued columns such as genres as a bracketed
//! literal, e.g. `['Action', 'Drama']`. Those are flattened to
//! `Action Drama`; anything else is lower-cased and trimmed.

/// Normalize a raw cell. `None` stands for a missing or non-text value.
pub fn clean_text(value: Option<&str>) -> String {
    let Some(text) = value else {
        return String::new();
    };
    if text.starts_with('[') {
        if let Some(items) = parse_list_literal(text) {
            return items.join(" ");
        }
    }
    text.to_lowercase().trim().to_string()
}

/// Parse a bracketed, comma-separated list of quoted strings.
/// Returns `None` for anything that does not fit that narrow shape.
pub fn parse_list_literal(text: &str) -> Option<Vec<String>> {
    let inner = text.trim().strip_prefix('[')?.strip_suffix(']')?;
    let mut chars = inner.chars().peekable();
    let mut items = Vec::new();

    loop {
        while chars.next_if(|c| c.is_whitespace()).is_some() {}
        let quote = match chars.next() {
            None => break,
            Some(q @ ('\'' | '"')) => q,
            Some(_) => return None,
        };

        let mut item = String::new();
        loop {
            match chars.next()? {
                '\\' => item.push(unescape(chars.next()?)),
                c if c == quote => break,
                c => item.push(c),
            }
        }
        items.push(item);

        while chars.next_if(|c| c.is_whitespace()).is_some() {}
        match chars.next() {
            None => break,
            Some(',') => continue,
            Some(_) => return None,
        }
    }
    Some(items)
}

fn unescape(c: char) -> char {
    match c {
        'n' => '\n',
        't' => '\t',
        'r' => '\r',
        '0' => '\0',
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_value_is_empty() {
        assert_eq!(clean_text(None), "");
    }

    #[test]
    fn plain_text_is_lowered_and_trimmed() {
        assert_eq!(clean_text(Some("  Science Fiction \n")), "science fiction");
    }

    #[test]
    fn list_literal_is_flattened_as_written() {
        assert_eq!(clean_text(Some("['Action', 'Drama']")), "Action Drama");
        assert_eq!(clean_text(Some(r#"["Sci-Fi", 'it\'s']"#)), "Sci-Fi it's");
        assert_eq!(clean_text(Some("['a', 'b',]")), "a b");
        assert_eq!(clean_text(Some("[]")), "");
    }

    #[test]
    fn malformed_list_falls_back_to_plain_text() {
        assert_eq!(clean_text(Some("[Action, Drama]")), "[action, drama]");
        assert_eq!(clean_text(Some("['Action'")), "['action'");
        assert_eq!(clean_text(Some("['Action' 'Drama']")), "['action' 'drama']");
        assert_eq!(clean_text(Some("['Action'] Extra")), "['action'] extra");
    }
}
