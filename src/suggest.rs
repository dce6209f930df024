use crate::{error::ParseError, vocabulary};

/// Calculates the Levenshtein edit distance between two strings.
///
/// This is the minimum number of single-character insertions, deletions or
/// substitutions needed to turn one string into the other. The comparison is
/// case-sensitive; callers lower-case both sides first.
///
/// # Example
/// ```
/// use visionscript::suggest::edit_distance;
///
/// assert_eq!(edit_distance("kitten", "sitting"), 3);
/// assert_eq!(edit_distance("sayy", "say"), 1);
/// assert_eq!(edit_distance("abc", ""), 3);
/// ```
#[must_use]
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a_len = a.chars().count();
    let b_len = b.chars().count();

    if a_len == 0 {
        return b_len;
    }
    if b_len == 0 {
        return a_len;
    }

    let mut prev_row = (0..=b_len).collect::<Vec<_>>();
    let mut curr_row = vec![0; b_len + 1];

    for (i, a_char) in a.chars().enumerate() {
        curr_row[0] = i + 1;

        for (j, b_char) in b.chars().enumerate() {
            let cost = usize::from(a_char != b_char);

            curr_row[j + 1] = (prev_row[j + 1] + 1).min(curr_row[j] + 1)
                                                   .min(prev_row[j] + cost);
        }

        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[b_len]
}

/// Finds vocabulary entries close to an unknown name.
///
/// Both sides are compared in lower case. Every builtin, keyword and alias
/// within `max_distance` edits is returned with its display spelling, in
/// vocabulary order rather than by distance.
///
/// # Parameters
/// - `name`: The unknown name as written.
/// - `max_distance`: The largest edit distance that still counts as a match.
///
/// # Returns
/// The matching display names, possibly empty.
///
/// # Example
/// ```
/// use visionscript::suggest::suggest;
///
/// assert!(suggest("Sayy", 2).contains(&"Say".to_string()));
/// assert!(suggest("Xylophone", 2).is_empty());
/// ```
#[must_use]
pub fn suggest(name: &str, max_distance: usize) -> Vec<String> {
    if name.is_empty() {
        return Vec::new();
    }

    let wanted = name.to_lowercase();
    let wanted_len = wanted.chars().count();

    let mut matches = Vec::new();
    for entry in vocabulary::entries() {
        let candidate = entry.to_lowercase();
        if wanted_len.abs_diff(candidate.chars().count()) > max_distance {
            continue;
        }
        if edit_distance(&wanted, &candidate) <= max_distance && !matches.iter().any(|m| m == entry)
        {
            matches.push(entry.to_string());
        }
    }

    matches
}

/// Renders the message for an unknown operation name.
///
/// # Example
/// ```
/// use visionscript::suggest::unknown_function_message;
///
/// assert_eq!(unknown_function_message("Zap", &[]), "Function Zap does not exist.");
/// assert_eq!(unknown_function_message("Sayy", &["Say".to_string()]),
///            "Function 'Sayy' does not exist. Did you mean one of these?\n----------\nSay");
/// ```
#[must_use]
pub fn unknown_function_message(name: &str, suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        return format!("Function {name} does not exist.");
    }

    format!("Function '{name}' does not exist. Did you mean one of these?\n{}\n{}",
            "-".repeat(10),
            suggestions.join("\n"))
}

/// Refines a raw parse error into the diagnostic the user should see.
///
/// - An unexpected character on a line that starts with `Name[`, where `Name`
///   is not in the vocabulary, is reported as a misspelled operation name
///   rather than a character-level error.
/// - An unknown operation name gets its suggestions filled in.
///
/// Every other error is returned unchanged.
#[must_use]
pub fn refine(error: ParseError, source: &str, max_distance: usize) -> ParseError {
    match error {
        ParseError::UnexpectedCharacter { character,
                                          line,
                                          column, } => {
            match leading_call_name(source, line) {
                Some((name, name_column)) if !vocabulary::is_reserved(name) => {
                    ParseError::UnknownFunction { name: name.to_string(),
                                                  line,
                                                  column: name_column,
                                                  suggestions: suggest(name, max_distance) }
                },
                _ => ParseError::UnexpectedCharacter { character,
                                                       line,
                                                       column },
            }
        },
        ParseError::UnknownFunction { name,
                                      line,
                                      column,
                                      suggestions, } if suggestions.is_empty() => {
            let suggestions = suggest(&name, max_distance);
            ParseError::UnknownFunction { name,
                                          line,
                                          column,
                                          suggestions }
        },
        other => other,
    }
}

/// Returns the identifier that opens a call at the start of `line`, with its
/// 1-based column.
fn leading_call_name(source: &str, line: usize) -> Option<(&str, usize)> {
    let text = source.lines().nth(line.checked_sub(1)?)?;
    let trimmed = text.trim_start();
    let column = text.chars().count() - trimmed.chars().count() + 1;

    let end = trimmed.find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                     .unwrap_or(trimmed.len());
    let name = &trimmed[..end];

    let opens_call = trimmed[end..].trim_start().starts_with('[');
    if name.is_empty() || !opens_call {
        return None;
    }

    Some((name, column))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggestions_follow_vocabulary_order() {
        // "Save" comes before "Say" in the builtin table.
        let found = suggest("sav", 2);
        let save = found.iter().position(|s| s == "Save");
        let say = found.iter().position(|s| s == "Say");

        assert!(save.is_some() && say.is_some());
        assert!(save < say);
    }

    #[test]
    fn suggestions_are_case_insensitive() {
        assert!(suggest("DETECTT", 2).contains(&"Detect".to_string()));
    }

    #[test]
    fn aliases_are_suggested_by_their_own_spelling() {
        assert!(suggest("Fnd", 2).contains(&"Find".to_string()));
    }

    #[test]
    fn bound_is_respected() {
        assert!(suggest("Dtct", 1).is_empty());
        assert!(suggest("Dtct", 2).contains(&"Detect".to_string()));
    }

    #[test]
    fn unexpected_character_after_unknown_name_becomes_unknown_function() {
        let source = "Lod[\"a.png\"$]";
        let raw = ParseError::UnexpectedCharacter { character: '$',
                                                    line:      1,
                                                    column:    12, };

        match refine(raw, source, 2) {
            ParseError::UnknownFunction { name, suggestions, .. } => {
                assert_eq!(name, "Lod");
                assert!(suggestions.contains(&"Load".to_string()));
            },
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn unexpected_character_after_known_name_stays_a_syntax_error() {
        let source = "Load[\"a.png\"$]";
        let raw = ParseError::UnexpectedCharacter { character: '$',
                                                    line:      1,
                                                    column:    13, };

        assert_eq!(refine(raw.clone(), source, 2), raw);
    }

    #[test]
    fn name_column_counts_characters() {
        let source = "\u{3000}Lod[$]";
        let raw = ParseError::UnexpectedCharacter { character: '$',
                                                    line:      1,
                                                    column:    6, };

        assert!(matches!(refine(raw, source, 2), ParseError::UnknownFunction { column: 2, .. }));
    }
}
