//! Czech localization helpers: plural forms, date formatting, text shaping.
//!
//! Czech nouns have three count forms: singular for 1, a paucal form for 2-4
//! and a genitive plural for 0 and 5+. Counts shown anywhere in the UI go
//! through [`book_count_label`] / [`author_count_label`] rather than
//! hardcoding a form.

use chrono::Datelike;

/// Czech month names in genitive case, as used in long dates ("4. května").
const MONTHS_GENITIVE: [&str; 12] = [
    "ledna",
    "února",
    "března",
    "dubna",
    "května",
    "června",
    "července",
    "srpna",
    "září",
    "října",
    "listopadu",
    "prosince",
];

/// Selects the correct Czech noun form for a count.
///
/// Returns `singular` for 1, `paucal` for 2-4 and `plural` for 0 and 5+.
///
/// # Examples
///
/// ```
/// use knihovka::domain::locale::pluralize;
///
/// assert_eq!(pluralize(1, "kniha", "knihy", "knih"), "kniha");
/// assert_eq!(pluralize(3, "kniha", "knihy", "knih"), "knihy");
/// assert_eq!(pluralize(250, "kniha", "knihy", "knih"), "knih");
/// ```
#[must_use]
pub fn pluralize<'a>(count: u64, singular: &'a str, paucal: &'a str, plural: &'a str) -> &'a str {
    match count {
        1 => singular,
        2..=4 => paucal,
        _ => plural,
    }
}

/// Returns "kniha" / "knihy" / "knih" for a book count.
#[must_use]
pub fn book_count_label(count: u64) -> &'static str {
    pluralize(count, "kniha", "knihy", "knih")
}

/// Returns "autor" / "autoři" / "autorů" for an author count.
#[must_use]
pub fn author_count_label(count: u64) -> &'static str {
    pluralize(count, "autor", "autoři", "autorů")
}

/// Formats a count with its noun, e.g. `250` → `"250 knih"`.
#[must_use]
pub fn book_count_phrase(count: u64) -> String {
    format!("{count} {}", book_count_label(count))
}

/// Formats a count with its noun, e.g. `40` → `"40 autorů"`.
#[must_use]
pub fn author_count_phrase(count: u64) -> String {
    format!("{count} {}", author_count_label(count))
}

/// Builds the detail-view description line, e.g.
/// `"všechny knihy ze série (5 knih)"`.
#[must_use]
pub fn detail_description(prefix: &str, count: u64) -> String {
    format!("{prefix} ({})", book_count_phrase(count))
}

/// Formats a server-supplied date to the Czech long form ("4. května 2023").
///
/// Accepts ISO dates with or without a time component. Unparseable input is
/// returned unchanged rather than dropped, so an odd server value still shows
/// something.
#[must_use]
pub fn format_date(raw: &str) -> String {
    let date = chrono::DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.date_naive())
        .or_else(|_| chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S").map(|dt| dt.date()))
        .or_else(|_| chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d"));

    match date {
        Ok(date) => {
            let month = MONTHS_GENITIVE[date.month0() as usize];
            format!("{}. {} {}", date.day(), month, date.year())
        }
        Err(_) => raw.to_string(),
    }
}

/// Truncates text to a character budget, appending "..." when shortened.
///
/// Operates on characters, not bytes, so multi-byte Czech text never splits
/// mid-codepoint.
#[must_use]
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let prefix: String = text.chars().take(max_chars).collect();
        format!("{prefix}...")
    }
}

/// Strips HTML markup from server-supplied description text.
///
/// The terminal cannot render markup, and trusting it blindly was flagged as
/// an open question in the data model; stripping is the explicit decision.
/// Removes `<...>` tags, decodes the handful of entities the catalog server
/// actually emits and collapses runs of whitespace.
#[must_use]
pub fn strip_markup(text: &str) -> String {
    let mut plain = String::with_capacity(text.len());
    let mut in_tag = false;

    for c in text.chars() {
        match c {
            '<' => in_tag = true,
            '>' => {
                if in_tag {
                    in_tag = false;
                    // Tag boundaries separate words ("<p>a</p><p>b</p>").
                    plain.push(' ');
                } else {
                    plain.push(c);
                }
            }
            _ if !in_tag => plain.push(c),
            _ => {}
        }
    }

    let decoded = plain
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"");

    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plural_boundaries_are_exact() {
        assert_eq!(book_count_label(0), "knih");
        assert_eq!(book_count_label(1), "kniha");
        assert_eq!(book_count_label(2), "knihy");
        assert_eq!(book_count_label(4), "knihy");
        assert_eq!(book_count_label(5), "knih");
        assert_eq!(book_count_label(250), "knih");

        assert_eq!(author_count_label(1), "autor");
        assert_eq!(author_count_label(3), "autoři");
        assert_eq!(author_count_label(40), "autorů");
        assert_eq!(author_count_label(0), "autorů");
    }

    #[test]
    fn count_phrases_interpolate() {
        assert_eq!(book_count_phrase(250), "250 knih");
        assert_eq!(author_count_phrase(40), "40 autorů");
        assert_eq!(
            detail_description("všechny knihy ze série", 5),
            "všechny knihy ze série (5 knih)"
        );
        assert_eq!(
            detail_description("všechny knihy ze série", 1),
            "všechny knihy ze série (1 kniha)"
        );
    }

    #[test]
    fn formats_dates_in_czech_long_form() {
        assert_eq!(format_date("2023-05-04"), "4. května 2023");
        assert_eq!(format_date("2024-09-15T08:30:00"), "15. září 2024");
        assert_eq!(format_date("1924-01-01"), "1. ledna 1924");
    }

    #[test]
    fn unparseable_date_passes_through() {
        assert_eq!(format_date("sometime"), "sometime");
    }

    #[test]
    fn truncation_respects_character_budget() {
        assert_eq!(truncate_text("krátký", 10), "krátký");
        assert_eq!(truncate_text("příliš dlouhý text", 6), "příliš...");
    }

    #[test]
    fn strips_tags_and_decodes_entities() {
        assert_eq!(
            strip_markup("<p>Válka&nbsp;s <b>mloky</b></p>"),
            "Válka s mloky"
        );
        assert_eq!(strip_markup("a &amp; b"), "a & b");
        assert_eq!(strip_markup("no markup"), "no markup");
    }
}
