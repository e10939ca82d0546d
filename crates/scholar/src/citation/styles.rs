//! Style-specific formatters.

use super::{WorkFacts, WorkType};

/// Terminate an author segment with `. ` unless it already ends in a period.
fn push_author_segment(out: &mut String, segment: &str) {
    if segment.is_empty() {
        return;
    }
    out.push_str(segment);
    if segment.ends_with('.') {
        out.push(' ');
    } else {
        out.push_str(". ");
    }
}

/// The present parts, joined with `, `.
fn join_present(parts: &[Option<String>]) -> String {
    parts
        .iter()
        .flatten()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

fn finish(mut out: String) -> String {
    out.truncate(out.trim_end().len());
    out
}

/// MLA: `Authors. "Title." Venue, Year,`
///
/// More than three authors collapse to `First et al.`.
pub fn mla(facts: &WorkFacts<'_>) -> String {
    let authors = if facts.authors.len() > 3 {
        format!("{} et al.", facts.authors[0])
    } else {
        facts.authors.join(", ")
    };

    let mut out = String::new();
    push_author_segment(&mut out, &authors);
    out.push_str(&format!("\"{}.\" ", facts.title));

    let tail = join_present(&[
        facts.venue.map(String::from),
        facts.year.map(|y| y.to_string()),
    ]);
    if !tail.is_empty() {
        out.push_str(&tail);
        out.push(',');
    }
    finish(out)
}

/// APA: `A, B, & C (Year). Title. Venue.`
///
/// More than six authors collapse to `First et al.`. Without authors the
/// title moves to the front.
pub fn apa(facts: &WorkFacts<'_>) -> String {
    let authors = match facts.authors.len() {
        0 => String::new(),
        n if n > 6 => format!("{} et al.", facts.authors[0]),
        1 => facts.authors[0].to_string(),
        n => format!(
            "{}, & {}",
            facts.authors[..n - 1].join(", "),
            facts.authors[n - 1]
        ),
    };
    let year = facts.year.map(|y| format!("({})", y));

    let mut out = String::new();
    if authors.is_empty() {
        out.push_str(&format!("{}. ", facts.title));
        if let Some(year) = &year {
            out.push_str(&format!("{}. ", year));
        }
    } else {
        match &year {
            Some(year) => out.push_str(&format!("{} {}. ", authors, year)),
            None => push_author_segment(&mut out, &authors),
        }
        out.push_str(&format!("{}. ", facts.title));
    }

    if let Some(venue) = facts.venue {
        out.push_str(&format!("{}.", venue));
    }
    finish(out)
}

/// GB/T 7714: `A, B, C, et al. Title. [J]. Venue, Year.`
///
/// More than three authors keep the first three followed by `et al.`.
/// Journals close with venue and year, books with publisher and year,
/// conference papers with the marker alone.
pub fn gb(facts: &WorkFacts<'_>) -> String {
    let authors = if facts.authors.len() > 3 {
        format!("{}, et al.", facts.authors[..3].join(", "))
    } else {
        facts.authors.join(", ")
    };

    let mut out = String::new();
    push_author_segment(&mut out, &authors);
    out.push_str(&format!("{}. ", facts.title));

    if let Some(marker) = facts.work_type.marker() {
        out.push_str(marker);
        let source = match facts.work_type {
            WorkType::Journal => facts.venue,
            WorkType::Book => facts.publisher,
            _ => None,
        };
        let tail = match facts.work_type {
            WorkType::Journal | WorkType::Book => join_present(&[
                source.map(String::from),
                facts.year.map(|y| y.to_string()),
            ]),
            _ => String::new(),
        };
        if tail.is_empty() {
            out.push('.');
        } else {
            out.push_str(&format!(". {}.", tail));
        }
    }
    finish(out)
}

/// Reference-list form: up to three `Author, ` then `"Title"`, `,Venue`, `,Year.`
pub fn short(facts: &WorkFacts<'_>) -> String {
    let mut out = String::new();
    for author in facts.authors.iter().take(3) {
        out.push_str(author);
        out.push_str(", ");
    }
    out.push_str(&format!("\"{}\"", facts.title));
    if let Some(venue) = facts.venue {
        out.push(',');
        out.push_str(venue);
    }
    if let Some(year) = facts.year {
        out.push_str(&format!(",{}.", year));
    }
    out
}
