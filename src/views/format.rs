//! Null-safe formatting used by the page templates.

/// Placeholder for values that were never logged
pub const EMPTY: &str = "–";

pub fn fmt_f1(value: Option<f64>) -> String {
    value.map_or_else(|| EMPTY.to_string(), |v| format!("{:.1}", v))
}

pub fn fmt_int(value: Option<i32>) -> String {
    value.map_or_else(|| EMPTY.to_string(), |v| v.to_string())
}

/// Always carries a sign for non-negative values: `+5`, `+0`, `-3`
pub fn fmt_signed(value: Option<i32>) -> String {
    value.map_or_else(|| EMPTY.to_string(), |v| format!("{:+}", v))
}

pub fn or_default(value: Option<i32>, default: i32) -> i32 {
    value.unwrap_or(default)
}

/// Notes imported from the old spreadsheet look like `{Oats true}`; strip the
/// braces and the trailing flag so only the text is shown.
pub fn format_note(note: Option<&str>) -> String {
    let note = match note {
        Some(n) if !n.is_empty() => n,
        _ => return EMPTY.to_string(),
    };

    let inner = match note.strip_prefix('{').and_then(|n| n.strip_suffix('}')) {
        Some(inner) => inner,
        None => return note.to_string(),
    };

    let inner = inner
        .strip_suffix(" true")
        .or_else(|| inner.strip_suffix(" false"))
        .unwrap_or(inner)
        .trim();

    if inner.is_empty() {
        EMPTY.to_string()
    } else {
        inner.to_string()
    }
}
