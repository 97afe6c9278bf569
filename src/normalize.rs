/// Canonical key for address/phone equality checks: ASCII space, ideographic
/// space (U+3000) and hyphen removed, surrounding whitespace trimmed. Absent
/// input maps to the empty string; two empty keys are never treated as a
/// match by callers.
pub fn normalize_key(value: Option<&str>) -> String {
    let Some(raw) = value else {
        return String::new();
    };
    let stripped: String = raw
        .chars()
        .filter(|c| !matches!(c, ' ' | '\u{3000}' | '-'))
        .collect();
    stripped.trim().to_string()
}
