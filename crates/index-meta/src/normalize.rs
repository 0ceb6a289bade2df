/// Separator between a component's type name and its instance identity,
/// as in `EnglishAnalyzer@1b6d3586`.
pub const IDENTITY_SEPARATOR: char = '@';

/// Strips the instance-identity suffix from a label.
///
/// Returns everything before the first `@`, or the whole label when there is none.
#[must_use]
pub fn normalize_label(label: &str) -> &str {
    match label.find(IDENTITY_SEPARATOR) {
        Some(idx) => &label[..idx],
        None => label,
    }
}
