//! Path separator handling

use std::borrow::Cow;

/// Convert Windows `\` separators to `/`.
///
/// Borrows when the path already uses forward slashes only.
pub fn normalize_separators(path: &str) -> Cow<'_, str> {
    if path.contains('\\') {
        Cow::Owned(path.replace('\\', "/"))
    } else {
        Cow::Borrowed(path)
    }
}
