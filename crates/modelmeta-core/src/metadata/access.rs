//! Safe nested lookups into a metadata document.

use serde_json::Value;

/// Walk `keys` through nested objects.
///
/// Returns `None` as soon as a segment is missing or the current node is not
/// an object. A key that is present with a `null` value yields
/// `Some(&Value::Null)`, so absence and null stay distinguishable.
/// An empty key list returns the document itself.
pub fn get_value<'a>(document: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .try_fold(document, |node, key| node.as_object()?.get(*key))
}

/// Like [`get_value`], with the keys given as a dotted path
/// (`"settings.description"`). An empty path returns the document itself.
pub fn get_value_by_path<'a>(document: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return Some(document);
    }
    let keys: Vec<&str> = path.split('.').collect();
    get_value(document, &keys)
}
