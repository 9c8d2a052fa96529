use serde_json::Value as Json;

/// Walks `path` through nested objects starting at `root`.
///
/// Returns `None` as soon as a segment is missing, is JSON `null`, or the
/// current node is not an object.
pub fn lookup<'a>(root: &'a Json, path: &[&str]) -> Option<&'a Json> {
    path.iter()
        .try_fold(root, |node, segment| node.as_object()?.get(*segment))
        .filter(|node| !node.is_null())
}
