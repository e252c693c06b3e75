use std::collections::HashSet;

/// Keep the first occurrence of each distinct string, preserving order.
pub fn dedup_preserving_order<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut seen = HashSet::new();
    let mut unique = Vec::new();
    for item in items {
        let item = item.into();
        if seen.insert(item.clone()) {
            unique.push(item);
        }
    }
    unique
}
