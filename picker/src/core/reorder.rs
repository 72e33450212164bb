//! Drag-and-drop reordering as a pure list operation

/// Move the item at `from` to position `to`, shifting the items between.
///
/// A drop with no destination (`None`) or an out-of-range source leaves the
/// list unchanged. A destination past the end moves the item last.
pub fn move_item<T>(mut items: Vec<T>, from: usize, to: Option<usize>) -> Vec<T> {
    let Some(to) = to else {
        return items;
    };
    if from >= items.len() {
        return items;
    }
    let item = items.remove(from);
    let to = to.min(items.len());
    items.insert(to, item);
    items
}
