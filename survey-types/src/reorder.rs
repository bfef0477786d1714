//! Dense zero-based positions for ordered lists.
//!
//! Every list handled here keeps its elements sorted by position, and the
//! positions are exactly `0..len` with no gaps or duplicates. Questions in a
//! survey and answer options in a question both use these helpers.

/// An element that carries its own position inside an ordered list.
pub trait Positioned {
    fn position(&self) -> u32;

    fn set_position(&mut self, position: u32);
}

/// Position the next appended element receives: one past the largest position,
/// or 0 for an empty list.
pub fn next_position<T: Positioned>(items: &[T]) -> u32 {
    items
        .iter()
        .map(|item| item.position().saturating_add(1))
        .max()
        .unwrap_or(0)
}

/// Append an element at the end, returning the position it was given.
pub fn push<T: Positioned>(items: &mut Vec<T>, mut item: T) -> u32 {
    let position = next_position(items);
    item.set_position(position);
    items.push(item);
    position
}

/// Remove the element at `position`; every later element moves up by one.
pub fn remove<T: Positioned>(items: &mut Vec<T>, position: u32) -> Option<T> {
    let index = index_of(items, position)?;
    let removed = items.remove(index);
    for item in items.iter_mut() {
        if item.position() > position {
            item.set_position(item.position() - 1);
        }
    }
    Some(removed)
}

/// Swap the element at `position` with the one above it.
///
/// Returns `false` (and changes nothing) for position 0 or an unknown position.
pub fn move_up<T: Positioned>(items: &mut [T], position: u32) -> bool {
    match position.checked_sub(1) {
        Some(above) => swap_positions(items, above, position),
        None => false,
    }
}

/// Swap the element at `position` with the one below it.
///
/// Returns `false` (and changes nothing) for the last position or an unknown position.
pub fn move_down<T: Positioned>(items: &mut [T], position: u32) -> bool {
    match position.checked_add(1) {
        Some(below) => swap_positions(items, position, below),
        None => false,
    }
}

/// Check that positions are exactly `0..len`, each used once.
pub fn is_dense<T: Positioned>(items: &[T]) -> bool {
    let mut seen = vec![false; items.len()];
    for item in items {
        match usize::try_from(item.position())
            .ok()
            .and_then(|index| seen.get_mut(index))
        {
            Some(slot) if !*slot => *slot = true,
            _ => return false,
        }
    }
    true
}

/// Sort elements by their position.
pub fn sort<T: Positioned>(items: &mut [T]) {
    items.sort_by_key(|item| item.position());
}

fn swap_positions<T: Positioned>(items: &mut [T], upper: u32, lower: u32) -> bool {
    let (Some(a), Some(b)) = (index_of(items, upper), index_of(items, lower)) else {
        return false;
    };
    items[a].set_position(lower);
    items[b].set_position(upper);
    items.swap(a, b);
    true
}

fn index_of<T: Positioned>(items: &[T], position: u32) -> Option<usize> {
    items.iter().position(|item| item.position() == position)
}
