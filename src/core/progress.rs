//! Completion percentage of a checklist (project todos, task subtasks).

use crate::models::checklist::ChecklistItem;

/// `round(100 * done / total)`, or 0 for an empty checklist.
pub fn compute_progress<T: ChecklistItem>(items: &[T]) -> u8 {
    let total = items.len();
    if total == 0 {
        return 0;
    }

    let done = items.iter().filter(|i| i.is_done()).count();

    // integer round-half-up of 100 * done / total
    ((200 * done + total) / (2 * total)) as u8
}

/// New progress value to store on the parent, or `None` if `stored` is current.
pub fn progress_update<T: ChecklistItem>(stored: u8, items: &[T]) -> Option<u8> {
    let fresh = compute_progress(items);
    (fresh != stored).then_some(fresh)
}

/// `(done, total)` for display next to the percentage.
pub fn checklist_counts<T: ChecklistItem>(items: &[T]) -> (usize, usize) {
    (items.iter().filter(|i| i.is_done()).count(), items.len())
}
