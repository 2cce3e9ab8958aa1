use rfocuslog::core::progress::{checklist_counts, compute_progress, progress_update};
use rfocuslog::models::checklist::ChecklistItem;
use rfocuslog::models::task::{Subtask, checklist_of};

struct Item {
    id: i64,
    done: bool,
}

impl ChecklistItem for Item {
    fn id(&self) -> i64 {
        self.id
    }

    fn label(&self) -> &str {
        "item"
    }

    fn is_done(&self) -> bool {
        self.done
    }
}

fn items(flags: &[bool]) -> Vec<Item> {
    flags
        .iter()
        .enumerate()
        .map(|(i, &done)| Item {
            id: i as i64 + 1,
            done,
        })
        .collect()
}

#[test]
fn test_empty_checklist_is_zero() {
    assert_eq!(compute_progress::<Item>(&[]), 0);
}

#[test]
fn test_basic_ratios() {
    assert_eq!(compute_progress(&items(&[true])), 100);
    assert_eq!(compute_progress(&items(&[false])), 0);
    assert_eq!(compute_progress(&items(&[true, false, false])), 33);
    assert_eq!(compute_progress(&items(&[true, true, false])), 67);
    assert_eq!(compute_progress(&items(&[true, false])), 50);
}

#[test]
fn test_half_rounds_up() {
    // 1/8 = 12.5 %
    let mut flags = vec![false; 8];
    flags[0] = true;
    assert_eq!(compute_progress(&items(&flags)), 13);
}

#[test]
fn test_progress_is_idempotent() {
    let list = items(&[true, false, true, false, false, true, true]);
    let first = compute_progress(&list);
    assert_eq!(compute_progress(&list), first);
    assert_eq!(compute_progress(&list), 57);
}

#[test]
fn test_progress_update_only_on_change() {
    let list = items(&[true, false, false]);
    assert_eq!(progress_update(33, &list), None);
    assert_eq!(progress_update(0, &list), Some(33));
    assert_eq!(progress_update(40, &items(&[])), Some(0));
    assert_eq!(progress_update(0, &items(&[])), None);
}

#[test]
fn test_counts_and_subtasks() {
    let mut subtasks = vec![Subtask::new("a"), Subtask::new("b"), Subtask::new("c")];
    subtasks[1].is_completed = true;

    let checklist = checklist_of(&subtasks);
    assert_eq!(checklist_counts(&checklist), (1, 3));
    assert_eq!(compute_progress(&checklist), 33);
    assert_eq!(checklist[2].id(), 3);
    assert_eq!(checklist[1].label(), "b");
}
