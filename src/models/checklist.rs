/// Anything that can be ticked off inside a parent entity
/// (todos inside a project, subtasks inside a task).
pub trait ChecklistItem {
    fn id(&self) -> i64;
    fn label(&self) -> &str;
    fn is_done(&self) -> bool;
}

impl<T: ChecklistItem> ChecklistItem for &T {
    fn id(&self) -> i64 {
        (**self).id()
    }

    fn label(&self) -> &str {
        (**self).label()
    }

    fn is_done(&self) -> bool {
        (**self).is_done()
    }
}
