use common::JobId;
use common::JobRecord;

use crate::store::JobStore;

/// What happens to unsaved field changes when edit mode is left without
/// saving, either by cancelling or by starting to edit another job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CancelPolicy {
    /// Changes stay in the local list and look saved.
    #[default]
    Keep,
    /// The record is put back as it was when edit mode was entered.
    Revert,
}

/// The single job currently in edit mode, if any.
#[derive(Debug, Default)]
pub struct EditState {
    editing: Option<JobId>,
    snapshot: Option<JobRecord>,
    policy: CancelPolicy,
}

impl EditState {
    pub fn new(policy: CancelPolicy) -> Self {
        Self {
            editing: None,
            snapshot: None,
            policy,
        }
    }

    pub fn editing(&self) -> Option<&JobId> {
        self.editing.as_ref()
    }

    pub fn is_editing(&self, id: &JobId) -> bool {
        self.editing.as_ref() == Some(id)
    }

    /// Puts `id` in edit mode, leaving whichever job was in it before.
    pub fn enable(&mut self, id: &JobId, store: &mut JobStore) {
        if self.is_editing(id) {
            return;
        }
        self.disable(store);
        self.editing = Some(id.clone());
        if self.policy == CancelPolicy::Revert {
            self.snapshot = store.get(id).cloned();
        }
    }

    /// Leaves edit mode without saving. No-op when nothing is edited.
    pub fn disable(&mut self, store: &mut JobStore) {
        let Some(id) = self.editing.take() else {
            return;
        };
        if let Some(snapshot) = self.snapshot.take() {
            tracing::debug!(%id, "reverting unsaved changes");
            store.restore(snapshot);
        }
    }

    /// Leaves edit mode keeping the current fields. Used when the edited
    /// job has a save in flight, so its sent values must stay local.
    pub fn release(&mut self) {
        if let Some(id) = self.editing.take() {
            tracing::debug!(%id, "leaving edit mode with a save in flight");
        }
        self.snapshot = None;
    }

    /// Leaves edit mode for `id` keeping its current fields, after a save
    /// or once the job is gone. Does nothing if another job is edited.
    pub fn settle(&mut self, id: &JobId) {
        if self.is_editing(id) {
            self.editing = None;
            self.snapshot = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::JobField;

    fn store() -> JobStore {
        let mut a = JobRecord::new("a");
        a.title = Some("A".to_string());
        let mut b = JobRecord::new("b");
        b.title = Some("B".to_string());
        let mut store = JobStore::new();
        store.replace_all(vec![a, b]);
        store
    }

    fn title(store: &JobStore, id: &str) -> String {
        store.get(&JobId::from(id)).and_then(|j| j.title.clone()).unwrap_or_default()
    }

    #[test]
    fn test_only_one_job_edited() {
        let mut store = store();
        let mut edit = EditState::new(CancelPolicy::Keep);
        edit.enable(&JobId::from("a"), &mut store);
        edit.enable(&JobId::from("b"), &mut store);
        assert_eq!(edit.editing(), Some(&JobId::from("b")));
        assert!(!edit.is_editing(&JobId::from("a")));
    }

    #[test]
    fn test_disable_when_idle_is_noop() {
        let mut store = store();
        let mut edit = EditState::new(CancelPolicy::Revert);
        edit.disable(&mut store);
        assert_eq!(edit.editing(), None);
        assert_eq!(title(&store, "a"), "A");
    }

    #[test]
    fn test_keep_policy_leaves_changes() {
        let mut store = store();
        let mut edit = EditState::new(CancelPolicy::Keep);
        let a = JobId::from("a");
        edit.enable(&a, &mut store);
        store.set_field(&a, JobField::Title, "changed");
        edit.disable(&mut store);
        assert_eq!(title(&store, "a"), "changed");
    }

    #[test]
    fn test_revert_policy_restores_on_cancel_and_switch() {
        let mut store = store();
        let mut edit = EditState::new(CancelPolicy::Revert);
        let a = JobId::from("a");
        let b = JobId::from("b");

        edit.enable(&a, &mut store);
        store.set_field(&a, JobField::Title, "changed");
        edit.disable(&mut store);
        assert_eq!(title(&store, "a"), "A");

        edit.enable(&a, &mut store);
        store.set_field(&a, JobField::Title, "changed again");
        edit.enable(&b, &mut store);
        assert_eq!(title(&store, "a"), "A");
    }

    #[test]
    fn test_release_skips_revert() {
        let mut store = store();
        let mut edit = EditState::new(CancelPolicy::Revert);
        let a = JobId::from("a");
        edit.enable(&a, &mut store);
        store.set_field(&a, JobField::Title, "sent");
        edit.release();
        edit.disable(&mut store);
        assert_eq!(edit.editing(), None);
        assert_eq!(title(&store, "a"), "sent");
    }

    #[test]
    fn test_settle_keeps_saved_fields() {
        let mut store = store();
        let mut edit = EditState::new(CancelPolicy::Revert);
        let a = JobId::from("a");
        edit.enable(&a, &mut store);
        store.set_field(&a, JobField::Title, "saved");
        edit.settle(&a);
        edit.disable(&mut store);
        assert_eq!(edit.editing(), None);
        assert_eq!(title(&store, "a"), "saved");
    }
}
