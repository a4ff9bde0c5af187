use common::{JobField, JobId, JobRecord};
use std::collections::HashMap;

/// Local copy of the employer's jobs: keyed by id, iterated in the order
/// the server returned them.
#[derive(Debug, Default, Clone)]
pub struct JobStore {
    records: HashMap<JobId, JobRecord>,
    order: Vec<JobId>,
}

impl JobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole list. A repeated id keeps its first occurrence;
    /// the number of dropped duplicates is returned.
    pub fn replace_all(&mut self, jobs: Vec<JobRecord>) -> usize {
        self.clear();
        let mut dropped = 0;
        for job in jobs {
            if self.records.contains_key(&job.id) {
                dropped += 1;
                continue;
            }
            self.order.push(job.id.clone());
            self.records.insert(job.id.clone(), job);
        }
        dropped
    }

    pub fn clear(&mut self) {
        self.records.clear();
        self.order.clear();
    }

    pub fn get(&self, id: &JobId) -> Option<&JobRecord> {
        self.records.get(id)
    }

    pub fn contains(&self, id: &JobId) -> bool {
        self.records.contains_key(id)
    }

    /// Returns false when `id` is not in the store.
    pub fn set_field(&mut self, id: &JobId, field: JobField, value: impl Into<String>) -> bool {
        match self.records.get_mut(id) {
            Some(job) => {
                job.set_field(field, value);
                true
            }
            None => false,
        }
    }

    /// Overwrites an existing record in place, keeping its position.
    pub fn restore(&mut self, job: JobRecord) -> bool {
        match self.records.get_mut(&job.id) {
            Some(slot) => {
                *slot = job;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: &JobId) -> Option<JobRecord> {
        let job = self.records.remove(id)?;
        self.order.retain(|o| o != id);
        Some(job)
    }

    /// Records in render order.
    pub fn iter(&self) -> impl Iterator<Item = &JobRecord> {
        self.order.iter().filter_map(|id| self.records.get(id))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(store: &JobStore) -> Vec<&str> {
        store.iter().map(|j| j.id.as_str()).collect()
    }

    #[test]
    fn test_replace_all_keeps_server_order() {
        let mut store = JobStore::new();
        store.replace_all(vec![JobRecord::new("b"), JobRecord::new("a"), JobRecord::new("c")]);
        assert_eq!(ids(&store), ["b", "a", "c"]);
    }

    #[test]
    fn test_replace_all_drops_duplicate_ids() {
        let mut store = JobStore::new();
        let mut first = JobRecord::new("1");
        first.title = Some("first".to_string());
        let mut second = JobRecord::new("1");
        second.title = Some("second".to_string());

        assert_eq!(store.replace_all(vec![first, second, JobRecord::new("2")]), 1);
        assert_eq!(ids(&store), ["1", "2"]);
        assert_eq!(store.get(&JobId::from("1")).unwrap().title.as_deref(), Some("first"));
    }

    #[test]
    fn test_remove_keeps_remaining_order() {
        let mut store = JobStore::new();
        store.replace_all(vec![JobRecord::new("1"), JobRecord::new("2"), JobRecord::new("3")]);
        assert!(store.remove(&JobId::from("2")).is_some());
        assert!(store.remove(&JobId::from("2")).is_none());
        assert_eq!(ids(&store), ["1", "3"]);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_set_field_unknown_id() {
        let mut store = JobStore::new();
        assert!(!store.set_field(&JobId::from("x"), JobField::Title, "B"));
    }
}
