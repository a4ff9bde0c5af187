use common::JobId;
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpKind {
    Update,
    Delete,
}

impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OpKind::Update => "update",
            OpKind::Delete => "delete",
        })
    }
}

/// Last known state of the mutation requests for one job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OpState {
    #[default]
    Idle,
    Pending(OpKind),
    Succeeded(OpKind),
    Failed(OpKind),
}

impl OpState {
    pub fn is_pending(self) -> bool {
        matches!(self, OpState::Pending(_))
    }
}

/// Per-job request guard: one update or delete in flight per job.
#[derive(Debug, Default)]
pub struct OpTracker {
    ops: HashMap<JobId, OpState>,
}

impl OpTracker {
    pub fn state(&self, id: &JobId) -> OpState {
        self.ops.get(id).copied().unwrap_or_default()
    }

    /// Marks `id` pending, or returns the kind already in flight.
    pub fn begin(&mut self, id: &JobId, kind: OpKind) -> Result<(), OpKind> {
        if let OpState::Pending(running) = self.state(id) {
            return Err(running);
        }
        self.ops.insert(id.clone(), OpState::Pending(kind));
        Ok(())
    }

    pub fn finish(&mut self, id: &JobId, kind: OpKind, ok: bool) {
        let state = if ok {
            OpState::Succeeded(kind)
        } else {
            OpState::Failed(kind)
        };
        self.ops.insert(id.clone(), state);
    }

    pub fn forget(&mut self, id: &JobId) {
        self.ops.remove(id);
    }

    pub fn clear(&mut self) {
        self.ops.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_request_rejected_while_pending() {
        let mut ops = OpTracker::default();
        let id = JobId::from("1");
        assert_eq!(ops.state(&id), OpState::Idle);
        assert_eq!(ops.begin(&id, OpKind::Update), Ok(()));
        assert_eq!(ops.begin(&id, OpKind::Update), Err(OpKind::Update));
        assert_eq!(ops.begin(&id, OpKind::Delete), Err(OpKind::Update));
        assert_eq!(ops.begin(&JobId::from("2"), OpKind::Delete), Ok(()));
    }

    #[test]
    fn test_finish_allows_next_request() {
        let mut ops = OpTracker::default();
        let id = JobId::from("1");
        ops.begin(&id, OpKind::Update).unwrap();
        ops.finish(&id, OpKind::Update, false);
        assert_eq!(ops.state(&id), OpState::Failed(OpKind::Update));
        assert_eq!(ops.begin(&id, OpKind::Update), Ok(()));
        ops.finish(&id, OpKind::Update, true);
        assert_eq!(ops.state(&id), OpState::Succeeded(OpKind::Update));
    }
}
