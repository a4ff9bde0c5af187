use common::{AuthState, JobField, JobId, JobRecord};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::api::JobsApi;
use crate::collab::{Navigator, Notifier};
use crate::edit::{CancelPolicy, EditState};
use crate::error::{ApiError, Operation, ViewError};
use crate::ops::{OpKind, OpState, OpTracker};
use crate::render::{CardView, PageView};
use crate::store::JobStore;

/// Where non-employers are sent.
pub const HOME: &str = "/";

const UPDATED: &str = "Job updated";
const DELETED: &str = "Job deleted";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    Loading,
    Ready,
    Redirected,
}

struct ViewState {
    phase: LoadPhase,
    mounted: bool,
    /// Bumped on every mount; results from an older mount are dropped.
    epoch: u64,
    jobs: JobStore,
    edit: EditState,
    ops: OpTracker,
}

impl ViewState {
    fn is_current(&self, epoch: u64) -> bool {
        self.mounted && self.epoch == epoch
    }
}

/// The employer's "My Jobs" page.
///
/// All methods take `&self`; the view can be shared between tasks and
/// operations on different jobs run concurrently. State is only touched
/// between awaits, never across one.
pub struct MyJobsView {
    api: Arc<dyn JobsApi>,
    auth: AuthState,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
    policy: CancelPolicy,
    state: Mutex<ViewState>,
}

impl MyJobsView {
    pub fn new(
        api: Arc<dyn JobsApi>,
        auth: AuthState,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            api,
            auth,
            notifier,
            navigator,
            policy: CancelPolicy::default(),
            state: Mutex::new(ViewState {
                phase: LoadPhase::Loading,
                mounted: false,
                epoch: 0,
                jobs: JobStore::new(),
                edit: EditState::default(),
                ops: OpTracker::default(),
            }),
        }
    }

    pub fn with_cancel_policy(mut self, policy: CancelPolicy) -> Self {
        self.policy = policy;
        self
    }

    fn state(&self) -> MutexGuard<'_, ViewState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Attaches the view and loads the jobs if the viewer is an employer.
    ///
    /// Anonymous viewers get an empty page without a request; signed-in
    /// viewers without the Employer role are navigated to `/`. A failed
    /// fetch notifies the user and leaves the list empty.
    pub async fn mount(&self) -> Result<(), ViewError> {
        let epoch = {
            let mut st = self.state();
            st.mounted = true;
            st.epoch += 1;
            st.phase = LoadPhase::Loading;
            st.jobs.clear();
            st.edit = EditState::new(self.policy);
            st.ops.clear();

            if !self.auth.is_authorized {
                tracing::debug!("viewer not signed in, skipping fetch");
                st.phase = LoadPhase::Ready;
                return Ok(());
            }
            if !self.auth.is_employer() {
                st.phase = LoadPhase::Redirected;
                drop(st);
                tracing::info!("viewer is not an employer, redirecting");
                self.navigator.navigate(HOME);
                return Ok(());
            }
            st.epoch
        };

        let result = self.api.fetch_my_jobs().await;

        let mut st = self.state();
        if !st.is_current(epoch) {
            tracing::debug!(epoch, "view detached before jobs arrived, dropping result");
            return Err(ViewError::Discarded(Operation::Fetch));
        }
        st.phase = LoadPhase::Ready;
        match result {
            Ok(jobs) => {
                let dropped = st.jobs.replace_all(jobs);
                if dropped > 0 {
                    tracing::warn!(dropped, "server returned duplicate job ids");
                }
                tracing::info!(count = st.jobs.len(), "jobs loaded");
                Ok(())
            }
            Err(err) => {
                st.jobs.clear();
                drop(st);
                Err(self.report(Operation::Fetch, &err))
            }
        }
    }

    /// Detaches the view. Requests still running finish, but a pending
    /// fetch is ignored and no local state changes afterwards.
    pub fn unmount(&self) {
        self.state().mounted = false;
    }

    pub fn enable_edit(&self, id: &JobId) -> Result<(), ViewError> {
        let mut guard = self.state();
        let st = &mut *guard;
        if !st.jobs.contains(id) {
            return Err(ViewError::UnknownJob(id.clone()));
        }
        if !st.edit.is_editing(id) {
            Self::leave_edit(st);
        }
        st.edit.enable(id, &mut st.jobs);
        Ok(())
    }

    /// Leaves edit mode without saving. Does nothing if no job is edited.
    pub fn disable_edit(&self) {
        let mut guard = self.state();
        Self::leave_edit(&mut guard);
    }

    /// A job whose save is in flight keeps the values that were sent, even
    /// under [`CancelPolicy::Revert`].
    fn leave_edit(st: &mut ViewState) {
        let saving = st
            .edit
            .editing()
            .is_some_and(|id| st.ops.state(id) == OpState::Pending(OpKind::Update));
        if saving {
            st.edit.release();
        } else {
            st.edit.disable(&mut st.jobs);
        }
    }

    /// Changes a field of the job in edit mode. Local only; the value is
    /// stored as typed.
    pub fn set_field(
        &self,
        id: &JobId,
        field: JobField,
        value: impl Into<String>,
    ) -> Result<(), ViewError> {
        let mut st = self.state();
        if !st.jobs.contains(id) {
            return Err(ViewError::UnknownJob(id.clone()));
        }
        if !st.edit.is_editing(id) {
            return Err(ViewError::NotEditing(id.clone()));
        }
        st.jobs.set_field(id, field, value);
        Ok(())
    }

    /// Sends the local copy of the edited job to the server.
    ///
    /// On success edit mode is left (if it is still on this job). On
    /// failure the job stays in edit mode with its local changes.
    pub async fn update(&self, id: &JobId) -> Result<(), ViewError> {
        let (job, epoch) = {
            let mut st = self.state();
            if !st.mounted {
                return Err(ViewError::Detached);
            }
            let job = st
                .jobs
                .get(id)
                .cloned()
                .ok_or_else(|| ViewError::UnknownJob(id.clone()))?;
            if !st.edit.is_editing(id) {
                return Err(ViewError::NotEditing(id.clone()));
            }
            self.begin(&mut st, id, OpKind::Update)?;
            (job, st.epoch)
        };

        let result = self.api.update_job(&job).await;

        let mut guard = self.state();
        let st = &mut *guard;
        let current = st.is_current(epoch);
        if current {
            st.ops.finish(id, OpKind::Update, result.is_ok());
        }
        match result {
            Ok(message) => {
                if current {
                    st.edit.settle(id);
                }
                drop(guard);
                tracing::info!(%id, "job updated");
                self.notifier.success(&message.unwrap_or_else(|| UPDATED.to_string()));
                Ok(())
            }
            Err(err) => {
                drop(guard);
                Err(self.report(Operation::Update, &err))
            }
        }
    }

    /// Asks the server to delete a job and drops it locally once it has.
    pub async fn delete(&self, id: &JobId) -> Result<(), ViewError> {
        let epoch = {
            let mut st = self.state();
            if !st.mounted {
                return Err(ViewError::Detached);
            }
            if !st.jobs.contains(id) {
                return Err(ViewError::UnknownJob(id.clone()));
            }
            self.begin(&mut st, id, OpKind::Delete)?;
            st.epoch
        };

        let result = self.api.delete_job(id).await;

        let mut guard = self.state();
        let st = &mut *guard;
        let current = st.is_current(epoch);
        match result {
            Ok(message) => {
                if current {
                    st.jobs.remove(id);
                    st.edit.settle(id);
                    st.ops.forget(id);
                }
                drop(guard);
                tracing::info!(%id, "job deleted");
                self.notifier.success(&message.unwrap_or_else(|| DELETED.to_string()));
                Ok(())
            }
            Err(err) => {
                if current {
                    st.ops.finish(id, OpKind::Delete, false);
                }
                drop(guard);
                Err(self.report(Operation::Delete, &err))
            }
        }
    }

    fn begin(&self, st: &mut ViewState, id: &JobId, kind: OpKind) -> Result<(), ViewError> {
        st.ops.begin(id, kind).map_err(|running| {
            tracing::debug!(%id, %running, "request already in flight");
            ViewError::InFlight {
                id: id.clone(),
                kind: running,
            }
        })
    }

    /// Notifies the user of a failed request.
    fn report(&self, op: Operation, err: &ApiError) -> ViewError {
        let message = err.message().unwrap_or(op.default_error()).to_string();
        tracing::warn!(%op, error = %err, "request failed");
        self.notifier.error(&message);
        ViewError::Request { op, message }
    }

    pub fn phase(&self) -> LoadPhase {
        self.state().phase
    }

    pub fn editing(&self) -> Option<JobId> {
        self.state().edit.editing().cloned()
    }

    pub fn job(&self, id: &JobId) -> Option<JobRecord> {
        self.state().jobs.get(id).cloned()
    }

    /// Local jobs in render order.
    pub fn jobs(&self) -> Vec<JobRecord> {
        self.state().jobs.iter().cloned().collect()
    }

    pub fn op_state(&self, id: &JobId) -> OpState {
        self.state().ops.state(id)
    }

    pub fn page(&self) -> PageView {
        let st = self.state();
        match st.phase {
            LoadPhase::Loading => PageView::Loading,
            LoadPhase::Redirected => PageView::Redirected,
            LoadPhase::Ready => PageView::Ready(
                st.jobs
                    .iter()
                    .map(|job| {
                        CardView::build(job, st.edit.is_editing(&job.id), st.ops.state(&job.id))
                    })
                    .collect(),
            ),
        }
    }
}
