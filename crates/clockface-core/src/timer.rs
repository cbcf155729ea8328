use std::time::Duration;

use log::{error, trace};
use tokio::{task::JoinHandle, time::sleep};

use crate::face_context::FaceContext;

/// Delay between two redraw passes of the clock face.
pub const REDRAW_DELAY: Duration = Duration::from_millis(1000);

/// One-shot redraw request owned by a clock face.
///
/// At most one request is outstanding: arming aborts the previous task before
/// spawning a new one. Dropping the timer aborts the pending task, so a torn
/// down face never receives a late tick.
#[derive(Debug)]
pub struct RedrawTimer {
    delay: Duration,
    task: Option<JoinHandle<()>>,
}

impl RedrawTimer {
    pub fn new(delay: Duration) -> Self {
        Self { delay, task: None }
    }

    /// Schedule a [`crate::event_bus::BusEvent::Tick`] `delay` from now,
    /// replacing any request still pending.
    pub fn arm(&mut self, context: &FaceContext) {
        self.cancel();

        let delay = self.delay;
        let publisher = context.clone();

        self.task = Some(context.runtime_handle().spawn(async move {
            sleep(delay).await;

            if let Err(err) = publisher.request_tick() {
                error!("Failed to publish clock tick: {err}");
            }
        }));

        trace!("Redraw scheduled in {delay:?}");
    }

    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    /// Whether a request has been armed and has not fired or been cancelled.
    pub fn is_pending(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }
}

impl Default for RedrawTimer {
    fn default() -> Self {
        Self::new(REDRAW_DELAY)
    }
}

impl Drop for RedrawTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
