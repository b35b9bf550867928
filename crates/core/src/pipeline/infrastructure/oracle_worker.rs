use std::thread::JoinHandle;

use crossbeam_channel::{Receiver, Sender};

use crate::shared::error::SessionError;

/// Runs a blocking oracle on its own thread.
///
/// Jobs go in through a bounded queue; results come back through an
/// unbounded one so the worker never blocks on a busy coordinator. Every
/// job produces exactly one result, in submission order.
///
/// Dropping the worker closes the job queue and joins the thread after
/// it finishes the jobs already queued.
pub struct OracleWorker<J, R> {
    name: &'static str,
    jobs: Option<Sender<J>>,
    results: Receiver<R>,
    handle: Option<JoinHandle<()>>,
}

impl<J, R> OracleWorker<J, R>
where
    J: Send + 'static,
    R: Send + 'static,
{
    pub fn spawn<F>(name: &'static str, capacity: usize, mut work: F) -> Result<Self, SessionError>
    where
        F: FnMut(J) -> R + Send + 'static,
    {
        let (job_tx, job_rx) = crossbeam_channel::bounded::<J>(capacity.max(1));
        let (result_tx, result_rx) = crossbeam_channel::unbounded::<R>();

        let handle = std::thread::Builder::new()
            .name(format!("{name}-oracle"))
            .spawn(move || {
                for job in job_rx {
                    if result_tx.send(work(job)).is_err() {
                        break;
                    }
                }
            })
            .map_err(|source| SessionError::WorkerSpawn { name, source })?;

        Ok(Self {
            name,
            jobs: Some(job_tx),
            results: result_rx,
            handle: Some(handle),
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Queues a job, blocking while the queue is full.
    pub fn submit(&self, job: J) -> Result<(), SessionError> {
        let jobs = self
            .jobs
            .as_ref()
            .ok_or(SessionError::WorkerDisconnected(self.name))?;
        jobs.send(job)
            .map_err(|_| SessionError::WorkerDisconnected(self.name))
    }

    pub fn results(&self) -> &Receiver<R> {
        &self.results
    }
}

impl<J, R> Drop for OracleWorker<J, R> {
    fn drop(&mut self) {
        drop(self.jobs.take());
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("{} worker panicked", self.name);
            }
        }
    }
}
