//! Background verification
//!
//! Runs one [`Verifier::check`] on a worker thread and hands the outcome
//! back over a channel so the event loop keeps drawing meanwhile.

use std::io;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, TryRecvError};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use super::{Credentials, VerificationOutcome, Verifier};

const WORKER_STOPPED: &str = "verification worker stopped unexpectedly";

pub struct VerificationTask {
    receiver: Receiver<VerificationOutcome>,
    started: Instant,
}

impl VerificationTask {
    pub fn spawn(
        verifier: Arc<dyn Verifier>,
        credentials: Credentials,
        timeout: Duration,
    ) -> io::Result<Self> {
        let (sender, receiver) = mpsc::channel();

        thread::Builder::new()
            .name("verifier".into())
            .spawn(move || {
                let outcome = verifier.check(&credentials, timeout);
                // Receiver is gone when the window closed mid-check
                let _ = sender.send(outcome);
            })?;

        Ok(Self { receiver, started: Instant::now() })
    }

    /// Outcome if the worker has finished, without blocking.
    pub fn try_outcome(&self) -> Option<VerificationOutcome> {
        match self.receiver.try_recv() {
            Ok(outcome) => Some(outcome),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                Some(VerificationOutcome::UnexpectedError(WORKER_STOPPED.into()))
            }
        }
    }

    /// Block for at most `timeout` waiting for the outcome.
    pub fn wait(&self, timeout: Duration) -> Option<VerificationOutcome> {
        match self.receiver.recv_timeout(timeout) {
            Ok(outcome) => Some(outcome),
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => {
                Some(VerificationOutcome::UnexpectedError(WORKER_STOPPED.into()))
            }
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct Fixed(VerificationOutcome);

    impl Verifier for Fixed {
        fn check(&self, _: &Credentials, _: Duration) -> VerificationOutcome {
            self.0.clone()
        }
    }

    struct Panics;

    impl Verifier for Panics {
        fn check(&self, _: &Credentials, _: Duration) -> VerificationOutcome {
            panic!("driver blew up");
        }
    }

    struct Gated(Mutex<Receiver<()>>);

    impl Verifier for Gated {
        fn check(&self, _: &Credentials, _: Duration) -> VerificationOutcome {
            self.0.lock().unwrap().recv().unwrap();
            VerificationOutcome::NotMatched
        }
    }

    fn creds() -> Credentials {
        Credentials::parse("ABC123", "hunter2").unwrap()
    }

    #[test]
    fn test_outcome_delivered() {
        let verifier = Arc::new(Fixed(VerificationOutcome::Matched(7)));
        let task = VerificationTask::spawn(verifier, creds(), Duration::from_secs(5)).unwrap();
        assert_eq!(task.wait(Duration::from_secs(5)), Some(VerificationOutcome::Matched(7)));
    }

    #[test]
    fn test_pending_until_worker_finishes() {
        let (release, gate) = mpsc::channel();
        let verifier = Arc::new(Gated(Mutex::new(gate)));
        let task = VerificationTask::spawn(verifier, creds(), Duration::from_secs(5)).unwrap();

        assert_eq!(task.try_outcome(), None);
        release.send(()).unwrap();
        assert_eq!(task.wait(Duration::from_secs(5)), Some(VerificationOutcome::NotMatched));
    }

    #[test]
    fn test_panicking_worker_reports_unexpected_error() {
        let task =
            VerificationTask::spawn(Arc::new(Panics), creds(), Duration::from_secs(5)).unwrap();
        let outcome = task.wait(Duration::from_secs(5)).unwrap();
        assert_eq!(outcome, VerificationOutcome::UnexpectedError(WORKER_STOPPED.into()));
    }
}
