//! Background worker for backend calls.
//!
//! Each call runs on its own thread and reports a single [`ApiEvent`], so the
//! TUI main loop keeps drawing while a request is in flight.

use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::domain::{CatalogSymptom, Diagnosis, DiagnosisRequest, VerdictRequest};
use crate::ports::{ApiError, DiagnosisApi};

/// Completion of a backend call.
#[derive(Debug, Clone)]
pub enum ApiEvent {
    SymptomsLoaded(Result<Vec<CatalogSymptom>, ApiError>),
    DiagnosisReady(Result<Diagnosis, ApiError>),
    VerdictSaved {
        is_valid: bool,
        outcome: Result<(), ApiError>,
    },
}

/// Which backend call a worker is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Symptoms,
    Diagnosis,
    Verdict { is_valid: bool },
}

/// Handle to a running backend call.
pub struct ApiWorkerHandle {
    kind: RequestKind,
    rx: Receiver<ApiEvent>,
    _handle: JoinHandle<()>,
}

impl ApiWorkerHandle {
    #[must_use]
    pub fn kind(&self) -> RequestKind {
        self.kind
    }

    /// Try to receive the completion (non-blocking).
    ///
    /// A worker that died without reporting yields a failure event for its
    /// request kind, so callers never wait on it forever.
    #[must_use]
    pub fn try_recv(&self) -> Option<ApiEvent> {
        match self.rx.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                tracing::error!(kind = ?self.kind, "API worker stopped without a result");
                Some(self.lost_event())
            }
        }
    }

    fn lost_event(&self) -> ApiEvent {
        let error = ApiError::Http("worker stopped".to_string());
        match self.kind {
            RequestKind::Symptoms => ApiEvent::SymptomsLoaded(Err(error)),
            RequestKind::Diagnosis => ApiEvent::DiagnosisReady(Err(error)),
            RequestKind::Verdict { is_valid } => ApiEvent::VerdictSaved {
                is_valid,
                outcome: Err(error),
            },
        }
    }

    /// Block until the completion arrives or `timeout` passes.
    #[must_use]
    pub fn recv_timeout(&self, timeout: std::time::Duration) -> Option<ApiEvent> {
        self.rx.recv_timeout(timeout).ok()
    }
}

/// Spawns backend calls off the UI thread.
pub struct ApiWorker;

impl ApiWorker {
    pub fn fetch_symptoms(api: Arc<dyn DiagnosisApi>) -> ApiWorkerHandle {
        Self::spawn(RequestKind::Symptoms, move || {
            ApiEvent::SymptomsLoaded(api.fetch_symptoms())
        })
    }

    pub fn request_diagnosis(
        api: Arc<dyn DiagnosisApi>,
        request: DiagnosisRequest,
    ) -> ApiWorkerHandle {
        Self::spawn(RequestKind::Diagnosis, move || {
            ApiEvent::DiagnosisReady(api.request_diagnosis(&request))
        })
    }

    pub fn save_verdict(api: Arc<dyn DiagnosisApi>, verdict: VerdictRequest) -> ApiWorkerHandle {
        let kind = RequestKind::Verdict {
            is_valid: verdict.is_valid,
        };
        Self::spawn(kind, move || ApiEvent::VerdictSaved {
            is_valid: verdict.is_valid,
            outcome: api.save_verdict(&verdict),
        })
    }

    fn spawn<F>(kind: RequestKind, call: F) -> ApiWorkerHandle
    where
        F: FnOnce() -> ApiEvent + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();

        let handle = thread::spawn(move || {
            // The receiver is gone only if the app already quit.
            let _ = tx.send(call());
        });

        ApiWorkerHandle {
            kind,
            rx,
            _handle: handle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::MockDiagnosisApi;
    use crate::domain::Gender;
    use std::time::Duration;

    const WAIT: Duration = Duration::from_secs(5);

    #[test]
    fn symptoms_event_carries_catalog() {
        let api: Arc<dyn DiagnosisApi> = Arc::new(MockDiagnosisApi::new());
        let handle = ApiWorker::fetch_symptoms(api);

        match handle.recv_timeout(WAIT) {
            Some(ApiEvent::SymptomsLoaded(Ok(symptoms))) => assert_eq!(symptoms.len(), 10),
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn diagnosis_event_carries_failure() {
        let api: Arc<dyn DiagnosisApi> =
            Arc::new(MockDiagnosisApi::new().failing_diagnosis(ApiError::Timeout(30)));
        let request = DiagnosisRequest {
            patient_name: "John Doe".into(),
            gender: Gender::Male,
            year_of_birth: "1990".into(),
            symptoms: Vec::new(),
        };

        let handle = ApiWorker::request_diagnosis(api, request);
        match handle.recv_timeout(WAIT) {
            Some(ApiEvent::DiagnosisReady(Err(ApiError::Timeout(30)))) => {}
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn dead_worker_reports_failure() {
        let (tx, rx) = mpsc::channel::<ApiEvent>();
        drop(tx);
        let handle = ApiWorkerHandle {
            kind: RequestKind::Diagnosis,
            rx,
            _handle: thread::spawn(|| {}),
        };

        assert!(matches!(
            handle.try_recv(),
            Some(ApiEvent::DiagnosisReady(Err(ApiError::Http(_))))
        ));
    }

    #[test]
    fn verdict_event_keeps_the_verdict() {
        let api: Arc<dyn DiagnosisApi> = Arc::new(MockDiagnosisApi::new());
        let verdict = VerdictRequest {
            patient_name: "John Doe".into(),
            gender: Gender::Male,
            year_of_birth: "1990".into(),
            symptoms: Vec::new(),
            diagnosis: "[]".into(),
            is_valid: false,
        };

        let handle = ApiWorker::save_verdict(api, verdict);
        match handle.recv_timeout(WAIT) {
            Some(ApiEvent::VerdictSaved {
                is_valid: false,
                outcome: Ok(()),
            }) => {}
            other => panic!("unexpected event: {other:?}"),
        }
    }
}
