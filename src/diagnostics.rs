use serde::Serialize;
use std::sync::Mutex;

/// Why a candidate was turned down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RejectReason {
    /// Descriptor differs from the original access (byte-for-byte check).
    TypeMismatch,
    /// Same slot (locals) or same name (fields) as the original.
    SameAsOriginal,
    /// Access point lies before the declaration's live range.
    NotYetInScope,
    /// Access point lies after the declaration's live range.
    NoLongerInScope,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Verdict {
    Accepted,
    Rejected(RejectReason),
}

/// One record per candidate the finders looked at, accepted or not.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateCheck {
    /// Variable or field name.
    pub candidate: String,
    pub descriptor: String,
    /// Slot index for local candidates, `None` for field candidates.
    pub slot: Option<u16>,
    pub verdict: Verdict,
}

/// Observational sink for candidate-matching diagnostics.
///
/// Purely informational: nothing the sink does may affect candidate
/// selection. `&self` so one sink can serve parallel batch invocations.
pub trait DiagnosticSink: Sync {
    fn record(&self, check: CandidateCheck);
}

/// Discards every record.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn record(&self, _check: CandidateCheck) {}
}

/// Forwards every record to `tracing` at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TraceSink;

impl DiagnosticSink for TraceSink {
    fn record(&self, check: CandidateCheck) {
        match check.verdict {
            Verdict::Accepted => tracing::debug!(
                candidate = %check.candidate,
                descriptor = %check.descriptor,
                slot = ?check.slot,
                "candidate accepted"
            ),
            Verdict::Rejected(reason) => tracing::debug!(
                candidate = %check.candidate,
                descriptor = %check.descriptor,
                slot = ?check.slot,
                ?reason,
                "candidate rejected"
            ),
        }
    }
}

/// Collects every record; mainly useful in tests.
#[derive(Debug, Default)]
pub struct RecordingSink {
    checks: Mutex<Vec<CandidateCheck>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn checks(&self) -> Vec<CandidateCheck> {
        self.checks.lock().unwrap().clone()
    }
}

impl DiagnosticSink for RecordingSink {
    fn record(&self, check: CandidateCheck) {
        self.checks.lock().unwrap().push(check);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_sink_keeps_order() {
        let sink = RecordingSink::new();
        sink.record(CandidateCheck {
            candidate: "a".to_string(),
            descriptor: "I".to_string(),
            slot: Some(1),
            verdict: Verdict::Rejected(RejectReason::TypeMismatch),
        });
        sink.record(CandidateCheck {
            candidate: "b".to_string(),
            descriptor: "I".to_string(),
            slot: Some(2),
            verdict: Verdict::Accepted,
        });

        let checks = sink.checks();
        assert_eq!(checks.len(), 2);
        assert_eq!(checks[0].candidate, "a");
        assert_eq!(
            checks[0].verdict,
            Verdict::Rejected(RejectReason::TypeMismatch)
        );
        assert_eq!(checks[1].verdict, Verdict::Accepted);
    }

    #[test]
    fn test_check_serializes_reason_as_data() {
        let check = CandidateCheck {
            candidate: "count".to_string(),
            descriptor: "I".to_string(),
            slot: None,
            verdict: Verdict::Rejected(RejectReason::SameAsOriginal),
        };

        let json = serde_json::to_string(&check).unwrap();
        assert!(json.contains("SameAsOriginal"));
    }
}
