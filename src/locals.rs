use crate::descriptor::load_category;
use crate::diagnostics::{CandidateCheck, DiagnosticSink, RejectReason, Verdict};
use crate::error::Result;
use crate::insn::{ProgramPoint, ReplacementInsn, ReplacementSequence};
use crate::method::{MethodView, VariableDeclaration};

/// Finds every other in-scope local whose descriptor equals
/// `target_descriptor` and synthesizes a load of it.
///
/// `exclude_slot` is the slot of the original access when the original was a
/// local read (`None` when a field read is being replaced by locals).
/// `pop_owner` is true when the original access was an instance-field read,
/// whose owner reference is already on the stack and must be discarded.
///
/// Results follow declaration order; zero matches is an empty list, not an
/// error.
pub fn find_local_replacements(
    method: &MethodView,
    point: ProgramPoint,
    exclude_slot: Option<u16>,
    target_descriptor: &str,
    pop_owner: bool,
    sink: &dyn DiagnosticSink,
) -> Result<Vec<ReplacementSequence>> {
    let mut replacements = Vec::new();

    for local in &method.locals {
        let verdict = judge_local(local, point, exclude_slot, target_descriptor);
        sink.record(check_for(local, verdict));
        if verdict != Verdict::Accepted {
            continue;
        }

        let category = load_category(&local.descriptor)?;
        let mut insns = Vec::new();
        if pop_owner {
            insns.push(ReplacementInsn::Pop);
        }
        insns.push(ReplacementInsn::LoadLocal {
            category,
            slot: local.slot,
        });
        replacements.push(ReplacementSequence::new(insns));
    }

    Ok(replacements)
}

/// Increment variant: candidates are other in-scope locals with the exact
/// same descriptor, and each replacement is a single increment of the
/// candidate slot by the original delta. Only the target changes, never the
/// amount.
pub fn find_increment_replacements(
    method: &MethodView,
    point: ProgramPoint,
    exclude_slot: u16,
    target_descriptor: &str,
    delta: i16,
    sink: &dyn DiagnosticSink,
) -> Vec<ReplacementSequence> {
    let mut replacements = Vec::new();

    for local in &method.locals {
        let verdict = judge_local(local, point, Some(exclude_slot), target_descriptor);
        sink.record(check_for(local, verdict));
        if verdict != Verdict::Accepted {
            continue;
        }

        replacements.push(ReplacementSequence::new(vec![ReplacementInsn::Increment {
            slot: local.slot,
            delta,
        }]));
    }

    replacements
}

fn judge_local(
    local: &VariableDeclaration,
    point: ProgramPoint,
    exclude_slot: Option<u16>,
    target_descriptor: &str,
) -> Verdict {
    if local.descriptor != target_descriptor {
        return Verdict::Rejected(RejectReason::TypeMismatch);
    }
    if Some(local.slot) == exclude_slot {
        return Verdict::Rejected(RejectReason::SameAsOriginal);
    }
    if point < local.valid_from {
        return Verdict::Rejected(RejectReason::NotYetInScope);
    }
    if point > local.valid_to {
        return Verdict::Rejected(RejectReason::NoLongerInScope);
    }
    Verdict::Accepted
}

fn check_for(local: &VariableDeclaration, verdict: Verdict) -> CandidateCheck {
    CandidateCheck {
        candidate: local.name.clone(),
        descriptor: local.descriptor.clone(),
        slot: Some(local.slot),
        verdict,
    }
}
