use crate::diagnostics::DiagnosticSink;
use crate::error::{MutationError, Result};
use crate::fields::find_field_replacements;
use crate::insn::{BytecodeInstruction, FieldAccessKind, Insn, ProgramPoint, ReplacementSequence};
use crate::locals::{find_increment_replacements, find_local_replacements};
use crate::method::{resolve_local, MethodView};
use crate::schema::TypeMetadata;
use rayon::prelude::*;
use serde::Serialize;

pub const OPERATOR_NAME: &str = "ReplaceVariable";

/// Infection distance assigned to every freshly registered mutant; the
/// external pipeline recomputes it during scoring.
pub const DEFAULT_INFECTION_DISTANCE: f64 = 0.0;

/// Sink for synthesized mutants. The registrar assigns mutant identity; this
/// crate only collects the returned handles as opaque tokens.
pub trait MutationRegistrar {
    type Handle;

    fn register(
        &mut self,
        class_name: &str,
        method_name: &str,
        operator: &str,
        node: &BytecodeInstruction,
        sequence: ReplacementSequence,
        infection_distance: f64,
    ) -> Self::Handle;
}

/// The variable-replacement mutation operator.
///
/// For an eligible access instruction it enumerates every other in-scope
/// variable (local or member field) with the exact same type descriptor and
/// synthesizes a stack-neutral replacement sequence per candidate. Purely
/// functional over its inputs: safe to invoke concurrently for different
/// access nodes of the same method.
pub struct ReplaceVariable<'a> {
    metadata: &'a dyn TypeMetadata,
    sink: &'a dyn DiagnosticSink,
}

impl<'a> ReplaceVariable<'a> {
    pub fn new(metadata: &'a dyn TypeMetadata, sink: &'a dyn DiagnosticSink) -> Self {
        Self { metadata, sink }
    }

    /// True iff the operator can act on `insn`: a local load, a local
    /// increment, or a static/instance field read. Writes are out of scope.
    pub fn is_applicable(&self, insn: &Insn) -> bool {
        matches!(
            insn,
            Insn::LocalLoad { .. }
                | Insn::Iinc { .. }
                | Insn::FieldAccess {
                    kind: FieldAccessKind::GetStatic | FieldAccessKind::GetField,
                    ..
                }
        )
    }

    /// Synthesizes every valid replacement sequence for one access
    /// instruction. Passing an instruction outside `is_applicable` is a
    /// caller-contract violation and fails with `UnsupportedAccessKind`.
    pub fn replacements(
        &self,
        method: &MethodView,
        class_name: &str,
        instruction: &BytecodeInstruction,
    ) -> Result<Vec<ReplacementSequence>> {
        let point = instruction.point;

        match &instruction.insn {
            Insn::LocalLoad { slot } => {
                let local = resolve_local(method, point, *slot)?;
                tracing::debug!(
                    name = %local.name,
                    descriptor = %local.descriptor,
                    slot = local.slot,
                    "looking for replacements for local variable"
                );
                let descriptor = local.descriptor.clone();

                let mut replacements = find_local_replacements(
                    method,
                    point,
                    Some(*slot),
                    &descriptor,
                    false,
                    self.sink,
                )?;
                replacements.extend(find_field_replacements(
                    self.metadata,
                    class_name,
                    None,
                    &descriptor,
                    false,
                    self.sink,
                )?);
                Ok(replacements)
            }

            Insn::FieldAccess {
                kind,
                owner,
                name,
                descriptor,
            } => {
                let pop_owner = match kind {
                    FieldAccessKind::GetField => true,
                    FieldAccessKind::GetStatic => false,
                    FieldAccessKind::PutStatic | FieldAccessKind::PutField => {
                        return Err(self.unsupported(method, instruction));
                    }
                };

                // A foreign owner cannot be swapped for a self-reference.
                if owner != class_name {
                    return Ok(Vec::new());
                }

                tracing::debug!(
                    field = %name,
                    %descriptor,
                    "looking for replacements for field"
                );

                let mut replacements = find_local_replacements(
                    method, point, None, descriptor, pop_owner, self.sink,
                )?;
                replacements.extend(find_field_replacements(
                    self.metadata,
                    class_name,
                    Some(name),
                    descriptor,
                    pop_owner,
                    self.sink,
                )?);
                Ok(replacements)
            }

            Insn::Iinc { slot, delta } => {
                let local = resolve_local(method, point, *slot)?;
                tracing::debug!(
                    name = %local.name,
                    slot = local.slot,
                    delta = *delta,
                    "looking for replacements for increment"
                );
                Ok(find_increment_replacements(
                    method,
                    point,
                    *slot,
                    &local.descriptor,
                    *delta,
                    self.sink,
                ))
            }

            Insn::LocalStore { .. } | Insn::Other { .. } => {
                Err(self.unsupported(method, instruction))
            }
        }
    }

    /// Synthesizes replacements for one instruction and registers each as a
    /// mutant, returning the registrar's handles in candidate order.
    pub fn apply<R: MutationRegistrar>(
        &self,
        method: &MethodView,
        class_name: &str,
        registrar: &mut R,
        instruction: &BytecodeInstruction,
    ) -> Result<Vec<R::Handle>> {
        let sequences = self.replacements(method, class_name, instruction)?;

        Ok(sequences
            .into_iter()
            .map(|sequence| {
                registrar.register(
                    class_name,
                    &method.name,
                    OPERATOR_NAME,
                    instruction,
                    sequence,
                    DEFAULT_INFECTION_DISTANCE,
                )
            })
            .collect())
    }

    /// Applies the operator to a slice of instructions, synthesizing in
    /// parallel and registering sequentially so handle order stays
    /// deterministic. A fatal error for one instruction lands in that
    /// instruction's slot without affecting the others.
    pub fn apply_batch<R: MutationRegistrar>(
        &self,
        method: &MethodView,
        class_name: &str,
        registrar: &mut R,
        instructions: &[BytecodeInstruction],
    ) -> Vec<Result<Vec<R::Handle>>> {
        let synthesized: Vec<Result<Vec<ReplacementSequence>>> = instructions
            .par_iter()
            .map(|instruction| self.replacements(method, class_name, instruction))
            .collect();

        synthesized
            .into_iter()
            .zip(instructions)
            .map(|(result, instruction)| {
                result.map(|sequences| {
                    sequences
                        .into_iter()
                        .map(|sequence| {
                            registrar.register(
                                class_name,
                                &method.name,
                                OPERATOR_NAME,
                                instruction,
                                sequence,
                                DEFAULT_INFECTION_DISTANCE,
                            )
                        })
                        .collect()
                })
            })
            .collect()
    }

    fn unsupported(&self, method: &MethodView, instruction: &BytecodeInstruction) -> MutationError {
        MutationError::UnsupportedAccessKind {
            method: method.name.clone(),
            point: instruction.point,
            kind: instruction.insn.describe().to_string(),
        }
    }
}

/// One registered mutant as stored by `MutationPool`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mutation {
    pub id: usize,
    pub class_name: String,
    pub method_name: String,
    pub operator: String,
    pub point: ProgramPoint,
    pub original: Insn,
    pub sequence: ReplacementSequence,
    pub infection_distance: f64,
}

/// Minimal in-memory registrar: sequential ids, records kept in registration
/// order. The production registry lives outside this crate; this one makes
/// the operator usable and testable standalone.
#[derive(Debug, Default)]
pub struct MutationPool {
    mutations: Vec<Mutation>,
}

impl MutationPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mutations(&self) -> &[Mutation] {
        &self.mutations
    }

    pub fn len(&self) -> usize {
        self.mutations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mutations.is_empty()
    }
}

impl MutationRegistrar for MutationPool {
    type Handle = usize;

    fn register(
        &mut self,
        class_name: &str,
        method_name: &str,
        operator: &str,
        node: &BytecodeInstruction,
        sequence: ReplacementSequence,
        infection_distance: f64,
    ) -> usize {
        let id = self.mutations.len();
        self.mutations.push(Mutation {
            id,
            class_name: class_name.to_string(),
            method_name: method_name.to_string(),
            operator: operator.to_string(),
            point: node.point,
            original: node.insn.clone(),
            sequence,
            infection_distance,
        });
        id
    }
}
