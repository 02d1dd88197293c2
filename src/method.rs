use crate::error::{MutationError, Result};
use crate::insn::ProgramPoint;
use serde::{Deserialize, Serialize};

/// A local variable's live range, taken from the method's variable table.
///
/// A slot may be reused by several declarations over disjoint ranges; at any
/// program point at most one of them is active for that slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableDeclaration {
    pub name: String,
    pub descriptor: String,
    pub slot: u16,
    pub valid_from: ProgramPoint,
    pub valid_to: ProgramPoint,
}

impl VariableDeclaration {
    /// True if `point` lies within the declaration's live range (inclusive on
    /// both ends).
    pub fn covers(&self, point: ProgramPoint) -> bool {
        self.valid_from <= point && point <= self.valid_to
    }
}

/// Read-only view of a method body: its name and local-variable table.
///
/// The instruction sequence itself stays with the external body
/// representation; the operator only needs positions and declarations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodView {
    pub name: String,
    /// Declarations in the order the variable table presents them. Candidate
    /// ordering follows this order, so it must be stable.
    pub locals: Vec<VariableDeclaration>,
}

/// Returns the declaration active at `point` for `slot`.
///
/// A miss means the variable table is missing or inconsistent with the
/// instruction stream, which is fatal for this access node.
pub fn resolve_local(
    method: &MethodView,
    point: ProgramPoint,
    slot: u16,
) -> Result<&VariableDeclaration> {
    method
        .locals
        .iter()
        .find(|local| local.slot == slot && local.covers(point))
        .ok_or_else(|| MutationError::ScopeLookup {
            method: method.name.clone(),
            point,
            slot,
        })
}
