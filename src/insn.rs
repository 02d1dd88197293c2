use crate::descriptor::OpcodeCategory;
use serde::{Deserialize, Serialize};

/// Ordinal position of an instruction within a method's linear instruction
/// sequence. Only used for scope-interval containment tests.
pub type ProgramPoint = usize;

/// Which of the four JVM field-access opcodes a field instruction uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldAccessKind {
    GetStatic,
    GetField,
    PutStatic,
    PutField,
}

/// A decoded instruction as presented by the external method-body view.
///
/// Only the kinds the operator can act on are modelled precisely; everything
/// else collapses into `Other` so the dispatcher can reject it with a clear
/// contract error instead of silently mishandling it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Insn {
    LocalLoad {
        slot: u16,
    },
    LocalStore {
        slot: u16,
    },
    /// `iinc`: read-modify-write of an int local by a fixed delta.
    Iinc {
        slot: u16,
        delta: i16,
    },
    FieldAccess {
        kind: FieldAccessKind,
        /// JVM internal name of the owning class, e.g. `com/example/Foo`.
        owner: String,
        name: String,
        descriptor: String,
    },
    Other {
        mnemonic: String,
    },
}

impl Insn {
    pub fn describe(&self) -> &'static str {
        match self {
            Insn::LocalLoad { .. } => "local load",
            Insn::LocalStore { .. } => "local store",
            Insn::Iinc { .. } => "local increment",
            Insn::FieldAccess {
                kind: FieldAccessKind::GetStatic,
                ..
            } => "static field read",
            Insn::FieldAccess {
                kind: FieldAccessKind::GetField,
                ..
            } => "instance field read",
            Insn::FieldAccess {
                kind: FieldAccessKind::PutStatic,
                ..
            } => "static field write",
            Insn::FieldAccess {
                kind: FieldAccessKind::PutField,
                ..
            } => "instance field write",
            Insn::Other { .. } => "unsupported instruction",
        }
    }
}

/// An instruction together with its position in the method body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BytecodeInstruction {
    pub point: ProgramPoint,
    pub insn: Insn,
}

/// One synthetic instruction inside a replacement sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ReplacementInsn {
    /// Discard the topmost stack value (the owner reference pushed for the
    /// replaced instance-field read, no longer needed).
    Pop,
    /// Push the value of a local variable.
    LoadLocal { category: OpcodeCategory, slot: u16 },
    /// Push the current instance (`this`, always slot 0).
    LoadSelf,
    GetStatic {
        owner: String,
        name: String,
        descriptor: String,
    },
    GetField {
        owner: String,
        name: String,
        descriptor: String,
    },
    /// Add `delta` to a local in place.
    Increment { slot: u16, delta: i16 },
}

/// An ordered list of synthetic instructions representing one mutant.
///
/// Stack-neutral relative to the instruction it replaces: it consumes and
/// produces exactly the same operand-stack shape at that point. The original
/// method body is never modified; the sequence is a standalone artifact
/// owned by whoever registers it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReplacementSequence {
    pub insns: Vec<ReplacementInsn>,
}

impl ReplacementSequence {
    pub fn new(insns: Vec<ReplacementInsn>) -> Self {
        Self { insns }
    }

    pub fn len(&self) -> usize {
        self.insns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.insns.is_empty()
    }
}
