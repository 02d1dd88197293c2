//! # Bytecode Mutation
//!
//! A variable-replacement mutation operator for JVM bytecode.
//!
//! Given a single variable-access instruction inside a method body, this
//! library enumerates every other in-scope variable (local or member field)
//! with the exact same type descriptor and synthesizes, per candidate, a
//! stack-neutral replacement instruction sequence. Each sequence is handed to
//! an external mutation registrar together with the original instruction.
//!
//! Building the method-body representation, executing mutants and scoring
//! them belong to the surrounding pipeline, not to this crate.
//!
//! ## Example
//!
//! ```rust
//! use bytecode_mutation::prelude::*;
//!
//! let method = MethodView {
//!     name: "compute".to_string(),
//!     locals: vec![
//!         VariableDeclaration {
//!             name: "a".to_string(),
//!             descriptor: "I".to_string(),
//!             slot: 1,
//!             valid_from: 0,
//!             valid_to: 9,
//!         },
//!         VariableDeclaration {
//!             name: "b".to_string(),
//!             descriptor: "I".to_string(),
//!             slot: 2,
//!             valid_from: 0,
//!             valid_to: 9,
//!         },
//!     ],
//! };
//!
//! let mut schema = SchemaTable::new();
//! schema.insert(ClassSchema {
//!     name: "com/example/Account".to_string(),
//!     fields: vec![FieldInfo {
//!         name: "total".to_string(),
//!         descriptor: "I".to_string(),
//!         is_static: true,
//!     }],
//! });
//!
//! let sink = NullSink;
//! let operator = ReplaceVariable::new(&schema, &sink);
//! let read = BytecodeInstruction {
//!     point: 4,
//!     insn: Insn::LocalLoad { slot: 1 },
//! };
//!
//! let mut pool = MutationPool::new();
//! let handles = operator
//!     .apply(&method, "com/example/Account", &mut pool, &read)
//!     .unwrap();
//!
//! // Two mutants: load local `b`, read static `total`
//! assert_eq!(handles.len(), 2);
//! ```

pub mod descriptor;
pub mod diagnostics;
pub mod error;
pub mod fields;
pub mod insn;
pub mod locals;
pub mod method;
pub mod operator;
pub mod schema;

pub use error::{MutationError, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::descriptor::{is_field_descriptor, load_category, OpcodeCategory};
    pub use crate::diagnostics::{
        CandidateCheck, DiagnosticSink, NullSink, RecordingSink, RejectReason, TraceSink, Verdict,
    };
    pub use crate::error::{MutationError, Result};
    pub use crate::fields::find_field_replacements;
    pub use crate::insn::{
        BytecodeInstruction, FieldAccessKind, Insn, ProgramPoint, ReplacementInsn,
        ReplacementSequence,
    };
    pub use crate::locals::{find_increment_replacements, find_local_replacements};
    pub use crate::method::{resolve_local, MethodView, VariableDeclaration};
    pub use crate::operator::{
        Mutation, MutationPool, MutationRegistrar, ReplaceVariable, DEFAULT_INFECTION_DISTANCE,
        OPERATOR_NAME,
    };
    pub use crate::schema::{ClassSchema, FieldInfo, SchemaTable, TypeMetadata};
}
