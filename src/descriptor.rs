use crate::error::{MutationError, Result};
use serde::{Deserialize, Serialize};

/// The load/store opcode family a value belongs to on the JVM operand stack.
///
/// The category only selects the correct load instruction for a candidate.
/// Candidate matching itself is byte-for-byte descriptor equality, never
/// category equality (an `I` local can replace an `I` field, but a `S` local
/// cannot, even though both load with the integer family).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OpcodeCategory {
    /// `iload`/`istore`: boolean, byte, char, short and int.
    Int,
    Long,
    Float,
    Double,
    /// `aload`/`astore`: object and array references.
    Reference,
}

/// Checks `descriptor` against the JVM field-descriptor grammar.
pub fn is_field_descriptor(descriptor: &str) -> bool {
    match descriptor.as_bytes().first() {
        Some(b'B' | b'C' | b'D' | b'F' | b'I' | b'J' | b'S' | b'Z') => descriptor.len() == 1,
        Some(b'L') => {
            descriptor.len() > 2
                && descriptor.ends_with(';')
                && !descriptor[1..descriptor.len() - 1].contains(';')
        }
        Some(b'[') => is_field_descriptor(&descriptor[1..]),
        _ => false,
    }
}

/// Maps a field descriptor to the opcode family used to load a value of that
/// type. `V` is not a field descriptor and is rejected along with anything
/// else outside the grammar.
pub fn load_category(descriptor: &str) -> Result<OpcodeCategory> {
    if !is_field_descriptor(descriptor) {
        return Err(MutationError::InvalidDescriptor(descriptor.to_string()));
    }

    Ok(match descriptor.as_bytes()[0] {
        b'J' => OpcodeCategory::Long,
        b'F' => OpcodeCategory::Float,
        b'D' => OpcodeCategory::Double,
        b'L' | b'[' => OpcodeCategory::Reference,
        // B, C, I, S, Z all load with the integer family.
        _ => OpcodeCategory::Int,
    })
}
