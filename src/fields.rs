use crate::diagnostics::{CandidateCheck, DiagnosticSink, RejectReason, Verdict};
use crate::error::{MutationError, Result};
use crate::insn::{ReplacementInsn, ReplacementSequence};
use crate::schema::{FieldInfo, TypeMetadata};

/// Finds every member field of `class_name` whose descriptor equals
/// `target_descriptor` and synthesizes a read of it.
///
/// `exclude_field` is the name of the field being replaced when the original
/// access was itself a field read. `pop_owner` is true when the original
/// access was an instance-field read, whose owner reference must be discarded
/// before the replacement pushes its own value.
///
/// A static candidate reads directly; an instance candidate pushes the
/// current instance first. Unresolvable type metadata yields an empty list
/// and a warning, never a failure: one missing schema must not take down the
/// whole pipeline.
pub fn find_field_replacements(
    metadata: &dyn TypeMetadata,
    class_name: &str,
    exclude_field: Option<&str>,
    target_descriptor: &str,
    pop_owner: bool,
    sink: &dyn DiagnosticSink,
) -> Result<Vec<ReplacementSequence>> {
    let schema = match metadata.class_schema(class_name) {
        Ok(schema) => schema,
        Err(MutationError::UnresolvedType { class }) => {
            tracing::warn!(%class, "type metadata unavailable, skipping field candidates");
            return Ok(Vec::new());
        }
        Err(err) => return Err(err),
    };

    let mut replacements = Vec::new();

    for field in &schema.fields {
        let verdict = judge_field(field, exclude_field, target_descriptor);
        sink.record(CandidateCheck {
            candidate: field.name.clone(),
            descriptor: field.descriptor.clone(),
            slot: None,
            verdict,
        });
        if verdict != Verdict::Accepted {
            continue;
        }

        let mut insns = Vec::new();
        if pop_owner {
            insns.push(ReplacementInsn::Pop);
        }
        if field.is_static {
            insns.push(ReplacementInsn::GetStatic {
                owner: class_name.to_string(),
                name: field.name.clone(),
                descriptor: field.descriptor.clone(),
            });
        } else {
            insns.push(ReplacementInsn::LoadSelf);
            insns.push(ReplacementInsn::GetField {
                owner: class_name.to_string(),
                name: field.name.clone(),
                descriptor: field.descriptor.clone(),
            });
        }
        replacements.push(ReplacementSequence::new(insns));
    }

    Ok(replacements)
}

fn judge_field(
    field: &FieldInfo,
    exclude_field: Option<&str>,
    target_descriptor: &str,
) -> Verdict {
    if Some(field.name.as_str()) == exclude_field {
        return Verdict::Rejected(RejectReason::SameAsOriginal);
    }
    if field.descriptor != target_descriptor {
        return Verdict::Rejected(RejectReason::TypeMismatch);
    }
    Verdict::Accepted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{NullSink, RecordingSink};
    use crate::schema::{ClassSchema, SchemaTable};

    const CLASS: &str = "com/example/Account";

    fn field(name: &str, descriptor: &str, is_static: bool) -> FieldInfo {
        FieldInfo {
            name: name.to_string(),
            descriptor: descriptor.to_string(),
            is_static,
        }
    }

    fn table(fields: Vec<FieldInfo>) -> SchemaTable {
        let mut table = SchemaTable::new();
        table.insert(ClassSchema {
            name: CLASS.to_string(),
            fields,
        });
        table
    }

    #[test]
    fn test_instance_field_replaces_instance_read() {
        // Instance read of x:int, class also exposes instance y:int
        let table = table(vec![field("x", "I", false), field("y", "I", false)]);

        let found =
            find_field_replacements(&table, CLASS, Some("x"), "I", true, &NullSink).unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(
            found[0].insns,
            vec![
                ReplacementInsn::Pop,
                ReplacementInsn::LoadSelf,
                ReplacementInsn::GetField {
                    owner: CLASS.to_string(),
                    name: "y".to_string(),
                    descriptor: "I".to_string(),
                }
            ]
        );
    }

    #[test]
    fn test_static_field_replaces_static_read() {
        // Static read of count:int, class exposes static total:int. No owner
        // reference exists, so no pop and no self push.
        let table = table(vec![field("count", "I", true), field("total", "I", true)]);

        let found =
            find_field_replacements(&table, CLASS, Some("count"), "I", false, &NullSink)
                .unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(
            found[0].insns,
            vec![ReplacementInsn::GetStatic {
                owner: CLASS.to_string(),
                name: "total".to_string(),
                descriptor: "I".to_string(),
            }]
        );
    }

    #[test]
    fn test_static_candidate_for_instance_read_pops_owner() {
        let table = table(vec![field("x", "I", false), field("total", "I", true)]);

        let found =
            find_field_replacements(&table, CLASS, Some("x"), "I", true, &NullSink).unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(
            found[0].insns,
            vec![
                ReplacementInsn::Pop,
                ReplacementInsn::GetStatic {
                    owner: CLASS.to_string(),
                    name: "total".to_string(),
                    descriptor: "I".to_string(),
                }
            ]
        );
    }

    #[test]
    fn test_descriptor_must_match_exactly() {
        let table = table(vec![field("x", "I", false), field("wide", "J", false)]);

        let found =
            find_field_replacements(&table, CLASS, Some("x"), "I", true, &NullSink).unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_unresolved_type_degrades_to_empty() {
        let table = SchemaTable::new();
        let sink = RecordingSink::new();

        let found =
            find_field_replacements(&table, "com/example/Gone", None, "I", false, &sink)
                .unwrap();

        assert!(found.is_empty());
        assert!(sink.checks().is_empty());
    }

    #[test]
    fn test_rejections_recorded_with_reasons() {
        let table = table(vec![field("x", "I", false), field("name", "Ljava/lang/String;", false)]);
        let sink = RecordingSink::new();

        find_field_replacements(&table, CLASS, Some("x"), "I", true, &sink).unwrap();

        let checks = sink.checks();
        assert_eq!(checks.len(), 2);
        assert_eq!(
            checks[0].verdict,
            Verdict::Rejected(RejectReason::SameAsOriginal)
        );
        assert_eq!(checks[0].slot, None);
        assert_eq!(
            checks[1].verdict,
            Verdict::Rejected(RejectReason::TypeMismatch)
        );
    }
}
