#![allow(non_snake_case)]

use super::*;
use qapigen_core::{AlternateType, EnumType, Member, SchemaEntity, Variant};

fn schema() -> Schema {
    Schema::new(vec![
        SchemaEntity::Enum(EnumType::new("SocketAddressType", ["inet", "unix"])),
        SchemaEntity::Alternate(AlternateType::new(
            "StrOrNull",
            vec![Variant::new("s", "str"), Variant::new("n", "null")],
        )),
        SchemaEntity::Alternate(AlternateType::new(
            "StrOrNum",
            vec![Variant::new("s", "str"), Variant::new("n", "int")],
        )),
        SchemaEntity::Struct(StructType::new(
            "Root",
            vec![Member::new("a", "str")],
        )),
        SchemaEntity::Struct(
            StructType::new("Middle", vec![Member::new("b", "int")]).with_base("Root"),
        ),
        SchemaEntity::Struct(
            StructType::new("Leaf", vec![Member::optional("c", "bool")]).with_base("Middle"),
        ),
        SchemaEntity::Struct(StructType::new(
            "Inet",
            vec![Member::new("host", "str")],
        )),
        SchemaEntity::Struct(StructType::new(
            "q_obj_Unix-wrapper",
            vec![Member::new("path", "str")],
        )),
        SchemaEntity::Struct(StructType::new(
            "q_obj_SocketAddress-base",
            vec![Member::new("type", "SocketAddressType")],
        )),
        SchemaEntity::Struct(
            StructType::new("SocketAddress", vec![])
                .with_base("q_obj_SocketAddress-base")
                .with_variants(
                    "type",
                    vec![
                        Variant::new("inet", "Inet"),
                        Variant::new("unix", "q_obj_Unix-wrapper"),
                    ],
                ),
        ),
        SchemaEntity::Struct(StructType::new(
            "Holder",
            vec![
                Member::optional("maybe-null", "StrOrNull"),
                Member::optional("num", "StrOrNum"),
                Member::optional("next", "Holder"),
                Member::new("tags", "strList"),
                Member::new("type", "str"),
            ],
        )),
        SchemaEntity::Struct(StructType::new("LoopA", vec![]).with_base("LoopB")),
        SchemaEntity::Struct(StructType::new("LoopB", vec![]).with_base("LoopA")),
        SchemaEntity::Struct(StructType::new("Orphan", vec![]).with_base("Missing")),
        SchemaEntity::Struct(StructType::new("EnumBased", vec![]).with_base("SocketAddressType")),
        SchemaEntity::Struct(
            StructType::new("Shadow", vec![Member::new("a", "int")]).with_base("Root"),
        ),
    ])
    .unwrap()
}

fn with_emitter<R>(f: impl FnOnce(&StructEmitter<'_>, &Schema) -> R) -> R {
    let schema = schema();
    let names = NameMapper::default();
    let nullable = schema.nullable_alternates();
    let emitter = StructEmitter::new(&schema, &names, &nullable);
    f(&emitter, &schema)
}

// flatten tests

#[test]
fn flatten___base_chain___root_fields_first() {
    with_emitter(|emitter, schema| {
        let leaf = schema.lookup_struct("Leaf").unwrap();

        let fields = emitter.flatten(leaf).unwrap();

        let order: Vec<(&str, &str)> = fields
            .iter()
            .map(|f| (f.wire_name.as_str(), f.declared_in.as_str()))
            .collect();
        assert_eq!(order, vec![("a", "Root"), ("b", "Middle"), ("c", "Leaf")]);
    });
}

#[test]
fn flatten___no_base___own_fields_only() {
    with_emitter(|emitter, schema| {
        let root = schema.lookup_struct("Root").unwrap();

        let fields = emitter.flatten(root).unwrap();

        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].ident, "a");
        assert!(!fields[0].optional);
    });
}

#[test]
fn flatten___base_cycle___is_error() {
    with_emitter(|emitter, schema| {
        let a = schema.lookup_struct("LoopA").unwrap();

        let err = emitter.flatten(a).unwrap_err();

        assert_eq!(
            err,
            SchemaInvariantError::BaseCycle {
                name: "LoopA".into(),
                chain: vec!["LoopA".into(), "LoopB".into(), "LoopA".into()],
            }
        );
    });
}

#[test]
fn flatten___missing_base___is_error() {
    with_emitter(|emitter, schema| {
        let orphan = schema.lookup_struct("Orphan").unwrap();

        let err = emitter.flatten(orphan).unwrap_err();

        assert_eq!(
            err,
            SchemaInvariantError::UnknownBase {
                name: "Orphan".into(),
                base: "Missing".into(),
            }
        );
    });
}

#[test]
fn flatten___non_struct_base___is_error() {
    with_emitter(|emitter, schema| {
        let ty = schema.lookup_struct("EnumBased").unwrap();

        let err = emitter.flatten(ty).unwrap_err();

        assert!(matches!(err, SchemaInvariantError::UnknownBase { .. }));
    });
}

#[test]
fn flatten___member_shadowing_base___is_collision() {
    with_emitter(|emitter, schema| {
        let ty = schema.lookup_struct("Shadow").unwrap();

        let err = emitter.flatten(ty).unwrap_err();

        assert!(matches!(
            err,
            SchemaInvariantError::IdentifierCollision { ref ident, .. } if ident == "a"
        ));
    });
}

#[test]
fn flatten___discriminator_from_base___is_marked() {
    with_emitter(|emitter, schema| {
        let ty = schema.lookup_struct("SocketAddress").unwrap();

        let fields = emitter.flatten(ty).unwrap();

        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].ident, "r#type");
        assert!(fields[0].discriminator);
    });
}

#[test]
fn flatten___same_name_without_variants___not_discriminator() {
    with_emitter(|emitter, schema| {
        let ty = schema.lookup_struct("Holder").unwrap();

        let fields = emitter.flatten(ty).unwrap();

        assert!(fields.iter().all(|f| !f.discriminator));
    });
}

// internal_fields tests

#[test]
fn internal_fields___implicit_payloads___are_skipped() {
    with_emitter(|emitter, schema| {
        let ty = schema.lookup_struct("SocketAddress").unwrap();

        let internal = emitter.internal_fields(ty).unwrap();

        assert_eq!(internal.len(), 1);
        assert_eq!(internal[0].ident, "inet");
        assert_eq!(internal[0].ty.name, "Inet");
    });
}

#[test]
fn internal_fields___no_variants___empty() {
    with_emitter(|emitter, schema| {
        let ty = schema.lookup_struct("Root").unwrap();

        assert!(emitter.internal_fields(ty).unwrap().is_empty());
    });
}

// emit tests

#[test]
fn emit___struct_with_variants___discriminator_comment_and_holders() {
    let code = with_emitter(|emitter, schema| {
        emitter
            .emit(schema.lookup_struct("SocketAddress").unwrap())
            .unwrap()
    });

    assert!(code.contains("pub struct SocketAddress {\n"));
    assert!(code.contains("    // Discriminator\n    pub r#type: SocketAddressType,\n"));
    assert!(code.contains("    // Variants fields\n    #[serde(skip)]\n    pub inet: Option<Box<Inet>>,\n"));
    assert!(!code.contains("unix"));
    assert!(code.contains("Some(&[\"type\"])"));
}

#[test]
fn emit___optional_nullable_alternate___uses_presence_helpers() {
    let code = with_emitter(|emitter, schema| {
        emitter.emit(schema.lookup_struct("Holder").unwrap()).unwrap()
    });

    assert!(code.contains(
        "    #[serde(rename = \"maybe-null\")]\n    #[serde(default, skip_serializing_if = \"is_absent\", deserialize_with = \"deserialize_present\")]\n    pub maybe_null: Option<Box<StrOrNull>>,\n"
    ));
}

#[test]
fn emit___optional_plain_alternate___is_omitted_when_none() {
    let code = with_emitter(|emitter, schema| {
        emitter.emit(schema.lookup_struct("Holder").unwrap()).unwrap()
    });

    assert!(code.contains(
        "    #[serde(default, skip_serializing_if = \"Option::is_none\")]\n    pub num: Option<Box<StrOrNum>>,\n"
    ));
}

#[test]
fn emit___recursive_optional_struct___is_boxed() {
    let code = with_emitter(|emitter, schema| {
        emitter.emit(schema.lookup_struct("Holder").unwrap()).unwrap()
    });

    assert!(code.contains("    pub next: Option<Box<Holder>>,\n"));
}

#[test]
fn emit___required_fields___plain_types() {
    let code = with_emitter(|emitter, schema| {
        emitter.emit(schema.lookup_struct("Holder").unwrap()).unwrap()
    });

    assert!(code.contains("    pub tags: Vec<String>,\n"));
    assert!(code.contains("    pub r#type: String,\n"));
    assert!(!code.contains("rename = \"type\""));
}

#[test]
fn emit___wire_fields___list_flattened_members() {
    let code = with_emitter(|emitter, schema| {
        emitter.emit(schema.lookup_struct("Leaf").unwrap()).unwrap()
    });

    assert!(code.contains(
        "    const WIRE_FIELDS: Option<&'static [&'static str]> = Some(&[\"a\", \"b\", \"c\"]);\n"
    ));
}

#[test]
fn emit___output_parses_as_rust() {
    with_emitter(|emitter, schema| {
        for name in ["Leaf", "SocketAddress", "Holder", "q_obj_Unix-wrapper"] {
            let code = emitter.emit(schema.lookup_struct(name).unwrap()).unwrap();

            syn::parse_file(&code).unwrap();
        }
    });
}
