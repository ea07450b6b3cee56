#![allow(non_snake_case)]

use super::*;

const SAMPLE: &str = r#"{
    "entities": [
        { "meta": "enum", "name": "Color", "members": [{ "name": "red" }, { "name": "green" }] },
        { "meta": "alternate", "name": "StrOrNull",
          "variants": [{ "name": "s", "type": "str" }, { "name": "n", "type": "null" }] },
        { "meta": "alternate", "name": "StrOrNum",
          "variants": [{ "name": "s", "type": "str" }, { "name": "n", "type": "int" }] },
        { "meta": "struct", "name": "Pixel", "base": "Point",
          "members": [{ "name": "color", "type": "Color", "optional": true }],
          "ifcond": { "all": ["CONFIG_PIXEL"] } },
        { "meta": "struct", "name": "Point",
          "members": [{ "name": "x", "type": "int" }, { "name": "y", "type": "int" }] },
        { "meta": "array", "name": "PointList", "element": "Point" },
        { "meta": "command", "name": "query-pixels" },
        { "meta": "event", "name": "PIXEL_CHANGED" }
    ]
}"#;

#[test]
fn Schema___from_json_str___preserves_declaration_order() {
    let schema = Schema::from_json_str(SAMPLE).unwrap();

    let names: Vec<&str> = schema.entities().iter().map(SchemaEntity::name).collect();

    assert_eq!(
        names,
        [
            "Color",
            "StrOrNull",
            "StrOrNum",
            "Pixel",
            "Point",
            "PointList",
            "query-pixels",
            "PIXEL_CHANGED"
        ]
    );
}

#[test]
fn Schema___from_json_str___parses_struct_fields() {
    let schema = Schema::from_json_str(SAMPLE).unwrap();

    let pixel = schema.lookup_struct("Pixel").unwrap();

    assert_eq!(pixel.base.as_deref(), Some("Point"));
    assert_eq!(pixel.members, vec![Member::optional("color", "Color")]);
    assert!(pixel.ifcond.is_some());
}

#[test]
fn Schema___from_json_str___optional_defaults_to_false() {
    let schema = Schema::from_json_str(SAMPLE).unwrap();

    let point = schema.lookup_struct("Point").unwrap();

    assert!(point.members.iter().all(|m| !m.optional));
}

#[test]
fn Schema___from_json_str___unknown_meta_returns_parse_error() {
    let result = Schema::from_json_str(r#"{"entities": [{"meta": "module", "name": "x"}]}"#);

    assert!(matches!(result, Err(GenerateError::Parse(_))));
}

#[test]
fn Schema___new___duplicate_name_is_rejected() {
    let entities = vec![
        SchemaEntity::Enum(EnumType::new("Color", ["red"])),
        SchemaEntity::Struct(StructType::new("Color", vec![])),
    ];

    let result = Schema::new(entities);

    assert_eq!(
        result.unwrap_err(),
        SchemaInvariantError::DuplicateEntity {
            name: "Color".into()
        }
    );
}

#[test]
fn Schema___lookup___missing_returns_none() {
    let schema = Schema::from_json_str(SAMPLE).unwrap();

    assert!(schema.lookup("Nope").is_none());
}

#[test]
fn Schema___lookup_struct___wrong_kind_returns_none() {
    let schema = Schema::from_json_str(SAMPLE).unwrap();

    assert!(schema.lookup_struct("Color").is_none());
    assert!(schema.lookup_struct("StrOrNull").is_none());
}

#[test]
fn Schema___nullable_alternates___only_alternates_with_null_variant() {
    let schema = Schema::from_json_str(SAMPLE).unwrap();

    let nullable = schema.nullable_alternates();

    assert_eq!(nullable.into_iter().collect::<Vec<_>>(), ["StrOrNull"]);
}

#[test]
fn SchemaEntity___meta___matches_json_keyword() {
    let schema = Schema::from_json_str(SAMPLE).unwrap();

    let metas: Vec<&str> = schema.entities().iter().map(SchemaEntity::meta).collect();

    assert_eq!(
        metas,
        ["enum", "alternate", "alternate", "struct", "struct", "array", "command", "event"]
    );
}

#[test]
fn AlternateType___is_nullable___detects_null_variant() {
    let alt = AlternateType::new("A", vec![Variant::new("s", "str"), Variant::new("n", "null")]);

    assert!(alt.is_nullable());
    assert!(!AlternateType::new("B", vec![Variant::new("s", "str")]).is_nullable());
}

#[test]
fn StructType___builders___set_base_and_variants() {
    let ty = StructType::new("Shape", vec![Member::new("kind", "ShapeKind")])
        .with_base("q_obj_Shape-base")
        .with_variants("kind", vec![Variant::new("square", "Square")]);

    assert_eq!(ty.base.as_deref(), Some("q_obj_Shape-base"));
    assert_eq!(ty.variants.unwrap().discriminator, "kind");
}
