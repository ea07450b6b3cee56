#![allow(non_snake_case)]

use super::*;
use qapigen_core::{AlternateType, ArrayType, EnumType, StructType, Variant};
use test_case::test_case;

fn schema() -> Schema {
    Schema::new(vec![
        SchemaEntity::Enum(EnumType::new("Color", ["red"])),
        SchemaEntity::Struct(StructType::new("Point", vec![])),
        SchemaEntity::Struct(StructType::new("q_obj_Foo-base", vec![])),
        SchemaEntity::Alternate(AlternateType::new(
            "StrOrNull",
            vec![Variant::new("s", "str"), Variant::new("n", "null")],
        )),
        SchemaEntity::Array(ArrayType {
            name: "PointList".into(),
            element: "Point".into(),
        }),
        SchemaEntity::Array(ArrayType {
            name: "PointListList".into(),
            element: "PointList".into(),
        }),
        SchemaEntity::Array(ArrayType {
            name: "LoopA".into(),
            element: "LoopB".into(),
        }),
        SchemaEntity::Array(ArrayType {
            name: "LoopB".into(),
            element: "LoopA".into(),
        }),
    ])
    .unwrap()
}

// map_builtin tests

#[test_case("str", "String")]
#[test_case("null", "()")]
#[test_case("bool", "bool")]
#[test_case("number", "f64")]
#[test_case("size", "u64")]
#[test_case("int", "i64")]
#[test_case("int8", "i8")]
#[test_case("int16", "i16")]
#[test_case("int32", "i32")]
#[test_case("int64", "i64")]
#[test_case("uint8", "u8")]
#[test_case("uint16", "u16")]
#[test_case("uint32", "u32")]
#[test_case("uint64", "u64")]
#[test_case("any", "Value")]
#[test_case("QType", "QType")]
fn map_builtin___known___maps(input: &str, expected: &str) {
    assert_eq!(map_builtin(input), Some(expected));
}

#[test]
fn map_builtin___unknown___is_none() {
    assert_eq!(map_builtin("Point"), None);
}

// TypeMapper tests

#[test_case("str", "String", TypeKind::Builtin; "builtin")]
#[test_case("null", "()", TypeKind::Null; "null sentinel")]
#[test_case("Color", "Color", TypeKind::Enum; "enum")]
#[test_case("Point", "Point", TypeKind::Struct; "struct")]
#[test_case("q_obj_Foo-base", "FooBase", TypeKind::Struct; "implicit struct")]
#[test_case("StrOrNull", "StrOrNull", TypeKind::Alternate; "alternate")]
#[test_case("PointList", "Vec<Point>", TypeKind::Sequence; "array entity")]
#[test_case("PointListList", "Vec<Vec<Point>>", TypeKind::Sequence; "nested array")]
#[test_case("strList", "Vec<String>", TypeKind::Sequence; "builtin list")]
#[test_case("ColorList", "Vec<Color>", TypeKind::Sequence; "undeclared list of entity")]
fn TypeMapper___map___resolves(input: &str, name: &str, kind: TypeKind) {
    let schema = schema();
    let names = NameMapper::default();
    let mapper = TypeMapper::new(&schema, &names);

    let ty = mapper.map(input).unwrap();

    assert_eq!(ty.name, name);
    assert_eq!(ty.kind, kind);
}

#[test]
fn TypeMapper___map___unknown_type_is_error() {
    let schema = schema();
    let names = NameMapper::default();
    let mapper = TypeMapper::new(&schema, &names);

    let err = mapper.map("Missing").unwrap_err();

    assert_eq!(
        err,
        SchemaInvariantError::UnknownType {
            name: "Missing".into()
        }
    );
}

#[test]
fn TypeMapper___map___unknown_list_element_is_error() {
    let schema = schema();
    let names = NameMapper::default();
    let mapper = TypeMapper::new(&schema, &names);

    let err = mapper.map("MissingList").unwrap_err();

    assert_eq!(
        err,
        SchemaInvariantError::UnknownType {
            name: "Missing".into()
        }
    );
}

#[test]
fn TypeMapper___map___array_cycle_is_error() {
    let schema = schema();
    let names = NameMapper::default();
    let mapper = TypeMapper::new(&schema, &names);

    let err = mapper.map("LoopA").unwrap_err();

    assert_eq!(
        err,
        SchemaInvariantError::ArrayCycle {
            name: "LoopA".into()
        }
    );
}

// TargetType tests

#[test]
fn TargetType___indirect___boxes_aggregates_only() {
    let schema = schema();
    let names = NameMapper::default();
    let mapper = TypeMapper::new(&schema, &names);

    assert_eq!(mapper.map("Point").unwrap().indirect(), "Box<Point>");
    assert_eq!(mapper.map("StrOrNull").unwrap().indirect(), "Box<StrOrNull>");
    assert_eq!(mapper.map("Color").unwrap().indirect(), "Color");
    assert_eq!(mapper.map("PointList").unwrap().indirect(), "Vec<Point>");
}
