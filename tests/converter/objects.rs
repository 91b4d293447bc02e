//! Object shapes, indexers, spreads, intersections and comments

use flow_prop_types::ErrorKind;
use flow_prop_types::ast::{ObjectShape, TypeNode};
use flow_prop_types::builder::*;

use super::{convert, convert_err, convert_in, table};

fn indexed(indexers: Vec<flow_prop_types::ast::ObjectIndexer>) -> TypeNode {
    object_shape(ObjectShape {
        indexers,
        ..ObjectShape::default()
    })
}

#[test]
fn test_nested_object_is_shape() {
    let props = object(vec![field("a", object(vec![field("b", any())]))]);
    assert_eq!(
        convert(props),
        "{\n  a: _PropTypes.shape({\n    b: _PropTypes.any.isRequired\n  }).isRequired\n}"
    );
}

#[test]
fn test_empty_props() {
    assert_eq!(convert(exact_object(vec![])), "{}");
}

#[test]
fn test_comments_carry_over() {
    let props = object(vec![commented(
        field("a", any()),
        vec![line_comment(" This is the a prop")],
    )]);
    assert_eq!(
        convert(props),
        "{\n  // This is the a prop\n  a: _PropTypes.any.isRequired\n}"
    );
}

#[test]
fn test_nested_comments_carry_over() {
    let props = object(vec![field(
        "a",
        object(vec![commented(
            field("b", any()),
            vec![line_comment(" This is the a.b prop")],
        )]),
    )]);
    assert_eq!(
        convert(props),
        "{\n  a: _PropTypes.shape({\n    // This is the a.b prop\n    b: _PropTypes.any.isRequired\n  }).isRequired\n}"
    );
}

#[test]
fn test_value_comments_follow_field_comments() {
    let value = commented_type(
        number(),
        vec![line_comment(" in pixels")],
        vec![block_comment(" >= 0 ")],
    );
    let props = object(vec![
        commented(field("width", value), vec![line_comment(" The width")]),
        field("height", number()),
    ]);
    assert_eq!(
        convert(props),
        "{\n  // The width\n  // in pixels\n  width: _PropTypes.number.isRequired, /* >= 0 */\n  height: _PropTypes.number.isRequired\n}"
    );
}

#[test]
fn test_string_keys_are_quoted() {
    let props = object(vec![string_key_field("data-id", string())]);
    assert_eq!(
        convert(props),
        table(&[r#""data-id": _PropTypes.string.isRequired"#])
    );
}

#[test]
fn test_indexer_is_object_of() {
    let props = object(vec![field("a", indexed(vec![indexer(string(), number())]))]);
    assert_eq!(
        convert(props),
        table(&["a: _PropTypes.objectOf(_PropTypes.number).isRequired"])
    );
}

#[test]
fn test_indexer_root_is_not_a_table() {
    let err = convert_err(vec![], indexed(vec![indexer(string(), number())]));
    assert_eq!(err.kind, ErrorKind::UnsupportedTypeKind);
}

#[test]
fn test_fields_with_indexer_fail() {
    let shape = object_shape(ObjectShape {
        members: vec![field("b", number())],
        indexers: vec![indexer(string(), number())],
        ..ObjectShape::default()
    });
    let err = convert_err(vec![], object(vec![field("a", shape)]));
    assert_eq!(err.kind, ErrorKind::MixedShape);
    assert!(err.to_string().starts_with("MixedShapeError: "));
}

#[test]
fn test_two_indexers_fail() {
    let shape = indexed(vec![indexer(string(), number()), indexer(number(), string())]);
    let err = convert_err(vec![], object(vec![field("a", shape)]));
    assert_eq!(err.kind, ErrorKind::MixedShape);
}

#[test]
fn test_call_signature_fails() {
    let shape = object_shape(ObjectShape {
        call_properties: vec![call_property()],
        ..ObjectShape::default()
    });
    let err = convert_err(vec![], object(vec![field("a", shape)]));
    assert_eq!(err.kind, ErrorKind::UnsupportedCallSignature);
}

#[test]
fn test_spread_fields_are_optional() {
    let body = vec![type_alias("C", object(vec![field("c", any())]))];
    let props = object(vec![field("b", any()), spread(generic("C"))]);
    assert_eq!(
        convert_in(body, props),
        table(&["b: _PropTypes.any.isRequired", "c: _PropTypes.any"])
    );
}

#[test]
fn test_exact_spread_keeps_required() {
    let body = vec![type_alias("C", object(vec![field("c", any())]))];
    let props = object(vec![
        field("b", any()),
        spread(generic_with("$Exact", vec![generic("C")])),
    ]);
    assert_eq!(
        convert_in(body, props),
        table(&["b: _PropTypes.any.isRequired", "c: _PropTypes.any.isRequired"])
    );
}

#[test]
fn test_spread_inside_shape() {
    let body = vec![type_alias("C", object(vec![field("c", number())]))];
    let props = object(vec![field("a", object(vec![spread(generic("C"))]))]);
    assert_eq!(
        convert_in(body, props),
        "{\n  a: _PropTypes.shape({\n    c: _PropTypes.number\n  }).isRequired\n}"
    );
}

#[test]
fn test_later_duplicate_wins_in_first_position() {
    let body = vec![type_alias("C", object(vec![field("a", string())]))];
    let props = object(vec![
        field("a", number()),
        field("b", boolean()),
        spread(generic("C")),
    ]);
    assert_eq!(
        convert_in(body, props),
        table(&["a: _PropTypes.string", "b: _PropTypes.bool.isRequired"])
    );
}

#[test]
fn test_spread_comments_move_to_first_field() {
    let body = vec![type_alias(
        "C",
        object(vec![field("c", any()), field("d", any())]),
    )];
    let props = object(vec![commented(
        spread(generic("C")),
        vec![line_comment(" shared")],
    )]);
    assert_eq!(
        convert_in(body, props),
        "{\n  // shared\n  c: _PropTypes.any,\n  d: _PropTypes.any\n}"
    );
}

#[test]
fn test_spread_of_non_object_fails() {
    let body = vec![type_alias("N", number())];
    let err = convert_err(body, object(vec![spread(generic("N"))]));
    assert_eq!(err.kind, ErrorKind::UnsupportedTypeKind);
}

#[test]
fn test_top_level_intersection_flattens() {
    let props = intersection(vec![
        object(vec![field("foo", boolean())]),
        object(vec![field("bar", boolean())]),
    ]);
    assert_eq!(
        convert(props),
        table(&[
            "foo: _PropTypes.bool.isRequired",
            "bar: _PropTypes.bool.isRequired",
        ])
    );
}

#[test]
fn test_top_level_intersection_of_aliases() {
    let body = vec![
        type_alias("A", object(vec![field("a", number())])),
        type_alias("B", object(vec![optional_field("b", string())])),
    ];
    let props = intersection(vec![generic("A"), generic("B")]);
    assert_eq!(
        convert_in(body, props),
        table(&["a: _PropTypes.number.isRequired", "b: _PropTypes.string"])
    );
}

#[test]
fn test_top_level_intersection_rejects_primitives() {
    let err = convert_err(vec![], intersection(vec![boolean(), number()]));
    assert_eq!(err.kind, ErrorKind::UnsupportedTopLevelIntersection);
    assert!(
        err.to_string()
            .starts_with("UnsupportedTopLevelIntersectionError: ")
    );
}

#[test]
fn test_nested_intersection_uses_all() {
    let props = object(vec![field(
        "a",
        intersection(vec![
            object(vec![field("b", number())]),
            object(vec![field("c", string())]),
        ]),
    )]);
    assert_eq!(
        convert(props),
        "{\n  a: _all(_PropTypes.shape({\n    b: _PropTypes.number.isRequired\n  }), _PropTypes.shape({\n    c: _PropTypes.string.isRequired\n  })).isRequired\n}"
    );
}

#[test]
fn test_root_must_be_an_object() {
    let err = convert_err(vec![], number());
    assert_eq!(err.kind, ErrorKind::UnsupportedTypeKind);
    assert!(err.message.contains("NumberTypeAnnotation"));
}
