//! Local type references and the generic escape hatches

use flow_prop_types::ErrorKind;
use flow_prop_types::builder::*;

use super::{ROOT, convert_err, convert_in, table};

#[test]
fn test_type_alias() {
    let body = vec![type_alias("a", number())];
    let props = object(vec![field("a", generic("a"))]);
    assert_eq!(
        convert_in(body, props),
        table(&["a: _PropTypes.number.isRequired"])
    );
}

#[test]
fn test_interface() {
    let body = vec![interface("a", object(vec![]))];
    let props = object(vec![field("a", generic("a"))]);
    assert_eq!(
        convert_in(body, props),
        table(&["a: _PropTypes.shape({}).isRequired"])
    );
}

#[test]
fn test_class_is_instance_of() {
    let body = vec![class("a", None, vec![])];
    let props = object(vec![field("a", generic("a"))]);
    assert_eq!(
        convert_in(body, props),
        table(&["a: _PropTypes.instanceOf(a).isRequired"])
    );
}

#[test]
fn test_props_alias_is_the_table() {
    let body = vec![type_alias("Props", object(vec![field("a", any())]))];
    assert_eq!(
        convert_in(body, generic("Props")),
        table(&["a: _PropTypes.any.isRequired"])
    );
}

#[test]
fn test_exported_props_alias() {
    let body = vec![export_declaration(type_alias(
        "Props",
        object(vec![field("a", any())]),
    ))];
    assert_eq!(
        convert_in(body, generic("Props")),
        table(&["a: _PropTypes.any.isRequired"])
    );
}

#[test]
fn test_alias_chain() {
    let body = vec![
        type_alias("A", generic("B")),
        type_alias("B", array(generic("C"))),
        type_alias("C", string()),
    ];
    let props = object(vec![field("a", generic("A"))]);
    assert_eq!(
        convert_in(body, props),
        table(&["a: _PropTypes.arrayOf(_PropTypes.string).isRequired"])
    );
}

#[test]
fn test_interface_extends_merges_fields() {
    let body = vec![
        interface("Base", object(vec![field("a", number()), field("b", number())])),
        interface_extends("Child", &["Base"], object(vec![field("b", string())])),
    ];
    let props = object(vec![field("x", generic("Child"))]);
    assert_eq!(
        convert_in(body.clone(), props),
        "{\n  x: _PropTypes.shape({\n    a: _PropTypes.number.isRequired,\n    b: _PropTypes.string.isRequired\n  }).isRequired\n}"
    );
    assert_eq!(
        convert_in(body, generic("Child")),
        table(&[
            "a: _PropTypes.number.isRequired",
            "b: _PropTypes.string.isRequired",
        ])
    );
}

#[test]
fn test_missing_reference() {
    let props = object(vec![field("a", at(generic("Nope"), 3, 7))]);
    let err = convert_err(vec![], props);
    assert_eq!(err.kind, ErrorKind::MissingReference);
    assert_eq!(err.message, "Missing reference: Nope");
    assert_eq!(err.location.file.as_deref(), Some(ROOT));
    assert_eq!((err.location.line, err.location.column), (3, 7));
    assert_eq!(
        err.to_string(),
        "MissingReference: Missing reference: Nope at /src/Foo.js:3:7"
    );
}

#[test]
fn test_value_is_not_a_type() {
    let body = vec![const_("x"), function_declaration("f")];
    for name in ["x", "f"] {
        let err = convert_err(body.clone(), object(vec![field("a", generic(name))]));
        assert_eq!(err.kind, ErrorKind::UnsupportedTypeKind);
        assert_eq!(err.message, format!("'{}' is a value, not a type", name));
    }
}

#[test]
fn test_qualified_reference_fails() {
    let body = vec![import_default("React", "react", flow_prop_types::ast::ImportKind::Value)];
    let err = convert_err(body, object(vec![field("a", qualified("React", "Node"))]));
    assert_eq!(err.kind, ErrorKind::QualifiedIdentifierUnsupported);
    assert!(err.message.contains("React.Node"));
}

#[test]
fn test_has_default_prop() {
    let props = object(vec![
        field("a", generic_with("HasDefaultProp", vec![number()])),
        field("b", generic_with("HasDefaultProp", vec![nullable(string())])),
    ]);
    assert_eq!(
        convert_in(vec![], props),
        table(&["a: _PropTypes.number", "b: _PropTypes.string"])
    );
}

#[test]
fn test_has_default_prop_through_alias() {
    let body = vec![type_alias(
        "D",
        generic_with("HasDefaultProp", vec![boolean()]),
    )];
    let props = object(vec![field("a", generic("D"))]);
    assert_eq!(convert_in(body, props), table(&["a: _PropTypes.bool"]));
}

#[test]
fn test_has_default_prop_outside_field_fails() {
    let nested = object(vec![field(
        "a",
        array(generic_with("HasDefaultProp", vec![number()])),
    )]);
    let err = convert_err(vec![], nested);
    assert_eq!(err.kind, ErrorKind::IllegalEscapeHatchPlacement);

    let in_union = object(vec![field(
        "a",
        union(vec![generic_with("HasDefaultProp", vec![number()]), string()]),
    )]);
    let err = convert_err(vec![], in_union);
    assert_eq!(err.kind, ErrorKind::IllegalEscapeHatchPlacement);
}

#[test]
fn test_custom_prop_type_uses_validator_argument() {
    let body = vec![type_alias("Size", number())];
    let props = object(vec![field(
        "a",
        generic_with("CustomPropType", vec![string(), generic("Size")]),
    )]);
    assert_eq!(
        convert_in(body, props),
        table(&["a: _PropTypes.number.isRequired"])
    );
}

#[test]
fn test_exact_reference() {
    let body = vec![type_alias("C", object(vec![optional_field("c", any())]))];
    let props = object(vec![field("a", generic_with("$Exact", vec![generic("C")]))]);
    assert_eq!(
        convert_in(body, props),
        "{\n  a: _PropTypes.shape({\n    c: _PropTypes.any\n  }).isRequired\n}"
    );
}

#[test]
fn test_unknown_generic_fails() {
    let props = object(vec![field("a", generic_with("Map", vec![string(), number()]))]);
    let err = convert_err(vec![], props);
    assert_eq!(err.kind, ErrorKind::UnsupportedTypeKind);
    assert!(err.message.contains("Map<...>"));
}

#[test]
fn test_wrong_arity_fails() {
    let props = object(vec![field("a", generic_with("Array", vec![string(), number()]))]);
    let err = convert_err(vec![], props);
    assert_eq!(err.kind, ErrorKind::UnsupportedTypeKind);
}
