//! Terse constructors for syntax trees
//!
//! Hosts that already have a parser build [`crate::ast`] nodes directly;
//! these helpers exist for hand-written trees in tests and benchmarks.
//! Every node gets the default span unless positioned with [`at`].

use crate::ast::*;

// ============ TYPES ============

pub fn any() -> TypeNode {
    node(TypeKind::Any)
}

pub fn mixed() -> TypeNode {
    node(TypeKind::Mixed)
}

pub fn number() -> TypeNode {
    node(TypeKind::Number)
}

pub fn boolean() -> TypeNode {
    node(TypeKind::Boolean)
}

pub fn string() -> TypeNode {
    node(TypeKind::String)
}

pub fn null() -> TypeNode {
    node(TypeKind::Literal(LiteralType::Null))
}

pub fn void() -> TypeNode {
    node(TypeKind::Literal(LiteralType::Void))
}

pub fn number_literal(value: f64) -> TypeNode {
    node(TypeKind::Literal(LiteralType::Number(value)))
}

pub fn boolean_literal(value: bool) -> TypeNode {
    node(TypeKind::Literal(LiteralType::Boolean(value)))
}

pub fn string_literal(value: &str) -> TypeNode {
    node(TypeKind::Literal(LiteralType::String(value.to_string())))
}

/// `() => void`
pub fn function() -> TypeNode {
    node(TypeKind::Function(FunctionType::default()))
}

pub fn nullable(inner: TypeNode) -> TypeNode {
    node(TypeKind::Nullable(Box::new(inner)))
}

pub fn array(element: TypeNode) -> TypeNode {
    node(TypeKind::Array(Box::new(element)))
}

pub fn tuple(elements: Vec<TypeNode>) -> TypeNode {
    node(TypeKind::Tuple(elements))
}

pub fn object(members: Vec<ObjectMember>) -> TypeNode {
    object_shape(ObjectShape {
        members,
        ..ObjectShape::default()
    })
}

/// `{| ... |}`
pub fn exact_object(members: Vec<ObjectMember>) -> TypeNode {
    object_shape(ObjectShape {
        members,
        exact: true,
        ..ObjectShape::default()
    })
}

pub fn object_shape(shape: ObjectShape) -> TypeNode {
    node(TypeKind::Object(shape))
}

pub fn field(key: &str, value: TypeNode) -> ObjectMember {
    ObjectMember::Field(ObjectField {
        key: FieldKey::Identifier(key.to_string()),
        value,
        optional: false,
        span: Span::default(),
        comments: Comments::default(),
    })
}

/// `key?: value`
pub fn optional_field(key: &str, value: TypeNode) -> ObjectMember {
    ObjectMember::Field(ObjectField {
        key: FieldKey::Identifier(key.to_string()),
        value,
        optional: true,
        span: Span::default(),
        comments: Comments::default(),
    })
}

/// `"key": value`
pub fn string_key_field(key: &str, value: TypeNode) -> ObjectMember {
    ObjectMember::Field(ObjectField {
        key: FieldKey::String(key.to_string()),
        value,
        optional: false,
        span: Span::default(),
        comments: Comments::default(),
    })
}

pub fn spread(argument: TypeNode) -> ObjectMember {
    ObjectMember::Spread(SpreadField {
        argument,
        span: Span::default(),
        comments: Comments::default(),
    })
}

/// `[key: K]: V`
pub fn indexer(key: TypeNode, value: TypeNode) -> ObjectIndexer {
    ObjectIndexer {
        id: None,
        key,
        value,
        span: Span::default(),
    }
}

/// `(): void` inside an object type
pub fn call_property() -> ObjectCallProperty {
    ObjectCallProperty {
        value: FunctionType::default(),
        span: Span::default(),
    }
}

/// `Name` without type arguments
pub fn generic(name: &str) -> TypeNode {
    node(TypeKind::Generic(GenericReference {
        name: TypeName::Identifier(Identifier::new(name)),
        type_args: None,
    }))
}

/// `Name<args>`
pub fn generic_with(name: &str, args: Vec<TypeNode>) -> TypeNode {
    node(TypeKind::Generic(GenericReference {
        name: TypeName::Identifier(Identifier::new(name)),
        type_args: Some(args),
    }))
}

/// `qualification.name`
pub fn qualified(qualification: &str, name: &str) -> TypeNode {
    node(TypeKind::Generic(GenericReference {
        name: TypeName::Qualified {
            qualification: Box::new(TypeName::Identifier(Identifier::new(qualification))),
            id: Identifier::new(name),
        },
        type_args: None,
    }))
}

pub fn union(members: Vec<TypeNode>) -> TypeNode {
    node(TypeKind::Union(members))
}

pub fn intersection(members: Vec<TypeNode>) -> TypeNode {
    node(TypeKind::Intersection(members))
}

/// Positions `node` at `line:column`, including the identifier it names
pub fn at(mut node: TypeNode, line: u32, column: u32) -> TypeNode {
    let span = Span::new(0, 0, line, column);
    node.span = span;
    if let TypeKind::Generic(GenericReference {
        name: TypeName::Identifier(id),
        ..
    }) = &mut node.kind
    {
        id.span = span;
    }
    node
}

/// Attaches leading comments to an object member
pub fn commented(member: ObjectMember, leading: Vec<Comment>) -> ObjectMember {
    match member {
        ObjectMember::Field(mut field) => {
            field.comments.leading.extend(leading);
            ObjectMember::Field(field)
        }
        ObjectMember::Spread(mut spread) => {
            spread.comments.leading.extend(leading);
            ObjectMember::Spread(spread)
        }
    }
}

/// Attaches leading and trailing comments to a type node
pub fn commented_type(
    mut node: TypeNode,
    leading: Vec<Comment>,
    trailing: Vec<Comment>,
) -> TypeNode {
    node.comments.leading.extend(leading);
    node.comments.trailing.extend(trailing);
    node
}

pub fn line_comment(text: &str) -> Comment {
    Comment {
        kind: CommentKind::Line,
        text: text.to_string(),
        span: Span::default(),
    }
}

pub fn block_comment(text: &str) -> Comment {
    Comment {
        kind: CommentKind::Block,
        text: text.to_string(),
        span: Span::default(),
    }
}

fn node(kind: TypeKind) -> TypeNode {
    TypeNode::new(kind, Span::default())
}

// ============ STATEMENTS ============

pub fn type_alias(name: &str, right: TypeNode) -> Statement {
    Statement::TypeAlias(TypeAliasDeclaration {
        id: Identifier::new(name),
        type_parameters: vec![],
        right,
        span: Span::default(),
    })
}

pub fn interface(name: &str, body: TypeNode) -> Statement {
    interface_extends(name, &[], body)
}

/// `interface name extends A, B { ... }`
pub fn interface_extends(name: &str, extends: &[&str], body: TypeNode) -> Statement {
    Statement::Interface(InterfaceDeclaration {
        id: Identifier::new(name),
        type_parameters: vec![],
        extends: extends
            .iter()
            .map(|parent| GenericReference {
                name: TypeName::Identifier(Identifier::new(*parent)),
                type_args: None,
            })
            .collect(),
        body,
        span: Span::default(),
    })
}

pub fn class(name: &str, super_class: Option<Expression>, body: Vec<ClassMember>) -> Statement {
    Statement::Class(ClassDeclaration {
        id: Some(Identifier::new(name)),
        super_class,
        body,
        span: Span::default(),
    })
}

/// `class {}` as written after `export default`
pub fn anonymous_class(body: Vec<ClassMember>) -> Statement {
    Statement::Class(ClassDeclaration {
        id: None,
        super_class: None,
        body,
        span: Span::default(),
    })
}

/// `class name extends React.Component { props: annotation; }`
pub fn component(name: &str, annotation: TypeNode) -> Statement {
    class(
        name,
        Some(member_expr("React", "Component")),
        vec![class_property("props", Some(annotation))],
    )
}

pub fn class_property(name: &str, type_annotation: Option<TypeNode>) -> ClassMember {
    ClassMember::Property(ClassProperty {
        key: Identifier::new(name),
        value: None,
        type_annotation,
        computed: false,
        static_: false,
        span: Span::default(),
        comments: Comments::default(),
    })
}

pub fn method(name: &str) -> ClassMember {
    ClassMember::Method(ClassMethod {
        key: Identifier::new(name),
        static_: false,
        span: Span::default(),
    })
}

pub fn const_(name: &str) -> Statement {
    Statement::Variable(VariableDeclaration {
        kind: VariableKind::Const,
        declarations: vec![Identifier::new(name)],
        span: Span::default(),
    })
}

pub fn function_declaration(name: &str) -> Statement {
    Statement::Function(FunctionDeclaration {
        id: Some(Identifier::new(name)),
        span: Span::default(),
    })
}

pub fn import_default(local: &str, source: &str, kind: ImportKind) -> Statement {
    import(
        vec![ImportSpecifier::Default {
            local: Identifier::new(local),
        }],
        source,
        kind,
    )
}

/// `import {imported as local, ...} from source`
pub fn import_named(names: &[(&str, &str)], source: &str, kind: ImportKind) -> Statement {
    let specifiers = names
        .iter()
        .map(|(imported, local)| ImportSpecifier::Named {
            local: Identifier::new(*local),
            imported: Identifier::new(*imported),
            kind: None,
        })
        .collect();
    import(specifiers, source, kind)
}

pub fn import_namespace(local: &str, source: &str) -> Statement {
    import(
        vec![ImportSpecifier::Namespace {
            local: Identifier::new(local),
        }],
        source,
        ImportKind::Value,
    )
}

fn import(specifiers: Vec<ImportSpecifier>, source: &str, kind: ImportKind) -> Statement {
    Statement::Import(ImportDeclaration {
        specifiers,
        source: source.to_string(),
        kind,
        span: Span::default(),
    })
}

pub fn export_declaration(inner: Statement) -> Statement {
    Statement::Export(ExportDeclaration::Declaration(Box::new(inner)))
}

pub fn export_default(inner: Statement) -> Statement {
    Statement::Export(ExportDeclaration::DefaultDeclaration(Box::new(inner)))
}

pub fn export_default_identifier(name: &str) -> Statement {
    Statement::Export(ExportDeclaration::DefaultIdentifier(Identifier::new(name)))
}

/// `export {local as exported, ...}`, optionally `from source`
pub fn export_named(names: &[(&str, &str)], source: Option<&str>) -> Statement {
    Statement::Export(ExportDeclaration::Named {
        specifiers: names
            .iter()
            .map(|(local, exported)| ExportSpecifier {
                local: Identifier::new(*local),
                exported: Identifier::new(*exported),
            })
            .collect(),
        source: source.map(str::to_string),
    })
}

pub fn export_all(source: &str) -> Statement {
    Statement::Export(ExportDeclaration::All {
        source: source.to_string(),
    })
}

// ============ EXPRESSIONS ============

pub fn ident_expr(name: &str) -> Expression {
    Expression::Identifier(Identifier::new(name))
}

/// `object.property`
pub fn member_expr(object: &str, property: &str) -> Expression {
    Expression::Member {
        object: Box::new(ident_expr(object)),
        property: Identifier::new(property),
    }
}
