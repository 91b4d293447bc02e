//! Typed syntax tree consumed by the converter
//!
//! Only the parts of a Flow module the converter and the host adapter look
//! at are modelled: type annotations, the declarations a type reference can
//! resolve to, imports/exports, and class bodies.

use serde::{Deserialize, Serialize};

/// Byte range plus the 1-based line/column of its start
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: u32,
    pub column: u32,
}

impl Span {
    pub fn new(start: usize, end: usize, line: u32, column: u32) -> Self {
        Self {
            start,
            end,
            line,
            column,
        }
    }
}

impl Default for Span {
    fn default() -> Self {
        Self {
            start: 0,
            end: 0,
            line: 1,
            column: 1,
        }
    }
}

// ============ COMMENTS ============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommentKind {
    Line,
    Block,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub kind: CommentKind,
    /// Text without the `//` or `/* */` delimiters
    pub text: String,
    #[serde(default)]
    pub span: Span,
}

/// Comments attached to a node, in source order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Comments {
    #[serde(default)]
    pub leading: Vec<Comment>,
    #[serde(default)]
    pub trailing: Vec<Comment>,
}

impl Comments {
    /// Appends `other` after the comments already held.
    pub fn extend(&mut self, other: &Comments) {
        self.leading.extend(other.leading.iter().cloned());
        self.trailing.extend(other.trailing.iter().cloned());
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identifier {
    pub name: String,
    #[serde(default)]
    pub span: Span,
}

impl Identifier {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            span: Span::default(),
        }
    }
}

// ============ TYPE ANNOTATIONS ============

/// One node of a type annotation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeNode {
    pub kind: TypeKind,
    #[serde(default)]
    pub span: Span,
    #[serde(default)]
    pub comments: Comments,
}

impl TypeNode {
    pub fn new(kind: TypeKind, span: Span) -> Self {
        Self {
            kind,
            span,
            comments: Comments::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TypeKind {
    Any,
    Mixed,
    Number,
    Boolean,
    String,
    Literal(LiteralType),
    Function(FunctionType),
    /// `?T`
    Nullable(Box<TypeNode>),
    /// `T[]`
    Array(Box<TypeNode>),
    Tuple(Vec<TypeNode>),
    Object(ObjectShape),
    /// `Name` or `Name<Args>`
    Generic(GenericReference),
    Union(Vec<TypeNode>),
    Intersection(Vec<TypeNode>),
}

impl TypeKind {
    /// Name of the kind as used in diagnostics
    pub fn name(&self) -> &'static str {
        match self {
            TypeKind::Any => "AnyTypeAnnotation",
            TypeKind::Mixed => "MixedTypeAnnotation",
            TypeKind::Number => "NumberTypeAnnotation",
            TypeKind::Boolean => "BooleanTypeAnnotation",
            TypeKind::String => "StringTypeAnnotation",
            TypeKind::Literal(literal) => literal.kind_name(),
            TypeKind::Function(_) => "FunctionTypeAnnotation",
            TypeKind::Nullable(_) => "NullableTypeAnnotation",
            TypeKind::Array(_) => "ArrayTypeAnnotation",
            TypeKind::Tuple(_) => "TupleTypeAnnotation",
            TypeKind::Object(_) => "ObjectTypeAnnotation",
            TypeKind::Generic(_) => "GenericTypeAnnotation",
            TypeKind::Union(_) => "UnionTypeAnnotation",
            TypeKind::Intersection(_) => "IntersectionTypeAnnotation",
        }
    }
}

/// Singleton types: `null`, `void`, `1`, `true`, `"three"`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LiteralType {
    Null,
    Void,
    Number(f64),
    Boolean(bool),
    String(String),
}

impl LiteralType {
    pub fn kind_name(&self) -> &'static str {
        match self {
            LiteralType::Null => "NullLiteralTypeAnnotation",
            LiteralType::Void => "VoidTypeAnnotation",
            LiteralType::Number(_) => "NumberLiteralTypeAnnotation",
            LiteralType::Boolean(_) => "BooleanLiteralTypeAnnotation",
            LiteralType::String(_) => "StringLiteralTypeAnnotation",
        }
    }

    pub fn is_nullish(&self) -> bool {
        matches!(self, LiteralType::Null | LiteralType::Void)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FunctionType {
    #[serde(default)]
    pub params: Vec<FunctionTypeParam>,
    #[serde(default)]
    pub rest: Option<Box<FunctionTypeParam>>,
    #[serde(default)]
    pub return_type: Option<Box<TypeNode>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionTypeParam {
    pub name: Option<Identifier>,
    pub type_annotation: TypeNode,
    #[serde(default)]
    pub optional: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectShape {
    #[serde(default)]
    pub members: Vec<ObjectMember>,
    #[serde(default)]
    pub indexers: Vec<ObjectIndexer>,
    #[serde(default)]
    pub call_properties: Vec<ObjectCallProperty>,
    /// `{| ... |}`
    #[serde(default)]
    pub exact: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ObjectMember {
    Field(ObjectField),
    Spread(SpreadField),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectField {
    pub key: FieldKey,
    pub value: TypeNode,
    /// `key?: T`
    #[serde(default)]
    pub optional: bool,
    #[serde(default)]
    pub span: Span,
    #[serde(default)]
    pub comments: Comments,
}

/// `...T` inside an object type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpreadField {
    pub argument: TypeNode,
    #[serde(default)]
    pub span: Span,
    #[serde(default)]
    pub comments: Comments,
}

/// `[key: K]: V`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectIndexer {
    #[serde(default)]
    pub id: Option<Identifier>,
    pub key: TypeNode,
    pub value: TypeNode,
    #[serde(default)]
    pub span: Span,
}

/// `(x: T): U` inside an object type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectCallProperty {
    pub value: FunctionType,
    #[serde(default)]
    pub span: Span,
}

/// Object keys keep the form they were written in
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKey {
    Identifier(String),
    String(String),
}

impl FieldKey {
    pub fn name(&self) -> &str {
        match self {
            FieldKey::Identifier(name) | FieldKey::String(name) => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenericReference {
    pub name: TypeName,
    #[serde(default)]
    pub type_args: Option<Vec<TypeNode>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TypeName {
    Identifier(Identifier),
    /// `A.B`
    Qualified {
        qualification: Box<TypeName>,
        id: Identifier,
    },
}

impl TypeName {
    /// Dotted source form, e.g. `React.Node`
    pub fn dotted(&self) -> String {
        match self {
            TypeName::Identifier(id) => id.name.clone(),
            TypeName::Qualified { qualification, id } => {
                format!("{}.{}", qualification.dotted(), id.name)
            }
        }
    }
}

// ============ MODULES ============

/// A parsed source file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Module {
    pub body: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Statement {
    TypeAlias(TypeAliasDeclaration),
    Interface(InterfaceDeclaration),
    Class(ClassDeclaration),
    Variable(VariableDeclaration),
    Function(FunctionDeclaration),
    Import(ImportDeclaration),
    Export(ExportDeclaration),
    /// Anything the converter never needs to look into
    Other {
        #[serde(default)]
        span: Span,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeAliasDeclaration {
    pub id: Identifier,
    #[serde(default)]
    pub type_parameters: Vec<Identifier>,
    pub right: TypeNode,
    #[serde(default)]
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterfaceDeclaration {
    pub id: Identifier,
    #[serde(default)]
    pub type_parameters: Vec<Identifier>,
    #[serde(default)]
    pub extends: Vec<GenericReference>,
    pub body: TypeNode,
    #[serde(default)]
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassDeclaration {
    /// `None` only for `export default class {}`
    pub id: Option<Identifier>,
    #[serde(default)]
    pub super_class: Option<Expression>,
    pub body: Vec<ClassMember>,
    #[serde(default)]
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ClassMember {
    Property(ClassProperty),
    Method(ClassMethod),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassProperty {
    pub key: Identifier,
    #[serde(default)]
    pub value: Option<Expression>,
    #[serde(default)]
    pub type_annotation: Option<TypeNode>,
    #[serde(default)]
    pub computed: bool,
    #[serde(default)]
    pub static_: bool,
    #[serde(default)]
    pub span: Span,
    #[serde(default)]
    pub comments: Comments,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassMethod {
    pub key: Identifier,
    #[serde(default)]
    pub static_: bool,
    #[serde(default)]
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableDeclaration {
    pub kind: VariableKind,
    pub declarations: Vec<Identifier>,
    #[serde(default)]
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VariableKind {
    Var,
    Let,
    Const,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDeclaration {
    pub id: Option<Identifier>,
    #[serde(default)]
    pub span: Span,
}

// Module declarations

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ImportKind {
    #[default]
    Value,
    /// `import type`
    Type,
    /// `import typeof`
    Typeof,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportDeclaration {
    pub specifiers: Vec<ImportSpecifier>,
    pub source: String,
    #[serde(default)]
    pub kind: ImportKind,
    #[serde(default)]
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ImportSpecifier {
    Named {
        local: Identifier,
        imported: Identifier,
        /// Per-specifier `type`/`typeof`, e.g. `import {type A} from`
        #[serde(default)]
        kind: Option<ImportKind>,
    },
    Default {
        local: Identifier,
    },
    Namespace {
        local: Identifier,
    },
}

impl ImportSpecifier {
    pub fn local(&self) -> &Identifier {
        match self {
            ImportSpecifier::Named { local, .. }
            | ImportSpecifier::Default { local }
            | ImportSpecifier::Namespace { local } => local,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExportDeclaration {
    /// `export type A = ...`, `export class A {}`, `export const a = ...`
    Declaration(Box<Statement>),
    /// `export default class A {}` or `export default class {}`
    DefaultDeclaration(Box<Statement>),
    /// `export default a`
    DefaultIdentifier(Identifier),
    /// `export {a, b as c}` and `export {a} from "./x"`
    Named {
        specifiers: Vec<ExportSpecifier>,
        #[serde(default)]
        source: Option<String>,
    },
    /// `export * from "./x"`
    All { source: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportSpecifier {
    pub local: Identifier,
    pub exported: Identifier,
}

// ============ EXPRESSIONS ============

/// The few expression shapes the host inspects or generates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    Identifier(Identifier),
    Member {
        object: Box<Expression>,
        property: Identifier,
    },
    /// A generated validator table
    Validators(crate::validator::ValidatorExpr),
    Other {
        #[serde(default)]
        span: Span,
    },
}
