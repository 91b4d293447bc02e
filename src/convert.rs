//! Type annotation → validator expression conversion
//!
//! One `match` arm per [`TypeKind`]. Every arm either produces a
//! [`Conversion`] or fails; nothing is downgraded to `any`.
//!
//! Two rules depend on position rather than on the node alone:
//!
//! - at depth 0 an object type becomes the bare field map and an
//!   intersection merges its members' field maps;
//! - directly under a field key, `?T` and `HasDefaultProp<T>` come back as
//!   [`Conversion::Optional`] so the field is not marked required.

use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::ast::{
    ClassDeclaration, GenericReference, Identifier, ImportKind, InterfaceDeclaration, LiteralType,
    ObjectField, ObjectMember, ObjectShape, SpreadField, TypeKind, TypeName, TypeNode,
};
use crate::error::{ConvertError, ErrorKind};
use crate::literal;
use crate::module::SourceFile;
use crate::options::{ConvertConfig, Options, ValidatorRefs};
use crate::resolver::Resolver;
use crate::scope::{Binding, ImportBinding, Imported};
use crate::validator::{Conversion, Field, LiteralValue, ValidatorExpr};

/// `Array<T>`
pub const ARRAY: &str = "Array";
/// `$Exact<T>`, also asserts spread-in fields are present
pub const EXACT: &str = "$Exact";
/// `CustomPropType<T, V>` converts as `V`
pub const CUSTOM_PROP_TYPE: &str = "CustomPropType";
/// `HasDefaultProp<T>` converts as `T`, never required
pub const HAS_DEFAULT_PROP: &str = "HasDefaultProp";

const FUNCTION_GLOBAL: &str = "Function";
const OBJECT_GLOBAL: &str = "Object";

/// Converts the annotation of a `props`-like field into its validator table.
///
/// The result is the bare field map, ready to become the initializer of a
/// static property. Conversion is all-or-nothing.
pub fn convert_type_to_validators(
    annotation: &TypeNode,
    file: &SourceFile,
    options: &Options<'_>,
) -> Result<Vec<Field>, ConvertError> {
    Converter::new(file, options).convert_root(annotation)
}

/// Position of a node, threaded through recursion by value
#[derive(Debug, Clone, Default)]
struct Context {
    depth: u32,
    /// Directly the value type of an object field
    field_value: bool,
    /// Name valid in the root file for the declaration being reached
    replacement: Option<Identifier>,
}

impl Context {
    fn top_level() -> Self {
        Self::default()
    }

    fn field(&self) -> Self {
        Self {
            depth: self.depth + 1,
            field_value: true,
            replacement: None,
        }
    }

    fn nested(&self) -> Self {
        Self {
            depth: self.depth + 1,
            field_value: false,
            replacement: None,
        }
    }

    fn with_replacement(self, replacement: Identifier) -> Self {
        Self {
            replacement: Some(replacement),
            ..self
        }
    }

    /// Declarations behind an alias or interface never inherit the name of
    /// the import that led to them
    fn without_replacement(self) -> Self {
        Self {
            replacement: None,
            ..self
        }
    }

    fn is_top_level(&self) -> bool {
        self.depth == 0
    }
}

/// Field list with object-literal semantics for duplicate keys
#[derive(Debug, Default)]
struct FieldList(IndexMap<String, Field>);

impl FieldList {
    fn push(&mut self, field: Field) {
        self.0.insert(field.key.name().to_string(), field);
    }

    fn extend(&mut self, fields: Vec<Field>) {
        for field in fields {
            self.push(field);
        }
    }

    fn into_vec(self) -> Vec<Field> {
        self.0.into_values().collect()
    }
}

struct Converter<'a> {
    root: &'a SourceFile,
    refs: &'a dyn ValidatorRefs,
    config: &'a ConvertConfig,
    resolver: Resolver<'a>,
}

impl<'a> Converter<'a> {
    fn new(root: &'a SourceFile, options: &Options<'a>) -> Self {
        Self {
            root,
            refs: options.refs,
            config: options.config,
            resolver: Resolver::new(options.loader, options.config.module_resolution.as_ref()),
        }
    }

    fn convert_root(&self, annotation: &TypeNode) -> Result<Vec<Field>, ConvertError> {
        debug!(file = self.root.path(), kind = annotation.kind.name(), "converting props type");
        let converted = self.convert(annotation, self.root, Context::top_level())?;
        converted.into_expr().into_fields().map_err(|_| {
            self.root.error(
                ErrorKind::UnsupportedTypeKind,
                annotation.span,
                format!(
                    "Props type must be an object type, found {}",
                    annotation.kind.name()
                ),
            )
        })
    }

    fn convert(
        &self,
        node: &TypeNode,
        file: &SourceFile,
        ctx: Context,
    ) -> Result<Conversion, ConvertError> {
        trace!(
            kind = node.kind.name(),
            depth = ctx.depth,
            field_value = ctx.field_value,
            file = file.path(),
            "convert"
        );

        match &node.kind {
            // no runtime check distinguishes mixed from any
            TypeKind::Any | TypeKind::Mixed => Ok(Conversion::Required(self.primitive("any"))),
            TypeKind::Number => Ok(Conversion::Required(self.primitive("number"))),
            TypeKind::Boolean => Ok(Conversion::Required(self.primitive("bool"))),
            TypeKind::String => Ok(Conversion::Required(self.primitive("string"))),
            TypeKind::Function(_) => Ok(Conversion::Required(self.primitive("func"))),
            TypeKind::Literal(literal) => {
                self.check_literal(literal, node, file)?;
                let value = literal::encode(literal);
                Ok(Conversion::Required(self.one_of(vec![value])))
            }
            TypeKind::Nullable(inner) => self.convert_nullable(node, inner, file, ctx),
            TypeKind::Array(element) => Ok(Conversion::Required(
                self.array_of(element, file, &ctx)?,
            )),
            // no positional check exists for tuples
            TypeKind::Tuple(_) => Ok(Conversion::Required(self.primitive("array"))),
            TypeKind::Object(shape) => self.convert_object(shape, file, ctx),
            TypeKind::Generic(reference) => self.convert_generic(node, reference, file, ctx),
            TypeKind::Union(members) => self.convert_union(members, file, ctx),
            TypeKind::Intersection(members) => self.convert_intersection(members, file, ctx),
        }
    }

    fn convert_nullable(
        &self,
        node: &TypeNode,
        inner: &TypeNode,
        file: &SourceFile,
        ctx: Context,
    ) -> Result<Conversion, ConvertError> {
        if !self.config.allow_nullable {
            return Err(file.error(
                ErrorKind::UnsupportedTypeKind,
                node.span,
                "maybe types unsupported",
            ));
        }

        if ctx.field_value {
            let inner = self.convert(inner, file, ctx)?;
            return Ok(Conversion::Optional(inner.into_expr()));
        }

        let inner = self.convert(inner, file, ctx.nested())?.into_expr();
        Ok(Conversion::Required(ValidatorExpr::call(
            self.primitive("oneOf"),
            vec![ValidatorExpr::Array(vec![
                ValidatorExpr::Literal(LiteralValue::Null),
                ValidatorExpr::Literal(LiteralValue::Undefined),
                inner,
            ])],
        )))
    }

    fn convert_object(
        &self,
        shape: &ObjectShape,
        file: &SourceFile,
        ctx: Context,
    ) -> Result<Conversion, ConvertError> {
        if let Some(call) = shape.call_properties.first() {
            return Err(file.error(
                ErrorKind::UnsupportedCallSignature,
                call.span,
                "Call signatures in object types are not supported",
            ));
        }

        match shape.indexers.as_slice() {
            [] => {}
            [indexer] => {
                if let Some(member) = shape.members.first() {
                    return Err(file.error(
                        ErrorKind::MixedShape,
                        member_span(member),
                        "Object types cannot mix named fields with an indexer",
                    ));
                }
                let value = self.convert(&indexer.value, file, ctx.nested())?.into_expr();
                return Ok(Conversion::Required(ValidatorExpr::call(
                    self.primitive("objectOf"),
                    vec![value],
                )));
            }
            [_, second, ..] => {
                return Err(file.error(
                    ErrorKind::MixedShape,
                    second.span,
                    "Object types with more than one indexer are not supported",
                ));
            }
        }

        let mut fields = FieldList::default();
        for member in &shape.members {
            match member {
                ObjectMember::Field(field) => fields.push(self.convert_field(field, file, &ctx)?),
                ObjectMember::Spread(spread) => fields.extend(self.convert_spread(spread, file)?),
            }
        }

        Ok(Conversion::Required(self.wrap_fields(fields.into_vec(), &ctx)))
    }

    fn convert_field(
        &self,
        field: &ObjectField,
        file: &SourceFile,
        ctx: &Context,
    ) -> Result<Field, ConvertError> {
        let value = self.convert(&field.value, file, ctx.field())?;
        let required = !field.optional && !value.is_optional();

        let mut comments = field.comments.clone();
        comments.extend(&field.value.comments);

        Ok(Field {
            key: field.key.clone(),
            value: value.into_expr(),
            required,
            comments,
        })
    }

    /// Fields contributed by `...T`. Without `$Exact` none of them is
    /// required, since the source object may lack any of them.
    fn convert_spread(
        &self,
        spread: &SpreadField,
        file: &SourceFile,
    ) -> Result<Vec<Field>, ConvertError> {
        let (argument, exact) = match exact_argument(&spread.argument) {
            Some(inner) => (inner, true),
            None => (&spread.argument, false),
        };

        let mut fields = self.field_map(argument, file, || {
            file.error(
                ErrorKind::UnsupportedTypeKind,
                spread.argument.span,
                format!("Cannot spread {} into an object type", argument.kind.name()),
            )
        })?;

        if !exact {
            for field in &mut fields {
                field.required = false;
            }
        }

        if let Some(first) = fields.first_mut() {
            let mut comments = spread.comments.clone();
            comments.extend(&first.comments);
            first.comments = comments;
        }

        Ok(fields)
    }

    fn convert_generic(
        &self,
        node: &TypeNode,
        reference: &GenericReference,
        file: &SourceFile,
        ctx: Context,
    ) -> Result<Conversion, ConvertError> {
        let id = match &reference.name {
            TypeName::Identifier(id) => id,
            TypeName::Qualified { .. } => {
                return Err(file.error(
                    ErrorKind::QualifiedIdentifierUnsupported,
                    node.span,
                    format!(
                        "Qualified type references are not supported: {}",
                        reference.name.dotted()
                    ),
                ));
            }
        };

        let Some(args) = &reference.type_args else {
            return self.convert_reference(id, file, ctx);
        };

        match (id.name.as_str(), args.as_slice()) {
            (ARRAY, [element]) => Ok(Conversion::Required(self.array_of(element, file, &ctx)?)),
            (EXACT, [inner]) => self.convert(inner, file, ctx),
            (CUSTOM_PROP_TYPE, [_, validator]) => self.convert(validator, file, ctx),
            (HAS_DEFAULT_PROP, [inner]) => {
                if !ctx.field_value {
                    return Err(file.error(
                        ErrorKind::IllegalEscapeHatchPlacement,
                        node.span,
                        "HasDefaultProp<T> can only be used directly as the type of an object field",
                    ));
                }
                let inner = self.convert(inner, file, ctx)?;
                Ok(Conversion::Optional(inner.into_expr()))
            }
            (ARRAY | EXACT | CUSTOM_PROP_TYPE | HAS_DEFAULT_PROP, _) => Err(file.error(
                ErrorKind::UnsupportedTypeKind,
                node.span,
                format!(
                    "Wrong number of type arguments for {}: {}",
                    id.name,
                    args.len()
                ),
            )),
            (name, _) => Err(file.error(
                ErrorKind::UnsupportedTypeKind,
                node.span,
                format!("No converter for generic type: {}<...>", name),
            )),
        }
    }

    fn convert_reference(
        &self,
        id: &Identifier,
        file: &SourceFile,
        ctx: Context,
    ) -> Result<Conversion, ConvertError> {
        match id.name.as_str() {
            FUNCTION_GLOBAL => return Ok(Conversion::Required(self.primitive("func"))),
            OBJECT_GLOBAL => return Ok(Conversion::Required(self.primitive("object"))),
            _ => {}
        }

        let binding = self.resolver.resolve(file, id)?;
        debug!(
            name = %id.name,
            binding = binding.describe(),
            file = file.path(),
            "resolved type reference"
        );
        self.convert_binding(binding, id, file, ctx)
    }

    fn convert_binding(
        &self,
        binding: Binding<'_>,
        id: &Identifier,
        file: &SourceFile,
        ctx: Context,
    ) -> Result<Conversion, ConvertError> {
        match binding {
            Binding::TypeAlias(alias) => {
                self.convert(&alias.right, file, ctx.without_replacement())
            }
            Binding::Interface(interface) => {
                self.convert_interface(interface, file, ctx.without_replacement())
            }
            Binding::Class(class) => self.convert_class(class, id, file, ctx),
            Binding::Value(value) => Err(file.error(
                ErrorKind::UnsupportedTypeKind,
                value.span,
                format!("'{}' is a value, not a type", value.name),
            )),
            Binding::Import(import) => self.convert_import(import, id, file, ctx),
        }
    }

    fn convert_interface(
        &self,
        interface: &InterfaceDeclaration,
        file: &SourceFile,
        ctx: Context,
    ) -> Result<Conversion, ConvertError> {
        if interface.extends.is_empty() {
            return self.convert(&interface.body, file, ctx);
        }

        let not_an_object = || {
            file.error(
                ErrorKind::UnsupportedTypeKind,
                interface.span,
                format!(
                    "Interface '{}' can only extend object types",
                    interface.id.name
                ),
            )
        };

        let mut fields = FieldList::default();
        for parent in &interface.extends {
            let parent = TypeNode::new(TypeKind::Generic(parent.clone()), interface.span);
            fields.extend(self.field_map(&parent, file, not_an_object)?);
        }
        fields.extend(self.field_map(&interface.body, file, not_an_object)?);

        Ok(Conversion::Required(self.wrap_fields(fields.into_vec(), &ctx)))
    }

    fn convert_class(
        &self,
        class: &ClassDeclaration,
        id: &Identifier,
        file: &SourceFile,
        ctx: Context,
    ) -> Result<Conversion, ConvertError> {
        let name = match (ctx.replacement, &class.id) {
            (Some(replacement), _) => replacement,
            (None, Some(class_id)) if self.is_root(file) => class_id.clone(),
            _ => {
                return Err(file.error(
                    ErrorKind::MissingReference,
                    class.span,
                    format!(
                        "Class '{}' is not imported into '{}'",
                        id.name,
                        self.root.path()
                    ),
                ));
            }
        };

        Ok(Conversion::Required(ValidatorExpr::call(
            self.primitive("instanceOf"),
            vec![ValidatorExpr::identifier(&name)],
        )))
    }

    fn convert_import(
        &self,
        import: &ImportBinding,
        id: &Identifier,
        file: &SourceFile,
        ctx: Context,
    ) -> Result<Conversion, ConvertError> {
        if import.kind == ImportKind::Typeof {
            return Err(file.error(
                ErrorKind::TypeofImportUnsupported,
                import.local.span,
                format!(
                    "typeof imports cannot be converted to prop types: {}",
                    import.local.name
                ),
            ));
        }

        let export_name = match &import.imported {
            Imported::Default => "default",
            Imported::Named(name) => name.as_str(),
            Imported::Namespace => {
                return Err(file.error(
                    ErrorKind::UnsupportedTypeKind,
                    import.local.span,
                    format!(
                        "Namespace import '{}' cannot be used as a type",
                        import.local.name
                    ),
                ));
            }
        };

        let target = self.resolver.load(file, import)?;
        let (owner, local) = self
            .resolver
            .locate_export(file, import, target, export_name)?;
        let binding = owner.binding(&local).ok_or_else(|| {
            file.error(
                ErrorKind::MissingReference,
                import.local.span,
                format!(
                    "Export '{}' of '{}' refers to '{}', which is not declared there",
                    export_name,
                    owner.path(),
                    local
                ),
            )
        })?;

        // only a name bound in the root file can stand in for the declaration
        let ctx = if ctx.replacement.is_none() && self.is_root(file) {
            let replacement = Identifier {
                name: import.local.name.clone(),
                span: id.span,
            };
            ctx.with_replacement(replacement)
        } else {
            ctx
        };

        self.convert_binding(binding, id, &owner, ctx)
    }

    fn convert_union(
        &self,
        members: &[TypeNode],
        file: &SourceFile,
        ctx: Context,
    ) -> Result<Conversion, ConvertError> {
        let literals: Option<Vec<(&TypeNode, &LiteralType)>> = members
            .iter()
            .map(|member| match &member.kind {
                TypeKind::Literal(literal) => Some((member, literal)),
                _ => None,
            })
            .collect();

        if let Some(literals) = literals {
            let mut values = Vec::with_capacity(literals.len());
            for (member, literal) in literals {
                self.check_literal(literal, member, file)?;
                values.push(literal::encode(literal));
            }
            return Ok(Conversion::Required(self.one_of(values)));
        }

        let validators = self.convert_all(members, file, &ctx)?;
        Ok(Conversion::Required(ValidatorExpr::call(
            self.primitive("oneOfType"),
            vec![ValidatorExpr::Array(validators)],
        )))
    }

    fn convert_intersection(
        &self,
        members: &[TypeNode],
        file: &SourceFile,
        ctx: Context,
    ) -> Result<Conversion, ConvertError> {
        if ctx.is_top_level() {
            let mut fields = FieldList::default();
            for member in members {
                fields.extend(self.field_map(member, file, || {
                    file.error(
                        ErrorKind::UnsupportedTopLevelIntersection,
                        member.span,
                        format!(
                            "Top-level intersections can only merge object types, found {}",
                            member.kind.name()
                        ),
                    )
                })?);
            }
            return Ok(Conversion::Required(ValidatorExpr::Object(fields.into_vec())));
        }

        let validators = self.convert_all(members, file, &ctx)?;
        let all = ValidatorExpr::identifier(&self.refs.all_combinator_ref());
        Ok(Conversion::Required(ValidatorExpr::call(all, validators)))
    }

    // ============ HELPERS ============

    /// Converts `node` at depth 0 and requires a bare field map
    fn field_map(
        &self,
        node: &TypeNode,
        file: &SourceFile,
        mismatch: impl FnOnce() -> ConvertError,
    ) -> Result<Vec<Field>, ConvertError> {
        let converted = self.convert(node, file, Context::top_level())?.into_expr();
        converted.into_fields().map_err(|_| mismatch())
    }

    fn convert_all(
        &self,
        members: &[TypeNode],
        file: &SourceFile,
        ctx: &Context,
    ) -> Result<Vec<ValidatorExpr>, ConvertError> {
        members
            .iter()
            .map(|member| {
                self.convert(member, file, ctx.nested())
                    .map(Conversion::into_expr)
            })
            .collect()
    }

    fn array_of(
        &self,
        element: &TypeNode,
        file: &SourceFile,
        ctx: &Context,
    ) -> Result<ValidatorExpr, ConvertError> {
        let element = self.convert(element, file, ctx.nested())?.into_expr();
        Ok(ValidatorExpr::call(self.primitive("arrayOf"), vec![element]))
    }

    fn wrap_fields(&self, fields: Vec<Field>, ctx: &Context) -> ValidatorExpr {
        let object = ValidatorExpr::Object(fields);
        if ctx.is_top_level() {
            object
        } else {
            ValidatorExpr::call(self.primitive("shape"), vec![object])
        }
    }

    fn one_of(&self, values: Vec<LiteralValue>) -> ValidatorExpr {
        let values = values.into_iter().map(ValidatorExpr::Literal).collect();
        ValidatorExpr::call(self.primitive("oneOf"), vec![ValidatorExpr::Array(values)])
    }

    fn primitive(&self, name: &str) -> ValidatorExpr {
        let namespace = self.refs.namespace_ref();
        ValidatorExpr::member(ValidatorExpr::identifier(&namespace), name)
    }

    fn check_literal(
        &self,
        literal: &LiteralType,
        node: &TypeNode,
        file: &SourceFile,
    ) -> Result<(), ConvertError> {
        if self.config.allow_nullable || !literal.is_nullish() {
            return Ok(());
        }
        let message = match literal {
            LiteralType::Void => "void types unsupported",
            _ => "null types unsupported",
        };
        Err(file.error(ErrorKind::UnsupportedTypeKind, node.span, message))
    }

    fn is_root(&self, file: &SourceFile) -> bool {
        file.path() == self.root.path()
    }
}

fn exact_argument(node: &TypeNode) -> Option<&TypeNode> {
    match &node.kind {
        TypeKind::Generic(GenericReference {
            name: TypeName::Identifier(id),
            type_args: Some(args),
        }) if id.name == EXACT => match args.as_slice() {
            [inner] => Some(inner),
            _ => None,
        },
        _ => None,
    }
}

fn member_span(member: &ObjectMember) -> crate::ast::Span {
    match member {
        ObjectMember::Field(field) => field.span,
        ObjectMember::Spread(spread) => spread.span,
    }
}
