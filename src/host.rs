//! Component host adapter
//!
//! Finds React component classes in a module, converts their typed
//! `props` (and `contextTypes`) fields and inserts the generated static
//! tables right after them. Validator library imports are added only when
//! a conversion asked for them.

use std::cell::RefCell;

use rustc_hash::FxHashSet;
use tracing::{debug, info};

use crate::ast::{
    ClassDeclaration, ClassMember, ClassProperty, Comments, ExportDeclaration, Expression,
    Identifier, ImportDeclaration, ImportKind, ImportSpecifier, Module, Span, Statement,
};
use crate::convert::convert_type_to_validators;
use crate::error::{ConvertError, ErrorKind};
use crate::module::{ModuleLoader, SourceFile};
use crate::options::{ImportTarget, Options, PluginOptions, ValidatorRefs};
use crate::scope::{Binding, Imported};
use crate::validator::ValidatorExpr;

const REACT_GLOBAL: &str = "React";
const REACT_MODULE: &str = "react";
const COMPONENT_BASES: [&str; 2] = ["Component", "PureComponent"];

/// A typed class field and the static table generated from it
const TABLES: [(&str, &str); 2] = [("props", "propTypes"), ("contextTypes", "contextTypes")];

/// The rewritten module and what was done to it
#[derive(Debug, Clone, PartialEq)]
pub struct Transformed {
    pub module: Module,
    pub components: Vec<ComponentReport>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComponentReport {
    /// `None` for `export default class extends ...`
    pub class_name: Option<String>,
    /// Name of the generated static property
    pub property: String,
    pub field_count: usize,
}

/// Rewrites every component class of `file`.
///
/// Fails on the first conversion error; no partial output is produced.
pub fn transform(
    file: &SourceFile,
    loader: &dyn ModuleLoader,
    options: &PluginOptions,
) -> Result<Transformed, ConvertError> {
    let tracker = ImportTracker::new(file, options);
    let convert_options = Options {
        refs: &tracker,
        loader,
        config: &options.convert,
    };

    let mut module = file.module().clone();
    let mut components = Vec::new();

    for (statement, original) in module.body.iter_mut().zip(&file.module().body) {
        let (Some(class), Some(original)) = (class_of_mut(statement), class_of(original)) else {
            continue;
        };
        let Some(super_class) = &original.super_class else {
            continue;
        };
        if !is_component_super_class(super_class, file) {
            continue;
        }

        let mut insertions = Vec::new();
        for (field_name, table_name) in TABLES {
            if field_name == "contextTypes" && !options.context_types {
                continue;
            }
            let Some((index, property)) = find_class_property(original, field_name) else {
                continue;
            };
            let Some(annotation) = &property.type_annotation else {
                return Err(file.error(
                    ErrorKind::MissingTypeAnnotation,
                    property.span,
                    format!("React component {} must have type annotation", field_name),
                ));
            };

            let fields = convert_type_to_validators(annotation, file, &convert_options)?;
            debug!(
                class = class_name(original).unwrap_or("default"),
                property = table_name,
                fields = fields.len(),
                "generated validator table"
            );
            components.push(ComponentReport {
                class_name: class_name(original).map(str::to_string),
                property: table_name.to_string(),
                field_count: fields.len(),
            });
            insertions.push((index, static_table(table_name, fields, property.span)));
        }

        // back to front so earlier indices stay valid
        insertions.sort_by(|a, b| b.0.cmp(&a.0));
        for (index, member) in insertions {
            class.body.insert(index + 1, member);
        }
    }

    let mut imports = tracker.into_imports();
    if !imports.is_empty() {
        info!(file = file.path(), imports = imports.len(), "adding validator imports");
        imports.append(&mut module.body);
        module.body = imports;
    }

    Ok(Transformed { module, components })
}

/// Whether `super_class` names a React component base.
///
/// Accepted: `React.Component` with `React` global or default-imported from
/// `react`, and `Component` named-imported from `react`. The same holds for
/// `PureComponent`.
pub fn is_component_super_class(super_class: &Expression, file: &SourceFile) -> bool {
    match super_class {
        Expression::Member { object, property } => {
            let Expression::Identifier(object) = object.as_ref() else {
                return false;
            };
            let object_ok = match file.binding(&object.name) {
                None => object.name == REACT_GLOBAL,
                Some(Binding::Import(import)) => {
                    import.imported == Imported::Default && import.source == REACT_MODULE
                }
                Some(_) => false,
            };
            object_ok && COMPONENT_BASES.contains(&property.name.as_str())
        }
        Expression::Identifier(id) => match file.binding(&id.name) {
            Some(Binding::Import(import)) => {
                import.source == REACT_MODULE
                    && matches!(&import.imported, Imported::Named(name) if COMPONENT_BASES.contains(&name.as_str()))
            }
            _ => false,
        },
        Expression::Validators(_) | Expression::Other { .. } => false,
    }
}

/// First non-computed instance property called `name`, with its member index
pub fn find_class_property<'a>(
    class: &'a ClassDeclaration,
    name: &str,
) -> Option<(usize, &'a ClassProperty)> {
    class
        .body
        .iter()
        .enumerate()
        .find_map(|(index, member)| match member {
            ClassMember::Property(property)
                if !property.computed && !property.static_ && property.key.name == name =>
            {
                Some((index, property))
            }
            _ => None,
        })
}

fn static_table(name: &str, fields: Vec<crate::validator::Field>, span: Span) -> ClassMember {
    ClassMember::Property(ClassProperty {
        key: Identifier { name: name.to_string(), span },
        value: Some(Expression::Validators(ValidatorExpr::Object(fields))),
        type_annotation: None,
        computed: false,
        static_: true,
        span,
        comments: Comments::default(),
    })
}

fn class_of(statement: &Statement) -> Option<&ClassDeclaration> {
    match statement {
        Statement::Class(class) => Some(class),
        Statement::Export(
            ExportDeclaration::Declaration(inner) | ExportDeclaration::DefaultDeclaration(inner),
        ) => class_of(inner),
        _ => None,
    }
}

fn class_of_mut(statement: &mut Statement) -> Option<&mut ClassDeclaration> {
    match statement {
        Statement::Class(class) => Some(class),
        Statement::Export(
            ExportDeclaration::Declaration(inner) | ExportDeclaration::DefaultDeclaration(inner),
        ) => class_of_mut(inner),
        _ => None,
    }
}

fn class_name(class: &ClassDeclaration) -> Option<&str> {
    class.id.as_ref().map(|id| id.name.as_str())
}

// ============ IMPORTS ============

/// Hands out validator library references, creating each import once
struct ImportTracker<'a> {
    file: &'a SourceFile,
    options: &'a PluginOptions,
    namespace: RefCell<Option<Identifier>>,
    all_combinator: RefCell<Option<Identifier>>,
    taken: RefCell<FxHashSet<String>>,
}

impl<'a> ImportTracker<'a> {
    fn new(file: &'a SourceFile, options: &'a PluginOptions) -> Self {
        Self {
            file,
            options,
            namespace: RefCell::new(None),
            all_combinator: RefCell::new(None),
            taken: RefCell::new(FxHashSet::default()),
        }
    }

    fn get_or_add(&self, slot: &RefCell<Option<Identifier>>, target: &ImportTarget) -> Identifier {
        if let Some(id) = slot.borrow().as_ref() {
            return id.clone();
        }
        let id = Identifier::new(self.unique_name(&target.name));
        debug!(source = %target.source, local = %id.name, "requested validator import");
        *slot.borrow_mut() = Some(id.clone());
        id
    }

    /// `_name`, then `_name2`, `_name3`, ... until unused in the file
    fn unique_name(&self, base: &str) -> String {
        let mut taken = self.taken.borrow_mut();
        let base = format!("_{}", base);
        let mut candidate = base.clone();
        let mut counter = 1;
        while self.file.scope().contains(&candidate) || taken.contains(&candidate) {
            counter += 1;
            candidate = format!("{}{}", base, counter);
        }
        taken.insert(candidate.clone());
        candidate
    }

    /// Import statements for every reference handed out, namespace first
    fn into_imports(self) -> Vec<Statement> {
        let requested = [
            (self.namespace.into_inner(), &self.options.prop_types),
            (self.all_combinator.into_inner(), &self.options.all_combinator),
        ];
        requested
            .into_iter()
            .filter_map(|(local, target)| {
                local.map(|local| {
                    Statement::Import(ImportDeclaration {
                        specifiers: vec![ImportSpecifier::Default { local }],
                        source: target.source.clone(),
                        kind: ImportKind::Value,
                        span: Span::default(),
                    })
                })
            })
            .collect()
    }
}

impl ValidatorRefs for ImportTracker<'_> {
    fn namespace_ref(&self) -> Identifier {
        self.get_or_add(&self.namespace, &self.options.prop_types)
    }

    fn all_combinator_ref(&self) -> Identifier {
        self.get_or_add(&self.all_combinator, &self.options.all_combinator)
    }
}
