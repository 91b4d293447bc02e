//! Module-level binding table
//!
//! Built once per file; lookups never mutate it. Entries point back into
//! the module body by statement index so bindings can borrow the
//! declarations they describe.

use rustc_hash::FxHashMap;

use crate::ast::{
    ClassDeclaration, ExportDeclaration, Identifier, ImportKind, ImportSpecifier,
    InterfaceDeclaration, Module, Statement, TypeAliasDeclaration,
};

/// Local name given to `export default class {}`
pub const ANONYMOUS_DEFAULT: &str = "default";

/// What an import binding pulls in
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Imported {
    Default,
    Named(String),
    Namespace,
}

/// An import, or a re-export normalized into one
#[derive(Debug, Clone, PartialEq)]
pub struct ImportBinding {
    pub local: Identifier,
    pub imported: Imported,
    pub source: String,
    pub kind: ImportKind,
}

/// A resolved name, borrowed from the file that declares it
#[derive(Debug, Clone, Copy)]
pub enum Binding<'a> {
    TypeAlias(&'a TypeAliasDeclaration),
    Interface(&'a InterfaceDeclaration),
    Class(&'a ClassDeclaration),
    /// `const`, `let`, `var` or `function`
    Value(&'a Identifier),
    Import(&'a ImportBinding),
}

impl Binding<'_> {
    pub fn describe(&self) -> &'static str {
        match self {
            Binding::TypeAlias(_) => "type alias",
            Binding::Interface(_) => "interface",
            Binding::Class(_) => "class",
            Binding::Value(_) => "value",
            Binding::Import(_) => "import",
        }
    }
}

#[derive(Debug, Clone)]
enum Entry {
    Declaration(usize),
    Value(Identifier),
    Import(ImportBinding),
}

#[derive(Debug, Clone, Default)]
pub struct Scope {
    entries: FxHashMap<String, Entry>,
}

impl Scope {
    pub fn build(module: &Module) -> Self {
        let mut scope = Scope::default();
        for (index, statement) in module.body.iter().enumerate() {
            scope.declare(statement, index);
        }
        scope
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Looks `name` up. `module` must be the module the scope was built from.
    pub fn lookup<'a>(&'a self, name: &str, module: &'a Module) -> Option<Binding<'a>> {
        match self.entries.get(name)? {
            Entry::Declaration(index) => declaration(module.body.get(*index)?),
            Entry::Value(id) => Some(Binding::Value(id)),
            Entry::Import(import) => Some(Binding::Import(import)),
        }
    }

    fn declare(&mut self, statement: &Statement, index: usize) {
        match statement {
            Statement::TypeAlias(alias) => self.insert(&alias.id.name, Entry::Declaration(index)),
            Statement::Interface(interface) => {
                self.insert(&interface.id.name, Entry::Declaration(index))
            }
            Statement::Class(class) => {
                if let Some(id) = &class.id {
                    self.insert(&id.name, Entry::Declaration(index));
                }
            }
            Statement::Variable(variable) => {
                for id in &variable.declarations {
                    self.insert(&id.name, Entry::Value(id.clone()));
                }
            }
            Statement::Function(function) => {
                if let Some(id) = &function.id {
                    self.insert(&id.name, Entry::Value(id.clone()));
                }
            }
            Statement::Import(import) => {
                for specifier in &import.specifiers {
                    let binding = import_binding(specifier, &import.source, import.kind);
                    let name = binding.local.name.clone();
                    self.insert(&name, Entry::Import(binding));
                }
            }
            Statement::Export(export) => self.declare_export(export, index),
            Statement::Other { .. } => {}
        }
    }

    fn declare_export(&mut self, export: &ExportDeclaration, index: usize) {
        match export {
            ExportDeclaration::Declaration(inner) => self.declare(inner, index),
            ExportDeclaration::DefaultDeclaration(inner) => match inner.as_ref() {
                Statement::Class(class) if class.id.is_none() => {
                    self.insert(ANONYMOUS_DEFAULT, Entry::Declaration(index))
                }
                other => self.declare(other, index),
            },
            // re-exports bind nothing; see `module::Export::Reexport`
            ExportDeclaration::Named { .. }
            | ExportDeclaration::DefaultIdentifier(_)
            | ExportDeclaration::All { .. } => {}
        }
    }

    fn insert(&mut self, name: &str, entry: Entry) {
        self.entries.insert(name.to_string(), entry);
    }
}

fn declaration(statement: &Statement) -> Option<Binding<'_>> {
    match statement {
        Statement::TypeAlias(alias) => Some(Binding::TypeAlias(alias)),
        Statement::Interface(interface) => Some(Binding::Interface(interface)),
        Statement::Class(class) => Some(Binding::Class(class)),
        Statement::Export(
            ExportDeclaration::Declaration(inner) | ExportDeclaration::DefaultDeclaration(inner),
        ) => declaration(inner),
        _ => None,
    }
}

fn import_binding(specifier: &ImportSpecifier, source: &str, kind: ImportKind) -> ImportBinding {
    let (imported, specifier_kind) = match specifier {
        ImportSpecifier::Named { imported, kind, .. } => {
            (Imported::Named(imported.name.clone()), *kind)
        }
        ImportSpecifier::Default { .. } => (Imported::Default, None),
        ImportSpecifier::Namespace { .. } => (Imported::Namespace, None),
    };
    ImportBinding {
        local: specifier.local().clone(),
        imported,
        source: source.to_string(),
        kind: specifier_kind.unwrap_or(kind),
    }
}
