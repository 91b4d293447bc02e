//! Source files, export normalization and the module loading port

use std::rc::Rc;

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use serde::Deserialize;
use tracing::debug;

use crate::ast::{ExportDeclaration, ImportKind, Module, Span, Statement};
use crate::error::{ConvertError, ErrorKind, LoadError};
use crate::scope::{ANONYMOUS_DEFAULT, Binding, ImportBinding, Imported, Scope};

/// What an external export name stands for
#[derive(Debug, Clone, PartialEq)]
pub enum Export {
    /// A name bound in the exporting file
    Local(String),
    /// `export {imported as name} from "source"`; binds nothing locally
    Reexport(ImportBinding),
}

/// A module together with the tables built from it once
#[derive(Debug, Clone)]
pub struct SourceFile {
    path: String,
    module: Module,
    scope: Scope,
    /// external name → export, in source order
    exports: IndexMap<String, Export>,
    /// sources of `export * from` statements, in source order
    star_exports: Vec<String>,
}

impl SourceFile {
    pub fn new(path: impl Into<String>, module: Module) -> Self {
        let scope = Scope::build(&module);
        let (exports, star_exports) = normalize_exports(&module);
        SourceFile {
            path: path.into(),
            module,
            scope,
            exports,
            star_exports,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn module(&self) -> &Module {
        &self.module
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn exports(&self) -> &IndexMap<String, Export> {
        &self.exports
    }

    pub fn star_exports(&self) -> &[String] {
        &self.star_exports
    }

    pub fn binding(&self, name: &str) -> Option<Binding<'_>> {
        self.scope.lookup(name, &self.module)
    }

    /// Positions a failure inside this file
    pub fn error(&self, kind: ErrorKind, span: Span, message: impl Into<String>) -> ConvertError {
        ConvertError::at(kind, Some(&self.path), span, message)
    }
}

/// Flattens every export form into one list keyed by external name.
fn normalize_exports(module: &Module) -> (IndexMap<String, Export>, Vec<String>) {
    let mut exports = IndexMap::new();
    let mut stars = Vec::new();

    for statement in &module.body {
        let Statement::Export(export) = statement else {
            continue;
        };
        match export {
            ExportDeclaration::Declaration(inner) => {
                for name in declared_names(inner) {
                    exports.insert(name.clone(), Export::Local(name));
                }
            }
            ExportDeclaration::DefaultDeclaration(inner) => {
                let local = declared_names(inner)
                    .into_iter()
                    .next()
                    .unwrap_or_else(|| ANONYMOUS_DEFAULT.to_string());
                exports.insert("default".to_string(), Export::Local(local));
            }
            ExportDeclaration::DefaultIdentifier(id) => {
                exports.insert("default".to_string(), Export::Local(id.name.clone()));
            }
            ExportDeclaration::Named { specifiers, source } => {
                for specifier in specifiers {
                    let export = match source {
                        Some(source) => Export::Reexport(ImportBinding {
                            local: specifier.exported.clone(),
                            imported: Imported::Named(specifier.local.name.clone()),
                            source: source.clone(),
                            kind: ImportKind::Value,
                        }),
                        None => Export::Local(specifier.local.name.clone()),
                    };
                    exports.insert(specifier.exported.name.clone(), export);
                }
            }
            ExportDeclaration::All { source } => stars.push(source.clone()),
        }
    }

    (exports, stars)
}

fn declared_names(statement: &Statement) -> Vec<String> {
    match statement {
        Statement::TypeAlias(alias) => vec![alias.id.name.clone()],
        Statement::Interface(interface) => vec![interface.id.name.clone()],
        Statement::Class(class) => class.id.iter().map(|id| id.name.clone()).collect(),
        Statement::Function(function) => function.id.iter().map(|id| id.name.clone()).collect(),
        Statement::Variable(variable) => variable
            .declarations
            .iter()
            .map(|id| id.name.clone())
            .collect(),
        Statement::Import(_) | Statement::Export(_) | Statement::Other { .. } => vec![],
    }
}

// ============ LOADING ============

/// Host-supplied capability that reads and parses another module.
///
/// Loading must be idempotent: asking twice for the same specifier from the
/// same importer yields semantically identical files.
pub trait ModuleLoader {
    fn load(
        &self,
        specifier: &str,
        importer: &SourceFile,
        resolution: Option<&serde_json::Value>,
    ) -> Result<Rc<SourceFile>, LoadError>;
}

/// Options understood by [`MemoryLoader`], read from `moduleResolution`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResolutionOptions {
    /// Tried in order after the exact path
    pub extensions: Vec<String>,
}

impl Default for ResolutionOptions {
    fn default() -> Self {
        Self {
            extensions: vec![".js".to_string(), ".jsx".to_string()],
        }
    }
}

impl ResolutionOptions {
    pub fn from_value(value: Option<&serde_json::Value>) -> Result<Self, LoadError> {
        match value {
            Some(value) => serde_json::from_value(value.clone())
                .map_err(|err| LoadError::InvalidOptions(err.to_string())),
            None => Ok(Self::default()),
        }
    }
}

/// Loader over files registered up front, keyed by path
#[derive(Debug, Default)]
pub struct MemoryLoader {
    files: FxHashMap<String, Rc<SourceFile>>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `module` under `path` and returns the built file.
    pub fn add(&mut self, path: impl Into<String>, module: Module) -> Rc<SourceFile> {
        let file = Rc::new(SourceFile::new(path, module));
        self.files.insert(file.path().to_string(), Rc::clone(&file));
        file
    }
}

impl ModuleLoader for MemoryLoader {
    fn load(
        &self,
        specifier: &str,
        importer: &SourceFile,
        resolution: Option<&serde_json::Value>,
    ) -> Result<Rc<SourceFile>, LoadError> {
        let options = ResolutionOptions::from_value(resolution)?;
        let base = resolve_specifier(importer.path(), specifier);

        let mut candidates = vec![base.clone()];
        candidates.extend(options.extensions.iter().map(|ext| format!("{}{}", base, ext)));
        candidates.extend(
            options
                .extensions
                .iter()
                .map(|ext| format!("{}/index{}", base, ext)),
        );

        for candidate in &candidates {
            if let Some(file) = self.files.get(candidate) {
                debug!(specifier, importer = importer.path(), path = %candidate, "resolved module");
                return Ok(Rc::clone(file));
            }
        }

        Err(LoadError::NotFound {
            specifier: specifier.to_string(),
            importer: importer.path().to_string(),
        })
    }
}

/// Joins relative specifiers onto the importer's directory; bare
/// specifiers are returned unchanged.
pub fn resolve_specifier(importer: &str, specifier: &str) -> String {
    if !(specifier.starts_with("./") || specifier.starts_with("../")) {
        return specifier.to_string();
    }

    let mut parts: Vec<&str> = importer.split('/').collect();
    parts.pop();
    for segment in specifier.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                parts.pop();
            }
            segment => parts.push(segment),
        }
    }
    parts.join("/")
}
