//! Binding resolution, local and across files

use std::rc::Rc;

use rustc_hash::FxHashSet;
use tracing::{debug, trace};

use crate::ast::Identifier;
use crate::error::{ConvertError, ErrorKind};
use crate::module::{Export, ModuleLoader, SourceFile};
use crate::scope::{Binding, ImportBinding, Imported};

pub struct Resolver<'a> {
    loader: &'a dyn ModuleLoader,
    resolution: Option<&'a serde_json::Value>,
}

impl<'a> Resolver<'a> {
    pub fn new(loader: &'a dyn ModuleLoader, resolution: Option<&'a serde_json::Value>) -> Self {
        Self { loader, resolution }
    }

    /// Binding of an identifier used in type position inside `file`
    pub fn resolve<'f>(
        &self,
        file: &'f SourceFile,
        id: &Identifier,
    ) -> Result<Binding<'f>, ConvertError> {
        file.binding(&id.name).ok_or_else(|| {
            file.error(
                ErrorKind::MissingReference,
                id.span,
                format!("Missing reference: {}", id.name),
            )
        })
    }

    /// Loads the module an import binding of `file` points at
    pub fn load(
        &self,
        file: &SourceFile,
        import: &ImportBinding,
    ) -> Result<Rc<SourceFile>, ConvertError> {
        let target = self
            .loader
            .load(&import.source, file, self.resolution)
            .map_err(|err| {
                file.error(ErrorKind::MissingReference, import.local.span, err.to_string())
            })?;
        debug!(
            source = %import.source,
            importer = file.path(),
            target = target.path(),
            "loaded module"
        );
        Ok(target)
    }

    /// Finds the file and local name behind `export_name` of `target`,
    /// following re-exports and `export * from` chains.
    pub fn locate_export(
        &self,
        file: &SourceFile,
        import: &ImportBinding,
        target: Rc<SourceFile>,
        export_name: &str,
    ) -> Result<(Rc<SourceFile>, String), ConvertError> {
        let source = Rc::clone(&target);
        let mut visited = FxHashSet::default();
        match self.find_export(import, target, export_name, &mut visited)? {
            Some(found) => Ok(found),
            None => Err(file.error(
                ErrorKind::MissingReference,
                import.local.span,
                format!(
                    "Module '{}' has no export named '{}'",
                    source.path(),
                    export_name
                ),
            )),
        }
    }

    /// `visited` holds `(path, export name)` pairs already searched, so
    /// barrels that re-export each other end the search instead of looping.
    fn find_export(
        &self,
        import: &ImportBinding,
        target: Rc<SourceFile>,
        export_name: &str,
        visited: &mut FxHashSet<(String, String)>,
    ) -> Result<Option<(Rc<SourceFile>, String)>, ConvertError> {
        if !visited.insert((target.path().to_string(), export_name.to_string())) {
            trace!(export_name, file = target.path(), "export cycle");
            return Ok(None);
        }

        match target.exports().get(export_name) {
            Some(Export::Local(local)) => {
                trace!(export_name, local = %local, file = target.path(), "matched export");
                let local = local.clone();
                return Ok(Some((target, local)));
            }
            Some(Export::Reexport(reexport)) => {
                let next = self.load_from(&target, &reexport.source, import)?;
                let imported = match &reexport.imported {
                    Imported::Named(name) => name.as_str(),
                    Imported::Default | Imported::Namespace => "default",
                };
                trace!(export_name, source = %reexport.source, imported, "following re-export");
                return self.find_export(import, next, imported, visited);
            }
            None => {}
        }

        // `export *` never forwards the default export
        if export_name == "default" {
            return Ok(None);
        }

        for star in target.star_exports() {
            let next = self.load_from(&target, star, import)?;
            if let Some(found) = self.find_export(import, next, export_name, visited)? {
                return Ok(Some(found));
            }
        }

        Ok(None)
    }

    fn load_from(
        &self,
        importer: &SourceFile,
        specifier: &str,
        import: &ImportBinding,
    ) -> Result<Rc<SourceFile>, ConvertError> {
        self.loader
            .load(specifier, importer, self.resolution)
            .map_err(|err| {
                importer.error(ErrorKind::MissingReference, import.local.span, err.to_string())
            })
    }
}
