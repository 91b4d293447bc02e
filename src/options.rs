//! Converter inputs and plugin configuration

use serde::Deserialize;

use crate::ast::Identifier;
use crate::module::ModuleLoader;

/// Lazily requested names of the validator library.
///
/// The converter asks only when it emits a reference, so a host that adds
/// the import on first request never adds an unused one.
pub trait ValidatorRefs {
    /// Namespace holding the primitive validators, e.g. `PropTypes`
    fn namespace_ref(&self) -> Identifier;

    /// The "all of these must pass" combinator
    fn all_combinator_ref(&self) -> Identifier;
}

/// Fixed names, for hosts that manage imports themselves
#[derive(Debug, Clone)]
pub struct StaticRefs {
    pub namespace: Identifier,
    pub all_combinator: Identifier,
}

impl StaticRefs {
    pub fn new(namespace: &str, all_combinator: &str) -> Self {
        Self {
            namespace: Identifier::new(namespace),
            all_combinator: Identifier::new(all_combinator),
        }
    }
}

impl Default for StaticRefs {
    fn default() -> Self {
        Self::new("PropTypes", "all")
    }
}

impl ValidatorRefs for StaticRefs {
    fn namespace_ref(&self) -> Identifier {
        self.namespace.clone()
    }

    fn all_combinator_ref(&self) -> Identifier {
        self.all_combinator.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConvertConfig {
    /// When false, `null`, `void` and `?T` are rejected
    pub allow_nullable: bool,
    /// Passed through to the module loader untouched
    pub module_resolution: Option<serde_json::Value>,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            allow_nullable: true,
            module_resolution: None,
        }
    }
}

/// Everything one conversion needs from its host
pub struct Options<'a> {
    pub refs: &'a dyn ValidatorRefs,
    pub loader: &'a dyn ModuleLoader,
    pub config: &'a ConvertConfig,
}

/// A default import the host adds on demand
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportTarget {
    pub source: String,
    /// Base of the generated local name; `PropTypes` becomes `_PropTypes`
    pub name: String,
}

impl ImportTarget {
    pub fn new(source: &str, name: &str) -> Self {
        Self {
            source: source.to_string(),
            name: name.to_string(),
        }
    }
}

/// Host adapter configuration, deserializable from plugin options JSON
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PluginOptions {
    pub prop_types: ImportTarget,
    pub all_combinator: ImportTarget,
    /// Also convert typed `contextTypes` fields
    pub context_types: bool,
    #[serde(flatten)]
    pub convert: ConvertConfig,
}

impl Default for PluginOptions {
    fn default() -> Self {
        Self {
            prop_types: ImportTarget::new("prop-types", "PropTypes"),
            all_combinator: ImportTarget::new("prop-types-extra/lib/all", "all"),
            context_types: true,
            convert: ConvertConfig::default(),
        }
    }
}
