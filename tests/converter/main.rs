//! Integration tests for the converter, organized by feature
//!
//! Every test builds a root file plus any imported files in a
//! [`MemoryLoader`] and checks the printed validator table.

mod objects;
mod references;

use flow_prop_types::ast::{Module, Statement, TypeNode};
use flow_prop_types::{
    ConvertConfig, ConvertError, MemoryLoader, Options, SourceFile, StaticRefs, ValidatorExpr,
    convert_type_to_validators,
};

pub const ROOT: &str = "/src/Foo.js";

/// A set of files the root file can import from
pub struct Fixture {
    loader: MemoryLoader,
    config: ConvertConfig,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            loader: MemoryLoader::new(),
            config: ConvertConfig::default(),
        }
    }

    pub fn config(mut self, config: ConvertConfig) -> Self {
        self.config = config;
        self
    }

    pub fn file(mut self, path: &str, body: Vec<Statement>) -> Self {
        self.loader.add(path, Module { body });
        self
    }

    /// Converts `props` as the annotation of a field in a root file with `body`
    pub fn convert(&self, body: Vec<Statement>, props: &TypeNode) -> Result<String, ConvertError> {
        let root = SourceFile::new(ROOT, Module { body });
        let refs = StaticRefs::new("_PropTypes", "_all");
        let options = Options {
            refs: &refs,
            loader: &self.loader,
            config: &self.config,
        };
        convert_type_to_validators(props, &root, &options)
            .map(|fields| ValidatorExpr::Object(fields).to_string())
    }
}

/// Printed table for `props` in an otherwise empty file
pub fn convert(props: TypeNode) -> String {
    convert_in(vec![], props)
}

#[allow(clippy::expect_used)]
pub fn convert_in(body: Vec<Statement>, props: TypeNode) -> String {
    Fixture::new()
        .convert(body, &props)
        .expect("conversion failed")
}

#[allow(clippy::panic)]
pub fn convert_err(body: Vec<Statement>, props: TypeNode) -> ConvertError {
    match Fixture::new().convert(body, &props) {
        Ok(table) => panic!("expected conversion to fail, got {}", table),
        Err(err) => err,
    }
}

/// `{\n  <line>,\n  <line>\n}` for single-line fields
pub fn table(lines: &[&str]) -> String {
    if lines.is_empty() {
        return "{}".to_string();
    }
    let body: Vec<String> = lines.iter().map(|line| format!("  {}", line)).collect();
    format!("{{\n{}\n}}", body.join(",\n"))
}
