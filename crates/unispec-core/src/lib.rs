pub mod auth;
pub mod config;
pub mod dialect;
pub mod error;
pub mod mock;
pub mod model;
pub mod naming;
pub mod routing;
pub mod schema;
pub mod status;
pub mod text;

use std::io;

use text::NestedText;

/// A generated file: path plus lazily composed content.
#[derive(Debug, Clone)]
pub struct GeneratedFile {
    pub path: String,
    pub content: NestedText,
}

impl GeneratedFile {
    /// Stream the content into `out` fragment by fragment; the full file
    /// text is never materialized.
    pub fn write_to<W: io::Write>(&self, out: &mut W) -> io::Result<()> {
        self.content.write_to(out)
    }
}

/// Trait for code generators that produce files from the canonical model.
pub trait CodeGenerator {
    type Config;
    type Error: std::error::Error;
    fn generate(
        &self,
        api: &model::Api,
        config: &Self::Config,
    ) -> Result<Vec<GeneratedFile>, Self::Error>;
}
