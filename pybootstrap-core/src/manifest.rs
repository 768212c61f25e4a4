//! Bootstrap manifest
//!
//! Build-time description of what a launcher runs. The launcher's build
//! script reads it (plus a few environment overrides) and writes the result
//! out as Rust constants.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::config::ExitPolicy;
use crate::error::ManifestError;
use crate::snippet::Snippet;

/// Top-level manifest file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BootstrapManifest {
    #[serde(default)]
    pub bootstrap: BootstrapSection,
}

/// The `[bootstrap]` table.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BootstrapSection {
    /// Inline Python source
    pub source: Option<String>,
    /// `package.module` or `package.module:function`
    pub entrypoint: Option<String>,
    /// Script next to the executable
    pub execfile: Option<String>,
    /// Prepended to `sys.path` before the body runs
    #[serde(default)]
    pub search_path: Vec<String>,
    #[serde(default)]
    pub run_site: bool,
    pub exit_status: Option<ExitPolicy>,
}

impl BootstrapManifest {
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let content = fs::read_to_string(path).map_err(|source| ManifestError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ManifestError> {
        Ok(toml::from_str(content)?)
    }

    /// Generate the snippet body from whichever source kind is set.
    pub fn body(&self) -> Result<Snippet, ManifestError> {
        let section = &self.bootstrap;
        let found: Vec<&str> = [
            ("source", section.source.is_some()),
            ("entrypoint", section.entrypoint.is_some()),
            ("execfile", section.execfile.is_some()),
        ]
        .into_iter()
        .filter_map(|(name, set)| set.then_some(name))
        .collect();

        if found.len() > 1 {
            return Err(ManifestError::ConflictingSources {
                found: found.join(", "),
            });
        }

        if let Some(source) = &section.source {
            Ok(Snippet::inline(source.as_str()))
        } else if let Some(entrypoint) = &section.entrypoint {
            Snippet::entrypoint(entrypoint)
        } else if let Some(execfile) = &section.execfile {
            Ok(Snippet::execfile(execfile))
        } else {
            Err(ManifestError::MissingSource)
        }
    }
}

/// What ends up compiled into a launcher.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EmbeddedBootstrap {
    pub source: Option<String>,
    pub exit_policy: ExitPolicy,
}

impl EmbeddedBootstrap {
    /// Combine the build inputs. An inline source replaces the manifest's
    /// body but keeps its preamble; an explicit exit status wins over the
    /// manifest's.
    pub fn resolve(
        inline_source: Option<String>,
        manifest: Option<&BootstrapManifest>,
        exit_status: Option<&str>,
    ) -> Result<Self, ManifestError> {
        let source = match (inline_source, manifest) {
            (inline, Some(manifest)) => {
                let body = match inline {
                    Some(source) => Snippet::inline(source),
                    None => manifest.body()?,
                };
                let section = &manifest.bootstrap;
                Some(
                    body.with_preamble(&section.search_path, section.run_site)
                        .source()
                        .to_string(),
                )
            }
            (inline, None) => inline,
        };

        let exit_policy = match exit_status {
            Some(value) => value.parse()?,
            None => manifest
                .and_then(|m| m.bootstrap.exit_status)
                .unwrap_or_default(),
        };

        Ok(Self {
            source,
            exit_policy,
        })
    }

    /// Rust source defining `BOOTSTRAP_SOURCE` and `EXIT_POLICY`. The
    /// including module must have `ExitPolicy` in scope.
    pub fn to_rust_source(&self) -> String {
        let source = match &self.source {
            Some(source) => format!("Some({:?})", source),
            None => "None".to_string(),
        };
        format!(
            "pub const BOOTSTRAP_SOURCE: Option<&str> = {};\n\
             pub const EXIT_POLICY: ExitPolicy = ExitPolicy::{:?};\n",
            source, self.exit_policy
        )
    }
}
