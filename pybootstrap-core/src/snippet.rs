//! Embedded snippet
//!
//! The single piece of Python source a launcher executes. It is fixed when
//! the launcher is built; the helpers here generate the source for the
//! common bootstrap shapes (module entrypoint, script next to the executable).

use crate::error::ManifestError;

/// Source run when the build did not provide one.
pub const FALLBACK_SOURCE: &str = "print('Compiled without PYBOOTSTRAP_SOURCE.')";

/// Python source executed once in `__main__`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snippet {
    source: String,
}

impl Snippet {
    pub fn inline(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    pub fn fallback() -> Self {
        Self::inline(FALLBACK_SOURCE)
    }

    /// Snippet baked in at build time, or the fallback when there is none.
    pub fn from_build(source: Option<&str>) -> Self {
        source.map(Self::inline).unwrap_or_else(Self::fallback)
    }

    /// Run `package.module` as `__main__`, or call `package.module:function`.
    /// `sys.argv` is left as the launcher installed it.
    pub fn entrypoint(entrypoint: &str) -> Result<Self, ManifestError> {
        let mut parts = entrypoint.split(':');
        let module = parts.next().unwrap_or_default();
        let function = parts.next();
        if parts.next().is_some() || !is_dotted_name(module) {
            return Err(ManifestError::invalid_entrypoint(entrypoint));
        }

        let source = match function {
            None => format!(
                "import runpy\nrunpy.run_module({}, run_name='__main__', alter_sys=False)\n",
                python_literal(module)
            ),
            Some(function) if is_identifier(function) => format!(
                "import importlib\n_module = importlib.import_module({})\n_module.{}()\n",
                python_literal(module),
                function
            ),
            Some(_) => return Err(ManifestError::invalid_entrypoint(entrypoint)),
        };
        Ok(Self::inline(source))
    }

    /// Run a script that sits in the same directory as `sys.argv[0]`, as
    /// `__main__`, without rewriting `sys.argv`.
    pub fn execfile(file_name: &str) -> Self {
        Self::inline(format!(
            "import os\nimport sys\n\
             _path = os.path.join(os.path.dirname(os.path.abspath(sys.argv[0])), {})\n\
             with open(_path, 'rb') as _fh:\n    _code = compile(_fh.read(), _path, 'exec')\n\
             exec(_code, {{'__name__': '__main__', '__file__': _path, '__builtins__': __builtins__}})\n",
            python_literal(file_name)
        ))
    }

    /// Prepend `search_path` to `sys.path` before the body runs. With
    /// `run_site`, `site.main()` is then run by hand if start-up skipped it.
    pub fn with_preamble(self, search_path: &[String], run_site: bool) -> Self {
        if search_path.is_empty() && !run_site {
            return self;
        }

        let mut preamble = String::from("import sys\n");
        if !search_path.is_empty() {
            let entries: Vec<String> = search_path.iter().map(|p| python_literal(p)).collect();
            preamble.push_str(&format!("sys.path[0:0] = [{}]\n", entries.join(", ")));
        }
        if run_site {
            preamble.push_str("if sys.flags.no_site:\n    import site\n    site.main()\n");
        }
        preamble.push_str(&self.source);
        Self::inline(preamble)
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn is_fallback(&self) -> bool {
        self.source == FALLBACK_SOURCE
    }
}

/// Quote a string as a Python literal. JSON string syntax is a subset of
/// Python's.
pub fn python_literal(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}

fn is_dotted_name(name: &str) -> bool {
    name.split('.').all(is_identifier)
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c == '_' || c.is_alphabetic() => chars.all(|c| c == '_' || c.is_alphanumeric()),
        _ => false,
    }
}
