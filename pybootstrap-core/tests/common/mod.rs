//! Helpers shared by the interpreter tests.
//!
//! Each test binary brings the interpreter up at most once, so every file
//! under `tests/` holds a single launching test.

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use pybootstrap_core::snippet::python_literal;
use pybootstrap_core::Snippet;
use serde::de::DeserializeOwned;

/// Snippet that writes `expression`, serialized as JSON, to `path`.
pub fn dump_json(path: &Path, expression: &str) -> Snippet {
    let path = path.to_str().expect("temp path is not UTF-8");
    Snippet::inline(format!(
        "import json\nimport sys\nwith open({}, 'w') as fh:\n    json.dump({}, fh)\n",
        python_literal(path),
        expression
    ))
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> T {
    let content = fs::read_to_string(path).expect("snippet did not write its output");
    serde_json::from_str(&content).expect("snippet output is not valid JSON")
}
