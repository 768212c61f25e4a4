use std::fs;

use pybootstrap_core::snippet::python_literal;
use pybootstrap_core::{launch, ArgVector, LaunchConfig, Snippet, SnippetOutcome, Variant};
use serde::Deserialize;

mod common;

#[derive(Deserialize)]
struct Observed {
    module: String,
    argv: Vec<String>,
}

#[test]
fn test_function_entrypoint_is_called_once() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("observed.json");
    let package = dir.path().join("bootpkg");
    fs::create_dir(&package).unwrap();
    fs::write(package.join("__init__.py"), "").unwrap();
    fs::write(
        package.join("cli.py"),
        format!(
            "import json\nimport os\nimport sys\n\n\
             def main():\n    \
             assert not os.path.exists({path})\n    \
             with open({path}, 'w') as fh:\n        \
             json.dump({{'module': __name__, 'argv': sys.argv}}, fh)\n    \
             return 5\n",
            path = python_literal(output.to_str().unwrap())
        ),
    )
    .unwrap();

    let search_path = vec![dir.path().to_str().unwrap().to_string()];
    let snippet = Snippet::entrypoint("bootpkg.cli:main")
        .unwrap()
        .with_preamble(&search_path, false);
    let config = LaunchConfig::new(Variant::NoSite, snippet);
    let argv = ArgVector::new(["prog", "--verbose"]);
    let report = launch(&config, &argv).unwrap();

    // The function's return value is discarded.
    assert_eq!(report.outcome, SnippetOutcome::Completed);
    assert_eq!(report.exit_code, 0);

    let observed: Observed = common::read_json(&output);
    assert_eq!(observed.module, "bootpkg.cli");
    assert_eq!(observed.argv, vec!["prog", "--verbose"]);
}
