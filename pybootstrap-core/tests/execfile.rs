use std::fs;

use pybootstrap_core::snippet::python_literal;
use pybootstrap_core::{launch, ArgVector, LaunchConfig, Snippet, SnippetOutcome, Variant};
use serde::Deserialize;

mod common;

#[derive(Deserialize)]
struct Observed {
    name: String,
    file: String,
    argv: Vec<String>,
}

#[test]
fn test_script_next_to_executable_runs_as_main_with_process_argv() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("observed.json");
    let script = dir.path().join("app_main.py");
    fs::write(
        &script,
        format!(
            "import json\nimport sys\nwith open({}, 'w') as fh:\n    \
             json.dump({{'name': __name__, 'file': __file__, 'argv': sys.argv}}, fh)\n",
            python_literal(output.to_str().unwrap())
        ),
    )
    .unwrap();

    let program = dir.path().join("prog");
    let program = program.to_str().unwrap();
    let argv = ArgVector::new([program, "a", "--flag"]);
    let config = LaunchConfig::new(Variant::ListBinding, Snippet::execfile("app_main.py"));
    let report = launch(&config, &argv).unwrap();
    assert_eq!(report.outcome, SnippetOutcome::Completed);

    let observed: Observed = common::read_json(&output);
    assert_eq!(observed.name, "__main__");
    assert_eq!(observed.file, script.to_str().unwrap());
    assert_eq!(observed.argv, vec![program, "a", "--flag"]);
}
