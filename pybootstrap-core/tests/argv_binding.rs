use pybootstrap_core::{launch, ArgVector, LaunchConfig, LaunchError, SnippetOutcome, Variant};
use serde::Deserialize;

mod common;

#[derive(Deserialize)]
struct Observed {
    argv: Vec<String>,
    site: bool,
}

#[test]
fn test_snippet_sees_process_arguments_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("observed.json");
    let snippet = common::dump_json(&output, "{'argv': sys.argv, 'site': 'site' in sys.modules}");

    let config = LaunchConfig::new(Variant::ListBinding, snippet);
    let argv = ArgVector::new(["prog", "a", "b", "c"]);
    let report = launch(&config, &argv).unwrap();

    assert_eq!(report.outcome, SnippetOutcome::Completed);
    assert_eq!(report.exit_code, 0);

    let observed: Observed = common::read_json(&output);
    assert_eq!(observed.argv, vec!["prog", "a", "b", "c"]);
    assert!(observed.site, "site should be imported automatically");

    // The runtime is finalized now and cannot be brought up again.
    assert_eq!(launch(&config, &argv), Err(LaunchError::AlreadyInitialized));
}
