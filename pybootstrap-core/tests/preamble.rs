use std::fs;

use pybootstrap_core::{launch, ArgVector, LaunchConfig, Snippet, SnippetOutcome, Variant};
use serde::Deserialize;

mod common;

#[derive(Deserialize)]
struct Observed {
    first_path: String,
    site: bool,
    no_site: i64,
    helper: String,
}

#[test]
fn test_search_path_is_prepended_and_site_runs_by_hand() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("observed.json");
    let lib = dir.path().join("lib");
    fs::create_dir(&lib).unwrap();
    fs::write(lib.join("boot_helper.py"), "VALUE = 'loaded from lib'\n").unwrap();

    let lib = lib.to_str().unwrap().to_string();
    let snippet = common::dump_json(
        &output,
        "{'first_path': sys.path[0], 'site': 'site' in sys.modules, \
         'no_site': sys.flags.no_site, 'helper': __import__('boot_helper').VALUE}",
    )
    .with_preamble(std::slice::from_ref(&lib), true);

    let config = LaunchConfig::new(Variant::NoSite, snippet);
    let report = launch(&config, &ArgVector::new(["prog"])).unwrap();
    assert_eq!(report.outcome, SnippetOutcome::Completed);

    let observed: Observed = common::read_json(&output);
    assert_eq!(observed.first_path, lib);
    assert_eq!(observed.no_site, 1);
    assert!(observed.site, "site.main() was not run by the preamble");
    assert_eq!(observed.helper, "loaded from lib");
}
