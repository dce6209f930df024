mod common;

use std::{env, fs};

use common::interpreter;
use pretty_assertions::assert_eq;
use visionscript::error::{Error, RuntimeError};

// Imports resolve against the working directory, so this binary holds a
// single test.
#[test]
fn imported_scripts_share_the_session() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("helpers.vic"), "Make[Greet]\n    Say[greeting]\ngreeting = \"hello\"\n").unwrap();
    fs::write(dir.path().join("guarded.vic"), "ready = False\nIf[ready]\n    Say[\"unreachable\"]\n").unwrap();
    fs::write(dir.path().join("broken.vic"), "Say[\n").unwrap();
    fs::write(dir.path().join("itself.vic"), "Import[\"itself\"]\n").unwrap();
    env::set_current_dir(dir.path()).unwrap();

    let (mut interpreter, _, out) = interpreter();
    interpreter.run("Import[\"helpers\"]\nRun[Greet]\nImport[\"guarded\"]\nSay[\"after\"]").unwrap();

    assert_eq!(out.text(), "hello\nafter\n");
    assert_eq!(interpreter.session.history_names(), ["import", "say", "import", "say"]);
    assert!(!interpreter.halted());

    let error = interpreter.run("Import[\"../helpers\"]\nImport[\"broken\"]").unwrap_err();
    assert!(matches!(error, Error::Runtime(RuntimeError::Import { line: 2, .. })));

    let error = interpreter.run("Import[\"missing\"]").unwrap_err();
    assert!(matches!(error, Error::Runtime(RuntimeError::ImportRead { line: 1, .. })));

    let error = interpreter.run("Import[\"itself\"]").unwrap_err();
    assert!(matches!(error,
                     Error::Runtime(RuntimeError::RecursionLimit { ref name, .. }) if name == "itself.vic"));
    interpreter.run("Say[\"recovered\"]").unwrap();
}
