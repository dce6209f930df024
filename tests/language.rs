mod common;

use std::fs;

use common::{calls_to, interpreter};
use pretty_assertions::assert_eq;
use visionscript::{
    error::{DiagnosticKind, Error},
    interpreter::value::core::Value,
    session::Session,
    vision::dry_run::DryRunVision,
};
use walkdir::WalkDir;

#[test]
fn demo_scripts_run() {
    let mut count = 0;

    for entry in WalkDir::new("demos").into_iter()
                                      .filter_map(Result::ok)
                                      .filter(|e| e.path().extension().is_some_and(|ext| ext == "vic"))
    {
        let path = entry.path();
        let script = fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        count += 1;
        if let Err(e) = visionscript::run_script(&script, Box::new(DryRunVision)) {
            panic!("Demo {path:?} failed:\n{script}\nError: {e}");
        }
    }

    assert!(count > 0, "No demo scripts found in demos/");
}

#[test]
fn load_detect_show() {
    let (mut interpreter, calls, _) = interpreter();
    interpreter.run("Load[\"img.png\"]\nDetect[]\nShow[]").unwrap();

    assert_eq!(interpreter.session.history_names(), ["load", "detect", "show"]);
    assert_eq!(interpreter.session.detections_stack.len(), 1);
    assert_eq!(interpreter.session.image_stack.len(), 1);
    assert_eq!(calls.borrow().last().unwrap(), "show img.png 1 boxes");
}

#[test]
fn misspelled_operation_suggests_the_real_one() {
    let (mut interpreter, ..) = interpreter();
    let error = interpreter.run("Sayy[\"hi\"]").unwrap_err();

    let diagnostic = error.diagnostic().unwrap();
    assert_eq!(diagnostic.kind, DiagnosticKind::UnknownFunction);
    assert_eq!(diagnostic.line, 1);
    assert!(diagnostic.suggestions.contains(&"Say".to_string()));
    assert!(matches!(error, Error::Parse(_)));
}

#[test]
fn unrelated_name_has_no_suggestions() {
    let (mut interpreter, ..) = interpreter();
    let error = interpreter.run("Xylophone[]").unwrap_err();

    assert!(error.diagnostic().unwrap().suggestions.is_empty());
    assert_eq!(error.to_string(), "Error on line 1: Function Xylophone does not exist.");
}

#[test]
fn inline_function_prints_when_run() {
    let (mut interpreter, _, out) = interpreter();
    interpreter.run("Make[Greet[]: Say[\"hi\"]]\nRun[Greet]").unwrap();

    assert_eq!(out.text(), "hi\n");
    assert_eq!(interpreter.session.output, Value::from("hi"));
}

#[test]
fn reset_restores_a_fresh_session() {
    let (mut interpreter, ..) = interpreter();
    interpreter.run("Load[\"a.png\"]\nDetect[\"person\"]\nSetConfidence[80]\nMake[F: Say[1]]\nx = 4\nReset[]")
               .unwrap();

    assert_eq!(interpreter.session, Session::new(50.0));
}

#[test]
fn loop_visits_every_file_in_a_directory() {
    let dir = tempfile::tempdir().unwrap();
    for name in ["a.png", "b.png", "c.png"] {
        fs::write(dir.path().join(name), b"").unwrap();
    }

    let (mut interpreter, calls, _) = interpreter();
    interpreter.run("Load[\"start.png\"]\n").unwrap();
    let before = interpreter.session.image_stack.len();

    let script = format!("In[\"{}\", x]\n    Load[x]\n    Detect[]\n", dir.path().display());
    interpreter.run(&script).unwrap();

    assert_eq!(calls_to(&calls, "detect"), 3);
    assert_eq!(interpreter.session.image_stack.len(), before + 3);
    assert!(interpreter.session.context_frame.is_none());

    let mut loaded = interpreter.session.image_stack[before..].iter()
                                                              .map(|image| image.name.clone())
                                                              .collect::<Vec<_>>();
    loaded.sort();
    let expected = ["a.png", "b.png", "c.png"].map(|name| dir.path().join(name).display().to_string());
    assert_eq!(loaded, expected);
}

#[test]
fn functions_see_variables_at_call_time() {
    let (mut interpreter, _, out) = interpreter();
    interpreter.run("x = 1\nMake[Show_x]\n    Say[x]\nx = 2\nRun[Show_x]").unwrap();

    assert_eq!(out.text(), "2\n");
}

#[test]
fn aliases_behave_like_their_operation() {
    let (mut aliased, ..) = interpreter();
    aliased.run("Load[\"a.png\"]\nFind[\"person\"]\nDescribe[]\nGetColors[2]").unwrap();

    let (mut canonical, ..) = interpreter();
    canonical.run("Load[\"a.png\"]\nDetect[\"person\"]\nCaption[]\nGetColours[2]").unwrap();

    assert_eq!(aliased.session, canonical.session);
    assert_eq!(aliased.session.history_names(), ["load", "detect", "caption", "getcolours"]);
}

#[test]
fn history_grows_by_one_per_call() {
    let (mut interpreter, ..) = interpreter();
    let statements = ["Load[\"a.png\"]", "Greyscale[]", "x = 3", "Size[]", "Say[x]", "Rotate[90]"];

    let mut previous = Vec::new();
    for statement in statements {
        interpreter.run(statement).unwrap();
        let history = interpreter.session.history_names();

        if statement.starts_with('x') {
            assert_eq!(history, previous);
        } else {
            assert!(history.starts_with(&previous));
            assert_eq!(history.len(), previous.len() + 1);
        }
        previous = history;
    }
}

#[test]
fn image_stack_never_shrinks() {
    let (mut interpreter, ..) = interpreter();
    let statements = ["Load[\"a.png\"]",
                      "Detect[]",
                      "Cutout[]",
                      "Load[\"b.png\"]",
                      "Paste[0, 0]",
                      "Blur[3]",
                      "Resize[10, 10]",
                      "Say[]"];

    let mut previous = 0;
    for statement in statements {
        interpreter.run(statement).unwrap();
        let len = interpreter.session.image_stack.len();
        assert!(len >= previous, "{statement} shrank the image stack");
        previous = len;
    }
}

#[test]
fn false_condition_stops_the_whole_script() {
    let (mut interpreter, _, out) = interpreter();
    interpreter.run("x = 1\nIf[x == 2]\n    Say[\"inside\"]\nSay[\"after\"]").unwrap();

    assert_eq!(out.text(), "");
    assert!(interpreter.halted());

    interpreter.run("Say[\"next script\"]").unwrap();
    assert_eq!(out.text(), "next script\n");
}

#[test]
fn true_condition_runs_its_body_and_carries_on() {
    let (mut interpreter, _, out) = interpreter();
    interpreter.run("x = 2\nIf[x == 2]\n    Say[\"inside\"]\nSay[\"after\"]").unwrap();

    assert_eq!(out.text(), "inside\nafter\n");
}

#[test]
fn failed_statement_keeps_earlier_effects() {
    let (mut interpreter, ..) = interpreter();
    let error = interpreter.run("Load[\"a.png\"]\nx = 1\nSimilarity[]").unwrap_err();

    assert_eq!(error.to_string(),
               "Error on line 3: Not enough images to compare. Needed 2, found 1.");
    assert_eq!(interpreter.session.image_stack.len(), 1);
    assert_eq!(interpreter.session.variables["x"], Value::Integer(1));
}

#[test]
fn parsing_is_deterministic() {
    let source = "Load[\"a.png\"]\nIf[Not[x == 1]]\n    Detect[\"cat\"]\nMake[F: Say[[1, 2.5]]]";

    assert_eq!(visionscript::parse(source).unwrap(), visionscript::parse(source).unwrap());
    assert_eq!(visionscript::parse("Say[").unwrap_err(), visionscript::parse("Say[").unwrap_err());
}
