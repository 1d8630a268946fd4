use lcdfmt_core::Strictness;
use lcdfmt_harness::structured_log::{LogEmitter, LogLevel, validate_log_file};
use lcdfmt_harness::{FixtureSet, TestRunner};

const FIXTURE: &str = r#"{
    "version": "v1",
    "family": "printf/log",
    "captured_at": "2026-10-16T00:00:00Z",
    "cases": [
        {"name": "ok", "function": "printf", "section": "width", "inputs": {"format": "%3d", "args": [{"int": 7}]}, "expected_output": "  7", "mode": "both"},
        {"name": "wrong", "function": "printf", "section": "width", "inputs": {"format": "%3d", "args": [{"int": 7}]}, "expected_output": "7", "mode": "both"},
        {"name": "unsupported", "function": "sprintf", "section": "misc", "inputs": {}, "expected_output": "", "mode": "lenient"}
    ]
}"#;

#[test]
fn logged_runs_produce_valid_jsonl() {
    let path = std::env::temp_dir().join(format!("lcdfmt-log-{}.jsonl", std::process::id()));
    let set = FixtureSet::from_json(FIXTURE).unwrap();

    let mut emitter = LogEmitter::to_file(&path, "it").unwrap();
    emitter.emit(LogLevel::Info, "run_start").unwrap();
    let lenient = TestRunner::new("log", Strictness::Lenient)
        .run_logged(&set, &mut emitter)
        .unwrap();
    let strict = TestRunner::new("log", Strictness::Strict)
        .run_logged(&set, &mut emitter)
        .unwrap();
    emitter.flush().unwrap();
    drop(emitter);

    assert_eq!(lenient.len(), 3);
    assert_eq!(strict.len(), 2);
    assert_eq!(lenient.iter().filter(|r| r.passed).count(), 1);

    let (lines, errors) = validate_log_file(&path).unwrap();
    let content = std::fs::read_to_string(&path).unwrap();
    let _ = std::fs::remove_file(&path);

    assert_eq!(lines, 6);
    assert!(errors.is_empty(), "{:?}", errors.iter().map(ToString::to_string).collect::<Vec<_>>());
    assert!(content.contains(r#""outcome":"error""#));
    assert!(content.contains(r#""outcome":"fail""#));
    assert!(content.contains(r#""mode":"strict""#));
    assert!(content.contains("lcdfmt::it::006"));
}
