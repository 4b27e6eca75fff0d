//! Session lifecycle and classpath integration tests.
//!
//! These tests drive the session API directly to cover:
//! - Start/close state transitions and idempotent close
//! - Working directory creation and removal
//! - Completion and bound-value lookup through the session
//! - Classpath filtering and module loading

use tether_tests::prelude::*;

fn started_session() -> Session {
    let mut session = Session::with_host(
        SessionConfig::new(),
        Box::new(JotInterpreter::new()),
        Box::new(StaticEnvironment::default()),
    );
    session.start().unwrap();
    session
}

#[test]
fn test_is_started_is_true_exactly_while_running() {
    let mut session = Session::with_host(
        SessionConfig::new(),
        Box::new(JotInterpreter::new()),
        Box::new(StaticEnvironment::default()),
    );

    assert!(!session.is_started());
    session.start().unwrap();
    assert!(session.is_started());
    session.close();
    assert!(!session.is_started());
    assert!(session.is_closed());
}

#[test]
fn test_close_never_panics_from_any_state() {
    // Close without start
    let mut session = Session::with_host(
        SessionConfig::new(),
        Box::new(JotInterpreter::new()),
        Box::new(StaticEnvironment::default()),
    );
    session.close();
    session.close();

    // Close twice after start
    let mut session = started_session();
    session.close();
    session.close();
}

#[test]
fn test_work_dir_exists_while_running_and_is_removed_on_close() {
    let mut session = started_session();

    let work_dir = session.work_dir().unwrap().to_path_buf();
    assert!(work_dir.is_dir());

    session.close();
    assert_eq!(session.work_dir(), None);
    assert!(!work_dir.exists());
}

#[test]
fn test_completion_after_a_dot_offers_member_names() {
    let mut session = started_session();
    session.execute("val xs = List(1)");

    let candidates = session.complete("xs.", 3);
    assert_eq!(candidates, vec!["head", "length", "size", "toString"]);

    let narrowed = session.complete("xs.le", 5);
    assert_eq!(narrowed, vec!["length"]);
}

#[test]
fn test_completion_without_a_dot_offers_bindings_and_keywords() {
    let mut session = started_session();
    session.execute("val value = 1");

    let candidates = session.complete("va", 2);
    assert!(candidates.contains(&"val".to_string()));
    assert!(candidates.contains(&"value".to_string()));
}

#[test]
fn test_bound_value_lookup_via_bind_and_execute() {
    let mut session = started_session();

    session.bind("seed", "Int", Value::Int(9), &[]).unwrap();
    assert_eq!(session.value_of_term("seed"), Some(Value::Int(9)));

    session.execute("seed + 1");
    assert_eq!(session.value_of_term("res0"), Some(Value::Int(10)));
    assert_eq!(session.value_of_term("nonexistent"), None);
}

mod classpath {
    use super::*;

    #[test]
    fn test_modules_load_and_self_artifacts_are_filtered() {
        Scenario::new("classpath_filtering")
            .module("helpers", "val shared = 21\nval doubled = shared * 2\n")
            .module("tether-util", "val hidden = 1\n")
            .module("jot-shim-extra", "val hidden = 2\n")
            .step("load_helpers", "load(\"helpers\")", |a| {
                a.text_contains("val shared").text_contains("val doubled")
            })
            .step("module_bindings_visible", "doubled", |a| {
                a.text("val res0: Int = 42")
            })
            .step("self_prefixed_entry_dropped", "load(\"tether-util\")", |a| {
                a.error("LoadError")
            })
            .step("conflict_marked_entry_dropped", "load(\"jot-shim-extra\")", |a| {
                a.error("LoadError")
            })
            .run()
            .unwrap();
    }

    #[test]
    fn test_module_errors_surface_with_module_context() {
        Scenario::new("module_errors")
            .module("broken", "val ok = 1\nmissing + 1\n")
            .step("load_broken", "load(\"broken\")", |a| {
                a.error("NameError").error_contains("not found: value missing")
            })
            .step("bindings_before_the_error_stick", "ok", |a| {
                a.text("val res0: Int = 1")
            })
            .run()
            .unwrap();
    }

    #[test]
    fn test_load_cycles_are_detected() {
        Scenario::new("load_cycles")
            .module("alpha", "load(\"beta\")\n")
            .module("beta", "load(\"alpha\")\n")
            .step("cycle", "load(\"alpha\")", |a| {
                a.error("LoadError").error_contains("alpha")
            })
            .run()
            .unwrap();
    }
}
