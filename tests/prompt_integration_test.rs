//! Whole prompt sessions driven by scripted keystrokes.

use enquire::{
    choice::{ChoiceOptions, ChoiceSpec},
    config::{Mask, Question, Validity},
    error::{Error, Result},
    prompt::{ExternalEditor, Registry},
    readline::{Key, LineSource, ScriptedLineSource},
    Answers, PromptSession,
};
use serde_json::{json, Value};
use std::sync::{mpsc, Arc};
use std::thread;
use test_log::test;

fn session(lines: &[&str]) -> PromptSession<ScriptedLineSource> {
    PromptSession::new(ScriptedLineSource::from_lines(lines))
}

#[test]
fn test_input_and_confirm_end_to_end() {
    let mut session = session(&["x", ""]);
    let answers = session
        .run(
            vec![
                Question::new("input", "a").with_message("A?"),
                Question::new("confirm", "b").with_message("B?"),
            ],
            Answers::new(),
        )
        .unwrap();

    assert_eq!(answers.to_value(), json!({"a": "x", "b": true}));
    let output = session.source().plain_output();
    assert!(output.contains("A? x"));
    assert!(output.contains("B? Yes"));
}

#[test]
fn test_empty_submissions_take_defaults_and_when_sees_them() {
    let mut session = session(&["", ""]);
    let answers = session
        .run(
            vec![
                Question::new("input", "a").with_default("x"),
                Question::new("confirm", "b")
                    .with_default(true)
                    .with_when_fn(|answers| Ok(answers.get("a") == Some(&json!("x")))),
            ],
            Answers::new(),
        )
        .unwrap();

    assert_eq!(answers.to_value(), json!({"a": "x", "b": true}));
    assert_eq!(session.source().closes(), 1);
}

#[test]
fn test_disabled_questions_leave_no_key() {
    let answers = session(&["kept"])
        .run(
            vec![Question::new("input", "skipped").with_when(false), Question::new("input", "kept")],
            Answers::new(),
        )
        .unwrap();
    assert_eq!(answers.to_value(), json!({"kept": "kept"}));
    assert!(!answers.contains("skipped"));
}

#[test]
fn test_nested_answer_paths() {
    let answers = session(&["ali", "a@b.c", "admin"])
        .run(
            vec![
                Question::new("input", "user.name"),
                Question::new("input", "user['email']"),
                Question::new("input", "roles[0]"),
            ],
            Answers::new(),
        )
        .unwrap();
    assert_eq!(
        answers.to_value(),
        json!({"user": {"name": "ali", "email": "a@b.c"}, "roles": ["admin"]})
    );
}

#[test]
fn test_dynamic_fields_see_previous_answers() {
    let answers = session(&["ali", ""])
        .run(
            vec![
                Question::new("input", "name"),
                Question::new("input", "handle").with_default_fn(|answers: &Answers| {
                    let name = answers.get("name").and_then(Value::as_str).unwrap_or_default();
                    Ok(json!(format!("@{name}")))
                }),
            ],
            Answers::new(),
        )
        .unwrap();
    assert_eq!(answers.get("handle"), Some(&json!("@ali")));
}

#[test]
fn test_questions_from_a_channel() {
    let (sender, receiver) = mpsc::channel();
    let producer = thread::spawn(move || {
        for name in ["first", "second"] {
            sender.send(Question::new("input", name)).unwrap();
        }
    });

    let answers = session(&["1", "2"]).run(receiver, Answers::new()).unwrap();
    producer.join().unwrap();

    assert_eq!(answers.to_value(), json!({"first": "1", "second": "2"}));
}

#[test]
fn test_validation_is_retried_until_accepted() {
    let mut session = session(&["ab", "c"]);
    let answers = session
        .run(
            vec![Question::new("input", "code")
                .with_filter(|value: Value, _: &Answers| {
                    Ok(json!(value.as_str().unwrap_or_default().to_uppercase()))
                })
                .with_validate(|value: &Value, _: &Answers| -> anyhow::Result<Validity> {
                    Ok(if value.as_str().is_some_and(|s| s.len() >= 3) {
                        Validity::Valid
                    } else {
                        Validity::invalid("At least three letters")
                    })
                })],
            Answers::new(),
        )
        .unwrap();

    assert_eq!(answers.get("code"), Some(&json!("ABC")));
    assert!(session.source().plain_output().contains(">> At least three letters"));
}

#[test]
fn test_selection_widgets_in_one_session() {
    let mut source = ScriptedLineSource::new([]);
    source.push_keys([Key::Down, Key::Enter]);
    source.type_line("2");
    source.push_keys([Key::Char(' '), Key::Down, Key::Char(' '), Key::Enter]);
    source.type_line("m");

    let answers = PromptSession::new(source)
        .run(
            vec![
                Question::new("list", "size").with_choices(["small", "large"]),
                Question::new("rawlist", "crust").with_choices(["thin", "thick"]),
                Question::new("checkbox", "toppings").with_choices(["ham", "olives", "basil"]),
                Question::new("expand", "drink").with_choices(vec![ChoiceSpec::from(
                    ChoiceOptions::new("Mineral water").with_key("m").with_value("water"),
                )]),
            ],
            Answers::new(),
        )
        .unwrap();

    assert_eq!(
        answers.to_value(),
        json!({
            "size": "large",
            "crust": "thick",
            "toppings": ["ham", "olives"],
            "drink": "water"
        })
    );
}

#[test]
fn test_password_and_number() {
    let mut session = session(&["s3cret", "42"]);
    let answers = session
        .run(
            vec![
                Question::new("password", "secret").with_mask(Mask::Char('*')),
                Question::new("number", "age"),
            ],
            Answers::new(),
        )
        .unwrap();

    assert_eq!(answers.to_value(), json!({"secret": "s3cret", "age": 42}));
    let output = session.source().plain_output();
    assert!(output.contains("******"));
    assert!(!output.contains("s3cret"));
}

#[test]
fn test_already_answered_questions_are_skipped() {
    let initial = Answers::from_value(json!({"name": "ali"}));
    let answers = session(&["bob", "y"])
        .run(
            vec![
                Question::new("input", "name"),
                Question::new("input", "name").with_ask_answered(true),
                Question::new("confirm", "ok"),
            ],
            initial,
        )
        .unwrap();
    assert_eq!(answers.to_value(), json!({"name": "bob", "ok": true}));
}

struct UppercaseEditor;

impl ExternalEditor for UppercaseEditor {
    fn edit(&self, text: &str, _postfix: &str) -> Result<String> {
        Ok(format!("{}\n", text.to_uppercase()))
    }
}

#[test]
fn test_editor_through_a_custom_backend() {
    let mut registry = Registry::new();
    registry.set_editor(Arc::new(UppercaseEditor));
    let mut session =
        PromptSession::with_registry(ScriptedLineSource::from_lines([""]), registry);

    let answers = session
        .run(vec![Question::new("editor", "notes").with_default("draft")], Answers::new())
        .unwrap();

    assert_eq!(answers.get("notes"), Some(&json!("DRAFT\n")));
    assert!(!session.source().is_paused());
}

#[test]
fn test_expand_configuration_errors_abort_before_rendering() {
    let mut session = session(&["y"]);
    let err = session
        .run(
            vec![Question::new("expand", "conflict").with_choices(vec![
                ChoiceSpec::from(ChoiceOptions::new("Yes").with_key("y")),
                ChoiceSpec::from(ChoiceOptions::new("Yes!").with_key("y")),
            ])],
            Answers::new(),
        )
        .unwrap_err();

    assert!(matches!(err, Error::ConfigError(ref message) if message.contains("Duplicate")));
    assert!(session.source().transcript().is_empty());
    assert_eq!(session.source().closes(), 1);
}

#[test]
fn test_missing_choices_is_a_parameter_error() {
    let err = session(&[""])
        .run(vec![Question::new("list", "pick")], Answers::new())
        .unwrap_err();
    assert!(matches!(err, Error::MissingParameter { ref param } if param == "choices"));
}

#[test]
fn test_failing_when_aborts_the_run() {
    let err = session(&["a"])
        .run(
            vec![Question::new("input", "x").with_when_fn(|_| Err(anyhow::anyhow!("lookup failed")))],
            Answers::new(),
        )
        .unwrap_err();
    assert!(err.to_string().contains("lookup failed"));
}

#[test]
fn test_ctrl_c_interrupts_the_session() {
    let mut source = ScriptedLineSource::new([]);
    source.type_text("half");
    source.push_key(Key::Ctrl('c'));
    let mut session = PromptSession::new(source);

    let err = session.run(vec![Question::new("input", "x")], Answers::new()).unwrap_err();

    assert!(matches!(err, Error::Interrupted));
    assert_eq!(session.source().closes(), 1);
}

#[test]
fn test_unknown_types_fall_back_to_input() {
    let answers = session(&["typed"])
        .run(vec![Question::new("datepicker", "when")], Answers::new())
        .unwrap();
    assert_eq!(answers.get("when"), Some(&json!("typed")));
}
