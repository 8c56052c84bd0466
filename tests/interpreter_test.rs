use color_eyre::eyre::{Context, Result};
use std::fs::{create_dir, read_to_string, File};

use enescript::interpreter::{
    context::{Event, HostContext, RecordingContext},
    diagnostic::Diagnostic,
    error::{CoercionError, RuntimeError, RuntimeErrorKind},
    run_source, EnvironmentQuery, RunReport, StatementOutcome, TreeWalkInterpreter,
};
use enescript::parser::{
    statement::{DialogueStatement, Program, Statement},
    Parser,
};
use enescript::system::{DryRunActions, SystemEnvironment};

fn run(source: &str, context: &mut RecordingContext) -> Result<RunReport> {
    Ok(run_source(source, context)?)
}

#[test]
fn test_dialogue_loses_quote_markers() -> Result<()> {
    let mut context = RecordingContext::new();
    let report = run("「こんにちは」\n「外「内」外」", &mut context)?;
    assert_eq!(context.dialogue(), vec!["こんにちは", "外「内」外"]);
    assert!(context.diagnostics().is_empty());
    assert_eq!(report.executed, 2);
    Ok(())
}

#[test]
fn test_numeric_string_compares_as_number() -> Result<()> {
    let mut context = RecordingContext::new();
    run("※「10」 ≥ 10 「ok」", &mut context)?;
    assert_eq!(context.dialogue(), vec!["ok"]);
    assert!(context.diagnostics().is_empty());
    Ok(())
}

#[test]
fn test_unknown_command_is_ignored() -> Result<()> {
    let mut context = RecordingContext::new();
    let report = run("存在しない命令 a：1", &mut context)?;
    assert!(context.actions().is_empty());
    assert_eq!(
        context.diagnostics(),
        vec![&Diagnostic::UnknownCommand {
            name: "存在しない命令".into(),
            line: 1
        }]
    );
    assert_eq!(report.ignored, 1);
    Ok(())
}

#[test]
fn test_false_guard_skips_body() -> Result<()> {
    let mut context = RecordingContext::new();
    let report = run("※ 1 ＞ 2 マウス入力を無効化", &mut context)?;
    assert!(context.actions().is_empty());
    assert_eq!(report.skipped, 1);
    assert_eq!(report.executed, 0);
    Ok(())
}

#[test]
fn test_true_guard_runs_body() -> Result<()> {
    let mut context = RecordingContext::new();
    run("※ 2 ＞ 1\n　　マウス入力を無効化\n マウス入力を有効化", &mut context)?;
    assert_eq!(
        context.actions(),
        vec![&Event::InputBlocked(true), &Event::InputBlocked(false)]
    );
    Ok(())
}

#[test]
fn test_logical_operators_evaluate_both_sides() -> Result<()> {
    let mut context = RecordingContext::new();
    run(
        "※ ファイル（パス：「a」）＞ 100 かつ ファイル（パス：「b」）＞ 100 「x」",
        &mut context,
    )?;
    assert_eq!(context.directory_queries(), 2);
    assert!(context.dialogue().is_empty());

    let mut context = RecordingContext::new().with_directory("a", 1);
    run(
        "※ ファイル（パス：「a」）＝ 1 または ファイル（パス：「b」）＝ 1 「y」",
        &mut context,
    )?;
    assert_eq!(context.directory_queries(), 2);
    assert_eq!(context.dialogue(), vec!["y"]);
    Ok(())
}

#[test]
fn test_keyed_argument_wins_over_first() -> Result<()> {
    let mut context = RecordingContext::new().with_directory("X", 12);
    run("※ファイル（数　パス：「X」）≥１０ 「多い」", &mut context)?;
    assert_eq!(context.dialogue(), vec!["多い"]);
    assert_eq!(context.events()[0], Event::DirectoryQuery("X".into()));
    Ok(())
}

#[test]
fn test_first_argument_without_key() -> Result<()> {
    let mut context = RecordingContext::new().with_directory("X", 3);
    run("※ファイル（「X」）＝ 3 「三つ」", &mut context)?;
    assert_eq!(context.dialogue(), vec!["三つ"]);
    Ok(())
}

#[test]
fn test_desktop_cleanup() -> Result<()> {
    let source = "※ファイル（パス：「C:\\Users\\Desktop」）≥１０\n「デスクトップが散らかってるね」\nマウス入力を無効化";

    let mut context = RecordingContext::new().with_directory("C:\\Users\\Desktop", 12);
    run(source, &mut context)?;
    assert_eq!(context.dialogue(), vec!["デスクトップが散らかってるね"]);
    assert_eq!(context.actions(), vec![&Event::InputBlocked(true)]);

    let mut context = RecordingContext::new().with_directory("C:\\Users\\Desktop", 3);
    run(source, &mut context)?;
    assert!(context.dialogue().is_empty());
    assert_eq!(context.actions(), vec![&Event::InputBlocked(true)]);
    Ok(())
}

#[test]
fn test_grouped_guard_with_extra_argument() -> Result<()> {
    let source = "※（ファイル（数　パス：「X」）＞＝１０）\n「整理しましょうよ」";
    for (entries, expected) in [(12, vec!["整理しましょうよ"]), (3, vec![])] {
        let mut context = RecordingContext::new().with_directory("X", entries);
        run(source, &mut context)?;
        assert_eq!(context.dialogue(), expected, "{entries} entries");
    }
    Ok(())
}

#[test]
fn test_duplicate_key_last_write_wins() -> Result<()> {
    let mut context = RecordingContext::new();
    run("アプリケーションを開く パス：「a」 パス：「b」", &mut context)?;
    assert_eq!(context.actions(), vec![&Event::OpenPath("b".into())]);
    Ok(())
}

#[test]
fn test_missing_argument_fails_statement_only() -> Result<()> {
    let mut context = RecordingContext::new();
    let report = run("アプリケーションを開く\n「続き」", &mut context)?;
    assert!(context.actions().is_empty());
    assert_eq!(context.dialogue(), vec!["続き"]);
    assert_eq!(
        context.diagnostics(),
        vec![&Diagnostic::Failed(RuntimeError {
            kind: RuntimeErrorKind::MissingArgument {
                command: "アプリケーションを開く".into(),
                key: "パス",
            },
            line: 1,
        })]
    );
    assert_eq!(
        report,
        RunReport {
            executed: 1,
            skipped: 0,
            ignored: 0,
            failed: 1
        }
    );
    Ok(())
}

#[test]
fn test_unexpected_argument_is_ignored() -> Result<()> {
    let mut context = RecordingContext::new();
    run("マウス入力を無効化 速さ：3", &mut context)?;
    assert_eq!(context.actions(), vec![&Event::InputBlocked(true)]);
    assert!(context.diagnostics().is_empty());
    Ok(())
}

#[test]
fn test_non_boolean_guard_is_false() -> Result<()> {
    let mut context = RecordingContext::new();
    run("※ 「abc」 「x」\n※ 「TRUE」 「y」", &mut context)?;
    assert_eq!(context.dialogue(), vec!["y"]);
    assert_eq!(
        context.diagnostics(),
        vec![&Diagnostic::Coercion {
            error: CoercionError::NonBoolean("abc".into()),
            line: 1
        }]
    );
    Ok(())
}

#[test]
fn test_non_numeric_operand_is_zero() -> Result<()> {
    let mut context = RecordingContext::new();
    run("※ 「abc」 ＝ 0 「zero」", &mut context)?;
    assert_eq!(context.dialogue(), vec!["zero"]);
    assert_eq!(
        context.diagnostics(),
        vec![&Diagnostic::Coercion {
            error: CoercionError::NonNumeric("abc".into()),
            line: 1
        }]
    );
    Ok(())
}

#[test]
fn test_unknown_function_is_zero() -> Result<()> {
    let mut context = RecordingContext::new();
    run("※ 謎（パス：「a」） ＝ 0 「zero」", &mut context)?;
    assert_eq!(context.dialogue(), vec!["zero"]);
    assert_eq!(context.directory_queries(), 0);
    assert_eq!(
        context.diagnostics(),
        vec![&Diagnostic::UnknownFunction {
            name: "謎".into(),
            line: 1
        }]
    );
    Ok(())
}

#[test]
fn test_clock() -> Result<()> {
    let mut context = RecordingContext::new().with_time(1405.0);
    run("※ 現在時刻（） ≥ 1400 「昼」\n※ 現在時刻（） ≥ 1800 「夜」", &mut context)?;
    assert_eq!(context.dialogue(), vec!["昼"]);
    Ok(())
}

#[test]
fn test_jump_is_reported_when_guard_fails() -> Result<()> {
    let mut context = RecordingContext::new();
    run("※ 1 ＞ 2\n「x」\n→終わり\n※ 2 ＞ 1\n「y」\n→終わり", &mut context)?;
    assert_eq!(context.dialogue(), vec!["y"]);
    assert_eq!(
        context.diagnostics(),
        vec![&Diagnostic::IgnoredJump {
            label: "終わり".into(),
            line: 1
        }]
    );
    Ok(())
}

#[test]
fn test_malformed_dialogue_fails_softly() {
    let program = Program::new(vec![
        Statement::Dialogue(DialogueStatement {
            text: "「".into(),
            line: 1,
        }),
        Statement::Dialogue(DialogueStatement {
            text: "「ok」".into(),
            line: 2,
        }),
    ]);
    let mut context = RecordingContext::new();
    let report = TreeWalkInterpreter::new(&mut context).execute(&program);
    assert_eq!(report.failed, 1);
    assert_eq!(context.dialogue(), vec!["ok"]);
    assert_eq!(
        context.diagnostics(),
        vec![&Diagnostic::Failed(RuntimeError {
            kind: RuntimeErrorKind::MalformedDialogue("「".into()),
            line: 1,
        })]
    );
}

#[test]
fn test_statement_outcomes() -> Result<()> {
    let program = Parser::new_without_file("「a」\n※ 1 ＞ 2 「b」\n謎の命令").parse()?;
    let mut context = RecordingContext::new();
    let mut interpreter = TreeWalkInterpreter::new(&mut context);
    let outcomes = program
        .iter()
        .map(|statement| interpreter.interpret_statement(statement))
        .collect::<Result<Vec<_>, _>>()?;
    assert_eq!(
        outcomes,
        vec![
            StatementOutcome::Executed,
            StatementOutcome::Skipped,
            StatementOutcome::Ignored
        ]
    );
    Ok(())
}

#[test]
fn test_sample_script() -> Result<()> {
    let source = read_to_string("./test_data/scripts/pc_cleanup.ene")
        .context("Failed to open sample script")?;
    let mut context = RecordingContext::new()
        .with_directory("マイピクチャ", 12)
        .with_time(2000.0);
    let report = run(&source, &mut context)?;

    assert_eq!(
        context.events(),
        &[
            Event::DirectoryQuery("マイピクチャ".into()),
            Event::Dialogue("整理しましょうよ".into()),
            Event::ClockQuery,
            Event::ClockQuery,
            Event::Dialogue("もう夜ですね".into()),
            Event::InputBlocked(true),
            Event::OpenPath("C:\\Windows\\explorer.exe".into()),
            Event::InputBlocked(false),
        ]
    );
    assert_eq!(report.executed, 5);
    Ok(())
}

#[test]
fn test_directory_entries_are_counted() -> Result<()> {
    let directory = tempfile::tempdir()?;
    for name in ["a.txt", "b.png", "c"] {
        File::create(directory.path().join(name))?;
    }
    create_dir(directory.path().join("sub1"))?;
    create_dir(directory.path().join("sub2"))?;

    let path = directory.path().to_string_lossy().into_owned();
    let mut environment = SystemEnvironment;
    assert_eq!(environment.count_directory_entries(&path), 5.0);

    let missing = directory.path().join("missing").to_string_lossy().into_owned();
    assert_eq!(environment.count_directory_entries(&missing), 0.0);
    Ok(())
}

#[test]
fn test_script_against_real_directory() -> Result<()> {
    let directory = tempfile::tempdir()?;
    for index in 0..12 {
        File::create(directory.path().join(format!("file{index}.tmp")))?;
    }
    let source = format!(
        "※ファイル（パス：「{}」）≥１０\n「散らかってるね」\nアプリケーションを開く パス：「{}」",
        directory.path().display(),
        directory.path().display(),
    );

    let mut context = HostContext::new(
        RecordingContext::new(),
        DryRunActions,
        SystemEnvironment,
        RecordingContext::new(),
    );
    let report = run_source(&source, &mut context)?;
    assert_eq!(context.dialogue.dialogue(), vec!["散らかってるね"]);
    assert!(context.diagnostics.diagnostics().is_empty());
    assert_eq!(report.executed, 2);
    Ok(())
}
