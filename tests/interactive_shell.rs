//! Tests for the spinner-driven renderer

mod common;

use common::{CLEAR_LINE, DEFAULT_FG, GREEN, RED, SharedBuffer, YELLOW, final_lines};
use shellout::kv;
use shellout::output::{EndOperationStatus, InteractiveShell, Output, ProgressGauge, Spinner};
use std::io::{self, Write};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

fn shell(verbosity: i32) -> (InteractiveShell, SharedBuffer, SharedBuffer) {
    let out = SharedBuffer::new();
    let err_out = SharedBuffer::new();
    let spinner = Spinner::with_ansi_frames(err_out.clone(), true);
    let output = InteractiveShell::with_spinner(out.clone(), spinner, verbosity);
    (output, out, err_out)
}

fn yellow(text: &str) -> String {
    format!("{YELLOW}{text}{DEFAULT_FG}")
}

fn red(text: &str) -> String {
    format!("{RED}{text}{DEFAULT_FG}")
}

#[test]
fn test_messages_at_default_level() {
    let (output, out, err_out) = shell(0);
    let err = io::Error::other("error message");

    output.info("info message");
    assert_eq!(err_out.take(), "info message\n");

    output.infof(format_args!("info {}", "message"));
    assert_eq!(err_out.take(), "info message\n");

    let n = output.info_writer().write(b"info message").unwrap();
    assert_eq!(n, "info message".len());
    assert_eq!(err_out.take(), "info message\n");

    output.warn("warning message");
    assert_eq!(err_out.take(), format!("{}\n", yellow("warning message")));

    output.warn_writer().write_all(b"warning message").unwrap();
    assert_eq!(err_out.take(), format!("{}\n", yellow("warning message")));

    output.error(Some(&err), "an error happened");
    assert_eq!(
        err_out.take(),
        format!("{}\n", red("an error happened: error message"))
    );

    output.error(None, "an error happened");
    assert_eq!(err_out.take(), format!("{}\n", red("an error happened")));

    output.error(Some(&err), "");
    assert_eq!(err_out.take(), format!("{}\n", red("error message")));

    output.errorf(Some(&err), format_args!("an error {}", "happened"));
    assert_eq!(
        err_out.take(),
        format!("{}\n", red("an error happened: error message"))
    );

    output.error_writer().write_all(b"an error happened").unwrap();
    assert_eq!(err_out.take(), format!("{}\n", red("an error happened")));

    output.result("a result");
    assert_eq!(out.take(), "a result\n");
    output.result_writer().write_all(b"a result").unwrap();
    assert_eq!(out.take(), "a result");
    assert_eq!(err_out.contents(), "");
}

#[test]
fn test_values_only_shown_on_verbose_views() {
    let (output, _out, err_out) = shell(1);
    let err = io::Error::other("error message");

    output.with_values(kv!["key" => "value"]).info("info message");
    assert_eq!(err_out.take(), "info message\n");

    output.v(1).with_values(kv!["key" => "value"]).info("info message");
    assert_eq!(err_out.take(), "info message    key=value\n");

    output.with_values(kv!["key" => "value"]).warn("warning message");
    assert_eq!(err_out.take(), format!("{}\n", yellow("warning message")));

    output.v(1).with_values(kv!["key" => "value"]).warn("warning message");
    assert_eq!(
        err_out.take(),
        format!("{}\n", yellow("warning message    key=value"))
    );

    output
        .with_values(kv!["key" => "value"])
        .error(Some(&err), "an error happened");
    assert_eq!(
        err_out.take(),
        format!("{}\n", red("an error happened: error message"))
    );

    output
        .v(1)
        .with_values(kv!["key" => "value"])
        .error(Some(&err), "an error happened");
    assert_eq!(
        err_out.take(),
        format!("{}\n", red("an error happened: error message    key=value"))
    );
}

#[test]
fn test_verbose_messages_hidden() {
    let (output, out, err_out) = shell(0);
    let verbose = output.v(1);

    verbose.info("info message");
    verbose.warn("warning message");
    verbose.error(None, "an error happened");
    verbose.error_writer().write_all(b"an error happened").unwrap();
    verbose.result("a result");
    verbose.result_writer().write_all(b"a result").unwrap();
    verbose.start_operation("working");
    verbose.end_operation(true);
    verbose.start_operation("working");
    verbose.end_operation_with_status(&EndOperationStatus::success());

    assert_eq!(out.contents(), "");
    assert_eq!(err_out.contents(), "");
}

#[test]
fn test_operations() {
    let (output, _out, err_out) = shell(0);
    let pause = Duration::from_millis(200);

    output.start_operation("working");
    thread::sleep(pause);
    output.info("a message");
    thread::sleep(pause);
    output.end_operation(true);
    output.start_operation("working");
    thread::sleep(pause);
    output.error(None, "an error");
    thread::sleep(pause);
    output.end_operation(false);
    output.start_operation("working");
    thread::sleep(pause);
    output.info("another message");
    thread::sleep(pause);
    output.end_operation_with_status(&EndOperationStatus::success());
    output.start_operation("working");
    thread::sleep(pause);
    output.error(None, "another error");
    thread::sleep(pause);
    output.end_operation_with_status(&EndOperationStatus::failure());
    output.start_operation("skipped");
    thread::sleep(pause);
    output.warn("some warning");
    thread::sleep(pause);
    output.end_operation_with_status(&EndOperationStatus::skipped());

    let text = err_out.contents();
    // The spinner drew frames in between.
    assert!(text.split('\r').count() > 6);
    assert!(text.contains(" working "));

    let expected = vec![
        format!("{CLEAR_LINE}a message"),
        format!(" {GREEN}✓{DEFAULT_FG} working"),
        format!("{CLEAR_LINE}{}", red("an error")),
        format!(" {RED}✗{DEFAULT_FG} working"),
        format!("{CLEAR_LINE}another message"),
        format!(" {GREEN}✓{DEFAULT_FG} working"),
        format!("{CLEAR_LINE}{}", red("another error")),
        format!(" {RED}✗{DEFAULT_FG} working"),
        format!("{CLEAR_LINE}{}", yellow("some warning")),
        format!(" {YELLOW}∅{DEFAULT_FG} skipped"),
    ];
    assert_eq!(final_lines(&text), expected);
}

#[test]
fn test_operations_with_progress() {
    let (output, _out, err_out) = shell(0);
    let gauge = Arc::new(ProgressGauge::with_capacity("a message", 10));
    let one = "a message [===>                                1/10] (time elapsed 00s) ";
    let ten = "a message [==================================>10/10] (time elapsed 00s) ";

    output.start_operation_with_progress(gauge.clone());
    gauge.set(1);
    output.info(&gauge.to_string());
    output.end_operation(true);

    output.start_operation_with_progress(gauge.clone());
    gauge.set(10);
    output.info(&gauge.to_string());
    output.end_operation(true);

    output.start_operation_with_progress(gauge.clone());
    gauge.set(1);
    output.error(None, "an error");
    output.end_operation(false);

    output.start_operation_with_progress(gauge.clone());
    gauge.set(10);
    output.info(&gauge.to_string());
    output.end_operation_with_status(&EndOperationStatus::success());

    output.start_operation("without a gauge");
    output.end_operation_with_status(&EndOperationStatus::success());

    let expected = vec![
        format!("{CLEAR_LINE} {one}"),
        format!(" {GREEN}✓{DEFAULT_FG} {one}"),
        format!("{CLEAR_LINE} {ten}"),
        format!(" {GREEN}✓{DEFAULT_FG} {ten}"),
        format!("{CLEAR_LINE}{}", red("an error")),
        format!(" {RED}✗{DEFAULT_FG} {one}"),
        format!("{CLEAR_LINE} {ten}"),
        format!(" {GREEN}✓{DEFAULT_FG} {ten}"),
        format!(" {GREEN}✓{DEFAULT_FG} without a gauge"),
    ];
    assert_eq!(final_lines(&err_out.contents()), expected);
}

#[test]
fn test_start_ends_previous_operation_as_success() {
    let (output, _out, err_out) = shell(0);
    output.start_operation("first");
    output.start_operation("second");
    output.end_operation(false);

    assert_eq!(
        final_lines(&err_out.contents()),
        vec![
            format!(" {GREEN}✓{DEFAULT_FG} first"),
            format!(" {RED}✗{DEFAULT_FG} second"),
        ]
    );
}

#[test]
fn test_end_without_operation_writes_nothing() {
    let (output, _out, err_out) = shell(0);
    output.end_operation(true);
    output.start_operation("once");
    output.end_operation(true);
    let after_first = err_out.contents();
    output.end_operation(false);
    assert_eq!(err_out.contents(), after_first);
}

#[test]
fn test_concurrent_operations_keep_lines_whole() {
    let (output, _out, err_out) = shell(0);
    let output = Arc::new(output);
    let handles: Vec<_> = (0..2)
        .map(|_| {
            let output = Arc::clone(&output);
            thread::spawn(move || {
                for _ in 0..5 {
                    output.start_operation("working");
                    output.info("a message");
                    output.warn("a warning");
                    output.end_operation(true);
                    output.start_operation("working");
                    output.error(None, "an error");
                    output.end_operation(false);
                    output.warn("another warning");
                    output.end_operation_with_status(&EndOperationStatus::success());
                    output.start_operation("working again");
                    output.error(None, "another error");
                    output.end_operation_with_status(&EndOperationStatus::failure());
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let messages = [
        "a message".to_string(),
        yellow("a warning"),
        red("an error"),
        yellow("another warning"),
        red("another error"),
    ];
    let mut allowed: Vec<String> = messages
        .iter()
        .flat_map(|msg| [msg.clone(), format!("{CLEAR_LINE}{msg}")])
        .collect();
    for status in ["working", "working again"] {
        allowed.push(format!(" {GREEN}✓{DEFAULT_FG} {status}"));
        allowed.push(format!(" {RED}✗{DEFAULT_FG} {status}"));
    }

    let text = err_out.contents();
    assert!(text.ends_with('\n'));
    for line in final_lines(&text) {
        assert!(allowed.contains(&line), "unexpected line {line:?}");
    }
}

#[test]
fn test_message_level_does_not_move_ceiling() {
    let (output, _out, err_out) = shell(1);

    output.v(0).v(1).info("test");
    assert_eq!(err_out.take(), "test\n");

    output.v(2).v(2).info("should not be output");
    assert_eq!(err_out.take(), "");
}

#[test]
fn test_result_during_operation_gets_its_own_line() {
    let terminal = SharedBuffer::new();
    let spinner = Spinner::with_ansi_frames(terminal.clone(), true);
    let output = InteractiveShell::with_spinner(terminal.clone(), spinner, 0);

    output.start_operation("working");
    thread::sleep(Duration::from_millis(250));
    output.result("a result");
    writeln!(output.result_writer(), "another result").unwrap();
    output.end_operation(true);

    let text = terminal.contents();
    assert!(text.contains(&format!("\r{CLEAR_LINE}a result\n")), "{text:?}");
    assert!(text.contains(&format!("\r{CLEAR_LINE}another result\n")), "{text:?}");
    assert!(!text.contains("\x1b[?7ha result"));
    assert!(final_lines(&text).contains(&format!("{CLEAR_LINE}a result")));
}
