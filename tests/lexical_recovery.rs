use cminus::compiler::Compiler;
use test_utils::{Expected, Reports};

fn reports(source: &str) -> Reports {
    let compiler = Compiler::compile(source);
    Reports {
        tokens: compiler.tokens_report(),
        lexical_errors: compiler.lexical_errors_report(),
        symbol_table: compiler.symbol_table_report(),
        syntax_errors: compiler.syntax_errors_report(),
    }
}

#[test]
fn invalid_number_swallows_the_whole_run() {
    let reports = reports("12abc");

    Expected {
        tokens: Some(""),
        lexical_errors: Some("1.\t(12abc, Invalid number)"),
        ..Default::default()
    }
    .assert_matches(&reports);
}

#[test]
fn unclosed_comment_reports_its_opening() {
    let reports = reports("/* unterminated");

    Expected {
        tokens: Some(""),
        lexical_errors: Some("1.\t(/ unter..., Unclosed comment)"),
        ..Default::default()
    }
    .assert_matches(&reports);
}

#[test]
fn unmatched_comment_marker() {
    let reports = reports("*/");

    Expected {
        tokens: Some(""),
        lexical_errors: Some("1.\t(*/, Unmatched comment)"),
        ..Default::default()
    }
    .assert_matches(&reports);
}

#[test]
fn scanning_continues_after_an_invalid_byte() {
    let reports = reports("int @ x;");

    Expected {
        tokens: Some("1.\t(KEYWORD, int) (ID, x) (SYMBOL, ;)"),
        lexical_errors: Some("1.\t(@, Invalid input)"),
        ..Default::default()
    }
    .assert_matches(&reports);
}

#[test]
fn errors_on_different_lines_get_their_own_rows() {
    let reports = reports("12ab\n34cd");

    Expected {
        lexical_errors: Some("1.\t(12ab, Invalid number)\n2.\t(34cd, Invalid number)"),
        ..Default::default()
    }
    .assert_matches(&reports);
}

#[test]
fn long_error_lexemes_are_clipped() {
    let reports = reports("/* a very long comment without an end");

    Expected {
        lexical_errors: Some("1.\t(/ a ver..., Unclosed comment)"),
        ..Default::default()
    }
    .assert_matches(&reports);
}
