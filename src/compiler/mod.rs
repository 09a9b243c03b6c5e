//! Compilation driver.
//!
//! Runs the scanner, parser and code generator over a single source text and
//! renders the report files: the classified token stream, the lexical error
//! list, the symbol table, the parse tree, the syntactic error list, the
//! intermediate code listing and the semantic error list. All mutable state
//! lives inside one [`Compiler`] value; independent compilations never share
//! anything.

use std::fs;
use std::io;
use std::path::Path;

use log::info;

use crate::codegen::{Instruction, SemanticError};
use crate::parser::{ParseTree, Parser, SyntaxError};
use crate::scanner::{LexicalError, Token};

pub struct Compiler {
    parser: Parser,
}

impl Compiler {
    /// Compile `source` to completion. Errors of any stage are collected,
    /// never raised.
    pub fn compile(source: &str) -> Self {
        let mut parser = Parser::new(source);
        parser.parse();
        Self { parser }
    }

    pub fn tokens(&self) -> &[Token] {
        self.parser.scanner().tokens()
    }

    pub fn lexical_errors(&self) -> &[LexicalError] {
        self.parser.scanner().errors()
    }

    pub fn symbol_table(&self) -> &[String] {
        self.parser.scanner().symbol_table()
    }

    pub fn tree(&self) -> &ParseTree {
        self.parser.tree()
    }

    pub fn syntax_errors(&self) -> &[SyntaxError] {
        self.parser.errors()
    }

    pub fn instructions(&self) -> &[Instruction] {
        self.parser.codegen().instructions()
    }

    pub fn semantic_errors(&self) -> &[SemanticError] {
        self.parser.codegen().errors()
    }

    /// `tokens.txt`: tokens of one source line per report line.
    pub fn tokens_report(&self) -> String {
        group_by_line(
            self.tokens()
                .iter()
                .map(|token| (token.lineno, token.to_string())),
        )
    }

    /// `lexical_errors.txt`.
    pub fn lexical_errors_report(&self) -> String {
        let report = group_by_line(
            self.lexical_errors()
                .iter()
                .map(|error| (error.lineno, error.to_string())),
        );

        if report.is_empty() {
            "There is no lexical error.".into()
        } else {
            report
        }
    }

    /// `symbol_table.txt`: keywords first, then identifiers in order of
    /// first appearance.
    pub fn symbol_table_report(&self) -> String {
        self.symbol_table()
            .iter()
            .enumerate()
            .map(|(row, symbol)| format!("{}.\t{symbol}", row + 1))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// `parse_tree.txt`.
    pub fn parse_tree_report(&self) -> String {
        self.tree().render()
    }

    /// `syntax_errors.txt`.
    pub fn syntax_errors_report(&self) -> String {
        if self.syntax_errors().is_empty() {
            return "There is no syntax error.".into();
        }

        self.syntax_errors()
            .iter()
            .map(|error| error.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// `output.txt`: the intermediate code listing.
    pub fn intermediate_code_report(&self) -> String {
        self.instructions()
            .iter()
            .enumerate()
            .map(|(index, instruction)| format!("{index}\t{instruction}"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// `semantic_errors.txt`.
    pub fn semantic_errors_report(&self) -> String {
        if self.semantic_errors().is_empty() {
            return "The input program is semantically correct.".into();
        }

        self.semantic_errors()
            .iter()
            .map(|error| error.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Write all report files into `dir`.
    pub fn write_artifacts(&self, dir: &Path) -> io::Result<()> {
        let reports = [
            ("tokens.txt", self.tokens_report()),
            ("lexical_errors.txt", self.lexical_errors_report()),
            ("symbol_table.txt", self.symbol_table_report()),
            ("parse_tree.txt", self.parse_tree_report()),
            ("syntax_errors.txt", self.syntax_errors_report()),
            ("output.txt", self.intermediate_code_report()),
            ("semantic_errors.txt", self.semantic_errors_report()),
        ];

        for (name, report) in reports {
            let path = dir.join(name);
            info!("writing {}", path.display());
            fs::write(path, report)?;
        }

        Ok(())
    }
}

/// Join per-line entries into `N.<TAB>entry entry …` report lines, grouping
/// consecutive entries that share a source line.
fn group_by_line(entries: impl IntoIterator<Item = (usize, String)>) -> String {
    let mut grouped: Vec<(usize, Vec<String>)> = vec![];

    for (lineno, text) in entries {
        match grouped.last_mut() {
            Some((current, texts)) if *current == lineno => texts.push(text),
            _ => grouped.push((lineno, vec![text])),
        }
    }

    grouped
        .into_iter()
        .map(|(lineno, texts)| format!("{lineno}.\t{}", texts.join(" ")))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_report_groups_by_line() {
        let compiler = Compiler::compile("int x;\nint y;");

        assert_eq!(
            compiler.tokens_report(),
            "1.\t(KEYWORD, int) (ID, x) (SYMBOL, ;)\n2.\t(KEYWORD, int) (ID, y) (SYMBOL, ;)"
        );
    }

    #[test]
    fn test_empty_error_reports_have_placeholders() {
        let compiler = Compiler::compile("int x;");

        assert_eq!(compiler.lexical_errors_report(), "There is no lexical error.");
        assert_eq!(
            compiler.syntax_errors_report(),
            "There is no syntax error."
        );
    }

    #[test]
    fn test_symbol_table_report_is_numbered() {
        let compiler = Compiler::compile("int x;");

        assert_eq!(
            compiler.symbol_table_report(),
            "1.\tif\n2.\telse\n3.\tvoid\n4.\tint\n5.\trepeat\n6.\tbreak\n7.\tuntil\n8.\treturn\n9.\tx"
        );
    }

    #[test]
    fn test_intermediate_code_report_is_indexed() {
        let compiler = Compiler::compile("void main(void){ output(1); }");

        let report = compiler.intermediate_code_report();
        assert!(report.starts_with("0\t(JP, 1, , )"));
        assert!(report.contains("(PRINT, #1, , )"));
    }

    #[test]
    fn test_semantic_errors_report() {
        let compiler = Compiler::compile("void main(void){ x = 1; }");

        assert_eq!(
            compiler.semantic_errors_report(),
            "#1 : semantic error, 'x' is not defined"
        );
    }

    #[test]
    fn test_group_by_line_keeps_runs_together() {
        let report = group_by_line([
            (1, "a".to_string()),
            (1, "b".to_string()),
            (3, "c".to_string()),
        ]);

        assert_eq!(report, "1.\ta b\n3.\tc");
    }
}
