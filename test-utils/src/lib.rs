//! Helpers for the integration tests: bundle the rendered report files of
//! one compilation and compare them against expected contents.

/// The rendered reports of one compilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reports {
    pub tokens: String,
    pub lexical_errors: String,
    pub symbol_table: String,
    pub syntax_errors: String,
}

/// Expected report contents. Fields set to `None` are not checked.
#[derive(Debug, Default)]
pub struct Expected<'a> {
    pub tokens: Option<&'a str>,
    pub lexical_errors: Option<&'a str>,
    pub symbol_table: Option<&'a str>,
    pub syntax_errors: Option<&'a str>,
}

impl<'a> Expected<'a> {
    pub fn assert_matches(self, reports: &Reports) {
        if let Some(tokens) = self.tokens {
            assert_eq!(reports.tokens, tokens, "tokens report mismatch");
        }
        if let Some(lexical_errors) = self.lexical_errors {
            assert_eq!(
                reports.lexical_errors, lexical_errors,
                "lexical errors report mismatch"
            );
        }
        if let Some(symbol_table) = self.symbol_table {
            assert_eq!(
                reports.symbol_table, symbol_table,
                "symbol table report mismatch"
            );
        }
        if let Some(syntax_errors) = self.syntax_errors {
            assert_eq!(
                reports.syntax_errors, syntax_errors,
                "syntax errors report mismatch"
            );
        }
    }
}

/// The symbol table report for the keyword preload plus `identifiers` in
/// first-seen order.
pub fn symbol_table_with(identifiers: &[&str]) -> String {
    let keywords = [
        "if", "else", "void", "int", "repeat", "break", "until", "return",
    ];

    keywords
        .iter()
        .chain(identifiers)
        .enumerate()
        .map(|(row, symbol)| format!("{}.\t{symbol}", row + 1))
        .collect::<Vec<_>>()
        .join("\n")
}
