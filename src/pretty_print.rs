use crate::ParseError;
use crate::parser::describe_expected;
use ariadne::{Label, Report, ReportKind, Source};

impl ParseError {
    /// Renders the error as a report pointing into the equation text.
    pub fn pretty_print(&self, input: &str) {
        let report = match self {
            ParseError::InvalidToken { literal, span } => {
                Report::build(ReportKind::Error, ("equation", span.to_range()))
                    .with_message(format!("Invalid token `{}`", literal))
                    .with_label(
                        Label::new(("equation", span.to_range()))
                            .with_message("This is not part of any number, operator or variable"),
                    )
            }
            ParseError::Syntax {
                expected,
                found,
                span,
            } => Report::build(ReportKind::Error, ("equation", span.to_range()))
                .with_message("Syntax error")
                .with_label(Label::new(("equation", span.to_range())).with_message(format!(
                    "Expected {}, found {}",
                    describe_expected(expected),
                    found
                ))),
        };
        report
            .finish()
            .print(("equation", Source::from(input)))
            .unwrap();
    }
}
