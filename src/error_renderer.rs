//! Error rendering using miette
//!
//! Malformed signatures are reported with the signature as source code and
//! a label at the failing offset; every other error is rendered from its
//! own diagnostic.

use crate::Error;
use miette::{GraphicalReportHandler, GraphicalTheme, LabeledSpan, MietteDiagnostic, Report};

/// Convert an error into a report ready for display.
pub fn report(error: &Error) -> Report {
    match error {
        Error::MalformedSignature {
            signature,
            offset,
            reason,
        } => {
            let diagnostic = MietteDiagnostic::new(error.to_string())
                .with_code("typeterm::malformed_signature")
                .with_label(LabeledSpan::at_offset(*offset, reason.clone()));
            Report::new(diagnostic).with_source_code(signature.clone())
        }
        other => Report::new(other.clone()),
    }
}

/// Render an error to stderr.
pub fn render_error(error: &Error) {
    eprintln!("{:?}", report(error));
}

/// Render an error to a String without color codes (useful for tests)
pub fn render_error_to_string_no_color(error: &Error) -> String {
    let report = report(error);
    let mut out = String::new();
    GraphicalReportHandler::new_themed(GraphicalTheme::unicode_nocolor())
        .render_report(&mut out, &*report)
        .ok();
    out
}
