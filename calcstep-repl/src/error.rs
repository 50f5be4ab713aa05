use calcstep_error::Error as ExprError;

/// Utility enum to package errors that can occur while reading settings / differentiating.
#[derive(Debug)]
pub enum Error {
    /// Errors found in the input expression, while parsing or differentiating it.
    Expr(Vec<ExprError>),

    /// An unrecognized REPL command, or a missing / malformed value for one.
    Usage(String),
}

impl Error {
    /// Report the errors in this [`Error`] to stderr.
    ///
    /// `input` must be the normalized input, since that is what the spans of expression errors
    /// refer to.
    pub fn report_to_stderr(&self, input: &str) {
        match self {
            Self::Expr(errs) => errs.iter().for_each(|err| {
                if let Err(io_err) = err.report_to_stderr("input", input) {
                    eprintln!("failed to print error report: {}", io_err);
                }
            }),
            Self::Usage(msg) => eprintln!("error: {}", msg),
        }
    }
}

impl From<Vec<ExprError>> for Error {
    fn from(errs: Vec<ExprError>) -> Self {
        Self::Expr(errs)
    }
}
