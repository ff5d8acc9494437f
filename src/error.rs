use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoanError {
    #[error("Invalid parameter: {field}: {reason}")]
    InvalidParameter { field: String, reason: String },

    /// A loan parameter that was missing or did not parse as a number.
    #[error("Invalid input for {field}: {value:?} is not a number")]
    Input { field: String, value: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV export error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Workbook export error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

impl LoanError {
    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        LoanError::InvalidParameter {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LoanError>;
