use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenError {
    #[error("CSV Error")]
    CsvError(#[from] csv::Error),
    #[error("I/O Error")]
    IoError(#[from] io::Error),
    #[error("At least one client id is required")]
    NoClients,
    #[error("Amounts must be a positive ratio with a non-zero divisor")]
    InvalidAmount,
    #[error("Sampled index is outside the deposit registry")]
    BadSample,
}
