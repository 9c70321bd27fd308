use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("report decode error: {0}")]
    Report(#[from] spot_report::ReportError),

    #[error("transport error: {0}")]
    Transport(#[from] anyhow::Error),
}

pub type DomainResult<T> = Result<T, DomainError>;
