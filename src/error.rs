use thiserror::Error;

#[derive(Error, Debug)]
pub enum SurveyError {
    #[error(
        "required question columns not found (X missing: {}, Y missing: {})",
        missing_x.len(),
        missing_y.len()
    )]
    MissingColumns {
        missing_x: Vec<String>,
        missing_y: Vec<String>,
    },

    #[error("no valid respondents: 0 of {total} answered at least {min_answered} of 20 items")]
    NoValidRespondents { total: usize, min_answered: usize },

    #[error("at least {needed} observations are required, found {found}")]
    InsufficientObservations { needed: usize, found: usize },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SurveyError>;
