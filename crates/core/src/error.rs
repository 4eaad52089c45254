use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlanError {
    #[error("Destination '{reference}' not in catalog yet. Try one from the region guide.")]
    NotFound { reference: String },
    #[error("invalid request: {0}")]
    Validation(String),
    #[error("catalog data unusable: {0}")]
    DataIntegrity(String),
}

impl PlanError {
    pub fn not_found(reference: impl Into<String>) -> Self {
        Self::NotFound {
            reference: reference.into(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "not_found",
            Self::Validation(_) => "validation_error",
            Self::DataIntegrity(_) => "data_integrity",
        }
    }
}
