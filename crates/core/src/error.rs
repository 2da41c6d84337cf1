use thiserror::Error;

pub type Result<T> = std::result::Result<T, AdvisorError>;

#[derive(Debug, Error)]
pub enum AdvisorError {
    #[error("no risk configuration for risk level {0}")]
    UnknownRiskLevel(u8),

    #[error("invalid risk profile for level {level}: {detail}")]
    InvalidRiskProfile { level: u8, detail: String },

    #[error("no primary instrument for region {region:?} at risk level {level}")]
    MissingPrimaryInstrument { region: String, level: u8 },

    #[error("missing answer for question {0}")]
    MissingAnswer(usize),

    #[error("option {option} out of range for question {question} ({available} options)")]
    OptionOutOfRange {
        question: usize,
        option: usize,
        available: usize,
    },

    #[error("unknown question index {0}")]
    UnknownQuestion(usize),

    #[error("unknown asset class {0:?} (expected bonds, etf or stocks)")]
    InvalidAssetClass(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("metrics provider failed: {0:#}")]
    MetricsProvider(anyhow::Error),
}

impl AdvisorError {
    /// Configuration table is missing or malformed for the request.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::UnknownRiskLevel(_)
                | Self::InvalidRiskProfile { .. }
                | Self::MissingPrimaryInstrument { .. }
        )
    }

    /// Caller supplied answers or parameters that cannot be interpreted.
    pub fn is_input(&self) -> bool {
        matches!(
            self,
            Self::MissingAnswer(_)
                | Self::OptionOutOfRange { .. }
                | Self::UnknownQuestion(_)
                | Self::InvalidAssetClass(_)
                | Self::InvalidRequest(_)
        )
    }
}
