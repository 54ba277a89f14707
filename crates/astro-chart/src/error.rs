use thiserror::Error;

/// Errors that can occur while preparing or computing a chart
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChartError {
    #[error("invalid {what} {input:?}: {reason}")]
    InvalidArgument {
        what: &'static str,
        input: String,
        reason: String,
    },
    #[error("unknown house system {input:?}: valid values are {}", .valid.join(", "))]
    UnknownHouseSystem { input: String, valid: Vec<String> },
    #[error("unknown body {input:?}: valid values are {}", .valid.join(", "))]
    UnknownBody { input: String, valid: Vec<String> },
    #[error("ephemeris configuration failed: {message}")]
    EngineConfiguration { message: String },
    #[error("error calculating {body}: {message}")]
    BodyCalculation { body: String, message: String },
    #[error("error calculating houses (system '{system_code}'): engine returned status {status}")]
    HouseCalculation { system_code: char, status: i32 },
}

impl ChartError {
    /// True for errors raised before any engine call was made.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            ChartError::InvalidArgument { .. }
                | ChartError::UnknownHouseSystem { .. }
                | ChartError::UnknownBody { .. }
        )
    }
}
