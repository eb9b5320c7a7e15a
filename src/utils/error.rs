use thiserror::Error;

#[derive(Error, Debug)]
pub enum CrewError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("API key '{key}' is not configured")]
    MissingApiKey { key: String },

    #[error("Lifestyle description is empty")]
    EmptyLifestyle,

    #[error("Invalid form submission: {message}")]
    InvalidForm { message: String },

    #[error("Prompt template error: {message}")]
    TemplateError { message: String },

    #[error("LLM returned HTTP {status}: {message}")]
    LlmError { status: u16, message: String },

    #[error("LLM returned an empty completion for task '{task}'")]
    EmptyCompletion { task: String },

    #[error("Task '{task}' failed: {source}")]
    TaskFailed {
        task: String,
        #[source]
        source: Box<CrewError>,
    },

    #[error("Crew output has no result for task '{task}'")]
    MissingTaskOutput { task: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Network,
    Model,
    Internal,
}

impl CrewError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CrewError::TaskFailed { source, .. } => source.severity(),
            CrewError::EmptyLifestyle | CrewError::InvalidForm { .. } => ErrorSeverity::Low,
            CrewError::ApiError(_)
            | CrewError::LlmError { .. }
            | CrewError::EmptyCompletion { .. } => ErrorSeverity::Medium,
            CrewError::TemplateError { .. }
            | CrewError::MissingTaskOutput { .. }
            | CrewError::SerializationError(_) => ErrorSeverity::High,
            CrewError::IoError(_)
            | CrewError::ConfigError { .. }
            | CrewError::ConfigValidationError { .. }
            | CrewError::InvalidConfigValueError { .. }
            | CrewError::MissingConfigError { .. }
            | CrewError::MissingApiKey { .. } => ErrorSeverity::Critical,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            CrewError::TaskFailed { source, .. } => source.category(),
            CrewError::ConfigError { .. }
            | CrewError::ConfigValidationError { .. }
            | CrewError::InvalidConfigValueError { .. }
            | CrewError::MissingConfigError { .. }
            | CrewError::MissingApiKey { .. } => ErrorCategory::Configuration,
            CrewError::EmptyLifestyle | CrewError::InvalidForm { .. } => ErrorCategory::Input,
            CrewError::ApiError(_) => ErrorCategory::Network,
            CrewError::LlmError { .. } | CrewError::EmptyCompletion { .. } => ErrorCategory::Model,
            CrewError::IoError(_)
            | CrewError::SerializationError(_)
            | CrewError::TemplateError { .. }
            | CrewError::MissingTaskOutput { .. } => ErrorCategory::Internal,
        }
    }

    /// 給終端使用者看的訊息，不含內部細節
    pub fn user_friendly_message(&self) -> String {
        match self {
            CrewError::TaskFailed { source, .. } => source.user_friendly_message(),
            CrewError::MissingApiKey { key } => {
                format!("Error: {} is not configured.", key)
            }
            CrewError::EmptyLifestyle => {
                "Please describe your lifestyle to continue.".to_string()
            }
            CrewError::InvalidForm { .. } => "The form submission could not be read.".to_string(),
            CrewError::ApiError(_) => {
                "Could not reach the language model service.".to_string()
            }
            CrewError::LlmError { status, .. } if *status == 401 || *status == 403 => {
                "The language model service rejected the API key.".to_string()
            }
            CrewError::LlmError { status, .. } if *status == 429 => {
                "The language model service is rate limiting requests.".to_string()
            }
            CrewError::LlmError { .. } | CrewError::EmptyCompletion { .. } => {
                "Our specialists could not finish the recommendations.".to_string()
            }
            CrewError::ConfigError { .. }
            | CrewError::ConfigValidationError { .. }
            | CrewError::InvalidConfigValueError { .. }
            | CrewError::MissingConfigError { .. } => format!("Invalid configuration: {}", self),
            _ => "An unexpected error occurred.".to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            CrewError::TaskFailed { source, .. } => source.recovery_suggestion(),
            CrewError::MissingApiKey { key } => format!(
                "Create a secrets file (default: .secrets.toml) and add your key:\n\n{} = \"gsk_...\"\n\nor export {} in the environment.",
                key, key
            ),
            CrewError::EmptyLifestyle => {
                "Type a lifestyle or hobby, e.g. Hiker, Gamer or Weekend chef.".to_string()
            }
            CrewError::InvalidForm { .. } => "Submit the form from the page again.".to_string(),
            CrewError::ApiError(_) => "Check the network connection and llm.base_url.".to_string(),
            CrewError::LlmError { status, .. } if *status == 401 || *status == 403 => {
                "Check that the configured API key is valid.".to_string()
            }
            CrewError::LlmError { status, .. } if *status == 429 => {
                "Wait a moment and submit again.".to_string()
            }
            CrewError::LlmError { .. } | CrewError::EmptyCompletion { .. } => {
                "Submit again; if it keeps failing check llm.model.".to_string()
            }
            CrewError::TemplateError { .. } => {
                "Check the {placeholders} used in agent goals and task descriptions.".to_string()
            }
            CrewError::ConfigError { .. }
            | CrewError::ConfigValidationError { .. }
            | CrewError::InvalidConfigValueError { .. }
            | CrewError::MissingConfigError { .. } => {
                "Fix the configuration file and restart.".to_string()
            }
            _ => "Run again with --verbose for details.".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CrewError>;
