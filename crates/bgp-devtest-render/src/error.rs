//! Error types shared by the capability layer and the renderer.

/// Failures raised by a capability lookup.
#[derive(Debug, thiserror::Error)]
pub enum CapabilityError {
    #[error("unsupported OS: {0}")]
    UnsupportedOs(String),

    #[error("unknown fact key: {0}")]
    UnknownFact(String),

    #[error("file not found: {0}")]
    FileNotFound(String),

    #[error("failed to read {path}: {source}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid fixture for {os}: {source}")]
    Fixture {
        os: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Template(#[from] TemplateError),
}

/// Failures raised while filling a template.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("template {template}: unresolved placeholder '{placeholder}'")]
    Unresolved { template: String, placeholder: String },

    #[error("template {template}: parameter '{placeholder}' is not a scalar")]
    NotScalar { template: String, placeholder: String },

    #[error("template {template}: parameters must be a JSON object")]
    InvalidParams { template: String },
}

/// Failures raised by a renderer entry point.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error(transparent)]
    Capability(#[from] CapabilityError),

    #[error("invalid openconfig data: {0}")]
    InvalidData(String),

    #[error("incremental rendering against an existing configuration is not supported")]
    IncrementalUnsupported,
}

impl From<TemplateError> for RenderError {
    fn from(err: TemplateError) -> Self {
        RenderError::Capability(CapabilityError::Template(err))
    }
}
