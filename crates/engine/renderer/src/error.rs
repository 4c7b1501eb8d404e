use thiserror::Error;

/// Failures while creating GL resources
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("{stage} shader failed to compile: {log}")]
    ShaderCompile { stage: &'static str, log: String },

    #[error("shader program failed to link: {0}")]
    ProgramLink(String),

    #[error("failed to create {what}: {message}")]
    Resource { what: &'static str, message: String },
}

impl RenderError {
    pub(crate) fn resource(what: &'static str) -> impl FnOnce(String) -> Self {
        move |message| Self::Resource { what, message }
    }
}
