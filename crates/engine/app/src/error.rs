use thiserror::Error;

/// Failures of the application runtime
///
/// All but [`AppError::Capture`] are fatal and stop the event loop.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to create event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to create window: {0}")]
    Window(String),

    #[error("failed to create OpenGL context: {0}")]
    Context(String),

    #[error("failed to create window surface: {0}")]
    Surface(String),

    #[error("failed to initialize UI: {0}")]
    Ui(String),

    #[error("application init failed: {0}")]
    Init(String),

    #[error("failed to capture frame: {0}")]
    Capture(String),
}
