use thiserror::Error;

/// Failures that end a render pass. Data-layer problems never show up here;
/// they are logged and replaced with empty results.
#[derive(Debug, Error)]
pub enum BoardError {
    #[error("network unavailable after {attempts} connection attempts")]
    NetworkUnavailable { attempts: u32 },

    #[error("layout needs {needed}px but the canvas is only {available}px tall")]
    LayoutOverflow { needed: i32, available: u32 },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
