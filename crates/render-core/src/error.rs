use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("PDF generation error: {0}")]
    Pdf(String),
    #[error("No page has been started")]
    NoPage,
    #[error("Invalid image: {0}")]
    InvalidImage(String),
    #[error("Other rendering error: {0}")]
    Other(String),
}
