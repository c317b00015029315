use thiserror::Error;

/// Failures of the render and format stages.
#[derive(Debug, Error)]
pub enum Error {
    #[error("error parsing template")]
    TemplateParse(#[source] minijinja::Error),

    #[error("error executing template")]
    TemplateRender(#[source] minijinja::Error),

    #[error("error formatting generated source")]
    Format(#[source] Box<dyn std::error::Error + Send + Sync>),
}
