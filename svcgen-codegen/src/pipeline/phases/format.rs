//! Format phase - canonicalizes the rendered source.

use eyre::{Result, eyre};

use crate::{
    format::SourceFormatter,
    pipeline::{CompilationContext, Phase},
};

/// Phase that passes rendered text through a [`SourceFormatter`].
pub struct FormatPhase<'a> {
    formatter: &'a dyn SourceFormatter,
}

impl<'a> FormatPhase<'a> {
    pub fn new(formatter: &'a dyn SourceFormatter) -> Self {
        Self { formatter }
    }
}

impl Phase for FormatPhase<'_> {
    fn name(&self) -> &'static str {
        "format"
    }

    fn description(&self) -> &'static str {
        "Canonicalize the rendered source"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        let rendered = ctx
            .rendered
            .as_deref()
            .ok_or_else(|| eyre!("rendered source not set - did RenderPhase run?"))?;

        let formatted = self.formatter.format(rendered)?;
        tracing::debug!(language = self.formatter.language(), "formatted source");
        ctx.formatted = Some(formatted);
        Ok(())
    }
}
