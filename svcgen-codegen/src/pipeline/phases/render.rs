//! Render phase - binds records to the template.

use eyre::{Result, eyre};

use crate::{
    pipeline::{CompilationContext, Phase},
    render::{RenderContext, Renderer},
};

/// Phase that renders the ordered records through a template.
pub struct RenderPhase<'a> {
    renderer: &'a Renderer,
}

impl<'a> RenderPhase<'a> {
    pub fn new(renderer: &'a Renderer) -> Self {
        Self { renderer }
    }
}

impl Phase for RenderPhase<'_> {
    fn name(&self) -> &'static str {
        "render"
    }

    fn description(&self) -> &'static str {
        "Render records through the template"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        let records = ctx
            .records
            .as_deref()
            .ok_or_else(|| eyre!("records not set - did NormalizePhase run?"))?;

        let rendered = self.renderer.render(&RenderContext::new(records))?;
        ctx.rendered = Some(rendered);
        Ok(())
    }
}
