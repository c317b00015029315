//! Pipeline orchestrator.

use eyre::{Context, Result, bail};
use svcgen_registry::{ColumnSchema, FilterConfig, Registry};

use super::{
    CompilationContext, Phase, Plugin,
    phases::{FormatPhase, NormalizePhase, RenderPhase, SortPhase},
};
use crate::{
    format::{RustFormatter, SourceFormatter},
    render::Renderer,
};

/// The generation pipeline orchestrator.
///
/// The pipeline runs the built-in phases (normalize, sort, render, format)
/// followed by any user phases, calling plugin hooks before and after each
/// phase. The first failing phase or hook stops the run.
///
/// A pipeline without a renderer can only [`check`](Pipeline::check).
///
/// # Example
///
/// ```ignore
/// let pipeline = Pipeline::new()
///     .renderer(Renderer::client_config()?)
///     .columns(config.columns)
///     .plugin(TracingPlugin);
///
/// let ctx = pipeline.run(registry)?;
/// ```
pub struct Pipeline {
    renderer: Option<Renderer>,
    formatter: Box<dyn SourceFormatter>,
    columns: ColumnSchema,
    filter: FilterConfig,
    phases: Vec<Box<dyn Phase>>,
    plugins: Vec<Box<dyn Plugin>>,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Pipeline {
    /// Create a pipeline with default columns and a Rust formatter.
    pub fn new() -> Self {
        Self {
            renderer: None,
            formatter: Box::new(RustFormatter),
            columns: ColumnSchema::default(),
            filter: FilterConfig::default(),
            phases: Vec::new(),
            plugins: Vec::new(),
        }
    }

    /// Set the renderer the render phase binds records with.
    pub fn renderer(mut self, renderer: Renderer) -> Self {
        self.renderer = Some(renderer);
        self
    }

    /// Replace the source formatter.
    pub fn formatter(mut self, formatter: impl SourceFormatter + 'static) -> Self {
        self.formatter = Box::new(formatter);
        self
    }

    /// Set the column layout rows are normalized with.
    pub fn columns(mut self, columns: ColumnSchema) -> Self {
        self.columns = columns;
        self
    }

    /// Set the record selection settings.
    pub fn filter(mut self, filter: FilterConfig) -> Self {
        self.filter = filter;
        self
    }

    /// Add a phase to run after the built-in phases.
    pub fn phase(mut self, phase: impl Phase + 'static) -> Self {
        self.phases.push(Box::new(phase));
        self
    }

    /// Add a plugin to receive phase lifecycle hooks.
    pub fn plugin(mut self, plugin: impl Plugin + 'static) -> Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    /// Run every phase on the registry.
    ///
    /// Executes all phases in order:
    /// 1. NormalizePhase - filters rows into records
    /// 2. SortPhase - orders records
    /// 3. RenderPhase - renders the template
    /// 4. FormatPhase - canonicalizes the output
    /// 5. User phases (if any)
    ///
    /// # Errors
    ///
    /// Returns an error if no renderer is set or any phase fails fatally.
    pub fn run(&self, registry: Registry) -> Result<CompilationContext> {
        let Some(renderer) = &self.renderer else {
            bail!("pipeline has no renderer");
        };
        let mut ctx = self.context(registry);

        let render = RenderPhase::new(renderer);
        let format = FormatPhase::new(self.formatter.as_ref());
        let builtin_phases: [&dyn Phase; 4] = [&NormalizePhase, &SortPhase, &render, &format];

        for phase in builtin_phases {
            self.run_phase(phase, &mut ctx)?;
        }
        for phase in &self.phases {
            self.run_phase(phase.as_ref(), &mut ctx)?;
        }

        Ok(ctx)
    }

    /// Run only the record selection phases (normalize, sort).
    ///
    /// Used to inspect a registry without rendering anything, so no
    /// renderer is needed.
    pub fn check(&self, registry: Registry) -> Result<CompilationContext> {
        let mut ctx = self.context(registry);

        let builtin_phases: [&dyn Phase; 2] = [&NormalizePhase, &SortPhase];
        for phase in builtin_phases {
            self.run_phase(phase, &mut ctx)?;
        }

        Ok(ctx)
    }

    fn context(&self, registry: Registry) -> CompilationContext {
        CompilationContext::new(registry.into_rows(), self.columns, self.filter.clone())
    }

    /// Run a single phase with plugin hooks.
    fn run_phase(&self, phase: &dyn Phase, ctx: &mut CompilationContext) -> Result<()> {
        let phase_name = phase.name();

        // Call before hooks
        for plugin in &self.plugins {
            plugin.on_before_phase(phase_name, ctx).wrap_err_with(|| {
                format!("plugin '{}' failed before {} phase", plugin.name(), phase_name)
            })?;
        }

        tracing::trace!(phase = phase_name, "{}", phase.description());

        // Run the phase
        phase
            .run(ctx)
            .map_err(|e| e.wrap_err(format!("{} phase failed", phase_name)))?;

        // Call after hooks
        for plugin in &self.plugins {
            plugin.on_after_phase(phase_name, ctx).wrap_err_with(|| {
                format!("plugin '{}' failed after {} phase", plugin.name(), phase_name)
            })?;
        }

        Ok(())
    }
}
