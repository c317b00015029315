//! Pipeline phase trait.

use eyre::Result;

use super::CompilationContext;

/// A phase in the generation pipeline.
///
/// Phases are executed in order by the pipeline. Each phase reads what the
/// previous ones left in the compilation context and adds its own output
/// and diagnostics.
///
/// Built-in phases:
/// - `NormalizePhase` - filters registry rows into records
/// - `SortPhase` - orders records by display name
/// - `RenderPhase` - binds records to the template
/// - `FormatPhase` - canonicalizes the rendered source
pub trait Phase: Send + Sync {
    /// The name of this phase (used in diagnostics and plugin hooks).
    fn name(&self) -> &'static str;

    /// A human-readable description of what this phase does.
    fn description(&self) -> &'static str;

    /// Run this phase on the compilation context.
    ///
    /// # Errors
    ///
    /// Returns an error if the phase fails fatally. Non-fatal issues should
    /// be recorded as diagnostics instead.
    fn run(&self, ctx: &mut CompilationContext) -> Result<()>;
}
