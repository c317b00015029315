//! Template rendering.
//!
//! A [`Renderer`] owns one parsed template and binds a [`RenderContext`] to
//! it. The template is configuration: the production one is embedded at
//! build time as [`CLIENT_CONFIG_TEMPLATE`], tests supply their own.

use minijinja::{Environment, UndefinedBehavior};
use serde::Serialize;
use svcgen_core::to_camel_case;

use crate::{Error, Record};

/// Template for the generated service client configuration module.
pub const CLIENT_CONFIG_TEMPLATE: &str = include_str!("../templates/client_config.rs.j2");

const TEMPLATE_NAME: &str = "client_config";

/// The data bound to a template, exposed as `services`.
#[derive(Debug, Serialize)]
pub struct RenderContext<'a> {
    pub services: &'a [Record],
}

impl<'a> RenderContext<'a> {
    pub fn new(services: &'a [Record]) -> Self {
        Self { services }
    }
}

/// Renders a fixed template.
///
/// Undefined variables are errors, and the environment has no globals, so
/// output depends only on the context passed to [`Renderer::render`].
pub struct Renderer {
    env: Environment<'static>,
}

impl Renderer {
    /// Parse `source` as the template to render.
    pub fn new(source: impl Into<String>) -> Result<Self, Error> {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_keep_trailing_newline(true);
        env.add_filter("camel_case", camel_case);
        env.add_filter("rust_str", rust_str);
        env.add_template_owned(TEMPLATE_NAME, source.into())
            .map_err(Error::TemplateParse)?;

        Ok(Self { env })
    }

    /// Renderer for the embedded client configuration template.
    pub fn client_config() -> Result<Self, Error> {
        Self::new(CLIENT_CONFIG_TEMPLATE)
    }

    /// Render the template with the given context.
    pub fn render(&self, ctx: &RenderContext<'_>) -> Result<String, Error> {
        let template = self
            .env
            .get_template(TEMPLATE_NAME)
            .map_err(Error::TemplateRender)?;
        template.render(ctx).map_err(Error::TemplateRender)
    }
}

fn camel_case(value: String) -> String {
    to_camel_case(&value)
}

/// Quote and escape a value as a Rust string literal.
fn rust_str(value: String) -> String {
    format!("{value:?}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<Record> {
        vec![
            Record::new("Alpha", "1", "alpha"),
            Record::new("beta_service", "2", "betav2"),
        ]
    }

    #[test]
    fn test_render_iterates_services() {
        let renderer =
            Renderer::new("{% for s in services %}{{ s.display_name }}={{ s.package_name }};{% endfor %}")
                .unwrap();
        let records = records();

        let output = renderer.render(&RenderContext::new(&records)).unwrap();
        assert_eq!(output, "Alpha=alpha;beta_service=betav2;");
    }

    #[test]
    fn test_camel_case_filter() {
        let renderer =
            Renderer::new("{% for s in services %}{{ s.display_name | camel_case }} {% endfor %}")
                .unwrap();
        let records = records();

        let output = renderer.render(&RenderContext::new(&records)).unwrap();
        assert_eq!(output, "Alpha BetaService ");
    }

    #[test]
    fn test_rust_str_filter_escapes() {
        let renderer = Renderer::new("{{ services[0].package_name | rust_str }}").unwrap();
        let records = vec![Record::new("Quote", "2", "say \"hi\"\\")];

        let output = renderer.render(&RenderContext::new(&records)).unwrap();
        assert_eq!(output, r#""say \"hi\"\\""#);
    }

    #[test]
    fn test_render_is_repeatable() {
        let renderer = Renderer::client_config().unwrap();
        let records = records();
        let ctx = RenderContext::new(&records);

        let first = renderer.render(&ctx).unwrap();
        let second = renderer.render(&ctx).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_keeps_trailing_newline() {
        let renderer = Renderer::new("x\n").unwrap();
        let output = renderer.render(&RenderContext::new(&[])).unwrap();
        assert_eq!(output, "x\n");
    }

    #[test]
    fn test_invalid_syntax_is_parse_error() {
        let err = Renderer::new("{% for s in services %}").err().unwrap();
        assert!(matches!(err, Error::TemplateParse(_)));
    }

    #[test]
    fn test_undefined_field_is_render_error() {
        let renderer = Renderer::new("{% for s in services %}{{ s.nope }}{% endfor %}").unwrap();
        let records = records();

        let err = renderer.render(&RenderContext::new(&records)).unwrap_err();
        assert!(matches!(err, Error::TemplateRender(_)));
    }

    #[test]
    fn test_embedded_template_parses() {
        assert!(Renderer::client_config().is_ok());
    }
}
