//! Turning a view result into a response body
//!
//! Views only name a template and build its data. A [`Renderer`] decides
//! what that becomes on the wire. The default [`JsonRenderer`] emits the
//! template name and model as JSON, for a front end that owns its markup.

use pnlweb_core::ViewResult;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("failed to serialize view model: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A rendered body and its content type
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
    pub content_type: &'static str,
    pub body: String,
}

pub trait Renderer: Send + Sync {
    fn render(&self, result: &ViewResult) -> Result<Rendered, RenderError>;
}

/// `{"template": "...", "data": {...}}`
#[derive(Debug, Clone, Default)]
pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, result: &ViewResult) -> Result<Rendered, RenderError> {
        let body = serde_json::to_string(&serde_json::json!({
            "template": result.template,
            "data": result.model,
        }))?;
        Ok(Rendered {
            content_type: "application/json",
            body,
        })
    }
}
