use crate::CoreResult;

use uuid::Uuid;

/// Native factory for settings window surfaces. UI thread only.
pub trait SurfaceHost {
    /// A live window with a web-rendering surface.
    type Surface: WebSurface;

    /// Show a window rendering `content`. Messages the page posts must be
    /// tagged with `session`.
    fn create_surface(&mut self, session: Uuid, content: &str) -> CoreResult<Self::Surface>;

    /// Tear the surface down and hide its window.
    fn release_surface(&mut self, surface: Self::Surface);
}

/// A live settings surface.
pub trait WebSurface {
    /// Replace the rendered document in place.
    fn render(&mut self, content: &str) -> CoreResult<()>;

    /// Run `script` in the current document. Fire-and-forget.
    fn evaluate(&self, script: &str) -> CoreResult<()>;
}
