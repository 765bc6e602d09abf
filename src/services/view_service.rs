use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info};

use crate::errors::ViewError;
use crate::external::DataSource;
use crate::models::ViewRequest;
use crate::render::{ChartOptions, RenderOutcome, Renderer, Surface};

/// Fetches and renders views onto one page.
///
/// Every `show` takes a new generation number. A response is only drawn if
/// no newer request was issued while it was in flight.
pub struct ViewController<S: Surface + Send> {
    source: Arc<dyn DataSource>,
    renderer: Mutex<Renderer>,
    surface: Arc<Mutex<S>>,
    generation: AtomicU64,
    csrf_token: Option<String>,
}

impl<S: Surface + Send> ViewController<S> {
    pub fn new(
        source: Arc<dyn DataSource>,
        surface: Arc<Mutex<S>>,
        options: ChartOptions,
        csrf_token: Option<String>,
    ) -> Self {
        Self {
            source,
            renderer: Mutex::new(Renderer::new(options)),
            surface,
            generation: AtomicU64::new(0),
            csrf_token,
        }
    }

    pub fn surface(&self) -> Arc<Mutex<S>> {
        Arc::clone(&self.surface)
    }

    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    pub async fn show(&self, request: &ViewRequest) -> Result<RenderOutcome, ViewError> {
        let kind = request.kind();
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        debug!("{} requested (generation {})", kind, ticket);

        let fetch = request.fetch_request(self.csrf_token.as_deref());
        let result = self.source.fetch(&fetch).await;

        // checked under the surface lock so a newer render cannot slip in between
        let mut surface = self.surface.lock();
        let latest = self.generation.load(Ordering::SeqCst);
        if latest != ticket {
            info!(
                "Discarding stale {} response (generation {}, latest {})",
                kind, ticket, latest
            );
            return Ok(RenderOutcome::Stale);
        }

        let mut renderer = self.renderer.lock();
        renderer.render(kind, result, &mut *surface)
    }
}
