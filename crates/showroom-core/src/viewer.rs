//! Top-level engine the host drives once per animation frame.

use crate::catalog::{CatalogStore, ProductRecord};
use crate::constants::{PARTICLE_SEED, ROTATE_SPEED, ZOOM_SPEED};
use crate::error::{AssetError, CatalogError};
use crate::filter::{self, BrandFilter, FilterCriteria, FilteredView};
use crate::input::{InputEvent, InputQueue};
use crate::interaction::{InteractionController, InteractionMode};
use crate::model::ModelResolver;
use crate::scene::{ResolveRequest, ResolveTicket, SceneRenderer, Surface};

/// Tunables the host may override at startup.
#[derive(Clone, Debug, PartialEq)]
pub struct ShowroomParams {
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    /// Asset tried for records without a model path.
    pub fallback_asset: Option<String>,
    pub particle_seed: u64,
}

impl Default for ShowroomParams {
    fn default() -> Self {
        Self {
            rotate_speed: ROTATE_SPEED,
            zoom_speed: ZOOM_SPEED,
            fallback_asset: None,
            particle_seed: PARTICLE_SEED,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ViewerSession {
    pub record_id: Option<String>,
    pub open: bool,
}

impl ViewerSession {
    pub fn is_open(&self) -> bool {
        self.open
    }
}

pub struct Showroom<S: Surface> {
    catalog: CatalogStore,
    criteria: FilterCriteria,
    session: ViewerSession,
    controller: InteractionController,
    input: InputQueue,
    scene: SceneRenderer<S>,
}

/// Record the scene should show: the open viewer's record, otherwise the
/// scroll-focused entry of the filtered list.
fn focused<'a>(
    catalog: &'a CatalogStore,
    criteria: &FilterCriteria,
    session: &ViewerSession,
    scroll_fraction: f32,
) -> Option<&'a ProductRecord> {
    if session.open {
        return session.record_id.as_deref().and_then(|id| catalog.get(id));
    }
    filter::filter(catalog, criteria).focused_by_scroll(scroll_fraction)
}

impl<S: Surface> Showroom<S> {
    pub fn new(catalog: CatalogStore, surface: S, params: ShowroomParams) -> Self {
        let resolver = ModelResolver::new(params.fallback_asset);
        log::info!(
            "[viewer] showroom ready with {} records",
            catalog.len()
        );
        Self {
            catalog,
            criteria: FilterCriteria::default(),
            session: ViewerSession::default(),
            controller: InteractionController::new(params.rotate_speed, params.zoom_speed),
            input: InputQueue::new(),
            scene: SceneRenderer::new(surface, resolver, params.particle_seed),
        }
    }

    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn session(&self) -> &ViewerSession {
        &self.session
    }

    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }

    pub fn mode(&self) -> InteractionMode {
        self.controller.mode()
    }

    pub fn scene(&self) -> &SceneRenderer<S> {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut SceneRenderer<S> {
        &mut self.scene
    }

    pub fn set_brand(&mut self, brand: BrandFilter) {
        self.criteria.brand = brand;
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.criteria.query = query.into();
    }

    pub fn filtered(&self) -> FilteredView<'_> {
        filter::filter(&self.catalog, &self.criteria)
    }

    pub fn focused_record(&self) -> Option<&ProductRecord> {
        focused(
            &self.catalog,
            &self.criteria,
            &self.session,
            self.controller.state().scroll_fraction,
        )
    }

    /// Open the detail viewer on `slug`.
    pub fn open(&mut self, slug: &str) -> Result<(), CatalogError> {
        let record = self.catalog.find(slug)?;
        log::info!("[viewer] open {}", record.slug);
        self.session = ViewerSession {
            record_id: Some(record.id.clone()),
            open: true,
        };
        self.input.discard_orientation();
        self.controller.enter_detail();
        self.scene.focus(Some(record));
        Ok(())
    }

    /// Close the viewer and tear down its model. Closing twice is harmless.
    pub fn close(&mut self) {
        if !self.session.open {
            return;
        }
        log::info!("[viewer] close");
        self.session = ViewerSession::default();
        self.scene.release();
        self.input.discard_orientation();
        self.controller.enter_ambient();
    }

    pub fn reset_view(&mut self) {
        self.input.push(InputEvent::Reset);
    }

    pub fn input_mut(&mut self) -> &mut InputQueue {
        &mut self.input
    }

    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Apply queued input, advance time, refocus and submit a frame.
    pub fn tick(&mut self, dt: f32, aspect: f32) -> Result<(), S::Error> {
        self.controller.drain(&mut self.input);
        self.controller.tick(dt);
        let record = focused(
            &self.catalog,
            &self.criteria,
            &self.session,
            self.controller.state().scroll_fraction,
        );
        self.scene.focus(record);
        self.scene.render(self.controller.state(), aspect)
    }

    pub fn take_requests(&mut self) -> Vec<ResolveRequest> {
        self.scene.take_requests()
    }

    pub fn complete_resolution(
        &mut self,
        ticket: ResolveTicket,
        fetched: Result<Vec<u8>, AssetError>,
    ) -> bool {
        self.scene.complete(ticket, fetched)
    }

    pub fn is_resolving(&self) -> bool {
        self.scene.is_resolving()
    }
}
