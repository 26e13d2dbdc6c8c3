/// Host plugin lifecycle and the context handed to plugins.
use crate::error::Result;
use crate::renderer::PointCloudRenderer;
use std::cell::RefCell;
use std::rc::Rc;

/// Renderer shared between the host and every plugin it drives.
pub type SharedRenderer = Rc<RefCell<dyn PointCloudRenderer>>;

/// Services the host exposes to a plugin during its lifetime.
#[derive(Clone)]
pub struct PluginContext {
    renderer: SharedRenderer,
}

impl PluginContext {
    pub fn new(renderer: SharedRenderer) -> Self {
        Self { renderer }
    }

    pub fn renderer(&self) -> &SharedRenderer {
        &self.renderer
    }
}

/// Lifecycle driven by the host: initialise once, tick every frame, tear down once.
pub trait Plugin {
    fn initialize(&mut self, context: PluginContext) -> Result<()>;

    fn tick(&mut self, delta_seconds: f32);

    fn teardown(&mut self);

    fn name(&self) -> &str;

    fn version(&self) -> &str;
}
