/// Drives a set of plugins through their lifecycle with a shared renderer.
use crate::error::Result;
use crate::plugin::{Plugin, PluginContext, SharedRenderer};
use log::info;

pub struct PluginHost {
    context: PluginContext,
    plugins: Vec<Box<dyn Plugin>>,
    /// Leading plugins whose `initialize` succeeded.
    initialized: usize,
}

impl PluginHost {
    pub fn new(renderer: SharedRenderer) -> Self {
        Self {
            context: PluginContext::new(renderer),
            plugins: Vec::new(),
            initialized: 0,
        }
    }

    pub fn add_plugin(&mut self, plugin: Box<dyn Plugin>) -> &mut Self {
        self.plugins.push(plugin);
        self
    }

    /// Initialises plugins in registration order, stopping at the first failure.
    ///
    /// Plugins initialised before the failure are still torn down by
    /// [`PluginHost::teardown`] or on drop.
    pub fn initialize(&mut self) -> Result<()> {
        for plugin in self.plugins.iter_mut().skip(self.initialized) {
            info!("Loading plugin {} v{}", plugin.name(), plugin.version());
            plugin.initialize(self.context.clone())?;
            self.initialized += 1;
        }
        Ok(())
    }

    /// Ticks every plugin once all of them are initialised.
    pub fn tick(&mut self, delta_seconds: f32) {
        if self.initialized == 0 || self.initialized < self.plugins.len() {
            return;
        }
        for plugin in &mut self.plugins {
            plugin.tick(delta_seconds);
        }
    }

    /// Tears initialised plugins down in reverse order.
    pub fn teardown(&mut self) {
        for plugin in self.plugins[..self.initialized].iter_mut().rev() {
            plugin.teardown();
        }
        self.initialized = 0;
    }

    pub fn plugin_names(&self) -> Vec<&str> {
        self.plugins.iter().map(|p| p.name()).collect()
    }
}

impl Drop for PluginHost {
    fn drop(&mut self) {
        self.teardown();
    }
}
