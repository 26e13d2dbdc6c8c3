/// Minimal plugin that logs a heartbeat at a fixed interval.
use crate::error::Result;
use crate::pipeline::StatusTimer;
use crate::plugin::{Plugin, PluginContext};
use constants::render_settings::{HEARTBEAT_INTERVAL_SECS, PLUGIN_VERSION};
use log::info;

pub struct HeartbeatPlugin {
    timer: StatusTimer,
    beats: u64,
}

impl HeartbeatPlugin {
    pub fn new() -> Self {
        Self::with_interval(HEARTBEAT_INTERVAL_SECS)
    }

    pub fn with_interval(interval_secs: f32) -> Self {
        Self {
            timer: StatusTimer::new(interval_secs),
            beats: 0,
        }
    }

    pub fn beats(&self) -> u64 {
        self.beats
    }
}

impl Default for HeartbeatPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for HeartbeatPlugin {
    fn initialize(&mut self, _context: PluginContext) -> Result<()> {
        info!("{} initialized", self.name());
        Ok(())
    }

    fn tick(&mut self, delta_seconds: f32) {
        if self.timer.advance(delta_seconds) {
            self.beats += 1;
            info!("[{}] heartbeat #{}", self.name(), self.beats);
        }
    }

    fn teardown(&mut self) {
        info!("{} cleaned up", self.name());
    }

    fn name(&self) -> &str {
        "HeartbeatPlugin"
    }

    fn version(&self) -> &str {
        PLUGIN_VERSION
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::LoggingRenderer;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn beats_every_interval() {
        let mut plugin = HeartbeatPlugin::new();
        plugin
            .initialize(PluginContext::new(Rc::new(RefCell::new(LoggingRenderer::new()))))
            .unwrap();

        for _ in 0..8 {
            plugin.tick(0.5);
        }
        assert_eq!(plugin.beats(), 2);
        assert_eq!(plugin.version(), "1.0.0");
    }
}
