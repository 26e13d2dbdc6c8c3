/// Renderer boundary receiving converted point sets
use crate::bounds::PointCloudBounds;
use crate::point::PointSet;
use log::info;

/// Consumer of submitted point clouds. Receives its own copy of the set.
pub trait PointCloudRenderer {
    fn set_point_cloud_data(&mut self, points: PointSet);
}

/// Renderer that only logs what it was given, used by the command line host.
#[derive(Debug, Default)]
pub struct LoggingRenderer {
    submissions: usize,
    last_point_count: usize,
}

impl LoggingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn submissions(&self) -> usize {
        self.submissions
    }

    pub fn last_point_count(&self) -> usize {
        self.last_point_count
    }
}

impl PointCloudRenderer for LoggingRenderer {
    fn set_point_cloud_data(&mut self, points: PointSet) {
        self.submissions += 1;
        self.last_point_count = points.len();

        info!("Renderer received {} points", points.len());
        if let Some(bounds) = PointCloudBounds::from_points(points.points()) {
            info!(
                "  X: {:.2} to {:.2}  Y: {:.2} to {:.2}  Z: {:.2} to {:.2}",
                bounds.min_x, bounds.max_x, bounds.min_y, bounds.max_y, bounds.min_z, bounds.max_z
            );
        }
    }
}
