//! Bevy test app builders with various plugin combinations.

use bevy::prelude::*;
use wyrm_follow::obstacle::ObstacleQuery;
use wyrm_follow::plugin::ObstacleMap;

/// Create a minimal test app with only the core plugin.
///
/// Provides `WyrmSet` ordering and the tick resources but no solver.
pub fn minimal_test_app() -> App {
    let mut app = App::new();
    app.add_plugins(wyrm_core::WyrmCorePlugin);
    app.finish();
    app.cleanup();
    app
}

/// Create a test app with the core and follow plugins.
///
/// The obstacle map starts empty; pass `Some(query)` to install a world.
pub fn follow_test_app(obstacles: Option<Box<dyn ObstacleQuery + Send + Sync>>) -> App {
    let mut app = App::new();
    app.add_plugins(wyrm_core::WyrmCorePlugin);
    app.add_plugins(wyrm_follow::WyrmFollowPlugin);
    if let Some(query) = obstacles {
        app.insert_resource(ObstacleMap::from_boxed(query));
    }
    app.finish();
    app.cleanup();
    app
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use wyrm_core::tick::SimTick;
    use wyrm_follow::obstacle::BlockPos;

    use crate::mocks::SolidBelow;

    #[test]
    fn minimal_app_builds() {
        let app = minimal_test_app();
        assert!(app.world().get_resource::<SimTick>().is_some());
        assert!(app.world().get_resource::<ObstacleMap>().is_none());
    }

    #[test]
    fn follow_app_defaults_to_open_world() {
        let app = follow_test_app(None);
        let map = app.world().resource::<ObstacleMap>();
        assert!(!map.query().is_solid(BlockPos::new(0, -100, 0)));
    }

    #[test]
    fn follow_app_installs_obstacles() {
        let mut app = follow_test_app(Some(Box::new(SolidBelow::new(0))));
        app.update();
        let map = app.world().resource::<ObstacleMap>();
        assert!(map.query().is_solid(BlockPos::new(3, -1, 3)));
        assert!(!map.query().is_solid(BlockPos::new(3, 0, 3)));
    }
}
