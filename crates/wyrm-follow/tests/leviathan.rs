//! Integration test: the leviathan preset end to end.
//!
//! Spawns the 17-link, 18-bone serpent with a bound skeleton, drives its head
//! around a circle and checks the posed bones, then loads followers from a
//! TOML document and runs them through the plugin.

use bevy::math::DVec3;
use bevy::prelude::*;
use wyrm_core::config::WyrmConfig;
use wyrm_core::tick::SimTick;
use wyrm_core::types::FollowMode;
use wyrm_follow::plugin::{Follower, HeadInput, SkeletonBinding, spawn_follower};
use wyrm_follow::presets::leviathan;
use wyrm_test_utils::{circle_head, follow_test_app, line_head, spawn_bound_follower};

fn rotation(app: &App, bone: Entity) -> Quat {
    app.world().get::<Transform>(bone).unwrap().rotation
}

#[test]
fn leviathan_poses_every_bone() {
    let mut app = follow_test_app(None);
    let config = leviathan::config();
    let start = circle_head(DVec3::ZERO, 12.0, 0.0);
    let (entity, bones) = spawn_bound_follower(app.world_mut(), &config, start);
    assert_eq!(bones.len(), 18);

    for t in 0..80 {
        let head = circle_head(DVec3::ZERO, 12.0, f64::from(t) * 0.05);
        *app.world_mut().get_mut::<HeadInput>(entity).unwrap() = head;
        app.update();
    }

    let follower = app.world().get::<Follower>(entity).unwrap();
    assert_eq!(follower.chain.link_count(), 17);
    assert!(follower.chain.link_error() < 1e-9);

    let skeleton = app.world().get::<SkeletonBinding>(entity).unwrap();
    let expected = skeleton.binding.map(follower.chain.angles());
    assert_eq!(expected.len(), 18);
    for (bone, want) in bones.iter().zip(&expected) {
        assert!(rotation(&app, *bone).abs_diff_eq(want.to_quat(), 1e-6));
    }

    // Turning on a circle bends the body; the extra bone stays neutral.
    assert!(expected[..17].iter().any(|r| !r.is_neutral()));
    assert!(expected[17].is_neutral());
    assert!(rotation(&app, bones[17]).abs_diff_eq(Quat::IDENTITY, 1e-6));
}

#[test]
fn extra_bone_is_reset_every_tick() {
    let mut app = follow_test_app(None);
    let config = leviathan::config();
    let start = HeadInput::new(DVec3::ZERO, DVec3::X);
    let (_, bones) = spawn_bound_follower(app.world_mut(), &config, start);
    let tail = bones[leviathan::BONE_COUNT - 1];

    for _ in 0..3 {
        app.world_mut().get_mut::<Transform>(tail).unwrap().rotation = Quat::from_rotation_x(0.7);
        app.update();
        assert!(rotation(&app, tail).abs_diff_eq(Quat::IDENTITY, 1e-6));
    }
}

#[test]
fn followers_load_from_toml() {
    let toml = r#"
[simulation]
tick_hz = 20.0

[[follower]]
name = "eel"
rest_lengths = [0.5, 0.5, 0.5]
mode = "rigid"

[[follower]]
name = "wyrm"
rest_lengths = [1.0, 1.0]
tip_damping = 0.2

[follower.binding]
bone_count = 4
convention = "absolute"
"#;
    let config = WyrmConfig::from_toml_str(toml).unwrap();
    assert_eq!(config.followers.len(), 2);
    assert_eq!(config.followers[0].mode, FollowMode::Rigid);
    assert_eq!(config.followers[1].bone_count(), 4);

    let mut app = follow_test_app(None);
    let start = HeadInput::new(DVec3::ZERO, DVec3::X);
    let entities: Vec<Entity> = config
        .followers
        .iter()
        .map(|f| spawn_follower(app.world_mut(), f, start).unwrap())
        .collect();

    for t in 0..10 {
        let head = line_head(DVec3::ZERO, DVec3::Z, 0.25, t);
        for &entity in &entities {
            *app.world_mut().get_mut::<HeadInput>(entity).unwrap() = head;
        }
        app.update();
    }
    assert_eq!(app.world().resource::<SimTick>().count(), 10);

    // Rigid: re-laid straight behind the current forward (+Z).
    let eel = app.world().get::<Follower>(entities[0]).unwrap();
    let head = eel.chain.head();
    let tip = eel.chain.tip();
    assert!((head.z - tip.z - 1.5).abs() < 1e-9);
    assert!((head.x - tip.x).abs() < 1e-9);

    let wyrm = app.world().get::<Follower>(entities[1]).unwrap();
    assert!(wyrm.chain.is_seeded());
    assert!((wyrm.chain.tip_damping() - 0.2).abs() < f64::EPSILON);
}
