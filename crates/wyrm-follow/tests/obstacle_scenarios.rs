//! Integration test: followers solved through the plugin against mock worlds.
//!
//! Checks that:
//! 1. A thin wall never holds a trailing joint after a solve
//! 2. A fully solid world leaves joints where relaxation put them
//! 3. Two apps fed the same head path end bit-identical

use bevy::math::DVec3;
use bevy::prelude::*;
use wyrm_follow::obstacle::{BlockPos, ObstacleQuery};
use wyrm_follow::plugin::{Follower, HeadInput};
use wyrm_test_utils::{
    SolidEverywhere, Wall, circle_head, follow_test_app, spawn_test_follower,
};

const CENTER: DVec3 = DVec3::new(0.0, 0.5, 0.0);

fn drive_circle(app: &mut App, entity: Entity, ticks: u32) {
    for t in 0..ticks {
        let head = circle_head(CENTER, 4.0, f64::from(t) * 0.15);
        *app.world_mut().get_mut::<HeadInput>(entity).unwrap() = head;
        app.update();
    }
}

fn joints(app: &App, entity: Entity) -> Vec<[f64; 3]> {
    app.world()
        .get::<Follower>(entity)
        .unwrap()
        .chain
        .joints()
        .iter()
        .map(|j| [j.x, j.y, j.z])
        .collect()
}

#[test]
fn thin_wall_never_holds_a_joint() {
    let wall = Wall::new(0, 0);
    let mut app = follow_test_app(Some(Box::new(wall)));
    let entity = spawn_test_follower(app.world_mut(), 6);

    for t in 0..120 {
        let head = circle_head(CENTER, 4.0, f64::from(t) * 0.15);
        *app.world_mut().get_mut::<HeadInput>(entity).unwrap() = head;
        app.update();

        let follower = app.world().get::<Follower>(entity).unwrap();
        for (i, joint) in follower.chain.joints().iter().enumerate().skip(1) {
            assert!(
                !wall.is_solid(BlockPos::containing(joint)),
                "tick {t}: joint {i} inside wall at {joint:?}"
            );
        }
    }
}

#[test]
fn enclosed_world_matches_open_world() {
    let mut open = follow_test_app(None);
    let mut solid = follow_test_app(Some(Box::new(SolidEverywhere)));
    let a = spawn_test_follower(open.world_mut(), 5);
    let b = spawn_test_follower(solid.world_mut(), 5);

    drive_circle(&mut open, a, 60);
    drive_circle(&mut solid, b, 60);

    assert_eq!(joints(&open, a), joints(&solid, b));
}

#[test]
fn identical_inputs_give_identical_chains() {
    let mut first = follow_test_app(Some(Box::new(Wall::new(-2, -1))));
    let mut second = follow_test_app(Some(Box::new(Wall::new(-2, -1))));
    let a = spawn_test_follower(first.world_mut(), 8);
    let b = spawn_test_follower(second.world_mut(), 8);

    drive_circle(&mut first, a, 90);
    drive_circle(&mut second, b, 90);

    let bits = |js: Vec<[f64; 3]>| {
        js.into_iter()
            .flat_map(|j| j.map(f64::to_bits))
            .collect::<Vec<_>>()
    };
    assert_eq!(bits(joints(&first, a)), bits(joints(&second, b)));
}

#[test]
fn open_world_keeps_link_lengths() {
    let mut app = follow_test_app(None);
    let entity = spawn_test_follower(app.world_mut(), 6);
    drive_circle(&mut app, entity, 100);

    let follower = app.world().get::<Follower>(entity).unwrap();
    assert!(follower.chain.link_error() < 1e-9);
}
