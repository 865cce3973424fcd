//! Beach scenery behind the start screen.

use std::f32::consts::PI;

use bevy::prelude::*;

use super::ScreenScoped;
use crate::layout::{canvas_to_world, CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::session::ScreenKind;

const SKY_TOP: [f32; 3] = [135.0, 206.0, 250.0];
const SKY_HORIZON: [f32; 3] = [70.0, 160.0, 240.0];
const SKY_BANDS: usize = 60;
const SUN: Color = Color::srgb(1.0, 220.0 / 255.0, 0.0);
const SEA: Color = Color::srgb(25.0 / 255.0, 130.0 / 255.0, 200.0 / 255.0);
const FOAM: Color = Color::srgba(1.0, 1.0, 1.0, 80.0 / 255.0);
const SAND: Color = Color::srgb(240.0 / 255.0, 200.0 / 255.0, 120.0 / 255.0);
const BARK: Color = Color::srgb(120.0 / 255.0, 70.0 / 255.0, 20.0 / 255.0);
const FROND: Color = Color::srgb(30.0 / 255.0, 120.0 / 255.0, 40.0 / 255.0);
const CANOPY: Color = Color::srgb(200.0 / 255.0, 50.0 / 255.0, 50.0 / 255.0);
const CANOPY_STRIPE: Color = Color::srgba(1.0, 200.0 / 255.0, 200.0 / 255.0, 120.0 / 255.0);
const POLE: Color = Color::srgb(150.0 / 255.0, 150.0 / 255.0, 150.0 / 255.0);

const SEA_TOP: f32 = CANVAS_HEIGHT * 0.45;
const SAND_TOP: f32 = CANVAS_HEIGHT * 0.7;

fn rgb(c: [f32; 3]) -> Color {
    Color::srgb(c[0] / 255.0, c[1] / 255.0, c[2] / 255.0)
}

fn sky_color(t: f32) -> Color {
    let mix = |i: usize| SKY_TOP[i] + (SKY_HORIZON[i] - SKY_TOP[i]) * t;
    rgb([mix(0), mix(1), mix(2)])
}

/// Sprite covering the canvas rectangle (x, y, w, h).
fn band(x: f32, y: f32, w: f32, h: f32, z: f32, color: Color) -> (Sprite, Transform) {
    let center = canvas_to_world(Vec2::new(x + w / 2.0, y + h / 2.0));
    (
        Sprite::from_color(color, Vec2::new(w, h)),
        Transform::from_translation(center.extend(z)),
    )
}

fn scoped() -> (Visibility, ScreenScoped) {
    (Visibility::Hidden, ScreenScoped(ScreenKind::Start))
}

pub fn spawn_backdrop(
    mut cmd: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut mats: ResMut<Assets<ColorMaterial>>,
) {
    // Sky gradient over the top 60%
    let sky_height = CANVAS_HEIGHT * 0.6;
    let band_h = sky_height / SKY_BANDS as f32;
    for i in 0..SKY_BANDS {
        let t = i as f32 / (SKY_BANDS - 1) as f32;
        let y = i as f32 * band_h;
        cmd.spawn((band(0.0, y, CANVAS_WIDTH, band_h, 0.0, sky_color(t)), scoped()));
    }

    cmd.spawn((
        Mesh2d(meshes.add(Circle::new(60.0))),
        MeshMaterial2d(mats.add(ColorMaterial::from(SUN))),
        Transform::from_translation(canvas_to_world(Vec2::new(CANVAS_WIDTH - 120.0, 100.0)).extend(0.5)),
        scoped(),
    ));

    cmd.spawn((
        band(0.0, SEA_TOP, CANVAS_WIDTH, CANVAS_HEIGHT * 0.25, 1.0, SEA),
        scoped(),
    ));

    // Foam: flattened upper half-discs along the waterline
    let wave = meshes.add(CircularSegment::from_turns(60.0, 0.5));
    let foam = mats.add(ColorMaterial::from(FOAM));
    let mut x = -50.0;
    while x < CANVAS_WIDTH + 50.0 {
        cmd.spawn((
            Mesh2d(wave.clone()),
            MeshMaterial2d(foam.clone()),
            Transform::from_translation(canvas_to_world(Vec2::new(x, SEA_TOP + 20.0)).extend(1.5))
                .with_scale(Vec3::new(1.0, 20.0 / 60.0, 1.0)),
            scoped(),
        ));
        x += 60.0;
    }

    cmd.spawn((
        band(0.0, SAND_TOP, CANVAS_WIDTH, CANVAS_HEIGHT * 0.3, 2.0, SAND),
        scoped(),
    ));

    spawn_palm(&mut cmd, &mut meshes, &mut mats);
    spawn_umbrella(&mut cmd, &mut meshes, &mut mats);
}

fn spawn_palm(cmd: &mut Commands, meshes: &mut Assets<Mesh>, mats: &mut Assets<ColorMaterial>) {
    let root = canvas_to_world(Vec2::new(CANVAS_WIDTH - 180.0, SAND_TOP + 20.0));
    let frond_mesh = meshes.add(Ellipse::new(70.0, 20.0));
    let frond_mat = mats.add(ColorMaterial::from(FROND));

    cmd.spawn((Transform::from_translation(root.extend(3.0)), scoped()))
        .with_children(|palm| {
            palm.spawn((
                Sprite::from_color(BARK, Vec2::new(20.0, 120.0)),
                Transform::from_xyz(0.0, -60.0, 0.0),
            ));
            // Fronds fan out from -30 to +30 degrees around the trunk top.
            for i in 0..5 {
                let angle = -PI / 6.0 + i as f32 * (PI / 12.0);
                palm.spawn((
                    Transform::from_rotation(Quat::from_rotation_z(-angle)),
                    Visibility::Inherited,
                ))
                .with_children(|pivot| {
                    pivot.spawn((
                        Mesh2d(frond_mesh.clone()),
                        MeshMaterial2d(frond_mat.clone()),
                        Transform::from_xyz(0.0, 30.0, 0.1),
                    ));
                });
            }
        });
}

fn spawn_umbrella(cmd: &mut Commands, meshes: &mut Assets<Mesh>, mats: &mut Assets<ColorMaterial>) {
    let root = canvas_to_world(Vec2::new(120.0, SAND_TOP + 10.0));
    let stripe = mats.add(ColorMaterial::from(CANOPY_STRIPE));

    cmd.spawn((Transform::from_translation(root.extend(3.0)), scoped()))
        .with_children(|umbrella| {
            umbrella.spawn((
                Sprite::from_color(POLE, Vec2::new(2.0, 100.0)),
                Transform::from_xyz(0.0, -50.0, 0.0),
            ));
            umbrella.spawn((
                Mesh2d(meshes.add(CircularSegment::from_turns(110.0, 0.5))),
                MeshMaterial2d(mats.add(ColorMaterial::from(CANOPY))),
                Transform::from_xyz(0.0, 0.0, 0.1).with_scale(Vec3::new(1.0, 60.0 / 110.0, 1.0)),
            ));
            for i in -2..=2 {
                let i = i as f32;
                let tri = Triangle2d::new(
                    Vec2::new(i * 22.0, 0.0),
                    Vec2::new(i * 44.0 + 22.0, 20.0),
                    Vec2::new(i * 44.0 - 22.0, 20.0),
                );
                umbrella.spawn((
                    Mesh2d(meshes.add(tri)),
                    MeshMaterial2d(stripe.clone()),
                    Transform::from_xyz(0.0, 0.0, 0.2),
                ));
            }
        });
}
