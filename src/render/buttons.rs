//! Clickable rounded buttons: meshes, labels, hover highlight and cursor.

use std::f32::consts::{FRAC_PI_2, PI};

use bevy::prelude::*;
use bevy::render::mesh::{Indices, PrimitiveTopology};
use bevy::text::TextBounds;
use bevy::window::{PrimaryWindow, SystemCursorIcon};
use bevy::winit::cursor::CursorIcon;

use super::{QuizFont, QuizText, ScreenScoped};
use crate::input::pointer_position;
use crate::layout::{canvas_to_world, ButtonSpec, BUTTONS};
use crate::session::{Quiz, ScreenKind};

const BUTTON_IDLE: Color = Color::srgba(50.0 / 255.0, 100.0 / 255.0, 200.0 / 255.0, 200.0 / 255.0);
const BUTTON_HOVER: Color = Color::srgb(100.0 / 255.0, 180.0 / 255.0, 1.0);
const CORNER_RADIUS: f32 = 10.0;
const CORNER_STEPS: u32 = 8;
/// Stroke width of the hover outline.
const OUTLINE: f32 = 2.0;
const HOVER_SCALE: f32 = 1.04;
const Z_BUTTON: f32 = 5.0;

#[derive(Component, Clone, Copy, Debug)]
pub struct UiButton(pub ButtonSpec);

/// White rim behind a button, shown while it is hovered.
#[derive(Component)]
pub struct ButtonOutline;

#[derive(Resource)]
pub struct ButtonPalette {
    idle: Handle<ColorMaterial>,
    hover: Handle<ColorMaterial>,
    outline: Handle<ColorMaterial>,
}

/// Perimeter of a `size` box centred on the origin with `radius` corners,
/// counter-clockwise from the top-right corner. Each corner arc gets
/// `corner_steps + 1` points.
fn rounded_outline(size: Vec2, radius: f32, corner_steps: u32) -> Vec<Vec2> {
    let half = size / 2.0;
    let r = radius.clamp(0.0, half.min_element());
    let inner = half - Vec2::splat(r);

    // Arc centres with the quadrant each one sweeps.
    let arcs = [
        (Vec2::new(inner.x, inner.y), 0.0),
        (Vec2::new(-inner.x, inner.y), FRAC_PI_2),
        (Vec2::new(-inner.x, -inner.y), PI),
        (Vec2::new(inner.x, -inner.y), 3.0 * FRAC_PI_2),
    ];

    arcs.into_iter()
        .flat_map(|(centre, from)| {
            (0..=corner_steps).map(move |step| {
                let angle = from + FRAC_PI_2 * step as f32 / corner_steps.max(1) as f32;
                centre + r * Vec2::from_angle(angle)
            })
        })
        .collect()
}

/// Triangle-fan mesh filling [`rounded_outline`].
fn rounded_rect_mesh(size: Vec2, radius: f32, corner_steps: u32) -> Mesh {
    let rim = rounded_outline(size, radius, corner_steps);
    let rim_len = rim.len() as u32;

    let positions: Vec<[f32; 3]> = std::iter::once(Vec2::ZERO)
        .chain(rim)
        .map(|p| [p.x, p.y, 0.0])
        .collect();
    let uvs: Vec<[f32; 2]> = positions
        .iter()
        .map(|[x, y, _]| [x / size.x + 0.5, 0.5 - y / size.y])
        .collect();
    let indices: Vec<u32> = (0..rim_len)
        .flat_map(|i| [0, i + 1, (i + 1) % rim_len + 1])
        .collect();

    Mesh::new(PrimitiveTopology::TriangleList, default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
        .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, uvs)
        .with_inserted_indices(Indices::U32(indices))
}

/// Whether `spec` reacts to a pointer at `pointer` while `active` is showing.
pub fn is_hovered(spec: &ButtonSpec, active: ScreenKind, pointer: Option<Vec2>) -> bool {
    spec.screen == active && pointer.is_some_and(|p| spec.bounds.contains(p))
}

pub fn spawn_buttons(
    mut cmd: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut mats: ResMut<Assets<ColorMaterial>>,
    font: Res<QuizFont>,
) {
    let palette = ButtonPalette {
        idle: mats.add(ColorMaterial::from(BUTTON_IDLE)),
        hover: mats.add(ColorMaterial::from(BUTTON_HOVER)),
        outline: mats.add(ColorMaterial::from(Color::WHITE)),
    };

    for spec in BUTTONS {
        let size = spec.bounds.size();
        let mesh = meshes.add(rounded_rect_mesh(size, CORNER_RADIUS, CORNER_STEPS));
        let rim = meshes.add(rounded_rect_mesh(
            size + Vec2::splat(2.0 * OUTLINE),
            CORNER_RADIUS + OUTLINE,
            CORNER_STEPS,
        ));
        cmd.spawn((
            Mesh2d(mesh),
            MeshMaterial2d(palette.idle.clone()),
            Transform::from_translation(canvas_to_world(spec.bounds.center()).extend(Z_BUTTON)),
            Visibility::Hidden,
            ScreenScoped(spec.screen),
            UiButton(spec),
        ))
        .with_children(|parent| {
            parent.spawn((
                Mesh2d(rim),
                MeshMaterial2d(palette.outline.clone()),
                Transform::from_xyz(0.0, 0.0, -0.1),
                Visibility::Hidden,
                ButtonOutline,
            ));
            parent.spawn((
                Text2d::default(),
                font.sized(20.0),
                TextColor(Color::WHITE),
                TextLayout::new_with_justify(JustifyText::Center),
                TextBounds::new(size.x, size.y),
                Transform::from_xyz(0.0, 0.0, 1.0),
                QuizText::ButtonLabel(spec.action),
            ));
        });
    }

    cmd.insert_resource(palette);
}

/// Highlights the button under the pointer on the active screen (fill, scale
/// and white outline) and switches the window cursor to a pointing hand while
/// one is hovered.
pub fn hover_buttons(
    mut cmd: Commands,
    windows: Query<(Entity, &Window), With<PrimaryWindow>>,
    cam: Query<(&Camera, &GlobalTransform)>,
    quiz: Res<Quiz>,
    palette: Res<ButtonPalette>,
    time: Res<Time>,
    mut buttons: Query<(
        &UiButton,
        &Children,
        &mut MeshMaterial2d<ColorMaterial>,
        &mut Transform,
    )>,
    mut outlines: Query<&mut Visibility, With<ButtonOutline>>,
    mut pointing: Local<bool>,
) {
    let Ok((window_entity, win)) = windows.get_single() else {
        return;
    };
    let pointer = pointer_position(win, &cam);
    let active = quiz.screen().kind();
    let ease = (12.0 * time.delta_secs()).min(1.0);

    let mut any_hovered = false;
    for (button, children, mut material, mut t) in buttons.iter_mut() {
        let hovered = is_hovered(&button.0, active, pointer);
        any_hovered |= hovered;

        let rim = if hovered {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
        let mut rims = outlines.iter_many_mut(children);
        while let Some(mut vis) = rims.fetch_next() {
            vis.set_if_neq(rim);
        }

        let wanted = if hovered { &palette.hover } else { &palette.idle };
        if material.0 != *wanted {
            material.0 = wanted.clone();
        }

        let target = if hovered { HOVER_SCALE } else { 1.0 };
        t.scale = t.scale.lerp(Vec3::splat(target), ease);
    }

    if any_hovered != *pointing {
        *pointing = any_hovered;
        let icon = if any_hovered {
            SystemCursorIcon::Pointer
        } else {
            SystemCursorIcon::Default
        };
        cmd.entity(window_entity).insert(CursorIcon::System(icon));
    }
}
