//! Particle entities: the ambient dots and pooled firework sparks.

use bevy::prelude::*;

use crate::layout::canvas_to_world;
use crate::particles::AmbientField;
use crate::session::Quiz;

const Z_AMBIENT: f32 = -5.0;
const Z_SPARK: f32 = 4.0;

/// Mesh entity mirroring one particle of the [`AmbientField`].
#[derive(Component)]
pub struct AmbientDot(pub usize);

#[derive(Component)]
pub struct SparkDot;

/// Reusable spark entities, each with its own material so alpha can fade.
/// Grows to the largest spark count seen; unused dots are hidden.
#[derive(Resource)]
pub struct SparkPool {
    mesh: Handle<Mesh>,
    dots: Vec<(Entity, Handle<ColorMaterial>)>,
}

pub fn spawn_ambient_dots(
    mut cmd: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut mats: ResMut<Assets<ColorMaterial>>,
    field: Res<AmbientField>,
) {
    // Unit diameter, scaled per particle.
    let dot = meshes.add(Circle::new(0.5));
    for (i, p) in field.particles().iter().enumerate() {
        let color = Color::srgba(1.0, 1.0, 1.0, p.opacity / 255.0);
        cmd.spawn((
            Mesh2d(dot.clone()),
            MeshMaterial2d(mats.add(ColorMaterial::from(color))),
            Transform::from_translation(canvas_to_world(p.position).extend(Z_AMBIENT))
                .with_scale(Vec3::splat(p.radius)),
            AmbientDot(i),
        ));
    }

    cmd.insert_resource(SparkPool {
        mesh: dot,
        dots: Vec::new(),
    });
}

pub fn sync_ambient_dots(field: Res<AmbientField>, mut dots: Query<(&AmbientDot, &mut Transform)>) {
    let particles = field.particles();
    for (dot, mut t) in dots.iter_mut() {
        let Some(p) = particles.get(dot.0) else {
            continue;
        };
        t.translation = canvas_to_world(p.position).extend(Z_AMBIENT);
    }
}

pub fn sync_sparks(
    mut cmd: Commands,
    quiz: Res<Quiz>,
    mut pool: ResMut<SparkPool>,
    mut mats: ResMut<Assets<ColorMaterial>>,
    mut dots: Query<(&mut Transform, &mut Visibility), With<SparkDot>>,
) {
    let sparks = quiz
        .fireworks()
        .bursts()
        .iter()
        .flat_map(|burst| burst.sparks.iter().map(move |spark| (burst.color, spark)));

    let mut used = 0;
    for (color, spark) in sparks {
        let color = color.with_alpha(spark.alpha());
        let transform = Transform::from_translation(canvas_to_world(spark.position).extend(Z_SPARK))
            .with_scale(Vec3::splat(spark.radius));

        if used < pool.dots.len() {
            let (entity, material) = pool.dots[used].clone();
            if let Some(m) = mats.get_mut(&material) {
                m.color = color;
            }
            if let Ok((mut t, mut vis)) = dots.get_mut(entity) {
                *t = transform;
                vis.set_if_neq(Visibility::Visible);
            }
        } else {
            let material = mats.add(ColorMaterial::from(color));
            let entity = cmd
                .spawn((
                    Mesh2d(pool.mesh.clone()),
                    MeshMaterial2d(material.clone()),
                    transform,
                    SparkDot,
                ))
                .id();
            pool.dots.push((entity, material));
        }
        used += 1;
    }

    for (entity, _) in pool.dots.iter().skip(used) {
        if let Ok((_, mut vis)) = dots.get_mut(*entity) {
            vis.set_if_neq(Visibility::Hidden);
        }
    }
}
