//! One-shot construction of the helicopter scene.

use crate::constants::*;
use crate::error::CoreError;
use crate::mesh::Shape;
use crate::scene::{
    AmbientLight, DirectionalLight, Material, MeshDesc, NodeId, NodeKind, Scene, Shading,
    TextureSlot,
};
use crate::transform::Transform;
use glam::Vec3;
use std::f32::consts::FRAC_PI_2;

/// Nodes the update loop needs to reach after assembly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SceneHandles {
    pub helicopter: NodeId,
    pub main_rotor: NodeId,
    pub tail_rotor: NodeId,
    pub ground: NodeId,
    pub sky: NodeId,
}

fn mesh(shape: Shape, material: Material) -> NodeKind {
    NodeKind::Mesh(MeshDesc { shape, material })
}

fn cuboid([width, height, depth]: [f32; 3]) -> Shape {
    Shape::Box {
        width,
        height,
        depth,
    }
}

pub fn build_scene() -> Result<(Scene, SceneHandles), CoreError> {
    let mut scene = Scene::new(
        AmbientLight {
            color: WHITE,
            intensity: AMBIENT_INTENSITY,
        },
        DirectionalLight {
            color: WHITE,
            intensity: SUN_INTENSITY,
            position: SUN_START,
        },
    );

    let body = Material::textured(Shading::Unlit, TextureSlot::Body);
    let rotor = Material::textured(Shading::Unlit, TextureSlot::Rotor);
    let black = Material::unlit(BLACK);
    let lay_flat = Vec3::new(0.0, 0.0, FRAC_PI_2);

    let helicopter = scene.add("helicopter", NodeKind::Group, Transform::at(HELICOPTER_START))?;
    scene.add_child(
        helicopter,
        "fuselage",
        mesh(
            Shape::Cylinder {
                radius: FUSELAGE_RADIUS,
                height: FUSELAGE_LENGTH,
                segments: ROUND_SEGMENTS,
            },
            body,
        ),
        Transform::default().with_rotation(lay_flat),
    )?;
    scene.add_child(
        helicopter,
        "cockpit",
        mesh(
            Shape::Sphere {
                radius: COCKPIT_RADIUS,
                width_segments: ROUND_SEGMENTS,
                height_segments: ROUND_SEGMENTS,
            },
            black,
        ),
        Transform::at(COCKPIT_OFFSET),
    )?;
    let main_rotor = scene.add_child(
        helicopter,
        "main_rotor",
        mesh(cuboid(MAIN_ROTOR_SIZE), rotor),
        Transform::at(Vec3::new(0.0, MAIN_ROTOR_HEIGHT, 0.0)),
    )?;
    scene.add_child(
        helicopter,
        "tail_boom",
        mesh(
            Shape::Cylinder {
                radius: TAIL_BOOM_RADIUS,
                height: TAIL_BOOM_LENGTH,
                segments: ROUND_SEGMENTS,
            },
            body,
        ),
        Transform::at(TAIL_BOOM_OFFSET).with_rotation(lay_flat),
    )?;
    let tail_rotor = scene.add_child(
        helicopter,
        "tail_rotor",
        mesh(cuboid(TAIL_ROTOR_SIZE), rotor),
        Transform::at(TAIL_ROTOR_OFFSET),
    )?;

    for (name, z) in [("skid_1", SKID_SPAN_Z), ("skid_2", -SKID_SPAN_Z)] {
        scene.add_child(
            helicopter,
            name,
            mesh(cuboid(SKID_SIZE), black),
            Transform::at(Vec3::new(0.0, SKID_HEIGHT, z)),
        )?;
    }
    let connectors = [
        ("skid_connector_1", SKID_CONNECTOR_XS[0], SKID_SPAN_Z),
        ("skid_connector_2", SKID_CONNECTOR_XS[0], -SKID_SPAN_Z),
        ("skid_connector_3", SKID_CONNECTOR_XS[1], SKID_SPAN_Z),
        ("skid_connector_4", SKID_CONNECTOR_XS[1], -SKID_SPAN_Z),
    ];
    for (name, x, z) in connectors {
        scene.add_child(
            helicopter,
            name,
            mesh(cuboid(SKID_CONNECTOR_SIZE), black),
            Transform::at(Vec3::new(x, SKID_CONNECTOR_HEIGHT, z)),
        )?;
    }

    let ground = scene.add(
        "ground",
        mesh(
            Shape::Plane {
                width: GROUND_SIZE,
                height: GROUND_SIZE,
            },
            Material::textured(Shading::Lit, TextureSlot::Ground),
        ),
        Transform::at(Vec3::new(0.0, GROUND_HEIGHT, 0.0)).with_rotation(Vec3::new(-FRAC_PI_2, 0.0, 0.0)),
    )?;
    let sky = scene.add(
        "sky",
        mesh(
            Shape::Sphere {
                radius: SKY_RADIUS,
                width_segments: SKY_WIDTH_SEGMENTS,
                height_segments: SKY_HEIGHT_SEGMENTS,
            },
            Material::textured(Shading::Unlit, TextureSlot::Sky),
        ),
        Transform::default(),
    )?;

    log::debug!("[scene] assembled {} nodes", scene.len());
    Ok((
        scene,
        SceneHandles {
            helicopter,
            main_rotor,
            tail_rotor,
            ground,
            sky,
        },
    ))
}
