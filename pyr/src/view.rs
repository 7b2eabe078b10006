// view.rs      View module
//
// Copyright (c) 2022-2024  Douglas Lau
//
use crate::material::{PyramidMaterial, PyramidMaterialPlugin};
use crate::mesh::{build_curve, build_sphere};
use bevy::{
    prelude::*,
    window::{PrimaryWindow, Window},
};
use pyramid::{Camera, Command, Mode, Scene};

/// Key bindings for scene commands
const KEY_COMMANDS: [(KeyCode, Command); 7] = [
    (KeyCode::KeyM, Command::ToggleWireframe),
    (KeyCode::KeyQ, Command::DecreaseDepth),
    (KeyCode::KeyE, Command::IncreaseDepth),
    (KeyCode::KeyI, Command::DecreaseRounds),
    (KeyCode::KeyJ, Command::IncreaseRounds),
    (KeyCode::KeyA, Command::ToggleAnimation),
    (KeyCode::KeyL, Command::ToggleShading),
];

/// Scene resource
#[derive(Resource)]
struct SceneRes {
    scene: Scene,
}

/// Asset handles for the scene
#[derive(Resource)]
struct SceneHandles {
    sphere: Handle<Mesh>,
    curve: Handle<Mesh>,
    sphere_material: Handle<PyramidMaterial>,
    curve_material: Handle<PyramidMaterial>,
}

/// Status text
#[derive(Component)]
struct Status;

/// View a scene in an app window
pub fn view_scene(scene: Scene) {
    let mut app = App::new();
    app.insert_resource(SceneRes { scene })
        .insert_resource(ClearColor(Color::BLACK))
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "pyramid".to_string(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(PyramidMaterialPlugin)
        .add_systems(Startup, spawn_scene)
        .add_systems(
            Update,
            (handle_keys, animate, update_meshes, update_status).chain(),
        )
        .run();
}

/// Get the aspect ratio of the primary window
fn primary_aspect(windows: &Query<&Window, With<PrimaryWindow>>) -> f32 {
    match windows.get_single() {
        Ok(window) if window.height() > 0.0 => window.width() / window.height(),
        _ => 1.0,
    }
}

/// Convert a camera to a bevy transform and projection
///
/// The transform is the inverse of the camera's view matrix.
fn camera_bundle(camera: &Camera) -> Camera3dBundle {
    let to_world = camera.view().inverse().to_cols_array();
    Camera3dBundle {
        transform: Transform::from_matrix(Mat4::from_cols_array(&to_world)),
        projection: Projection::Perspective(PerspectiveProjection {
            fov: camera.fov().to_radians(),
            near: Camera::NEAR,
            far: Camera::FAR,
            ..default()
        }),
        ..default()
    }
}

/// System to spawn the scene
fn spawn_scene(
    mut commands: Commands,
    scene_res: Res<SceneRes>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<PyramidMaterial>>,
) {
    let scene = &scene_res.scene;
    let camera = scene.camera(primary_aspect(&windows));
    let frame = scene.frame(&camera);
    let handles = SceneHandles {
        sphere: meshes.add(build_sphere(&frame)),
        curve: meshes.add(build_curve(&frame)),
        sphere_material: materials.add(PyramidMaterial::new(&frame.sphere)),
        curve_material: materials.add(PyramidMaterial::new(&frame.line)),
    };
    commands.spawn(MaterialMeshBundle {
        mesh: handles.sphere.clone(),
        material: handles.sphere_material.clone(),
        ..default()
    });
    commands.spawn(MaterialMeshBundle {
        mesh: handles.curve.clone(),
        material: handles.curve_material.clone(),
        ..default()
    });
    commands.insert_resource(handles);
    let camera_id = commands.spawn(camera_bundle(&frame.camera)).id();
    spawn_help(&mut commands, camera_id);
    info!("scene spawned: {} triangles", frame.triangles);
}

/// Spawn help and status text
fn spawn_help(commands: &mut Commands, camera_id: Entity) {
    commands.spawn((
        TargetCamera(camera_id),
        TextBundle::from_section(
            "_____ Keys _____\n\
             'M': wireframe / shaded\n\
             'Q' / 'E': sphere depth -/+\n\
             'I' / 'J': curve rounds -/+\n\
             'A': start / stop animation\n\
             'L': Gouraud / Phong",
            TextStyle {
                font_size: 18.0,
                ..default()
            },
        )
        .with_style(Style {
            position_type: PositionType::Absolute,
            top: Val::Px(12.0),
            right: Val::Px(12.0),
            ..default()
        }),
    ));
    commands.spawn((
        Status,
        TargetCamera(camera_id),
        TextBundle::from_section(
            "",
            TextStyle {
                font_size: 18.0,
                ..default()
            },
        )
        .with_style(Style {
            position_type: PositionType::Absolute,
            top: Val::Px(12.0),
            left: Val::Px(12.0),
            ..default()
        }),
    ));
}

/// System to handle key presses
fn handle_keys(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut scene_res: ResMut<SceneRes>,
) {
    for (key, cmd) in KEY_COMMANDS {
        if keyboard.just_pressed(key) {
            match scene_res.scene.handle(cmd) {
                Ok(refresh) => debug!("{cmd:?}: {refresh:?}"),
                Err(e) => error!("{cmd:?}: {e}"),
            }
        }
    }
}

/// System to advance the animation (once per frame)
fn animate(mut scene_res: ResMut<SceneRes>) {
    if scene_res.scene.mode() == Mode::Animating {
        scene_res.scene.tick();
    }
}

/// System to upload changed frames
fn update_meshes(
    scene_res: Res<SceneRes>,
    handles: Res<SceneHandles>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<PyramidMaterial>>,
) {
    if !scene_res.is_changed() {
        return;
    }
    let scene = &scene_res.scene;
    let camera = scene.camera(primary_aspect(&windows));
    let frame = scene.frame(&camera);
    if let Some(mesh) = meshes.get_mut(&handles.sphere) {
        *mesh = build_sphere(&frame);
    }
    if let Some(mesh) = meshes.get_mut(&handles.curve) {
        *mesh = build_curve(&frame);
    }
    if let Some(material) = materials.get_mut(&handles.sphere_material) {
        material.update(&frame.sphere);
    }
    if let Some(material) = materials.get_mut(&handles.curve_material) {
        material.update(&frame.line);
    }
}

/// System to update status text
fn update_status(
    scene_res: Res<SceneRes>,
    mut query: Query<&mut Text, With<Status>>,
) {
    if !scene_res.is_changed() {
        return;
    }
    let scene = &scene_res.scene;
    for mut text in &mut query {
        text.sections[0].value = format!(
            "depth: {}\nrounds: {}\nwaypoint: {} / {}\n{:?} {:?}{}",
            scene.depth(),
            scene.rounds(),
            scene.cursor(),
            scene.path().len(),
            scene.mode(),
            scene.shading(),
            if scene.is_wireframe() { " wireframe" } else { "" },
        );
    }
}
