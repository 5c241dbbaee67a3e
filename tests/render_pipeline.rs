use image::{Rgb, RgbImage};
use nalgebra::{Vector2, Vector3, Vector4};
use std::f32::consts::FRAC_PI_2;
use std::path::PathBuf;
use viewer3d::geometry::camera::Camera;
use viewer3d::material_system::Material;
use viewer3d::scene::{Face, Mesh, Object};
use viewer3d::{RenderBackend, RenderSettings, Renderer, Scene, VertexShape, Viewer};

const WIDTH: u32 = 64;
const HEIGHT: u32 = 48;

fn faces_only() -> RenderSettings {
    RenderSettings {
        render_dot: false,
        render_line: false,
        ..Default::default()
    }
}

/// 10x10 quad centred on the Z axis at depth `z`, facing +Z.
fn quad(name: &str, z: f32, material: Option<usize>) -> Object {
    let mut mesh = Mesh::new();
    mesh.add_vertex(-5.0, -5.0, z);
    mesh.add_vertex(5.0, -5.0, z);
    mesh.add_vertex(5.0, 5.0, z);
    mesh.add_vertex(-5.0, 5.0, z);
    mesh.add_normal(Vector3::z());
    mesh.add_uv(Vector2::new(0.0, 0.0), false);
    mesh.add_uv(Vector2::new(1.0, 0.0), false);
    mesh.add_uv(Vector2::new(1.0, 1.0), false);
    mesh.add_uv(Vector2::new(0.0, 1.0), false);
    assert!(mesh.add_face(Face::new([0, 1, 2], [0; 3], [0, 1, 2], material)));
    assert!(mesh.add_face(Face::new([0, 2, 3], [0; 3], [0, 2, 3], material)));
    Object::new(name, mesh)
}

fn flat_material(name: &str, ambient: [f32; 3]) -> Material {
    Material {
        ambient: Vector3::from(ambient),
        diffuse: Vector3::zeros(),
        ..Material::new(name)
    }
}

fn two_quad_scene(near_first: bool) -> Scene {
    let mut scene = Scene::new();
    if let Some(camera) = scene.camera_mut() {
        camera.set_aspect_ratio(WIDTH as f32 / HEIGHT as f32);
    }
    let red = scene.materials.add(flat_material("red", [1.0, 0.0, 0.0]));
    let blue = scene.materials.add(flat_material("blue", [0.0, 0.0, 1.0]));
    let near = quad("near", 10.0, Some(red));
    let far = quad("far", 0.0, Some(blue));
    if near_first {
        scene.add_object(near);
        scene.add_object(far);
    } else {
        scene.add_object(far);
        scene.add_object(near);
    }
    scene
}

fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("viewer3d_it_{}_{}", name, std::process::id()));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

const CENTER: (u32, u32) = (WIDTH / 2, HEIGHT / 2);

#[test]
fn nearer_surface_wins_regardless_of_order() {
    let renderer = Renderer::with_settings(WIDTH, HEIGHT, faces_only());
    let a = renderer.render(&two_quad_scene(true));
    let b = renderer.render(&two_quad_scene(false));

    assert_eq!(a, b);
    assert_eq!(*a.get_pixel(CENTER.0, CENTER.1), Rgb([100, 0, 0]));
    assert_eq!(*a.get_pixel(0, 0), Rgb([255, 255, 255]));
}

/// One mesh holding `copies` near/far pairs of the same overlapping quad.
fn stacked_quads(copies: usize, near_first: bool) -> Scene {
    let mut scene = Scene::new();
    if let Some(camera) = scene.camera_mut() {
        camera.set_aspect_ratio(WIDTH as f32 / HEIGHT as f32);
    }
    let red = scene.materials.add(flat_material("red", [1.0, 0.0, 0.0]));
    let blue = scene.materials.add(flat_material("blue", [0.0, 0.0, 1.0]));

    let mut mesh = Mesh::new();
    for z in [10.0, 0.0] {
        mesh.add_vertex(-5.0, -5.0, z);
        mesh.add_vertex(5.0, -5.0, z);
        mesh.add_vertex(5.0, 5.0, z);
        mesh.add_vertex(-5.0, 5.0, z);
    }
    mesh.add_normal(Vector3::z());
    mesh.add_uv(Vector2::zeros(), false);

    let quad_faces = |base: usize, material: usize| {
        [
            Face::new([base, base + 1, base + 2], [0; 3], [0; 3], Some(material)),
            Face::new([base, base + 2, base + 3], [0; 3], [0; 3], Some(material)),
        ]
    };
    let (first, second) = if near_first {
        (quad_faces(0, red), quad_faces(4, blue))
    } else {
        (quad_faces(4, blue), quad_faces(0, red))
    };
    for _ in 0..copies {
        for face in first.iter().chain(second.iter()) {
            assert!(mesh.add_face(*face));
        }
    }
    scene.add_mesh("stack", mesh);
    scene
}

#[test]
fn overlapping_faces_of_one_mesh_merge_deterministically() {
    let renderer = Renderer::with_settings(WIDTH, HEIGHT, faces_only());
    let a = renderer.render(&stacked_quads(64, true));
    let b = renderer.render(&stacked_quads(64, false));

    assert_eq!(a, b);
    assert_eq!(*a.get_pixel(CENTER.0, CENTER.1), Rgb([100, 0, 0]));
    for _ in 0..4 {
        assert_eq!(renderer.render(&stacked_quads(64, false)), a);
    }
}

#[test]
fn oversized_vertex_markers_cover_the_frame() {
    let settings = RenderSettings::default()
        .parse_line("1 0 0 211 50000 0 0 211 0 0 0")
        .expect("valid settings line");
    assert_eq!(settings.vertex_size, 50_000);

    let renderer = Renderer::with_settings(8, 8, settings);
    let mut scene = Scene::new();
    scene.add_object(quad("quad", 0.0, None));
    let image = renderer.render(&scene);

    assert_eq!(image.dimensions(), (8, 8));
    assert!(image.pixels().all(|p| *p == Rgb([0, 0, 211])));
}

#[test]
fn faces_off_leaves_only_overlays() {
    let settings = RenderSettings {
        render_face: false,
        render_dot: false,
        line_dashed: false,
        line_color: [0, 211, 0],
        ..Default::default()
    };
    let renderer = Renderer::with_settings(WIDTH, HEIGHT, settings);
    let image = renderer.render(&two_quad_scene(true));

    let line_pixels = image.pixels().filter(|p| **p == Rgb([0, 211, 0])).count();
    assert!(line_pixels > 0);
    assert!(image.pixels().all(|p| *p == Rgb([0, 211, 0]) || *p == Rgb([255, 255, 255])));
}

#[test]
fn vertex_markers_are_drawn_over_faces() {
    let settings = RenderSettings {
        render_line: false,
        vertex_shape: VertexShape::Square,
        vertex_size: 1,
        vertex_color: [0, 0, 211],
        ..Default::default()
    };
    let renderer = Renderer::with_settings(WIDTH, HEIGHT, settings);
    let mut scene = Scene::new();
    let red = scene.materials.add(flat_material("red", [1.0, 0.0, 0.0]));
    scene.add_object(quad("quad", 0.0, Some(red)));
    let image = renderer.render(&scene);

    assert!(image.pixels().any(|p| *p == Rgb([0, 0, 211])));
    assert!(image.pixels().any(|p| *p == Rgb([100, 0, 0])));
}

#[test]
fn resize_updates_buffers_and_camera() {
    let mut viewer = Viewer::new(WIDTH, HEIGHT);
    viewer.resize_buffers(30, 10);

    assert_eq!(viewer.image().dimensions(), (30, 10));
    assert_eq!(viewer.renderer().dimensions(), (30, 10));
    let aspect = viewer.scene().camera().map(|c| c.aspect_ratio).unwrap_or_default();
    assert!((aspect - 3.0).abs() < 1e-6);

    let frame = viewer.update_model();
    assert_eq!(frame.dimensions(), (30, 10));
    assert!(frame.pixels().all(|p| *p == Rgb([255, 255, 255])));
}

#[test]
fn readers_only_see_complete_frames() {
    let renderer = Renderer::with_settings(WIDTH, HEIGHT, faces_only());
    let scene = two_quad_scene(true);
    let blank = renderer.image();
    let finished = renderer.render(&scene);

    std::thread::scope(|s| {
        s.spawn(|| {
            for _ in 0..10 {
                renderer.render(&scene);
            }
        });
        s.spawn(|| {
            for _ in 0..50 {
                let seen: RgbImage = renderer.image();
                assert!(seen == finished || seen == blank);
            }
        });
    });
}

#[test]
fn settings_commands_and_persistence() {
    let viewer = Viewer::new(WIDTH, HEIGHT);
    viewer.change_render_dot_setting(false, [1, 2, 3], 7, VertexShape::Square);
    viewer.change_render_line_setting(true, [4, 5, 6], false);
    viewer.change_render_face_setting(true, false);

    let settings = viewer.settings();
    assert!(!settings.render_dot);
    assert_eq!(settings.vertex_color, [1, 2, 3]);
    assert_eq!(settings.vertex_size, 7);
    assert_eq!(settings.vertex_shape, VertexShape::Square);
    assert_eq!(settings.line_color, [4, 5, 6]);
    assert!(!settings.line_dashed && !settings.texture);

    let dir = temp_dir("settings");
    let good = dir.join("good.txt");
    viewer.save_settings(&good).expect("save");

    let other = Viewer::new(WIDTH, HEIGHT);
    other.load_settings(&good).expect("load");
    assert_eq!(other.settings().to_line(), settings.to_line());

    let bad = dir.join("bad.txt");
    std::fs::write(&bad, "1 2 3").expect("write");
    let before = other.settings();
    assert!(other.load_settings(&bad).is_err());
    assert_eq!(other.settings(), before);
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn movement_commands_target_active_object() {
    let mut viewer = Viewer::new(WIDTH, HEIGHT);
    assert!(!viewer.move_up(1.0));
    assert!(viewer.scale(2.0, 2.0, 2.0).is_err());

    viewer.scene_mut().add_object(quad("a", 0.0, None));
    assert!(viewer.move_forward(3.0));
    assert!(viewer.move_right(2.0));
    assert!(viewer.scale(1.0, 0.0, 1.0).is_err());

    let matrix = *viewer.scene().objects[0].transform.matrix();
    assert_eq!(matrix[(0, 3)], 2.0);
    assert_eq!(matrix[(2, 3)], -3.0);
}

#[test]
fn helper_commands_compose_on_active_object() {
    let mut viewer = Viewer::new(WIDTH, HEIGHT);
    viewer.scene_mut().add_object(quad("a", 0.0, None));

    assert!(viewer.move_left(1.5));
    assert!(viewer.move_down(2.0));
    assert!(viewer.move_backward(4.0));
    assert!(viewer.rotate_y(FRAC_PI_2));
    assert!(viewer.scale_uniform(2.0).is_ok());
    assert!(viewer.scale_uniform(0.0).is_err());

    // scale, then rotate about Y, then translate
    let moved = viewer.scene().objects[0]
        .transform
        .apply(&Vector4::new(1.0, 0.0, 0.0, 1.0));
    assert!((moved - Vector4::new(-1.5, -2.0, 2.0, 1.0)).norm() < 1e-5);
}

#[test]
fn switching_cameras_changes_the_view() {
    let mut viewer = Viewer::new(WIDTH, HEIGHT);
    viewer.scene_mut().add_object(quad("a", 0.0, None));
    let facing = viewer.update_model();
    assert!(facing.pixels().any(|p| *p != Rgb([255, 255, 255])));

    let away = Camera::new(
        Vector3::new(0.0, 0.0, 150.0),
        Vector3::new(0.0, 0.0, 300.0),
        Vector3::y(),
        10.0,
        WIDTH as f32 / HEIGHT as f32,
        1.0,
        10000.0,
    );
    let index = viewer.scene_mut().add_camera(away);
    assert!(viewer.scene_mut().set_active_camera(index + 1).is_err());
    viewer.scene_mut().set_active_camera(index).expect("camera exists");

    let turned = viewer.update_model();
    assert!(turned.pixels().all(|p| *p == Rgb([255, 255, 255])));

    viewer.scene_mut().set_active_camera(0).expect("camera exists");
    assert_eq!(viewer.update_model(), facing);
}

#[test]
fn loader_binds_materials_and_textures() {
    let dir = temp_dir("loader");
    RgbImage::from_pixel(2, 2, Rgb([255, 128, 0]))
        .save(dir.join("tex.png"))
        .expect("write texture");
    std::fs::write(
        dir.join("scene.mtl"),
        "newmtl lit\nKa 1 1 1\nKd 0 0 0\nmap_Kd tex.png\n\
         newmtl broken\nKa 0 1 0\nKd 0 0 0\nmap_Kd missing.png\n",
    )
    .expect("write mtl");
    let body = "v -5 -5 0\nv 5 -5 0\nv 5 5 0\nv -5 5 0\n\
                vt 0 0\nvt 1 0\nvt 1 1\nvt 0 1\nvn 0 0 1\n";
    std::fs::write(
        dir.join("textured.obj"),
        format!("mtllib scene.mtl\n{}usemtl lit\nf 1/1/1 2/2/1 3/3/1 4/4/1\n", body),
    )
    .expect("write obj");
    std::fs::write(
        dir.join("broken.obj"),
        format!("mtllib scene.mtl\n{}usemtl broken\nf 1/1/1 2/2/1 3/3/1 4/4/1\n", body),
    )
    .expect("write obj");

    let mut viewer = Viewer::new(WIDTH, HEIGHT);
    viewer.renderer().set_settings(faces_only());
    viewer.load_object(dir.join("textured.obj")).expect("load textured");

    let lit = viewer.scene().materials.id_of("lit").expect("lit material");
    assert!(viewer.scene().materials.get(lit).is_some_and(|m| m.has_texture()));

    let image = viewer.update_model();
    assert_eq!(*image.get_pixel(CENTER.0, CENTER.1), Rgb([100, 50, 0]));

    viewer.change_render_face_setting(true, false);
    let image = viewer.update_model();
    assert_eq!(*image.get_pixel(CENTER.0, CENTER.1), Rgb([100, 100, 100]));

    let mut viewer = Viewer::new(WIDTH, HEIGHT);
    viewer.renderer().set_settings(faces_only());
    viewer.load_object(dir.join("broken.obj")).expect("load broken");
    let broken = viewer.scene().materials.id_of("broken").expect("broken material");
    assert!(viewer.scene().materials.get(broken).is_some_and(|m| !m.has_texture()));
    let image = viewer.update_model();
    assert_eq!(*image.get_pixel(CENTER.0, CENTER.1), Rgb([0, 100, 0]));

    let _ = std::fs::remove_dir_all(&dir);
}
