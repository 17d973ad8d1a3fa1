use glam::{Vec2, Vec3};
use heli_core::constants::{CAMERA_START, SUN_START};
use heli_core::{AppState, InputParams, Viewport};

fn mk_app() -> AppState {
    AppState::new(Viewport::new(1280, 720, 1.0).unwrap(), InputParams::default()).unwrap()
}

fn assert_vec_close(got: Vec3, want: Vec3) {
    assert!((got - want).length() < 1e-4, "got {got:?}, want {want:?}");
}

#[test]
fn moves_without_drag_leave_light_untouched() {
    let mut app = mk_app();
    let before = app.light_position();
    for p in [Vec2::new(10.0, 10.0), Vec2::new(300.0, -40.0), Vec2::ZERO] {
        assert!(!app.on_pointer_move(p));
    }
    assert_eq!(app.light_position(), before);
    assert_eq!(before, SUN_START);
}

#[test]
fn horizontal_drag_yaws_light_about_y() {
    let mut app = mk_app();
    app.scene.sun.position = Vec3::new(0.0, 0.0, 10.0);
    app.on_pointer_down(Vec2::new(100.0, 100.0));
    assert!(app.on_pointer_move(Vec2::new(110.0, 100.0)));

    let t = 10f32.to_radians();
    assert_vec_close(app.light_position(), Vec3::new(10.0 * t.sin(), 0.0, 10.0 * t.cos()));
}

#[test]
fn vertical_drag_pitches_light_about_x() {
    let mut app = mk_app();
    app.scene.sun.position = Vec3::new(0.0, 0.0, 10.0);
    app.on_pointer_down(Vec2::new(50.0, 50.0));
    app.on_pointer_move(Vec2::new(50.0, 60.0));

    let t = 10f32.to_radians();
    assert_vec_close(app.light_position(), Vec3::new(0.0, -10.0 * t.sin(), 10.0 * t.cos()));
}

#[test]
fn first_move_uses_press_position_not_stale_pointer() {
    let mut app = mk_app();
    app.on_pointer_down(Vec2::new(400.0, 300.0));
    app.on_pointer_move(Vec2::new(400.0, 300.0));
    assert_vec_close(app.light_position(), SUN_START);
}

#[test]
fn combined_delta_applies_x_then_y_order() {
    let mut app = mk_app();
    let start = app.light_position();
    app.on_pointer_down(Vec2::new(0.0, 0.0));
    app.on_pointer_move(Vec2::new(30.0, 20.0));

    let q = glam::Quat::from_rotation_x(20f32.to_radians()) * glam::Quat::from_rotation_y(30f32.to_radians());
    assert_vec_close(app.light_position(), q * start);
}

#[test]
fn drag_rotation_preserves_light_distance() {
    let mut app = mk_app();
    let r0 = app.light_position().length();
    app.on_pointer_down(Vec2::new(0.0, 0.0));
    for i in 1..50 {
        app.on_pointer_move(Vec2::new(i as f32 * 7.0, i as f32 * -3.0));
    }
    assert!((app.light_position().length() - r0).abs() < 1e-3);
}

#[test]
fn release_and_leave_both_end_the_drag() {
    let mut app = mk_app();
    app.on_pointer_down(Vec2::new(0.0, 0.0));
    app.on_pointer_up();
    let after_up = app.light_position();
    assert!(!app.on_pointer_move(Vec2::new(25.0, 25.0)));
    assert_eq!(app.light_position(), after_up);

    app.on_pointer_down(Vec2::new(0.0, 0.0));
    assert!(app.input.is_dragging());
    app.on_pointer_leave();
    assert!(!app.input.is_dragging());
    assert!(!app.on_pointer_move(Vec2::new(-25.0, 5.0)));
    assert_eq!(app.light_position(), after_up);
}

#[test]
fn arrow_up_then_down_restores_camera_exactly() {
    let mut app = mk_app();
    assert_eq!(app.camera.position, CAMERA_START);
    assert!(app.on_key_down("ArrowUp"));
    assert_eq!(app.camera.position, CAMERA_START + Vec3::Y);
    assert!(app.on_key_down("ArrowDown"));
    assert_eq!(app.camera.position, CAMERA_START);
}

#[test]
fn each_binding_moves_one_axis_by_one_unit() {
    let cases = [
        ("ArrowUp", Vec3::new(0.0, 1.0, 0.0)),
        ("ArrowDown", Vec3::new(0.0, -1.0, 0.0)),
        ("ArrowLeft", Vec3::new(-1.0, 0.0, 0.0)),
        ("ArrowRight", Vec3::new(1.0, 0.0, 0.0)),
        ("w", Vec3::new(0.0, 0.0, -1.0)),
        ("s", Vec3::new(0.0, 0.0, 1.0)),
    ];
    for (key, offset) in cases {
        let mut app = mk_app();
        assert!(app.on_key_down(key), "{key} should be bound");
        assert_eq!(app.camera.position, CAMERA_START + offset, "{key}");
    }
}

#[test]
fn repeated_key_downs_each_apply_a_full_step() {
    let mut app = mk_app();
    for _ in 0..5 {
        app.on_key_down("w");
    }
    assert_eq!(app.camera.position, CAMERA_START - Vec3::new(0.0, 0.0, 5.0));
}

#[test]
fn unrecognized_keys_leave_camera_unchanged() {
    let mut app = mk_app();
    for key in ["a", "d", "q", " ", "Enter", "Shift", "ArrowUpX", "x"] {
        assert!(!app.on_key_down(key), "{key} should be ignored");
    }
    assert_eq!(app.camera.position, CAMERA_START);
}

#[test]
fn shifted_w_and_s_do_not_move_the_camera() {
    let mut app = mk_app();
    assert!(!app.on_key_down("W"));
    assert!(!app.on_key_down("S"));
    assert_eq!(app.camera.position, CAMERA_START);
}

#[test]
fn custom_step_scales_camera_movement() {
    let params = InputParams {
        camera_step: 0.5,
        ..Default::default()
    };
    let mut app = AppState::new(Viewport::new(10, 10, 1.0).unwrap(), params).unwrap();
    app.on_key_down("ArrowRight");
    assert_eq!(app.camera.position, CAMERA_START + Vec3::new(0.5, 0.0, 0.0));
}
