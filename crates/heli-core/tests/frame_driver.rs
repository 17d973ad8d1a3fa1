use heli_core::{AppState, Camera, FrameDriver, FrameScheduler, InputParams, LoopPhase, Scene, SceneRenderer, Viewport};
use std::cell::RefCell;
use std::f32::consts::TAU;
use std::rc::Rc;

type Log = Rc<RefCell<Vec<&'static str>>>;

struct Scheduler {
    log: Log,
}

impl FrameScheduler for Scheduler {
    fn request_frame(&mut self) {
        self.log.borrow_mut().push("schedule");
    }
}

struct Renderer {
    log: Log,
    fail: bool,
    seen_vehicle_x: Vec<f32>,
}

impl SceneRenderer for Renderer {
    type Error = &'static str;

    fn render(&mut self, scene: &Scene, _camera: &Camera) -> Result<(), Self::Error> {
        self.log.borrow_mut().push("render");
        let heli = scene.find("helicopter").unwrap();
        self.seen_vehicle_x
            .push(scene.node(heli).unwrap().transform.position.x);
        if self.fail {
            Err("context lost")
        } else {
            Ok(())
        }
    }
}

fn mk_app() -> AppState {
    AppState::new(Viewport::new(800, 600, 1.0).unwrap(), InputParams::default()).unwrap()
}

fn mk_parts(fail: bool) -> (Log, Scheduler, Renderer) {
    let log: Log = Rc::new(RefCell::new(Vec::new()));
    let scheduler = Scheduler { log: log.clone() };
    let renderer = Renderer {
        log: log.clone(),
        fail,
        seen_vehicle_x: Vec::new(),
    };
    (log, scheduler, renderer)
}

fn angle_close(a: f32, b: f32, tol: f32) -> bool {
    let d = (a - b).rem_euclid(TAU);
    d.min(TAU - d) < tol
}

#[test]
fn next_frame_is_scheduled_before_render() {
    let mut app = mk_app();
    let (log, mut scheduler, mut renderer) = mk_parts(false);
    let mut driver = FrameDriver::default();
    assert_eq!(driver.phase(), LoopPhase::Idle);

    driver.start(&mut scheduler);
    assert_eq!(driver.phase(), LoopPhase::Scheduled);
    driver.tick(&mut app, &mut scheduler, &mut renderer).unwrap();
    driver.tick(&mut app, &mut scheduler, &mut renderer).unwrap();

    assert_eq!(
        log.borrow().as_slice(),
        &["schedule", "schedule", "render", "schedule", "render"]
    );
    assert_eq!(driver.phase(), LoopPhase::Scheduled);
}

#[test]
fn failed_render_still_leaves_next_frame_scheduled() {
    let mut app = mk_app();
    let (log, mut scheduler, mut renderer) = mk_parts(true);
    let mut driver = FrameDriver::default();

    let result = driver.tick(&mut app, &mut scheduler, &mut renderer);
    assert_eq!(result, Err("context lost"));
    assert_eq!(log.borrow().as_slice(), &["schedule", "render"]);
    assert_eq!(driver.phase(), LoopPhase::Scheduled);
    assert_eq!(app.motion.frames, 1);
}

#[test]
fn rotors_advance_by_fixed_step_modulo_tau() {
    let mut app = mk_app();
    let (_log, mut scheduler, mut renderer) = mk_parts(false);
    let mut driver = FrameDriver::default();

    for n in 1..=500u32 {
        driver.tick(&mut app, &mut scheduler, &mut renderer).unwrap();
        let main = app.motion.main_rotor_angle;
        let tail = app.motion.tail_rotor_angle;
        assert!((0.0..TAU).contains(&main));
        assert!((0.0..TAU).contains(&tail));
        assert!(angle_close(main, 0.2 * n as f32, 1e-3), "main at {n}: {main}");
        assert!(angle_close(tail, 0.5 * n as f32, 1e-3), "tail at {n}: {tail}");
    }
}

#[test]
fn rotor_transforms_follow_motion_state() {
    let mut app = mk_app();
    let (_log, mut scheduler, mut renderer) = mk_parts(false);
    let mut driver = FrameDriver::default();
    driver.tick(&mut app, &mut scheduler, &mut renderer).unwrap();

    let main = app.scene.node(app.handles.main_rotor).unwrap().transform;
    let tail = app.scene.node(app.handles.tail_rotor).unwrap().transform;
    assert!((main.rotation.y - 0.2).abs() < 1e-6);
    assert_eq!(main.rotation.x, 0.0);
    assert!((tail.rotation.z - 0.5).abs() < 1e-6);
    assert_eq!(tail.rotation.y, 0.0);
}

#[test]
fn vehicle_advances_linearly_and_never_resets() {
    let mut app = mk_app();
    let (_log, mut scheduler, mut renderer) = mk_parts(false);
    let mut driver = FrameDriver::default();

    for _ in 0..1000 {
        driver.tick(&mut app, &mut scheduler, &mut renderer).unwrap();
    }
    assert!((app.motion.vehicle_x - 20.0).abs() < 1e-9);
    assert_eq!(app.motion.frames, 1000);
    // Each render saw the position already advanced for its own frame.
    assert!((renderer.seen_vehicle_x[0] - 0.02).abs() < 1e-6);
    assert!(renderer
        .seen_vehicle_x
        .windows(2)
        .all(|w| w[1] > w[0]));
}

#[test]
fn advance_without_render_moves_one_step() {
    let mut app = mk_app();
    let driver = FrameDriver::default();
    driver.advance(&mut app);
    let heli = app.scene.node(app.handles.helicopter).unwrap().transform;
    assert!((heli.position.x - 0.02).abs() < 1e-6);
    assert_eq!(heli.position.y, 2.0);
}
