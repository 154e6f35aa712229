use cairo::{Context, ImageSurface};
use inkboard::draw::color::{BACKGROUND, BLUE, RED};
use inkboard::draw::{
    BlendMode, Rgba, Shape, ShapeKind, ShapeParams, StrokeStyle, Surface, render_shape,
};
use inkboard::input::{ControllerSettings, PointerEvent, Region, Tool};
use inkboard::script::Script;
use inkboard::util::Point;
use inkboard::SurfaceController;

fn surface_with_context(width: i32, height: i32) -> (ImageSurface, Context) {
    let surface = ImageSurface::create(cairo::Format::ARgb32, width, height).unwrap();
    let ctx = Context::new(&surface).unwrap();
    (surface, ctx)
}

fn surface_has_pixels(surface: &mut ImageSurface) -> bool {
    surface
        .data()
        .map(|data| data.iter().any(|byte| *byte != 0))
        .unwrap_or(false)
}

fn red_style(width: f64) -> StrokeStyle {
    StrokeStyle {
        color: RED,
        width,
        blend: BlendMode::Normal,
    }
}

#[test]
fn every_shape_kind_renders_pixels() {
    for kind in ShapeKind::ALL {
        let (mut surface, ctx) = surface_with_context(100, 100);
        let shape = Shape::Outline {
            kind,
            start: Point::new(20.0, 20.0),
            end: Point::new(70.0, 80.0),
            style: red_style(3.0),
            params: ShapeParams::default(),
        };
        render_shape(&ctx, &shape).unwrap();
        drop(ctx);
        assert!(
            surface_has_pixels(&mut surface),
            "{kind:?} should render pixels"
        );
    }
}

#[test]
fn degenerate_shapes_render_nothing() {
    for kind in ShapeKind::ALL {
        let (mut surface, ctx) = surface_with_context(40, 40);
        let shape = Shape::Outline {
            kind,
            start: Point::new(20.0, 20.0),
            end: Point::new(20.0, 20.0),
            style: red_style(8.0),
            params: ShapeParams::default(),
        };
        render_shape(&ctx, &shape).unwrap();
        drop(ctx);
        assert!(!surface_has_pixels(&mut surface), "{kind:?} drew a dot");
    }
}

#[test]
fn star_first_tip_points_up() {
    let mut surface = Surface::new(100, 100, 1.0, BACKGROUND).unwrap();
    {
        let ctx = surface.context().unwrap();
        let shape = Shape::Outline {
            kind: ShapeKind::Star,
            start: Point::new(50.0, 50.0),
            end: Point::new(50.0, 10.0),
            style: red_style(4.0),
            params: ShapeParams::default(),
        };
        render_shape(&ctx, &shape).unwrap();
    }

    // Outer radius 40: the top tip sits at (50, 10)
    assert_eq!(surface.pixel(50, 11), Some(Rgba::from_color(RED)));
    assert_eq!(surface.pixel(50, 50), Some(Rgba::from_color(BACKGROUND)));
}

#[test]
fn triangle_apex_is_centered_on_start_edge() {
    let mut controller = SurfaceController::new(ControllerSettings::default());
    controller
        .init_surface(Region::sized(100.0, 100.0), 1.0)
        .unwrap();
    controller.set_tool(Tool::Triangle);
    controller.set_color(BLUE);

    controller.on_pointer_down(&PointerEvent::mouse(10.0, 10.0, 1));
    controller.on_pointer_up(&PointerEvent::mouse(90.0, 90.0, 0));

    let surface = controller.surface_mut().unwrap();
    assert_eq!(surface.pixel(50, 10), Some(Rgba::from_color(BLUE)));
    // Base runs along y = 90
    assert_eq!(surface.pixel(30, 90), Some(Rgba::from_color(BLUE)));
    // Left top corner is not part of the triangle
    assert_eq!(surface.pixel(12, 12), Some(Rgba::from_color(BACKGROUND)));
}

#[test]
fn script_render_matches_direct_events() {
    let script = Script::from_json(
        r##"{
            "width": 80, "height": 60,
            "steps": [
                {"tool": "diamond"}, {"color": "#0000ff"}, {"brush": 6},
                {"down": [10, 10]}, {"move": [40, 30]}, {"up": [70, 50]},
                {"tool": "pen"}, {"color": "red"},
                {"down": [5, 55]}, {"move": [75, 55]}, {"up": [75, 55]}
            ]
        }"##,
    )
    .unwrap();
    let mut scripted = SurfaceController::new(ControllerSettings::default());
    script.run(&mut scripted, 1.0).unwrap();

    let mut direct = SurfaceController::new(ControllerSettings::default());
    direct.init_surface(Region::sized(80.0, 60.0), 1.0).unwrap();
    direct.set_tool(Tool::Diamond);
    direct.set_color(BLUE);
    direct.set_brush_size(6);
    direct.on_pointer_down(&PointerEvent::mouse(10.0, 10.0, 1));
    direct.on_pointer_move(&PointerEvent::mouse(40.0, 30.0, 1));
    direct.on_pointer_up(&PointerEvent::mouse(70.0, 50.0, 0));
    direct.set_tool(Tool::Pen);
    direct.set_color(RED);
    direct.on_pointer_down(&PointerEvent::mouse(5.0, 55.0, 1));
    direct.on_pointer_move(&PointerEvent::mouse(75.0, 55.0, 1));
    direct.on_pointer_up(&PointerEvent::mouse(75.0, 55.0, 0));

    assert_eq!(scripted.frame(), direct.frame());
    assert_eq!(scripted.frame().len(), 2);

    let (mut a, mut b) = (Vec::new(), Vec::new());
    scripted.surface().unwrap().write_png(&mut a).unwrap();
    direct.surface().unwrap().write_png(&mut b).unwrap();
    assert_eq!(a, b);
}

#[test]
fn high_density_surface_keeps_logical_coordinates() {
    let script = Script::from_json(
        r#"{
            "width": 50, "height": 50, "device_pixel_ratio": 3,
            "steps": [
                {"tool": "line"}, {"color": "red"},
                {"down": [0, 25]}, {"up": [50, 25]}
            ]
        }"#,
    )
    .unwrap();
    let mut controller = SurfaceController::new(ControllerSettings::default());
    script.run(&mut controller, 1.0).unwrap();

    let surface = controller.surface_mut().unwrap();
    assert_eq!(surface.physical_size(), (150, 150));
    assert_eq!(
        surface.pixel_at_logical(25.0, 25.0),
        Some(Rgba::from_color(RED))
    );
    assert_eq!(
        surface.pixel_at_logical(25.0, 10.0),
        Some(Rgba::from_color(BACKGROUND))
    );
}
