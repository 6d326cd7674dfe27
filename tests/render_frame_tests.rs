use spring_rs::core::{PathId, PointMm, Polyline, ViewportContext, ViewportVersion};
use spring_rs::render::{
    Color, LineCap, LinePattern, NullRenderer, PathPrimitive, RenderFrame, Renderer, StrokeStyle,
};

fn viewport() -> ViewportContext {
    ViewportContext::with_uniform_scale((800.0, 600.0), 0.25, ViewportVersion::new(0))
        .expect("valid viewport")
}

fn primitive(points: Vec<PointMm>) -> PathPrimitive {
    let mut primitive = PathPrimitive::new(StrokeStyle::default());
    primitive.push(Polyline::new(PathId::new(0), points));
    primitive
}

#[test]
fn empty_frame_is_valid_and_empty() {
    let frame = RenderFrame::new(viewport());
    assert!(frame.validate().is_ok());
    assert!(frame.is_empty());
    assert_eq!(frame.point_count(), 0);
}

#[test]
fn null_renderer_records_frame_statistics() {
    let frame = RenderFrame::new(viewport())
        .with_path(primitive(vec![
            PointMm::new(0.0, 0.0),
            PointMm::new(10.0, 0.0),
        ]))
        .with_path({
            let mut second = PathPrimitive::new(StrokeStyle::new(Color::rgb(0.0, 1.0, 0.0), 1.0));
            second.push(Polyline::new(
                PathId::new(1),
                vec![
                    PointMm::new(0.0, 5.0),
                    PointMm::new(5.0, 5.0),
                    PointMm::new(10.0, 5.0),
                ],
            ));
            second
        });

    let mut renderer = NullRenderer::default();
    renderer.render(&frame).expect("render");
    assert_eq!(renderer.last_path_count, 2);
    assert_eq!(renderer.last_point_count, 5);
}

#[test]
fn invalid_geometry_is_caught_before_a_backend_sees_it() {
    let frame = RenderFrame::new(viewport()).with_path(primitive(vec![
        PointMm::new(0.0, 0.0),
        PointMm::new(f64::INFINITY, 0.0),
    ]));

    let mut renderer = NullRenderer::default();
    assert!(renderer.render(&frame).is_err());
}

#[test]
fn invalid_style_is_caught_by_frame_validation() {
    let mut bad = PathPrimitive::new(StrokeStyle::new(Color::rgb(0.0, 0.0, 2.0), 0.5));
    bad.push(Polyline::new(PathId::new(0), vec![PointMm::new(0.0, 0.0)]));
    let frame = RenderFrame::new(viewport()).with_path(bad);
    assert!(frame.validate().is_err());
}

#[test]
fn frame_round_trips_through_serde_json() {
    let style = StrokeStyle::new(Color::rgba(0.2, 0.3, 0.4, 0.9), 0.75)
        .with_pattern(LinePattern::DashDot)
        .with_cap(LineCap::Round);
    let mut path = PathPrimitive::new(style);
    path.push(Polyline::new(
        PathId::new(3),
        vec![PointMm::new(1.5, -2.5), PointMm::new(3.25, 4.75)],
    ));
    let frame = RenderFrame::new(viewport()).with_path(path);

    let json = serde_json::to_string(&frame).expect("serialize");
    let back: RenderFrame = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, frame);
}

#[test]
fn dash_arrays_scale_with_stroke_width() {
    assert!(LinePattern::Solid.dash_array(1.0).is_empty());
    assert_eq!(
        LinePattern::DashDot.dash_array(2.0).as_slice(),
        &[8.0, 6.0, 2.0, 6.0]
    );
    assert_eq!(
        LinePattern::Custom(vec![1.0, 2.0]).dash_array(99.0).as_slice(),
        &[1.0, 2.0]
    );
}
