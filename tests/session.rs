use curvegrab::digitizer::{Click, Digitizer, Effect, Mode, Point};
use curvegrab::export;
use curvegrab::DigitizeError;
use tempfile::tempdir;

fn calibrated() -> Digitizer {
    let mut d = Digitizer::default();
    d.toggle_mode(Mode::PlacingAxis).unwrap();
    for (pixel, value) in [
        ((0.0, 100.0), "0, 0"),
        ((100.0, 100.0), "10, 0"),
        ((0.0, 0.0), "0, 10"),
    ] {
        let effect = d.on_pixel_click(Click::Primary, Point::from(pixel));
        assert!(matches!(effect, Effect::AxisPlaced { .. }));
        d.on_value_submitted(value).unwrap();
    }
    d
}

#[test]
fn clicked_points_become_data_rows() {
    let mut d = calibrated();
    d.toggle_mode(Mode::AddingPoints).unwrap();
    d.on_pixel_click(Click::Primary, Point::new(50.0, 100.0));
    d.on_pixel_click(Click::Primary, Point::new(20.0, 50.0));

    let rows = d.calculate_all().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!((rows[0].x, rows[0].y), (5.0, 0.0));
    assert_eq!((rows[1].x, rows[1].y), (2.0, 5.0));
    assert_eq!(rows[1].point_index, 2);
}

#[test]
fn adding_points_before_calibration_is_refused() {
    let mut d = Digitizer::default();
    assert!(matches!(
        d.toggle_mode(Mode::AddingPoints),
        Err(DigitizeError::InsufficientCalibration { axes: 0 })
    ));
    assert_eq!(d.mode(), Mode::Idle);
    assert!(d.add_point(Point::new(1.0, 1.0)).is_err());
    assert!(!d.can_undo());
}

#[test]
fn deleting_a_curve_renumbers_later_curves() {
    let mut d = calibrated();
    d.add_point(Point::new(10.0, 10.0)).unwrap();
    let second = d.add_curve().unwrap();
    d.add_point(Point::new(20.0, 20.0)).unwrap();
    let third = d.add_curve().unwrap();
    d.add_point(Point::new(30.0, 30.0)).unwrap();
    assert_eq!((second, third), (2, 3));

    d.delete_curve(2).unwrap();
    let ids: Vec<usize> = d.curves().curves().iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![1, 2]);
    assert_eq!(d.curves().get(2).unwrap().points, vec![Point::new(30.0, 30.0)]);
    assert_eq!(d.curves().current_id(), 2);

    let rows = d.calculate_all().unwrap();
    assert_eq!(rows.iter().map(|r| r.curve_id).collect::<Vec<_>>(), vec![1, 2]);
}

#[test]
fn last_curve_cannot_be_deleted() {
    let mut d = Digitizer::default();
    assert!(matches!(
        d.delete_curve(1),
        Err(DigitizeError::LastCurveProtected)
    ));
}

#[test]
fn undo_and_redo_walk_the_history() {
    let mut d = calibrated();
    d.add_point(Point::new(40.0, 40.0)).unwrap();
    d.add_curve().unwrap();

    assert_eq!(d.undo().unwrap(), "Add curve");
    assert_eq!(d.curves().len(), 1);
    assert_eq!(d.undo().unwrap(), "Add point");
    assert_eq!(d.curves().total_points(), 0);

    assert_eq!(d.redo().unwrap(), "Add point");
    assert_eq!(d.curves().total_points(), 1);

    // A fresh edit drops the redo branch.
    d.add_point(Point::new(41.0, 41.0)).unwrap();
    assert!(matches!(d.redo(), Err(DigitizeError::NothingToRedo)));
}

#[test]
fn collinear_third_value_keeps_axis_pending() {
    let mut d = Digitizer::default();
    d.toggle_mode(Mode::PlacingAxis).unwrap();
    d.on_pixel_click(Click::Primary, Point::new(0.0, 0.0));
    d.on_value_submitted("0, 0").unwrap();
    d.on_pixel_click(Click::Primary, Point::new(10.0, 10.0));
    d.on_value_submitted("1 1").unwrap();
    d.on_pixel_click(Click::Primary, Point::new(20.0, 30.0));

    assert!(matches!(
        d.on_value_submitted("2;2"),
        Err(DigitizeError::DegenerateCalibration)
    ));
    assert_eq!(d.pending_axis(), Some(Point::new(20.0, 30.0)));
    d.on_value_submitted("2, 5").unwrap();
    assert!(d.calibration().is_complete());
}

#[test]
fn exported_csv_matches_table() {
    let mut d = calibrated();
    d.add_point(Point::new(50.0, 100.0)).unwrap();
    let rows = d.export_table().unwrap();

    let dir = tempdir().unwrap();
    let path = dir.path().join("out.csv");
    export::write_csv(&path, &rows).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written, "curve,name,point,x,y\n1,Curve1,1,5,0\n");
}

#[test]
fn renamed_curve_with_line_break_exports_one_record() {
    let mut d = calibrated();
    d.rename_curve(1, "Run\rA").unwrap();
    d.add_point(Point::new(50.0, 100.0)).unwrap();
    let csv = export::to_csv(&d.export_table().unwrap()).unwrap();
    assert_eq!(csv, "curve,name,point,x,y\n1,\"Run\rA\",1,5,0\n");
}

#[test]
fn export_to_missing_directory_fails() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing").join("out.csv");
    let err = export::write_csv(&path, &[]).unwrap_err();
    assert!(matches!(err, DigitizeError::FileWrite { .. }));
}

#[test]
fn render_model_reports_interpolation_failure() {
    let mut d = calibrated();
    for (x, y) in [
        (0.0, 0.0),
        (0.0, 1.0),
        (10.0, 2.0),
        (20.0, 3.0),
        (30.0, 4.0),
        (30.0, 5.0),
        (40.0, 6.0),
    ] {
        d.add_point(Point::new(x, y)).unwrap();
    }
    let model = d.render_model();
    let curve = &model.curves[0];
    assert_eq!(curve.points.len(), 7);
    assert!(curve.segments.is_empty());
    assert!(curve.failure.is_some());
}
