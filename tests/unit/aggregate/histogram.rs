use super::*;
use crate::aggregate::numeric::Count;

#[test]
fn matches_count_and_drops_off_canvas_points() {
    let gs = GlyphSet::new(
        ShapeCode::Point,
        vec![
            [0.0, 0.0, 0.0, 0.0],
            [2.9, 1.1, 0.0, 0.0],
            [2.0, 1.0, 0.0, 0.0],
            [-1.0, 0.0, 0.0, 0.0],
            [3.0, 0.0, 0.0, 0.0],
        ],
        vec![(); 5],
    )
    .unwrap();
    let screen = Screen::new(3, 2).unwrap();
    let hist = PointHistogram.aggregate(&gs, |_| (), screen).unwrap();
    let count = Count.aggregate(&gs, |_| (), screen).unwrap();
    assert_eq!(hist, count);
    assert_eq!(hist.sum(), 3.0);
    assert_eq!(hist.get(2, 1, 0), Some(&2.0));
}

#[test]
fn rejects_non_point_glyphs() {
    let gs = GlyphSet::new(ShapeCode::Rect, vec![[0.0, 0.0, 1.0, 1.0]], vec![()]).unwrap();
    let err = PointHistogram
        .aggregate(&gs, |_| (), Screen::new(2, 2).unwrap())
        .unwrap_err();
    assert!(matches!(err, GlyphGridError::Validation(_)));
}
