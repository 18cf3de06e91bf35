use super::*;
use crate::glyph::glyphset::GlyphSet;

#[test]
fn count_overlapping_rects() {
    let gs = GlyphSet::new(
        ShapeCode::Rect,
        vec![[0.0, 0.0, 2.0, 2.0], [1.0, 1.0, 2.0, 1.0]],
        vec![(), ()],
    )
    .unwrap();
    let grid = Count
        .aggregate(&gs, |_| (), Screen::new(3, 3).unwrap())
        .unwrap();
    assert_eq!(
        grid.data(),
        &[1.0, 1.0, 0.0, 1.0, 2.0, 1.0, 0.0, 0.0, 0.0]
    );
}

#[test]
fn sum_adds_info_values_per_cell() {
    let gs = GlyphSet::new(
        ShapeCode::Point,
        vec![[1.0, 0.0, 0.0, 0.0], [1.0, 0.0, 0.0, 0.0], [0.0, 1.0, 0.0, 0.0]],
        vec![2.5, 0.5, -1.0],
    )
    .unwrap();
    let grid = Sum
        .aggregate(&gs, |v| *v, Screen::new(2, 2).unwrap())
        .unwrap();
    assert_eq!(grid.get(1, 0, 0), Some(&3.0));
    assert_eq!(grid.get(0, 1, 0), Some(&-1.0));
    assert_eq!(grid.get(0, 0, 0), Some(&0.0));
}

#[test]
fn combine_rejects_stacked_grid() {
    let mut grid = Grid::stacked(2, 2, 3, 0.0);
    let err = Count
        .combine(&mut grid, &Glyph::new(0, 0, 1, 1), ShapeCode::Point, &())
        .unwrap_err();
    assert!(matches!(err, crate::GlyphGridError::Shape(_)));
}
