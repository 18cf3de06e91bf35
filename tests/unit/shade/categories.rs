use super::*;
use crate::grid::GridShape;
use crate::GlyphGridError;

/// Two cells, three categories: `[1, 2, 3]` and an empty cell.
fn stacked() -> Grid<f64> {
    Grid::from_vec(
        GridShape::stacked(2, 1, 3),
        vec![1.0, 2.0, 3.0, 0.0, 0.0, 0.0],
    )
    .unwrap()
}

#[test]
fn to_counts_and_non_zeros_collapse_categories() {
    let counts = to_counts(&stacked()).unwrap();
    assert!(!counts.is_stacked());
    assert_eq!(counts.data(), &[6.0, 0.0]);
    assert_eq!(non_zeros(&stacked()).unwrap().data(), &[3.0, 0.0]);
}

#[test]
fn ratio_uses_focus_or_largest_plane_and_zero_for_empty() {
    assert_eq!(ratio(&stacked(), None).unwrap().data(), &[0.5, 0.0]);
    assert_eq!(ratio(&stacked(), Some(0)).unwrap().data(), &[1.0 / 6.0, 0.0]);
    assert!(matches!(
        ratio(&stacked(), Some(3)).unwrap_err(),
        GlyphGridError::Bounds(_)
    ));
}

#[test]
fn select_extracts_one_plane() {
    assert_eq!(select(&stacked(), 1).unwrap().data(), &[2.0, 0.0]);
    assert!(matches!(
        select(&stacked(), 5).unwrap_err(),
        GlyphGridError::Bounds(_)
    ));
}

#[test]
fn scalar_input_is_a_shape_error() {
    let err = to_counts(&Grid::zeros(2, 2)).unwrap_err();
    assert!(matches!(err, GlyphGridError::Shape(_)));
}
