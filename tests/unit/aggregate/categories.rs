use super::*;
use crate::glyph::glyphset::GlyphSet;

fn universe() -> CategoryUniverse<&'static str> {
    CategoryUniverse::new(["a", "b"]).unwrap()
}

#[test]
fn counts_each_label_in_its_plane() {
    let gs = GlyphSet::new(
        ShapeCode::Point,
        vec![[0.0, 0.0, 0.0, 0.0]; 5],
        vec!["a", "b", "a", "b", "a"],
    )
    .unwrap();
    let agg = CountCategories::new(universe()).unwrap();
    let grid = agg
        .aggregate(&gs, |l| *l, Screen::new(1, 1).unwrap())
        .unwrap();
    assert_eq!(grid.depth(), Some(2));
    assert_eq!(grid.cell(0, 0), Some(&[3.0, 2.0][..]));
}

#[test]
fn empty_universe_is_rejected() {
    let err = CountCategories::new(CategoryUniverse::<&str>::new([]).unwrap()).unwrap_err();
    assert!(matches!(err, GlyphGridError::Category(_)));
}

#[test]
fn unknown_label_is_an_error() {
    let agg = CountCategories::new(universe()).unwrap();
    let mut grid = agg.allocate(Screen::new(2, 2).unwrap());
    let err = agg
        .combine(&mut grid, &Glyph::new(0, 0, 1, 1), ShapeCode::Point, &"z")
        .unwrap_err();
    assert!(matches!(err, GlyphGridError::Category(_)));
}

#[test]
fn depth_mismatch_is_an_error() {
    let agg = CountCategories::new(universe()).unwrap();
    let mut grid = Grid::stacked(2, 2, 3, 0.0);
    let err = agg
        .combine(&mut grid, &Glyph::new(0, 0, 1, 1), ShapeCode::Point, &"a")
        .unwrap_err();
    assert!(matches!(err, GlyphGridError::Category(_)));
}
