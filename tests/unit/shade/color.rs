use super::*;
use crate::grid::GridShape;

const RED: Rgba8 = Rgba8::new(255, 0, 0, 255);
const BLUE: Rgba8 = Rgba8::new(0, 0, 255, 255);

fn row(values: &[f64]) -> Grid<f64> {
    Grid::from_vec(GridShape::scalar(values.len(), 1), values.to_vec()).unwrap()
}

#[test]
fn binary_segment_divider_belongs_to_high() {
    let s = BinarySegment {
        low: RED,
        high: BLUE,
        divider: 2.0,
    };
    let out = s.apply(&row(&[1.0, 2.0, 3.0])).unwrap();
    assert_eq!(out.data(), &[RED, BLUE, BLUE]);
}

#[test]
fn interpolate_colors_linear_truncates_channels() {
    let s = InterpolateColors::new(Rgba8::new(0, 0, 0, 255), Rgba8::WHITE);
    let out = s.apply(&row(&[0.0, 5.0, 10.0, f64::NAN])).unwrap();
    assert_eq!(out.data()[0], Rgba8::new(0, 0, 0, 255));
    assert_eq!(out.data()[1], Rgba8::new(127, 127, 127, 255));
    assert_eq!(out.data()[2], Rgba8::WHITE);
    assert_eq!(out.data()[3], Rgba8::WHITE);
}

#[test]
fn interpolate_colors_log_mode_reserves_non_positive() {
    let reserve = Rgba8::new(9, 9, 9, 9);
    let s = InterpolateColors::new(Rgba8::new(0, 0, 0, 0), Rgba8::new(200, 100, 0, 255))
        .with_log(2.0)
        .with_reserve(reserve);
    let out = s.apply(&row(&[1.0, 2.0, 4.0, 0.0, -3.0])).unwrap();
    assert_eq!(out.data()[0], Rgba8::new(0, 0, 0, 0));
    assert_eq!(out.data()[1], Rgba8::new(100, 50, 0, 127));
    assert_eq!(out.data()[2], Rgba8::new(200, 100, 0, 255));
    assert_eq!(&out.data()[3..], &[reserve, reserve]);
}

#[test]
fn interpolate_colors_all_empty_is_reserve() {
    let s = InterpolateColors::new(RED, BLUE).with_empty(Empty::Value(0.0));
    let out = s.apply(&row(&[0.0, 0.0])).unwrap();
    assert!(out.data().iter().all(|c| *c == Rgba8::WHITE));
}

#[test]
fn interpolate_colors_rejects_bad_log_base() {
    let s = InterpolateColors::new(RED, BLUE).with_log(1.0);
    assert!(s.validate().is_err());
}

#[test]
fn min_percent_splits_on_category_share() {
    let grid = Grid::from_vec(
        GridShape::stacked(3, 1, 2),
        vec![3.0, 1.0, 1.0, 3.0, 0.0, 0.0],
    )
    .unwrap();
    let s = MinPercent::new(0.5, 0);
    let out = s.apply(&grid).unwrap();
    assert_eq!(out.data(), &[s.above, s.below, s.background]);
    assert!(MinPercent::new(0.5, 2).apply(&grid).is_err());
}

#[test]
fn hd_alpha_blends_by_share_and_scales_alpha_by_total() {
    let grid = Grid::from_vec(
        GridShape::stacked(4, 1, 2),
        vec![1.0, 1.0, 2.0, 0.0, 0.0, 1.0, 0.0, 0.0],
    )
    .unwrap();
    let out = HdAlpha::new(vec![RED, BLUE]).apply(&grid).unwrap();
    assert_eq!(out.data()[0], Rgba8::new(127, 0, 127, 255));
    assert_eq!(out.data()[1], Rgba8::new(255, 0, 0, 255));
    assert_eq!(out.data()[2], Rgba8::new(0, 0, 255, 127));
    assert_eq!(out.data()[3], Rgba8::WHITE);
}

#[test]
fn hd_alpha_alpha_min_and_color_padding() {
    let grid = Grid::from_vec(GridShape::stacked(2, 1, 3), vec![0.0, 0.0, 4.0, 0.0, 1.0, 1.0])
        .unwrap();
    let mut s = HdAlpha::new(vec![RED, BLUE]);
    s.alpha_min = 0.5;
    let out = s.apply(&grid).unwrap();
    // Third category reuses the last color.
    assert_eq!(out.data()[0], Rgba8::new(0, 0, 255, 255));
    // Total 2 of max 4: 0.5 + 0.5 * 0.5.
    assert_eq!(out.data()[1].a, 191);
}

#[test]
fn hd_alpha_log_scale_with_unit_maximum_is_opaque() {
    let grid = Grid::from_vec(GridShape::stacked(1, 1, 1), vec![1.0]).unwrap();
    let mut s = HdAlpha::new(vec![RED]);
    s.log = Some(10.0);
    assert_eq!(s.apply(&grid).unwrap().data()[0].a, 255);
}

#[test]
fn hd_alpha_validation() {
    assert!(HdAlpha::new(Vec::new()).validate().is_err());
    let mut s = HdAlpha::new(vec![RED]);
    s.alpha_min = 1.5;
    assert!(s.validate().is_err());
    assert!(HdAlpha::new(vec![RED]).apply(&Grid::zeros(2, 2)).is_err());
}
