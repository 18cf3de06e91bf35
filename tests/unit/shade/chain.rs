use super::*;
use crate::contour::Levels;
use crate::foundation::core::Rgba8;
use crate::grid::GridShape;
use crate::shade::color::{BinarySegment, InterpolateColors};
use crate::shade::numeric::Interpolate;

fn segment() -> ColorShader {
    ColorShader::BinarySegment(BinarySegment {
        low: Rgba8::WHITE,
        high: Rgba8::BLACK,
        divider: 1.0,
    })
}

#[test]
fn empty_chain_is_identity() {
    let g = Grid::stacked(2, 2, 2, 1.5);
    let out = ShaderChain::new().shade(g.clone()).unwrap();
    assert_eq!(out, Shaded::Numeric(g));
}

#[test]
fn nothing_follows_a_color_stage() {
    let chain = ShaderChain::new().then(segment()).unwrap();
    assert!(chain.is_terminal());
    let err = chain.then(CellShader::Floor).unwrap_err();
    assert!(matches!(err, GlyphGridError::Composition(_)));
}

#[test]
fn nothing_follows_a_contour_stage() {
    let err = ShaderChain::new()
        .then(Contour::default())
        .unwrap()
        .then(Spread::default())
        .unwrap_err();
    assert!(matches!(err, GlyphGridError::Composition(_)));
}

#[test]
fn known_form_mismatch_is_rejected_at_composition() {
    let err = ShaderChain::for_input(GridForm::Scalar)
        .then(CellShader::ToCounts)
        .unwrap_err();
    assert!(matches!(err, GlyphGridError::Composition(_)));

    // Collapsing to scalar makes the form known even without an input form.
    let err = ShaderChain::new()
        .then(CellShader::ToCounts)
        .unwrap()
        .then(CellShader::Select(0))
        .unwrap_err();
    assert!(matches!(err, GlyphGridError::Composition(_)));
}

#[test]
fn invalid_stage_parameters_are_rejected_at_composition() {
    let err = ShaderChain::new()
        .then(CellShader::Power(f64::NAN))
        .unwrap_err();
    assert!(matches!(err, GlyphGridError::Validation(_)));
}

#[test]
fn stacked_counts_to_colors() {
    let grid = Grid::from_vec(
        GridShape::stacked(3, 1, 2),
        vec![1.0, 1.0, 0.0, 4.0, 0.0, 0.0],
    )
    .unwrap();
    let chain = ShaderChain::for_input(GridForm::Stacked)
        .then(CellShader::ToCounts)
        .unwrap()
        .then(CellShader::Interpolate(Interpolate::new(0.0, 1.0)))
        .unwrap()
        .then(ColorShader::InterpolateColors(InterpolateColors::new(
            Rgba8::new(0, 0, 0, 255),
            Rgba8::new(200, 200, 200, 255),
        )))
        .unwrap();
    assert_eq!(chain.len(), 3);
    let out = chain.shade(grid).unwrap();
    let colors = out.as_color().unwrap();
    assert_eq!(colors.data()[0], Rgba8::new(100, 100, 100, 255));
    assert_eq!(colors.data()[1], Rgba8::new(200, 200, 200, 255));
    assert_eq!(colors.data()[2], Rgba8::new(0, 0, 0, 255));
}

#[test]
fn wrong_runtime_form_fails_at_shade_time() {
    let chain = ShaderChain::new().then(CellShader::ToCounts).unwrap();
    let err = chain.shade(Grid::zeros(2, 2)).unwrap_err();
    assert!(matches!(err, GlyphGridError::Shape(_)));
}

#[test]
fn contour_stage_yields_contours() {
    let grid = Grid::from_vec(GridShape::scalar(3, 2), vec![0.0, 1.0, 2.0, 0.0, 1.0, 2.0])
        .unwrap();
    let chain = ShaderChain::for_input(GridForm::Scalar)
        .then(Contour::with_levels(Levels::Explicit(vec![0.5])))
        .unwrap();
    let out = chain.shade(grid).unwrap();
    assert_eq!(out.as_contours().unwrap().len(), 1);
    assert!(out.as_numeric().is_none());
}

#[test]
fn stage_kinds() {
    assert_eq!(
        Shader::from(CellShader::Sqrt).kind(),
        ShaderKind::CellTransform
    );
    assert_eq!(Shader::from(segment()).kind(), ShaderKind::CellTransform);
    assert_eq!(
        Shader::from(Spread::default()).kind(),
        ShaderKind::NeighborhoodTransform
    );
    assert_eq!(
        Shader::from(Contour::default()).kind(),
        ShaderKind::ShapeTransform
    );
    assert!(!Shader::from(Spread::default()).is_terminal());
}
