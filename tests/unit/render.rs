use super::*;
use crate::aggregate::categories::CountCategories;
use crate::aggregate::numeric::Count;
use crate::category::universe::CategoryUniverse;
use crate::foundation::core::Rgba8;
use crate::glyph::shape::ShapeCode;
use crate::shade::chain::GridForm;
use crate::shade::color::{ColorShader, HdAlpha};
use crate::shade::numeric::CellShader;

fn points() -> GlyphSet<&'static str> {
    GlyphSet::new(
        ShapeCode::Point,
        vec![
            [0.5, 0.5, 0.0, 0.0],
            [0.5, 0.5, 0.0, 0.0],
            [1.5, 0.5, 0.0, 0.0],
            [1.5, 1.5, 0.0, 0.0],
        ],
        vec!["a", "a", "b", "a"],
    )
    .unwrap()
}

#[test]
fn empty_chain_returns_the_aggregate() {
    let out = render(
        &points(),
        |_| (),
        &Count,
        &ShaderChain::new(),
        Screen::new(2, 2).unwrap(),
        ViewTransform::IDENTITY,
        &RenderSettings::default(),
    )
    .unwrap();
    assert_eq!(out.as_numeric().unwrap().data(), &[2.0, 1.0, 0.0, 1.0]);
}

#[test]
fn view_transform_is_applied_before_aggregation() {
    let vt = ViewTransform::new(0.0, 0.0, 2.0, 2.0).unwrap();
    let out = render(
        &points(),
        |_| (),
        &Count,
        &ShaderChain::new(),
        Screen::new(4, 4).unwrap(),
        vt,
        &RenderSettings::default(),
    )
    .unwrap();
    let grid = out.as_numeric().unwrap();
    assert_eq!(grid.get(1, 1, 0), Some(&2.0));
    assert_eq!(grid.get(3, 1, 0), Some(&1.0));
    assert_eq!(grid.get(3, 3, 0), Some(&1.0));
    assert_eq!(grid.sum(), 4.0);
}

#[test]
fn categories_through_hd_alpha_in_parallel() {
    let agg = CountCategories::new(CategoryUniverse::new(["a", "b"]).unwrap()).unwrap();
    let red = Rgba8::new(255, 0, 0, 255);
    let blue = Rgba8::new(0, 0, 255, 255);
    let chain = ShaderChain::for_input(GridForm::Stacked)
        .then(ColorShader::HdAlpha(HdAlpha::new(vec![red, blue])))
        .unwrap();
    let settings = RenderSettings {
        threading: AggregateThreading {
            parallel: true,
            chunk_size: 1,
            threads: Some(2),
        },
    };
    let out = render(
        &points(),
        |l: &&str| *l,
        &agg,
        &chain,
        Screen::new(2, 2).unwrap(),
        ViewTransform::IDENTITY,
        &settings,
    )
    .unwrap();
    let colors = out.as_color().unwrap();
    assert_eq!(colors.data()[0], red);
    assert_eq!(colors.data()[1], Rgba8::new(0, 0, 255, 127));
    assert_eq!(colors.data()[2], Rgba8::WHITE);
}

#[test]
fn shading_errors_surface_from_render() {
    let chain = ShaderChain::new().then(CellShader::ToCounts).unwrap();
    let err = render(
        &points(),
        |_| (),
        &Count,
        &chain,
        Screen::new(2, 2).unwrap(),
        ViewTransform::IDENTITY,
        &RenderSettings::default(),
    )
    .unwrap_err();
    assert!(matches!(err, crate::GlyphGridError::Shape(_)));
}
