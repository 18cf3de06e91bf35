use crate::{
    aggregate::categories::CountCategories,
    aggregate::histogram::PointHistogram,
    aggregate::numeric::{Count, Sum},
    category::universe::CategoryUniverse,
    contour::{Contour, Levels, TraceFormat},
    foundation::core::{Rgba8, ViewTransform},
    foundation::error::{GlyphGridError, GlyphGridResult},
    glyph::glyphset::GlyphSet,
    job::model::{AggregatorSpec, RenderJob, ShaderSpec},
    render::{RenderSettings, render},
    shade::chain::{GridForm, Shader, ShaderChain, Shaded},
    shade::color::{BinarySegment, ColorShader, HdAlpha, InterpolateColors, MinPercent},
    shade::numeric::{CellShader, Empty, Interpolate},
    shade::spread::{Spread, SpreadShape},
};

impl RenderJob {
    /// Form of the aggregate the job's aggregator produces.
    pub fn aggregate_form(&self) -> GridForm {
        match self.aggregator {
            AggregatorSpec::CountCategories { .. } => GridForm::Stacked,
            _ => GridForm::Scalar,
        }
    }

    /// Parse and compose the job's shader list. Fails before any data is touched.
    pub fn build_chain(&self) -> GlyphGridResult<ShaderChain> {
        let mut chain = ShaderChain::for_input(self.aggregate_form());
        for (i, spec) in self.shaders.iter().enumerate() {
            let stage = parse_shader(spec).map_err(|e| match e {
                GlyphGridError::Validation(msg) => {
                    GlyphGridError::validation(format!("shader {i} ('{}'): {msg}", spec.kind))
                }
                other => other,
            })?;
            chain = chain.then(stage)?;
        }
        Ok(chain)
    }

    /// Validate, build the chain, then render.
    #[tracing::instrument(skip(self), fields(records = self.records.len()))]
    pub fn run(&self) -> GlyphGridResult<Shaded> {
        self.validate()?;
        let chain = self.build_chain()?;
        let settings = RenderSettings {
            threading: self.threading.clone(),
        };
        let n = self.records.len();

        match &self.aggregator {
            AggregatorSpec::Count => {
                let glyphs = GlyphSet::new(self.shape, self.records.clone(), vec![(); n])?;
                let vt = self.view_for(&glyphs)?;
                render(&glyphs, |_| (), &Count, &chain, self.screen, vt, &settings)
            }
            AggregatorSpec::PointHistogram => {
                let glyphs = GlyphSet::new(self.shape, self.records.clone(), vec![(); n])?;
                let vt = self.view_for(&glyphs)?;
                render(&glyphs, |_| (), &PointHistogram, &chain, self.screen, vt, &settings)
            }
            AggregatorSpec::Sum => {
                let values = self
                    .values
                    .iter()
                    .map(|v| {
                        v.as_f64().ok_or_else(|| {
                            GlyphGridError::validation("sum values must be numbers")
                        })
                    })
                    .collect::<GlyphGridResult<Vec<f64>>>()?;
                let glyphs = GlyphSet::new(self.shape, self.records.clone(), values)?;
                let vt = self.view_for(&glyphs)?;
                render(&glyphs, |v: &f64| *v, &Sum, &chain, self.screen, vt, &settings)
            }
            AggregatorSpec::CountCategories { categories } => {
                let labels: Vec<String> = self.values.iter().map(|v| v.label()).collect();
                let universe = match categories {
                    Some(cats) => CategoryUniverse::new(cats.iter().cloned())?,
                    None => CategoryUniverse::scan(labels.iter()),
                };
                let aggregator = CountCategories::new(universe)?;
                let glyphs = GlyphSet::new(self.shape, self.records.clone(), labels)?;
                let vt = self.view_for(&glyphs)?;
                render(
                    &glyphs,
                    |l: &String| l.clone(),
                    &aggregator,
                    &chain,
                    self.screen,
                    vt,
                    &settings,
                )
            }
        }
    }

    fn view_for<D>(&self, glyphs: &GlyphSet<D>) -> GlyphGridResult<ViewTransform> {
        match (&self.view, &self.fit) {
            (Some(vt), _) => Ok(*vt),
            (None, Some(fit)) => match glyphs.bounds() {
                Some(bounds) => ViewTransform::zoom_fit(self.screen, bounds, fit.balanced),
                None => Ok(ViewTransform::IDENTITY),
            },
            (None, None) => Ok(ViewTransform::IDENTITY),
        }
    }
}

/// Turn one `{kind, params}` shader spec into a stage.
///
/// Kinds are matched case-insensitively and accept `-` for `_`.
pub fn parse_shader(spec: &ShaderSpec) -> GlyphGridResult<Shader> {
    let kind = spec.kind.trim().to_ascii_lowercase().replace('-', "_");
    if kind.is_empty() {
        return Err(GlyphGridError::validation("shader kind must be non-empty"));
    }
    let p = &spec.params;

    let stage: Shader = match kind.as_str() {
        "id" => CellShader::Id.into(),
        "floor" => CellShader::Floor.into(),
        "power" => CellShader::Power(get_f64(p, "exponent")?).into(),
        "sqrt" => CellShader::Sqrt.into(),
        "cuberoot" => CellShader::Cuberoot.into(),
        "log10" => CellShader::Log10.into(),
        "interpolate" => CellShader::Interpolate(Interpolate {
            low: opt_f64(p, "low")?.unwrap_or(0.0),
            high: opt_f64(p, "high")?.unwrap_or(1.0),
            empty: get_empty(p)?,
        })
        .into(),
        "to_counts" => CellShader::ToCounts.into(),
        "non_zeros" => CellShader::NonZeros.into(),
        "ratio" => CellShader::Ratio {
            focus: opt_usize(p, "focus")?,
        }
        .into(),
        "select" => CellShader::Select(get_usize(p, "plane")?).into(),
        "spread" => {
            let shape = match opt_str(p, "shape")?.unwrap_or("circle") {
                "circle" => SpreadShape::Circle,
                "rect" => SpreadShape::Rect,
                other => {
                    return Err(GlyphGridError::validation(format!(
                        "spread shape must be 'rect' or 'circle', got '{other}'"
                    )));
                }
            };
            Spread {
                factor: opt_usize(p, "factor")?.unwrap_or(1),
                shape,
                anti_alias: opt_bool(p, "anti_alias")?.unwrap_or(false),
            }
            .into()
        }
        "binary_segment" => ColorShader::BinarySegment(BinarySegment {
            low: get_color(p, "low")?,
            high: get_color(p, "high")?,
            divider: get_f64(p, "divider")?,
        })
        .into(),
        "interpolate_colors" => ColorShader::InterpolateColors(InterpolateColors {
            low: get_color(p, "low")?,
            high: get_color(p, "high")?,
            log: opt_f64(p, "log")?,
            reserve: opt_color(p, "reserve")?.unwrap_or(Rgba8::WHITE),
            empty: get_empty(p)?,
        })
        .into(),
        "min_percent" => {
            let category = opt_usize(p, "category")?.unwrap_or(0);
            let mut s = MinPercent::new(get_f64(p, "cutoff")?, category);
            if let Some(c) = opt_color(p, "above")? {
                s.above = c;
            }
            if let Some(c) = opt_color(p, "below")? {
                s.below = c;
            }
            if let Some(c) = opt_color(p, "background")? {
                s.background = c;
            }
            ColorShader::MinPercent(s).into()
        }
        "hd_alpha" => {
            let colors = match p.get("colors") {
                Some(v) => serde_json::from_value::<Vec<Rgba8>>(v.clone()).map_err(|e| {
                    GlyphGridError::validation(format!(
                        "shader param 'colors' must be a list of [r,g,b,a]: {e}"
                    ))
                })?,
                None => {
                    return Err(GlyphGridError::validation(
                        "missing shader param 'colors'",
                    ));
                }
            };
            let mut s = HdAlpha::new(colors);
            if let Some(c) = opt_color(p, "background")? {
                s.background = c;
            }
            s.alpha_min = opt_f64(p, "alpha_min")?.unwrap_or(0.0);
            s.log = opt_f64(p, "log")?;
            ColorShader::HdAlpha(s).into()
        }
        "contour" => {
            let levels = match p.get("levels") {
                None => Levels::Count(5),
                Some(v) if v.is_array() => Levels::Explicit(
                    serde_json::from_value::<Vec<f64>>(v.clone()).map_err(|_| {
                        GlyphGridError::validation("shader param 'levels' must be numbers")
                    })?,
                ),
                Some(_) => Levels::Count(get_usize(p, "levels")?),
            };
            let format = match opt_str(p, "format")?.unwrap_or("points") {
                "points" => TraceFormat::Points,
                "coords" => TraceFormat::Coords,
                other => {
                    return Err(GlyphGridError::validation(format!(
                        "contour format must be 'points' or 'coords', got '{other}'"
                    )));
                }
            };
            Contour {
                x_range: opt_range(p, "x_range")?,
                y_range: opt_range(p, "y_range")?,
                levels,
                format,
            }
            .into()
        }
        _ => {
            return Err(GlyphGridError::validation(format!(
                "unknown shader kind '{kind}'"
            )));
        }
    };
    Ok(stage)
}

fn get_f64(obj: &serde_json::Value, key: &str) -> GlyphGridResult<f64> {
    opt_f64(obj, key)?
        .ok_or_else(|| GlyphGridError::validation(format!("missing shader param '{key}'")))
}

fn opt_f64(obj: &serde_json::Value, key: &str) -> GlyphGridResult<Option<f64>> {
    let Some(v) = obj.get(key) else {
        return Ok(None);
    };
    let Some(n) = v.as_f64() else {
        return Err(GlyphGridError::validation(format!(
            "shader param '{key}' must be a number"
        )));
    };
    if !n.is_finite() {
        return Err(GlyphGridError::validation(format!(
            "shader param '{key}' must be finite"
        )));
    }
    Ok(Some(n))
}

fn get_usize(obj: &serde_json::Value, key: &str) -> GlyphGridResult<usize> {
    opt_usize(obj, key)?
        .ok_or_else(|| GlyphGridError::validation(format!("missing shader param '{key}'")))
}

fn opt_usize(obj: &serde_json::Value, key: &str) -> GlyphGridResult<Option<usize>> {
    let Some(v) = obj.get(key) else {
        return Ok(None);
    };
    let Some(n) = v.as_u64() else {
        return Err(GlyphGridError::validation(format!(
            "shader param '{key}' must be a non-negative integer"
        )));
    };
    usize::try_from(n)
        .map(Some)
        .map_err(|_| GlyphGridError::validation(format!("shader param '{key}' is out of range")))
}

fn opt_bool(obj: &serde_json::Value, key: &str) -> GlyphGridResult<Option<bool>> {
    match obj.get(key) {
        None => Ok(None),
        Some(v) => v.as_bool().map(Some).ok_or_else(|| {
            GlyphGridError::validation(format!("shader param '{key}' must be a boolean"))
        }),
    }
}

fn opt_str<'a>(obj: &'a serde_json::Value, key: &str) -> GlyphGridResult<Option<&'a str>> {
    match obj.get(key) {
        None => Ok(None),
        Some(v) => v.as_str().map(Some).ok_or_else(|| {
            GlyphGridError::validation(format!("shader param '{key}' must be a string"))
        }),
    }
}

fn get_color(obj: &serde_json::Value, key: &str) -> GlyphGridResult<Rgba8> {
    opt_color(obj, key)?
        .ok_or_else(|| GlyphGridError::validation(format!("missing shader param '{key}'")))
}

fn opt_color(obj: &serde_json::Value, key: &str) -> GlyphGridResult<Option<Rgba8>> {
    let Some(v) = obj.get(key) else {
        return Ok(None);
    };
    serde_json::from_value::<Rgba8>(v.clone())
        .map(Some)
        .map_err(|_| {
            GlyphGridError::validation(format!(
                "shader param '{key}' must be [r,g,b,a] with 0..=255 channels"
            ))
        })
}

fn opt_range(obj: &serde_json::Value, key: &str) -> GlyphGridResult<Option<(f64, f64)>> {
    let Some(v) = obj.get(key) else {
        return Ok(None);
    };
    let pair = serde_json::from_value::<[f64; 2]>(v.clone()).map_err(|_| {
        GlyphGridError::validation(format!("shader param '{key}' must be [min, max]"))
    })?;
    Ok(Some((pair[0], pair[1])))
}

/// `empty` absent or null means NaN cells are empty; a number names the sentinel.
fn get_empty(obj: &serde_json::Value) -> GlyphGridResult<Empty> {
    match obj.get("empty") {
        None | Some(serde_json::Value::Null) => Ok(Empty::Nan),
        Some(_) => Ok(Empty::Value(get_f64(obj, "empty")?)),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/job/build.rs"]
mod tests;
