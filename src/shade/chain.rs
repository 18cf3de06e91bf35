use crate::{
    contour::{Contour, ContourSet},
    foundation::error::{GlyphGridError, GlyphGridResult},
    grid::{ColorGrid, Grid},
    shade::color::ColorShader,
    shade::numeric::CellShader,
    shade::spread::Spread,
};

/// Stage kinds, by how much of the grid a stage looks at per output cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShaderKind {
    CellTransform,
    NeighborhoodTransform,
    ShapeTransform,
}

/// Layout of a numeric grid flowing through a chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GridForm {
    Scalar,
    Stacked,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Shader {
    Cell(CellShader),
    Spread(Spread),
    Color(ColorShader),
    Contour(Contour),
}

impl From<CellShader> for Shader {
    fn from(s: CellShader) -> Self {
        Self::Cell(s)
    }
}

impl From<Spread> for Shader {
    fn from(s: Spread) -> Self {
        Self::Spread(s)
    }
}

impl From<ColorShader> for Shader {
    fn from(s: ColorShader) -> Self {
        Self::Color(s)
    }
}

impl From<Contour> for Shader {
    fn from(s: Contour) -> Self {
        Self::Contour(s)
    }
}

impl Shader {
    pub fn kind(&self) -> ShaderKind {
        match self {
            Self::Cell(_) | Self::Color(_) => ShaderKind::CellTransform,
            Self::Spread(_) => ShaderKind::NeighborhoodTransform,
            Self::Contour(_) => ShaderKind::ShapeTransform,
        }
    }

    /// Terminal stages produce colors or geometry; nothing can follow them.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Color(_) | Self::Contour(_))
    }

    pub fn validate(&self) -> GlyphGridResult<()> {
        match self {
            Self::Cell(s) => s.validate(),
            Self::Spread(_) => Ok(()),
            Self::Color(s) => s.validate(),
            Self::Contour(s) => s.validate(),
        }
    }

    /// Input form the stage insists on, `None` when it takes either.
    fn required_form(&self) -> Option<GridForm> {
        match self {
            Self::Cell(s) if s.needs_stacked() => Some(GridForm::Stacked),
            Self::Color(s) if s.needs_stacked() => Some(GridForm::Stacked),
            Self::Color(_) | Self::Contour(_) => Some(GridForm::Scalar),
            Self::Cell(_) | Self::Spread(_) => None,
        }
    }

    /// Form of the numeric output given the input form; stacked-only cell shaders
    /// collapse to scalar, everything else preserves its input.
    fn output_form(&self, input: Option<GridForm>) -> Option<GridForm> {
        match self {
            Self::Cell(s) if s.needs_stacked() => Some(GridForm::Scalar),
            _ => input,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Cell(CellShader::Id) => "id",
            Self::Cell(CellShader::Floor) => "floor",
            Self::Cell(CellShader::Power(_)) => "power",
            Self::Cell(CellShader::Sqrt) => "sqrt",
            Self::Cell(CellShader::Cuberoot) => "cuberoot",
            Self::Cell(CellShader::Log10) => "log10",
            Self::Cell(CellShader::Interpolate(_)) => "interpolate",
            Self::Cell(CellShader::ToCounts) => "to_counts",
            Self::Cell(CellShader::NonZeros) => "non_zeros",
            Self::Cell(CellShader::Ratio { .. }) => "ratio",
            Self::Cell(CellShader::Select(_)) => "select",
            Self::Spread(_) => "spread",
            Self::Color(ColorShader::BinarySegment(_)) => "binary_segment",
            Self::Color(ColorShader::InterpolateColors(_)) => "interpolate_colors",
            Self::Color(ColorShader::MinPercent(_)) => "min_percent",
            Self::Color(ColorShader::HdAlpha(_)) => "hd_alpha",
            Self::Contour(_) => "contour",
        }
    }
}

/// Output of a chain: whatever its last stage produced.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Shaded {
    Numeric(Grid<f64>),
    Color(ColorGrid),
    Contours(ContourSet),
}

impl Shaded {
    pub fn as_numeric(&self) -> Option<&Grid<f64>> {
        match self {
            Self::Numeric(g) => Some(g),
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<&ColorGrid> {
        match self {
            Self::Color(g) => Some(g),
            _ => None,
        }
    }

    pub fn as_contours(&self) -> Option<&ContourSet> {
        match self {
            Self::Contours(c) => Some(c),
            _ => None,
        }
    }
}

/// An ordered, checked sequence of shader stages.
///
/// Stages are appended with [`ShaderChain::then`], which rejects anything after a
/// terminal stage and any stage whose required input form contradicts what the chain
/// already knows it will produce. All of this is decided while the chain is built, so
/// a chain that exists can only fail at shade time on data it has not seen (a grid of
/// the wrong form or depth). The empty chain is the identity.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ShaderChain {
    stages: Vec<Shader>,
    form: Option<GridForm>,
    terminal: bool,
}

impl ShaderChain {
    /// Empty chain over input of unknown form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty chain whose input is known to have `form`.
    pub fn for_input(form: GridForm) -> Self {
        Self {
            form: Some(form),
            ..Self::default()
        }
    }

    pub fn then(mut self, stage: impl Into<Shader>) -> GlyphGridResult<Self> {
        let stage = stage.into();
        if self.terminal {
            let last = self.stages.last().map(Shader::name).unwrap_or("terminal stage");
            return Err(GlyphGridError::composition(format!(
                "cannot append '{}' after terminal stage '{last}'",
                stage.name()
            )));
        }
        stage.validate()?;
        if let (Some(required), Some(known)) = (stage.required_form(), self.form)
            && required != known
        {
            return Err(GlyphGridError::composition(format!(
                "'{}' needs {required:?} input but the chain produces {known:?} grids",
                stage.name()
            )));
        }
        self.form = stage.output_form(self.form.or(stage.required_form()));
        self.terminal = stage.is_terminal();
        self.stages.push(stage);
        Ok(self)
    }

    pub fn stages(&self) -> &[Shader] {
        &self.stages
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    /// Known form of the numeric output; meaningless for terminal chains.
    pub fn output_form(&self) -> Option<GridForm> {
        self.form
    }

    #[tracing::instrument(skip_all, fields(stages = self.stages.len(), shape = %grid.shape()))]
    pub fn shade(&self, grid: Grid<f64>) -> GlyphGridResult<Shaded> {
        let mut current = Shaded::Numeric(grid);
        for stage in &self.stages {
            let Shaded::Numeric(input) = &current else {
                return Err(GlyphGridError::composition(format!(
                    "stage '{}' received non-numeric input",
                    stage.name()
                )));
            };
            current = match stage {
                Shader::Cell(s) => Shaded::Numeric(s.apply(input)?),
                Shader::Spread(s) => Shaded::Numeric(s.apply(input)?),
                Shader::Color(s) => Shaded::Color(s.apply(input)?),
                Shader::Contour(s) => Shaded::Contours(s.extract(input)?),
            };
            tracing::trace!(stage = stage.name(), "stage applied");
        }
        Ok(current)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shade/chain.rs"]
mod tests;
