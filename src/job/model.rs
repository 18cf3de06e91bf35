use crate::{
    aggregate::engine::AggregateThreading,
    foundation::core::{Screen, ViewTransform},
    foundation::error::{GlyphGridError, GlyphGridResult},
    glyph::shape::ShapeCode,
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RenderJob {
    pub screen: Screen,
    pub shape: ShapeCode,
    /// Data-space glyph records, read according to `shape`.
    pub records: Vec<[f64; 4]>,
    /// Per-record data; numbers for `sum`, labels for `count_categories`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<JobValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view: Option<ViewTransform>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fit: Option<FitSpec>,
    pub aggregator: AggregatorSpec,
    #[serde(default)]
    pub shaders: Vec<ShaderSpec>,
    #[serde(default)]
    pub threading: AggregateThreading,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum JobValue {
    Number(f64),
    Label(String),
}

impl JobValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Label(_) => None,
        }
    }

    /// Category label; numbers use their decimal form.
    pub fn label(&self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Label(s) => s.clone(),
        }
    }
}

/// Zoom-fit the view to the data bounds.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FitSpec {
    #[serde(default = "default_balanced")]
    pub balanced: bool,
}

fn default_balanced() -> bool {
    true
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AggregatorSpec {
    Count,
    Sum,
    CountCategories {
        /// Explicit universe; scanned (sorted unique) from `values` when absent.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        categories: Option<Vec<String>>,
    },
    PointHistogram,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ShaderSpec {
    pub kind: String,
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub params: serde_json::Value,
}

impl RenderJob {
    pub fn from_json(text: &str) -> GlyphGridResult<Self> {
        serde_json::from_str(text).map_err(|e| GlyphGridError::serde(e.to_string()))
    }

    pub fn validate(&self) -> GlyphGridResult<()> {
        Screen::new(self.screen.width, self.screen.height)?;
        if self.view.is_some() && self.fit.is_some() {
            return Err(GlyphGridError::validation(
                "job may set 'view' or 'fit', not both",
            ));
        }
        if let Some(vt) = &self.view {
            vt.validate()?;
        }
        if let Some(i) = self
            .records
            .iter()
            .position(|r| r.iter().any(|v| !v.is_finite()))
        {
            return Err(GlyphGridError::validation(format!(
                "record {i} has a non-finite coordinate"
            )));
        }
        self.threading.validate()?;

        let n = self.records.len();
        match &self.aggregator {
            AggregatorSpec::Count | AggregatorSpec::PointHistogram => {
                if !self.values.is_empty() && self.values.len() != n {
                    return Err(GlyphGridError::validation(format!(
                        "job has {n} records but {} values",
                        self.values.len()
                    )));
                }
            }
            AggregatorSpec::Sum => {
                if self.values.len() != n {
                    return Err(GlyphGridError::validation(format!(
                        "sum needs one value per record: {n} records, {} values",
                        self.values.len()
                    )));
                }
                if let Some(i) = self.values.iter().position(|v| v.as_f64().is_none()) {
                    return Err(GlyphGridError::validation(format!(
                        "sum value {i} must be a number"
                    )));
                }
            }
            AggregatorSpec::CountCategories { categories } => {
                if self.values.len() != n {
                    return Err(GlyphGridError::validation(format!(
                        "count_categories needs one label per record: {n} records, {} values",
                        self.values.len()
                    )));
                }
                if let Some(cats) = categories
                    && cats.is_empty()
                {
                    return Err(GlyphGridError::validation(
                        "count_categories 'categories' must be non-empty when set",
                    ));
                }
            }
        }
        if matches!(self.aggregator, AggregatorSpec::PointHistogram)
            && self.shape != ShapeCode::Point
        {
            return Err(GlyphGridError::validation(
                "point_histogram requires shape 'point'",
            ));
        }

        for (i, s) in self.shaders.iter().enumerate() {
            if s.kind.trim().is_empty() {
                return Err(GlyphGridError::validation(format!(
                    "shader {i} kind must be non-empty"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/job/model.rs"]
mod tests;
