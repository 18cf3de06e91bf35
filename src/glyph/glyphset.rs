use std::sync::Arc;

use crate::{
    foundation::core::{Rect, ViewTransform},
    foundation::error::{GlyphGridError, GlyphGridResult},
    glyph::shape::{Glyph, ShapeCode},
    glyph::shaper::Shaper,
};

/// Ordered glyphs paired 1:1 with opaque data values.
///
/// A glyph set keeps its data-space records and the accumulated view transform, and
/// materializes the pixel-space glyphs for that view. [`GlyphSet::project`] never
/// mutates: it returns a new set that shares the records and data and re-projects
/// them under the composed view, so projecting twice is exactly projecting once by
/// the composition.
#[derive(Clone, Debug)]
pub struct GlyphSet<D> {
    shape: ShapeCode,
    records: Arc<[[f64; 4]]>,
    data: Arc<[D]>,
    view: ViewTransform,
    glyphs: Vec<Glyph>,
}

impl<D> GlyphSet<D> {
    /// Build a glyph set from literal data-space records.
    ///
    /// Records must be finite; see [`GlyphSet::new_dropping_non_finite`] for data that
    /// contains gaps.
    pub fn new(shape: ShapeCode, records: Vec<[f64; 4]>, data: Vec<D>) -> GlyphGridResult<Self> {
        if records.len() != data.len() {
            return Err(GlyphGridError::validation(format!(
                "glyph set has {} records but {} data values",
                records.len(),
                data.len()
            )));
        }
        if let Some(i) = records
            .iter()
            .position(|r| r.iter().any(|v| !v.is_finite()))
        {
            return Err(GlyphGridError::validation(format!(
                "glyph record {i} has a non-finite coordinate"
            )));
        }
        Ok(Self::from_parts(
            shape,
            records.into(),
            data.into(),
            ViewTransform::IDENTITY,
        ))
    }

    /// Like [`GlyphSet::new`], but records with NaN/inf coordinates are dropped together
    /// with their data values.
    pub fn new_dropping_non_finite(
        shape: ShapeCode,
        records: Vec<[f64; 4]>,
        data: Vec<D>,
    ) -> GlyphGridResult<Self> {
        if records.len() != data.len() {
            return Err(GlyphGridError::validation(format!(
                "glyph set has {} records but {} data values",
                records.len(),
                data.len()
            )));
        }
        let before = records.len();
        let (records, data): (Vec<_>, Vec<_>) = records
            .into_iter()
            .zip(data)
            .filter(|(r, _)| r.iter().all(|v| v.is_finite()))
            .unzip();
        if records.len() != before {
            tracing::debug!(
                dropped = before - records.len(),
                "dropped non-finite glyph records"
            );
        }
        Self::new(shape, records, data)
    }

    /// Build records by running `shaper` over raw rows; the rows become the data values.
    pub fn from_rows(rows: Vec<D>, shaper: &Shaper<D>) -> GlyphGridResult<Self> {
        let records = rows.iter().map(|r| shaper.record(r)).collect();
        Self::new(shaper.shape(), records, rows)
    }

    fn from_parts(
        shape: ShapeCode,
        records: Arc<[[f64; 4]]>,
        data: Arc<[D]>,
        view: ViewTransform,
    ) -> Self {
        let glyphs = records
            .iter()
            .map(|r| Glyph::project(*r, shape, &view))
            .collect();
        Self {
            shape,
            records,
            data,
            view,
            glyphs,
        }
    }

    /// New glyph set viewed through `vt` after the current view.
    pub fn project(&self, vt: ViewTransform) -> GlyphGridResult<Self> {
        vt.validate()?;
        Ok(Self::from_parts(
            self.shape,
            Arc::clone(&self.records),
            Arc::clone(&self.data),
            self.view.compose(vt),
        ))
    }

    pub fn shape(&self) -> ShapeCode {
        self.shape
    }

    pub fn view(&self) -> ViewTransform {
        self.view
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    pub fn records(&self) -> &[[f64; 4]] {
        &self.records
    }

    pub fn data(&self) -> &[D] {
        &self.data
    }

    /// Pixel-space glyphs under the current view.
    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Glyph, &D)> {
        self.glyphs.iter().zip(self.data.iter())
    }

    /// Data-space bounding rectangle of all records, `None` for an empty set.
    pub fn bounds(&self) -> Option<Rect> {
        let mut out: Option<Rect> = None;
        for r in self.records.iter() {
            let rect = match self.shape {
                ShapeCode::Point => Rect::new(r[0], r[1], r[0], r[1]),
                ShapeCode::Rect => Rect::new(r[0], r[1], r[0] + r[2], r[1] + r[3]).abs(),
                ShapeCode::Line => Rect::new(r[0], r[1], r[2], r[3]).abs(),
            };
            out = Some(match out {
                None => rect,
                Some(acc) => acc.union(rect),
            });
        }
        out
    }
}

impl<D: Clone> GlyphSet<D> {
    /// Glyphs `range` as a new set under the same view.
    pub fn slice(&self, range: std::ops::Range<usize>) -> GlyphGridResult<Self> {
        if range.start > range.end || range.end > self.len() {
            return Err(GlyphGridError::bounds(format!(
                "slice {}..{} outside glyph set of length {}",
                range.start,
                range.end,
                self.len()
            )));
        }
        Ok(Self {
            shape: self.shape,
            records: self.records[range.clone()].into(),
            data: self.data[range.clone()].into(),
            view: self.view,
            glyphs: self.glyphs[range].to_vec(),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/glyph/glyphset.rs"]
mod tests;
