//! Iso-line extraction by marching squares.
//!
//! Each grid cell square (four neighboring values) is classified against the level,
//! crossings are placed on the square's edges by linear interpolation, and the
//! resulting segments are joined into polylines through the edges they share. A
//! polyline that returns to its starting edge is closed and repeats its first point.

use std::collections::HashMap;

use crate::{
    foundation::error::{GlyphGridError, GlyphGridResult},
    foundation::math::linspace,
    grid::Grid,
};

/// Level selection for [`Contour`].
#[derive(Clone, Debug, PartialEq)]
pub enum Levels {
    /// `n` levels evenly spaced strictly inside the grid's finite value range.
    Count(usize),
    Explicit(Vec<f64>),
}

/// Output layout of a contour trace.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TraceFormat {
    /// One `[x, y]` sequence per polyline.
    #[default]
    Points,
    /// Separate x and y arrays per polyline.
    Coords,
}

/// The polylines of one level in the requested layout.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum Trace {
    Points(Vec<Vec<[f64; 2]>>),
    Coords { xs: Vec<Vec<f64>>, ys: Vec<Vec<f64>> },
}

impl Trace {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Points(lines) => lines.is_empty(),
            Self::Coords { xs, .. } => xs.is_empty(),
        }
    }

    /// Number of polylines.
    pub fn len(&self) -> usize {
        match self {
            Self::Points(lines) => lines.len(),
            Self::Coords { xs, .. } => xs.len(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct IsoContour {
    pub level: f64,
    pub trace: Trace,
}

/// Every requested level in request order, each with a (possibly empty) trace.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct ContourSet {
    pub levels: Vec<IsoContour>,
}

impl ContourSet {
    pub fn get(&self, level: f64) -> Option<&Trace> {
        self.levels
            .iter()
            .find(|iso| iso.level == level)
            .map(|iso| &iso.trace)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

/// Contour shader: scalar grid in, iso-lines out.
#[derive(Clone, Debug, PartialEq)]
pub struct Contour {
    /// Data values of the first and last column; defaults to `(0, width - 1)`.
    pub x_range: Option<(f64, f64)>,
    /// Data values of the first and last row; defaults to `(0, height - 1)`.
    pub y_range: Option<(f64, f64)>,
    pub levels: Levels,
    pub format: TraceFormat,
}

impl Default for Contour {
    fn default() -> Self {
        Self {
            x_range: None,
            y_range: None,
            levels: Levels::Count(5),
            format: TraceFormat::Points,
        }
    }
}

impl Contour {
    pub fn with_levels(levels: Levels) -> Self {
        Self {
            levels,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> GlyphGridResult<()> {
        for (name, range) in [("x_range", self.x_range), ("y_range", self.y_range)] {
            if let Some((a, b)) = range
                && (!a.is_finite() || !b.is_finite())
            {
                return Err(GlyphGridError::validation(format!(
                    "contour {name} must be finite"
                )));
            }
        }
        match &self.levels {
            Levels::Count(0) => Err(GlyphGridError::validation(
                "contour level count must be >= 1",
            )),
            Levels::Explicit(levels) if levels.iter().any(|l| !l.is_finite()) => Err(
                GlyphGridError::validation("contour levels must be finite"),
            ),
            _ => Ok(()),
        }
    }

    /// `n` levels from `n + 2` even samples over the finite range, ends dropped.
    ///
    /// A grid without finite values yields no levels.
    pub fn nlevels(grid: &Grid<f64>, n: usize) -> Vec<f64> {
        let Some((min, max)) = grid.finite_min_max() else {
            return Vec::new();
        };
        let samples = linspace(min, max, n + 2);
        samples[1..samples.len() - 1].to_vec()
    }

    #[tracing::instrument(skip(self, grid), fields(shape = %grid.shape()))]
    pub fn extract(&self, grid: &Grid<f64>) -> GlyphGridResult<ContourSet> {
        grid.require_scalar("contour")?;
        self.validate()?;

        let levels = match &self.levels {
            Levels::Count(n) => Self::nlevels(grid, *n),
            Levels::Explicit(levels) => levels.clone(),
        };
        let (w, h) = (grid.width(), grid.height());
        let axis = |range: Option<(f64, f64)>, n: usize| {
            let (a, b) = range.unwrap_or((0.0, n.saturating_sub(1) as f64));
            let step = if n > 1 { (b - a) / (n - 1) as f64 } else { 0.0 };
            move |i: f64| a + i * step
        };
        let map_x = axis(self.x_range, w);
        let map_y = axis(self.y_range, h);

        let mut out = Vec::with_capacity(levels.len());
        for level in levels {
            let lines: Vec<Vec<[f64; 2]>> = trace_level(grid, level)
                .into_iter()
                .map(|line| line.into_iter().map(|[x, y]| [map_x(x), map_y(y)]).collect())
                .collect();
            let trace = match self.format {
                TraceFormat::Points => Trace::Points(lines),
                TraceFormat::Coords => Trace::Coords {
                    xs: lines
                        .iter()
                        .map(|l| l.iter().map(|p| p[0]).collect())
                        .collect(),
                    ys: lines
                        .iter()
                        .map(|l| l.iter().map(|p| p[1]).collect())
                        .collect(),
                },
            };
            out.push(IsoContour { level, trace });
        }
        tracing::debug!(levels = out.len(), "contours extracted");
        Ok(ContourSet { levels: out })
    }
}

/// Square edge: horizontal edges run from `(x, y)` to `(x+1, y)`, vertical ones from
/// `(x, y)` to `(x, y+1)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Edge {
    H(usize, usize),
    V(usize, usize),
}

/// Polylines in grid index coordinates.
fn trace_level(grid: &Grid<f64>, level: f64) -> Vec<Vec<[f64; 2]>> {
    let (w, h) = (grid.width(), grid.height());
    if w < 2 || h < 2 {
        return Vec::new();
    }
    let data = grid.data();
    let at = |x: usize, y: usize| data[y * w + x];

    let mut crossings: HashMap<Edge, [f64; 2]> = HashMap::new();
    let mut crossing = |edge: Edge| -> Edge {
        crossings.entry(edge).or_insert_with(|| {
            let (p0, p1, v0, v1) = match edge {
                Edge::H(x, y) => ([x, y], [x + 1, y], at(x, y), at(x + 1, y)),
                Edge::V(x, y) => ([x, y], [x, y + 1], at(x, y), at(x, y + 1)),
            };
            let t = (level - v0) / (v1 - v0);
            [
                p0[0] as f64 + t * (p1[0] as f64 - p0[0] as f64),
                p0[1] as f64 + t * (p1[1] as f64 - p0[1] as f64),
            ]
        });
        edge
    };

    let mut segments: Vec<[Edge; 2]> = Vec::new();
    for y in 0..h - 1 {
        for x in 0..w - 1 {
            let (tl, tr, br, bl) = (at(x, y), at(x + 1, y), at(x + 1, y + 1), at(x, y + 1));
            if [tl, tr, br, bl].iter().any(|v| !v.is_finite()) {
                continue;
            }
            let case = u8::from(tl >= level)
                | u8::from(tr >= level) << 1
                | u8::from(br >= level) << 2
                | u8::from(bl >= level) << 3;
            let top = Edge::H(x, y);
            let bottom = Edge::H(x, y + 1);
            let left = Edge::V(x, y);
            let right = Edge::V(x + 1, y);
            let center_high = (tl + tr + br + bl) / 4.0 >= level;
            let pairs: &[[Edge; 2]] = match case {
                0 | 15 => &[],
                1 | 14 => &[[left, top]],
                2 | 13 => &[[top, right]],
                3 | 12 => &[[left, right]],
                4 | 11 => &[[right, bottom]],
                6 | 9 => &[[top, bottom]],
                7 | 8 => &[[left, bottom]],
                5 if center_high => &[[top, right], [left, bottom]],
                5 => &[[left, top], [right, bottom]],
                10 if center_high => &[[left, top], [right, bottom]],
                _ => &[[top, right], [left, bottom]],
            };
            for [a, b] in pairs {
                segments.push([crossing(*a), crossing(*b)]);
            }
        }
    }

    join(&segments)
        .into_iter()
        .map(|edges| edges.iter().map(|e| crossings[e]).collect())
        .collect()
}

/// Chain segments that share an edge into polylines, in first-segment order.
fn join(segments: &[[Edge; 2]]) -> Vec<Vec<Edge>> {
    let mut touching: HashMap<Edge, Vec<usize>> = HashMap::new();
    for (i, [a, b]) in segments.iter().enumerate() {
        touching.entry(*a).or_default().push(i);
        touching.entry(*b).or_default().push(i);
    }
    let mut used = vec![false; segments.len()];

    let walk = |from: Edge, used: &mut [bool]| -> Vec<Edge> {
        let mut path = Vec::new();
        let mut edge = from;
        while let Some(&s) = touching
            .get(&edge)
            .and_then(|ids| ids.iter().find(|&&s| !used[s]))
        {
            used[s] = true;
            let [a, b] = segments[s];
            edge = if a == edge { b } else { a };
            path.push(edge);
        }
        path
    };

    let mut lines = Vec::new();
    for i in 0..segments.len() {
        if used[i] {
            continue;
        }
        used[i] = true;
        let [a, b] = segments[i];
        let forward = walk(b, &mut used);
        if forward.last() == Some(&a) {
            let mut line = vec![a, b];
            line.extend(forward);
            lines.push(line);
            continue;
        }
        let backward = walk(a, &mut used);
        let mut line: Vec<Edge> = backward.into_iter().rev().collect();
        line.push(a);
        line.push(b);
        line.extend(forward);
        lines.push(line);
    }
    lines
}

#[cfg(test)]
#[path = "../tests/unit/contour.rs"]
mod tests;
