//! Convex hull vertex extraction, backed by qhull.
//!
//! Only the hull *vertices* are needed by the furthest distance estimator, so
//! facets are read once and reduced to the indices of the points they touch.
//!
//! Inputs that do not span their full dimension (collinear in 2D, coplanar
//! in 3D) or have too few points make qhull fail; that is reported as
//! [`Error::DegenerateGeometry`].

use qhull::Qh;

use crate::error::{Error, Result};

/// Convex hull of a point set, as indices of its vertices.
#[derive(Debug, Clone)]
pub struct ConvexHull {
    vertices: Vec<usize>,
}

impl ConvexHull {
    /// Compute the convex hull of points with at least two coordinates.
    pub fn compute(points: &[Vec<f64>]) -> Result<Self> {
        let dim = match points.first() {
            Some(p) => p.len(),
            None => return Err(Error::EmptyInput),
        };
        if let Some(p) = points.iter().find(|p| p.len() != dim) {
            return Err(Error::DimensionMismatch {
                expected: dim,
                found: p.len(),
            });
        }
        if dim < 2 {
            return Err(Error::InvalidParameter {
                name: "dimension",
                message: "convex hull needs at least 2 coordinates",
            });
        }

        let qh = Qh::builder()
            .compute(true)
            .build_from_iter(points.iter().cloned())
            .map_err(|_| Error::DegenerateGeometry)?;

        let mut vertices: Vec<usize> = qh
            .simplices()
            .filter_map(|facet| facet.vertices())
            .flat_map(|set| set.iter().filter_map(|v| v.index(&qh)).collect::<Vec<_>>())
            .collect();
        vertices.sort_unstable();
        vertices.dedup();

        if vertices.len() <= dim {
            return Err(Error::DegenerateGeometry);
        }
        Ok(Self { vertices })
    }

    /// Indices of the hull vertices, ascending.
    pub fn vertices(&self) -> &[usize] {
        &self.vertices
    }

    /// Number of hull vertices.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Whether the hull has no vertices.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}
