//! Viewport clip regions and point containment.
//!
//! Each viewport's visible extent is a polygonal clip region, encoded as a
//! flat run of contour lengths plus a shared point pool. Decoding expands
//! the runs into index loops; containment is a horizontal ray-crossing
//! test XOR-folded across contours, so membership in an odd number of
//! nested contours counts as inside.

use glam::DVec2;

use crate::page::SheetData;

/// A decoded clip region: closed index loops over a shared point pool.
#[derive(Debug, Clone, PartialEq)]
pub struct ClipRegion {
    /// Closed contours as loops of indices into `points`.
    pub contours: Vec<Vec<usize>>,
    /// The 2-D point pool.
    pub points: Vec<DVec2>,
}

/// Answers point-in-region queries over a sheet's viewport clips.
pub struct ClipIndex<'a> {
    data: &'a SheetData,
}

impl<'a> ClipIndex<'a> {
    /// Creates a clip index over `data`.
    #[must_use]
    pub fn new(data: &'a SheetData) -> Self {
        Self { data }
    }

    /// Decodes the clip region of `viewport_id`.
    ///
    /// Contour `k` consumes `contour_counts[k]` consecutive point indices.
    /// Pure and uncached; `None` for an unknown viewport. Contour counts
    /// overrunning the point pool are clamped to it.
    #[must_use]
    pub fn decode(&self, viewport_id: usize) -> Option<ClipRegion> {
        let clip = self.data.clips.get(viewport_id)?;
        let points: Vec<DVec2> = clip
            .points
            .chunks_exact(2)
            .map(|xy| DVec2::new(xy[0], xy[1]))
            .collect();

        let mut contours = Vec::with_capacity(clip.contour_counts.len());
        let mut next = 0usize;
        for &count in &clip.contour_counts {
            let end = (next + count).min(points.len());
            if end < next + count {
                log::warn!(
                    "viewport {viewport_id}: clip contours overrun the point pool ({} points)",
                    points.len()
                );
            }
            contours.push((next..end).collect());
            next = end;
        }
        Some(ClipRegion { contours, points })
    }

    /// Returns the ids of all other viewports whose clip region contains
    /// `point`, ascending.
    ///
    /// Viewport 0 is paper space and never tested; the query viewport's
    /// own id is skipped, so it never appears in the result.
    #[must_use]
    pub fn point_in_clip(&self, point: DVec2, viewport_id: usize) -> Vec<usize> {
        let mut matches = Vec::new();
        for id in 1..self.data.clips.len() {
            if id == viewport_id {
                continue;
            }
            if let Some(region) = self.decode(id) {
                if point_in_polygon(point.x, point.y, &region.contours, &region.points) {
                    matches.push(id);
                }
            }
        }
        matches
    }
}

/// Horizontal ray-crossing containment test over multi-contour polygons.
///
/// Crossings toggle within a contour and contours XOR together, so a point
/// inside an odd number of nested contours is inside the region. Applying
/// the `>=` convention to both edge endpoints makes points exactly on a
/// horizontal edge resolve deterministically, though not geometrically
/// exactly in every such case. Out-of-pool indices are skipped.
#[must_use]
pub fn point_in_polygon(x: f64, y: f64, contours: &[Vec<usize>], points: &[DVec2]) -> bool {
    let mut inside = false;
    for contour in contours {
        let mut inside_contour = false;
        for (at, &start) in contour.iter().enumerate() {
            let end = contour[(at + 1) % contour.len()];
            let (Some(e1), Some(e2)) = (points.get(start), points.get(end)) else {
                continue;
            };
            if (e1.y >= y) != (e2.y >= y)
                && x < (e2.x - e1.x) * (y - e1.y) / (e2.y - e1.y) + e1.x
            {
                inside_contour = !inside_contour;
            }
        }
        inside ^= inside_contour;
    }
    inside
}
