//! Per-viewport page-to-model transforms.
//!
//! Each viewport of a 2-D sheet carries a raw model-to-logical transform.
//! Converting a paper-space point into model space composes the inverse of
//! that transform with the page-to-logical mapping derived from the page
//! metadata. Some pipelines emit transforms with permuted rows; a repair
//! heuristic reorders them before inversion.

use std::collections::HashMap;

use glam::{DMat4, DVec3};

use crate::page::SheetData;

/// Pivot magnitude below which a transform row is considered misplaced.
const NEAR_ZERO: f64 = 1e-3;

/// Memoizing store of page-to-model transforms, one per viewport.
///
/// The cache is append-only for the lifetime of the sheet data; replacing
/// the data wholesale is the only invalidation.
pub struct ViewportTransforms<'a> {
    data: &'a SheetData,
    cache: HashMap<usize, Option<DMat4>>,
}

impl<'a> ViewportTransforms<'a> {
    /// Creates an empty transform cache over `data`.
    #[must_use]
    pub fn new(data: &'a SheetData) -> Self {
        Self {
            data,
            cache: HashMap::new(),
        }
    }

    /// Returns the memoized page-to-model transform of `viewport_id`.
    ///
    /// `None` for an unknown viewport, a transform of the wrong arity, or
    /// a singular transform; none of these raises.
    pub fn get(&mut self, viewport_id: usize) -> Option<DMat4> {
        if let Some(&cached) = self.cache.get(&viewport_id) {
            return cached;
        }
        let computed = self.compute(viewport_id);
        self.cache.insert(viewport_id, computed);
        computed
    }

    /// Converts two paper-space points to model space in place.
    ///
    /// X and y are overwritten; z is left untouched (the mapping is
    /// evaluated at z = 0). An unresolvable viewport leaves both points
    /// unchanged.
    pub fn page_to_model(&mut self, point1: &mut DVec3, point2: &mut DVec3, viewport_id: usize) {
        let Some(matrix) = self.get(viewport_id) else {
            return;
        };
        for point in [point1, point2] {
            let mapped = matrix.transform_point3(DVec3::new(point.x, point.y, 0.0));
            point.x = mapped.x;
            point.y = mapped.y;
        }
    }

    fn compute(&self, viewport_id: usize) -> Option<DMat4> {
        let viewport = self.data.viewports.get(viewport_id)?;
        let raw: [f64; 16] = match viewport.transform.as_slice().try_into() {
            Ok(raw) => raw,
            Err(_) => {
                log::warn!(
                    "viewport {viewport_id}: transform has {} elements, expected 16",
                    viewport.transform.len()
                );
                return None;
            }
        };
        let repaired = repair_rows(raw, viewport_id);
        // Row-major on the wire; glam stores columns.
        let model_to_logical = DMat4::from_cols_array(&repaired).transpose();
        let det = model_to_logical.determinant();
        if det == 0.0 || !det.is_finite() {
            log::warn!("viewport {viewport_id}: transform is singular, determinant {det}");
            return None;
        }
        let logical_to_model = model_to_logical.inverse();

        let dims = &self.data.page_dimensions;
        if dims.page_width == 0.0 || dims.page_height == 0.0 {
            log::warn!("page dimensions are degenerate: {dims:?}");
            return None;
        }
        let page_to_logical = DMat4::from_translation(DVec3::new(
            dims.logical_offset_x,
            dims.logical_offset_y,
            0.0,
        )) * DMat4::from_scale(DVec3::new(
            dims.logical_width / dims.page_width,
            dims.logical_height / dims.page_height,
            1.0,
        ));

        // Column-vector convention: page point -> logical -> model.
        Some(logical_to_model * page_to_logical)
    }
}

/// Reorders permuted transform rows before inversion.
///
/// A near-zero pivot at (0,0) means row 0 landed elsewhere: swap it with
/// row 1, or with row 2 when row 1's leading element is near zero as well;
/// afterwards a near-zero pivot at (1,1) means rows 1 and 2 are swapped.
/// When both candidate rows are degenerate the input is beyond repair and
/// is passed through as-is; the singularity check after this catches it.
fn repair_rows(mut m: [f64; 16], viewport_id: usize) -> [f64; 16] {
    if m[0].abs() < NEAR_ZERO {
        if m[4].abs() < NEAR_ZERO {
            log::warn!("viewport {viewport_id}: rows 0 and 1 both have near-zero pivots");
            swap_rows(&mut m, 0, 2);
        } else {
            swap_rows(&mut m, 0, 1);
        }
    }
    if m[5].abs() < NEAR_ZERO {
        swap_rows(&mut m, 1, 2);
    }
    m
}

fn swap_rows(m: &mut [f64; 16], a: usize, b: usize) {
    for col in 0..4 {
        m.swap(a * 4 + col, b * 4 + col);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{PageDimensions, Viewport};

    fn sheet(transforms: Vec<Vec<f64>>) -> SheetData {
        SheetData {
            page_dimensions: PageDimensions {
                page_width: 8.5,
                page_height: 11.0,
                logical_width: 816.0,
                logical_height: 1056.0,
                logical_offset_x: 0.0,
                logical_offset_y: 0.0,
                page_units: "in".to_string(),
                model_units: "ft".to_string(),
            },
            viewports: transforms
                .into_iter()
                .map(|transform| Viewport { transform })
                .collect(),
            clips: Vec::new(),
        }
    }

    /// Row-major model-to-logical transform scaling by 96 with an x shift.
    fn shifted_scale() -> Vec<f64> {
        vec![
            96.0, 0.0, 0.0, 960.0, //
            0.0, 96.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ]
    }

    #[test]
    fn test_page_to_model_inverts_the_viewport_transform() {
        let data = sheet(vec![shifted_scale()]);
        let mut transforms = ViewportTransforms::new(&data);

        // Page scale is 816/8.5 = 96, so page (1,1) is logical (96,96);
        // the viewport maps model (m) to logical (96 m + 960, 96 m).
        let mut p1 = DVec3::new(1.0, 1.0, 7.0);
        let mut p2 = DVec3::new(0.0, 0.0, 0.0);
        transforms.page_to_model(&mut p1, &mut p2, 0);

        assert!((p1.x - -9.0).abs() < 1e-9);
        assert!((p1.y - 1.0).abs() < 1e-9);
        assert_eq!(p1.z, 7.0, "z must stay untouched");
        assert!((p2.x - -10.0).abs() < 1e-9);
        assert!((p2.y - 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_swapped_rows_repair_to_the_same_transform() {
        let correct = shifted_scale();
        let mut swapped01 = correct.clone();
        for col in 0..4 {
            swapped01.swap(col, 4 + col);
        }
        let mut swapped12 = correct.clone();
        for col in 0..4 {
            swapped12.swap(4 + col, 8 + col);
        }

        let data = sheet(vec![correct, swapped01, swapped12]);
        let mut transforms = ViewportTransforms::new(&data);
        let reference = transforms.get(0).expect("well-formed transform");
        let repaired01 = transforms.get(1).expect("repairable transform");
        let repaired12 = transforms.get(2).expect("repairable transform");
        assert!(reference.abs_diff_eq(repaired01, 1e-12));
        assert!(reference.abs_diff_eq(repaired12, 1e-12));
    }

    #[test]
    fn test_invalid_viewport_is_a_no_op() {
        let data = sheet(vec![shifted_scale()]);
        let mut transforms = ViewportTransforms::new(&data);
        assert!(transforms.get(5).is_none());

        let mut p1 = DVec3::new(1.0, 2.0, 3.0);
        let mut p2 = DVec3::new(4.0, 5.0, 6.0);
        transforms.page_to_model(&mut p1, &mut p2, 5);
        assert_eq!(p1, DVec3::new(1.0, 2.0, 3.0));
        assert_eq!(p2, DVec3::new(4.0, 5.0, 6.0));
    }

    #[test]
    fn test_singular_transform_yields_none() {
        let data = sheet(vec![vec![0.0; 16]]);
        let mut transforms = ViewportTransforms::new(&data);
        assert!(transforms.get(0).is_none());
        // The outcome is cached like any other.
        assert!(transforms.get(0).is_none());
    }

    #[test]
    fn test_wrong_arity_yields_none() {
        let data = sheet(vec![vec![1.0, 0.0, 0.0]]);
        let mut transforms = ViewportTransforms::new(&data);
        assert!(transforms.get(0).is_none());
    }

    #[test]
    fn test_get_is_memoized_and_stable() {
        let data = sheet(vec![shifted_scale()]);
        let mut transforms = ViewportTransforms::new(&data);
        let first = transforms.get(0).expect("transform");
        let second = transforms.get(0).expect("transform");
        assert_eq!(first, second);
    }
}
