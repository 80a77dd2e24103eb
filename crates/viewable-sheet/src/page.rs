//! 2-D sheet payload model.
//!
//! A translated 2-D drawing carries, next to its vector or raster
//! resources, a geometry payload describing the page: its paper and
//! logical dimensions, one transform per viewport, and one clip region per
//! viewport. Viewport id 0 is paper space.

use serde::Deserialize;

use crate::error::Result;

/// Page metadata relating paper space to logical space.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PageDimensions {
    /// Page width in `page_units`.
    pub page_width: f64,
    /// Page height in `page_units`.
    pub page_height: f64,
    /// Logical width matching the page width.
    pub logical_width: f64,
    /// Logical height matching the page height.
    pub logical_height: f64,
    /// Logical-space offset of the page origin.
    pub logical_offset_x: f64,
    /// Logical-space offset of the page origin.
    pub logical_offset_y: f64,
    /// Units of the paper dimensions.
    pub page_units: String,
    /// Units of model space.
    pub model_units: String,
}

/// A viewport's raw model-to-logical transform.
///
/// Sixteen numbers, row-major. Payloads occasionally carry malformed row
/// orderings; repair happens when the transform is consumed, not here.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Viewport {
    /// Row-major 4x4 transform, model space to logical space.
    pub transform: Vec<f64>,
}

/// A viewport's clip region in its raw flat encoding.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Clip {
    /// Number of points consumed by each contour, in order.
    #[serde(rename = "contourCounts")]
    pub contour_counts: Vec<usize>,
    /// Flat x/y pairs shared by all contours.
    pub points: Vec<f64>,
}

/// The 2-D geometry payload of a sheet.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SheetData {
    /// Page metadata.
    pub page_dimensions: PageDimensions,
    /// Per-viewport transforms; index 0 is paper space.
    pub viewports: Vec<Viewport>,
    /// Per-viewport clip regions, parallel to `viewports`.
    pub clips: Vec<Clip>,
}

impl SheetData {
    /// Deserializes a sheet payload from JSON.
    pub fn from_json(payload: &str) -> Result<Self> {
        Ok(serde_json::from_str(payload)?)
    }

    /// Returns the number of viewports the payload describes.
    #[must_use]
    pub fn viewport_count(&self) -> usize {
        self.viewports.len().max(self.clips.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json() {
        let data = SheetData::from_json(
            r#"{
              "page_dimensions": {
                "page_width": 8.5, "page_height": 11.0,
                "logical_width": 816.0, "logical_height": 1056.0,
                "logical_offset_x": 0.0, "logical_offset_y": 0.0,
                "page_units": "in", "model_units": "ft"
              },
              "viewports": [{"transform": [1,0,0,0, 0,1,0,0, 0,0,1,0, 0,0,0,1]}],
              "clips": [{"contourCounts": [4], "points": [0,0, 1,0, 1,1, 0,1]}]
            }"#,
        )
        .expect("payload");
        assert_eq!(data.page_dimensions.page_units, "in");
        assert_eq!(data.viewports.len(), 1);
        assert_eq!(data.clips[0].contour_counts, [4]);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(SheetData::from_json("nope").is_err());
    }

    #[test]
    fn test_missing_sections_default() {
        let data = SheetData::from_json("{}").expect("payload");
        assert_eq!(data.viewport_count(), 0);
        assert_eq!(data.page_dimensions.page_width, 0.0);
    }
}
