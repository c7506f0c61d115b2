//! In-memory HFI raster with its georeferencing
//!
//! Reading rasters from disk is left to the caller; the grid arrives as a
//! row-major buffer with a GDAL-style geotransform.

use nalgebra::{Affine2, Matrix3, Point2};
use serde::{Deserialize, Serialize};

use crate::error::{AdvisoryError, Result};

/// Affine pixel-to-world mapping
///
/// Built from the six GDAL coefficients
/// `[origin_x, pixel_width, row_rotation, origin_y, column_rotation, pixel_height]`,
/// where `x = origin_x + col × pixel_width + row × row_rotation` and
/// `y = origin_y + col × column_rotation + row × pixel_height`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoTransform {
    affine: Affine2<f64>,
}

impl GeoTransform {
    /// # Errors
    /// [`AdvisoryError::RasterInput`] for non-finite coefficients or a
    /// singular (zero-area) pixel.
    pub fn from_gdal(coefficients: [f64; 6]) -> Result<Self> {
        let [x0, dx, rx, y0, ry, dy] = coefficients;
        if coefficients.iter().any(|c| !c.is_finite()) {
            return Err(AdvisoryError::raster("geotransform has non-finite coefficients"));
        }
        if (dx * dy - rx * ry).abs() < f64::EPSILON {
            return Err(AdvisoryError::raster("geotransform is singular"));
        }
        #[rustfmt::skip]
        let matrix = Matrix3::new(
            dx, rx, x0,
            ry, dy, y0,
            0.0, 0.0, 1.0,
        );
        Ok(Self {
            affine: Affine2::from_matrix_unchecked(matrix),
        })
    }

    /// Unit square pixels with the origin at the top-left corner of the world
    pub fn identity() -> Self {
        Self {
            affine: Affine2::identity(),
        }
    }

    /// World coordinates of a pixel corner (column, row)
    pub fn apply(&self, column: f64, row: f64) -> (f64, f64) {
        let p = self.affine.transform_point(&Point2::new(column, row));
        (p.x, p.y)
    }

    /// The six GDAL coefficients
    pub fn to_gdal(&self) -> [f64; 6] {
        let m = self.affine.matrix();
        [m[(0, 2)], m[(0, 0)], m[(0, 1)], m[(1, 2)], m[(1, 0)], m[(1, 1)]]
    }

    /// Ground area covered by one pixel
    pub fn pixel_area(&self) -> f64 {
        let m = self.affine.matrix();
        (m[(0, 0)] * m[(1, 1)] - m[(0, 1)] * m[(1, 0)]).abs()
    }

    /// Whether the mapping reverses orientation (north-up rasters do)
    pub(crate) fn flips_orientation(&self) -> bool {
        let m = self.affine.matrix();
        m[(0, 0)] * m[(1, 1)] - m[(0, 1)] * m[(1, 0)] < 0.0
    }
}

impl Serialize for GeoTransform {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.to_gdal().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for GeoTransform {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let coefficients = <[f64; 6]>::deserialize(deserializer)?;
        Self::from_gdal(coefficients).map_err(serde::de::Error::custom)
    }
}

/// Raster as received from the caller, before validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawHfiRaster {
    pub width: usize,
    pub height: usize,
    /// Row-major, first row at the geotransform origin
    pub values: Vec<f64>,
    pub nodata: Option<f64>,
    /// GDAL geotransform coefficients
    pub geotransform: [f64; 6],
}

impl TryFrom<RawHfiRaster> for HfiGrid {
    type Error = AdvisoryError;

    fn try_from(raw: RawHfiRaster) -> Result<Self> {
        let transform = GeoTransform::from_gdal(raw.geotransform)?;
        HfiGrid::new(raw.width, raw.height, raw.values, raw.nodata, transform)
    }
}

impl From<HfiGrid> for RawHfiRaster {
    fn from(grid: HfiGrid) -> Self {
        Self {
            width: grid.width,
            height: grid.height,
            values: grid.values,
            nodata: grid.nodata,
            geotransform: grid.transform.to_gdal(),
        }
    }
}

/// Gridded head fire intensity (kW/m) for one run
///
/// Deserialization goes through [`RawHfiRaster`] so a grid can never hold
/// unvalidated data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawHfiRaster", into = "RawHfiRaster")]
pub struct HfiGrid {
    width: usize,
    height: usize,
    values: Vec<f64>,
    nodata: Option<f64>,
    transform: GeoTransform,
}

impl HfiGrid {
    /// Build a grid from a row-major buffer
    ///
    /// # Errors
    /// [`AdvisoryError::RasterInput`] for a zero dimension, a buffer whose
    /// length is not `width × height`, or a value that is neither nodata nor
    /// a finite non-negative intensity.
    pub fn new(
        width: usize,
        height: usize,
        values: Vec<f64>,
        nodata: Option<f64>,
        transform: GeoTransform,
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(AdvisoryError::raster(format!(
                "raster has zero dimension ({width}x{height})"
            )));
        }
        let expected = width
            .checked_mul(height)
            .ok_or_else(|| AdvisoryError::raster("raster dimensions overflow"))?;
        if values.len() != expected {
            return Err(AdvisoryError::raster(format!(
                "expected {expected} values for {width}x{height}, got {}",
                values.len()
            )));
        }
        let is_nodata = |v: f64| nodata.is_some_and(|nd| v == nd || (nd.is_nan() && v.is_nan()));
        if let Some(index) = values
            .iter()
            .position(|&v| !is_nodata(v) && !(v.is_finite() && v >= 0.0))
        {
            return Err(AdvisoryError::raster(format!(
                "invalid HFI value {} at row {}, column {}",
                values[index],
                index / width,
                index % width
            )));
        }
        Ok(Self {
            width,
            height,
            values,
            nodata,
            transform,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn transform(&self) -> &GeoTransform {
        &self.transform
    }

    /// HFI at a cell; `None` for nodata or out-of-bounds cells
    pub fn get(&self, column: usize, row: usize) -> Option<f64> {
        if column >= self.width || row >= self.height {
            return None;
        }
        let value = self.values[row * self.width + column];
        match self.nodata {
            Some(nd) if value == nd || (nd.is_nan() && value.is_nan()) => None,
            _ => Some(value),
        }
    }
}
