//! HFI raster classification and zone aggregation

pub mod aggregate;
pub mod classify;
pub mod polygonize;
pub mod raster;

pub use aggregate::{
    aggregate_zone_areas, classify_and_aggregate, FireZone, FuelCoverage, FuelTypeHfiArea,
    HfiRunSummary, ZoneAreaSummary,
};
pub use classify::{HfiThreshold, RunParameters, RunType, ADVISORY_HFI, WARNING_HFI};
pub use polygonize::{polygonize, ClassifiedHfiPolygon};
pub use raster::{GeoTransform, HfiGrid, RawHfiRaster};
