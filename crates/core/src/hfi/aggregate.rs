//! Zone-level advisory area statistics
//!
//! Each fire zone is intersected with the advisory and warning polygons of a
//! run. Areas are in square units of the shared coordinate system, which is
//! expected to be a projected (metre-based) CRS.

use std::collections::BTreeMap;

use geo::{Area, BooleanOps, MultiPolygon};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::classify::{HfiThreshold, RunParameters};
use super::polygonize::{polygonize, ClassifiedHfiPolygon};
use super::raster::{HfiGrid, RawHfiRaster};
use crate::config::EngineConfig;
use crate::core_types::fuel::FuelType;
use crate::error::Result;

/// A fire management zone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FireZone {
    pub id: u32,
    pub name: String,
    pub geometry: MultiPolygon<f64>,
    /// Burnable part of the landscape; when absent the whole zone counts
    pub combustible: Option<MultiPolygon<f64>>,
    /// Where each fuel type grows; empty skips the per-fuel breakdown
    #[serde(default)]
    pub fuel_coverage: Vec<FuelCoverage>,
}

/// Ground covered by one fuel type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelCoverage {
    pub fuel_type: FuelType,
    pub geometry: MultiPolygon<f64>,
}

/// Advisory and warning area on one fuel type inside a zone
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FuelTypeHfiArea {
    pub fuel_type: FuelType,
    pub advisory_area: f64,
    pub warning_area: f64,
}

/// Advisory area statistics for one zone and run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneAreaSummary {
    pub zone_id: u32,
    pub zone_area: f64,
    pub combustible_area: f64,
    pub advisory_area: f64,
    pub warning_area: f64,
    /// Share of combustible area under advisory only (%)
    pub advisory_percentage: f64,
    /// Share of combustible area under warning (%)
    pub warning_percentage: f64,
    /// Advisory plus warning (%)
    pub elevated_percentage: f64,
    /// Elevated area by fuel type, ordered by fuel type; fuel types with no
    /// elevated area are left out
    pub fuel_types: Vec<FuelTypeHfiArea>,
}

impl ZoneAreaSummary {
    /// Whether enough of the zone is elevated to flag the zone itself
    pub fn is_under_advisory(&self, config: &EngineConfig) -> bool {
        self.elevated_percentage >= config.zone_advisory_percentage
    }
}

/// Polygons and zone summaries of one processed raster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HfiRunSummary {
    pub run: RunParameters,
    pub polygons: Vec<ClassifiedHfiPolygon>,
    pub zones: Vec<ZoneAreaSummary>,
}

fn bucket(polygons: &[ClassifiedHfiPolygon], threshold: HfiThreshold) -> MultiPolygon<f64> {
    MultiPolygon::new(
        polygons
            .iter()
            .filter(|p| p.threshold == threshold)
            .map(|p| p.geometry.clone())
            .collect(),
    )
}

fn percentage(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        (part / whole * 100.0).clamp(0.0, 100.0)
    } else {
        0.0
    }
}

/// Fuel ∩ HFI bucket ∩ zone, one entry per fuel type
fn fuel_type_areas(
    zone: &FireZone,
    advisory: &MultiPolygon<f64>,
    warning: &MultiPolygon<f64>,
) -> Vec<FuelTypeHfiArea> {
    let mut by_fuel: BTreeMap<FuelType, MultiPolygon<f64>> = BTreeMap::new();
    for coverage in &zone.fuel_coverage {
        by_fuel
            .entry(coverage.fuel_type)
            .and_modify(|merged| *merged = merged.union(&coverage.geometry))
            .or_insert_with(|| coverage.geometry.clone());
    }

    by_fuel
        .into_iter()
        .map(|(fuel_type, geometry)| {
            let in_zone = geometry.intersection(&zone.geometry);
            FuelTypeHfiArea {
                fuel_type,
                advisory_area: in_zone.intersection(advisory).unsigned_area(),
                warning_area: in_zone.intersection(warning).unsigned_area(),
            }
        })
        .filter(|area| area.advisory_area > 0.0 || area.warning_area > 0.0)
        .collect()
}

fn summarize_zone(
    zone: &FireZone,
    advisory: &MultiPolygon<f64>,
    warning: &MultiPolygon<f64>,
) -> ZoneAreaSummary {
    let zone_area = zone.geometry.unsigned_area();
    let burnable = match &zone.combustible {
        Some(combustible) => zone.geometry.intersection(combustible),
        None => zone.geometry.clone(),
    };
    let combustible_area = burnable.unsigned_area();
    if combustible_area <= 0.0 {
        warn!("Zone {} ({}) has no combustible area", zone.id, zone.name);
    }

    let advisory_area = burnable.intersection(advisory).unsigned_area();
    let warning_area = burnable.intersection(warning).unsigned_area();
    let advisory_percentage = percentage(advisory_area, combustible_area);
    let warning_percentage = percentage(warning_area, combustible_area);

    ZoneAreaSummary {
        zone_id: zone.id,
        zone_area,
        combustible_area,
        advisory_area,
        warning_area,
        advisory_percentage,
        warning_percentage,
        elevated_percentage: percentage(advisory_area + warning_area, combustible_area),
        fuel_types: fuel_type_areas(zone, advisory, warning),
    }
}

/// Intersect every zone with the advisory and warning polygons
///
/// Zones are independent and processed in parallel; output order follows
/// `zones`.
pub fn aggregate_zone_areas(
    zones: &[FireZone],
    polygons: &[ClassifiedHfiPolygon],
) -> Vec<ZoneAreaSummary> {
    let advisory = bucket(polygons, HfiThreshold::Advisory);
    let warning = bucket(polygons, HfiThreshold::Warning);
    zones
        .par_iter()
        .map(|zone| summarize_zone(zone, &advisory, &warning))
        .collect()
}

/// Validate, classify, polygonize and aggregate one raster
///
/// # Errors
/// [`crate::AdvisoryError::RasterInput`] if the raster is malformed; no
/// partial results are produced.
pub fn classify_and_aggregate(
    raster: RawHfiRaster,
    run: RunParameters,
    zones: &[FireZone],
    config: &EngineConfig,
) -> Result<HfiRunSummary> {
    let grid = HfiGrid::try_from(raster)?;
    let polygons = polygonize(&grid, &run, config);
    let summaries = aggregate_zone_areas(zones, &polygons);

    let flagged = summaries
        .iter()
        .filter(|s| s.is_under_advisory(config))
        .count();
    info!(
        "{:?} run for {}: {} HFI polygons, {}/{} zones at or above {:.0}% elevated",
        run.run_type,
        run.for_date,
        polygons.len(),
        flagged,
        summaries.len(),
        config.zone_advisory_percentage
    );

    Ok(HfiRunSummary {
        run,
        polygons,
        zones: summaries,
    })
}
