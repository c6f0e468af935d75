use serde::{Deserialize, Serialize};

use crate::dataset::AccidentTable;
use crate::dataset::columns;

/// Upper bound on plotted points.
pub const MAX_POINTS: usize = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    pub min_latitude: f64,
    pub max_latitude: f64,
    pub min_longitude: f64,
    pub max_longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geography {
    /// Evenly spaced sample of located rows, in table order.
    pub points: Vec<GeoPoint>,
    pub with_coordinates: usize,
    pub without_coordinates: usize,
    pub bounds: Option<GeoBounds>,
}

/// `None` unless both coordinate columns exist in the source.
pub fn geography(table: &AccidentTable) -> Option<Geography> {
    if !(table.has_column(columns::LATITUDE) && table.has_column(columns::LONGITUDE)) {
        return None;
    }

    let located: Vec<GeoPoint> = table
        .records()
        .iter()
        .filter_map(|r| r.coordinates())
        .map(|(latitude, longitude)| GeoPoint {
            latitude,
            longitude,
        })
        .collect();

    let bounds = located.first().map(|first| {
        located.iter().fold(
            GeoBounds {
                min_latitude: first.latitude,
                max_latitude: first.latitude,
                min_longitude: first.longitude,
                max_longitude: first.longitude,
            },
            |b, p| GeoBounds {
                min_latitude: b.min_latitude.min(p.latitude),
                max_latitude: b.max_latitude.max(p.latitude),
                min_longitude: b.min_longitude.min(p.longitude),
                max_longitude: b.max_longitude.max(p.longitude),
            },
        )
    });

    Some(Geography {
        points: sample(&located, MAX_POINTS),
        with_coordinates: located.len(),
        without_coordinates: table.len() - located.len(),
        bounds,
    })
}

/// Deterministic stride sample of at most `limit` items.
fn sample<T: Copy>(items: &[T], limit: usize) -> Vec<T> {
    if items.len() <= limit {
        return items.to_vec();
    }
    (0..limit).map(|i| items[i * items.len() / limit]).collect()
}
