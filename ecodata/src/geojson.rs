//! GeoJSON export of custom-search occurrences.
//!
//! Enable the `geojson` feature to use this module.
//!
//! # Example
//!
//! ```ignore
//! use ecodata::geojson::occurrences_to_feature_collection;
//!
//! let records = client.custom_occurrences(&search).await?;
//! let collection = occurrences_to_feature_collection(&records);
//! println!("{}", collection);
//! ```

use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value as GeoJsonValue};
use serde_json::Value;

use crate::occurrence::CustomOccurrenceRecord;

/// Convert records into a FeatureCollection of points.
///
/// Coordinates use GeoJSON order, `[longitude, latitude]`. Records missing
/// either coordinate are left out. The remaining record fields become feature
/// properties.
pub fn occurrences_to_feature_collection(records: &[CustomOccurrenceRecord]) -> FeatureCollection {
    let features = records.iter().filter_map(occurrence_to_feature).collect();

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

fn occurrence_to_feature(record: &CustomOccurrenceRecord) -> Option<Feature> {
    let (lat, lon) = (record.latitude?, record.longitude?);

    let mut properties = JsonObject::new();
    properties.insert("species".to_string(), Value::from(record.species.clone()));
    properties.insert("date".to_string(), Value::from(record.date.clone()));
    properties.insert("source".to_string(), Value::from(record.source.clone()));

    Some(Feature {
        bbox: None,
        geometry: Some(Geometry::new(GeoJsonValue::Point(vec![lon, lat]))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    })
}
