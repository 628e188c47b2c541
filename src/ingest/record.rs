// * Record Normalizer
// * Maps one raw NDJSON object onto the canonical InnovationRecord shape.
// * Key spelling variants are resolved here once; nothing downstream sees raw keys.

use serde::ser::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::fmt;

// * Raw keys as they appear in the source feed
pub const KEY_INNOVATION: &str = "Innovation/ Technology/ Tool";
pub const KEY_INNOVATION_SHORT: &str = "Innovation";
pub const KEY_TYPE: &str = "Type of Innovation / Technology/ Tool";
pub const KEY_SCALE: &str = "Scale";
pub const KEY_PRODUCTION_SYSTEM: &str = "Production system";
pub const KEY_CLIMATE: &str = "Climate Classification";
pub const KEY_COUNTRY: &str = "Country";
pub const KEY_DESCRIPTION: &str = "Description";
pub const KEY_CHALLENGE: &str = "Challenge it was addressing";
pub const KEY_DATA_COLLECTED: &str = "Data collected";
pub const KEY_SITE: &str = "Site";
// ! The feed uses both spellings; the trailing-space variant is preferred
pub const KEY_CENTRES_SPACED: &str = "Centre (s) involved ";
pub const KEY_CENTRES: &str = "Centre (s) involved";

const NO_DESCRIPTION: &str = "No description available";

/// Canonical fields of an [`InnovationRecord`].
///
/// Used as the key of filter maps and facet definitions so that callers
/// address fields by meaning, never by raw key spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RecordField {
    Innovation,
    TypeOfInnovation,
    Scale,
    ProductionSystem,
    ClimateClassification,
    Country,
    Description,
    CentresInvolved,
}

impl RecordField {
    pub const ALL: [RecordField; 8] = [
        RecordField::Innovation,
        RecordField::TypeOfInnovation,
        RecordField::Scale,
        RecordField::ProductionSystem,
        RecordField::ClimateClassification,
        RecordField::Country,
        RecordField::Description,
        RecordField::CentresInvolved,
    ];

    /// Column name used when the record is serialized or exported
    pub fn column_name(self) -> &'static str {
        match self {
            RecordField::Innovation => "Innovation",
            RecordField::TypeOfInnovation => KEY_TYPE,
            RecordField::Scale => KEY_SCALE,
            RecordField::ProductionSystem => KEY_PRODUCTION_SYSTEM,
            RecordField::ClimateClassification => KEY_CLIMATE,
            RecordField::Country => KEY_COUNTRY,
            RecordField::Description => KEY_DESCRIPTION,
            RecordField::CentresInvolved => KEY_CENTRES,
        }
    }

    /// Looks up a field by its column name
    pub fn from_column_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.column_name() == name)
    }
}

impl Serialize for RecordField {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.column_name())
    }
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

/// One catalogued innovation after normalization.
///
/// Every canonical field is always present; absence is an empty string.
/// `extra` keeps the full raw object so unanticipated columns survive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InnovationRecord {
    pub innovation: String,
    pub type_of_innovation: String,
    pub scale: String,
    pub production_system: String,
    pub climate_classification: String,
    pub country: String,
    pub description: String,
    pub centres_involved: String,
    pub extra: Map<String, Value>,
}

impl InnovationRecord {
    /// Normalizes one raw object. Never fails.
    pub fn from_raw(raw: &Map<String, Value>) -> Self {
        let innovation = first_text(raw, &[KEY_INNOVATION, KEY_INNOVATION_SHORT]);

        let description = match first_text(raw, &[KEY_DESCRIPTION]) {
            native if !native.is_empty() => native,
            _ => synthesize_description(raw, &innovation),
        };

        Self {
            type_of_innovation: first_text(raw, &[KEY_TYPE]),
            scale: first_text(raw, &[KEY_SCALE]),
            production_system: first_text(raw, &[KEY_PRODUCTION_SYSTEM]),
            climate_classification: first_text(raw, &[KEY_CLIMATE]),
            country: first_text(raw, &[KEY_COUNTRY]),
            centres_involved: first_text(raw, &[KEY_CENTRES_SPACED, KEY_CENTRES]),
            description,
            innovation,
            extra: raw.clone(),
        }
    }

    /// Returns the canonical value of a field
    pub fn get(&self, field: RecordField) -> &str {
        match field {
            RecordField::Innovation => &self.innovation,
            RecordField::TypeOfInnovation => &self.type_of_innovation,
            RecordField::Scale => &self.scale,
            RecordField::ProductionSystem => &self.production_system,
            RecordField::ClimateClassification => &self.climate_classification,
            RecordField::Country => &self.country,
            RecordField::Description => &self.description,
            RecordField::CentresInvolved => &self.centres_involved,
        }
    }

    /// Looks up any column by name; canonical fields shadow passthrough keys
    pub fn value(&self, key: &str) -> Option<Cow<'_, str>> {
        if let Some(field) = RecordField::from_column_name(key) {
            return Some(Cow::Borrowed(self.get(field)));
        }
        self.extra.get(key).and_then(value_text).map(Cow::Owned)
    }

    /// Flat JSON object: passthrough keys first, canonical fields written over them
    pub fn to_json_map(&self) -> Map<String, Value> {
        let mut map = self.extra.clone();
        for field in RecordField::ALL {
            map.insert(
                field.column_name().to_string(),
                Value::String(self.get(field).to_string()),
            );
        }
        map
    }
}

impl Serialize for InnovationRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json_map().serialize(serializer)
    }
}

// * Builds "Challenge: ... . Data: ... . Site: ..." from whichever parts exist,
// * else falls back to the already resolved name
fn synthesize_description(raw: &Map<String, Value>, name: &str) -> String {
    let parts: Vec<String> = [
        ("Challenge", KEY_CHALLENGE),
        ("Data", KEY_DATA_COLLECTED),
        ("Site", KEY_SITE),
    ]
    .iter()
    .filter_map(|(label, key)| {
        let text = first_text(raw, &[*key]);
        (!text.is_empty()).then(|| format!("{}: {}", label, text))
    })
    .collect();

    if !parts.is_empty() {
        return parts.join(". ");
    }

    match name {
        "" => NO_DESCRIPTION.to_string(),
        name => name.to_string(),
    }
}

// * First non-empty textual value among the candidate keys, else ""
fn first_text(raw: &Map<String, Value>, keys: &[&str]) -> String {
    keys.iter()
        .filter_map(|k| raw.get(*k).and_then(value_text))
        .find(|s| !s.is_empty())
        .unwrap_or_default()
}

/// Coerces a JSON value to text; `null` counts as absent
pub fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("fixture must be an object"),
        }
    }

    #[test]
    fn test_description_synthesized_from_parts() {
        let record = InnovationRecord::from_raw(&raw(json!({
            "Innovation/ Technology/ Tool": "Drip kits",
            "Challenge it was addressing": "Water scarcity",
            "Data collected": "Yield",
            "Site": "Machakos"
        })));

        assert_eq!(
            record.description,
            "Challenge: Water scarcity. Data: Yield. Site: Machakos"
        );
    }

    #[test]
    fn test_description_partial_parts() {
        let record = InnovationRecord::from_raw(&raw(json!({
            "Data collected": "Soil carbon",
            "Site": ""
        })));

        assert_eq!(record.description, "Data: Soil carbon");
    }

    #[test]
    fn test_description_falls_back_to_name() {
        let record = InnovationRecord::from_raw(&raw(json!({
            "Innovation/ Technology/ Tool": "Agroforestry app"
        })));

        assert_eq!(record.description, "Agroforestry app");
        assert_eq!(record.innovation, "Agroforestry app");
    }

    #[test]
    fn test_description_falls_back_to_short_name_key() {
        let record = InnovationRecord::from_raw(&raw(json!({
            "Innovation": "Zai pits"
        })));

        assert_eq!(record.innovation, "Zai pits");
        assert_eq!(record.description, record.innovation);
    }

    #[test]
    fn test_description_default_literal() {
        let record = InnovationRecord::from_raw(&Map::new());
        assert_eq!(record.description, "No description available");
    }

    #[test]
    fn test_native_description_kept() {
        let record = InnovationRecord::from_raw(&raw(json!({
            "Description": "Native text",
            "Challenge it was addressing": "Ignored"
        })));

        assert_eq!(record.description, "Native text");
    }

    #[test]
    fn test_centres_prefers_trailing_space_key() {
        let record = InnovationRecord::from_raw(&raw(json!({
            "Centre (s) involved ": "CIAT; ILRI",
            "Centre (s) involved": "IWMI"
        })));

        assert_eq!(record.centres_involved, "CIAT; ILRI");
    }

    #[test]
    fn test_centres_falls_back_to_plain_key() {
        let record = InnovationRecord::from_raw(&raw(json!({
            "Centre (s) involved": "IWMI"
        })));

        assert_eq!(record.centres_involved, "IWMI");
    }

    #[test]
    fn test_missing_fields_are_empty() {
        let record = InnovationRecord::from_raw(&Map::new());

        for field in RecordField::ALL {
            if field != RecordField::Description {
                assert_eq!(record.get(field), "", "{} should be empty", field);
            }
        }
    }

    #[test]
    fn test_non_string_values_coerced() {
        let record = InnovationRecord::from_raw(&raw(json!({
            "Scale": 3,
            "Country": null
        })));

        assert_eq!(record.scale, "3");
        assert_eq!(record.country, "");
    }

    #[test]
    fn test_passthrough_and_canonical_precedence() {
        let record = InnovationRecord::from_raw(&raw(json!({
            "Focal Point": "Jane",
            "Centre (s) involved ": "CIAT",
            "Centre (s) involved": ""
        })));

        assert_eq!(record.value("Focal Point").as_deref(), Some("Jane"));
        assert_eq!(record.value("Centre (s) involved").as_deref(), Some("CIAT"));

        let map = record.to_json_map();
        assert_eq!(map["Focal Point"], json!("Jane"));
        assert_eq!(map["Centre (s) involved"], json!("CIAT"));
    }

    #[test]
    fn test_column_name_lookup() {
        assert_eq!(
            RecordField::from_column_name("Climate Classification"),
            Some(RecordField::ClimateClassification)
        );
        assert_eq!(RecordField::from_column_name("Focal Point"), None);
    }
}
