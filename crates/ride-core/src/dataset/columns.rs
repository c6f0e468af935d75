//! Recognized source column names.
//!
//! The source is the PRF open-data export, so headers are Portuguese.

use serde::{Deserialize, Serialize};

pub const ID: &str = "id";
pub const DATE: &str = "data_inversa";
pub const DAY_OF_WEEK: &str = "dia_semana";
pub const TIME: &str = "horario";
pub const MUNICIPALITY: &str = "municipio";
pub const LATITUDE: &str = "latitude";
pub const LONGITUDE: &str = "longitude";

pub const UNINJURED: &str = "ilesos";
pub const MINOR_INJURIES: &str = "feridos_leves";
pub const SEVERE_INJURIES: &str = "feridos_graves";
pub const DEATHS: &str = "mortos";

pub const MAIN_CAUSE: &str = "causa_principal";
pub const CAUSE: &str = "causa_acidente";
pub const ACCIDENT_TYPE: &str = "tipo_acidente";
pub const WEATHER: &str = "condicao_metereologica";
pub const ROAD_TYPE: &str = "tipo_pista";
pub const ROAD_LAYOUT: &str = "tracado_via";
pub const LAND_USE: &str = "uso_solo";
pub const VEHICLE_TYPE: &str = "tipo_veiculo";
pub const BRAND: &str = "marca";
pub const MANUFACTURE_YEAR: &str = "ano_fabricacao_veiculo";
pub const AGE: &str = "idade";
pub const SEX: &str = "sexo";

/// Derived columns written by the normalized export. Ignored on input.
pub const TOTAL_VICTIMS: &str = "total_vitimas";
pub const HAS_VICTIMS: &str = "tem_vitimas";

/// Severity counter columns in display order.
pub const SEVERITY: [&str; 4] = [UNINJURED, MINOR_INJURIES, SEVERE_INJURIES, DEATHS];

/// Every column the normalizer interprets. Anything else passes through.
pub const RECOGNIZED: [&str; 23] = [
    ID,
    DATE,
    DAY_OF_WEEK,
    TIME,
    MUNICIPALITY,
    LATITUDE,
    LONGITUDE,
    UNINJURED,
    MINOR_INJURIES,
    SEVERE_INJURIES,
    DEATHS,
    MAIN_CAUSE,
    CAUSE,
    ACCIDENT_TYPE,
    WEATHER,
    ROAD_TYPE,
    ROAD_LAYOUT,
    LAND_USE,
    VEHICLE_TYPE,
    BRAND,
    MANUFACTURE_YEAR,
    AGE,
    SEX,
];

pub fn is_recognized(name: &str) -> bool {
    RECOGNIZED.contains(&name) || name == TOTAL_VICTIMS || name == HAS_VICTIMS
}

/// Categorical attributes carried on every record.
///
/// All of them are relabeled once during normalization; reports only read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Municipality,
    MainCause,
    Cause,
    AccidentType,
    Weather,
    RoadType,
    RoadLayout,
    LandUse,
    VehicleType,
    Sex,
    DayOfWeek,
    Brand,
}

impl Category {
    pub const COUNT: usize = 12;

    pub const ALL: [Category; Category::COUNT] = [
        Category::Municipality,
        Category::MainCause,
        Category::Cause,
        Category::AccidentType,
        Category::Weather,
        Category::RoadType,
        Category::RoadLayout,
        Category::LandUse,
        Category::VehicleType,
        Category::Sex,
        Category::DayOfWeek,
        Category::Brand,
    ];

    /// Variables offered by the distributions section.
    pub const DISTRIBUTABLE: [Category; 10] = [
        Category::Municipality,
        Category::MainCause,
        Category::Cause,
        Category::AccidentType,
        Category::Weather,
        Category::RoadType,
        Category::RoadLayout,
        Category::LandUse,
        Category::VehicleType,
        Category::Sex,
    ];

    /// Source column the attribute is read from.
    pub fn column(self) -> &'static str {
        match self {
            Category::Municipality => MUNICIPALITY,
            Category::MainCause => MAIN_CAUSE,
            Category::Cause => CAUSE,
            Category::AccidentType => ACCIDENT_TYPE,
            Category::Weather => WEATHER,
            Category::RoadType => ROAD_TYPE,
            Category::RoadLayout => ROAD_LAYOUT,
            Category::LandUse => LAND_USE,
            Category::VehicleType => VEHICLE_TYPE,
            Category::Sex => SEX,
            Category::DayOfWeek => DAY_OF_WEEK,
            Category::Brand => BRAND,
        }
    }

    /// Look up a category by its source column name.
    pub fn from_column(name: &str) -> Option<Category> {
        Category::ALL.into_iter().find(|c| c.column() == name)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.column())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_round_trips_through_column_name() {
        for category in Category::ALL {
            assert_eq!(Category::from_column(category.column()), Some(category));
        }
        assert_eq!(Category::from_column("placa"), None);
    }

    #[test]
    fn derived_columns_are_not_passthrough() {
        assert!(is_recognized(TOTAL_VICTIMS));
        assert!(is_recognized(HAS_VICTIMS));
        assert!(is_recognized(DEATHS));
        assert!(!is_recognized("br"));
    }
}
