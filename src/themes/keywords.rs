//! Fixed keyword lists for the six scored environmental themes.

use crate::types::Theme;

pub const CLIMATE_CHANGE: &[&str] = &[
    "climate", "net zero", "net-zero", "climate transition",
    "climate action", "ctap", "paris", "1.5", "2 degree",
    "decarbonisation", "decarbonization",
];

pub const GHG_EMISSIONS: &[&str] = &[
    "emission", "emissions", "ghg", "greenhouse gas",
    "scope 1", "scope 2", "scope 3", "carbon footprint",
    "co2", "co2e", "inventory", "measurement",
];

pub const ENERGY_RENEWABLES: &[&str] = &[
    "energy", "renewable", "renewables", "electricity",
    "solar", "wind", "clean energy", "energy efficiency",
];

pub const WATER_EFFLUENTS: &[&str] = &[
    "water", "wastewater", "effluent", "water withdrawal",
    "water consumption", "water efficiency", "water stress",
];

pub const WASTE_CIRCULARITY: &[&str] = &[
    "waste", "recycling", "recycled", "plastic", "packaging",
    "circular", "circularity", "landfill", "zero waste",
];

pub const BIODIVERSITY: &[&str] = &[
    "biodiversity", "nature", "ecosystem", "deforestation",
    "land use", "natural capital", "habitat", "forestry",
];

/// Keyword list of a theme; empty for the fallback theme.
pub fn keywords(theme: Theme) -> &'static [&'static str] {
    match theme {
        Theme::ClimateChange => CLIMATE_CHANGE,
        Theme::GhgEmissions => GHG_EMISSIONS,
        Theme::EnergyRenewables => ENERGY_RENEWABLES,
        Theme::WaterEffluents => WATER_EFFLUENTS,
        Theme::WasteCircularity => WASTE_CIRCULARITY,
        Theme::Biodiversity => BIODIVERSITY,
        Theme::Other => &[],
    }
}
