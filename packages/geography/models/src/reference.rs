//! Reference centre coordinates and populations for the major provinces.
//!
//! Used to place synthetic stations and as a fallback location for
//! provinces that have a demographic row but no stations in the catalogue.

use ev_siting_station_models::Coordinate;

/// A province with a known centre point and population estimate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceCity {
    /// Canonical province name.
    pub name: &'static str,
    /// City centre.
    pub center: Coordinate,
    /// Resident population estimate.
    pub population: u64,
}

const fn city(name: &'static str, lat: f64, lon: f64, population: u64) -> ReferenceCity {
    ReferenceCity {
        name,
        center: Coordinate::new(lat, lon),
        population,
    }
}

/// The 15 largest provinces, ordered by population tier.
pub const MAJOR_CITIES: &[ReferenceCity] = &[
    city("İstanbul", 41.0082, 28.9784, 15_462_000),
    city("Ankara", 39.9334, 32.8597, 5_639_000),
    city("İzmir", 38.4237, 27.1428, 4_367_000),
    city("Bursa", 40.1885, 29.0610, 3_056_000),
    city("Antalya", 36.8969, 30.7133, 2_511_000),
    city("Adana", 37.0000, 35.3213, 2_237_000),
    city("Konya", 37.8719, 32.4844, 2_232_000),
    city("Gaziantep", 37.0662, 37.3833, 2_069_000),
    city("Şanlıurfa", 37.1591, 38.7969, 2_073_000),
    city("Mersin", 36.8000, 34.6333, 1_840_000),
    city("Diyarbakır", 37.9144, 40.2306, 1_756_000),
    city("Kayseri", 38.7312, 35.4787, 1_400_000),
    city("Eskişehir", 39.7767, 30.5206, 871_000),
    city("Samsun", 41.2867, 36.3300, 1_335_000),
    city("Denizli", 37.7765, 29.0864, 1_033_000),
];

/// Population of the largest province, used to scale per-city station counts.
pub const LARGEST_POPULATION: u64 = 15_462_000;

/// Looks up a major province by canonical name.
#[must_use]
pub fn reference_city(name: &str) -> Option<&'static ReferenceCity> {
    MAJOR_CITIES.iter().find(|c| c.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provinces::is_province;

    #[test]
    fn major_cities_are_provinces() {
        for city in MAJOR_CITIES {
            assert!(is_province(city.name), "{} is not a province", city.name);
        }
    }

    #[test]
    fn largest_population_matches_table() {
        let max = MAJOR_CITIES.iter().map(|c| c.population).max();
        assert_eq!(max, Some(LARGEST_POPULATION));
    }

    #[test]
    fn lookup_by_name() {
        let ankara = reference_city("Ankara").unwrap();
        assert!((ankara.center.lat - 39.9334).abs() < 1e-9);
        assert!(reference_city("Kilis").is_none());
    }
}
