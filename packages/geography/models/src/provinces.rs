//! Turkish province reference list and city-name normalization.
//!
//! Station sources report free-text town names ("Kadıköy", "Ankara /
//! Çankaya", "IZMIR"). Everything downstream is keyed by the canonical
//! province names in [`PROVINCES`]; names that cannot be mapped become
//! [`UNKNOWN_CITY`] and are excluded from aggregates.

/// Sentinel for town names that do not resolve to a province.
pub const UNKNOWN_CITY: &str = "Unknown City";

/// The 81 provinces of Türkiye, in the order sources are matched against.
pub const PROVINCES: &[&str] = &[
    "Adana",
    "Adıyaman",
    "Afyonkarahisar",
    "Ağrı",
    "Amasya",
    "Ankara",
    "Antalya",
    "Artvin",
    "Aydın",
    "Balıkesir",
    "Bilecik",
    "Bingöl",
    "Bitlis",
    "Bolu",
    "Burdur",
    "Bursa",
    "Çanakkale",
    "Çankırı",
    "Çorum",
    "Denizli",
    "Diyarbakır",
    "Edirne",
    "Elazığ",
    "Erzincan",
    "Erzurum",
    "Eskişehir",
    "Gaziantep",
    "Giresun",
    "Gümüşhane",
    "Hakkari",
    "Hatay",
    "Isparta",
    "Mersin",
    "İstanbul",
    "İzmir",
    "Kars",
    "Kastamonu",
    "Kayseri",
    "Kırklareli",
    "Kırşehir",
    "Kocaeli",
    "Konya",
    "Kütahya",
    "Malatya",
    "Manisa",
    "Kahramanmaraş",
    "Mardin",
    "Muğla",
    "Muş",
    "Nevşehir",
    "Niğde",
    "Ordu",
    "Rize",
    "Sakarya",
    "Samsun",
    "Siirt",
    "Sinop",
    "Sivas",
    "Tekirdağ",
    "Tokat",
    "Trabzon",
    "Tunceli",
    "Şanlıurfa",
    "Uşak",
    "Van",
    "Yozgat",
    "Zonguldak",
    "Aksaray",
    "Bayburt",
    "Karaman",
    "Kırıkkale",
    "Batman",
    "Şırnak",
    "Bartın",
    "Ardahan",
    "Iğdır",
    "Yalova",
    "Karabük",
    "Kilis",
    "Osmaniye",
    "Düzce",
];

/// Istanbul districts that sources commonly report in place of the province.
const ISTANBUL_DISTRICTS: &[&str] = &["Kadıköy", "Beşiktaş", "Şişli", "Bakırköy", "Beyoğlu"];

/// Returns `true` if `name` is one of the canonical [`PROVINCES`].
#[must_use]
pub fn is_province(name: &str) -> bool {
    PROVINCES.contains(&name)
}

/// Maps a free-text town name onto a canonical province name.
///
/// Only the part before the first `/` is considered. Known Istanbul
/// districts map to "İstanbul"; otherwise the first province whose
/// lowercase name contains, or is contained in, the lowercase input wins.
/// Returns [`UNKNOWN_CITY`] when nothing matches.
#[must_use]
pub fn normalize_city_name(raw: &str) -> &'static str {
    let city = raw.split('/').next().unwrap_or_default().trim();

    if city.is_empty() {
        return UNKNOWN_CITY;
    }

    if ISTANBUL_DISTRICTS.contains(&city) {
        return "İstanbul";
    }

    let needle = city.to_lowercase();

    PROVINCES
        .iter()
        .find(|province| {
            let candidate = province.to_lowercase();
            candidate.contains(&needle) || needle.contains(&candidate)
        })
        .copied()
        .unwrap_or(UNKNOWN_CITY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn province_count() {
        assert_eq!(PROVINCES.len(), 81);
    }

    #[test]
    fn provinces_are_unique() {
        let unique: BTreeSet<_> = PROVINCES.iter().collect();
        assert_eq!(unique.len(), PROVINCES.len());
    }

    #[test]
    fn canonical_names_map_to_themselves() {
        for province in PROVINCES {
            assert!(is_province(province));
        }
        assert_eq!(normalize_city_name("Ankara"), "Ankara");
        assert_eq!(normalize_city_name("Düzce"), "Düzce");
    }

    #[test]
    fn slash_suffix_and_whitespace_are_ignored() {
        assert_eq!(normalize_city_name("  Ankara / Çankaya "), "Ankara");
    }

    #[test]
    fn istanbul_districts_map_to_istanbul() {
        assert_eq!(normalize_city_name("Kadıköy"), "İstanbul");
        assert_eq!(normalize_city_name("Beşiktaş/Levent"), "İstanbul");
    }

    #[test]
    fn case_insensitive_containment() {
        assert_eq!(normalize_city_name("bursa"), "Bursa");
        assert_eq!(normalize_city_name("Antalya Merkez"), "Antalya");
    }

    #[test]
    fn unknown_names_become_sentinel() {
        assert_eq!(normalize_city_name("Narnia"), UNKNOWN_CITY);
        assert_eq!(normalize_city_name(""), UNKNOWN_CITY);
        assert_eq!(normalize_city_name("   / x"), UNKNOWN_CITY);
        assert!(!is_province(UNKNOWN_CITY));
    }
}
