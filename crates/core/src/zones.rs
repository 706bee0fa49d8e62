//! Country → shipping zone mapping.
//!
//! Customers pick a destination country; rates are configured per zone.
//! This table decides which zone serves each country.

/// Country names and the zone that serves them.
///
/// Some countries appear under more than one name ("USA", "United States").
pub const COUNTRY_ZONES: &[(&str, &str)] = &[
    ("United Kingdom", "UK_IRELAND"),
    ("England", "UK_IRELAND"),
    ("Scotland", "UK_IRELAND"),
    ("Wales", "UK_IRELAND"),
    ("Northern Ireland", "UK_IRELAND"),
    ("Ireland", "UK_IRELAND"),
    ("Republic of Ireland", "UK_IRELAND"),
    ("Nigeria", "AFRICA"),
    ("Ghana", "AFRICA"),
    ("Senegal", "AFRICA"),
    ("Ivory Coast", "AFRICA"),
    ("Cote d'Ivoire", "AFRICA"),
    ("Cameroon", "AFRICA"),
    ("Benin", "AFRICA"),
    ("Togo", "AFRICA"),
    ("Mali", "AFRICA"),
    ("Burkina Faso", "AFRICA"),
    ("Niger", "AFRICA"),
    ("Chad", "AFRICA"),
    ("Central African Republic", "AFRICA"),
    ("Congo", "AFRICA"),
    ("Democratic Republic of Congo", "AFRICA"),
    ("Gabon", "AFRICA"),
    ("Equatorial Guinea", "AFRICA"),
    ("Sierra Leone", "AFRICA"),
    ("Liberia", "AFRICA"),
    ("Guinea", "AFRICA"),
    ("Guinea-Bissau", "AFRICA"),
    ("Gambia", "AFRICA"),
    ("United States", "USA_CANADA"),
    ("USA", "USA_CANADA"),
    ("United States of America", "USA_CANADA"),
    ("Canada", "USA_CANADA"),
    ("France", "EUROPE"),
    ("Germany", "EUROPE"),
    ("Spain", "EUROPE"),
    ("Italy", "EUROPE"),
    ("Netherlands", "EUROPE"),
    ("Belgium", "EUROPE"),
    ("Switzerland", "EUROPE"),
    ("Austria", "EUROPE"),
    ("Portugal", "EUROPE"),
    ("Greece", "EUROPE"),
    ("Poland", "EUROPE"),
    ("Sweden", "EUROPE"),
    ("Norway", "EUROPE"),
    ("Denmark", "EUROPE"),
    ("Finland", "EUROPE"),
    ("Czech Republic", "EUROPE"),
    ("Hungary", "EUROPE"),
    ("Romania", "EUROPE"),
    ("Slovakia", "EUROPE"),
    ("Bulgaria", "EUROPE"),
    ("Croatia", "EUROPE"),
    ("Slovenia", "EUROPE"),
    ("Luxembourg", "EUROPE"),
    ("Malta", "EUROPE"),
    ("Cyprus", "EUROPE"),
    ("Estonia", "EUROPE"),
    ("Latvia", "EUROPE"),
    ("Lithuania", "EUROPE"),
    ("Iceland", "EUROPE"),
    ("Albania", "EUROPE"),
    ("Serbia", "EUROPE"),
    ("Montenegro", "EUROPE"),
    ("North Macedonia", "EUROPE"),
    ("Bosnia and Herzegovina", "EUROPE"),
    ("Kosovo", "EUROPE"),
    ("Moldova", "EUROPE"),
    ("Ukraine", "EUROPE"),
    ("Belarus", "EUROPE"),
    ("Kenya", "AFRICA"),
    ("Tanzania", "AFRICA"),
    ("Uganda", "AFRICA"),
    ("Rwanda", "AFRICA"),
    ("Burundi", "AFRICA"),
    ("Ethiopia", "AFRICA"),
    ("Somalia", "AFRICA"),
    ("Djibouti", "AFRICA"),
    ("Eritrea", "AFRICA"),
    ("South Sudan", "AFRICA"),
    ("South Africa", "AFRICA"),
    ("Zambia", "AFRICA"),
    ("Zimbabwe", "AFRICA"),
    ("Botswana", "AFRICA"),
    ("Namibia", "AFRICA"),
    ("Mozambique", "AFRICA"),
    ("Malawi", "AFRICA"),
    ("Madagascar", "AFRICA"),
    ("Mauritius", "AFRICA"),
    ("Seychelles", "AFRICA"),
    ("Comoros", "AFRICA"),
    ("Lesotho", "AFRICA"),
    ("Eswatini", "AFRICA"),
    ("Swaziland", "AFRICA"),
    ("Saudi Arabia", "MIDDLEEAST"),
    ("United Arab Emirates", "MIDDLEEAST"),
    ("UAE", "MIDDLEEAST"),
    ("Dubai", "MIDDLEEAST"),
    ("Qatar", "MIDDLEEAST"),
    ("Kuwait", "MIDDLEEAST"),
    ("Bahrain", "MIDDLEEAST"),
    ("Oman", "MIDDLEEAST"),
    ("Jordan", "MIDDLEEAST"),
    ("Lebanon", "MIDDLEEAST"),
    ("Syria", "MIDDLEEAST"),
    ("Iraq", "MIDDLEEAST"),
    ("Yemen", "MIDDLEEAST"),
    ("Israel", "MIDDLEEAST"),
    ("Palestine", "MIDDLEEAST"),
    ("Turkey", "MIDDLEEAST"),
    ("Iran", "MIDDLEEAST"),
    ("China", "ASIA"),
    ("Japan", "ASIA"),
    ("South Korea", "ASIA"),
    ("India", "ASIA"),
    ("Pakistan", "ASIA"),
    ("Bangladesh", "ASIA"),
    ("Sri Lanka", "ASIA"),
    ("Nepal", "ASIA"),
    ("Bhutan", "ASIA"),
    ("Maldives", "ASIA"),
    ("Afghanistan", "ASIA"),
    ("Thailand", "ASIA"),
    ("Vietnam", "ASIA"),
    ("Malaysia", "ASIA"),
    ("Singapore", "ASIA"),
    ("Indonesia", "ASIA"),
    ("Philippines", "ASIA"),
    ("Myanmar", "ASIA"),
    ("Cambodia", "ASIA"),
    ("Laos", "ASIA"),
    ("Brunei", "ASIA"),
    ("Mongolia", "ASIA"),
    ("Taiwan", "ASIA"),
    ("Hong Kong", "ASIA"),
    ("Macau", "ASIA"),
    ("North Korea", "ASIA"),
    ("Timor-Leste", "ASIA"),
    ("Papua New Guinea", "ASIA"),
    ("Australia", "ASIA"),
    ("New Zealand", "ASIA"),
    ("Fiji", "ASIA"),
    ("Brazil", "SOUTH_AMERICA"),
    ("Argentina", "SOUTH_AMERICA"),
    ("Chile", "SOUTH_AMERICA"),
    ("Colombia", "SOUTH_AMERICA"),
    ("Peru", "SOUTH_AMERICA"),
    ("Venezuela", "SOUTH_AMERICA"),
    ("Ecuador", "SOUTH_AMERICA"),
    ("Bolivia", "SOUTH_AMERICA"),
    ("Paraguay", "SOUTH_AMERICA"),
    ("Uruguay", "SOUTH_AMERICA"),
    ("Guyana", "SOUTH_AMERICA"),
    ("Suriname", "SOUTH_AMERICA"),
    ("French Guiana", "SOUTH_AMERICA"),
    ("Mexico", "SOUTH_AMERICA"),
    ("Guatemala", "SOUTH_AMERICA"),
    ("Honduras", "SOUTH_AMERICA"),
    ("El Salvador", "SOUTH_AMERICA"),
    ("Nicaragua", "SOUTH_AMERICA"),
    ("Costa Rica", "SOUTH_AMERICA"),
    ("Panama", "SOUTH_AMERICA"),
    ("Belize", "SOUTH_AMERICA"),
    ("Cuba", "SOUTH_AMERICA"),
    ("Jamaica", "SOUTH_AMERICA"),
    ("Haiti", "SOUTH_AMERICA"),
    ("Dominican Republic", "SOUTH_AMERICA"),
    ("Trinidad and Tobago", "SOUTH_AMERICA"),
    ("Barbados", "SOUTH_AMERICA"),
    ("Bahamas", "SOUTH_AMERICA"),
];

/// The zone serving `country`.
///
/// Surrounding whitespace is ignored. An exact match wins; otherwise the
/// name is compared case-insensitively.
///
/// ```
/// use transdom_core::zones::zone_for_country;
///
/// assert_eq!(zone_for_country("Ghana"), Some("AFRICA"));
/// assert_eq!(zone_for_country("  united kingdom "), Some("UK_IRELAND"));
/// assert_eq!(zone_for_country("Atlantis"), None);
/// ```
#[must_use]
pub fn zone_for_country(country: &str) -> Option<&'static str> {
    let country = country.trim();
    COUNTRY_ZONES
        .iter()
        .find(|(name, _)| *name == country)
        .or_else(|| {
            COUNTRY_ZONES
                .iter()
                .find(|(name, _)| name.eq_ignore_ascii_case(country))
        })
        .map(|(_, zone)| *zone)
}

/// Every country name mapped to `zone`, in table order.
#[must_use]
pub fn countries_in_zone(zone: &str) -> Vec<&'static str> {
    COUNTRY_ZONES
        .iter()
        .filter(|(_, z)| *z == zone)
        .map(|(name, _)| *name)
        .collect()
}

/// Every zone named in the mapping, in order of first appearance.
#[must_use]
pub fn all_zones() -> Vec<&'static str> {
    let mut zones: Vec<&'static str> = Vec::new();
    for (_, zone) in COUNTRY_ZONES {
        if !zones.contains(zone) {
            zones.push(*zone);
        }
    }
    zones
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match() {
        assert_eq!(zone_for_country("Canada"), Some("USA_CANADA"));
        assert_eq!(zone_for_country("Cote d'Ivoire"), Some("AFRICA"));
    }

    #[test]
    fn test_case_insensitive_match() {
        assert_eq!(zone_for_country("FRANCE"), Some("EUROPE"));
        assert_eq!(zone_for_country("saudi arabia"), Some("MIDDLEEAST"));
    }

    #[test]
    fn test_unknown_country() {
        assert_eq!(zone_for_country(""), None);
        assert_eq!(zone_for_country("Narnia"), None);
    }

    #[test]
    fn test_countries_in_zone() {
        let countries = countries_in_zone("USA_CANADA");
        assert_eq!(
            countries,
            vec!["United States", "USA", "United States of America", "Canada"]
        );
        assert!(countries_in_zone("NOWHERE").is_empty());
    }

    #[test]
    fn test_all_zones() {
        assert_eq!(
            all_zones(),
            vec![
                "UK_IRELAND",
                "AFRICA",
                "USA_CANADA",
                "EUROPE",
                "MIDDLEEAST",
                "ASIA",
                "SOUTH_AMERICA"
            ]
        );
    }

    #[test]
    fn test_no_country_listed_twice() {
        let mut names: Vec<String> = COUNTRY_ZONES
            .iter()
            .map(|(name, _)| name.to_ascii_lowercase())
            .collect();
        let total = names.len();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), total);
    }
}
