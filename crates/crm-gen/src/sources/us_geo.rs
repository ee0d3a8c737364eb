//! Reference table of real US city, state and ZIP triples.

use fake::Fake;
use fake::faker::address::en::{BuildingNumber, StreetName};
use rand::Rng;

use crm_records::UsRegion;

/// A real US place with a representative ZIP code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Place {
    pub city: &'static str,
    /// Two-letter state code.
    pub state: &'static str,
    pub zip: &'static str,
}

macro_rules! places {
    ($(($city:literal, $state:literal, $zip:literal)),* $(,)?) => {
        &[$(Place { city: $city, state: $state, zip: $zip }),*]
    };
}

pub const PLACES: &[Place] = places![
    ("New York", "NY", "10001"),
    ("Brooklyn", "NY", "11201"),
    ("Rochester", "NY", "14604"),
    ("Boston", "MA", "02108"),
    ("Cambridge", "MA", "02139"),
    ("Worcester", "MA", "01608"),
    ("Philadelphia", "PA", "19103"),
    ("Pittsburgh", "PA", "15222"),
    ("Newark", "NJ", "07102"),
    ("Jersey City", "NJ", "07302"),
    ("Hartford", "CT", "06103"),
    ("Stamford", "CT", "06901"),
    ("Providence", "RI", "02903"),
    ("Portland", "ME", "04101"),
    ("Burlington", "VT", "05401"),
    ("Manchester", "NH", "03101"),
    ("Baltimore", "MD", "21202"),
    ("Wilmington", "DE", "19801"),
    ("Washington", "DC", "20001"),
    ("Atlanta", "GA", "30303"),
    ("Savannah", "GA", "31401"),
    ("Miami", "FL", "33131"),
    ("Tampa", "FL", "33602"),
    ("Orlando", "FL", "32801"),
    ("Jacksonville", "FL", "32202"),
    ("Charlotte", "NC", "28202"),
    ("Raleigh", "NC", "27601"),
    ("Durham", "NC", "27701"),
    ("Charleston", "SC", "29401"),
    ("Nashville", "TN", "37203"),
    ("Memphis", "TN", "38103"),
    ("Richmond", "VA", "23219"),
    ("Arlington", "VA", "22201"),
    ("Louisville", "KY", "40202"),
    ("Birmingham", "AL", "35203"),
    ("New Orleans", "LA", "70112"),
    ("Little Rock", "AR", "72201"),
    ("Jackson", "MS", "39201"),
    ("Charleston", "WV", "25301"),
    ("Chicago", "IL", "60601"),
    ("Detroit", "MI", "48226"),
    ("Grand Rapids", "MI", "49503"),
    ("Minneapolis", "MN", "55401"),
    ("Columbus", "OH", "43215"),
    ("Cleveland", "OH", "44113"),
    ("Cincinnati", "OH", "45202"),
    ("Indianapolis", "IN", "46204"),
    ("Milwaukee", "WI", "53202"),
    ("Madison", "WI", "53703"),
    ("St. Louis", "MO", "63101"),
    ("Kansas City", "MO", "64105"),
    ("Omaha", "NE", "68102"),
    ("Des Moines", "IA", "50309"),
    ("Wichita", "KS", "67202"),
    ("Fargo", "ND", "58102"),
    ("Sioux Falls", "SD", "57104"),
    ("Austin", "TX", "78701"),
    ("Dallas", "TX", "75201"),
    ("Houston", "TX", "77002"),
    ("San Antonio", "TX", "78205"),
    ("Fort Worth", "TX", "76102"),
    ("Phoenix", "AZ", "85004"),
    ("Scottsdale", "AZ", "85251"),
    ("Tucson", "AZ", "85701"),
    ("Albuquerque", "NM", "87102"),
    ("Oklahoma City", "OK", "73102"),
    ("Tulsa", "OK", "74103"),
    ("San Francisco", "CA", "94105"),
    ("San Jose", "CA", "95113"),
    ("Palo Alto", "CA", "94301"),
    ("Los Angeles", "CA", "90012"),
    ("San Diego", "CA", "92101"),
    ("Irvine", "CA", "92618"),
    ("Sacramento", "CA", "95814"),
    ("Seattle", "WA", "98101"),
    ("Bellevue", "WA", "98004"),
    ("Portland", "OR", "97204"),
    ("Denver", "CO", "80202"),
    ("Boulder", "CO", "80302"),
    ("Salt Lake City", "UT", "84111"),
    ("Las Vegas", "NV", "89101"),
    ("Boise", "ID", "83702"),
    ("Honolulu", "HI", "96813"),
    ("Anchorage", "AK", "99501"),
    ("Billings", "MT", "59101"),
    ("Cheyenne", "WY", "82001"),
];

/// A street address, place and region drawn with `rng`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub street_address: String,
    pub place: Place,
    pub region: UsRegion,
}

/// Draws a random street in a random place from [`PLACES`].
pub fn random_location(rng: &mut impl Rng) -> Location {
    let place = PLACES[rng.gen_range(0..PLACES.len())];
    let number: String = BuildingNumber().fake_with_rng(rng);
    let street: String = StreetName().fake_with_rng(rng);
    Location {
        street_address: format!("{number} {street}"),
        place,
        // Every state in the table has a region
        region: UsRegion::for_state(place.state).unwrap_or(UsRegion::West),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn test_every_place_has_region() {
        for place in PLACES {
            assert!(
                UsRegion::for_state(place.state).is_some(),
                "{} has no region",
                place.state
            );
            assert_eq!(place.zip.len(), 5);
        }
    }

    #[test]
    fn test_random_location() {
        let mut rng = StdRng::seed_from_u64(11);
        let location = random_location(&mut rng);
        assert!(PLACES.contains(&location.place));
        assert!(!location.street_address.trim().is_empty());
        assert_eq!(
            Some(location.region),
            UsRegion::for_state(location.place.state)
        );
    }
}
