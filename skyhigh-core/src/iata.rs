use serde::Serialize;

// ============================================================================
// Airport Directory
// ============================================================================

/// An airport the search form offers as origin or destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Airport {
    pub code: &'static str,
    pub name: &'static str,
    pub city: &'static str,
}

const fn airport(code: &'static str, name: &'static str, city: &'static str) -> Airport {
    Airport { code, name, city }
}

/// Premium long-haul gateways served by the search form.
pub const AIRPORTS: &[Airport] = &[
    airport("JFK", "John F. Kennedy International", "New York"),
    airport("LHR", "Heathrow Airport", "London"),
    airport("CDG", "Charles de Gaulle Airport", "Paris"),
    airport("LAX", "Los Angeles International", "Los Angeles"),
    airport("DXB", "Dubai International", "Dubai"),
    airport("SIN", "Changi Airport", "Singapore"),
    airport("HND", "Haneda Airport", "Tokyo"),
    airport("SYD", "Sydney Airport", "Sydney"),
    airport("HKG", "Hong Kong International", "Hong Kong"),
    airport("FRA", "Frankfurt Airport", "Frankfurt"),
    airport("AMS", "Amsterdam Schiphol", "Amsterdam"),
    airport("ORD", "O'Hare International", "Chicago"),
    airport("ICN", "Incheon International", "Seoul"),
    airport("MIA", "Miami International", "Miami"),
    airport("GRU", "São Paulo–Guarulhos", "São Paulo"),
    airport("MAD", "Adolfo Suárez Madrid–Barajas", "Madrid"),
    airport("BCN", "Barcelona Airport", "Barcelona"),
    airport("JNB", "O.R. Tambo International", "Johannesburg"),
    airport("YYZ", "Toronto Pearson", "Toronto"),
    airport("DOH", "Hamad International", "Doha"),
    airport("MUC", "Munich Airport", "Munich"),
    airport("MEL", "Melbourne Airport", "Melbourne"),
    airport("BKK", "Suvarnabhumi Airport", "Bangkok"),
    airport("SFO", "San Francisco International", "San Francisco"),
    airport("ZRH", "Zurich Airport", "Zurich"),
    airport("VIE", "Vienna International", "Vienna"),
    airport("DEL", "Indira Gandhi International", "Delhi"),
    airport("MEX", "Benito Juárez International", "Mexico City"),
    airport("IST", "Istanbul Airport", "Istanbul"),
    airport("BOM", "Chhatrapati Shivaji International", "Mumbai"),
    airport("CPH", "Copenhagen Airport", "Copenhagen"),
    airport("DME", "Domodedovo International", "Moscow"),
    airport("CAI", "Cairo International", "Cairo"),
];

/// Look up an airport by its IATA code. Matching is case-insensitive.
pub fn find_airport(code: &str) -> Option<&'static Airport> {
    let code = code.trim();
    AIRPORTS.iter().find(|a| a.code.eq_ignore_ascii_case(code))
}

pub fn is_known_airport(code: &str) -> bool {
    find_airport(code).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_codes_are_unique_three_letter_uppercase() {
        let mut seen = HashSet::new();
        for a in AIRPORTS {
            assert_eq!(a.code.len(), 3, "bad code {}", a.code);
            assert!(a.code.chars().all(|c| c.is_ascii_uppercase()));
            assert!(seen.insert(a.code), "duplicate code {}", a.code);
        }
        assert_eq!(AIRPORTS.len(), 33);
    }

    #[test]
    fn test_lookup_ignores_case_and_whitespace() {
        let lhr = find_airport(" lhr ").expect("LHR should be listed");
        assert_eq!(lhr.city, "London");
        assert!(find_airport("XXX").is_none());
        assert!(!is_known_airport(""));
    }
}
