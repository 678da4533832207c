//! Picks the claimed road distance that deviates most from the true
//! shortest grid path.
//!
//! Every (city, claimed-distance) entry is scored by `claimed - computed`.
//! A pair is only reported when its score strictly beats both zero and
//! every earlier score, so a map whose claims all hold up yields nothing,
//! and ties go to the first pair in document order.

use roadcheck_protocol::City;

use crate::search::shortest_path_length;

/// Returns the pair of cities whose claimed distance most exceeds its true
/// shortest-path length, or `None` when no claim exceeds it at all.
pub fn rank_worst_edge(cities: &[City]) -> Option<(&City, &City)> {
    let mut worst_ratio = 0.0f64;
    let mut worst: Option<(&City, &City)> = None;

    for city in cities {
        for (neighbor_name, &claimed) in &city.distances {
            let Some(neighbor) = city_by_name(cities, neighbor_name) else {
                log::debug!(
                    "distance entry {} -> {} names no city in this map, skipping",
                    city.name,
                    neighbor_name
                );
                continue;
            };
            let Some(computed) = shortest_path_length(city.position, neighbor.position)
            else {
                log::warn!(
                    "no grid path from {} to {}, claimed distance {} not considered",
                    city.name,
                    neighbor.name,
                    claimed
                );
                continue;
            };
            let ratio = claimed - computed;
            if ratio > worst_ratio {
                worst_ratio = ratio;
                worst = Some((city, neighbor));
            }
        }
    }

    worst
}

fn city_by_name<'a>(cities: &'a [City], name: &str) -> Option<&'a City> {
    cities.iter().find(|city| city.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use roadcheck_protocol::Position;

    fn city(name: &str, x: i64, y: i64, claims: &[(&str, f64)]) -> City {
        City {
            name: name.to_string(),
            position: Position::new(x, y),
            distances: claims
                .iter()
                .map(|(neighbor, distance)| (neighbor.to_string(), *distance))
                .collect(),
            extra: serde_json::Map::new(),
        }
    }

    fn names(pair: Option<(&City, &City)>) -> Option<(String, String)> {
        pair.map(|(from, to)| (from.name.clone(), to.name.clone()))
    }

    #[test]
    fn reports_the_largest_overclaim() {
        // True lengths: A-B is 3, A-C is 3. B is claimed at 10 (off by 7),
        // C at 1 (under), so A-B is the verdict.
        let cities = vec![
            city("A", 0, 0, &[("B", 10.0), ("C", 1.0)]),
            city("B", 3, 0, &[]),
            city("C", 0, 3, &[]),
        ];

        assert_eq!(
            names(rank_worst_edge(&cities)),
            Some(("A".to_string(), "B".to_string()))
        );
    }

    #[test]
    fn honest_maps_yield_no_verdict() {
        let cities = vec![
            city("A", 0, 0, &[("B", 3.0), ("C", 2.5)]),
            city("B", 3, 0, &[("A", 1.0)]),
            city("C", 0, 3, &[]),
        ];

        assert_eq!(rank_worst_edge(&cities), None);
    }

    #[test]
    fn an_exact_claim_is_not_an_anomaly() {
        // Claimed equals computed; the strict comparison keeps it out.
        let cities = vec![city("A", 0, 0, &[("B", 4.0)]), city("B", 4, 0, &[])];
        assert_eq!(rank_worst_edge(&cities), None);

        let cities = vec![city("A", 0, 0, &[("B", 4.5)]), city("B", 4, 0, &[])];
        assert_eq!(
            names(rank_worst_edge(&cities)),
            Some(("A".to_string(), "B".to_string()))
        );
    }

    #[test]
    fn equal_deviations_keep_the_first_pair_seen() {
        // Both claims are off by 2; document order decides.
        let cities = vec![
            city("A", 0, 0, &[("B", 5.0), ("C", 5.0)]),
            city("B", 3, 0, &[]),
            city("C", 0, 3, &[]),
        ];

        assert_eq!(
            names(rank_worst_edge(&cities)),
            Some(("A".to_string(), "B".to_string()))
        );
    }

    #[test]
    fn later_strictly_worse_pair_replaces_the_running_best() {
        let cities = vec![
            city("A", 0, 0, &[("B", 5.0)]),
            city("B", 3, 0, &[("C", 9.0)]),
            city("C", 3, 3, &[]),
        ];

        // A-B is off by 2, B-C by 6.
        assert_eq!(
            names(rank_worst_edge(&cities)),
            Some(("B".to_string(), "C".to_string()))
        );
    }

    #[test]
    fn claims_about_unknown_cities_are_skipped() {
        let cities = vec![
            city("A", 0, 0, &[("Nowhere", 99.0), ("B", 7.0)]),
            city("B", 3, 0, &[]),
        ];

        assert_eq!(
            names(rank_worst_edge(&cities)),
            Some(("A".to_string(), "B".to_string()))
        );
    }

    #[test]
    fn empty_city_set_yields_no_verdict() {
        assert_eq!(rank_worst_edge(&[]), None);
    }
}
