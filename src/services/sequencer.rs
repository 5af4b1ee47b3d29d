use crate::models::HasCoordinates;

/// Reorder waypoints by greedy nearest-neighbour selection.
///
/// Starts at `start_index` (clamped to the last waypoint) and repeatedly
/// appends the closest not-yet-visited waypoint to the last one placed.
/// Equal distances go to the waypoint with the lowest original index.
/// Sequences of two or fewer waypoints are returned unchanged.
pub fn optimize_order<T>(waypoints: &[T], start_index: usize) -> Vec<T>
where
    T: HasCoordinates + Clone,
{
    if waypoints.len() <= 2 {
        return waypoints.to_vec();
    }

    let start = start_index.min(waypoints.len() - 1);
    if start != start_index {
        tracing::debug!(
            start_index,
            clamped = start,
            "Start index out of range for {} waypoints, clamping",
            waypoints.len()
        );
    }

    // Remaining waypoints stay in original order so the first strict
    // minimum found is the lowest index among ties.
    let mut remaining: Vec<&T> = waypoints.iter().collect();
    let mut ordered: Vec<T> = Vec::with_capacity(waypoints.len());

    let first = remaining.remove(start);
    let mut current = first.coordinates();
    ordered.push(first.clone());

    while !remaining.is_empty() {
        let mut best_idx = 0;
        let mut best_dist = f64::INFINITY;

        for (idx, candidate) in remaining.iter().enumerate() {
            let dist = current.distance_to(&candidate.coordinates());
            if dist < best_dist {
                best_dist = dist;
                best_idx = idx;
            }
        }

        let next = remaining.remove(best_idx);
        current = next.coordinates();
        ordered.push(next.clone());
    }

    ordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::coordinates::path_length_km;
    use crate::models::{Coordinates, Waypoint};

    fn wp(id: &str, lat: f64, lng: f64) -> Waypoint {
        Waypoint::new(id, id, Coordinates::new(lat, lng).unwrap(), "viewpoint")
    }

    fn ids(waypoints: &[Waypoint]) -> Vec<&str> {
        waypoints.iter().map(|w| w.id.as_str()).collect()
    }

    #[test]
    fn short_sequences_are_unchanged() {
        let empty: Vec<Waypoint> = vec![];
        assert!(optimize_order(&empty, 0).is_empty());

        let one = vec![wp("A", 0.0, 0.0)];
        assert_eq!(optimize_order(&one, 0), one);

        // Even when asked to start from the second element
        let two = vec![wp("A", 0.0, 0.0), wp("B", 0.0, 5.0)];
        assert_eq!(optimize_order(&two, 1), two);
    }

    #[test]
    fn nearest_first_from_start() {
        let input = vec![wp("A", 0.0, 0.0), wp("C", 0.0, 3.0), wp("B", 0.0, 1.0)];
        assert_eq!(ids(&optimize_order(&input, 0)), vec!["A", "B", "C"]);
    }

    #[test]
    fn starts_from_given_index() {
        let input = vec![wp("A", 0.0, 0.0), wp("B", 0.0, 1.0), wp("C", 0.0, 3.0)];
        assert_eq!(ids(&optimize_order(&input, 2)), vec!["C", "B", "A"]);
    }

    #[test]
    fn out_of_range_start_is_clamped_to_last() {
        let input = vec![wp("A", 0.0, 0.0), wp("B", 0.0, 1.0), wp("C", 0.0, 3.0)];
        assert_eq!(ids(&optimize_order(&input, 99)), vec!["C", "B", "A"]);
    }

    #[test]
    fn ties_go_to_lowest_original_index() {
        // East and West are equidistant from the origin
        let input = vec![
            wp("origin", 0.0, 0.0),
            wp("west", 0.0, -1.0),
            wp("east", 0.0, 1.0),
        ];
        assert_eq!(
            ids(&optimize_order(&input, 0)),
            vec!["origin", "west", "east"]
        );
    }

    #[test]
    fn output_is_a_permutation_of_input() {
        let input = vec![
            wp("reykjavik", 64.1466, -21.9426),
            wp("vik", 63.4186, -19.0060),
            wp("geysir", 64.3104, -20.3024),
            wp("akureyri", 65.6885, -18.1262),
            wp("selfoss", 63.9331, -20.9971),
        ];
        let ordered = optimize_order(&input, 0);
        let mut out = ids(&ordered);
        let mut expected = ids(&input);
        out.sort();
        expected.sort();
        assert_eq!(out, expected);
    }

    #[test]
    fn zigzag_input_gets_shorter() {
        let input = vec![
            wp("0", 0.0, 0.0),
            wp("4", 0.0, 4.0),
            wp("1", 0.0, 1.0),
            wp("3", 0.0, 3.0),
            wp("2", 0.0, 2.0),
        ];
        let out = optimize_order(&input, 0);
        assert_eq!(ids(&out), vec!["0", "1", "2", "3", "4"]);

        let len = |w: &[Waypoint]| {
            path_length_km(&w.iter().map(|w| w.coordinates).collect::<Vec<_>>())
        };
        assert!(len(&out) < len(&input));
    }

    #[test]
    fn works_on_plain_coordinates() {
        let input = vec![
            Coordinates::new(0.0, 0.0).unwrap(),
            Coordinates::new(0.0, 3.0).unwrap(),
            Coordinates::new(0.0, 1.0).unwrap(),
        ];
        let out = optimize_order(&input, 0);
        assert_eq!(out[1].lng, 1.0);
        assert_eq!(out[2].lng, 3.0);
    }
}
