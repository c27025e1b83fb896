use serde::Serialize;

use crate::entities::venue;

/// Bare id+name reference used by search results and area listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityRef {
    pub id: i64,
    pub name: String,
}

/// All venues sharing one (city, state) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueArea {
    pub city: String,
    pub state: String,
    pub venues: Vec<EntityRef>,
}

/// Group venues under their (city, state) pair, one area per distinct pair.
/// Area order is first-seen over the input; callers pass an id-ordered scan
/// so the sequence is deterministic.
pub fn group_by_locale(venues: &[venue::Model]) -> Vec<VenueArea> {
    let mut areas: Vec<VenueArea> = Vec::new();

    for venue in venues {
        let entry = EntityRef {
            id: venue.id,
            name: venue.name.clone(),
        };
        match areas
            .iter_mut()
            .find(|area| area.city == venue.city && area.state == venue.state)
        {
            Some(area) => area.venues.push(entry),
            None => areas.push(VenueArea {
                city: venue.city.clone(),
                state: venue.state.clone(),
                venues: vec![entry],
            }),
        }
    }

    areas
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn venue(id: i64, name: &str, city: &str, state: &str) -> venue::Model {
        let now = Utc::now();
        venue::Model {
            id,
            name: name.to_owned(),
            city: city.to_owned(),
            state: state.to_owned(),
            address: "1 Main St".to_owned(),
            phone: "555-0100".to_owned(),
            genres: r#"["Jazz"]"#.to_owned(),
            image_link: None,
            facebook_link: None,
            website_link: None,
            seeking_talent: false,
            seeking_description: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn empty_input_yields_no_areas() {
        assert!(group_by_locale(&[]).is_empty());
    }

    #[test]
    fn one_area_per_distinct_pair() {
        let venues = vec![
            venue(1, "The Fillmore", "San Francisco", "CA"),
            venue(2, "Bottom of the Hill", "San Francisco", "CA"),
            venue(3, "Red Rocks", "Morrison", "CO"),
        ];

        let areas = group_by_locale(&venues);
        assert_eq!(areas.len(), 2);
        assert_eq!(areas[0].city, "San Francisco");
        assert_eq!(
            areas[0]
                .venues
                .iter()
                .map(|v| v.id)
                .collect::<Vec<_>>(),
            vec![1, 2]
        );
        assert_eq!(areas[1].city, "Morrison");
        assert_eq!(areas[1].venues, vec![EntityRef {
            id: 3,
            name: "Red Rocks".to_owned()
        }]);
    }

    #[test]
    fn same_city_different_state_is_a_distinct_pair() {
        let venues = vec![
            venue(1, "The Mill", "Springfield", "IL"),
            venue(2, "The Granary", "Springfield", "MO"),
        ];

        let areas = group_by_locale(&venues);
        assert_eq!(areas.len(), 2);
    }

    #[test]
    fn union_of_areas_covers_every_venue_exactly_once() {
        let venues = vec![
            venue(1, "A", "X", "S1"),
            venue(2, "B", "Y", "S1"),
            venue(3, "C", "X", "S1"),
            venue(4, "D", "X", "S2"),
        ];

        let areas = group_by_locale(&venues);
        let mut seen: Vec<i64> = areas
            .iter()
            .flat_map(|a| a.venues.iter().map(|v| v.id))
            .collect();
        seen.sort_unstable();
        assert_eq!(seen, vec![1, 2, 3, 4]);

        for area in &areas {
            for v in &area.venues {
                let original = venues.iter().find(|m| m.id == v.id).unwrap();
                assert_eq!((original.city.as_str(), original.state.as_str()), (
                    area.city.as_str(),
                    area.state.as_str()
                ));
            }
        }
    }
}
