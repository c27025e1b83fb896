use std::sync::Arc;

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::Serialize;

use crate::database::Database;
use crate::entities;
use crate::error::{Error, Result};
use crate::forms::VenueForm;
use crate::grouping::{self, EntityRef, VenueArea};
use crate::schedule::{self, ShowEntry};
use crate::services::SearchResults;

pub struct VenueService {
    db: Arc<Database>,
}

/// Venue detail view: the full field set plus its shows split into past and
/// upcoming, each entry carrying the booked artist's display fields.
#[derive(Debug, Clone, Serialize)]
pub struct VenuePage {
    pub id: i64,
    pub name: String,
    pub genres: Vec<String>,
    pub address: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub website_link: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
    pub image_link: Option<String>,
    pub past_shows: Vec<ShowEntry>,
    pub upcoming_shows: Vec<ShowEntry>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

impl VenueService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub async fn get(&self, id: i64) -> Result<entities::venue::Model> {
        entities::venue::Entity::find_by_id(id)
            .one(&self.db.conn)
            .await?
            .ok_or(Error::NotFound {
                entity: "venue",
                id,
            })
    }

    /// Case-insensitive substring match over venue names. No matches is an
    /// empty result, not an error.
    pub async fn search(&self, term: &str) -> Result<SearchResults> {
        let venues = entities::venue::Entity::find()
            .filter(entities::venue::Column::Name.contains(term))
            .order_by_asc(entities::venue::Column::Id)
            .all(&self.db.conn)
            .await?;

        let data: Vec<EntityRef> = venues
            .into_iter()
            .map(|v| EntityRef {
                id: v.id,
                name: v.name,
            })
            .collect();

        Ok(SearchResults {
            count: data.len(),
            data,
        })
    }

    /// Venues grouped under their (city, state) pair for the list view.
    pub async fn list_areas(&self) -> Result<Vec<VenueArea>> {
        let venues = entities::venue::Entity::find()
            .order_by_asc(entities::venue::Column::Id)
            .all(&self.db.conn)
            .await?;

        Ok(grouping::group_by_locale(&venues))
    }

    pub async fn page(&self, id: i64, now: DateTime<Utc>) -> Result<VenuePage> {
        let venue = self.get(id).await?;

        let rows = entities::show::Entity::find()
            .filter(entities::show::Column::VenueId.eq(id))
            .order_by_asc(entities::show::Column::StartTime)
            .find_also_related(entities::artist::Entity)
            .all(&self.db.conn)
            .await?;

        let mut entries = Vec::new();
        for (show, artist) in rows {
            let artist = artist.ok_or(Error::NotFound {
                entity: "artist",
                id: show.artist_id,
            })?;
            entries.push(ShowEntry::new(
                artist.id,
                artist.name,
                artist.image_link,
                show.start_time,
            ));
        }

        let split = schedule::partition(entries, now);

        Ok(VenuePage {
            id: venue.id,
            name: venue.name.clone(),
            genres: venue.genre_list(),
            address: venue.address,
            city: venue.city,
            state: venue.state,
            phone: venue.phone,
            website_link: venue.website_link,
            facebook_link: venue.facebook_link,
            seeking_talent: venue.seeking_talent,
            seeking_description: venue.seeking_description,
            image_link: venue.image_link,
            past_shows_count: split.past_count(),
            upcoming_shows_count: split.upcoming_count(),
            past_shows: split.past,
            upcoming_shows: split.upcoming,
        })
    }

    pub async fn create(&self, form: VenueForm) -> Result<i64> {
        let form = form.validated()?;
        let genres = form.genres_json();

        let model = self
            .db
            .conn
            .transaction::<_, entities::venue::Model, Error>(|txn| {
                Box::pin(async move {
                    let venue = entities::venue::ActiveModel {
                        name: Set(form.name),
                        city: Set(form.city),
                        state: Set(form.state),
                        address: Set(form.address),
                        phone: Set(form.phone),
                        genres: Set(genres),
                        image_link: Set(form.image_link),
                        facebook_link: Set(form.facebook_link),
                        website_link: Set(form.website_link),
                        seeking_talent: Set(form.seeking_talent),
                        seeking_description: Set(form.seeking_description),
                        ..Default::default()
                    };

                    Ok(venue.insert(txn).await?)
                })
            })
            .await
            .map_err(Error::from)?;

        tracing::info!(venue_id = model.id, name = %model.name, "venue created");
        Ok(model.id)
    }

    pub async fn update(&self, id: i64, form: VenueForm) -> Result<()> {
        let form = form.validated()?;
        let genres = form.genres_json();
        let venue = self.get(id).await?;

        self.db
            .conn
            .transaction::<_, (), Error>(|txn| {
                Box::pin(async move {
                    let mut active: entities::venue::ActiveModel = venue.into();
                    active.name = Set(form.name);
                    active.city = Set(form.city);
                    active.state = Set(form.state);
                    active.address = Set(form.address);
                    active.phone = Set(form.phone);
                    active.genres = Set(genres);
                    active.image_link = Set(form.image_link);
                    active.facebook_link = Set(form.facebook_link);
                    active.website_link = Set(form.website_link);
                    active.seeking_talent = Set(form.seeking_talent);
                    active.seeking_description = Set(form.seeking_description);

                    active.update(txn).await?;
                    Ok(())
                })
            })
            .await
            .map_err(Error::from)?;

        tracing::info!(venue_id = id, "venue updated");
        Ok(())
    }

    /// Delete a venue and every show booked at it, as one unit.
    pub async fn delete(&self, id: i64) -> Result<()> {
        let venue = self.get(id).await?;

        self.db
            .conn
            .transaction::<_, (), Error>(|txn| {
                Box::pin(async move {
                    entities::show::Entity::delete_many()
                        .filter(entities::show::Column::VenueId.eq(venue.id))
                        .exec(txn)
                        .await?;

                    entities::venue::Entity::delete_by_id(venue.id)
                        .exec(txn)
                        .await?;

                    Ok(())
                })
            })
            .await
            .map_err(Error::from)?;

        tracing::info!(venue_id = id, "venue deleted with its shows");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use sea_orm::PaginatorTrait;

    use super::*;
    use crate::forms::{ArtistForm, ShowForm};
    use crate::services::artist::ArtistService;
    use crate::services::show::ShowService;
    use crate::test_utils::test_db;

    fn venue_form(name: &str, city: &str, state: &str) -> VenueForm {
        VenueForm {
            name: name.to_owned(),
            city: city.to_owned(),
            state: state.to_owned(),
            address: "123 Main St".to_owned(),
            phone: "415-555-0100".to_owned(),
            genres: vec!["Jazz".to_owned()],
            image_link: Some("https://example.com/venue.png".to_owned()),
            facebook_link: None,
            website_link: None,
            seeking_talent: true,
            seeking_description: Some("Always booking".to_owned()),
        }
    }

    fn artist_form(name: &str) -> ArtistForm {
        ArtistForm {
            name: name.to_owned(),
            city: "Oakland".to_owned(),
            state: "CA".to_owned(),
            phone: "510-555-0142".to_owned(),
            genres: vec!["Soul".to_owned()],
            image_link: Some("https://example.com/artist.png".to_owned()),
            facebook_link: None,
            website_link: None,
            seeking_venue: false,
            seeking_description: None,
        }
    }

    #[tokio::test]
    async fn create_then_get_round_trips_normalized_fields() {
        let db = test_db().await;
        let venues = VenueService::new(db);

        let mut form = venue_form("  Downtown Arena ", "San Francisco", "CA");
        form.genres = vec![" Jazz ".to_owned(), String::new(), "Blues".to_owned()];
        let id = venues.create(form).await.unwrap();

        let venue = venues.get(id).await.unwrap();
        assert_eq!(venue.name, "Downtown Arena");
        assert_eq!(venue.city, "San Francisco");
        assert_eq!(venue.genre_list(), vec!["Jazz", "Blues"]);
        assert!(venue.seeking_talent);
    }

    #[tokio::test]
    async fn get_is_idempotent() {
        let db = test_db().await;
        let venues = VenueService::new(db);

        let id = venues
            .create(venue_form("The Fillmore", "San Francisco", "CA"))
            .await
            .unwrap();

        let first = venues.get(id).await.unwrap();
        let second = venues.get(id).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn get_missing_venue_is_not_found() {
        let db = test_db().await;
        let venues = VenueService::new(db);

        let err = venues.get(42).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn search_matches_substring_and_counts() {
        let db = test_db().await;
        let venues = VenueService::new(db);

        let arena_id = venues
            .create(venue_form("Downtown Arena", "San Francisco", "CA"))
            .await
            .unwrap();
        venues
            .create(venue_form("Cafe", "San Francisco", "CA"))
            .await
            .unwrap();

        let results = venues.search("arena").await.unwrap();
        assert_eq!(results.count, 1);
        assert_eq!(results.data, vec![EntityRef {
            id: arena_id,
            name: "Downtown Arena".to_owned()
        }]);

        let empty = venues.search("stadium").await.unwrap();
        assert_eq!(empty.count, 0);
        assert!(empty.data.is_empty());
    }

    #[tokio::test]
    async fn list_areas_groups_by_city_and_state() {
        let db = test_db().await;
        let venues = VenueService::new(db);

        venues
            .create(venue_form("The Fillmore", "San Francisco", "CA"))
            .await
            .unwrap();
        venues
            .create(venue_form("Red Rocks", "Morrison", "CO"))
            .await
            .unwrap();
        venues
            .create(venue_form("Bottom of the Hill", "San Francisco", "CA"))
            .await
            .unwrap();

        let areas = venues.list_areas().await.unwrap();
        assert_eq!(areas.len(), 2);
        assert_eq!(areas[0].city, "San Francisco");
        assert_eq!(areas[0].venues.len(), 2);
        assert_eq!(areas[1].state, "CO");
    }

    #[tokio::test]
    async fn update_rewrites_fields() {
        let db = test_db().await;
        let venues = VenueService::new(db);

        let id = venues
            .create(venue_form("Old Name", "Portland", "OR"))
            .await
            .unwrap();

        let mut form = venue_form("New Name", "Portland", "OR");
        form.seeking_talent = false;
        form.genres = vec!["Punk".to_owned()];
        venues.update(id, form).await.unwrap();

        let venue = venues.get(id).await.unwrap();
        assert_eq!(venue.name, "New Name");
        assert_eq!(venue.genre_list(), vec!["Punk"]);
        assert!(!venue.seeking_talent);
    }

    #[tokio::test]
    async fn update_missing_venue_is_not_found() {
        let db = test_db().await;
        let venues = VenueService::new(db);

        let err = venues
            .update(7, venue_form("Nowhere", "Salem", "OR"))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn invalid_form_is_rejected_before_any_write() {
        let db = test_db().await;
        let venues = VenueService::new(db.clone());

        let before = entities::venue::Entity::find()
            .count(&db.conn)
            .await
            .unwrap();

        let mut form = venue_form("", "San Francisco", "CA");
        form.genres = vec![];
        let err = venues.create(form).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));

        let after = entities::venue::Entity::find()
            .count(&db.conn)
            .await
            .unwrap();
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn delete_removes_venue_and_its_shows() {
        let db = test_db().await;
        let venues = VenueService::new(db.clone());
        let artists = ArtistService::new(db.clone());
        let shows = ShowService::new(db.clone());

        let venue_id = venues
            .create(venue_form("The Basement", "Nashville", "TN"))
            .await
            .unwrap();
        let artist_id = artists.create(artist_form("Nina")).await.unwrap();
        shows
            .create(ShowForm {
                artist_id,
                venue_id,
                start_time: Utc::now() + Duration::days(3),
            })
            .await
            .unwrap();

        venues.delete(venue_id).await.unwrap();

        assert!(venues.get(venue_id).await.unwrap_err().is_not_found());
        assert!(shows.list_for_venue(venue_id).await.unwrap().is_empty());
        // The artist survives its bookings
        assert_eq!(artists.get(artist_id).await.unwrap().id, artist_id);
    }

    #[tokio::test]
    async fn page_partitions_shows_around_now() {
        let db = test_db().await;
        let venues = VenueService::new(db.clone());
        let artists = ArtistService::new(db.clone());
        let shows = ShowService::new(db.clone());

        let venue_id = venues
            .create(venue_form("The Fillmore", "San Francisco", "CA"))
            .await
            .unwrap();
        let artist_id = artists.create(artist_form("Nina")).await.unwrap();

        let now = Utc::now();
        shows
            .create(ShowForm {
                artist_id,
                venue_id,
                start_time: now - Duration::days(10),
            })
            .await
            .unwrap();
        shows
            .create(ShowForm {
                artist_id,
                venue_id,
                start_time: now + Duration::days(10),
            })
            .await
            .unwrap();

        let page = venues.page(venue_id, now).await.unwrap();
        assert_eq!(page.name, "The Fillmore");
        assert_eq!(page.genres, vec!["Jazz"]);
        assert_eq!(page.past_shows_count, 1);
        assert_eq!(page.upcoming_shows_count, 1);
        assert_eq!(page.past_shows[0].name, "Nina");
        assert_eq!(page.upcoming_shows[0].id, artist_id);
    }
}
