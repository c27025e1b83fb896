use std::sync::Arc;

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::Serialize;

use crate::database::Database;
use crate::entities;
use crate::error::{Error, Result};
use crate::forms::ArtistForm;
use crate::grouping::EntityRef;
use crate::schedule::{self, ShowEntry};
use crate::services::SearchResults;

pub struct ArtistService {
    db: Arc<Database>,
}

/// Artist detail view: full field set plus past/upcoming shows, each entry
/// carrying the hosting venue's display fields.
#[derive(Debug, Clone, Serialize)]
pub struct ArtistPage {
    pub id: i64,
    pub name: String,
    pub genres: Vec<String>,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub website_link: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
    pub image_link: Option<String>,
    pub past_shows: Vec<ShowEntry>,
    pub upcoming_shows: Vec<ShowEntry>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

impl ArtistService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub async fn get(&self, id: i64) -> Result<entities::artist::Model> {
        entities::artist::Entity::find_by_id(id)
            .one(&self.db.conn)
            .await?
            .ok_or(Error::NotFound {
                entity: "artist",
                id,
            })
    }

    /// Every artist as an id+name reference, id order.
    pub async fn list(&self) -> Result<Vec<EntityRef>> {
        let artists = entities::artist::Entity::find()
            .order_by_asc(entities::artist::Column::Id)
            .all(&self.db.conn)
            .await?;

        Ok(artists
            .into_iter()
            .map(|a| EntityRef {
                id: a.id,
                name: a.name,
            })
            .collect())
    }

    pub async fn search(&self, term: &str) -> Result<SearchResults> {
        let artists = entities::artist::Entity::find()
            .filter(entities::artist::Column::Name.contains(term))
            .order_by_asc(entities::artist::Column::Id)
            .all(&self.db.conn)
            .await?;

        let data: Vec<EntityRef> = artists
            .into_iter()
            .map(|a| EntityRef {
                id: a.id,
                name: a.name,
            })
            .collect();

        Ok(SearchResults {
            count: data.len(),
            data,
        })
    }

    pub async fn page(&self, id: i64, now: DateTime<Utc>) -> Result<ArtistPage> {
        let artist = self.get(id).await?;

        let rows = entities::show::Entity::find()
            .filter(entities::show::Column::ArtistId.eq(id))
            .order_by_asc(entities::show::Column::StartTime)
            .find_also_related(entities::venue::Entity)
            .all(&self.db.conn)
            .await?;

        let mut entries = Vec::new();
        for (show, venue) in rows {
            let venue = venue.ok_or(Error::NotFound {
                entity: "venue",
                id: show.venue_id,
            })?;
            entries.push(ShowEntry::new(
                venue.id,
                venue.name,
                venue.image_link,
                show.start_time,
            ));
        }

        let split = schedule::partition(entries, now);

        Ok(ArtistPage {
            id: artist.id,
            name: artist.name.clone(),
            genres: artist.genre_list(),
            city: artist.city,
            state: artist.state,
            phone: artist.phone,
            website_link: artist.website_link,
            facebook_link: artist.facebook_link,
            seeking_venue: artist.seeking_venue,
            seeking_description: artist.seeking_description,
            image_link: artist.image_link,
            past_shows_count: split.past_count(),
            upcoming_shows_count: split.upcoming_count(),
            past_shows: split.past,
            upcoming_shows: split.upcoming,
        })
    }

    pub async fn create(&self, form: ArtistForm) -> Result<i64> {
        let form = form.validated()?;
        let genres = form.genres_json();

        let model = self
            .db
            .conn
            .transaction::<_, entities::artist::Model, Error>(|txn| {
                Box::pin(async move {
                    let artist = entities::artist::ActiveModel {
                        name: Set(form.name),
                        city: Set(form.city),
                        state: Set(form.state),
                        phone: Set(form.phone),
                        genres: Set(genres),
                        image_link: Set(form.image_link),
                        facebook_link: Set(form.facebook_link),
                        website_link: Set(form.website_link),
                        seeking_venue: Set(form.seeking_venue),
                        seeking_description: Set(form.seeking_description),
                        ..Default::default()
                    };

                    Ok(artist.insert(txn).await?)
                })
            })
            .await
            .map_err(Error::from)?;

        tracing::info!(artist_id = model.id, name = %model.name, "artist created");
        Ok(model.id)
    }

    pub async fn update(&self, id: i64, form: ArtistForm) -> Result<()> {
        let form = form.validated()?;
        let genres = form.genres_json();
        let artist = self.get(id).await?;

        self.db
            .conn
            .transaction::<_, (), Error>(|txn| {
                Box::pin(async move {
                    let mut active: entities::artist::ActiveModel = artist.into();
                    active.name = Set(form.name);
                    active.city = Set(form.city);
                    active.state = Set(form.state);
                    active.phone = Set(form.phone);
                    active.genres = Set(genres);
                    active.image_link = Set(form.image_link);
                    active.facebook_link = Set(form.facebook_link);
                    active.website_link = Set(form.website_link);
                    active.seeking_venue = Set(form.seeking_venue);
                    active.seeking_description = Set(form.seeking_description);

                    active.update(txn).await?;
                    Ok(())
                })
            })
            .await
            .map_err(Error::from)?;

        tracing::info!(artist_id = id, "artist updated");
        Ok(())
    }

    /// Delete an artist and every show booked for them, as one unit. The
    /// shows go with the artist so no booking is left pointing at a missing
    /// performer.
    pub async fn delete(&self, id: i64) -> Result<()> {
        let artist = self.get(id).await?;

        self.db
            .conn
            .transaction::<_, (), Error>(|txn| {
                Box::pin(async move {
                    entities::show::Entity::delete_many()
                        .filter(entities::show::Column::ArtistId.eq(artist.id))
                        .exec(txn)
                        .await?;

                    entities::artist::Entity::delete_by_id(artist.id)
                        .exec(txn)
                        .await?;

                    Ok(())
                })
            })
            .await
            .map_err(Error::from)?;

        tracing::info!(artist_id = id, "artist deleted with its shows");
        Ok(())
    }
}
