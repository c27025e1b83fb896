use std::sync::Arc;

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::Serialize;

use crate::database::Database;
use crate::entities;
use crate::error::{Error, Result};
use crate::forms::ShowForm;
use crate::schedule;

pub struct ShowService {
    db: Arc<Database>,
}

/// One row of the all-shows listing, joined with both parents for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShowListing {
    pub venue_id: i64,
    pub venue_name: String,
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
    pub start_time_display: String,
}

impl ShowService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub async fn list_for_venue(&self, venue_id: i64) -> Result<Vec<entities::show::Model>> {
        Ok(entities::show::Entity::find()
            .filter(entities::show::Column::VenueId.eq(venue_id))
            .order_by_asc(entities::show::Column::StartTime)
            .all(&self.db.conn)
            .await?)
    }

    pub async fn list_for_artist(&self, artist_id: i64) -> Result<Vec<entities::show::Model>> {
        Ok(entities::show::Entity::find()
            .filter(entities::show::Column::ArtistId.eq(artist_id))
            .order_by_asc(entities::show::Column::StartTime)
            .all(&self.db.conn)
            .await?)
    }

    /// Every show joined with both parents, start-time order.
    pub async fn list_all(&self) -> Result<Vec<ShowListing>> {
        let rows = entities::show::Entity::find()
            .order_by_asc(entities::show::Column::StartTime)
            .find_also_related(entities::venue::Entity)
            .all(&self.db.conn)
            .await?;

        let mut listings = Vec::new();
        for (show, venue) in rows {
            let venue = venue.ok_or(Error::NotFound {
                entity: "venue",
                id: show.venue_id,
            })?;
            let artist = entities::artist::Entity::find_by_id(show.artist_id)
                .one(&self.db.conn)
                .await?
                .ok_or(Error::NotFound {
                    entity: "artist",
                    id: show.artist_id,
                })?;

            listings.push(ShowListing {
                venue_id: venue.id,
                venue_name: venue.name,
                artist_id: artist.id,
                artist_name: artist.name,
                artist_image_link: artist.image_link,
                start_time: show.start_time,
                start_time_display: schedule::format_start_time(&show.start_time),
            });
        }

        Ok(listings)
    }

    /// Book an artist at a venue. Both parents must exist; the check and the
    /// insert run in one transaction so neither reference can dangle.
    pub async fn create(&self, form: ShowForm) -> Result<i64> {
        let model = self
            .db
            .conn
            .transaction::<_, entities::show::Model, Error>(|txn| {
                Box::pin(async move {
                    entities::artist::Entity::find_by_id(form.artist_id)
                        .one(txn)
                        .await?
                        .ok_or(Error::NotFound {
                            entity: "artist",
                            id: form.artist_id,
                        })?;
                    entities::venue::Entity::find_by_id(form.venue_id)
                        .one(txn)
                        .await?
                        .ok_or(Error::NotFound {
                            entity: "venue",
                            id: form.venue_id,
                        })?;

                    let show = entities::show::ActiveModel {
                        artist_id: Set(form.artist_id),
                        venue_id: Set(form.venue_id),
                        start_time: Set(form.start_time),
                        ..Default::default()
                    };

                    Ok(show.insert(txn).await?)
                })
            })
            .await
            .map_err(Error::from)?;

        tracing::info!(
            show_id = model.id,
            artist_id = model.artist_id,
            venue_id = model.venue_id,
            "show created"
        );
        Ok(model.id)
    }
}
