use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create venues table
        manager
            .create_table(
                Table::create()
                    .table("venues")
                    .if_not_exists()
                    .col(
                        ColumnDef::new("id")
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new("name").string().not_null())
                    .col(ColumnDef::new("city").string().not_null())
                    .col(ColumnDef::new("state").string().not_null())
                    .col(ColumnDef::new("address").string().not_null())
                    .col(ColumnDef::new("phone").string().not_null())
                    .col(ColumnDef::new("genres").string().not_null())
                    .col(ColumnDef::new("image_link").string())
                    .col(ColumnDef::new("facebook_link").string())
                    .col(ColumnDef::new("website_link").string())
                    .col(
                        ColumnDef::new("seeking_talent")
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new("seeking_description").string())
                    .col(ColumnDef::new("created_at").timestamp().not_null())
                    .col(ColumnDef::new("updated_at").timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        // Create artists table
        manager
            .create_table(
                Table::create()
                    .table("artists")
                    .if_not_exists()
                    .col(
                        ColumnDef::new("id")
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new("name").string().not_null())
                    .col(ColumnDef::new("city").string().not_null())
                    .col(ColumnDef::new("state").string().not_null())
                    .col(ColumnDef::new("phone").string().not_null())
                    .col(ColumnDef::new("genres").string().not_null())
                    .col(ColumnDef::new("image_link").string())
                    .col(ColumnDef::new("facebook_link").string())
                    .col(ColumnDef::new("website_link").string())
                    .col(
                        ColumnDef::new("seeking_venue")
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new("seeking_description").string())
                    .col(ColumnDef::new("created_at").timestamp().not_null())
                    .col(ColumnDef::new("updated_at").timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        // Create shows table
        // No ON DELETE CASCADE: dependent rows are removed explicitly by the
        // delete operations, inside the same transaction.
        manager
            .create_table(
                Table::create()
                    .table("shows")
                    .if_not_exists()
                    .col(
                        ColumnDef::new("id")
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new("artist_id").integer().not_null())
                    .col(ColumnDef::new("venue_id").integer().not_null())
                    .col(ColumnDef::new("start_time").timestamp().not_null())
                    .col(ColumnDef::new("created_at").timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_shows_artist_id")
                            .from("shows", "artist_id")
                            .to("artists", "id"),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_shows_venue_id")
                            .from("shows", "venue_id")
                            .to("venues", "id"),
                    )
                    .to_owned(),
            )
            .await?;

        // Create indexes for the show join columns
        manager
            .create_index(
                Index::create()
                    .name("idx_shows_venue_id")
                    .table("shows")
                    .col("venue_id")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_shows_artist_id")
                    .table("shows")
                    .col("artist_id")
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop tables in reverse order
        manager
            .drop_table(Table::drop().table("shows").to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table("artists").to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table("venues").to_owned())
            .await?;

        Ok(())
    }
}
