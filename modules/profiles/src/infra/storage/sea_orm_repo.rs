//! SeaORM-backed repository: one JSON document per profile.

use anyhow::Context;
use async_trait::async_trait;
use sea_orm::{
    sea_query::OnConflict, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::contract::model::UserProfile;
use crate::domain::repo::ProfilesRepository;
use crate::infra::storage::document::{email_key, ProfileDocument};
use crate::infra::storage::entity::{ActiveModel, Column, Entity, Model};

pub struct SeaOrmProfilesRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    conn: C,
}

impl<C> SeaOrmProfilesRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    pub fn new(conn: C) -> Self {
        Self { conn }
    }
}

fn decode(row: Model) -> anyhow::Result<UserProfile> {
    let doc: ProfileDocument = serde_json::from_value(row.document)
        .with_context(|| format!("corrupt profile document for {}", row.owner_id))?;
    Ok(doc.into())
}

#[async_trait]
impl<C> ProfilesRepository for SeaOrmProfilesRepository<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn find(&self, id: &str) -> anyhow::Result<Option<UserProfile>> {
        let row = Entity::find_by_id(id.to_string())
            .one(&self.conn)
            .await
            .context("find profile failed")?;
        row.map(decode).transpose()
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<UserProfile>> {
        let row = Entity::find()
            .filter(Column::EmailKey.eq(email_key(email)))
            .order_by_asc(Column::CreatedAt)
            .one(&self.conn)
            .await
            .context("find profile by email failed")?;
        row.map(decode).transpose()
    }

    async fn upsert(&self, profile: UserProfile) -> anyhow::Result<()> {
        let owner_id = profile.id.clone();
        let key = email_key(&profile.email);
        let created_at = profile.created_at;
        let updated_at = profile.updated_at;
        let document = serde_json::to_value(ProfileDocument::from(profile))
            .context("encode profile document")?;

        let am = ActiveModel {
            owner_id: Set(owner_id),
            email_key: Set(key),
            document: Set(document),
            created_at: Set(created_at),
            updated_at: Set(updated_at),
        };
        Entity::insert(am)
            .on_conflict(
                OnConflict::column(Column::OwnerId)
                    .update_columns([Column::EmailKey, Column::Document, Column::UpdatedAt])
                    .to_owned(),
            )
            .exec(&self.conn)
            .await
            .context("upsert profile failed")?;
        Ok(())
    }

    async fn list_all(&self) -> anyhow::Result<Vec<UserProfile>> {
        let rows = Entity::find()
            .order_by_asc(Column::CreatedAt)
            .order_by_asc(Column::OwnerId)
            .all(&self.conn)
            .await
            .context("list profiles failed")?;
        rows.into_iter().map(decode).collect()
    }
}
