//! SeaORM-backed repository: one JSON document per suggestion plus a
//! membership index.

use anyhow::Context;
use async_trait::async_trait;
use sea_orm::{
    sea_query::OnConflict, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, QueryTrait, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::contract::model::{HangoutSuggestion, CREATED_BY_AI};
use crate::domain::repo::SuggestionsRepository;
use crate::infra::storage::document::SuggestionDocument;
use crate::infra::storage::entity::{member, suggestion};

pub struct SeaOrmSuggestionsRepository {
    db: DatabaseConnection,
}

impl SeaOrmSuggestionsRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn decode(row: suggestion::Model) -> anyhow::Result<HangoutSuggestion> {
    let doc: SuggestionDocument = serde_json::from_value(row.document)
        .with_context(|| format!("corrupt suggestion document {}", row.id))?;
    Ok(doc.into())
}

/// Users a suggestion should be listed for: participants and a human creator.
fn members_of(s: &HangoutSuggestion) -> Vec<String> {
    let mut members: Vec<String> = Vec::with_capacity(s.participants.len() + 1);
    let creator = (s.created_by != CREATED_BY_AI).then(|| s.created_by.clone());
    for user in s.participants.iter().cloned().chain(creator) {
        if !members.contains(&user) {
            members.push(user);
        }
    }
    members
}

#[async_trait]
impl SuggestionsRepository for SeaOrmSuggestionsRepository {
    async fn find(&self, id: Uuid) -> anyhow::Result<Option<HangoutSuggestion>> {
        let row = suggestion::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find suggestion failed")?;
        row.map(decode).transpose()
    }

    async fn upsert(&self, s: HangoutSuggestion) -> anyhow::Result<()> {
        let id = s.id;
        let members = members_of(&s);
        let row = suggestion::ActiveModel {
            id: Set(id),
            created_by: Set(s.created_by.clone()),
            suggested_time: Set(s.suggested_time),
            created_at: Set(s.created_at),
            document: Set(serde_json::to_value(SuggestionDocument::from(s))
                .context("encode suggestion document")?),
        };

        let txn = self.db.begin().await.context("begin transaction")?;
        suggestion::Entity::insert(row)
            .on_conflict(
                OnConflict::column(suggestion::Column::Id)
                    .update_columns([
                        suggestion::Column::CreatedBy,
                        suggestion::Column::SuggestedTime,
                        suggestion::Column::Document,
                    ])
                    .to_owned(),
            )
            .exec(&txn)
            .await
            .context("upsert suggestion failed")?;

        member::Entity::delete_many()
            .filter(member::Column::SuggestionId.eq(id))
            .exec(&txn)
            .await
            .context("clear suggestion members failed")?;
        if !members.is_empty() {
            member::Entity::insert_many(members.into_iter().map(|user_id| member::ActiveModel {
                suggestion_id: Set(id),
                user_id: Set(user_id),
            }))
            .exec(&txn)
            .await
            .context("insert suggestion members failed")?;
        }

        txn.commit().await.context("commit suggestion upsert")?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let txn = self.db.begin().await.context("begin transaction")?;
        member::Entity::delete_many()
            .filter(member::Column::SuggestionId.eq(id))
            .exec(&txn)
            .await
            .context("delete suggestion members failed")?;
        let res = suggestion::Entity::delete_by_id(id)
            .exec(&txn)
            .await
            .context("delete suggestion failed")?;
        txn.commit().await.context("commit suggestion delete")?;
        Ok(res.rows_affected > 0)
    }

    async fn list_for_member(&self, user_id: &str) -> anyhow::Result<Vec<HangoutSuggestion>> {
        let member_of = member::Entity::find()
            .select_only()
            .column(member::Column::SuggestionId)
            .filter(member::Column::UserId.eq(user_id))
            .into_query();

        let rows = suggestion::Entity::find()
            .filter(suggestion::Column::Id.in_subquery(member_of))
            .order_by_asc(suggestion::Column::SuggestedTime)
            .order_by_asc(suggestion::Column::Id)
            .all(&self.db)
            .await
            .context("list suggestions for member failed")?;
        rows.into_iter().map(decode).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample(created_by: &str, participants: &[&str]) -> HangoutSuggestion {
        HangoutSuggestion {
            id: Uuid::new_v4(),
            title: "Swimming".into(),
            description: "Swim laps or play water games".into(),
            location: "Pool".into(),
            suggested_time: Utc::now(),
            duration: 90,
            activity: "Swimming".into(),
            participants: participants.iter().map(|p| p.to_string()).collect(),
            status: crate::contract::model::SuggestionStatus::Pending,
            responses: Default::default(),
            created_by: created_by.into(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn members_cover_participants_and_human_creator() {
        assert_eq!(members_of(&sample("u3", &["u1", "u2"])), vec!["u1", "u2", "u3"]);
        assert_eq!(members_of(&sample("u1", &["u1", "u2"])), vec!["u1", "u2"]);
        assert_eq!(members_of(&sample(CREATED_BY_AI, &["u1"])), vec!["u1"]);
    }

    async fn repo() -> SeaOrmSuggestionsRepository {
        use sea_orm_migration::MigratorTrait;

        let db = sea_orm::Database::connect("sqlite::memory:").await.unwrap();
        crate::infra::storage::migrations::Migrator::up(&db, None)
            .await
            .unwrap();
        SeaOrmSuggestionsRepository::new(db)
    }

    async fn member_rows(repo: &SeaOrmSuggestionsRepository) -> u64 {
        use sea_orm::PaginatorTrait;
        member::Entity::find().count(&repo.db).await.unwrap()
    }

    #[tokio::test]
    async fn upsert_rewrites_membership_index() {
        let repo = repo().await;
        let mut s = sample(CREATED_BY_AI, &["u1", "u2"]);
        repo.upsert(s.clone()).await.unwrap();
        assert_eq!(member_rows(&repo).await, 2);

        s.participants = vec!["u1".into(), "u3".into()];
        repo.upsert(s.clone()).await.unwrap();
        assert_eq!(member_rows(&repo).await, 2);
        assert!(repo.list_for_member("u2").await.unwrap().is_empty());
        assert_eq!(repo.list_for_member("u3").await.unwrap(), vec![s.clone()]);

        assert!(repo.delete(s.id).await.unwrap());
        assert_eq!(member_rows(&repo).await, 0);
        assert!(!repo.delete(s.id).await.unwrap());
    }
}
