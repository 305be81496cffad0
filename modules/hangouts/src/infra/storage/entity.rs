//! Tables: `suggestions` holds the document, `suggestion_members` indexes
//! participants and the creator for membership queries.

pub mod suggestion {
    use chrono::{DateTime, Utc};
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "suggestions")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub created_by: String,
        pub suggested_time: DateTime<Utc>,
        pub document: Json,
        pub created_at: DateTime<Utc>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(has_many = "super::member::Entity")]
        Members,
    }

    impl Related<super::member::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Members.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

pub mod member {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "suggestion_members")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub suggestion_id: Uuid,
        #[sea_orm(primary_key, auto_increment = false)]
        pub user_id: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::suggestion::Entity",
            from = "Column::SuggestionId",
            to = "super::suggestion::Column::Id",
            on_delete = "Cascade"
        )]
        Suggestion,
    }

    impl Related<super::suggestion::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Suggestion.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}
