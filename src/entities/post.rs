use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub text: String,
    #[sea_orm(unique)]
    pub slug: String,

    /// May lie in the future; the post goes live once it passes.
    pub pub_date: DateTimeUtc,

    pub author_id: i64,
    pub location_id: Option<i64>,
    pub category_id: Option<i64>,

    pub is_published: bool,
    pub image: Option<String>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::AuthorId",
        to = "super::user::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::location::Entity",
        from = "Column::LocationId",
        to = "super::location::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Location,
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Category,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::location::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Location.def()
    }
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Entity {
    /// Posts a visitor may see at `now`: flagged published and no longer scheduled.
    ///
    /// `now` comes from the caller on every request. A scheduled post becomes
    /// visible without any write, so the predicate must never be cached on the row.
    pub fn find_published(now: DateTimeUtc) -> Select<Entity> {
        Self::find()
            .filter(Column::IsPublished.eq(true))
            .filter(Column::PubDate.lte(now))
    }
}

impl Model {
    pub fn is_published_now(&self, now: DateTimeUtc) -> bool {
        is_eligible(self.is_published, self.pub_date, now)
    }

    pub fn status(&self, now: DateTimeUtc) -> PostStatus {
        PostStatus::classify(self.is_published, self.pub_date, now)
    }
}

pub fn is_eligible(is_published: bool, pub_date: DateTimeUtc, now: DateTimeUtc) -> bool {
    is_published && pub_date <= now
}

/// Admin-facing publication state. Derived at read time, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Live,
    Scheduled,
    Draft,
}

impl PostStatus {
    pub fn classify(is_published: bool, pub_date: DateTimeUtc, now: DateTimeUtc) -> Self {
        if !is_published {
            PostStatus::Draft
        } else if is_eligible(is_published, pub_date, now) {
            PostStatus::Live
        } else {
            PostStatus::Scheduled
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PostStatus::Live => "Published",
            PostStatus::Scheduled => "Scheduled",
            PostStatus::Draft => "Draft",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            PostStatus::Live => "green",
            PostStatus::Scheduled => "orange",
            PostStatus::Draft => "red",
        }
    }
}
