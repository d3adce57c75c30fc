//! Course purchase database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{CoursePurchase, PurchaseStatus};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "course_purchases")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub course_id: Uuid,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub amount: Decimal,
    pub status: String,
    /// Provider checkout session id
    pub payment_id: String,
    pub session_expiry: DateTimeUtc,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::course::Entity",
        from = "Column::CourseId",
        to = "super::course::Column::Id"
    )]
    Course,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for CoursePurchase {
    fn from(model: Model) -> Self {
        CoursePurchase {
            id: model.id,
            user_id: model.user_id,
            course_id: model.course_id,
            amount: model.amount,
            status: PurchaseStatus::from(model.status.as_str()),
            payment_id: model.payment_id,
            session_expiry: model.session_expiry,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
