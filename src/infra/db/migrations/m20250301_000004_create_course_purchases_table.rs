//! Migration: Create the course_purchases table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CoursePurchases::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CoursePurchases::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CoursePurchases::UserId).uuid().not_null())
                    .col(ColumnDef::new(CoursePurchases::CourseId).uuid().not_null())
                    .col(
                        ColumnDef::new(CoursePurchases::Amount)
                            .decimal_len(10, 2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(CoursePurchases::Status).string().not_null())
                    .col(
                        ColumnDef::new(CoursePurchases::PaymentId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CoursePurchases::SessionExpiry)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CoursePurchases::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CoursePurchases::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_course_purchases_user")
                            .from(CoursePurchases::Table, CoursePurchases::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_course_purchases_course")
                            .from(CoursePurchases::Table, CoursePurchases::CourseId)
                            .to(Courses::Table, Courses::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Purchase-exclusivity checks and the reaper both filter on these
        manager
            .create_index(
                Index::create()
                    .name("idx_course_purchases_user_course_status")
                    .table(CoursePurchases::Table)
                    .col(CoursePurchases::UserId)
                    .col(CoursePurchases::CourseId)
                    .col(CoursePurchases::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_course_purchases_status_expiry")
                    .table(CoursePurchases::Table)
                    .col(CoursePurchases::Status)
                    .col(CoursePurchases::SessionExpiry)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_course_purchases_status_expiry")
                    .table(CoursePurchases::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_course_purchases_user_course_status")
                    .table(CoursePurchases::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(CoursePurchases::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum CoursePurchases {
    Table,
    Id,
    UserId,
    CourseId,
    Amount,
    Status,
    PaymentId,
    SessionExpiry,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}

#[derive(Iden)]
enum Courses {
    Table,
    Id,
}
