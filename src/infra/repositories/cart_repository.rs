//! Cart repository implementation.
//!
//! Cart mutation rides on the store's atomic upsert primitives: the cart
//! row and each cart item are inserted with ON CONFLICT DO NOTHING, so
//! concurrent adds for the same (user, course) converge without any
//! application-level locking or read-modify-write.

use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use super::entities::{
    cart::{self, Entity as CartEntity},
    cart_item::{self, Entity as CartItemEntity},
    course::Entity as CourseEntity,
};
use crate::domain::{CartLine, Course};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Cart repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CartRepository: Send + Sync {
    /// Resolved cart lines for a user, oldest first. An absent cart
    /// resolves to an empty list, not an error.
    async fn lines(&self, user_id: Uuid) -> AppResult<Vec<CartLine>>;

    /// Set-insert a course into the user's cart, creating the cart on
    /// first use. Duplicate adds are a no-op.
    async fn add_item(&self, user_id: Uuid, course_id: Uuid) -> AppResult<()>;

    /// Pull a course from the user's cart. Removing a non-present item
    /// (or having no cart at all) is a no-op.
    async fn remove_item(&self, user_id: Uuid, course_id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of CartRepository
pub struct CartStore {
    db: DatabaseConnection,
}

impl CartStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_cart(&self, user_id: Uuid) -> AppResult<Option<cart::Model>> {
        CartEntity::find()
            .filter(cart::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(AppError::from)
    }
}

#[async_trait]
impl CartRepository for CartStore {
    async fn lines(&self, user_id: Uuid) -> AppResult<Vec<CartLine>> {
        let Some(cart) = self.find_cart(user_id).await? else {
            return Ok(Vec::new());
        };

        let rows = CartItemEntity::find()
            .filter(cart_item::Column::CartId.eq(cart.id))
            .find_also_related(CourseEntity)
            .order_by_asc(cart_item::Column::AddedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(rows
            .into_iter()
            .map(|(item, course)| CartLine {
                course_id: item.course_id,
                added_at: item.added_at,
                course: course.map(Course::from),
            })
            .collect())
    }

    async fn add_item(&self, user_id: Uuid, course_id: Uuid) -> AppResult<()> {
        let now = chrono::Utc::now();

        // Lazily create the cart row; the unique user_id constraint makes
        // this a single atomic insert-if-absent.
        let cart_model = cart::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            created_at: Set(now),
        };
        CartEntity::insert(cart_model)
            .on_conflict(
                OnConflict::column(cart::Column::UserId)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(AppError::from)?;

        let cart = self
            .find_cart(user_id)
            .await?
            .ok_or_else(|| AppError::internal("cart upsert did not produce a row"))?;

        // Set semantics: the composite (cart_id, course_id) key turns a
        // duplicate add into a no-op inside one database call.
        let item = cart_item::ActiveModel {
            cart_id: Set(cart.id),
            course_id: Set(course_id),
            added_at: Set(now),
        };
        CartItemEntity::insert(item)
            .on_conflict(
                OnConflict::columns([cart_item::Column::CartId, cart_item::Column::CourseId])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(())
    }

    async fn remove_item(&self, user_id: Uuid, course_id: Uuid) -> AppResult<()> {
        let Some(cart) = self.find_cart(user_id).await? else {
            return Ok(());
        };

        CartItemEntity::delete_many()
            .filter(cart_item::Column::CartId.eq(cart.id))
            .filter(cart_item::Column::CourseId.eq(course_id))
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(())
    }
}
