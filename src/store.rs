use sea_orm::{
    ActiveValue::NotSet, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set, sea_query::Expr,
};

use crate::{entities::movie, models::Movie};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("no movie with id {0}")]
    NotFound(i64),

    #[error("movie {id} has undecodable data: {reason}")]
    Decode { id: i64, reason: String },

    #[error(transparent)]
    Db(#[from] DbErr),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Data access for the `movies` table. Cloning shares the underlying pool.
#[derive(Clone)]
pub struct MovieStore {
    db: DatabaseConnection,
}

impl MovieStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list_all(&self) -> StoreResult<Vec<Movie>> {
        let rows = movie::Entity::find().order_by_asc(movie::Column::Id).all(&self.db).await?;
        rows.into_iter().map(Movie::try_from).collect()
    }

    pub async fn get_by_id(&self, id: i64) -> StoreResult<Movie> {
        let row = movie::Entity::find_by_id(id).one(&self.db).await?;
        let Some(row) = row else {
            return Err(StoreError::NotFound(id));
        };
        Movie::try_from(row)
    }

    /// Inserts `m` and returns the identifier assigned by the database.
    ///
    /// The incoming `id`, `created_at` and `updated_at` are ignored: both
    /// timestamps are stamped with the current time.
    pub async fn create(&self, m: &Movie) -> StoreResult<i64> {
        let now = now_sec();
        let model = movie::ActiveModel {
            id: NotSet,
            title: Set(m.title.clone()),
            release_date: Set(m.release_date.to_string()),
            runtime: Set(m.runtime),
            mpaa_rating: Set(m.mpaa_rating.clone()),
            description: Set(m.description.clone()),
            image: Set(m.image.clone()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let res = movie::Entity::insert(model).exec(&self.db).await?;
        tracing::debug!(id = res.last_insert_id, title = %m.title, "movie created");
        Ok(res.last_insert_id)
    }

    /// Overwrites the mutable fields of the movie identified by `m.id` and
    /// refreshes `updated_at`. `created_at` is never touched.
    pub async fn update(&self, m: &Movie) -> StoreResult<()> {
        let res = movie::Entity::update_many()
            .col_expr(movie::Column::Title, Expr::value(m.title.clone()))
            .col_expr(movie::Column::ReleaseDate, Expr::value(m.release_date.to_string()))
            .col_expr(movie::Column::Runtime, Expr::value(m.runtime))
            .col_expr(movie::Column::MpaaRating, Expr::value(m.mpaa_rating.clone()))
            .col_expr(movie::Column::Description, Expr::value(m.description.clone()))
            .col_expr(movie::Column::Image, Expr::value(m.image.clone()))
            .col_expr(movie::Column::UpdatedAt, Expr::value(now_sec()))
            .filter(movie::Column::Id.eq(m.id))
            .exec(&self.db)
            .await?;

        if res.rows_affected == 0 {
            return Err(StoreError::NotFound(m.id));
        }
        Ok(())
    }

    /// Removes the movie. Deleting an id that does not exist is not an error.
    pub async fn delete(&self, id: i64) -> StoreResult<()> {
        let res = movie::Entity::delete_by_id(id).exec(&self.db).await?;
        if res.rows_affected == 0 {
            tracing::debug!(id, "delete matched no rows");
        }
        Ok(())
    }
}

fn now_sec() -> i64 {
    jiff::Timestamp::now().as_second()
}
