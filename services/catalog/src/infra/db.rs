use std::sync::Arc;

use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, sea_query::Expr,
};

use bookstore_catalog_schema::books;
use bookstore_core::db::is_unavailable;

use crate::domain::repository::BookRepository;
use crate::domain::types::{Book, BookInput};
use crate::error::CatalogError;

fn db_error(err: DbErr, context: &'static str) -> CatalogError {
    if is_unavailable(&err) {
        return CatalogError::DatabaseUnavailable;
    }
    CatalogError::Internal(anyhow::Error::new(err).context(context))
}

fn book_from_model(model: books::Model) -> Book {
    Book {
        id: model.id,
        title: model.title,
        author: model.author,
        year: model.year,
    }
}

#[derive(Clone)]
pub struct DbBookRepository {
    pub db: Arc<DatabaseConnection>,
}

impl BookRepository for DbBookRepository {
    async fn list(&self) -> Result<Vec<Book>, CatalogError> {
        let models = books::Entity::find()
            .order_by_asc(books::Column::Id)
            .all(&*self.db)
            .await
            .map_err(|e| db_error(e, "list books"))?;
        Ok(models.into_iter().map(book_from_model).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Book>, CatalogError> {
        let model = books::Entity::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(|e| db_error(e, "find book by id"))?;
        Ok(model.map(book_from_model))
    }

    async fn create(&self, input: &BookInput) -> Result<Book, CatalogError> {
        let model = books::ActiveModel {
            title: Set(input.title.clone()),
            author: Set(input.author.clone()),
            year: Set(input.year),
            ..Default::default()
        }
        .insert(&*self.db)
        .await
        .map_err(|e| db_error(e, "insert book"))?;
        Ok(book_from_model(model))
    }

    async fn update(&self, id: i32, input: &BookInput) -> Result<bool, CatalogError> {
        let result = books::Entity::update_many()
            .col_expr(books::Column::Title, Expr::value(input.title.clone()))
            .col_expr(books::Column::Author, Expr::value(input.author.clone()))
            .col_expr(books::Column::Year, Expr::value(input.year))
            .filter(books::Column::Id.eq(id))
            .exec(&*self.db)
            .await
            .map_err(|e| db_error(e, "update book"))?;
        Ok(result.rows_affected > 0)
    }

    async fn delete(&self, id: i32) -> Result<bool, CatalogError> {
        let result = books::Entity::delete_by_id(id)
            .exec(&*self.db)
            .await
            .map_err(|e| db_error(e, "delete book"))?;
        Ok(result.rows_affected > 0)
    }
}
