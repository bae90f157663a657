use std::future::Future;

use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    sea_query::{Expr, LikeExpr},
};

use crate::entities::movie;

/// Declarative filter handed to a [`MovieStore`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MovieFilter {
    All,
    Id(String),
    ReleaseYear(i64),
    /// Case-insensitive substring match on the title.
    TitleContains(String),
}

impl MovieFilter {
    fn condition(&self) -> Condition {
        match self {
            MovieFilter::All => Condition::all(),
            MovieFilter::Id(id) => Condition::all().add(movie::Column::Id.eq(id.as_str())),
            MovieFilter::ReleaseYear(year) => {
                Condition::all().add(movie::Column::ReleaseYear.eq(*year))
            }
            MovieFilter::TitleContains(term) => {
                let pattern = format!("%{}%", escape_like(&movie::fold_title(term)));
                Condition::all().add(
                    Expr::col((movie::Entity, movie::Column::TitleFolded))
                        .like(LikeExpr::new(pattern).escape(LIKE_ESCAPE)),
                )
            }
        }
    }
}

const LIKE_ESCAPE: char = '!';

fn escape_like(term: &str) -> String {
    let mut out = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, LIKE_ESCAPE | '%' | '_') {
            out.push(LIKE_ESCAPE);
        }
        out.push(c);
    }
    out
}

/// Read-only access to the movie collection.
pub trait MovieStore: Send + Sync + 'static {
    fn find_all(
        &self,
        filter: &MovieFilter,
    ) -> impl Future<Output = Result<Vec<movie::Model>, DbErr>> + Send;

    fn find_one(
        &self,
        filter: &MovieFilter,
    ) -> impl Future<Output = Result<Option<movie::Model>, DbErr>> + Send;
}

#[derive(Clone)]
pub struct DbMovieStore {
    db: DatabaseConnection,
}

impl DbMovieStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl MovieStore for DbMovieStore {
    async fn find_all(&self, filter: &MovieFilter) -> Result<Vec<movie::Model>, DbErr> {
        movie::Entity::find().filter(filter.condition()).all(&self.db).await
    }

    async fn find_one(&self, filter: &MovieFilter) -> Result<Option<movie::Model>, DbErr> {
        movie::Entity::find().filter(filter.condition()).one(&self.db).await
    }
}
