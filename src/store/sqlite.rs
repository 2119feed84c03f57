use actix_web::web;
use anyhow::anyhow;
use async_trait::async_trait;
use diesel::{prelude::*, result::Error as DieselError};

use super::{CommentStore, Result, StoreError};
use crate::{
    database::{get_db_conn, init_pool, DbPool},
    models::comments::{Comment, CommentFields, CommentRow, NewCommentRow, UpdateCommentRow},
    schema::comments,
    utils::{new_comment_id, now_millis},
};

type Columns = (
    comments::id,
    comments::option,
    comments::nickname,
    comments::comment,
    comments::created,
);

const COLUMNS: Columns = (
    comments::id,
    comments::option,
    comments::nickname,
    comments::comment,
    comments::created,
);

/// Comments in a SQLite table, accessed through diesel.
#[derive(Clone)]
pub struct SqliteStore {
    pool: DbPool,
}

impl SqliteStore {
    pub fn connect(url: &str, pool_size: u32) -> anyhow::Result<Self> {
        Ok(Self::new(init_pool(url, pool_size)?))
    }

    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Runs `f` with a pooled connection on the blocking thread pool.
    async fn run<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        web::block(move || {
            let mut conn = get_db_conn(&pool)?;
            f(&mut *conn)
        })
        .await
        .map_err(|err| anyhow!("DB error: {err}"))?
    }
}

pub fn from_diesel_err(err: DieselError) -> StoreError {
    match err {
        DieselError::NotFound => StoreError::NotFound,
        _ => StoreError::Other(anyhow::Error::new(err).context("DB error")),
    }
}

fn into_comment(row: CommentRow) -> Result<Comment> {
    Ok(Comment::try_from(row)?)
}

fn load_comments(conn: &mut SqliteConnection) -> QueryResult<Vec<CommentRow>> {
    comments::table
        .select(COLUMNS)
        // rowid orders comments created within the same millisecond
        .order((comments::created.desc(), comments::rowid.desc()))
        .load::<CommentRow>(conn)
}

fn load_comment(conn: &mut SqliteConnection, id: &str) -> QueryResult<CommentRow> {
    comments::table
        .select(COLUMNS)
        .filter(comments::id.eq(id))
        .first::<CommentRow>(conn)
}

#[async_trait]
impl CommentStore for SqliteStore {
    async fn create(&self, fields: CommentFields) -> Result<Comment> {
        let comment = Comment::new(new_comment_id(), fields, now_millis());
        self.run(move |conn| {
            let count = diesel::insert_into(comments::table)
                .values(NewCommentRow::from(&comment))
                .execute(conn)
                .map_err(from_diesel_err)?;
            debug_assert_eq!(1, count);
            Ok(comment)
        })
        .await
    }

    async fn list(&self) -> Result<Vec<Comment>> {
        self.run(|conn| {
            load_comments(conn)
                .map_err(from_diesel_err)?
                .into_iter()
                .map(into_comment)
                .collect()
        })
        .await
    }

    async fn get(&self, id: &str) -> Result<Comment> {
        let id = id.to_owned();
        self.run(move |conn| into_comment(load_comment(conn, &id).map_err(from_diesel_err)?))
            .await
    }

    async fn update(&self, id: &str, fields: CommentFields) -> Result<Comment> {
        let id = id.to_owned();
        self.run(move |conn| {
            let row = conn
                .transaction::<_, DieselError, _>(|conn| {
                    let count = diesel::update(comments::table.filter(comments::id.eq(&id)))
                        .set(UpdateCommentRow::from(&fields))
                        .execute(conn)?;
                    if count == 0 {
                        return Err(DieselError::NotFound);
                    }
                    load_comment(conn, &id)
                })
                .map_err(from_diesel_err)?;
            into_comment(row)
        })
        .await
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let id = id.to_owned();
        self.run(move |conn| {
            let count = diesel::delete(comments::table.filter(comments::id.eq(&id)))
                .execute(conn)
                .map_err(from_diesel_err)?;
            if count == 0 {
                return Err(StoreError::NotFound);
            }
            Ok(())
        })
        .await
    }
}
