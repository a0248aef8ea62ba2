// src/repositories/movie_repository.rs
//
// Movie persistence

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, OptionalExtension, Row};

use crate::db::ConnectionPool;
use crate::domain::movie::{CensorRating, Genre, Language, Movie, MovieId, PosterImage};
use crate::error::{AppError, AppResult};

pub trait MovieRepository: Send + Sync {
    fn insert(&self, movie: &Movie) -> AppResult<()>;
    /// Overwrites the stored row; `NotFound` when the id is absent
    fn update(&self, movie: &Movie) -> AppResult<()>;
    fn get_by_id(&self, id: &MovieId) -> AppResult<Option<Movie>>;
    /// Whole catalog, newest first
    fn list_newest_first(&self) -> AppResult<Vec<Movie>>;
    fn delete(&self, id: &MovieId) -> AppResult<()>;
    fn latest_created_at(&self) -> AppResult<Option<DateTime<Utc>>>;
    fn count(&self) -> AppResult<i64>;
}

/// Fixed-width UTC form: lexical order equals chronological order
pub(crate) fn format_timestamp(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, rusqlite::Error> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}

fn conversion_error(e: impl std::error::Error + Send + Sync + 'static) -> rusqlite::Error {
    rusqlite::Error::ToSqlConversionFailure(Box::new(e))
}

const SELECT_COLUMNS: &str = "SELECT id, title, genres, languages, censor, rating, poster,
                                     review, created_at, updated_at
                              FROM movies";

pub struct SqliteMovieRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteMovieRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    /// Map database row to Movie - returns rusqlite::Error for query_map compatibility
    fn row_to_movie(row: &Row) -> Result<Movie, rusqlite::Error> {
        let id: String = row.get("id")?;
        let title: String = row.get("title")?;

        let genres_json: String = row.get("genres")?;
        let genres: BTreeSet<Genre> =
            serde_json::from_str(&genres_json).map_err(conversion_error)?;

        let languages_json: String = row.get("languages")?;
        let languages: BTreeSet<Language> =
            serde_json::from_str(&languages_json).map_err(conversion_error)?;

        let censor_str: String = row.get("censor")?;
        let censor: CensorRating = censor_str.parse().map_err(conversion_error)?;

        let rating: f64 = row.get("rating")?;
        let poster: String = row.get("poster")?;
        let review: String = row.get("review")?;

        let created_at_str: String = row.get("created_at")?;
        let updated_at_str: String = row.get("updated_at")?;

        Ok(Movie {
            id: MovieId::from(id),
            title,
            genres,
            languages,
            censor,
            rating,
            poster: PosterImage::new(poster),
            review,
            created_at: parse_timestamp(&created_at_str)?,
            updated_at: parse_timestamp(&updated_at_str)?,
        })
    }
}

impl MovieRepository for SqliteMovieRepository {
    fn insert(&self, movie: &Movie) -> AppResult<()> {
        let conn = self.pool.get()?;

        let genres_json = serde_json::to_string(&movie.genres)?;
        let languages_json = serde_json::to_string(&movie.languages)?;

        conn.execute(
            "INSERT INTO movies (
                id, title, genres, languages, censor, rating, poster, review,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                movie.id.as_str(),
                movie.title,
                genres_json,
                languages_json,
                movie.censor.label(),
                movie.rating,
                movie.poster.as_str(),
                movie.review,
                format_timestamp(&movie.created_at),
                format_timestamp(&movie.updated_at),
            ],
        )?;

        Ok(())
    }

    fn update(&self, movie: &Movie) -> AppResult<()> {
        let conn = self.pool.get()?;

        let genres_json = serde_json::to_string(&movie.genres)?;
        let languages_json = serde_json::to_string(&movie.languages)?;

        // created_at is deliberately absent from the SET list
        let rows_affected = conn.execute(
            "UPDATE movies SET
                title = ?2, genres = ?3, languages = ?4, censor = ?5, rating = ?6,
                poster = ?7, review = ?8, updated_at = ?9
             WHERE id = ?1",
            params![
                movie.id.as_str(),
                movie.title,
                genres_json,
                languages_json,
                movie.censor.label(),
                movie.rating,
                movie.poster.as_str(),
                movie.review,
                format_timestamp(&movie.updated_at),
            ],
        )?;

        if rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    fn get_by_id(&self, id: &MovieId) -> AppResult<Option<Movie>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(&format!("{} WHERE id = ?1", SELECT_COLUMNS))?;

        match stmt.query_row(params![id.as_str()], Self::row_to_movie) {
            Ok(movie) => Ok(Some(movie)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn list_newest_first(&self) -> AppResult<Vec<Movie>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(&format!("{} ORDER BY created_at DESC", SELECT_COLUMNS))?;

        let movies: Vec<Movie> = stmt
            .query_map([], Self::row_to_movie)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(movies)
    }

    fn delete(&self, id: &MovieId) -> AppResult<()> {
        let conn = self.pool.get()?;

        let rows_affected = conn.execute("DELETE FROM movies WHERE id = ?1", params![id.as_str()])?;

        if rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    fn latest_created_at(&self) -> AppResult<Option<DateTime<Utc>>> {
        let conn = self.pool.get()?;

        let latest: Option<String> = conn
            .query_row("SELECT MAX(created_at) FROM movies", [], |row| row.get(0))
            .optional()?
            .flatten();

        Ok(latest.map(|raw| parse_timestamp(&raw)).transpose()?)
    }

    fn count(&self) -> AppResult<i64> {
        let conn = self.pool.get()?;

        let count: i64 = conn.query_row("SELECT COUNT(*) FROM movies", [], |row| row.get(0))?;

        Ok(count)
    }
}
