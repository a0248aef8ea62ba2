// src/application/routes.rs
//
// Admin route gating
//
// Every admin page requires an active session; without one the decision
// is a redirect to the login page. Editing an entry that no longer exists
// sends the admin back to the dashboard.

use std::fmt;

use serde::Serialize;

use super::dto::{MovieCardDto, MovieFormDto};
use super::error_handling::{CommandResult, ErrorResponse};
use super::state::AppState;
use crate::domain::MovieId;
use crate::error::AppError;

pub const LOGIN_PATH: &str = "/admin/login";
pub const DASHBOARD_PATH: &str = "/admin/dashboard";
pub const ADD_MOVIE_PATH: &str = "/admin/add-movie";
const EDIT_MOVIE_PREFIX: &str = "/admin/edit/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminRoute {
    Dashboard,
    AddMovie,
    EditMovie(MovieId),
}

impl AdminRoute {
    /// `None` for paths outside the gated admin area (including the login page)
    pub fn parse(path: &str) -> Option<Self> {
        let path = path.trim_end_matches('/');
        match path {
            DASHBOARD_PATH => Some(AdminRoute::Dashboard),
            ADD_MOVIE_PATH => Some(AdminRoute::AddMovie),
            _ => path
                .strip_prefix(EDIT_MOVIE_PREFIX)
                .filter(|id| !id.is_empty() && !id.contains('/'))
                .map(|id| AdminRoute::EditMovie(MovieId::from(id))),
        }
    }

    pub fn path(&self) -> String {
        match self {
            AdminRoute::Dashboard => DASHBOARD_PATH.to_string(),
            AdminRoute::AddMovie => ADD_MOVIE_PATH.to_string(),
            AdminRoute::EditMovie(id) => format!("{}{}", EDIT_MOVIE_PREFIX, id),
        }
    }
}

impl fmt::Display for AdminRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "page", rename_all = "snake_case")]
pub enum AdminPage {
    Dashboard { movies: Vec<MovieCardDto> },
    AddMovie { form: MovieFormDto },
    EditMovie { id: String, form: MovieFormDto },
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "decision", content = "target", rename_all = "snake_case")]
pub enum RouteDecision {
    Render(AdminPage),
    Redirect(String),
}

impl RouteDecision {
    fn redirect(path: &str) -> Self {
        RouteDecision::Redirect(path.to_string())
    }
}

pub async fn resolve_admin_route(
    state: &AppState,
    route: &AdminRoute,
) -> CommandResult<RouteDecision> {
    if state.admin_service.require_session().is_err() {
        return Ok(RouteDecision::redirect(LOGIN_PATH));
    }

    let page = match route {
        AdminRoute::Dashboard => {
            let movies = state.admin_service.list_movies().await?;
            AdminPage::Dashboard {
                movies: movies.iter().map(MovieCardDto::from).collect(),
            }
        }
        AdminRoute::AddMovie => AdminPage::AddMovie {
            form: MovieFormDto {
                rating: crate::domain::RATING_MIN,
                ..MovieFormDto::default()
            },
        },
        AdminRoute::EditMovie(id) => match state.admin_service.load_for_edit(id).await {
            Ok(movie) => AdminPage::EditMovie {
                id: id.to_string(),
                form: MovieFormDto::from(movie),
            },
            Err(AppError::NotFound) => return Ok(RouteDecision::redirect(DASHBOARD_PATH)),
            Err(e) => return Err(ErrorResponse::from_app_error(e)),
        },
    };

    Ok(RouteDecision::Render(page))
}
