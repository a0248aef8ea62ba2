// src/main.rs
//
// CineCritic command-line front end

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cinecritic::application::commands::*;
use cinecritic::application::dto::{FilterDto, ListingDto, MovieFormDto};
use cinecritic::application::state::AppState;
use cinecritic::config::AppConfig;
use cinecritic::domain::{FILTER_RATING_CEIL, FILTER_RATING_FLOOR};

#[derive(Debug, Parser)]
#[command(name = "cinecritic", version, about = "Movie review catalog")]
struct Cli {
    /// Database file (overrides CINECRITIC_DB_PATH)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the filtered catalog once
    List {
        #[command(flatten)]
        filters: FilterArgs,
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Print one review
    Show { id: String },
    /// Watch the catalog and reprint the listing on every change
    Watch {
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Provision an admin account
    AddAdmin {
        #[command(flatten)]
        auth: AdminAuth,
    },
    /// Add a review
    Add {
        #[command(flatten)]
        auth: AdminAuth,
        #[command(flatten)]
        movie: MovieArgs,
    },
    /// Edit a review; omitted fields keep their stored value
    Edit {
        id: String,
        #[command(flatten)]
        auth: AdminAuth,
        #[command(flatten)]
        movie: MovieArgs,
    },
    /// Delete a review
    Delete {
        id: String,
        #[command(flatten)]
        auth: AdminAuth,
        /// Confirm the deletion; without it nothing is deleted
        #[arg(long)]
        yes: bool,
    },
    /// Run an integrity check and print database size and row counts
    DbCheck {
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Args)]
struct AdminAuth {
    #[arg(long)]
    email: String,
    #[arg(long)]
    password: String,
}

#[derive(Debug, Args)]
struct FilterArgs {
    /// Case-insensitive title substring
    #[arg(long, default_value = "")]
    search: String,
    #[arg(long = "genre")]
    genres: Vec<String>,
    #[arg(long = "language")]
    languages: Vec<String>,
    #[arg(long = "censor")]
    censor_ratings: Vec<String>,
    #[arg(long, default_value_t = FILTER_RATING_FLOOR)]
    min_rating: f64,
    #[arg(long, default_value_t = FILTER_RATING_CEIL)]
    max_rating: f64,
}

impl From<FilterArgs> for FilterDto {
    fn from(args: FilterArgs) -> Self {
        Self {
            search_text: args.search,
            genres: args.genres,
            languages: args.languages,
            min_rating: args.min_rating,
            max_rating: args.max_rating,
            censor_ratings: args.censor_ratings,
        }
    }
}

#[derive(Debug, Args)]
struct MovieArgs {
    #[arg(long)]
    title: Option<String>,
    #[arg(long = "genre")]
    genres: Vec<String>,
    #[arg(long = "language")]
    languages: Vec<String>,
    #[arg(long)]
    censor: Option<String>,
    #[arg(long)]
    rating: Option<f64>,
    /// http(s) URL or data:image/...;base64 URL
    #[arg(long)]
    poster: Option<String>,
    #[arg(long)]
    review: Option<String>,
}

impl MovieArgs {
    fn apply_to(self, form: &mut MovieFormDto) {
        if let Some(title) = self.title {
            form.title = title;
        }
        if !self.genres.is_empty() {
            form.genres = self.genres;
        }
        if !self.languages.is_empty() {
            form.languages = self.languages;
        }
        if let Some(censor) = self.censor {
            form.censor = censor;
        }
        if let Some(rating) = self.rating {
            form.rating = rating;
        }
        if self.poster.is_some() {
            form.poster = self.poster;
        }
        if let Some(review) = self.review {
            form.review = review;
        }
    }
}

fn print_listing(listing: &ListingDto) {
    if let Some(message) = &listing.message {
        println!("{}", message);
        return;
    }
    if listing.state == "loading" {
        println!("Loading...");
        return;
    }

    for movie in &listing.movies {
        println!(
            "{}  {:<32} {:>3}/5  {:<4} {} | {}",
            movie.id,
            movie.title,
            movie.rating_label,
            movie.censor,
            movie.genres.join(", "),
            movie.languages.join(", "),
        );
    }
}

async fn authenticate(state: &AppState, auth: &AdminAuth) -> anyhow::Result<()> {
    sign_in(state, &auth.email, &auth.password).await?;
    Ok(())
}

async fn run(state: &AppState, command: Command) -> anyhow::Result<()> {
    match command {
        Command::List { filters, json } => {
            apply_filters(state, filters.into())?;
            let listing = list_movies(state).await;
            if json {
                println!("{}", serde_json::to_string_pretty(&listing)?);
            } else {
                print_listing(&listing);
            }
        }

        Command::Show { id } => {
            let detail = get_movie_detail(state, &id).await?;
            println!("{}", detail.page_title);
            println!("{}", "=".repeat(detail.page_title.chars().count()));
            println!(
                "Rating {}/5 | {} | {} | {}",
                detail.rating_label,
                detail.censor,
                detail.genres.join(", "),
                detail.languages.join(", ")
            );
            println!("Poster: {}", detail.poster);
            println!();
            println!("{}", detail.review);
        }

        Command::Watch { filters } => {
            apply_filters(state, filters.into())?;
            let mut listing = open_listing(state).await;
            print_listing(&ListingDto::from(listing.state()));

            loop {
                tokio::select! {
                    next = listing.next_change() => match next {
                        Some(current) => {
                            println!("---");
                            print_listing(&ListingDto::from(current));
                        }
                        None => break,
                    },
                    _ = tokio::signal::ctrl_c() => break,
                }
            }
            listing.close();
        }

        Command::AddAdmin { auth } => {
            let session = register_admin(state, &auth.email, &auth.password).await?;
            println!("Registered admin {}", session.email);
        }

        Command::Add { auth, movie } => {
            authenticate(state, &auth).await?;
            let mut form = MovieFormDto::default();
            movie.apply_to(&mut form);
            let id = create_movie(state, form).await?;
            println!("Added {}", id);
        }

        Command::Edit { id, auth, movie } => {
            authenticate(state, &auth).await?;
            let mut form = load_movie_form(state, &id).await?;
            movie.apply_to(&mut form);
            update_movie(state, &id, form).await?;
            println!("Updated {}", id);
        }

        Command::Delete { id, auth, yes } => {
            authenticate(state, &auth).await?;
            if !delete_movie(state, &id, yes).await? {
                bail!("Not deleted: pass --yes to confirm deleting {}", id);
            }
            println!("Deleted {}", id);
        }

        Command::DbCheck { json } => {
            let health = check_database(state).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&health)?);
            } else {
                println!("Database:  {}", state.config.database_path.display());
                println!(
                    "Size:      {} bytes ({} pages of {})",
                    health.size_bytes, health.page_count, health.page_size
                );
                println!("Movies:    {}", health.movie_count);
                println!("Admins:    {}", health.admin_count);
            }
            if let Some(reason) = health.integrity_error {
                bail!(reason);
            }
            if !json {
                println!("Integrity: ok");
            }
        }
    }

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cinecritic=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = AppConfig::load().context("Failed to load configuration")?;
    if let Some(db) = cli.db {
        config = config.with_database_path(db);
    }

    let state = AppState::initialize(config).context("Failed to open the catalog")?;

    let result = run(&state, cli.command).await;
    sign_out(&state).await?;
    result
}
