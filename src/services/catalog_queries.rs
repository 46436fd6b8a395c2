use chrono::Datelike;

use crate::{
    catalog::Catalog,
    error::{AppError, AppResult},
    models::{
        calendar, ActorStats, DirectorFilm, DirectorStats, Film, MonthCount, TitleScore,
        TitleVotes, WeekdayCount, MIN_REPORTED_VOTES,
    },
};

/// Counts films released in a month across all years
pub fn count_by_month(catalog: &Catalog, month: &str) -> AppResult<MonthCount> {
    let number = calendar::month_number(month)
        .ok_or_else(|| AppError::NotFound(format!("Month '{}' not found", month)))?;

    let count = catalog
        .films()
        .iter()
        .filter_map(|f| f.release_date)
        .filter(|date| date.month() == number)
        .count();

    Ok(MonthCount {
        month: month.to_lowercase(),
        count,
    })
}

/// Counts films released on a weekday across all dates
pub fn count_by_weekday(catalog: &Catalog, weekday: &str) -> AppResult<WeekdayCount> {
    let day = calendar::weekday(weekday)
        .ok_or_else(|| AppError::NotFound(format!("Weekday '{}' not found", weekday)))?;

    let count = catalog
        .films()
        .iter()
        .filter_map(|f| f.release_date)
        .filter(|date| date.weekday() == day)
        .count();

    Ok(WeekdayCount {
        weekday: weekday.to_lowercase(),
        count,
    })
}

fn find_title<'a>(catalog: &'a Catalog, title: &str) -> AppResult<&'a Film> {
    catalog
        .find_by_title_ignore_case(title)
        .ok_or_else(|| AppError::NotFound(format!("Film '{}' not found", title)))
}

/// Release year and popularity of the first film matching `title`
pub fn score_by_title(catalog: &Catalog, title: &str) -> AppResult<TitleScore> {
    let film = find_title(catalog, title)?;
    Ok(TitleScore {
        title: film.title.clone(),
        release_year: film.release_year,
        popularity: film.popularity,
    })
}

/// Vote statistics of the first film matching `title`, if it has enough votes
pub fn votes_by_title(catalog: &Catalog, title: &str) -> AppResult<TitleVotes> {
    let film = find_title(catalog, title)?;
    if film.vote_count < MIN_REPORTED_VOTES {
        return Ok(TitleVotes::insufficient(&film.title));
    }
    Ok(TitleVotes::Reported {
        title: film.title.clone(),
        release_year: film.release_year,
        vote_count: film.vote_count,
        vote_average: film.vote_average,
    })
}

/// Film count and return totals for films whose cast mentions `actor`
pub fn actor_stats(catalog: &Catalog, actor: &str) -> AppResult<ActorStats> {
    let films = catalog.films_with_actor(actor);
    if films.is_empty() {
        return Err(AppError::NotFound(format!("Actor '{}' not found", actor)));
    }

    let film_count = films.len();
    let total_return: f64 = films.iter().map(|f| f.return_ratio).sum();

    Ok(ActorStats {
        actor: actor.to_string(),
        film_count,
        total_return,
        average_return: total_return / film_count as f64,
    })
}

/// Return total and per-film breakdown for films whose director matches `director`
pub fn director_stats(catalog: &Catalog, director: &str) -> AppResult<DirectorStats> {
    let films = catalog.films_by_director(director);
    if films.is_empty() {
        return Err(AppError::NotFound(format!(
            "Director '{}' not found",
            director
        )));
    }

    Ok(DirectorStats {
        director: director.to_string(),
        total_return: films.iter().map(|f| f.return_ratio).sum(),
        films: films.into_iter().map(DirectorFilm::from).collect(),
    })
}
