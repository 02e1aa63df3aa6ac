use std::collections::HashMap;

use crate::models::{
    CastMember, CreditRow, CrewMember, FieldParse, MalformedFieldWarning, MovieRecord, MovieRow,
    NamedEntry, StructuredField,
};

/// Number of billed cast members that contribute to a tag
const TOP_CAST: usize = 3;

const DIRECTOR_JOB: &str = "Director";

/// Output of the tag builder: the movie index plus the non-fatal parse
/// warnings collected along the way
#[derive(Debug, Clone, Default)]
pub struct TagBuild {
    pub movies: Vec<MovieRecord>,
    pub warnings: Vec<MalformedFieldWarning>,
}

/// Joins movie and credit rows on title and builds one tag per joined row.
///
/// Inner join: titles missing from either side are dropped. Duplicate titles
/// fan out, one record per matching pair. Output follows movie row order,
/// then credit row order within a title.
pub fn build(movies: &[MovieRow], credits: &[CreditRow]) -> Vec<MovieRecord> {
    let build = build_with_warnings(movies, credits);

    if !build.warnings.is_empty() {
        tracing::warn!(
            malformed_fields = build.warnings.len(),
            movies = build.movies.len(),
            "Some structured fields failed to parse and were treated as empty"
        );
    }

    build.movies
}

/// Same as [`build`], returning the malformed field warnings to the caller
pub fn build_with_warnings(movies: &[MovieRow], credits: &[CreditRow]) -> TagBuild {
    let mut credits_by_title: HashMap<&str, Vec<&CreditRow>> = HashMap::new();
    for credit in credits {
        credits_by_title
            .entry(credit.title.as_str())
            .or_default()
            .push(credit);
    }

    let mut build = TagBuild::default();

    for movie in movies {
        let Some(matches) = credits_by_title.get(movie.title.as_str()) else {
            continue;
        };

        for credit in matches {
            let tag = build_tag(movie, credit, &mut build.warnings);
            build.movies.push(MovieRecord {
                id: movie.id,
                title: movie.title.clone(),
                tag,
            });
        }
    }

    build
}

fn build_tag(
    movie: &MovieRow,
    credit: &CreditRow,
    warnings: &mut Vec<MalformedFieldWarning>,
) -> String {
    let mut parse = |field: StructuredField, raw: &str| -> Vec<String> {
        match field {
            StructuredField::Genres | StructuredField::Keywords => {
                names(parse_field::<NamedEntry>(movie.id, field, raw, &mut *warnings))
            }
            StructuredField::Cast => parse_field::<CastMember>(movie.id, field, raw, &mut *warnings)
                .into_iter()
                .take(TOP_CAST)
                .map(|c| c.name)
                .collect(),
            StructuredField::Crew => parse_field::<CrewMember>(movie.id, field, raw, &mut *warnings)
                .into_iter()
                .find(|c| c.job == DIRECTOR_JOB)
                .map(|c| vec![c.name])
                .unwrap_or_default(),
        }
    };

    let genres = parse(StructuredField::Genres, &movie.genres);
    let keywords = parse(StructuredField::Keywords, &movie.keywords);
    let cast = parse(StructuredField::Cast, &credit.cast);
    let crew = parse(StructuredField::Crew, &credit.crew);

    let parts = [
        movie.overview.clone().unwrap_or_default(),
        genres.join(" "),
        keywords.join(" "),
        cast.join(" "),
        crew.join(" "),
    ];

    parts.join(" ").to_lowercase()
}

fn parse_field<T: serde::de::DeserializeOwned>(
    movie_id: i64,
    field: StructuredField,
    raw: &str,
    warnings: &mut Vec<MalformedFieldWarning>,
) -> Vec<T> {
    match FieldParse::<T>::parse(raw) {
        FieldParse::Parsed(entries) => entries,
        FieldParse::Malformed(reason) => {
            tracing::debug!(movie_id, field = %field, reason = %reason, "Malformed structured field");
            warnings.push(MalformedFieldWarning {
                movie_id,
                field,
                reason,
            });
            Vec::new()
        }
    }
}

fn names(entries: Vec<NamedEntry>) -> Vec<String> {
    entries.into_iter().map(|e| e.name).collect()
}
