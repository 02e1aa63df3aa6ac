use serde::{de::DeserializeOwned, Deserialize};

// ============================================================================
// Raw TMDB rows
// ============================================================================

/// One row of the movie metadata source
///
/// Structured columns (`genres`, `keywords`) hold the raw JSON text as it
/// appears in the source; they are parsed later with [`FieldParse`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MovieRow {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub genres: String,
    #[serde(default)]
    pub keywords: String,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub runtime: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub vote_average: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub vote_count: Option<u32>,
}

/// One row of the credits source, joinable with [`MovieRow`] on `title`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreditRow {
    pub movie_id: i64,
    pub title: String,
    #[serde(default)]
    pub cast: String,
    #[serde(default)]
    pub crew: String,
}

// ============================================================================
// Structured sub-field entries
// ============================================================================

/// Genre or keyword entry, e.g. `{"id": 28, "name": "Action"}`
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct NamedEntry {
    pub name: String,
}

/// Billed cast member; the source array is already in billing order
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CastMember {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CrewMember {
    pub name: String,
    #[serde(default)]
    pub job: String,
}

/// Which structured sub-field of a row a parse outcome belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructuredField {
    Genres,
    Keywords,
    Cast,
    Crew,
}

impl std::fmt::Display for StructuredField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            StructuredField::Genres => "genres",
            StructuredField::Keywords => "keywords",
            StructuredField::Cast => "cast",
            StructuredField::Crew => "crew",
        };
        write!(f, "{}", name)
    }
}

/// Outcome of strictly parsing one structured sub-field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldParse<T> {
    Parsed(Vec<T>),
    Malformed(String),
}

impl<T: DeserializeOwned> FieldParse<T> {
    /// Parses a JSON array of entries. A blank cell is an absent field and
    /// parses to an empty list.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() {
            return FieldParse::Parsed(Vec::new());
        }

        match serde_json::from_str::<Vec<T>>(raw) {
            Ok(entries) => FieldParse::Parsed(entries),
            Err(e) => FieldParse::Malformed(e.to_string()),
        }
    }
}

impl<T> FieldParse<T> {
    /// Entries of a parsed field, empty for a malformed one
    pub fn into_entries(self) -> Vec<T> {
        match self {
            FieldParse::Parsed(entries) => entries,
            FieldParse::Malformed(_) => Vec::new(),
        }
    }
}

/// Non-fatal report of a structured sub-field that failed to parse
#[derive(Debug, Clone, PartialEq)]
pub struct MalformedFieldWarning {
    pub movie_id: i64,
    pub field: StructuredField,
    pub reason: String,
}
