//! Checks applied to user input before it reaches the weather service.

use clima_weather::compare::parse_city_list;

/// Longest city name accepted from the command line.
pub const MAX_CITY_NAME_CHARS: usize = 100;

/// What a line of user input asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    Single(String),
    Compare(Vec<String>),
}

/// Input rejected before any lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    Empty,
    TooLong(String),
}

impl std::fmt::Display for InputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputError::Empty => write!(f, "Please enter a city name."),
            InputError::TooLong(name) => write!(
                f,
                "City name is too long ({} characters, at most {}).",
                name.chars().count(),
                MAX_CITY_NAME_CHARS
            ),
        }
    }
}

impl std::error::Error for InputError {}

/// Turn raw arguments (each possibly a comma-separated list) into a query.
pub fn parse_query<S: AsRef<str>>(args: &[S]) -> Result<Query, InputError> {
    let names: Vec<String> = args
        .iter()
        .flat_map(|arg| parse_city_list(arg.as_ref()))
        .collect();

    if let Some(long) = names.iter().find(|n| n.chars().count() > MAX_CITY_NAME_CHARS) {
        return Err(InputError::TooLong(long.clone()));
    }

    let mut names = names.into_iter();
    match (names.next(), names.next()) {
        (None, _) => Err(InputError::Empty),
        (Some(only), None) => Ok(Query::Single(only)),
        (Some(first), Some(second)) => {
            let mut all = vec![first, second];
            all.extend(names);
            Ok(Query::Compare(all))
        }
    }
}
