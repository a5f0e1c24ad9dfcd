//! Values bound to builder placeholders.

use sqlx::postgres::PgArguments;
use sqlx::Arguments;

/// A value bound to a `$n` placeholder. Column types in the `student` table are
/// integer, text and double precision only.
#[derive(Clone, Debug, PartialEq)]
pub enum BindValue {
    Int(i32),
    Float(f64),
    Text(String),
}

impl From<i32> for BindValue {
    fn from(n: i32) -> Self {
        BindValue::Int(n)
    }
}

impl From<f64> for BindValue {
    fn from(f: f64) -> Self {
        BindValue::Float(f)
    }
}

impl From<&str> for BindValue {
    fn from(s: &str) -> Self {
        BindValue::Text(s.to_string())
    }
}

/// Encode params in placeholder order.
pub fn to_arguments(params: &[BindValue]) -> Result<PgArguments, sqlx::Error> {
    let mut args = PgArguments::default();
    for p in params {
        match p {
            BindValue::Int(n) => args.add(*n),
            BindValue::Float(f) => args.add(*f),
            BindValue::Text(s) => args.add(s.clone()),
        }
        .map_err(sqlx::Error::Encode)?;
    }
    Ok(args)
}
