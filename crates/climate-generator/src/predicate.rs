//! WHERE-clause predicates over `ClimateData`.
//!
//! A [`Predicate`] renders to the SQL text sent to the database (via
//! `Display`) and can also be evaluated against a [`ClimateRecord`] held in
//! memory, so the same condition drives both the MySQL and the in-memory
//! store.

use crate::location::Location;
use crate::record::ClimateRecord;
use chrono::NaiveDate;
use std::fmt;

/// Numeric columns of `ClimateData`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Temperature,
    Precipitation,
    Humidity,
}

impl Column {
    pub fn name(self) -> &'static str {
        match self {
            Column::Temperature => "temperature",
            Column::Precipitation => "precipitation",
            Column::Humidity => "humidity",
        }
    }

    pub fn get(self, record: &ClimateRecord) -> f64 {
        match self {
            Column::Temperature => record.temperature,
            Column::Precipitation => record.precipitation,
            Column::Humidity => record.humidity,
        }
    }

    pub fn get_mut(self, record: &mut ClimateRecord) -> &mut f64 {
        match self {
            Column::Temperature => &mut record.temperature,
            Column::Precipitation => &mut record.precipitation,
            Column::Humidity => &mut record.humidity,
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Gt,
    Lt,
    Eq,
}

impl CompareOp {
    pub fn symbol(self) -> &'static str {
        match self {
            CompareOp::Gt => ">",
            CompareOp::Lt => "<",
            CompareOp::Eq => "=",
        }
    }

    fn holds(self, lhs: f64, rhs: f64) -> bool {
        match self {
            CompareOp::Gt => lhs > rhs,
            CompareOp::Lt => lhs < rhs,
            CompareOp::Eq => lhs == rhs,
        }
    }
}

/// A filter condition on `ClimateData` rows.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// `<column> <op> <value>`
    Compare {
        column: Column,
        op: CompareOp,
        value: f64,
    },
    /// `location = '<city>'`
    LocationEq(Location),
    /// `location IN ('<city>', ...)`
    LocationIn(Vec<Location>),
    /// `record_date BETWEEN '<from>' AND '<to>'`, both ends inclusive.
    DateBetween(NaiveDate, NaiveDate),
    /// `<lhs> AND <rhs>`
    And(Box<Predicate>, Box<Predicate>),
}

impl Predicate {
    pub fn gt(column: Column, value: f64) -> Self {
        Predicate::Compare {
            column,
            op: CompareOp::Gt,
            value,
        }
    }

    pub fn lt(column: Column, value: f64) -> Self {
        Predicate::Compare {
            column,
            op: CompareOp::Lt,
            value,
        }
    }

    pub fn equals(column: Column, value: f64) -> Self {
        Predicate::Compare {
            column,
            op: CompareOp::Eq,
            value,
        }
    }

    pub fn and(self, other: Predicate) -> Self {
        Predicate::And(Box::new(self), Box::new(other))
    }

    /// Evaluate the predicate against a row, with SQL semantics.
    pub fn matches(&self, record: &ClimateRecord) -> bool {
        match self {
            Predicate::Compare { column, op, value } => op.holds(column.get(record), *value),
            Predicate::LocationEq(location) => record.location == *location,
            Predicate::LocationIn(locations) => locations.contains(&record.location),
            Predicate::DateBetween(from, to) => {
                record.record_date >= *from && record.record_date <= *to
            }
            Predicate::And(lhs, rhs) => lhs.matches(record) && rhs.matches(record),
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::Compare { column, op, value } => {
                write!(f, "{column} {} {value}", op.symbol())
            }
            Predicate::LocationEq(location) => write!(f, "location = '{location}'"),
            Predicate::LocationIn(locations) => {
                let quoted: Vec<String> = locations.iter().map(|l| format!("'{l}'")).collect();
                write!(f, "location IN ({})", quoted.join(", "))
            }
            Predicate::DateBetween(from, to) => {
                write!(f, "record_date BETWEEN '{from}' AND '{to}'")
            }
            Predicate::And(lhs, rhs) => write!(f, "{lhs} AND {rhs}"),
        }
    }
}

fn ymd(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(crate::record::RECORD_YEAR, month, day).unwrap_or_default()
}

/// The conditions the select workload picks from.
pub fn select_predicates() -> Vec<Predicate> {
    use Column::*;

    vec![
        Predicate::gt(Temperature, 20.0),
        Predicate::lt(Temperature, 0.0),
        Predicate::gt(Precipitation, 10.0),
        Predicate::gt(Humidity, 80.0),
        Predicate::LocationEq(Location::Tokyo),
        Predicate::DateBetween(ymd(6, 1), ymd(8, 31)),
        Predicate::LocationIn(vec![Location::London, Location::Paris, Location::Berlin]),
        Predicate::gt(Temperature, 25.0).and(Predicate::lt(Humidity, 60.0)),
        Predicate::equals(Precipitation, 0.0).and(Predicate::gt(Temperature, 15.0)),
        Predicate::LocationEq(Location::Sydney)
            .and(Predicate::DateBetween(ymd(12, 1), ymd(12, 31))),
    ]
}
