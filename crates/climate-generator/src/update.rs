//! Guarded in-place mutations applied by the update workload.

use crate::predicate::{Column, Predicate};
use crate::record::ClimateRecord;
use std::fmt;

/// `SET <column> = <column> +/- <delta> WHERE <guard>`
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateRule {
    pub column: Column,
    /// Signed amount added to the column.
    pub delta: f64,
    pub guard: Predicate,
}

impl UpdateRule {
    pub fn new(column: Column, delta: f64, guard: Predicate) -> Self {
        Self {
            column,
            delta,
            guard,
        }
    }

    /// The right-hand side of the assignment, e.g. `humidity + 5`.
    pub fn expression(&self) -> SetExpression<'_> {
        SetExpression(self)
    }

    /// The full `UPDATE` statement.
    pub fn to_sql(&self, table: &str) -> String {
        format!(
            "UPDATE {table} SET {} = {} WHERE {}",
            self.column,
            self.expression(),
            self.guard
        )
    }

    /// Apply the rule to a row if its guard holds. Returns whether the row changed.
    pub fn apply(&self, record: &mut ClimateRecord) -> bool {
        if !self.guard.matches(record) {
            return false;
        }
        *self.column.get_mut(record) += self.delta;
        true
    }
}

/// Display adapter for [`UpdateRule::expression`].
pub struct SetExpression<'a>(&'a UpdateRule);

impl fmt::Display for SetExpression<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = self.0;
        let sign = if rule.delta < 0.0 { '-' } else { '+' };
        write!(f, "{} {sign} {}", rule.column, rule.delta.abs())
    }
}

/// The mutations the update workload picks from. Each one is guarded so
/// repeated application does not push values without limit.
pub fn update_rules() -> Vec<UpdateRule> {
    use Column::*;

    vec![
        UpdateRule::new(Humidity, 5.0, Predicate::lt(Humidity, 70.0)),
        UpdateRule::new(Humidity, -5.0, Predicate::gt(Humidity, 80.0)),
        UpdateRule::new(Temperature, 1.0, Predicate::lt(Temperature, 10.0)),
        UpdateRule::new(Temperature, -1.0, Predicate::gt(Temperature, 30.0)),
        UpdateRule::new(Precipitation, 2.0, Predicate::lt(Precipitation, 5.0)),
        UpdateRule::new(Precipitation, -2.0, Predicate::gt(Precipitation, 15.0)),
    ]
}
