//! Schedule expressions for transfer tasks.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::ScheduleError;

/// A `rate(...)` or `cron(...)` expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ScheduleExpression(String);

impl ScheduleExpression {
    pub fn parse(raw: impl Into<String>) -> Result<Self, ScheduleError> {
        let raw = raw.into();
        let expr = raw.trim();

        if let Some(body) = expr.strip_prefix("rate(").and_then(|s| s.strip_suffix(')')) {
            validate_rate(expr, body)?;
        } else if let Some(body) = expr.strip_prefix("cron(").and_then(|s| s.strip_suffix(')')) {
            if body.split_whitespace().count() != 6 {
                return Err(ScheduleError::MalformedCron(expr.to_string()));
            }
        } else {
            return Err(ScheduleError::UnknownForm(expr.to_string()));
        }

        Ok(Self(expr.to_string()))
    }

    /// `rate(n unit)` with the unit pluralised as the engine expects.
    pub fn every(value: u32, unit: RateUnit) -> Result<Self, ScheduleError> {
        if value == 0 {
            return Err(ScheduleError::InvalidRateValue(format!("rate(0 {})", unit.plural())));
        }
        let unit = if value == 1 { unit.singular() } else { unit.plural() };
        Ok(Self(format!("rate({value} {unit})")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateUnit {
    Minute,
    Hour,
    Day,
}

impl RateUnit {
    fn singular(self) -> &'static str {
        match self {
            RateUnit::Minute => "minute",
            RateUnit::Hour => "hour",
            RateUnit::Day => "day",
        }
    }

    fn plural(self) -> &'static str {
        match self {
            RateUnit::Minute => "minutes",
            RateUnit::Hour => "hours",
            RateUnit::Day => "days",
        }
    }
}

fn validate_rate(expr: &str, body: &str) -> Result<(), ScheduleError> {
    let mut parts = body.split_whitespace();
    let (Some(value), Some(unit), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(ScheduleError::MalformedRate(expr.to_string()));
    };

    let value: u32 = value
        .parse()
        .ok()
        .filter(|v| *v > 0)
        .ok_or_else(|| ScheduleError::InvalidRateValue(expr.to_string()))?;

    let unit_ok = [RateUnit::Minute, RateUnit::Hour, RateUnit::Day]
        .iter()
        .any(|u| if value == 1 { u.singular() == unit } else { u.plural() == unit });
    if !unit_ok {
        return Err(ScheduleError::InvalidRateUnit {
            value,
            unit: unit.to_string(),
        });
    }
    Ok(())
}

impl fmt::Display for ScheduleExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ScheduleExpression {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ScheduleExpression {
    type Error = ScheduleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<ScheduleExpression> for String {
    fn from(expr: ScheduleExpression) -> Self {
        expr.0
    }
}
