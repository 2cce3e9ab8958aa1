use crate::errors::{AppError, AppResult};
use chrono::{Datelike, NaiveDate};

fn bad(what: &str) -> AppError {
    AppError::InvalidDate(what.to_string())
}

fn year(s: &str) -> AppResult<i32> {
    s.parse().map_err(|_| bad(s))
}

fn month(s: &str) -> AppResult<(i32, u32)> {
    let (y, m) = s.split_once('-').ok_or_else(|| bad(s))?;
    let m: u32 = m.parse().map_err(|_| bad(s))?;
    Ok((year(y)?, m))
}

fn first_of_month(y: i32, m: u32) -> AppResult<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, 1).ok_or_else(|| bad(&format!("{y:04}-{m:02}")))
}

fn last_of_month(y: i32, m: u32) -> AppResult<NaiveDate> {
    let first = first_of_month(y, m)?;
    let next = if first.month() == 12 {
        NaiveDate::from_ymd_opt(y + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(y, m + 1, 1)
    };
    next.and_then(|d| d.pred_opt())
        .ok_or_else(|| bad(&format!("{y:04}-{m:02}")))
}

fn day(s: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| bad(s))
}

/// First and last day covered by a single `YYYY`, `YYYY-MM` or `YYYY-MM-DD`.
fn bounds_of(part: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    match part.len() {
        4 => {
            let y = year(part)?;
            Ok((first_of_month(y, 1)?, last_of_month(y, 12)?))
        }
        7 => {
            let (y, m) = month(part)?;
            Ok((first_of_month(y, m)?, last_of_month(y, m)?))
        }
        10 => {
            let d = day(part)?;
            Ok((d, d))
        }
        _ => Err(bad(part)),
    }
}

/// Parse an export `--range`.
///
/// Accepts `YYYY`, `YYYY-MM`, `YYYY-MM-DD` or two of the same shape joined by
/// `:` (`2025-01:2025-03`). Bounds are inclusive.
pub fn parse_range(r: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let r = r.trim();

    let Some((start, end)) = r.split_once(':') else {
        return bounds_of(r);
    };

    let (start, end) = (start.trim(), end.trim());
    if start.len() != end.len() {
        return Err(AppError::InvalidDate(format!(
            "{r}: start and end must have the same format"
        )));
    }

    let (from, _) = bounds_of(start)?;
    let (_, to) = bounds_of(end)?;

    if from > to {
        return Err(AppError::InvalidDate(format!("{r}: start is after end")));
    }

    Ok((from, to))
}
