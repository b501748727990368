//! Working time statistic: timer records joined with their company,
//! newest first, filtered by company and period.

use crate::errors::AppResult;
use crate::models::Timer;
use crate::sqlite::{Database, Field, Row};
use crate::utils::date::Period;
use crate::utils::format_worked;
use crate::utils::table::{Column, Table};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

const QUERY: &str = "SELECT timer.id AS id, timer.company_id AS company_id, \
                     company.name AS name, timer.start AS start, timer.finish AS finish \
                     FROM timer JOIN company ON company.id = timer.company_id";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatFilter {
    pub company_id: Option<i64>,
    pub period: Period,
}

impl Default for StatFilter {
    fn default() -> Self {
        Self {
            company_id: None,
            period: Period::All,
        }
    }
}

/// Flat record, shared by the table view and the exporters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatRecord {
    pub id: i64,
    pub company_id: i64,
    pub company: String,
    pub start: String,
    pub finish: String,
    pub seconds: u64,
    pub worked: String,
}

impl StatRecord {
    fn from_row(row: &Row) -> AppResult<Self> {
        let timer = Timer::from_row(row)?;
        let seconds = timer.duration_secs();
        Ok(Self {
            id: timer.id,
            company_id: timer.company_id,
            company: row.get_text("name")?.to_string(),
            start: timer.start_string(),
            finish: timer.finish_string(),
            seconds,
            worked: format_worked(seconds),
        })
    }
}

/// Build the statement and its parameters for `filter`.
fn build_query(filter: &StatFilter, today: NaiveDate) -> AppResult<(String, Vec<Field>)> {
    let mut conditions = Vec::new();
    let mut params = Vec::new();

    if let Some(id) = filter.company_id {
        conditions.push("timer.company_id = :company_id");
        params.push(Field::new("company_id", id)?);
    }
    if let Some((from, to)) = filter.period.epoch_range(today)? {
        conditions.push("timer.start >= :from AND timer.start < :to");
        params.push(Field::new("from", from)?);
        params.push(Field::new("to", to)?);
    }

    let mut sql = QUERY.to_string();
    if !conditions.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&conditions.join(" AND "));
    }
    sql.push_str(" ORDER BY timer.id DESC");
    Ok((sql, params))
}

pub fn load_records(
    db: &Database,
    filter: &StatFilter,
    today: NaiveDate,
) -> AppResult<Vec<StatRecord>> {
    let (sql, params) = build_query(filter, today)?;
    db.select(&sql, &params)?
        .iter()
        .map(StatRecord::from_row)
        .collect()
}

/// Seconds worked per company name, sorted by name.
pub fn totals(records: &[StatRecord]) -> BTreeMap<String, u64> {
    let mut out = BTreeMap::new();
    for r in records {
        *out.entry(r.company.clone()).or_insert(0) += r.seconds;
    }
    out
}

pub fn render(records: &[StatRecord], separator: char) -> String {
    let mut table = Table::new(vec![
        Column::right("id"),
        Column::left("company"),
        Column::left("start"),
        Column::left("finish"),
        Column::right("time"),
    ]);
    for r in records {
        table.add_row(vec![
            r.id.to_string(),
            r.company.clone(),
            r.start.clone(),
            r.finish.clone(),
            r.worked.clone(),
        ]);
    }

    let mut out = table.render(separator);
    out.push('\n');

    let mut sums = Table::new(vec![Column::left("total"), Column::right("time")]);
    let sums_map = totals(records);
    let grand: u64 = sums_map.values().sum();
    for (company, secs) in sums_map {
        sums.add_row(vec![company, format_worked(secs)]);
    }
    if records.len() > 1 {
        sums.add_row(vec!["all".to_string(), format_worked(grand)]);
    }
    out.push_str(&sums.render(separator));
    out
}
