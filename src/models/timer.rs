use crate::errors::{AppError, AppResult};
use crate::sqlite::{Database, Field, Row};
use crate::utils::time::epoch_to_string;
use serde::Serialize;
use tracing::info;

const TABLE: &str = "timer";
const COLUMNS: &str = "id, company_id, start, finish";

/// One finished work session. `start` and `finish` are Unix seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Timer {
    pub id: i64,
    pub company_id: i64,
    pub start: i64,
    pub finish: i64,
}

impl Timer {
    pub fn with_data(company_id: i64, start: i64, finish: i64) -> Self {
        Self {
            id: 0,
            company_id,
            start,
            finish,
        }
    }

    pub fn from_row(row: &Row) -> AppResult<Self> {
        Ok(Self {
            id: row.get_i64("id")?,
            company_id: row.get_i64("company_id")?,
            start: row.get_i64("start")?,
            finish: row.get_i64("finish")?,
        })
    }

    /// A stored record: every column set.
    pub fn valid(&self) -> bool {
        self.id != 0 && self.company_id != 0 && self.start != 0 && self.finish != 0
    }

    pub fn duration_secs(&self) -> u64 {
        (self.finish - self.start).max(0) as u64
    }

    pub fn start_string(&self) -> String {
        epoch_to_string(self.start)
    }

    pub fn finish_string(&self) -> String {
        epoch_to_string(self.finish)
    }

    fn check(&self) -> AppResult<()> {
        if self.company_id == 0 {
            return Err(AppError::InvalidTimer("no company".into()));
        }
        if self.start == 0 || self.finish == 0 {
            return Err(AppError::InvalidTimer("start and finish are required".into()));
        }
        if self.finish < self.start {
            return Err(AppError::InvalidTimer("finish precedes start".into()));
        }
        Ok(())
    }

    fn fields(&self) -> AppResult<Vec<Field>> {
        let mut fields = Vec::with_capacity(4);
        if self.id > 0 {
            fields.push(Field::new("id", self.id)?);
        }
        fields.push(Field::new("company_id", self.company_id)?);
        fields.push(Field::new("start", self.start)?);
        fields.push(Field::new("finish", self.finish)?);
        Ok(fields)
    }

    pub fn save(&mut self, db: &Database) -> AppResult<()> {
        self.check()?;
        let fields = self.fields()?;
        if self.id == 0 {
            self.id = db.insert(TABLE, &fields)?;
            info!(
                id = self.id,
                company_id = self.company_id,
                secs = self.duration_secs(),
                "timer saved"
            );
        } else if db.update(TABLE, &fields)? == 0 {
            return Err(AppError::TimerNotFound(self.id));
        }
        Ok(())
    }

    pub fn remove(&self, db: &Database) -> AppResult<()> {
        if db.delete(TABLE, "id", self.id)? == 0 {
            return Err(AppError::TimerNotFound(self.id));
        }
        info!(id = self.id, "timer removed");
        Ok(())
    }

    pub fn find(db: &Database, id: i64) -> AppResult<Option<Timer>> {
        let sql = format!("SELECT {COLUMNS} FROM {TABLE} WHERE id=:id");
        let rows = db.select(&sql, &[Field::new("id", id)?])?;
        rows.first().map(Self::from_row).transpose()
    }

    pub fn count_for_company(db: &Database, company_id: i64) -> AppResult<i64> {
        Ok(db.count_where_int(TABLE, "company_id", company_id)?)
    }
}
