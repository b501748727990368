use crate::errors::{AppError, AppResult};
use crate::models::timer::Timer;
use crate::sqlite::{Database, Field, Row};
use serde::Serialize;
use tracing::info;

const TABLE: &str = "company";
const COLUMNS: &str = "id, shortcut, name, used";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Company {
    pub id: i64,          // ⇔ company.id (0 until saved)
    pub shortcut: String, // ⇔ company.shortcut (unique, case-insensitive)
    pub name: String,     // ⇔ company.name (unique, case-insensitive)
    pub used: bool,       // ⇔ company.used (0 | 1)
}

impl Default for Company {
    fn default() -> Self {
        Self::new()
    }
}

impl Company {
    /// Unsaved, active company with empty text fields.
    pub fn new() -> Self {
        Self {
            id: 0,
            shortcut: String::new(),
            name: String::new(),
            used: true,
        }
    }

    pub fn with_data(shortcut: &str, name: &str) -> Self {
        Self {
            shortcut: shortcut.trim().to_string(),
            name: name.trim().to_string(),
            ..Self::new()
        }
    }

    pub fn from_row(row: &Row) -> AppResult<Self> {
        Ok(Self {
            id: row.get_i64("id")?,
            shortcut: row.get_text("shortcut")?.to_string(),
            name: row.get_text("name")?.to_string(),
            used: row.get_bool("used")?,
        })
    }

    pub fn valid(&self) -> bool {
        !self.shortcut.trim().is_empty() && !self.name.trim().is_empty()
    }

    /// Field list for INSERT/UPDATE. A saved company leads with its id.
    fn fields(&self) -> AppResult<Vec<Field>> {
        let mut fields = Vec::with_capacity(4);
        if self.id > 0 {
            fields.push(Field::new("id", self.id)?);
        }
        fields.push(Field::new("shortcut", self.shortcut.trim())?);
        fields.push(Field::new("name", self.name.trim())?);
        fields.push(Field::new("used", self.used)?);
        Ok(fields)
    }

    /// Insert a new company (storing its id) or update an existing one.
    pub fn save(&mut self, db: &Database) -> AppResult<()> {
        if self.shortcut.trim().is_empty() {
            return Err(AppError::EmptyValue("Shortcut"));
        }
        if self.name.trim().is_empty() {
            return Err(AppError::EmptyValue("Name"));
        }

        let fields = self.fields()?;
        if self.id == 0 {
            self.id = db.insert(TABLE, &fields)?;
            info!(id = self.id, shortcut = %self.shortcut, "company inserted");
        } else {
            if db.update(TABLE, &fields)? == 0 {
                return Err(AppError::CompanyNotFound(self.id.to_string()));
            }
            info!(id = self.id, shortcut = %self.shortcut, "company updated");
        }
        Ok(())
    }

    fn query(db: &Database, sql: &str, params: &[Field]) -> AppResult<Vec<Company>> {
        db.select(sql, params)?.iter().map(Self::from_row).collect()
    }

    /// Active companies, ordered by shortcut.
    pub fn in_use(db: &Database) -> AppResult<Vec<Company>> {
        let sql = format!("SELECT {COLUMNS} FROM {TABLE} WHERE used=1 ORDER BY shortcut");
        Self::query(db, &sql, &[])
    }

    pub fn all(db: &Database) -> AppResult<Vec<Company>> {
        let sql = format!("SELECT {COLUMNS} FROM {TABLE} ORDER BY shortcut");
        Self::query(db, &sql, &[])
    }

    pub fn find(db: &Database, id: i64) -> AppResult<Option<Company>> {
        let sql = format!("SELECT {COLUMNS} FROM {TABLE} WHERE id=:id");
        Ok(Self::query(db, &sql, &[Field::new("id", id)?])?.into_iter().next())
    }

    /// Case-insensitive through the column's NOCASE collation.
    pub fn find_by_shortcut(db: &Database, code: &str) -> AppResult<Option<Company>> {
        let sql = format!("SELECT {COLUMNS} FROM {TABLE} WHERE shortcut=:shortcut");
        let param = Field::new("shortcut", code.trim())?;
        Ok(Self::query(db, &sql, &[param])?.into_iter().next())
    }

    /// Resolve a numeric id or a shortcut.
    pub fn lookup(db: &Database, key: &str) -> AppResult<Company> {
        let key = key.trim();
        if key.is_empty() {
            return Err(AppError::EmptyValue("Company"));
        }
        let found = match key.parse::<i64>() {
            Ok(id) => match Self::find(db, id)? {
                Some(c) => Some(c),
                None => Self::find_by_shortcut(db, key)?,
            },
            Err(_) => Self::find_by_shortcut(db, key)?,
        };
        found.ok_or_else(|| AppError::CompanyNotFound(key.to_string()))
    }

    /// Flip the `used` flag and persist it.
    pub fn toggle_used(&mut self, db: &Database) -> AppResult<()> {
        self.used = !self.used;
        let fields = [Field::new("id", self.id)?, Field::new("used", self.used)?];
        if db.update(TABLE, &fields)? == 0 {
            self.used = !self.used;
            return Err(AppError::CompanyNotFound(self.id.to_string()));
        }
        info!(id = self.id, used = self.used, "company toggled");
        Ok(())
    }

    /// Delete the company. Refused while timer records point at it.
    pub fn remove(&self, db: &Database) -> AppResult<()> {
        let timers = Timer::count_for_company(db, self.id)?;
        if timers > 0 {
            return Err(AppError::CompanyInUse {
                name: self.name.clone(),
                timers,
            });
        }
        if db.delete(TABLE, "id", self.id)? == 0 {
            return Err(AppError::CompanyNotFound(self.id.to_string()));
        }
        info!(id = self.id, "company removed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::initialize::memory_db;

    fn saved(db: &Database, shortcut: &str, name: &str) -> Company {
        let mut c = Company::with_data(shortcut, name);
        c.save(db).unwrap();
        c
    }

    #[test]
    fn save_inserts_then_updates() {
        let db = memory_db().unwrap();
        let mut c = saved(&db, "bee", "Beesoft");
        assert_eq!(c.id, 1);

        c.name = "Beesoft Ltd".into();
        c.save(&db).unwrap();

        let back = Company::find(&db, 1).unwrap().unwrap();
        assert_eq!(back.name, "Beesoft Ltd");
        assert!(back.used);
        assert_eq!(Company::all(&db).unwrap().len(), 1);
    }

    #[test]
    fn empty_values_are_rejected_before_the_database() {
        let db = memory_db().unwrap();
        let mut c = Company::with_data("  ", "Acme");
        assert!(!c.valid());
        assert!(matches!(c.save(&db), Err(AppError::EmptyValue("Shortcut"))));
        assert!(db.error_code().is_none());
    }

    #[test]
    fn shortcuts_are_unique_ignoring_case() {
        let db = memory_db().unwrap();
        saved(&db, "acme", "Acme");
        let mut dup = Company::with_data("ACME", "Other");
        let err = dup.save(&db).unwrap_err();
        assert!(matches!(err, AppError::Db(ref e) if e.is_constraint_violation()));
        assert_eq!(dup.id, 0);
    }

    #[test]
    fn in_use_lists_active_companies_by_shortcut() {
        let db = memory_db().unwrap();
        saved(&db, "zed", "Zed");
        let mut b = saved(&db, "bee", "Bee");
        saved(&db, "acme", "Acme");
        b.toggle_used(&db).unwrap();

        let active: Vec<String> = Company::in_use(&db)
            .unwrap()
            .into_iter()
            .map(|c| c.shortcut)
            .collect();
        assert_eq!(active, vec!["acme", "zed"]);
        assert!(!Company::find(&db, b.id).unwrap().unwrap().used);
    }

    #[test]
    fn lookup_by_id_or_shortcut() {
        let db = memory_db().unwrap();
        let c = saved(&db, "bee", "Beesoft");
        assert_eq!(Company::lookup(&db, "1").unwrap(), c);
        assert_eq!(Company::lookup(&db, "BEE").unwrap(), c);
        assert!(matches!(
            Company::lookup(&db, "nope"),
            Err(AppError::CompanyNotFound(_))
        ));
    }

    #[test]
    fn remove_is_refused_while_timers_exist() {
        let db = memory_db().unwrap();
        let c = saved(&db, "bee", "Beesoft");
        let mut t = Timer::with_data(c.id, 100, 200);
        t.save(&db).unwrap();

        assert!(matches!(
            c.remove(&db),
            Err(AppError::CompanyInUse { timers: 1, .. })
        ));

        t.remove(&db).unwrap();
        c.remove(&db).unwrap();
        assert!(Company::find(&db, c.id).unwrap().is_none());
    }
}
