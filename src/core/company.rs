use crate::errors::{AppError, AppResult};
use crate::models::Company;
use crate::sqlite::Database;
use crate::utils::colors::{paint, used_color};
use crate::utils::table::{Column, Table};

pub struct CompanyLogic;

impl CompanyLogic {
    pub fn add(db: &Database, shortcut: &str, name: &str) -> AppResult<Company> {
        let mut company = Company::with_data(shortcut, name);
        company.save(db)?;
        Ok(company)
    }

    /// Change shortcut and/or name of the company found by id or shortcut.
    pub fn edit(
        db: &Database,
        key: &str,
        shortcut: Option<&str>,
        name: Option<&str>,
    ) -> AppResult<Company> {
        if shortcut.is_none() && name.is_none() {
            return Err(AppError::NothingToDo("give --shortcut and/or --name".into()));
        }
        if shortcut.is_some_and(|s| s.trim().is_empty()) {
            return Err(AppError::EmptyValue("Shortcut"));
        }
        if name.is_some_and(|n| n.trim().is_empty()) {
            return Err(AppError::EmptyValue("Name"));
        }

        let mut company = Company::lookup(db, key)?;
        if let Some(s) = shortcut {
            company.shortcut = s.trim().to_string();
        }
        if let Some(n) = name {
            company.name = n.trim().to_string();
        }
        company.save(db)?;
        Ok(company)
    }

    pub fn list(db: &Database, all: bool) -> AppResult<Vec<Company>> {
        if all {
            Company::all(db)
        } else {
            Company::in_use(db)
        }
    }

    pub fn toggle(db: &Database, key: &str) -> AppResult<Company> {
        let mut company = Company::lookup(db, key)?;
        company.toggle_used(db)?;
        Ok(company)
    }

    pub fn delete(db: &Database, key: &str) -> AppResult<Company> {
        let company = Company::lookup(db, key)?;
        company.remove(db)?;
        Ok(company)
    }

    pub fn render(companies: &[Company], separator: char) -> String {
        let mut table = Table::new(vec![
            Column::right("id"),
            Column::left("shortcut"),
            Column::left("name"),
            Column::left("used"),
        ]);
        for c in companies {
            table.add_row(vec![
                c.id.to_string(),
                c.shortcut.clone(),
                c.name.clone(),
                if c.used { "yes" } else { "no" }.to_string(),
            ]);
        }
        table.render(separator)
    }

    /// One-line label with the activity colour.
    pub fn label(c: &Company) -> String {
        paint(used_color(c.used), &format!("{} ({})", c.name, c.shortcut))
    }
}
