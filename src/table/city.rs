//! Cities: unique names, deletion blocked while routes depart from them.

use super::crud::Table;
use super::route::Route;
use crate::db::Database;
use crate::error::TableError;
use crate::schema::{ColumnDef, Constraint, Entity, Fields, SqlType};
use crate::sql::BindValue;

pub const CITY_NAME_MAX_CHARS: usize = 100;

#[derive(Clone, Debug, PartialEq, sqlx::FromRow)]
pub struct City {
    pub id: i32,
    pub name: String,
}

impl City {
    pub fn fields(&self) -> CityFields {
        CityFields {
            name: self.name.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CityFields {
    pub name: String,
}

impl CityFields {
    pub fn new(name: impl Into<String>) -> Self {
        CityFields { name: name.into() }
    }
}

impl Fields for CityFields {
    fn values(&self) -> Vec<(&'static str, BindValue)> {
        vec![("name", BindValue::text(self.name.as_str()))]
    }
}

impl Entity for City {
    type Fields = CityFields;
    const BASE_NAME: &'static str = "city";
    const COLUMNS: &'static [ColumnDef] = &[
        ColumnDef::new("id", SqlType::Serial, &[Constraint::PrimaryKey]),
        ColumnDef::new(
            "name",
            SqlType::Varchar(CITY_NAME_MAX_CHARS as u32),
            &[Constraint::NotNull, Constraint::Unique],
        ),
    ];
}

pub fn validate_city_name(name: &str) -> Result<(), TableError> {
    if name.trim().is_empty() {
        return Err(TableError::validation("city name must not be empty"));
    }
    if name.chars().count() > CITY_NAME_MAX_CHARS {
        return Err(TableError::validation(format!(
            "city name is too long (at most {} characters)",
            CITY_NAME_MAX_CHARS
        )));
    }
    Ok(())
}

fn duplicate_name(name: &str) -> TableError {
    TableError::validation(format!("a city named '{}' already exists", name))
}

#[derive(Clone)]
pub struct CityTable {
    table: Table<City>,
    routes: Table<Route>,
}

impl CityTable {
    pub fn new(db: Database) -> Self {
        CityTable {
            table: Table::new(db.clone()),
            routes: Table::new(db),
        }
    }

    /// The underlying generic table, for schema details and unchecked access.
    pub fn table(&self) -> &Table<City> {
        &self.table
    }

    pub async fn create(&self) -> Result<(), TableError> {
        self.table.create().await
    }

    pub async fn drop(&self) -> Result<(), TableError> {
        self.table.drop().await
    }

    pub async fn insert_one(&self, fields: &CityFields) -> Result<City, TableError> {
        validate_city_name(&fields.name)?;
        if self
            .table
            .count_where("name", BindValue::text(fields.name.as_str()))
            .await?
            > 0
        {
            return Err(duplicate_name(&fields.name));
        }
        self.table.insert_one(fields).await
    }

    pub async fn update_by_id(&self, id: i32, fields: &CityFields) -> Result<Option<City>, TableError> {
        validate_city_name(&fields.name)?;
        if self
            .table
            .count_where_except("name", BindValue::text(fields.name.as_str()), id)
            .await?
            > 0
        {
            return Err(duplicate_name(&fields.name));
        }
        self.table.update_by_id(id, fields).await
    }

    /// Refused with [`TableError::Dependents`] while any route departs from the city.
    pub async fn delete_by_id(&self, id: i32) -> Result<Option<City>, TableError> {
        let count = self
            .routes
            .count_where("departure_city_id", BindValue::Int(id))
            .await?;
        if count > 0 {
            tracing::warn!(city_id = id, routes = count, "city delete blocked by routes");
            return Err(TableError::Dependents {
                dependent: "route",
                count,
            });
        }
        self.table.delete_by_id(id).await
    }

    pub async fn all(&self, limit: Option<u32>, offset: Option<u32>) -> Result<Vec<City>, TableError> {
        self.table.all(limit, offset).await
    }

    pub async fn count(&self) -> Result<i64, TableError> {
        self.table.count().await
    }

    pub async fn find_by_position(&self, position: i64) -> Result<Option<City>, TableError> {
        self.table.find_by_position(position).await
    }
}
