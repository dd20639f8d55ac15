//! Routes: tours departing from a city, validated against the city table.

use super::city::City;
use super::crud::Table;
use crate::db::Database;
use crate::error::TableError;
use crate::schema::{ColumnDef, Constraint, Entity, Fields, SqlType};
use crate::sql::{self, BindValue, ParentLabel};
use rust_decimal::Decimal;

pub const ROUTE_NAME_MAX_CHARS: usize = 255;
pub const ROUTE_DESCRIPTION_MAX_CHARS: usize = 5000;
/// Fractional digits kept by the price column.
pub const PRICE_SCALE: u32 = 2;

#[derive(Clone, Debug, PartialEq, sqlx::FromRow)]
pub struct Route {
    pub id: i32,
    pub name: String,
    pub departure_city_id: i32,
    pub description: Option<String>,
    pub base_price: Decimal,
}

impl Route {
    pub fn fields(&self) -> RouteFields {
        RouteFields {
            name: self.name.clone(),
            departure_city_id: self.departure_city_id,
            description: self.description.clone(),
            base_price: self.base_price,
        }
    }
}

/// A route row joined with the name of its departure city.
#[derive(Clone, Debug, PartialEq, sqlx::FromRow)]
pub struct RouteWithCity {
    #[sqlx(flatten)]
    pub route: Route,
    pub city_name: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RouteFields {
    pub name: String,
    pub departure_city_id: i32,
    pub description: Option<String>,
    pub base_price: Decimal,
}

impl Fields for RouteFields {
    fn values(&self) -> Vec<(&'static str, BindValue)> {
        vec![
            ("name", BindValue::text(self.name.as_str())),
            ("departure_city_id", BindValue::Int(self.departure_city_id)),
            ("description", BindValue::Text(self.description.clone())),
            ("base_price", BindValue::Decimal(self.base_price)),
        ]
    }
}

impl Entity for Route {
    type Fields = RouteFields;
    const BASE_NAME: &'static str = "route";
    const COLUMNS: &'static [ColumnDef] = &[
        ColumnDef::new("id", SqlType::Serial, &[Constraint::PrimaryKey]),
        ColumnDef::new(
            "name",
            SqlType::Varchar(ROUTE_NAME_MAX_CHARS as u32),
            &[Constraint::NotNull],
        ),
        ColumnDef::new(
            "departure_city_id",
            SqlType::Int,
            &[Constraint::NotNull, Constraint::References(City::BASE_NAME, "id")],
        ),
        ColumnDef::new("description", SqlType::Text, &[]),
        ColumnDef::new(
            "base_price",
            SqlType::Numeric(10, PRICE_SCALE as u8),
            &[Constraint::NotNull, Constraint::Check("base_price >= 0")],
        ),
    ];
}

/// Checks that need no database access. City existence is checked by [`RouteTable`].
pub fn validate_route_fields(fields: &RouteFields) -> Result<(), TableError> {
    if fields.name.trim().is_empty() {
        return Err(TableError::validation("route name must not be empty"));
    }
    if fields.name.chars().count() > ROUTE_NAME_MAX_CHARS {
        return Err(TableError::validation(format!(
            "route name is too long (at most {} characters)",
            ROUTE_NAME_MAX_CHARS
        )));
    }
    if fields.departure_city_id <= 0 {
        return Err(TableError::validation(format!(
            "invalid city id {}",
            fields.departure_city_id
        )));
    }
    if let Some(desc) = &fields.description {
        if desc.chars().count() > ROUTE_DESCRIPTION_MAX_CHARS {
            return Err(TableError::validation(format!(
                "description is too long (at most {} characters)",
                ROUTE_DESCRIPTION_MAX_CHARS
            )));
        }
    }
    if fields.base_price.is_sign_negative() && !fields.base_price.is_zero() {
        return Err(TableError::validation("price must not be negative"));
    }
    if fields.base_price.normalize().scale() > PRICE_SCALE {
        return Err(TableError::validation(format!(
            "price has more than {} decimal places",
            PRICE_SCALE
        )));
    }
    Ok(())
}

#[derive(Clone)]
pub struct RouteTable {
    table: Table<Route>,
    cities: Table<City>,
}

impl RouteTable {
    pub fn new(db: Database) -> Self {
        RouteTable {
            table: Table::new(db.clone()),
            cities: Table::new(db),
        }
    }

    pub fn table(&self) -> &Table<Route> {
        &self.table
    }

    fn city_label(&self) -> ParentLabel<'_> {
        ParentLabel {
            parent: self.cities.resolved(),
            foreign_key: "departure_city_id",
            label_column: "name",
            alias: "city_name",
        }
    }

    async fn validate(&self, fields: &RouteFields) -> Result<(), TableError> {
        validate_route_fields(fields)?;
        let exists = self
            .cities
            .count_where("id", BindValue::Int(fields.departure_city_id))
            .await?;
        if exists == 0 {
            return Err(TableError::validation(format!(
                "city {} does not exist",
                fields.departure_city_id
            )));
        }
        Ok(())
    }

    pub async fn create(&self) -> Result<(), TableError> {
        self.table.create().await
    }

    pub async fn drop(&self) -> Result<(), TableError> {
        self.table.drop().await
    }

    pub async fn insert_one(&self, fields: &RouteFields) -> Result<Route, TableError> {
        self.validate(fields).await?;
        self.table.insert_one(fields).await
    }

    pub async fn update_by_id(&self, id: i32, fields: &RouteFields) -> Result<Option<Route>, TableError> {
        self.validate(fields).await?;
        self.table.update_by_id(id, fields).await
    }

    pub async fn delete_by_id(&self, id: i32) -> Result<Option<Route>, TableError> {
        self.table.delete_by_id(id).await
    }

    pub async fn all(&self, limit: Option<u32>, offset: Option<u32>) -> Result<Vec<Route>, TableError> {
        self.table.all(limit, offset).await
    }

    pub async fn count(&self) -> Result<i64, TableError> {
        self.table.count().await
    }

    pub async fn find_by_position(&self, position: i64) -> Result<Option<Route>, TableError> {
        self.table.find_by_position(position).await
    }

    /// Routes of one city with the city's name, in route id order.
    pub async fn all_by_city_id(
        &self,
        city_id: i32,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> Result<Vec<RouteWithCity>, TableError> {
        let q = sql::select_list_with_parent(self.table.resolved(), &self.city_label(), city_id, limit, offset);
        self.table.fetch_rows(&q, "list by city").await
    }

    pub async fn count_by_city_id(&self, city_id: i32) -> Result<i64, TableError> {
        self.table
            .count_where("departure_city_id", BindValue::Int(city_id))
            .await
    }

    /// The n-th route (1-based) of a city, same order as [`RouteTable::all_by_city_id`].
    pub async fn find_route_by_position_and_city(
        &self,
        city_id: i32,
        position: i64,
    ) -> Result<Option<RouteWithCity>, TableError> {
        let Some(q) =
            sql::select_at_position_with_parent(self.table.resolved(), &self.city_label(), city_id, position)
        else {
            return Ok(None);
        };
        self.table.fetch_optional(&q, "find by position in city").await
    }
}
