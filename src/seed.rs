//! Drop, recreate and fill the tables with sample cities and tours.

use crate::error::TableError;
use crate::table::{CityFields, CityTable, RouteFields, RouteTable};
use rust_decimal::Decimal;

const SAMPLE_CITIES: &[&str] = &["Москва", "Санкт-Петербург", "Казань", "Сочи"];

/// (route name, index into SAMPLE_CITIES, description, base price in whole units)
const SAMPLE_ROUTES: &[(&str, usize, &str, u32)] = &[
    ("Золотое кольцо", 0, "Классический маршрут по древним городам России", 15000),
    ("Москва - Питер", 0, "Две столицы за одну поездку", 12000),
    ("Белые ночи", 1, "Романтический тур в период белых ночей", 18000),
    ("Казанский кремль", 2, "Исторический центр Татарстана", 8000),
    ("Олимпийский Сочи", 3, "Посещение олимпийских объектов", 20000),
];

/// Create both tables if they are missing. Cities first, routes reference them.
pub async fn init(cities: &CityTable, routes: &RouteTable) -> Result<(), TableError> {
    cities.create().await?;
    routes.create().await
}

/// Drop both tables. Routes first, they depend on cities.
pub async fn drop_all(cities: &CityTable, routes: &RouteTable) -> Result<(), TableError> {
    routes.drop().await?;
    cities.drop().await
}

/// Insert the sample data through the checked tables.
pub async fn insert_sample_data(cities: &CityTable, routes: &RouteTable) -> Result<(), TableError> {
    let mut ids = Vec::with_capacity(SAMPLE_CITIES.len());
    for name in SAMPLE_CITIES {
        ids.push(cities.insert_one(&CityFields::new(*name)).await?.id);
    }
    for (name, city, description, price) in SAMPLE_ROUTES {
        routes
            .insert_one(&RouteFields {
                name: (*name).to_string(),
                departure_city_id: ids[*city],
                description: Some((*description).to_string()),
                base_price: Decimal::from(*price),
            })
            .await?;
    }
    tracing::info!(
        cities = SAMPLE_CITIES.len(),
        routes = SAMPLE_ROUTES.len(),
        "sample data inserted"
    );
    Ok(())
}

/// Drop, recreate and seed. Used by the console's reset option and `--reset`.
pub async fn reset(cities: &CityTable, routes: &RouteTable) -> Result<(), TableError> {
    drop_all(cities, routes).await?;
    init(cities, routes).await?;
    insert_sample_data(cities, routes).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_routes_point_at_sample_cities() {
        for (name, city, _, _) in SAMPLE_ROUTES {
            assert!(*city < SAMPLE_CITIES.len(), "{} has no city", name);
        }
    }
}
