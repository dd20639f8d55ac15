//! Table access: a generic CRUD engine and the city / route tables built on it.

mod city;
mod crud;
mod route;

pub use city::{validate_city_name, City, CityFields, CityTable, CITY_NAME_MAX_CHARS};
pub use crud::Table;
pub use route::{
    validate_route_fields, Route, RouteFields, RouteTable, RouteWithCity, ROUTE_DESCRIPTION_MAX_CHARS,
    ROUTE_NAME_MAX_CHARS, PRICE_SCALE,
};
