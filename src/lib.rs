//! Tour catalogue: schema-driven table access for cities and the tours departing from them.

pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod schema;
pub mod seed;
pub mod sql;
pub mod table;

pub use config::AppConfig;
pub use db::Database;
pub use error::{ConfigError, ErrorKind, TableError};
pub use table::{City, CityFields, CityTable, Route, RouteFields, RouteTable, RouteWithCity, Table};
