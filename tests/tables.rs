// Integration tests require a real database.
// Run with: DATABASE_URL=postgres://... cargo test -- --ignored

use rust_decimal::Decimal;
use sqlx::postgres::PgPoolOptions;
use tour_catalog::seed;
use tour_catalog::{CityFields, CityTable, Database, ErrorKind, RouteFields, RouteTable};

struct Fixture {
    cities: CityTable,
    routes: RouteTable,
    db: Database,
}

impl Fixture {
    /// Fresh tables under a prefix private to the calling test.
    async fn new(name: &str) -> Self {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = PgPoolOptions::new()
            .max_connections(1)
            .connect(&url)
            .await
            .expect("pool creation failed");
        let prefix = format!("it_{}_{}_", std::process::id(), name);
        let db = Database::from_pool(pool, &prefix);
        let cities = CityTable::new(db.clone());
        let routes = RouteTable::new(db.clone());
        seed::drop_all(&cities, &routes).await.expect("drop failed");
        seed::init(&cities, &routes).await.expect("create failed");
        Fixture { cities, routes, db }
    }

    async fn teardown(self) {
        seed::drop_all(&self.cities, &self.routes).await.expect("drop failed");
        self.db.close().await;
    }

    async fn city(&self, name: &str) -> i32 {
        self.cities
            .insert_one(&CityFields::new(name))
            .await
            .expect("city insert failed")
            .id
    }
}

fn price(s: &str) -> Decimal {
    s.parse().expect("decimal literal")
}

fn tour(city_id: i32, base_price: &str) -> RouteFields {
    RouteFields {
        name: "Тур".into(),
        departure_city_id: city_id,
        description: Some(String::new()),
        base_price: price(base_price),
    }
}

#[tokio::test]
#[ignore = "requires database"]
async fn duplicate_city_name_is_rejected() {
    let f = Fixture::new("dup").await;
    f.city("A").await;

    let err = f.cities.insert_one(&CityFields::new("A")).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(err.to_string().contains("already exists"));
    assert_eq!(f.cities.count().await.unwrap(), 1);

    // Case-sensitive comparison.
    f.city("a").await;
    assert_eq!(f.cities.count().await.unwrap(), 2);
    f.teardown().await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn over_long_city_name_creates_nothing() {
    let f = Fixture::new("long").await;
    let err = f
        .cities
        .insert_one(&CityFields::new("x".repeat(101)))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(f.cities.count().await.unwrap(), 0);

    f.city(&"ы".repeat(100)).await;
    assert_eq!(f.cities.count().await.unwrap(), 1);
    f.teardown().await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn city_rename_checks_other_rows_only() {
    let f = Fixture::new("rename").await;
    let kazan = f.city("Казань").await;
    f.city("Сочи").await;

    // Keeping its own name is not a duplicate.
    let same = f
        .cities
        .update_by_id(kazan, &CityFields::new("Казань"))
        .await
        .unwrap();
    assert!(same.is_some());

    let err = f
        .cities
        .update_by_id(kazan, &CityFields::new("Сочи"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    let renamed = f
        .cities
        .update_by_id(kazan, &CityFields::new("Казань-2"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(renamed.name, "Казань-2");

    assert!(f
        .cities
        .update_by_id(9999, &CityFields::new("Нигде"))
        .await
        .unwrap()
        .is_none());
    f.teardown().await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn moscow_kazan_scenario() {
    let f = Fixture::new("scenario").await;
    let moscow = f.city("Москва").await;
    let kazan = f.city("Казань").await;

    let route = f.routes.insert_one(&tour(moscow, "15000.00")).await.unwrap();
    assert_eq!(route.base_price, price("15000"));
    assert_eq!(f.routes.count_by_city_id(moscow).await.unwrap(), 1);
    assert_eq!(f.routes.count_by_city_id(kazan).await.unwrap(), 0);

    let err = f.cities.delete_by_id(moscow).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Dependents);
    assert!(err.to_string().contains(" 1 route"));
    assert_eq!(f.cities.count().await.unwrap(), 2);
    assert_eq!(f.routes.count().await.unwrap(), 1);

    assert!(f.routes.delete_by_id(route.id).await.unwrap().is_some());
    assert!(f.cities.delete_by_id(moscow).await.unwrap().is_some());
    assert_eq!(f.cities.count().await.unwrap(), 1);
    f.teardown().await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn route_needs_an_existing_city() {
    let f = Fixture::new("fk").await;
    let moscow = f.city("Москва").await;

    let err = f.routes.insert_one(&tour(moscow + 100, "10")).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(err.to_string().contains("does not exist"));

    let err = f.routes.insert_one(&tour(0, "10")).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(f.routes.count().await.unwrap(), 0);
    f.teardown().await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn price_zero_is_fine_negative_is_not() {
    let f = Fixture::new("price").await;
    let sochi = f.city("Сочи").await;

    assert_eq!(
        f.routes.insert_one(&tour(sochi, "-0.01")).await.unwrap_err().kind(),
        ErrorKind::Validation
    );
    let free = f.routes.insert_one(&tour(sochi, "0")).await.unwrap();
    assert!(free.base_price.is_zero());

    let err = f
        .routes
        .update_by_id(free.id, &RouteFields { base_price: price("-5"), ..free.fields() })
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    let stored = f.routes.find_by_position(1).await.unwrap().unwrap();
    assert!(stored.base_price.is_zero());

    let updated = f
        .routes
        .update_by_id(free.id, &RouteFields { base_price: price("990.5"), ..free.fields() })
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.base_price, price("990.50"));
    f.teardown().await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn price_with_extra_decimal_places_is_rejected_not_rounded() {
    let f = Fixture::new("scale").await;
    let kazan = f.city("Казань").await;

    let err = f.routes.insert_one(&tour(kazan, "12.345")).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(err.to_string().contains("decimal places"));
    assert_eq!(f.routes.count().await.unwrap(), 0);

    let stored = f.routes.insert_one(&tour(kazan, "12.35")).await.unwrap();
    assert_eq!(stored.base_price, price("12.35"));
    assert_eq!(stored.base_price.to_string(), "12.35");
    f.teardown().await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn find_by_position_bounds() {
    let f = Fixture::new("position").await;
    let names = ["Москва", "Санкт-Петербург", "Казань"];
    for n in names {
        f.city(n).await;
    }

    for (i, n) in names.iter().enumerate() {
        let city = f.cities.find_by_position(i as i64 + 1).await.unwrap().unwrap();
        assert_eq!(city.name, *n);
    }
    assert!(f.cities.find_by_position(0).await.unwrap().is_none());
    assert!(f.cities.find_by_position(-2).await.unwrap().is_none());
    assert!(f.cities.find_by_position(4).await.unwrap().is_none());
    f.teardown().await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn pages_reconstruct_the_full_listing() {
    let f = Fixture::new("pages").await;
    for i in 0..23 {
        f.city(&format!("Город {:02}", i)).await;
    }
    let full = f.cities.all(None, None).await.unwrap();
    assert_eq!(full.len(), 23);
    assert!(full.windows(2).all(|w| w[0].id < w[1].id));

    let mut paged = Vec::new();
    let mut offset = 0;
    loop {
        let page = f.cities.all(Some(5), Some(offset)).await.unwrap();
        if page.is_empty() {
            break;
        }
        assert!(page.len() <= 5);
        paged.extend(page);
        offset += 5;
    }
    assert_eq!(paged, full);

    assert_eq!(f.cities.all(Some(5), None).await.unwrap(), full[..5].to_vec());
    f.teardown().await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn city_scoped_route_listing() {
    let f = Fixture::new("scoped").await;
    let moscow = f.city("Москва").await;
    let spb = f.city("Санкт-Петербург").await;
    for i in 0..3 {
        let mut t = tour(moscow, &format!("{}00", i));
        t.name = format!("Москва {}", i);
        f.routes.insert_one(&t).await.unwrap();
    }
    f.routes.insert_one(&tour(spb, "1")).await.unwrap();

    let rows = f.routes.all_by_city_id(moscow, None, None).await.unwrap();
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|r| r.city_name == "Москва"));
    assert!(rows.windows(2).all(|w| w[0].route.id < w[1].route.id));

    let second_page = f.routes.all_by_city_id(moscow, Some(2), Some(2)).await.unwrap();
    assert_eq!(second_page.len(), 1);
    assert_eq!(second_page[0].route.name, "Москва 2");

    let second = f
        .routes
        .find_route_by_position_and_city(moscow, 2)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(second.route.name, "Москва 1");
    assert!(f
        .routes
        .find_route_by_position_and_city(moscow, 0)
        .await
        .unwrap()
        .is_none());
    assert!(f
        .routes
        .find_route_by_position_and_city(spb, 2)
        .await
        .unwrap()
        .is_none());
    f.teardown().await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn reset_loads_sample_data() {
    let f = Fixture::new("seed").await;
    seed::reset(&f.cities, &f.routes).await.unwrap();
    assert_eq!(f.cities.count().await.unwrap(), 4);
    assert_eq!(f.routes.count().await.unwrap(), 5);
    let moscow = f.cities.find_by_position(1).await.unwrap().unwrap();
    assert_eq!(moscow.name, "Москва");
    assert_eq!(f.routes.count_by_city_id(moscow.id).await.unwrap(), 2);
    f.teardown().await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn database_rejection_is_reported_as_execution_error() {
    let f = Fixture::new("exec").await;
    let city = f.city("Москва").await;
    // NUMERIC(10, 2) overflows past 99,999,999.99; only the database knows that.
    let err = f.routes.insert_one(&tour(city, "1000000000000")).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Execution);
    assert_eq!(f.routes.count().await.unwrap(), 0);
    f.teardown().await;
}
