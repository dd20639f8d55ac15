//! Routes of one city: paged listing with add, edit and delete.

use super::prompt::{self, CANCEL};
use super::{Console, Screen, PAGE_SIZE};
use crate::table::{City, RouteFields, RouteWithCity};
use rust_decimal::Decimal;
use std::io::{self, BufRead, Write};

const DESCRIPTION_WIDTH: usize = 30;

enum Answer<T> {
    Keep,
    Cancel,
    Value(T),
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub(super) async fn routes_screen(&mut self, city: City, page: u32) -> io::Result<Screen> {
        let total = match self.routes.count_by_city_id(city.id).await {
            Ok(n) => n,
            Err(e) => {
                self.report(&e)?;
                0
            }
        };
        let pages = prompt::total_pages(total, PAGE_SIZE);
        let page = prompt::clamp_page(page, pages);
        let rows = match self
            .routes
            .all_by_city_id(city.id, Some(PAGE_SIZE), Some(prompt::page_offset(page, PAGE_SIZE)))
            .await
        {
            Ok(rows) => rows,
            Err(e) => {
                self.report(&e)?;
                Vec::new()
            }
        };

        writeln!(self.out, "\n{}", "=".repeat(80))?;
        writeln!(self.out, "ROUTES FROM: {}", city.name)?;
        writeln!(self.out, "{}", "=".repeat(80))?;
        writeln!(self.out, "Page {} of {} | Total: {}", page, pages, total)?;
        writeln!(self.out, "{}", "-".repeat(80))?;
        writeln!(
            self.out,
            "{:>3} | {:<30} | {:<30} | {:>10}",
            "#", "Name", "Description", "Price"
        )?;
        writeln!(self.out, "{}", "-".repeat(80))?;
        if rows.is_empty() {
            writeln!(self.out, "  No routes from this city yet.")?;
        }
        for (idx, row) in rows.iter().enumerate() {
            let desc = match row.route.description.as_deref() {
                Some(d) if !d.is_empty() => prompt::truncate(d, DESCRIPTION_WIDTH),
                _ => "No description".to_string(),
            };
            writeln!(
                self.out,
                "{:>3} | {:<30} | {:<30} | {:>10.2}",
                idx + 1,
                row.route.name,
                desc,
                row.route.base_price
            )?;
        }
        writeln!(self.out, "{}", "-".repeat(80))?;
        writeln!(self.out, "\nActions:")?;
        writeln!(self.out, "  0 - Back to main menu")?;
        writeln!(self.out, "  1 - Back to cities")?;
        writeln!(self.out, "  7 - Add a route")?;
        writeln!(self.out, "  8 - Edit a route")?;
        writeln!(self.out, "  9 - Delete a route")?;
        if pages > 1 {
            writeln!(self.out, "  [ - Previous page")?;
            writeln!(self.out, "  ] - Next page")?;
        }
        writeln!(self.out, "  exit - Quit")?;

        let offset = i64::from(prompt::page_offset(page, PAGE_SIZE));
        loop {
            match self.ask("=> ")?.as_str() {
                "7" => {
                    self.add_route(&city).await?;
                    return Ok(Screen::Routes { city, page });
                }
                "8" => {
                    self.edit_route(&city, offset).await?;
                    return Ok(Screen::Routes { city, page });
                }
                "9" => {
                    self.delete_route(&city, offset).await?;
                    return Ok(Screen::Routes { city, page });
                }
                "[" if page > 1 => return Ok(Screen::Routes { city, page: page - 1 }),
                "]" if page < pages => return Ok(Screen::Routes { city, page: page + 1 }),
                "1" => return Ok(Screen::Cities { page: 1 }),
                "0" => return Ok(Screen::Main),
                "exit" => return Ok(Screen::Exit),
                _ => writeln!(self.out, "✗ Unknown action, try again!")?,
            }
        }
    }

    async fn pick_route(&mut self, city: &City, offset: i64, label: &str) -> io::Result<Option<RouteWithCity>> {
        let Some(row) = self.ask_position(label)? else {
            return Ok(None);
        };
        // Row numbers on screen restart at 1 on every page.
        let Some(position) = prompt::absolute_position(offset, row) else {
            writeln!(self.out, "✗ No route with that number!")?;
            return Ok(None);
        };
        match self.routes.find_route_by_position_and_city(city.id, position).await {
            Ok(Some(route)) => Ok(Some(route)),
            Ok(None) => {
                writeln!(self.out, "✗ No route with that number!")?;
                Ok(None)
            }
            Err(e) => {
                self.report(&e)?;
                Ok(None)
            }
        }
    }

    /// Free-text answer: `0` cancels, empty keeps the current value.
    fn ask_text(&mut self, label: &str) -> io::Result<Answer<String>> {
        let answer = self.ask(label)?;
        Ok(if answer == CANCEL {
            Answer::Cancel
        } else if answer.is_empty() {
            Answer::Keep
        } else {
            Answer::Value(answer)
        })
    }

    fn ask_price(&mut self, label: &str) -> io::Result<Answer<Decimal>> {
        Ok(match self.ask_text(label)? {
            Answer::Cancel => Answer::Cancel,
            Answer::Keep => Answer::Keep,
            Answer::Value(text) => match prompt::parse_price(&text) {
                Ok(price) => Answer::Value(price),
                Err(msg) => {
                    writeln!(self.out, "✗ {}!", msg)?;
                    Answer::Cancel
                }
            },
        })
    }

    async fn add_route(&mut self, city: &City) -> io::Result<()> {
        writeln!(self.out, "\n--- NEW ROUTE ---")?;
        let mut name = self.ask("Route name (0 - cancel): ")?;
        while name.is_empty() {
            name = self.ask("Name must not be empty! Route name (0 - cancel): ")?;
        }
        if name == CANCEL {
            writeln!(self.out, "Cancelled.")?;
            return Ok(());
        }
        let description = match self.ask_text("Description (optional, 0 - cancel): ")? {
            Answer::Cancel => {
                writeln!(self.out, "Cancelled.")?;
                return Ok(());
            }
            Answer::Keep => None,
            Answer::Value(d) => Some(d),
        };
        let base_price = match self.ask_price("Base price (0 - cancel): ")? {
            Answer::Value(p) => p,
            Answer::Cancel | Answer::Keep => {
                writeln!(self.out, "Cancelled.")?;
                return Ok(());
            }
        };
        let fields = RouteFields {
            name,
            departure_city_id: city.id,
            description,
            base_price,
        };
        match self.routes.insert_one(&fields).await {
            Ok(route) => writeln!(self.out, "\n✓ Route '{}' added!\n", route.name),
            Err(e) => self.report(&e),
        }
    }

    async fn edit_route(&mut self, city: &City, offset: i64) -> io::Result<()> {
        writeln!(self.out, "\n--- EDIT ROUTE ---")?;
        let Some(found) = self
            .pick_route(city, offset, "Row number of the route to edit (0 - cancel): ")
            .await?
        else {
            return Ok(());
        };
        let route = found.route;
        let mut fields = route.fields();

        writeln!(self.out, "\nCurrent name: {}", route.name)?;
        match self.ask_text("New name (Enter - keep, 0 - cancel): ")? {
            Answer::Cancel => return self.cancelled(),
            Answer::Keep => {}
            Answer::Value(v) => fields.name = v,
        }

        writeln!(
            self.out,
            "\nCurrent description: {}",
            route.description.as_deref().unwrap_or("none")
        )?;
        match self.ask_text("New description (Enter - keep, 0 - cancel): ")? {
            Answer::Cancel => return self.cancelled(),
            Answer::Keep => {}
            Answer::Value(v) => fields.description = Some(v),
        }

        writeln!(self.out, "\nCurrent price: {:.2}", route.base_price)?;
        match self.ask_price("New price (Enter - keep, 0 - cancel): ")? {
            Answer::Cancel => return self.cancelled(),
            Answer::Keep => {}
            Answer::Value(v) => fields.base_price = v,
        }

        match self.routes.update_by_id(route.id, &fields).await {
            Ok(Some(_)) => writeln!(self.out, "\n✓ Route updated!\n"),
            Ok(None) => writeln!(self.out, "✗ The route no longer exists."),
            Err(e) => self.report(&e),
        }
    }

    async fn delete_route(&mut self, city: &City, offset: i64) -> io::Result<()> {
        writeln!(self.out, "\n--- DELETE ROUTE ---")?;
        let Some(found) = self
            .pick_route(city, offset, "Row number of the route to delete (0 - cancel): ")
            .await?
        else {
            return Ok(());
        };
        writeln!(self.out, "\nDelete route '{}'?", found.route.name)?;
        let answer = self.ask("Confirm (yes/no): ")?;
        if !prompt::is_confirmation(&answer) {
            writeln!(self.out, "Deletion cancelled.")?;
            return Ok(());
        }
        match self.routes.delete_by_id(found.route.id).await {
            Ok(Some(route)) => writeln!(self.out, "\n✓ Route '{}' deleted!\n", route.name),
            Ok(None) => writeln!(self.out, "✗ The route no longer exists."),
            Err(e) => self.report(&e),
        }
    }

    fn cancelled(&mut self) -> io::Result<()> {
        writeln!(self.out, "Cancelled.")
    }
}

