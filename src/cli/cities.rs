//! City list screen: paging, add, rename, delete, and entry into a city's routes.

use super::prompt::{self, CANCEL};
use super::{Console, Screen, PAGE_SIZE};
use crate::table::{City, CityFields};
use std::io::{self, BufRead, Write};

impl<R: BufRead, W: Write> Console<R, W> {
    pub(super) async fn cities_screen(&mut self, page: u32) -> io::Result<Screen> {
        let total = match self.cities.count().await {
            Ok(n) => n,
            Err(e) => {
                self.report(&e)?;
                0
            }
        };
        let pages = prompt::total_pages(total, PAGE_SIZE);
        let page = prompt::clamp_page(page, pages);
        let rows = match self
            .cities
            .all(Some(PAGE_SIZE), Some(prompt::page_offset(page, PAGE_SIZE)))
            .await
        {
            Ok(rows) => rows,
            Err(e) => {
                self.report(&e)?;
                Vec::new()
            }
        };

        writeln!(self.out, "\n{}", "=".repeat(60))?;
        writeln!(self.out, "CITIES")?;
        writeln!(self.out, "{}", "=".repeat(60))?;
        writeln!(self.out, "Page {} of {} | Total: {}", page, pages, total)?;
        writeln!(self.out, "{}", "-".repeat(60))?;
        writeln!(self.out, "{:>3} | {:<50}", "#", "City")?;
        writeln!(self.out, "{}", "-".repeat(60))?;
        for (idx, city) in rows.iter().enumerate() {
            writeln!(self.out, "{:>3} | {:<50}", idx + 1, city.name)?;
        }
        writeln!(self.out, "{}", "-".repeat(60))?;
        writeln!(self.out, "\nActions:")?;
        writeln!(self.out, "  0 - Back to main menu")?;
        writeln!(self.out, "  3 - Add a city")?;
        writeln!(self.out, "  4 - Edit a city")?;
        writeln!(self.out, "  5 - Delete a city")?;
        writeln!(self.out, "  6 - Show routes of a city")?;
        if pages > 1 {
            writeln!(self.out, "  [ - Previous page")?;
            writeln!(self.out, "  ] - Next page")?;
        }
        writeln!(self.out, "  9 - Exit")?;

        let offset = i64::from(prompt::page_offset(page, PAGE_SIZE));
        match self.ask("=> ")?.as_str() {
            "0" => Ok(Screen::Main),
            "9" => Ok(Screen::Exit),
            "3" => {
                self.add_city().await?;
                Ok(Screen::Cities { page: 1 })
            }
            "4" => {
                self.edit_city(offset).await?;
                Ok(Screen::Cities { page })
            }
            "5" => {
                self.delete_city(offset).await?;
                Ok(Screen::Cities { page })
            }
            "6" => match self.pick_city(offset, "\nEnter the city row number (0 - cancel): ").await? {
                Some(city) => Ok(Screen::Routes { city, page: 1 }),
                None => Ok(Screen::Cities { page }),
            },
            "[" if page > 1 => Ok(Screen::Cities { page: page - 1 }),
            "]" if page < pages => Ok(Screen::Cities { page: page + 1 }),
            _ => {
                writeln!(self.out, "\n✗ Unknown action, try again!\n")?;
                Ok(Screen::Cities { page })
            }
        }
    }

    /// Ask for a row number on the current page and look the city up.
    async fn pick_city(&mut self, offset: i64, label: &str) -> io::Result<Option<City>> {
        let Some(row) = self.ask_position(label)? else {
            return Ok(None);
        };
        // Row numbers on screen restart at 1 on every page.
        let Some(position) = prompt::absolute_position(offset, row) else {
            writeln!(self.out, "✗ No city with that number!")?;
            return Ok(None);
        };
        match self.cities.find_by_position(position).await {
            Ok(Some(city)) => Ok(Some(city)),
            Ok(None) => {
                writeln!(self.out, "✗ No city with that number!")?;
                Ok(None)
            }
            Err(e) => {
                self.report(&e)?;
                Ok(None)
            }
        }
    }

    async fn add_city(&mut self) -> io::Result<()> {
        writeln!(self.out, "\n--- NEW CITY ---")?;
        let mut name = self.ask("City name (0 - cancel): ")?;
        while name.is_empty() {
            name = self.ask("Name must not be empty! City name (0 - cancel): ")?;
        }
        if name == CANCEL {
            writeln!(self.out, "Cancelled.")?;
            return Ok(());
        }
        match self.cities.insert_one(&CityFields::new(name)).await {
            Ok(city) => writeln!(self.out, "\n✓ City '{}' added!\n", city.name),
            Err(e) => self.report(&e),
        }
    }

    async fn edit_city(&mut self, offset: i64) -> io::Result<()> {
        writeln!(self.out, "\n--- EDIT CITY ---")?;
        let Some(city) = self
            .pick_city(offset, "Row number of the city to edit (0 - cancel): ")
            .await?
        else {
            return Ok(());
        };
        writeln!(self.out, "\nCurrent name: {}", city.name)?;
        let answer = self.ask("New name (0 - cancel, Enter - keep): ")?;
        if answer == CANCEL {
            writeln!(self.out, "Cancelled.")?;
            return Ok(());
        }
        let mut fields = city.fields();
        if !answer.is_empty() {
            fields.name = answer;
        }
        match self.cities.update_by_id(city.id, &fields).await {
            Ok(Some(_)) => writeln!(self.out, "\n✓ City updated!\n"),
            Ok(None) => writeln!(self.out, "✗ The city no longer exists."),
            Err(e) => self.report(&e),
        }
    }

    async fn delete_city(&mut self, offset: i64) -> io::Result<()> {
        writeln!(self.out, "\n--- DELETE CITY ---")?;
        let Some(city) = self
            .pick_city(offset, "Row number of the city to delete (0 - cancel): ")
            .await?
        else {
            return Ok(());
        };
        writeln!(self.out, "\nDelete city '{}'?", city.name)?;
        let answer = self.ask("Confirm (yes/no): ")?;
        if !prompt::is_confirmation(&answer) {
            writeln!(self.out, "Deletion cancelled.")?;
            return Ok(());
        }
        match self.cities.delete_by_id(city.id).await {
            Ok(Some(_)) => writeln!(self.out, "\n✓ City '{}' deleted!\n", city.name),
            Ok(None) => writeln!(self.out, "✗ The city no longer exists."),
            Err(e) => self.report(&e),
        }
    }
}
