//! Interactive text menu over the city and route tables.

mod cities;
pub mod prompt;
mod routes;

use crate::db::Database;
use crate::error::TableError;
use crate::seed;
use crate::table::{City, CityTable, RouteTable};
use std::io::{self, BufRead, Write};

pub const PAGE_SIZE: u32 = 10;

/// Where the menu loop goes next.
#[derive(Clone, Debug, PartialEq)]
pub enum Screen {
    Main,
    Cities { page: u32 },
    Routes { city: City, page: u32 },
    Exit,
}

pub struct Console<R, W> {
    cities: CityTable,
    routes: RouteTable,
    input: R,
    out: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(db: Database, input: R, out: W) -> Self {
        Console {
            cities: CityTable::new(db.clone()),
            routes: RouteTable::new(db),
            input,
            out,
        }
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Run until the user exits or input ends.
    pub async fn run(&mut self) -> io::Result<()> {
        let mut screen = Screen::Main;
        loop {
            let next = match screen {
                Screen::Main => self.main_menu().await,
                Screen::Cities { page } => self.cities_screen(page).await,
                Screen::Routes { city, page } => self.routes_screen(city, page).await,
                Screen::Exit => break,
            };
            screen = match next {
                Ok(s) => s,
                Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => break,
                Err(e) => return Err(e),
            };
        }
        writeln!(self.out, "\n{}", "=".repeat(60))?;
        writeln!(self.out, "Goodbye!")?;
        writeln!(self.out, "{}", "=".repeat(60))?;
        self.out.flush()
    }

    async fn main_menu(&mut self) -> io::Result<Screen> {
        writeln!(self.out, "\n=== TOUR CATALOGUE ===\n")?;
        writeln!(self.out, "Main menu:")?;
        writeln!(self.out, "  1 - Browse cities")?;
        writeln!(self.out, "  2 - Reset tables and load sample data")?;
        writeln!(self.out, "  9 - Exit")?;
        match self.ask("=> ")?.as_str() {
            "1" => Ok(Screen::Cities { page: 1 }),
            "2" => {
                let answer = self.ask("Are you sure? All data will be deleted! (yes/no): ")?;
                if prompt::is_confirmation(&answer) {
                    match seed::reset(&self.cities, &self.routes).await {
                        Ok(()) => writeln!(self.out, "\n✓ Tables recreated with sample data!\n")?,
                        Err(e) => self.report(&e)?,
                    }
                } else {
                    writeln!(self.out, "Cancelled.")?;
                }
                Ok(Screen::Main)
            }
            "9" => Ok(Screen::Exit),
            _ => {
                writeln!(self.out, "\n✗ Unknown option, try again!\n")?;
                Ok(Screen::Main)
            }
        }
    }

    /// Print `label`, read one line, return it trimmed. End of input is `UnexpectedEof`.
    fn ask(&mut self, label: &str) -> io::Result<String> {
        write!(self.out, "{}", label)?;
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
        }
        Ok(line.trim().to_string())
    }

    /// Ask for a row number. `None` when cancelled or not a number.
    fn ask_position(&mut self, label: &str) -> io::Result<Option<i64>> {
        let answer = self.ask(label)?;
        if answer == prompt::CANCEL {
            writeln!(self.out, "Cancelled.")?;
            return Ok(None);
        }
        match prompt::parse_position(&answer) {
            Some(n) => Ok(Some(n)),
            None => {
                writeln!(self.out, "✗ Not a valid number!")?;
                Ok(None)
            }
        }
    }

    fn report(&mut self, err: &TableError) -> io::Result<()> {
        writeln!(self.out, "✗ {}", err)
    }
}
