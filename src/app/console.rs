// src/app/console.rs
//
// Line-oriented stand-in for the movie screen: the table, search box,
// pager, add/edit dialogs, delete action and download menu.
//
// RULES:
// - Every action goes through the application commands
// - Errors are printed, never swallowed; the loop keeps running

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, Lines};

use crate::application::{self, AppState, CatalogPageDto, ErrorResponse, MovieFormDto};
use crate::error::AppResult;

const HELP: &str = "\
Commands:
  list              show the current page
  refresh           reload movies from the server
  search <term>     filter by name (empty term clears)
  page <n>          go to page n
  add               add a movie
  edit <id>         edit a movie
  delete <id>       delete a movie
  export text|csv   save the filtered list
  help              show this help
  quit              exit
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    List,
    Refresh,
    Search(String),
    Page(usize),
    Add,
    Edit(String),
    Delete(String),
    Export(String),
    Help,
    Quit,
}

impl ConsoleCommand {
    /// `Ok(None)` for a blank line
    pub fn parse(line: &str) -> Result<Option<Self>, String> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        let command = match verb.to_ascii_lowercase().as_str() {
            "list" | "ls" => ConsoleCommand::List,
            "refresh" => ConsoleCommand::Refresh,
            "search" => ConsoleCommand::Search(rest.to_string()),
            "page" => ConsoleCommand::Page(
                rest.parse()
                    .map_err(|_| format!("Not a page number: {:?}", rest))?,
            ),
            "add" => ConsoleCommand::Add,
            "edit" => ConsoleCommand::Edit(required_arg(verb, rest)?),
            "delete" | "rm" => ConsoleCommand::Delete(required_arg(verb, rest)?),
            "export" | "download" => ConsoleCommand::Export(required_arg(verb, rest)?),
            "help" | "?" => ConsoleCommand::Help,
            "quit" | "exit" => ConsoleCommand::Quit,
            other => return Err(format!("Unknown command: {} (try \"help\")", other)),
        };

        Ok(Some(command))
    }
}

fn required_arg(verb: &str, rest: &str) -> Result<String, String> {
    if rest.is_empty() {
        Err(format!("Usage: {} <argument>", verb))
    } else {
        Ok(rest.to_string())
    }
}

/// Render one page of the table
pub fn render_page(view: &CatalogPageDto) -> String {
    let mut out = format!(
        "{:<10} {:<40} {:>16} {:>20}\n",
        "Id", "Movie Name", "Duration (hours)", "Rating (out of 10)"
    );

    if view.movies.is_empty() {
        out.push_str("  (no movies)\n");
    }

    for movie in &view.movies {
        out.push_str(&format!(
            "{:<10} {:<40} {:>16} {:>20}\n",
            movie.id.as_deref().unwrap_or("-"),
            movie.name,
            movie.duration,
            movie.rating
        ));
    }

    out.push_str(&format!(
        "Page {}/{} | {} of {} movies",
        view.page,
        view.page_count.max(1),
        view.filtered_count,
        view.total_count
    ));
    if !view.search_term.is_empty() {
        out.push_str(&format!(" | search: {:?}", view.search_term));
    }
    out.push('\n');
    out
}

pub struct Console<R, W> {
    lines: Lines<R>,
    output: W,
}

impl<R, W> Console<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(input: R, output: W) -> Self {
        Self {
            lines: input.lines(),
            output,
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Load the catalog, then process commands until `quit` or end of input
    pub async fn run(&mut self, state: &AppState) -> AppResult<()> {
        match application::refresh_movies(state).await {
            Ok(view) => self.write(&render_page(&view)).await?,
            Err(e) => self.report(&e).await?,
        }

        loop {
            self.write("> ").await?;
            let Some(line) = self.lines.next_line().await? else {
                break;
            };

            let command = match ConsoleCommand::parse(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(message) => {
                    self.write(&format!("{}\n", message)).await?;
                    continue;
                }
            };

            if command == ConsoleCommand::Quit {
                break;
            }
            self.dispatch(state, command).await?;
        }

        self.output.flush().await?;
        Ok(())
    }

    async fn dispatch(&mut self, state: &AppState, command: ConsoleCommand) -> AppResult<()> {
        match command {
            ConsoleCommand::List => {
                let view = application::current_movies(state);
                self.write(&render_page(&view)).await
            }
            ConsoleCommand::Refresh => match application::refresh_movies(state).await {
                Ok(view) => self.write(&render_page(&view)).await,
                Err(e) => self.report(&e).await,
            },
            ConsoleCommand::Search(term) => {
                let view = application::search_movies(state, &term);
                self.write(&render_page(&view)).await
            }
            ConsoleCommand::Page(page) => {
                let view = application::go_to_page(state, page);
                self.write(&render_page(&view)).await
            }
            ConsoleCommand::Add => {
                let Some(form) = self.read_form(&MovieFormDto::default()).await? else {
                    return self.write("Cancelled\n").await;
                };
                match application::create_movie(state, form).await {
                    Ok(movie) => {
                        self.write(&format!("Added {:?}\n", movie.name)).await?;
                        let view = application::current_movies(state);
                        self.write(&render_page(&view)).await
                    }
                    Err(e) => self.report(&e).await,
                }
            }
            ConsoleCommand::Edit(id) => {
                let current = match application::get_movie_form(state, &id) {
                    Ok(form) => form,
                    Err(e) => return self.report(&e).await,
                };
                let Some(form) = self.read_form(&current).await? else {
                    return self.write("Cancelled\n").await;
                };
                match application::update_movie(state, &id, form).await {
                    Ok(movie) => {
                        self.write(&format!("Updated {:?}\n", movie.name)).await?;
                        let view = application::current_movies(state);
                        self.write(&render_page(&view)).await
                    }
                    Err(e) => self.report(&e).await,
                }
            }
            ConsoleCommand::Delete(id) => match application::delete_movie(state, &id).await {
                Ok(()) => {
                    self.write(&format!("Deleted {}\n", id)).await?;
                    let view = application::current_movies(state);
                    self.write(&render_page(&view)).await
                }
                Err(e) => self.report(&e).await,
            },
            ConsoleCommand::Export(format) => match application::export_movies(state, &format) {
                Ok(result) => {
                    self.write(&format!(
                        "Saved {} movies to {}\n",
                        result.movie_count, result.path
                    ))
                    .await
                }
                Err(e) => self.report(&e).await,
            },
            ConsoleCommand::Help => self.write(HELP).await,
            ConsoleCommand::Quit => Ok(()),
        }
    }

    /// Prompt for the three dialog fields; an empty answer keeps the current value.
    /// `None` when input ends mid-dialog.
    async fn read_form(&mut self, current: &MovieFormDto) -> AppResult<Option<MovieFormDto>> {
        let Some(name) = self.prompt("Movie Name", &current.name).await? else {
            return Ok(None);
        };
        let Some(duration) = self.prompt("Duration (e.g. 120m or 2h)", &current.duration).await?
        else {
            return Ok(None);
        };
        let Some(rating) = self.prompt("Rating (0-10)", &current.rating).await? else {
            return Ok(None);
        };

        Ok(Some(MovieFormDto {
            name,
            duration,
            rating,
        }))
    }

    async fn prompt(&mut self, label: &str, current: &str) -> AppResult<Option<String>> {
        if current.is_empty() {
            self.write(&format!("{}: ", label)).await?;
        } else {
            self.write(&format!("{} [{}]: ", label, current)).await?;
        }

        let answer = self.lines.next_line().await?;
        Ok(answer.map(|answer| {
            if answer.is_empty() {
                current.to_string()
            } else {
                answer
            }
        }))
    }

    async fn report(&mut self, error: &ErrorResponse) -> AppResult<()> {
        self.write(&format!("Error: {}\n", error)).await
    }

    async fn write(&mut self, text: &str) -> AppResult<()> {
        self.output.write_all(text.as_bytes()).await?;
        self.output.flush().await?;
        Ok(())
    }
}
