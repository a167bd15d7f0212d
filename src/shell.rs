//! Line-oriented navigation host.
//!
//! Reads one command per line, resolves it against the [`Navigator`], and
//! renders the screen now on top of the stack. Stands in for the mobile UI
//! shell: tokens that fail to decode fall back to the trips list, invalid trip
//! ids are reported and leave the stack as it was.

use std::io::{self, BufRead, Write};

use tracing::{info, warn};

use crate::navigation::{Navigator, Resolution};
use crate::route::{self, Route, TripMode};

const HELP: &str = "\
Commands:
  open <token>        navigate to a route token (e.g. trip_detail/42)
  link <uri>          navigate to a voyago:// deep link
  trips | map | profile
  detail <id>         trip detail
  add                 new trip
  edit <id>           edit a trip
  home                back to trips, collapsing the stack
  stack               print the back stack
  help | quit";

/// One parsed line of input.
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Open(String),
    Link(String),
    Go(Route),
    Detail(i64),
    Add,
    Edit(i64),
    Home,
    Stack,
    Help,
    Quit,
}

/// Parse a line. Blank lines and `#` comments yield `Ok(None)`.
fn parse(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut words = line.split_whitespace();
    let name = words.next().unwrap_or_default();
    let arg = words.next();
    if let Some(extra) = words.next() {
        return Err(format!("unexpected argument '{extra}'"));
    }

    let command = match (name, arg) {
        ("open", Some(token)) => Command::Open(token.to_string()),
        ("link", Some(uri)) => Command::Link(uri.to_string()),
        ("detail", Some(id)) => Command::Detail(parse_id(id)?),
        ("edit", Some(id)) => Command::Edit(parse_id(id)?),
        ("open" | "link" | "detail" | "edit", None) => {
            return Err(format!("'{name}' needs an argument"));
        }
        ("trips", None) => Command::Go(Route::Trips),
        ("map", None) => Command::Go(Route::Map),
        ("profile", None) => Command::Go(Route::Profile),
        ("add", None) => Command::Add,
        ("home", None) => Command::Home,
        ("stack", None) => Command::Stack,
        ("help", None) => Command::Help,
        ("quit" | "exit", None) => Command::Quit,
        (_, Some(arg)) if is_known(name) => {
            return Err(format!("'{name}' takes no argument (got '{arg}')"));
        }
        _ => return Err(format!("unknown command '{name}' (try 'help')")),
    };
    Ok(Some(command))
}

fn is_known(name: &str) -> bool {
    matches!(
        name,
        "trips" | "map" | "profile" | "add" | "home" | "stack" | "help" | "quit" | "exit"
    )
}

fn parse_id(raw: &str) -> Result<i64, String> {
    raw.parse()
        .map_err(|e| format!("trip id '{raw}' is not a number: {e}"))
}

/// A navigation session over some input and output.
pub struct Shell<W: Write> {
    navigator: Navigator,
    out: W,
}

impl<W: Write> Shell<W> {
    pub fn new(start: Route, out: W) -> Self {
        Self {
            navigator: Navigator::starting_at(start),
            out,
        }
    }

    /// Runs until `quit` or end of input.
    pub fn run(&mut self, input: impl BufRead) -> io::Result<()> {
        info!(start = ?self.navigator.stack().top(), "shell started");
        self.render()?;

        for line in input.lines() {
            let line = line?;
            match parse(&line) {
                Ok(None) => {}
                Ok(Some(Command::Quit)) => break,
                Ok(Some(command)) => self.execute(command)?,
                Err(message) => writeln!(self.out, "error: {message}")?,
            }
        }

        info!(depth = self.navigator.stack().len(), "shell stopped");
        Ok(())
    }

    fn execute(&mut self, command: Command) -> io::Result<()> {
        match command {
            Command::Open(token) => {
                let decoded = route::decode(&token);
                self.open(decoded)
            }
            Command::Link(uri) => {
                let decoded = route::decode_deep_link(&uri);
                self.open(decoded)
            }
            Command::Go(route) => {
                self.navigator.go_to(route);
                self.render()
            }
            Command::Detail(id) => {
                let result = self.navigator.go_to_trip_detail(id);
                self.after(result)
            }
            Command::Add => {
                self.navigator.go_to_add_trip();
                self.render()
            }
            Command::Edit(id) => {
                let result = self.navigator.go_to_edit_trip(id);
                self.after(result)
            }
            Command::Home => {
                self.navigator.return_to_trips();
                self.render()
            }
            Command::Stack => self.print_stack(),
            Command::Help => writeln!(self.out, "{HELP}"),
            Command::Quit => Ok(()),
        }
    }

    /// Navigate to a decoded token, falling back to trips when it is malformed.
    fn open(&mut self, decoded: route::Result<Route>) -> io::Result<()> {
        match decoded {
            Ok(route) => {
                self.navigator.go_to(route);
            }
            Err(e) => {
                warn!(error = %e, "falling back to trips");
                writeln!(self.out, "error: {e}; returning to trips")?;
                self.navigator.return_to_trips();
            }
        }
        self.render()
    }

    fn after(&mut self, result: route::Result<Resolution>) -> io::Result<()> {
        match result {
            Ok(_) => self.render(),
            Err(e) => writeln!(self.out, "error: {e}"),
        }
    }

    /// Draw the screen on top of the stack.
    fn render(&mut self) -> io::Result<()> {
        let stack = self.navigator.stack();
        let Some(top) = stack.top() else {
            return writeln!(self.out, "(nothing to show)");
        };

        let detail = match top {
            Route::TripDetail { trip_id } => format!("  trip #{trip_id}"),
            Route::AddOrEditTrip { .. } => match top.trip_mode() {
                Some(TripMode::Edit(id)) => format!("  editing trip #{id}"),
                _ => "  new trip".to_string(),
            },
            _ => String::new(),
        };
        writeln!(
            self.out,
            "[{}]{detail}  ({top}, depth {})",
            top.title(),
            stack.len()
        )
    }

    fn print_stack(&mut self) -> io::Result<()> {
        let tokens = self.navigator.stack().tokens();
        if tokens.is_empty() {
            return writeln!(self.out, "(empty)");
        }
        writeln!(self.out, "{}", tokens.join(" > "))
    }

    /// The stack as pretty JSON.
    pub fn stack_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self.navigator.stack())
    }

    #[cfg(test)]
    fn into_output(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::route::TripId;

    fn run_script(start: Route, script: &str) -> (Vec<Route>, String) {
        let mut shell = Shell::new(start, Vec::new());
        shell.run(script.as_bytes()).unwrap();
        let routes = shell.navigator.stack().routes().to_vec();
        let out = String::from_utf8(shell.into_output()).unwrap();
        (routes, out)
    }

    fn id(raw: i64) -> TripId {
        TripId::new(raw).unwrap()
    }

    #[test]
    fn parses_commands() {
        assert_eq!(parse("  open trips "), Ok(Some(Command::Open("trips".into()))));
        assert_eq!(parse("detail 5"), Ok(Some(Command::Detail(5))));
        assert_eq!(parse("edit -1"), Ok(Some(Command::Edit(-1))));
        assert_eq!(parse("map"), Ok(Some(Command::Go(Route::Map))));
        assert_eq!(parse("exit"), Ok(Some(Command::Quit)));
        assert_eq!(parse(""), Ok(None));
        assert_eq!(parse("# comment"), Ok(None));
    }

    #[test]
    fn rejects_bad_arguments() {
        assert!(parse("detail").is_err());
        assert!(parse("detail x").is_err());
        assert!(parse("map 3").is_err());
        assert!(parse("open a b").is_err());
        assert!(parse("teleport").is_err());
    }

    #[test]
    fn edit_then_home_collapses_to_trips() {
        let (routes, out) = run_script(Route::Trips, "detail 1\nedit 1\nhome\n");

        assert_eq!(routes, vec![Route::Trips]);
        assert!(out.contains("[Trip detail]  trip #1"));
        assert!(out.contains("[Edit trip]  editing trip #1"));
    }

    #[test]
    fn add_renders_create_mode() {
        let (routes, out) = run_script(Route::Trips, "add\n");

        assert_eq!(
            routes,
            vec![Route::Trips, Route::AddOrEditTrip { trip_id: None }]
        );
        assert!(out.contains("[New trip]  new trip  (add_trip, depth 2)"));
    }

    #[test]
    fn malformed_token_falls_back_to_trips() {
        let (routes, out) = run_script(Route::Trips, "map\nopen trip_detail/abc\n");

        assert_eq!(routes, vec![Route::Trips]);
        assert!(out.contains("malformed route 'trip_detail/abc'"));
    }

    #[test]
    fn invalid_id_leaves_stack_alone() {
        let (routes, out) = run_script(Route::Trips, "detail 0\n");

        assert_eq!(routes, vec![Route::Trips]);
        assert!(out.contains("invalid trip identifier: 0"));
    }

    #[test]
    fn open_and_link_decode_tokens() {
        let (routes, _) = run_script(
            Route::Trips,
            "open add_trip?tripId=7\nlink voyago://trip_detail/3\n",
        );

        assert_eq!(
            routes,
            vec![
                Route::Trips,
                Route::AddOrEditTrip {
                    trip_id: Some(id(7))
                },
                Route::TripDetail { trip_id: id(3) },
            ]
        );
    }

    #[test]
    fn quit_stops_reading() {
        let (routes, _) = run_script(Route::Trips, "quit\nmap\n");
        assert_eq!(routes, vec![Route::Trips]);
    }

    #[test]
    fn stack_prints_tokens() {
        let (_, out) = run_script(Route::Profile, "detail 2\nstack\n");
        assert!(out.contains("profile > trip_detail/2"));
    }

    #[test]
    fn stack_json_lists_routes() {
        let mut shell = Shell::new(Route::Trips, Vec::new());
        shell.run("detail 6\n".as_bytes()).unwrap();

        let json = shell.stack_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["kind"], "trips");
        assert_eq!(value[1]["tripId"], 6);
    }
}
