use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result, bail};
use rand::rngs::StdRng;

use powerpick_core::context::LotteryContext;
use powerpick_core::models::NewDrawing;
use powerpick_core::session::{SortOrder, TicketSession};

use crate::display::{
    display_leaderboard, display_session, display_ticket_detail, display_tickets,
};
use crate::settings::Settings;

#[derive(Debug, PartialEq)]
enum InteractiveCommand {
    Generate,
    Rate,
    Add,
    Hot,
    Cold,
    History,
    Leaderboard,
    Session,
    Reset,
    Quit,
}

fn parse_command(input: &str) -> Option<InteractiveCommand> {
    match input.trim().to_lowercase().as_str() {
        "1" | "generate" | "gen" | "g" => Some(InteractiveCommand::Generate),
        "2" | "rate" | "r" => Some(InteractiveCommand::Rate),
        "3" | "add" => Some(InteractiveCommand::Add),
        "4" | "hot" => Some(InteractiveCommand::Hot),
        "5" | "cold" => Some(InteractiveCommand::Cold),
        "6" | "history" | "hist" => Some(InteractiveCommand::History),
        "7" | "leaderboard" | "top" => Some(InteractiveCommand::Leaderboard),
        "8" | "session" | "stats" => Some(InteractiveCommand::Session),
        "9" | "reset" => Some(InteractiveCommand::Reset),
        "0" | "quit" | "q" | "exit" => Some(InteractiveCommand::Quit),
        _ => None,
    }
}

fn parse_sort_order(input: &str) -> Option<SortOrder> {
    match input.trim().to_lowercase().as_str() {
        "" | "newest" | "new" => Some(SortOrder::Newest),
        "hot" | "hottest" => Some(SortOrder::Hot),
        "cold" | "coldest" => Some(SortOrder::Cold),
        _ => None,
    }
}

fn parse_numbers(input: &str) -> Option<Vec<u32>> {
    input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<u32>().ok())
        .collect()
}

fn display_menu() {
    println!();
    println!("── Interactive mode ──");
    println!("  1. generate     Generate tickets");
    println!("  2. rate         Rate your own numbers");
    println!("  3. add          Add a drawing");
    println!("  4. hot          Most frequent numbers");
    println!("  5. cold         Least frequent numbers");
    println!("  6. history      Session tickets");
    println!("  7. leaderboard  Hottest and coldest tickets");
    println!("  8. session      Session coverage");
    println!("  9. reset        Clear the session");
    println!("  0. quit         Quit");
    println!();
}

fn prompt(msg: &str) -> Result<String> {
    print!("{}", msg);
    io::stdout().flush()?;
    let mut input = String::new();
    let read = io::stdin()
        .read_line(&mut input)
        .context("Failed to read input")?;
    if read == 0 {
        bail!("End of input");
    }
    Ok(input.trim().to_string())
}

fn prompt_with_default(msg: &str, default: &str) -> Result<String> {
    let input = prompt(&format!("{} [{}] : ", msg, default))?;
    if input.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(input)
    }
}

fn prompt_white_balls() -> Result<Vec<u32>> {
    loop {
        let input = prompt("5 white balls (1-69) : ")?;
        match parse_numbers(&input) {
            Some(v) if v.len() == 5 => return Ok(v),
            _ => println!("Enter exactly 5 numbers. Try again."),
        }
    }
}

fn prompt_powerball() -> Result<u32> {
    loop {
        let input = prompt("Powerball (1-26) : ")?;
        match input.parse::<u32>() {
            Ok(n) => return Ok(n),
            Err(_) => println!("Enter a single number. Try again."),
        }
    }
}

struct Repl<'a> {
    ctx: LotteryContext,
    session: TicketSession,
    settings: &'a Settings,
    data_path: &'a Path,
    rng: StdRng,
}

impl Repl<'_> {
    fn generate(&mut self) -> Result<()> {
        let default = self.settings.default_ticket_count.to_string();
        let n_str = prompt_with_default("How many tickets", &default)?;
        let n: usize = n_str.parse().context("Invalid number")?;
        let count = self.settings.clamp_count(Some(n));

        let tickets = self.ctx.generate_many(count, &mut self.rng)?;
        display_tickets(&tickets);
        self.session.add_tickets(tickets);
        display_session(&self.session);
        Ok(())
    }

    fn rate(&mut self) -> Result<()> {
        let white_balls = prompt_white_balls()?;
        let powerball = prompt_powerball()?;
        let ticket = self.ctx.rate(&white_balls, powerball)?;
        display_ticket_detail(&ticket);
        self.session.add_ticket(ticket);
        Ok(())
    }

    fn add(&mut self) -> Result<()> {
        let date = prompt("Date (MM/DD/YYYY) : ")?;
        let white_balls = prompt_white_balls()?;
        let powerball = prompt_powerball()?;

        let entry = NewDrawing {
            date,
            white_balls,
            powerball,
        };
        super::add_drawing(&mut self.ctx, self.data_path, &entry)
    }

    fn hot_cold(&self, hot: bool) -> Result<()> {
        super::cmd_numbers(&self.ctx, self.settings.hot_cold_count, hot)
    }

    fn history(&self) -> Result<()> {
        let input = prompt_with_default("Sort (newest/hot/cold)", "newest")?;
        let order = parse_sort_order(&input).context("Unknown sort order")?;
        display_tickets(&self.session.sorted(order));
        Ok(())
    }

    fn dispatch(&mut self, command: InteractiveCommand) -> Result<()> {
        match command {
            InteractiveCommand::Generate => self.generate(),
            InteractiveCommand::Rate => self.rate(),
            InteractiveCommand::Add => self.add(),
            InteractiveCommand::Hot => self.hot_cold(true),
            InteractiveCommand::Cold => self.hot_cold(false),
            InteractiveCommand::History => self.history(),
            InteractiveCommand::Leaderboard => {
                display_leaderboard(&self.session);
                Ok(())
            }
            InteractiveCommand::Session => {
                display_session(&self.session);
                Ok(())
            }
            InteractiveCommand::Reset => {
                self.session.reset();
                println!("Session cleared.");
                Ok(())
            }
            InteractiveCommand::Quit => Ok(()),
        }
    }
}

pub fn run_interactive(
    ctx: LotteryContext,
    settings: &Settings,
    data_path: &Path,
    rng: StdRng,
) -> Result<()> {
    println!("powerpick interactive mode. Frequencies are history, not prediction.");

    let mut repl = Repl {
        ctx,
        session: TicketSession::new(),
        settings,
        data_path,
        rng,
    };

    loop {
        display_menu();
        let input = match prompt("> ") {
            Ok(s) => s,
            Err(_) => break,
        };

        if input.is_empty() {
            continue;
        }

        match parse_command(&input) {
            Some(InteractiveCommand::Quit) => {
                println!("Bye!");
                break;
            }
            Some(command) => {
                if let Err(e) = repl.dispatch(command) {
                    println!("Error: {e:#}");
                }
            }
            None => {
                println!("Unknown command: '{}'. Type a number (0-9) or a command name.", input);
            }
        }
    }

    Ok(())
}
