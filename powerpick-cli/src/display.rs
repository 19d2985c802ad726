use comfy_table::{Cell, Color, ContentArrangement, Table, presets::UTF8_FULL};

use powerpick_core::context::LotteryContext;
use powerpick_core::frequency::FrequencyData;
use powerpick_core::models::{NumberCount, ProbabilityRecord, Rating, Ticket, TicketOrigin};
use powerpick_core::parser::ParseResult;
use powerpick_core::session::TicketSession;

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

fn rating_color(rating: Rating) -> Color {
    match rating {
        Rating::VeryHot => Color::Red,
        Rating::Hot => Color::DarkYellow,
        Rating::Average => Color::White,
        Rating::Cold => Color::Cyan,
        Rating::VeryCold => Color::Blue,
    }
}

fn ball_cell(prob: &ProbabilityRecord) -> Cell {
    let cell = Cell::new(format!(
        "{:2} ({:.2}%)",
        prob.number, prob.historical_probability
    ));
    if prob.is_hot {
        cell.fg(Color::Red)
    } else if prob.is_cold {
        cell.fg(Color::Cyan)
    } else {
        cell
    }
}

fn balls_str(balls: &[u8; 5]) -> String {
    balls
        .iter()
        .map(|b| format!("{:2}", b))
        .collect::<Vec<_>>()
        .join(" - ")
}

pub fn display_load_summary(ctx: &LotteryContext, result: &ParseResult) {
    println!("Lines read     : {}", result.total_lines);
    println!("Drawings loaded: {}", result.valid_lines);
    if let Some(date) = ctx.latest_date() {
        println!("Latest drawing : {}", date);
    }
    if !result.errors.is_empty() {
        println!("Invalid lines  : {}", result.errors.len());
        for err in result.errors.iter().take(5) {
            println!("  {}", err);
        }
    }
}

pub fn display_stats(data: &FrequencyData) {
    let mut table = new_table(vec!["", "White balls", "Powerball"]);
    table.add_row(vec![
        "Drawings".to_string(),
        data.total_drawings.to_string(),
        data.total_drawings.to_string(),
    ]);
    table.add_row(vec![
        "Draws".to_string(),
        data.total_white_ball_draws.to_string(),
        data.total_powerball_draws.to_string(),
    ]);
    table.add_row(vec![
        "Counted".to_string(),
        data.white_ball_frequency_sum.to_string(),
        data.powerball_frequency_sum.to_string(),
    ]);
    println!("{table}");
}

pub fn display_tickets(tickets: &[Ticket]) {
    if tickets.is_empty() {
        println!("No tickets.");
        return;
    }

    let mut table = new_table(vec![
        "#", "W1", "W2", "W3", "W4", "W5", "PB", "Strength", "Rating",
    ]);

    for (i, ticket) in tickets.iter().enumerate() {
        let probs = &ticket.probabilities;
        let mut row = vec![Cell::new(match ticket.origin {
            TicketOrigin::Generated => format!("{}", i + 1),
            TicketOrigin::Rated => format!("{} (rated)", i + 1),
        })];
        row.extend(probs.white_balls.iter().map(ball_cell));
        row.push(ball_cell(&probs.powerball));
        row.push(Cell::new(format!("{:.1}%", probs.average_strength)));
        row.push(Cell::new(probs.rating.label()).fg(rating_color(probs.rating)));
        table.add_row(row);
    }
    println!("{table}");
}

pub fn display_ticket_detail(ticket: &Ticket) {
    let probs = &ticket.probabilities;
    println!(
        "\n{}  PB {:2}",
        balls_str(&ticket.white_balls),
        ticket.powerball
    );

    let mut table = new_table(vec![
        "Number", "Frequency", "Historical", "Expected", "Strength", "Rank",
    ]);
    for prob in probs.white_balls.iter().chain(std::iter::once(&probs.powerball)) {
        table.add_row(vec![
            ball_cell(prob),
            Cell::new(prob.frequency),
            Cell::new(format!("{:.2}%", prob.historical_probability)),
            Cell::new(format!("{:.2}%", prob.expected_probability)),
            Cell::new(format!("{:.1}%", prob.relative_strength)),
            Cell::new(format!("{}/{}", prob.rank, prob.total_numbers)),
        ]);
    }
    println!("{table}");
    println!(
        "{} ({:.1}%) - {}",
        probs.rating.label(),
        probs.average_strength,
        probs.rating.description()
    );
}

pub fn display_numbers(title: &str, white: &[NumberCount], power: &[NumberCount]) {
    println!("\n{title}\n");
    let mut table = new_table(vec!["White ball", "Count", "Powerball", "Count"]);
    let rows = white.len().max(power.len());
    for i in 0..rows {
        let (w, wc) = white
            .get(i)
            .map(|n| (format!("{:2}", n.number), n.count.to_string()))
            .unwrap_or_default();
        let (p, pc) = power
            .get(i)
            .map(|n| (format!("{:2}", n.number), n.count.to_string()))
            .unwrap_or_default();
        table.add_row(vec![w, wc, p, pc]);
    }
    println!("{table}");
}

pub fn display_rating_guide() {
    let mut table = new_table(vec!["Rating", "Average strength", "Meaning"]);
    for rating in Rating::ALL {
        table.add_row(vec![
            Cell::new(rating.label()).fg(rating_color(rating)),
            Cell::new(rating.range()),
            Cell::new(rating.description()),
        ]);
    }
    println!("{table}");
}

pub fn display_session(session: &TicketSession) {
    println!(
        "Tickets: {}  Unique combinations: {}",
        session.total_count(),
        session.coverage()
    );
}

pub fn display_leaderboard(session: &TicketSession) {
    let (Some(hottest), Some(coldest)) = (session.hottest(), session.coldest()) else {
        println!("No tickets yet.");
        return;
    };
    let mut table = new_table(vec!["", "Numbers", "PB", "Strength"]);
    for (label, ticket) in [("Hottest", hottest), ("Coldest", coldest)] {
        table.add_row(vec![
            label.to_string(),
            balls_str(&ticket.white_balls),
            format!("{:2}", ticket.powerball),
            format!("{:.1}%", ticket.probabilities.average_strength),
        ]);
    }
    println!("{table}");
}
