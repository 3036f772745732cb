//! Burrow terminal front end.
//!
//! Reads one key per turn, feeds the matching command to the game and
//! redraws the board. All rules live in `burrow_lib`.

use std::io::{self, Write};

use clap::Parser;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{Color, PrintStyledContent, Stylize},
    terminal::{self, ClearType},
};

use burrow_core::Cell;
use burrow_lib::{Command, GameConfig, GameState, LogStyle, MessageLog};
use burrow_lib::game::Event as GameEvent;

/// Help Mr. Bunny carry every carrot into a rabbit hole.
#[derive(Parser, Debug)]
#[command(name = "burrow", version, long_about = None)]
struct Cli {
    /// Board side length
    #[arg(short, long, default_value_t = 5)]
    size: u32,

    /// Number of carrots
    #[arg(short, long, default_value_t = 2)]
    carrots: u32,

    /// Number of rabbit holes to fill
    #[arg(long, default_value_t = 2)]
    holes: u32,

    /// Seed for a reproducible board
    #[arg(long)]
    seed: Option<u64>,
}

const HELP_LINE: &str = "a/d/w/s move  p pick up  j jump  h hint  q quit";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = GameConfig {
        size: cli.size,
        carrots: cli.carrots,
        holes: cli.holes,
        seed: cli.seed,
    };
    let mut game = GameState::new(&config)?;
    let mut log = MessageLog::new();
    log.log("Welcome to Mr. Bunny's Carrot Gathering Game!");

    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen, cursor::Hide)?;

    let result = run(&mut stdout, &mut game, &mut log);

    execute!(stdout, cursor::Show, terminal::LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    result?;

    print!("{}", game.board());
    if let Some(entry) = log.last() {
        println!("{entry}");
    }
    Ok(())
}

fn run(out: &mut impl Write, game: &mut GameState, log: &mut MessageLog) -> io::Result<()> {
    loop {
        draw(out, game, log)?;
        if game.status().is_terminal() {
            return Ok(());
        }

        let Event::Key(KeyEvent {
            code,
            modifiers,
            kind,
            ..
        }) = event::read()?
        else {
            continue;
        };
        if kind != KeyEventKind::Press {
            continue;
        }

        let cmd = match code {
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(Command::Quit),
            KeyCode::Char(ch) if ch.eq_ignore_ascii_case(&'h') => {
                match game.hint() {
                    Some(hint) => log.log_styled(
                        &format!("Hint: {hint} ({}).", hint.key()),
                        LogStyle::Notable,
                    ),
                    None => log.log_styled("No hint available.", LogStyle::Error),
                }
                continue;
            }
            KeyCode::Char(ch) => Command::from_key(ch),
            KeyCode::Left => Some(Command::MoveLeft),
            KeyCode::Right => Some(Command::MoveRight),
            KeyCode::Up => Some(Command::MoveUp),
            KeyCode::Down => Some(Command::MoveDown),
            KeyCode::Esc => Some(Command::Quit),
            _ => None,
        };

        match cmd.map(|c| game.apply(c)) {
            Some(Ok(ev)) => log.log_styled(&ev.to_string(), event_style(ev)),
            Some(Err(err)) => log.log_styled(&err.to_string(), LogStyle::Error),
            None => log.log_styled("Invalid move. Use a/d/w/s/p/j/q to move.", LogStyle::Error),
        }
    }
}

fn event_style(ev: GameEvent) -> LogStyle {
    match ev {
        GameEvent::Moved { .. } => LogStyle::Normal,
        _ => LogStyle::Notable,
    }
}

fn cell_color(cell: Cell) -> Color {
    match cell {
        Cell::Pathway => Color::DarkGrey,
        Cell::Carrot => Color::DarkYellow,
        Cell::RabbitHole => Color::DarkMagenta,
        Cell::RabbitPlain | Cell::RabbitCarrying => Color::White,
    }
}

fn log_color(style: LogStyle) -> Color {
    match style {
        LogStyle::Normal => Color::Reset,
        LogStyle::Error => Color::Red,
        LogStyle::Notable => Color::Green,
    }
}

/// Redraw the whole screen. Raw mode needs explicit `\r\n` line breaks.
fn draw(out: &mut impl Write, game: &GameState, log: &MessageLog) -> io::Result<()> {
    queue!(out, terminal::Clear(ClearType::All), cursor::MoveTo(0, 0))?;
    for row in game.board().rows() {
        for (i, &cell) in row.iter().enumerate() {
            if i > 0 {
                write!(out, " ")?;
            }
            let sym = cell.symbol().to_string();
            let styled = if cell.is_rabbit() {
                sym.with(cell_color(cell)).bold()
            } else {
                sym.with(cell_color(cell))
            };
            queue!(out, PrintStyledContent(styled))?;
        }
        write!(out, "\r\n")?;
    }
    write!(
        out,
        "\r\nCarrying: {}   Holes left: {}\r\n{HELP_LINE}\r\n\r\n",
        if game.holding_carrot() { "yes" } else { "no" },
        game.remaining_holes(),
    )?;
    for entry in log.recent(4) {
        queue!(
            out,
            PrintStyledContent(entry.to_string().with(log_color(entry.style)))
        )?;
        write!(out, "\r\n")?;
    }
    out.flush()
}
