use crossterm::{
    cursor::{Hide, Show},
    event::{self, Event, KeyCode},
    execute,
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::env;
use std::io::{BufWriter, stdout};
use std::time::{Duration, Instant};

use pyroterm::canvas::{Canvas, Paint, TermCanvas};
use pyroterm::color::{Rgba, css_to_rgb};
use pyroterm::firework::Firework;

const FIXED_DT: f32 = 1.0 / 60.0;

// Night-sky base; the per-tick wash fades old frames into light trails.
const DEFAULT_BG: (u8, u8, u8) = (7, 7, 48);
const WASH_ALPHA: f32 = 0.2;

const DEFAULT_COUNT: usize = 8;

fn print_usage() {
    eprintln!("pyroterm - Continuous fireworks display for the terminal");
    eprintln!();
    eprintln!("Usage: pyroterm [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --bg-color COLOR  Night-sky color as RRGGBB hex or hsl(h, s%, l%)");
    eprintln!("  --count N         Number of simultaneous fireworks (default: {})", DEFAULT_COUNT);
    eprintln!("  --seed N          Seed the simulation for a reproducible display");
    eprintln!();
    eprintln!("Press 'q', ESC, or Ctrl+C to exit");
}

fn run(bg: (u8, u8, u8), count: usize, seed: Option<u64>) -> std::io::Result<()> {
    let stdout = stdout();
    let mut stdout = BufWriter::with_capacity(1024 * 64, stdout);

    terminal::enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen, Hide, Clear(ClearType::All))?;

    let (cols, rows) = terminal::size()?;
    let mut canvas = TermCanvas::new(cols as usize, rows as usize, bg);

    let mut master = match seed {
        Some(seed) => fastrand::Rng::with_seed(seed),
        None => fastrand::Rng::new(),
    };
    let mut fireworks: Vec<Firework> = (0..count)
        .map(|_| Firework::new(canvas.width(), canvas.height(), master.fork()))
        .collect();

    let mut last_frame = Instant::now();
    let mut accumulator = 0.0f32;

    loop {
        if event::poll(Duration::from_millis(1))? {
            match event::read()? {
                Event::Key(key) => {
                    if key.code == KeyCode::Char('q')
                        || key.code == KeyCode::Esc
                        || (key.code == KeyCode::Char('c')
                            && key.modifiers.contains(event::KeyModifiers::CONTROL))
                    {
                        break;
                    }
                }
                Event::Resize(cols, rows) => {
                    canvas.resize(cols as usize, rows as usize);
                    for firework in &mut fireworks {
                        firework.resize(canvas.width(), canvas.height());
                    }
                    execute!(stdout, Clear(ClearType::All))?;
                }
                _ => {}
            }
        }

        let now = Instant::now();
        accumulator += now.duration_since(last_frame).as_secs_f32();
        last_frame = now;
        if accumulator > FIXED_DT * 3.0 {
            accumulator = FIXED_DT * 3.0;
        }

        while accumulator >= FIXED_DT {
            // Translucent overwrite, not a clear; old frames decay into
            // the trails.
            canvas.set_fill(Paint::Solid(Rgba::new(bg.0, bg.1, bg.2, WASH_ALPHA)));
            canvas.fill_rect(0.0, 0.0, canvas.width(), canvas.height());

            for firework in &mut fireworks {
                firework.update();
                firework.render(&mut canvas);
            }
            accumulator -= FIXED_DT;
        }

        canvas.present(&mut stdout)?;
    }

    execute!(stdout, Show, LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;

    Ok(())
}

fn parse_hex_color(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 {
        return None;
    }

    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

    Some((r, g, b))
}

fn parse_color(value: &str) -> Option<(u8, u8, u8)> {
    if value.starts_with("hsl(") {
        // Color-model contract: a malformed descriptor degrades to white
        // instead of refusing to start.
        Some(css_to_rgb(value))
    } else {
        parse_hex_color(value)
    }
}

fn main() -> std::io::Result<()> {
    let args: Vec<String> = env::args().collect();

    let mut bg = DEFAULT_BG;
    let mut count = DEFAULT_COUNT;
    let mut seed = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--bg-color" => {
                if i + 1 < args.len() {
                    if let Some(color) = parse_color(&args[i + 1]) {
                        bg = color;
                        i += 2;
                    } else {
                        eprintln!("Invalid color: {}", args[i + 1]);
                        eprintln!("Expected RRGGBB hex (e.g., 070730) or hsl(h, s%, l%)");
                        std::process::exit(1);
                    }
                } else {
                    eprintln!("--bg-color requires a color value");
                    std::process::exit(1);
                }
            }
            "--count" => {
                if i + 1 < args.len() {
                    match args[i + 1].parse::<usize>() {
                        Ok(n) if n > 0 => {
                            count = n;
                            i += 2;
                        }
                        _ => {
                            eprintln!("--count requires a positive integer");
                            std::process::exit(1);
                        }
                    }
                } else {
                    eprintln!("--count requires a value");
                    std::process::exit(1);
                }
            }
            "--seed" => {
                if i + 1 < args.len() {
                    match args[i + 1].parse::<u64>() {
                        Ok(n) => {
                            seed = Some(n);
                            i += 2;
                        }
                        Err(_) => {
                            eprintln!("--seed requires an unsigned integer");
                            std::process::exit(1);
                        }
                    }
                } else {
                    eprintln!("--seed requires a value");
                    std::process::exit(1);
                }
            }
            "help" | "--help" | "-h" => {
                print_usage();
                return Ok(());
            }
            arg => {
                eprintln!("Unknown option: {}", arg);
                eprintln!();
                print_usage();
                std::process::exit(1);
            }
        }
    }

    run(bg, count, seed)
}
