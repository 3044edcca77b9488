//! Headless driver for gridcanvas - replays a scripted session against an
//! in-memory surface and prints a JSON frame report
//!
//! Usage:
//!   gridcanvas_cli                          # Report to stdout
//!   gridcanvas_cli -c config.json           # Custom grid configuration
//!   gridcanvas_cli -o report.json           # Report to file
//!
//! Set `RUST_LOG=gridcanvas=trace` to see every frame decision.

#![allow(clippy::exit)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::indexing_slicing)]

use std::cell::RefCell;
use std::env;
use std::fs;
use std::io::{self, Write};
use std::rc::Rc;

use serde::Serialize;
use tracing_subscriber::EnvFilter;

use gridcanvas::render::{DrawSurface, RecordingSurface};
use gridcanvas::viewer::dispatch_pointer_down;
use gridcanvas::{
    CellCoord, FrameOutcome, GridConfig, GridData, GridView, PointerButton, Propagation, Selection, Signal,
};

const COLUMNS: u32 = 20;
const ROWS: u32 = 50;
const FROZEN_COLUMNS: u32 = 2;
const SURFACE: (u32, u32) = (800, 600);

#[derive(Serialize)]
struct FrameReport {
    step: &'static str,
    painted: bool,
    cells: usize,
    draw_commands: usize,
    scroll: [f32; 2],
    visible_cols: [u32; 2],
    visible_rows: [u32; 2],
    active_cell: Option<[u32; 2]>,
    selected: usize,
}

#[derive(Serialize)]
struct SessionReport {
    columns: u32,
    rows: u32,
    frozen_columns: u32,
    surface: [u32; 2],
    frames: Vec<FrameReport>,
}

/// Cells hold `row * columns + col`.
fn dummy_data() -> GridData {
    GridData::new(
        (0..ROWS)
            .map(|r| (0..COLUMNS).map(|c| (r * COLUMNS + c).to_string()).collect())
            .collect(),
    )
}

/// Widths between 80 and 120 px, varied but reproducible.
fn dummy_widths() -> Vec<f32> {
    (0..COLUMNS).map(|c| 80.0 + ((c * 17) % 41) as f32).collect()
}

fn frame(view: &Rc<RefCell<GridView>>, surface: &mut RecordingSurface, step: &'static str) -> FrameReport {
    let mut view = view.borrow_mut();
    let outcome = view.tick(surface);
    let window = view.visible_window();
    let (scroll_x, scroll_y) = view.scroll_offset();
    let report = FrameReport {
        step,
        painted: outcome.painted(),
        cells: match outcome {
            FrameOutcome::Painted { cells } => cells,
            FrameOutcome::Skipped => 0,
        },
        draw_commands: surface.take_commands().len(),
        scroll: [scroll_x, scroll_y],
        visible_cols: [window.start_col, window.end_col],
        visible_rows: [window.start_row, window.end_row],
        active_cell: view.active_cell().map(CellCoord::to_pair),
        selected: view.selection().len(),
    };
    tracing::info!(step, painted = report.painted, cells = report.cells, "frame");
    report
}

fn run(config: GridConfig) -> gridcanvas::Result<SessionReport> {
    let mut view = GridView::with_config(config)?;
    view.set_frozen_column_count(FROZEN_COLUMNS);
    view.set_data(dummy_data());
    view.set_column_widths(dummy_widths());
    let view = Rc::new(RefCell::new(view));

    // Clicking a cell makes it active
    let on_click = {
        let view = Rc::clone(&view);
        Signal::listener(move |cell: &CellCoord| {
            view.borrow_mut().set_active_cell(Some(*cell));
            Propagation::Continue
        })
    };
    view.borrow().cell_clicked().add(&on_click, 0)?;

    let mut surface = RecordingSurface::new(SURFACE.0, SURFACE.1);
    surface.set_font(&view.borrow().config().font());
    surface.take_commands();

    let mut frames = vec![
        frame(&view, &mut surface, "initial"),
        frame(&view, &mut surface, "idle"),
    ];

    view.borrow_mut().set_active_cell(Some(CellCoord::new(4, 9)));
    frames.push(frame(&view, &mut surface, "set active cell"));

    let selection: Selection = [(6, 2), (3, 5), (4, 5), (5, 5), (3, 6), (4, 6), (5, 6), (0, 8)]
        .into_iter()
        .map(CellCoord::from)
        .collect();
    view.borrow_mut().set_selection(selection);
    frames.push(frame(&view, &mut surface, "set selection"));

    dispatch_pointer_down(&view, 250.0, 75.0, PointerButton::Primary);
    frames.push(frame(&view, &mut surface, "click"));

    view.borrow_mut().wheel(0.0, 120.0);
    frames.push(frame(&view, &mut surface, "wheel down"));

    view.borrow_mut().wheel(100.0, 0.0);
    frames.push(frame(&view, &mut surface, "wheel right"));

    dispatch_pointer_down(&view, 500.0, 300.0, PointerButton::Secondary);
    view.borrow_mut().pointer_move(300.0, 200.0);
    frames.push(frame(&view, &mut surface, "drag"));
    view.borrow_mut().pointer_up(PointerButton::Secondary);
    frames.push(frame(&view, &mut surface, "drag released"));

    view.borrow_mut().set_active_cell(None);
    frames.push(frame(&view, &mut surface, "clear active cell"));

    view.borrow_mut().set_selection(Selection::default());
    frames.push(frame(&view, &mut surface, "clear selection"));

    Ok(SessionReport {
        columns: COLUMNS,
        rows: ROWS,
        frozen_columns: FROZEN_COLUMNS,
        surface: [SURFACE.0, SURFACE.1],
        frames,
    })
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let mut config_path = None;
    let mut output_path = None;
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-c" if i + 1 < args.len() => {
                config_path = Some(args[i + 1].clone());
                i += 2;
            }
            "-o" if i + 1 < args.len() => {
                output_path = Some(args[i + 1].clone());
                i += 2;
            }
            _ => {
                eprintln!("Usage: gridcanvas_cli [-c config.json] [-o report.json]");
                std::process::exit(1);
            }
        }
    }

    let config = match config_path {
        Some(path) => {
            let json = match fs::read_to_string(&path) {
                Ok(j) => j,
                Err(e) => {
                    eprintln!("Error reading {}: {}", path, e);
                    std::process::exit(1);
                }
            };
            match GridConfig::from_json(&json) {
                Ok(c) => c,
                Err(e) => {
                    eprintln!("Error parsing config: {}", e);
                    std::process::exit(1);
                }
            }
        }
        None => GridConfig::default(),
    };

    let report = match run(config) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let json = match serde_json::to_string_pretty(&report) {
        Ok(j) => j,
        Err(e) => {
            eprintln!("Error serializing JSON: {}", e);
            std::process::exit(1);
        }
    };

    match output_path {
        Some(path) => {
            if let Err(e) = fs::write(&path, &json) {
                eprintln!("Error writing {}: {}", path, e);
                std::process::exit(1);
            }
            eprintln!("Written: {}", path);
        }
        None => {
            io::stdout().write_all(json.as_bytes()).unwrap();
            println!();
        }
    }
}
