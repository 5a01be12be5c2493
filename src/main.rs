//! Opens a window and lets an agent walk to random goals, remembering the path to every goal
//! it has seen.
use clap::Parser;
use grid_goal_memory::config::{RenderConfig, Rgb, SimulationConfig};
use grid_goal_memory::simulation::{seeded_rng, Simulation};
use grid_goal_memory::Connectivity;
use grid_util::point::Point;
use macroquad::color::Color;
use macroquad::input::{is_key_pressed, KeyCode};
use macroquad::shapes::{draw_line, draw_rectangle};
use macroquad::time::get_frame_time;
use macroquad::window::{clear_background, next_frame, Conf};
use std::io::Write;
use std::num::NonZeroUsize;

/// Command-line arguments. All are optional.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    /// Cells along each side of the square grid.
    #[arg(short = 'n', long, default_value_t = 10)]
    grid_size: usize,
    /// Seed for goal placement and obstacles. Random if omitted.
    #[arg(short, long)]
    seed: Option<u64>,
    /// Allow diagonal moves.
    #[arg(short, long)]
    diagonal: bool,
    /// Simulation steps per second.
    #[arg(long, default_value_t = 10)]
    fps: u32,
    /// Fraction of cells to block, between 0 and 1.
    #[arg(long, default_value_t = 0.0)]
    obstacles: f64,
    /// Maximum number of remembered goals. Unbounded if omitted.
    #[arg(long)]
    memory_capacity: Option<NonZeroUsize>,
}

fn window_conf() -> Conf {
    let render = RenderConfig::default();
    Conf {
        window_title: "grid_goal_memory".to_owned(),
        window_width: render.screen_width as i32,
        window_height: render.screen_height as i32,
        window_resizable: false,
        ..Default::default()
    }
}

fn color((r, g, b): Rgb) -> Color {
    Color::from_rgba(r, g, b, 255)
}

fn draw_cell(point: &Point, cell: f32, rgb: Rgb) {
    draw_rectangle(
        point.x as f32 * cell,
        point.y as f32 * cell,
        cell,
        cell,
        color(rgb),
    );
}

fn draw<R: rand::Rng>(simulation: &Simulation<R>, render: &RenderConfig) {
    let size = simulation.config().grid_size;
    let cell = render.cell_size(size);
    let extent = cell * size as f32;
    clear_background(color(render.background));
    for point in simulation.remaining_path() {
        draw_cell(point, cell, render.path);
    }
    let grid = simulation.grid();
    for y in 0..size as i32 {
        for x in 0..size as i32 {
            let point = Point::new(x, y);
            if grid.is_blocked(&point) {
                draw_cell(&point, cell, render.obstacle);
            }
        }
    }
    for i in 0..=size {
        let offset = i as f32 * cell;
        draw_line(offset, 0.0, offset, extent, 1.0, color(render.grid_lines));
        draw_line(0.0, offset, extent, offset, 1.0, color(render.grid_lines));
    }
    draw_cell(&simulation.position(), cell, render.agent);
    draw_cell(&simulation.goal(), cell, render.goal);
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| writeln!(buf, "{}", record.args()))
        .init();

    let args = CliArgs::parse();
    let config = SimulationConfig {
        grid_size: args.grid_size.max(1),
        connectivity: if args.diagonal {
            Connectivity::Eight
        } else {
            Connectivity::Four
        },
        obstacle_density: args.obstacles,
        memory_capacity: args.memory_capacity,
        seed: args.seed,
        ..SimulationConfig::default()
    };
    let render = RenderConfig {
        ticks_per_second: args.fps,
        ..RenderConfig::default()
    };

    let rng = seeded_rng(config.seed);
    let mut simulation = match Simulation::new(config, rng) {
        Ok(simulation) => simulation,
        Err(err) => {
            log::error!("Cannot start simulation [{}]: {}", err.code(), err);
            return;
        }
    };
    log::info!(
        "Simulating a {0}x{0} {1}",
        simulation.config().grid_size,
        simulation.grid().connectivity
    );

    let interval = render.tick_interval();
    let mut elapsed = 0.0;
    loop {
        if is_key_pressed(KeyCode::Escape) {
            break;
        }
        elapsed += get_frame_time();
        // At most one step, and so at most one search, per frame.
        if elapsed >= interval {
            elapsed = (elapsed - interval).min(interval);
            simulation.step();
        }
        draw(&simulation, &render);
        next_frame().await;
    }

    let stats = simulation.memory().stats();
    log::info!(
        "Episodes: {}, remembered goals: {}, hits: {}, misses: {}",
        simulation.episode_count(),
        simulation.memory().len(),
        stats.hits,
        stats.misses
    );
}
