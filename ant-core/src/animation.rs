//! Per-frame driver for the path system and its ants.
//!
//! Every call to [`Animation::tick`] runs, in this order:
//! 1. bump the spawn and path-redraw counters,
//! 2. request a path repaint when the redraw counter hits `path_loop_cycle`,
//! 3. spawn an ant at the head when the spawn counter hits `ant_interval`,
//! 4. sweep the ants: drop the ones that reached their end, advance the rest,
//! 5. feed the frame duration to the [`FpsMeter`].
//!
//! Clearing and drawing the layers is left to the caller, driven by the
//! returned [`FrameReport`].

use crate::{ant::Ant, config::Config, fps::FpsMeter, generator::PathSystem};
use glam::Vec2;
use rand::{SeedableRng, rngs::StdRng};
use tracing::info;

/// What happened during one [`Animation::tick`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    pub repaint_path: bool,
    pub spawned: bool,
    /// Ants removed by this frame's sweep.
    pub retired: usize,
}

pub struct Animation {
    system: PathSystem,
    ants: Vec<Ant>,
    spawn_counter: u32,
    redraw_counter: u32,
    fps: FpsMeter,
    rng: StdRng,
}

impl Animation {
    /// Generates a path system for `extent` and places the first ant on it.
    pub fn new(cfg: &Config, extent: Vec2, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let system = PathSystem::generate(cfg, extent, &mut rng);
        let mut animation = Self {
            system,
            ants: Vec::new(),
            spawn_counter: 0,
            redraw_counter: 0,
            fps: FpsMeter::new(),
            rng,
        };
        animation.spawn_ant(cfg);
        animation
    }

    /// Throws away the current graph and ants and starts over on a freshly
    /// generated path system.
    pub fn regenerate(&mut self, cfg: &Config, extent: Vec2) {
        self.system = PathSystem::generate(cfg, extent, &mut self.rng);
        self.ants.clear();
        self.spawn_counter = 0;
        self.redraw_counter = 0;
        self.fps.reset();

        let (columns, rows) = self.system.grid();
        info!(
            columns,
            rows,
            width = extent.x,
            height = extent.y,
            edges = self.system.edge_count(),
            "regenerated path system"
        );
    }

    fn spawn_ant(&mut self, cfg: &Config) {
        let head = self.system.head();
        let ant = Ant::new(
            self.system.graph_mut(),
            head,
            cfg.exploration_probability,
            &mut self.rng,
        );
        self.ants.push(ant);
    }

    /// Runs one animation frame. `dt` is the wall-clock time since the
    /// previous frame in seconds and only feeds the FPS estimate; ants move
    /// a fixed distance per frame.
    pub fn tick(&mut self, cfg: &Config, dt: f64) -> FrameReport {
        let mut report = FrameReport::default();

        self.spawn_counter += 1;
        self.redraw_counter += 1;

        if self.redraw_counter >= cfg.path_loop_cycle {
            report.repaint_path = true;
            self.redraw_counter = 0;
        }

        // An ant spawned this frame is swept but not advanced until the next one.
        let before_spawn = self.ants.len();
        if self.spawn_counter >= cfg.ant_interval {
            self.spawn_ant(cfg);
            self.spawn_counter = 0;
            report.spawned = true;
        }

        let graph = self.system.graph_mut();
        let rng = &mut self.rng;
        let mut index = 0;
        let mut retired = 0;
        self.ants.retain_mut(|ant| {
            let fresh = index >= before_spawn;
            index += 1;
            if ant.reached_end {
                retired += 1;
                return false;
            }
            if !fresh {
                ant.advance(graph, cfg.ant_speed, cfg.exploration_probability, rng);
            }
            true
        });
        report.retired = retired;

        self.fps.record_frame(dt);
        report
    }

    pub fn system(&self) -> &PathSystem {
        &self.system
    }

    pub fn ants(&self) -> &[Ant] {
        &self.ants
    }

    pub fn fps(&self) -> &FpsMeter {
        &self.fps
    }

    /// Grid shape of the current path system, as `(columns, rows)`.
    pub fn grid(&self) -> (usize, usize) {
        self.system.grid()
    }

    pub fn extent(&self) -> Vec2 {
        self.system.extent()
    }
}
