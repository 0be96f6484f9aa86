// ABOUTME: Demo driver for the split grid engine.
// ABOUTME: Builds a small workspace of named panes, reshapes it and logs every pane box.

use std::path::PathBuf;

use anyhow::{Context, Result};
use sg_core::Config;
use sg_layout::{GridTree, Panel, Point, Size, SizeConstraints};
use tracing_subscriber::EnvFilter;

const MAX_PANES: usize = 16;

/// A named pane that records the box it was last given.
#[derive(Debug)]
struct Pane {
    name: &'static str,
    constraints: SizeConstraints,
    offset: Point,
    size: Size,
}

impl Pane {
    fn new(name: &'static str, constraints: SizeConstraints) -> Self {
        Self {
            name,
            constraints,
            offset: Point::default(),
            size: Size::default(),
        }
    }
}

impl Panel for Pane {
    fn constraints(&self) -> SizeConstraints {
        self.constraints
    }

    fn layout(&mut self, offset: Point, size: Size) {
        tracing::debug!(
            "{} -> {}x{} at ({}, {})",
            self.name,
            size.width,
            size.height,
            offset.x,
            offset.y
        );
        self.offset = offset;
        self.size = size;
    }
}

struct App {
    grid: GridTree<Pane>,
}

impl App {
    fn new(config: &Config) -> Self {
        tracing::info!(
            "Grid {}x{}, proportional layout: {}",
            config.width,
            config.height,
            config.grid.proportional_layout
        );
        Self {
            grid: GridTree::new(Size::new(config.width, config.height), config.grid),
        }
    }

    fn add_pane(&mut self, pane: Pane, preferred: u32, location: &[usize]) -> Result<()> {
        if self.grid.len() >= MAX_PANES {
            tracing::warn!("Maximum pane limit ({}) reached", MAX_PANES);
            return Ok(());
        }
        let name = pane.name;
        let fit = self
            .grid
            .add_view(pane, preferred, location)
            .with_context(|| format!("adding {name} at {location:?}"))?;
        if fit.is_saturated() {
            tracing::warn!("{} does not fit its constraints: {:?}", name, fit);
        }
        tracing::info!("Added pane {} at {:?}, total panes: {}", name, location, self.grid.len());
        Ok(())
    }

    fn close_pane(&mut self, location: &[usize]) -> Result<()> {
        let removed = self
            .grid
            .remove_view(location)
            .with_context(|| format!("closing {location:?}"))?;
        let names: Vec<&str> = removed.leaves().iter().map(|pane| pane.name).collect();
        tracing::info!("Closed {:?}, remaining panes: {}", names, self.grid.len());
        Ok(())
    }

    fn report(&self) -> Result<()> {
        let tree = self.grid.views()?;
        let shape = tree.clone().map(|pane| pane.name);
        tracing::info!("Layout: {:?}", shape);
        for pane in tree.leaves() {
            tracing::info!(
                "  {:<10} {:>5}x{:<5} at ({}, {})",
                pane.name,
                pane.size.width,
                pane.size.height,
                pane.offset.x,
                pane.offset.y
            );
        }
        Ok(())
    }

    fn run(&mut self) -> Result<()> {
        self.add_pane(Pane::new("editor", SizeConstraints::flexible(200, 120)), 600, &[0])?;
        self.add_pane(Pane::new("terminal", SizeConstraints::flexible(200, 80)), 200, &[1])?;
        self.add_pane(Pane::new("outline", SizeConstraints::bounded(120, 400, 120, u32::MAX)), 250, &[0, 0])?;
        self.add_pane(Pane::new("problems", SizeConstraints::flexible(160, 80)), 300, &[1, 1])?;
        self.report()?;

        let outcome = self.grid.resize_view(&[0, 0], 1000)?;
        tracing::info!(
            "Resized outline: requested {}, realized {}",
            outcome.requested,
            outcome.realized
        );
        self.report()?;

        let size = self.grid.size()?;
        let fit = self.grid.layout(size.width / 2, size.height / 2)?;
        tracing::info!("Halved window, fit: {:?}", fit);
        self.report()?;

        self.grid.move_view(&[1, 1], &[0, 1])?;
        tracing::info!("Moved problems next to the editor");
        self.report()?;

        self.close_pane(&[0, 0])?;
        self.report()?;

        for pane in self.grid.dispose() {
            tracing::info!("Released {}", pane.name);
        }
        Ok(())
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    tracing::info!("Starting splitgrid-demo");

    let explicit = std::env::args_os().nth(1).map(PathBuf::from);
    let config = Config::resolve(explicit.as_deref()).context("resolving configuration")?;

    App::new(&config).run()
}
