use slotmap::SlotMap;

use crate::core::diagnostics::Diagnostics;
use crate::core::error::WorldError;
use crate::spatial::occupancy::OccupancyMap;

use super::settings::{resolve, WorldConfig};
use super::{RenderSurface, TickStats, Ticker, World};

pub(super) fn create_world(
    config: &WorldConfig,
    surface: Box<dyn RenderSurface>,
    diagnostics: Box<dyn Diagnostics>,
) -> Result<World, WorldError> {
    let settings = resolve(config, diagnostics.as_ref())?;

    Ok(World {
        map: OccupancyMap::new(settings.width, settings.height),
        bodies: SlotMap::with_key(),
        order: Vec::new(),
        ticker: Ticker::new(settings.frame_rate),
        stats: TickStats::default(),
        settings,
        surface,
        diagnostics,
    })
}
