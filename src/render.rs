//! Text frame rendering. Consumes read-only world state and never feeds
//! anything back into the simulation.

use std::io;

use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::style::Stylize;
use crossterm::terminal::{Clear, ClearType};

use crate::engine::TickSummary;
use crate::entity::{EntityKind, GrowthStage};
use crate::grid::GridPos;
use crate::world::World;

const SAPLING: char = '.';
const MATURE_TREE: char = 't';
const ELDER_TREE: char = 'T';
const LUMBERJACK: char = 'L';
const BEAR: char = 'B';
const EMPTY: char = ' ';

/// One full frame: banner, census header and the bordered grid. Each cell
/// shows its top-priority occupant (bear over lumberjack over tree).
pub fn frame(world: &World, summary: &TickSummary, title: &str, color: bool) -> String {
    let width = world.grid().width();
    let height = world.grid().height();
    let mut out = String::new();

    let rule = "-".repeat(50);
    out.push_str(&rule);
    out.push('\n');
    out.push_str(title);
    out.push('\n');
    out.push_str(&rule);
    out.push_str("\n\n");
    out.push_str(&format!(
        "Month: {} | Trees: {} | Lumberjacks: {} | Bears: {}\n\n",
        summary.month, summary.trees, summary.lumberjacks, summary.bears
    ));

    let border = format!("+{} +", " -".repeat(width as usize));
    out.push_str(&border);
    out.push('\n');
    for y in 0..height {
        out.push('|');
        for x in 0..width {
            out.push(' ');
            out.push_str(&cell_symbol(world, GridPos::new(x, y), color));
        }
        out.push_str(" |\n");
    }
    out.push_str(&border);
    out.push('\n');
    out
}

fn cell_symbol(world: &World, pos: GridPos, color: bool) -> String {
    let kind = match world.display_occupant(pos) {
        Some(entity) => entity.kind,
        None => return EMPTY.to_string(),
    };
    match kind {
        EntityKind::Tree { stage, .. } => {
            let glyph = match stage {
                GrowthStage::Sapling => SAPLING,
                GrowthStage::Mature => MATURE_TREE,
                GrowthStage::Elder => ELDER_TREE,
            };
            if color {
                glyph.green().to_string()
            } else {
                glyph.to_string()
            }
        }
        EntityKind::Lumberjack { .. } => {
            if color {
                LUMBERJACK.cyan().to_string()
            } else {
                LUMBERJACK.to_string()
            }
        }
        EntityKind::Bear { .. } => {
            if color {
                BEAR.red().to_string()
            } else {
                BEAR.to_string()
            }
        }
    }
}

/// Clear the terminal and home the cursor before the next frame.
pub fn clear_screen() -> io::Result<()> {
    execute!(io::stdout(), Clear(ClearType::All), MoveTo(0, 0))
}
