//! Draw command generation for a 2D canvas
//!
//! Pure function of `GameState`: the host replays the list on whatever
//! raster surface it has (HTML canvas on the web, JSON dump on native).

use serde::Serialize;

use crate::sim::{GamePhase, GameState};

/// Background gradient stops
pub const BACKGROUND_TOP: &str = "lightblue";
pub const BACKGROUND_BOTTOM: &str = "lightgreen";

pub const DEAD_COLUMN_COLOR: &str = "gray";
pub const OUTLINE_COLOR: &str = "azure";
pub const OUTLINE_LINE_WIDTH: f32 = 3.0;
pub const TEXT_COLOR: &str = "black";

/// Body fill by level (index = level % len)
pub const LEVEL_COLORS: [&str; 7] = [
    "#FFFFFF", // white
    "#FBBF24", // amber
    "#F97316", // orange
    "#EF4444", // red
    "#8B5CF6", // purple
    "#3B82F6", // blue
    "#10B981", // green
];

/// HUD layout
pub const HUD_FONT_SIZE: f32 = 20.0;
pub const HUD_TEXT_Y: f32 = 30.0;
pub const HUD_LEVEL_INSET: f32 = 100.0;
pub const MESSAGE_FONT_SIZE: f32 = 30.0;
pub const PAUSE_FONT_SIZE: f32 = 40.0;
pub const BODY_LABEL_FONT_SIZE: f32 = 20.0;
/// Baseline nudge that visually centres the body label
pub const BODY_LABEL_BASELINE: f32 = 7.0;

/// Progress bar layout
pub const BAR_INSET: f32 = 10.0;
pub const BAR_Y: f32 = 60.0;
pub const BAR_HEIGHT: f32 = 20.0;
pub const BAR_FONT_SIZE: f32 = 16.0;
pub const BAR_BACKGROUND: &str = "grey";
pub const BAR_FILL: &str = "green";
pub const BAR_BORDER: &str = "black";

const INSTRUCTIONS: [&str; 5] = [
    "How to Play",
    "Arrow keys, mouse or touch move the block.",
    "Line it up with the outline to score!",
    "Press Enter to start, Space to pause.",
    "Press H to see this again.",
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TextAlign {
    Left,
    Center,
}

/// One canvas operation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DrawCommand {
    Clear {
        width: f32,
        height: f32,
    },
    /// Vertical linear gradient over the whole canvas
    Background {
        width: f32,
        height: f32,
        top: &'static str,
        bottom: &'static str,
    },
    FillRect {
        rect: Rect,
        color: &'static str,
    },
    StrokeRect {
        rect: Rect,
        color: &'static str,
        line_width: f32,
    },
    /// `y` is the text baseline
    Text {
        text: String,
        x: f32,
        y: f32,
        size: f32,
        color: &'static str,
        align: TextAlign,
    },
}

/// Body colour for a level
pub fn level_color(level: u32) -> &'static str {
    LEVEL_COLORS[level as usize % LEVEL_COLORS.len()]
}

fn text(text: String, x: f32, y: f32, size: f32, align: TextAlign) -> DrawCommand {
    DrawCommand::Text {
        text,
        x,
        y,
        size,
        color: TEXT_COLOR,
        align,
    }
}

/// Build the full frame for the current state
pub fn frame_commands<R>(state: &GameState<R>) -> Vec<DrawCommand> {
    let config = &state.config;
    let width = config.canvas_width();
    let height = config.canvas_height;
    let center_x = width / 2.0;
    let center_y = height / 2.0;

    let mut cmds = Vec::with_capacity(16 + state.occupancy.columns());
    cmds.push(DrawCommand::Clear { width, height });
    cmds.push(DrawCommand::Background {
        width,
        height,
        top: BACKGROUND_TOP,
        bottom: BACKGROUND_BOTTOM,
    });

    if state.phase == GamePhase::Paused {
        if state.show_instructions {
            let line_height = MESSAGE_FONT_SIZE;
            let top = center_y - line_height * (INSTRUCTIONS.len() as f32 - 1.0) / 2.0;
            for (i, line) in INSTRUCTIONS.iter().enumerate() {
                let size = if i == 0 { MESSAGE_FONT_SIZE } else { BAR_FONT_SIZE };
                cmds.push(text(
                    line.to_string(),
                    center_x,
                    top + i as f32 * line_height,
                    size,
                    TextAlign::Center,
                ));
            }
        } else {
            cmds.push(text(
                "Pause".to_string(),
                center_x,
                center_y,
                PAUSE_FONT_SIZE,
                TextAlign::Center,
            ));
        }
    } else {
        push_playfield(state, &mut cmds);

        if let Some(message) = state.message {
            cmds.push(text(
                message.text(),
                center_x,
                center_y,
                MESSAGE_FONT_SIZE,
                TextAlign::Center,
            ));
        }
    }

    push_hud(state, &mut cmds);
    cmds
}

/// Body, dead columns and outline
fn push_playfield<R>(state: &GameState<R>, cmds: &mut Vec<DrawCommand>) {
    let config = &state.config;
    let size = config.cell_size;
    let row_y = config.outline_y();

    let body = &state.body;
    cmds.push(DrawCommand::FillRect {
        rect: Rect::new(body.x(), body.y(), body.size, body.size),
        color: level_color(body.level),
    });
    cmds.push(text(
        format!("Lv{}", body.level),
        body.x() + body.size / 2.0,
        body.y() + body.size / 2.0 + BODY_LABEL_BASELINE,
        BODY_LABEL_FONT_SIZE,
        TextAlign::Center,
    ));

    for column in state.occupancy.dead_columns() {
        cmds.push(DrawCommand::FillRect {
            rect: Rect::new(column as f32 * size, row_y, size, size),
            color: DEAD_COLUMN_COLOR,
        });
    }

    let outline = &state.outline;
    cmds.push(DrawCommand::StrokeRect {
        rect: Rect::new(outline.x(), outline.y(), outline.size, outline.size),
        color: OUTLINE_COLOR,
        line_width: OUTLINE_LINE_WIDTH,
    });
}

/// Score, level and progress bar
fn push_hud<R>(state: &GameState<R>, cmds: &mut Vec<DrawCommand>) {
    let width = state.config.canvas_width();

    cmds.push(text(
        format!("Score: {}", state.score()),
        BAR_INSET,
        HUD_TEXT_Y,
        HUD_FONT_SIZE,
        TextAlign::Left,
    ));
    cmds.push(text(
        format!("Level: {}", state.level()),
        width - HUD_LEVEL_INSET,
        HUD_TEXT_Y,
        HUD_FONT_SIZE,
        TextAlign::Left,
    ));

    let progress = state.progression.progress();
    let bar = Rect::new(BAR_INSET, BAR_Y, width - 2.0 * BAR_INSET, BAR_HEIGHT);
    cmds.push(DrawCommand::FillRect {
        rect: bar,
        color: BAR_BACKGROUND,
    });
    cmds.push(DrawCommand::FillRect {
        rect: Rect::new(bar.x, bar.y, bar.w * progress.fill(), bar.h),
        color: BAR_FILL,
    });
    cmds.push(DrawCommand::StrokeRect {
        rect: bar,
        color: BAR_BORDER,
        line_width: 1.0,
    });
    cmds.push(text(
        format!("{}% to Next Level", progress.percent()),
        width / 2.0,
        bar.y + bar.h - 5.0,
        BAR_FONT_SIZE,
        TextAlign::Center,
    ));
}
