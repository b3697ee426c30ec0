use std::fmt::Write;

use cube_core::{Color, Cube, Face, transforms::face_grid};
use itertools::Itertools;
use owo_colors::OwoColorize;

/// How cells of the net are drawn
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Style {
    /// Colored blocks
    Color,
    /// The initial of each color, for terminals without color
    Plain,
}

fn cell(color: Color, style: Style) -> String {
    match style {
        Style::Plain => format!("{} ", color.initial()),
        Style::Color => {
            let block = "  ";
            match color {
                Color::White => block.on_white().to_string(),
                Color::Yellow => block.on_bright_yellow().to_string(),
                Color::Orange => block.on_truecolor(255, 140, 0).to_string(),
                Color::Red => block.on_red().to_string(),
                Color::Green => block.on_green().to_string(),
                Color::Blue => block.on_blue().to_string(),
            }
        }
    }
}

/// The cube unfolded into a cross, U on top, then L F R B, then D
pub fn render(cube: &Cube, style: Style) -> String {
    let row = |face: Face, row: usize| {
        face_grid(cube, face)[row]
            .iter()
            .map(|&color| cell(color, style))
            .join("")
    };
    let indent = " ".repeat(6);

    let mut out = String::new();
    for r in 0..3 {
        let _ = writeln!(out, "{indent} {}", row(Face::U, r));
    }
    for r in 0..3 {
        let middle = [Face::L, Face::F, Face::R, Face::B]
            .into_iter()
            .map(|face| row(face, r))
            .join(" ");
        let _ = writeln!(out, "{middle}");
    }
    for r in 0..3 {
        let _ = writeln!(out, "{indent} {}", row(Face::D, r));
    }
    out
}
