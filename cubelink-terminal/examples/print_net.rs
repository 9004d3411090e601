//! Example: apply a move sequence and print the cube as an unfolded net
//!
//! Usage: cargo run --example print_net -- "R U R' U'"

use crossterm::{
    style::{Color, Print, ResetColor, SetBackgroundColor},
    QueueableCommand,
};
use cubelink_core::{parse_moves, Cube, Direction, GridPos};
use std::env;
use std::io::{self, stdout, Write};

/// Sticker rows of one face as seen from outside, top row first
fn face_grid(cube: &Cube, direction: Direction) -> [[Option<[u8; 3]>; 3]; 3] {
    let mut grid = [[None; 3]; 3];
    for (row, v) in [1i8, 0, -1].into_iter().enumerate() {
        for (col, u) in [-1i8, 0, 1].into_iter().enumerate() {
            let pos = match direction {
                Direction::PosZ => GridPos::new(u, v, 1),
                Direction::NegZ => GridPos::new(-u, v, -1),
                Direction::PosX => GridPos::new(1, v, -u),
                Direction::NegX => GridPos::new(-1, v, u),
                Direction::PosY => GridPos::new(u, 1, -v),
                Direction::NegY => GridPos::new(u, -1, v),
            };
            grid[row][col] = cube
                .at(pos)
                .and_then(|c| c.stickers.get(direction))
                .map(|c| c.rgb());
        }
    }
    grid
}

fn print_band<W: Write>(out: &mut W, faces: &[Option<Direction>], cube: &Cube) -> io::Result<()> {
    for row in 0..3 {
        for face in faces {
            match face {
                Some(direction) => {
                    for cell in face_grid(cube, *direction)[row] {
                        let [r, g, b] = cell.unwrap_or([0, 0, 0]);
                        out.queue(SetBackgroundColor(Color::Rgb { r, g, b }))?;
                        out.queue(Print("  "))?;
                    }
                    out.queue(ResetColor)?;
                }
                None => {
                    out.queue(Print("      "))?;
                }
            }
            out.queue(Print(" "))?;
        }
        out.queue(Print("\n"))?;
    }
    Ok(())
}

fn main() -> io::Result<()> {
    let sequence = env::args().nth(1).unwrap_or_default();
    let moves = parse_moves(&sequence)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?;

    let mut cube = Cube::solved();
    for command in &moves {
        cube.apply(*command);
    }

    println!("Applied {} quarter turns", moves.len());
    let mut out = stdout();
    print_band(&mut out, &[None, Some(Direction::PosY)], &cube)?;
    print_band(
        &mut out,
        &[
            Some(Direction::NegX),
            Some(Direction::PosZ),
            Some(Direction::PosX),
            Some(Direction::NegZ),
        ],
        &cube,
    )?;
    print_band(&mut out, &[None, Some(Direction::NegY)], &cube)?;
    out.flush()?;

    println!("{}", if cube.is_solved() { "solved" } else { "scrambled" });
    Ok(())
}
