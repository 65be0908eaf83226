// src/models/direction.rs
//
// Compass directions and the raw steps the direction source hands out

use nannou::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn reverse(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// True for the left/right and up/down pairs.
    pub fn is_reverse_of(self, other: Direction) -> bool {
        self.reverse() == other
    }

    /// Unit offset in canvas space, where y grows downward.
    pub fn unit(self) -> Vec2 {
        match self {
            Direction::Up => vec2(0.0, -1.0),
            Direction::Down => vec2(0.0, 1.0),
            Direction::Left => vec2(-1.0, 0.0),
            Direction::Right => vec2(1.0, 0.0),
        }
    }
}

/// One instruction from the direction source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirectionStep {
    pub direction: Direction,
    #[serde(rename = "distance")]
    pub raw_distance: f32,
}

impl DirectionStep {
    pub fn new(direction: Direction, raw_distance: f32) -> Self {
        Self {
            direction,
            raw_distance,
        }
    }
}
