//! Sprite instances handed to the presentation layer

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use crate::consts::BALL_ORIGIN;
use crate::sim::{BallColor, GameState, TurnPhase};

/// Images the presentation layer needs
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sprite {
    Table = 0,
    WhiteBall = 1,
    BlackBall = 2,
    Cue = 3,
}

impl Sprite {
    pub fn from_u32(v: u32) -> Option<Self> {
        match v {
            0 => Some(Sprite::Table),
            1 => Some(Sprite::WhiteBall),
            2 => Some(Sprite::BlackBall),
            3 => Some(Sprite::Cue),
            _ => None,
        }
    }

    pub fn for_ball(color: BallColor) -> Self {
        match color {
            BallColor::White => Sprite::WhiteBall,
            BallColor::Black => Sprite::BlackBall,
        }
    }
}

/// One image to draw: translate to `position`, rotate, then draw the image
/// with `origin` at that point. Plain data so it can go straight into an
/// instance buffer.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct SpriteInstance {
    pub position: [f32; 2],
    pub origin: [f32; 2],
    pub rotation: f32,
    pub sprite: u32,
}

impl SpriteInstance {
    pub fn new(sprite: Sprite, position: Vec2, origin: Vec2, rotation: f32) -> Self {
        Self {
            position: position.to_array(),
            origin: origin.to_array(),
            rotation,
            sprite: sprite as u32,
        }
    }

    pub fn sprite(&self) -> Option<Sprite> {
        Sprite::from_u32(self.sprite)
    }
}

/// Everything visible this frame, back to front: table, balls on the table
/// in roster order, then the cue while a shot can be taken.
pub fn scene_sprites(state: &GameState) -> Vec<SpriteInstance> {
    let mut sprites = Vec::with_capacity(state.balls.len() + 2);
    sprites.push(SpriteInstance::new(Sprite::Table, Vec2::ZERO, Vec2::ZERO, 0.0));

    for ball in state.balls.iter().filter(|b| b.in_play()) {
        sprites.push(SpriteInstance::new(
            Sprite::for_ball(ball.color),
            ball.pos,
            BALL_ORIGIN,
            0.0,
        ));
    }

    if state.phase == TurnPhase::AwaitingShot {
        sprites.push(SpriteInstance::new(
            Sprite::Cue,
            state.cue.pos,
            state.cue.origin(),
            state.cue.rotation,
        ));
    }

    sprites
}
