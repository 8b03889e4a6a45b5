//! Render output
//!
//! The core never touches pixels. Each frame it produces a list of sprite
//! instances; a host-side `RenderSink` draws them however it likes.

pub mod sprite;

pub use sprite::{Sprite, SpriteInstance, scene_sprites};

use crate::sim::GameState;

/// Draw target supplied by the host
pub trait RenderSink {
    fn clear(&mut self) {}
    fn draw(&mut self, sprite: &SpriteInstance);
}

/// Clear the sink and draw the current scene into it
pub fn render<R: RenderSink>(state: &GameState, sink: &mut R) {
    sink.clear();
    for sprite in scene_sprites(state) {
        sink.draw(&sprite);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::{BLACK_BALL_ID, CUE_BALL_ID};

    #[derive(Default)]
    struct Collect(Vec<SpriteInstance>);

    impl RenderSink for Collect {
        fn draw(&mut self, sprite: &SpriteInstance) {
            self.0.push(*sprite);
        }
    }

    #[test]
    fn test_scene_at_rack() {
        let state = GameState::default();
        let mut sink = Collect::default();
        render(&state, &mut sink);

        let kinds: Vec<Sprite> = sink.0.iter().filter_map(|s| s.sprite()).collect();
        assert_eq!(
            kinds,
            vec![Sprite::Table, Sprite::WhiteBall, Sprite::BlackBall, Sprite::Cue]
        );
        assert_eq!(sink.0[1].position, CUE_BALL_SPOT.to_array());
        assert_eq!(sink.0[1].origin, BALL_ORIGIN.to_array());
        assert_eq!(sink.0[3].origin, [CUE_ANCHOR_REST, CUE_ANCHOR_Y]);
    }

    #[test]
    fn test_pocketed_ball_and_cue_hidden_during_shot() {
        let mut state = GameState::default();
        state.shoot_ball(CUE_BALL_ID, 800.0, 0.0).unwrap();
        state.ball_mut(BLACK_BALL_ID).unwrap().pocket();

        let sprites = scene_sprites(&state);
        assert_eq!(sprites.len(), 2);
        assert_eq!(sprites[1].sprite(), Some(Sprite::WhiteBall));
    }

    #[test]
    fn test_instances_are_plain_bytes() {
        let sprites = scene_sprites(&GameState::default());
        let bytes: &[u8] = bytemuck::cast_slice(&sprites);
        assert_eq!(bytes.len(), sprites.len() * std::mem::size_of::<SpriteInstance>());
        assert_eq!(std::mem::size_of::<SpriteInstance>(), 24);
    }
}
