//! Crash detection between the dragon and the scenery.
//!
//! The dragon crashes when its mask shares a solid pixel with any collidable
//! entity's mask, or when it has flown completely off the top of the screen.

use crate::game::dragon::Dragon;
use crate::game::entity::Entity;

/// Returns true if `player` has crashed into anything in `entities`.
pub fn check_collision(player: &Dragon, entities: &[Entity]) -> bool {
    let player_rect = player.rect();
    if player_rect.bottom() < 0 {
        return true;
    }

    entities
        .iter()
        .filter(|entity| entity.is_collidable())
        .filter_map(|entity| entity.mask().map(|mask| (entity.rect(), mask)))
        .any(|(rect, mask)| {
            player
                .mask()
                .overlaps(mask, (rect.x - player_rect.x, rect.y - player_rect.y))
        })
}
