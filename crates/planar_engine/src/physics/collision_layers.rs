//! Collision layer system for filtering collision detection
//!
//! Every body sits on one or more layers. Two bodies are only tested
//! against each other when they share at least one layer.

use bitflags::bitflags;

bitflags! {
    /// Set of collision layers a body belongs to
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CollisionLayers: u32 {
        /// Layer every body starts on
        const DEFAULT = 1 << 0;

        /// Player character layer
        const PLAYER = 1 << 1;

        /// Enemy character layer
        const ENEMY = 1 << 2;

        /// Projectiles (bullets, missiles, etc.)
        const PROJECTILE = 1 << 3;

        /// Static environment geometry
        const ENVIRONMENT = 1 << 4;

        /// Trigger volumes (no physical response)
        const TRIGGER = 1 << 5;

        /// Pickups and collectibles
        const PICKUP = 1 << 6;

        // Bits 8-31 are free for game-defined layers
        const _ = !0;
    }
}

impl Default for CollisionLayers {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl CollisionLayers {
    /// A game-defined layer, `bit` in `8..32`
    pub fn custom(bit: u32) -> Option<Self> {
        (8..32).contains(&bit).then(|| Self::from_bits_retain(1 << bit))
    }

    /// Check if two layer sets have a layer in common
    pub fn shares_layer(self, other: Self) -> bool {
        self.intersects(other)
    }
}
