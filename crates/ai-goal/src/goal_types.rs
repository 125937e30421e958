//! Standard goal types.
//!
//! Ids are namespaced `minecraft:<name>`; [`ALL`] is sorted by id.

use crate::GoalType;

/// Tameables attack whatever their tamer attacks.
pub const ATTACK_AFTER_OWNER: GoalType = GoalType::new("minecraft:attack_after_owner");
/// Creatures attack their target or a type of living entity.
pub const ATTACK_LIVING: GoalType = GoalType::new("minecraft:attack_living");
/// Iron golems attack monsters that are not creepers.
pub const ATTACK_NEAREST_NON_CREEPER_TARGET: GoalType = GoalType::new("minecraft:attack_nearest_non_creeper_target");
/// Creatures avoid other agents matching a predicate.
pub const AVOID_ENTITY: GoalType = GoalType::new("minecraft:avoid_entity");
/// Creatures avoid paths through a door.
pub const AVOID_OPEN_DOOR: GoalType = GoalType::new("minecraft:avoid_open_door");
/// Creatures avoid paths exposed to the daytime sky.
pub const AVOID_SUN: GoalType = GoalType::new("minecraft:avoid_sun");
/// Wolves beg humanoids for bones or meat.
pub const BEG: GoalType = GoalType::new("minecraft:beg");
/// Ridden creatures follow the rider's orders.
pub const CONTROLLED_BY_PLAYER: GoalType = GoalType::new("minecraft:controlled_by_player");
/// Village golems hunt monsters that are not creepers.
pub const DEFEND_VILLAGE: GoalType = GoalType::new("minecraft:defend_village");
/// Agents interact with a door.
pub const DOOR_INTERACT: GoalType = GoalType::new("minecraft:door_interact");
/// Agents eat grass for a fixed amount of time.
pub const EAT_GRASS: GoalType = GoalType::new("minecraft:eat_grass");
/// Creatures pick a target matching a predicate.
pub const FIND_NEAREST_ATTACABLE_TARGET: GoalType = GoalType::new("minecraft:find_nearest_attacable_target");
/// Agents find the closest living entity of a type.
pub const FIND_NEAREST_ENTITY: GoalType = GoalType::new("minecraft:find_nearest_entity");
/// Agents target the closest humanoid.
pub const FIND_NEAREST_PLAYER: GoalType = GoalType::new("minecraft:find_nearest_player");
/// Villagers walk after an iron golem.
pub const FOLLOW_GOLEM: GoalType = GoalType::new("minecraft:follow_golem");
/// Tameables follow their tamer.
pub const FOLLOW_OWNER: GoalType = GoalType::new("minecraft:follow_owner");
/// Baby animals follow an adult of the same type.
pub const FOLLOW_PARENT: GoalType = GoalType::new("minecraft:follow_parent");
/// Villagers harvest farmland.
pub const HARVEST_FARMLAND: GoalType = GoalType::new("minecraft:harvest_farmland");
/// Agents jump at their attack target.
pub const LEAP_AT_TARGET: GoalType = GoalType::new("minecraft:leap_at_target");
/// Villagers look at the humanoid they trade with.
pub const LOOK_AT_TRADER: GoalType = GoalType::new("minecraft:look_at_trader");
/// Iron golems look at villagers and sometimes offer poppies.
pub const LOOK_AT_VILLAGER: GoalType = GoalType::new("minecraft:look_at_villager");
/// Agents look around while idle.
pub const LOOK_IDLE: GoalType = GoalType::new("minecraft:look_idle");
/// Adult animals mate and may spawn a baby.
pub const MATE: GoalType = GoalType::new("minecraft:mate");
/// Creatures move indoors in a village at night.
pub const MOVE_IN_DOORS: GoalType = GoalType::new("minecraft:move_in_doors");
/// Creatures move through the village.
pub const MOVE_THROUGH_VILLAGE: GoalType = GoalType::new("minecraft:move_through_village");
/// Creatures navigate to the closest valid block.
pub const MOVE_TO_BLOCK: GoalType = GoalType::new("minecraft:move_to_block");
/// Creatures move to their attack target.
pub const MOVE_TO_LIVING: GoalType = GoalType::new("minecraft:move_to_living");
/// Creatures move to a position without automatic lookup.
pub const MOVE_TO_LOCATION: GoalType = GoalType::new("minecraft:move_to_location");
/// Ocelots move to a position and sit down.
pub const OCELOT_SIT: GoalType = GoalType::new("minecraft:ocelot_sit");
/// Agents attack the way ocelots do.
pub const OCELOT_STYLE_ATTACK: GoalType = GoalType::new("minecraft:ocelot_style_attack");
/// Agents open doors they interact with.
pub const OPEN_DOOR: GoalType = GoalType::new("minecraft:open_door");
/// Creatures run around randomly, trying to escape.
pub const PANIC: GoalType = GoalType::new("minecraft:panic");
/// Villagers play with each other.
pub const PLAY_WITH_OTHER_VILLAGER: GoalType = GoalType::new("minecraft:play_with_other_villager");
/// Tameables attack whatever attacked their tamer.
pub const PROTECT_OWNER: GoalType = GoalType::new("minecraft:protect_owner");
/// Ranged attackers shoot projectiles at their target.
pub const RANGED_ATTACK: GoalType = GoalType::new("minecraft:ranged_attack");
/// Creatures (and nearby kin) attack whoever attacked them.
pub const REVENGE: GoalType = GoalType::new("minecraft:revenge");
/// Horses run around while being tamed.
pub const RUN_AROUND_LIKE_CRAZY: GoalType = GoalType::new("minecraft:run_around_like_crazy");
/// Tameables sit when ordered.
pub const SIT: GoalType = GoalType::new("minecraft:sit");
/// Creepers swell towards their target and explode.
pub const SWELL: GoalType = GoalType::new("minecraft:swell");
/// Ground-navigating agents swim in liquids.
pub const SWIMMING: GoalType = GoalType::new("minecraft:swimming");
/// Creatures search for an attack target.
pub const TARGET: GoalType = GoalType::new("minecraft:target");
/// Creatures follow a humanoid holding a tempting item.
pub const TEMPT: GoalType = GoalType::new("minecraft:tempt");
/// Villagers stay near the humanoid they trade with.
pub const TRADE_PLAYER: GoalType = GoalType::new("minecraft:trade_player");
/// Tameables hunt a target until tamed.
pub const UNTAMED_FIND_NEAREST_ATTACKABLE: GoalType = GoalType::new("minecraft:untamed_find_nearest_attackable");
/// Villagers throw items to each other.
pub const VILLAGER_EXCHANGE_ITEM: GoalType = GoalType::new("minecraft:villager_exchange_item");
/// Villagers mate and may spawn a baby.
pub const VILLAGER_MATE: GoalType = GoalType::new("minecraft:villager_mate");
/// Creatures walk around.
pub const WANDER: GoalType = GoalType::new("minecraft:wander");
/// Agents watch other entities.
pub const WATCH_CLOSEST: GoalType = GoalType::new("minecraft:watch_closest");
/// Agents watch the entity they interact with (different flags from WATCH_CLOSEST).
pub const WATCH_CLOSEST_AS_INTERACTING: GoalType = GoalType::new("minecraft:watch_closest_as_interacting");

pub const ALL: &[GoalType] = &[
    ATTACK_AFTER_OWNER,
    ATTACK_LIVING,
    ATTACK_NEAREST_NON_CREEPER_TARGET,
    AVOID_ENTITY,
    AVOID_OPEN_DOOR,
    AVOID_SUN,
    BEG,
    CONTROLLED_BY_PLAYER,
    DEFEND_VILLAGE,
    DOOR_INTERACT,
    EAT_GRASS,
    FIND_NEAREST_ATTACABLE_TARGET,
    FIND_NEAREST_ENTITY,
    FIND_NEAREST_PLAYER,
    FOLLOW_GOLEM,
    FOLLOW_OWNER,
    FOLLOW_PARENT,
    HARVEST_FARMLAND,
    LEAP_AT_TARGET,
    LOOK_AT_TRADER,
    LOOK_AT_VILLAGER,
    LOOK_IDLE,
    MATE,
    MOVE_IN_DOORS,
    MOVE_THROUGH_VILLAGE,
    MOVE_TO_BLOCK,
    MOVE_TO_LIVING,
    MOVE_TO_LOCATION,
    OCELOT_SIT,
    OCELOT_STYLE_ATTACK,
    OPEN_DOOR,
    PANIC,
    PLAY_WITH_OTHER_VILLAGER,
    PROTECT_OWNER,
    RANGED_ATTACK,
    REVENGE,
    RUN_AROUND_LIKE_CRAZY,
    SIT,
    SWELL,
    SWIMMING,
    TARGET,
    TEMPT,
    TRADE_PLAYER,
    UNTAMED_FIND_NEAREST_ATTACKABLE,
    VILLAGER_EXCHANGE_ITEM,
    VILLAGER_MATE,
    WANDER,
    WATCH_CLOSEST,
    WATCH_CLOSEST_AS_INTERACTING,
];

pub fn by_id(id: &str) -> Option<GoalType> {
    ALL.binary_search_by(|t| t.id().cmp(id)).ok().map(|i| ALL[i])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_is_sorted_and_unique() {
        assert!(ALL.windows(2).all(|w| w[0].id() < w[1].id()));
    }

    #[test]
    fn lookup_by_id() {
        assert_eq!(by_id("minecraft:wander"), Some(WANDER));
        assert_eq!(
            by_id("minecraft:watch_closest_as_interacting"),
            Some(WATCH_CLOSEST_AS_INTERACTING)
        );
        assert_eq!(by_id("minecraft:fly"), None);
        assert_eq!(WANDER.namespace(), "minecraft");
    }
}
