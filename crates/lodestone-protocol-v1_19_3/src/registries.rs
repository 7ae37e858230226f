use std::collections::HashMap;

use lodestone_protocol_core::{CodecContext, CodecResult};
use tracing::debug;

/// Level event ids known to 1.19.3. 1038 was retired and is absent.
const LEVEL_EVENTS: &[(i32, &str)] = &[
    (1000, "block_dispenser_dispense"),
    (1001, "block_dispenser_fail"),
    (1002, "block_dispenser_launch"),
    (1003, "entity_endereye_launch"),
    (1004, "entity_firework_shoot"),
    (1005, "block_iron_door_open"),
    (1006, "block_wooden_door_open"),
    (1007, "block_wooden_trapdoor_open"),
    (1008, "block_fence_gate_open"),
    (1009, "block_fire_extinguish"),
    (1010, "record"),
    (1011, "block_iron_door_close"),
    (1012, "block_wooden_door_close"),
    (1013, "block_wooden_trapdoor_close"),
    (1014, "block_fence_gate_close"),
    (1015, "entity_ghast_warn"),
    (1016, "entity_ghast_shoot"),
    (1017, "entity_enderdragon_shoot"),
    (1018, "entity_blaze_shoot"),
    (1019, "entity_zombie_attack_door_wood"),
    (1020, "entity_zombie_attack_door_iron"),
    (1021, "entity_zombie_break_door_wood"),
    (1022, "entity_wither_break_block"),
    (1023, "entity_wither_spawn"),
    (1024, "entity_wither_shoot"),
    (1025, "entity_bat_takeoff"),
    (1026, "entity_zombie_infect"),
    (1027, "entity_zombie_villager_converted"),
    (1028, "entity_enderdragon_death"),
    (1029, "block_anvil_destroy"),
    (1030, "block_anvil_use"),
    (1031, "block_anvil_land"),
    (1032, "block_portal_travel"),
    (1033, "block_chorus_flower_grow"),
    (1034, "block_chorus_flower_death"),
    (1035, "block_brewing_stand_brew"),
    (1036, "block_iron_trapdoor_close"),
    (1037, "block_iron_trapdoor_open"),
    (1039, "entity_phantom_bite"),
    (1040, "entity_zombie_converted_to_drowned"),
    (1041, "entity_husk_converted_to_zombie"),
    (1042, "block_grindstone_use"),
    (1043, "item_book_page_turn"),
    (1044, "block_smithing_table_use"),
    (1045, "pointed_dripstone_land"),
    (1046, "drip_lava_into_cauldron"),
    (1047, "drip_water_into_cauldron"),
    (1048, "skeleton_converted_to_stray"),
    (1500, "composter"),
    (1501, "block_lava_extinguish"),
    (1502, "block_redstone_torch_burnout"),
    (1503, "block_end_portal_frame_fill"),
    (1504, "dripstone_drip"),
    (1505, "bonemeal_grow_with_sound"),
    (2000, "smoke"),
    (2001, "break_block"),
    (2002, "break_splash_potion"),
    (2003, "break_eye_of_ender"),
    (2004, "mob_spawn"),
    (2005, "bonemeal_grow"),
    (2006, "enderdragon_fireball_explode"),
    (2007, "break_splash_potion_instant"),
    (2008, "enderdragon_destroy_block"),
    (2009, "wet_sponge_vaporize"),
    (3000, "end_gateway_spawn"),
    (3001, "enderdragon_growl"),
    (3002, "electric_spark"),
    (3003, "wax_on"),
    (3004, "wax_off"),
    (3005, "scrape"),
    (3006, "sculk_charge"),
    (3007, "sculk_shrieker_shriek"),
];

/// Sound event names in 1.19.3 registration order, one per line.
///
/// A registry dump loaded with [`sound_table_from_json`] takes precedence
/// when a server ships different data.
const BUILTIN_SOUNDS: &str = include_str!("../assets/sounds.txt");

const MINECRAFT_NAMESPACE: &str = "minecraft:";

pub fn level_events() -> HashMap<i32, String> {
    LEVEL_EVENTS
        .iter()
        .map(|(id, name)| (*id, name.to_string()))
        .collect()
}

pub fn builtin_sounds() -> HashMap<String, i32> {
    sound_table(BUILTIN_SOUNDS.lines().map(str::to_string))
}

/// Number sounds by their position in `names`, dropping any `minecraft:`
/// namespace.
pub fn sound_table(names: impl IntoIterator<Item = String>) -> HashMap<String, i32> {
    names
        .into_iter()
        .enumerate()
        .map(|(id, name)| {
            let name = match name.strip_prefix(MINECRAFT_NAMESPACE) {
                Some(short) => short.to_string(),
                None => name,
            };
            (name, id as i32)
        })
        .collect()
}

/// Parse a sound registry dump: a JSON array of names in registry order.
pub fn sound_table_from_json(json: &str) -> CodecResult<HashMap<String, i32>> {
    let names: Vec<String> = serde_json::from_str(json)?;
    debug!("Sound table with {} entries", names.len());
    Ok(sound_table(names))
}

/// Lookup tables for this protocol version with the embedded sound list.
pub fn codec_context() -> CodecContext {
    CodecContext::new(level_events(), builtin_sounds())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lodestone_protocol_core::ErrorKind;

    #[test]
    fn test_level_event_table() {
        let events = level_events();
        assert_eq!(events.len(), LEVEL_EVENTS.len());
        assert_eq!(events[&1000], "block_dispenser_dispense");
        assert_eq!(events[&3007], "sculk_shrieker_shriek");
        assert!(!events.contains_key(&1038));
    }

    #[test]
    fn test_embedded_sounds_unique() {
        assert_eq!(builtin_sounds().len(), BUILTIN_SOUNDS.lines().count());
    }

    #[test]
    fn test_embedded_sound_ids() {
        let sounds = builtin_sounds();
        assert_eq!(sounds.len(), 1379);
        assert_eq!(sounds["entity.allay.ambient_with_item"], 0);
        assert_eq!(sounds["entity.allay.item_thrown"], 6);
        assert_eq!(sounds["ambient.cave"], 7);
        assert_eq!(sounds["entity.zombie_villager.step"], 1378);
    }

    #[test]
    fn test_sound_dump() {
        let table =
            sound_table_from_json(r#"["minecraft:ambient.cave", "ambient.basalt_deltas.additions"]"#)
                .unwrap();
        assert_eq!(table["ambient.cave"], 0);
        assert_eq!(table["ambient.basalt_deltas.additions"], 1);

        let err = sound_table_from_json(r#"{"not": "a list"}"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Schema);
    }

    #[test]
    fn test_context() {
        let ctx = codec_context();
        assert_eq!(ctx.level_event(1010).name(), Some("record"));
        assert_eq!(ctx.sound_name(ctx.sound_id("ui.button.click").unwrap()).unwrap(), "ui.button.click");
    }
}
