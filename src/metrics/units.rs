//! Static id-to-name tables for units, buildings, techs, and upgrades.
//!
//! Build-order extraction resolves command payloads through these tables.
//! Ids not listed resolve to `None`; callers render a hex fallback rather
//! than dropping the entry.

/// Resolves a unit or building id to its display name.
#[must_use]
pub const fn unit_name(id: u16) -> Option<&'static str> {
    match id {
        // Terran units
        0 => Some("Marine"),
        1 => Some("Ghost"),
        2 => Some("Vulture"),
        3 => Some("Goliath"),
        5 => Some("Siege Tank"),
        7 => Some("SCV"),
        8 => Some("Wraith"),
        9 => Some("Science Vessel"),
        11 => Some("Dropship"),
        12 => Some("Battlecruiser"),
        14 => Some("Nuclear Missile"),
        32 => Some("Firebat"),
        34 => Some("Medic"),
        58 => Some("Valkyrie"),
        // Zerg units
        35 => Some("Larva"),
        37 => Some("Zergling"),
        38 => Some("Hydralisk"),
        39 => Some("Ultralisk"),
        41 => Some("Drone"),
        42 => Some("Overlord"),
        43 => Some("Mutalisk"),
        44 => Some("Guardian"),
        45 => Some("Queen"),
        46 => Some("Defiler"),
        47 => Some("Scourge"),
        50 => Some("Infested Terran"),
        62 => Some("Devourer"),
        103 => Some("Lurker"),
        // Protoss units
        60 => Some("Corsair"),
        61 => Some("Dark Templar"),
        63 => Some("Dark Archon"),
        64 => Some("Probe"),
        65 => Some("Zealot"),
        66 => Some("Dragoon"),
        67 => Some("High Templar"),
        68 => Some("Archon"),
        69 => Some("Shuttle"),
        70 => Some("Scout"),
        71 => Some("Arbiter"),
        72 => Some("Carrier"),
        83 => Some("Reaver"),
        84 => Some("Observer"),
        // Terran buildings
        106 => Some("Command Center"),
        107 => Some("Comsat Station"),
        108 => Some("Nuclear Silo"),
        109 => Some("Supply Depot"),
        110 => Some("Refinery"),
        111 => Some("Barracks"),
        112 => Some("Academy"),
        113 => Some("Factory"),
        114 => Some("Starport"),
        115 => Some("Control Tower"),
        116 => Some("Science Facility"),
        117 => Some("Covert Ops"),
        118 => Some("Physics Lab"),
        120 => Some("Machine Shop"),
        122 => Some("Engineering Bay"),
        123 => Some("Armory"),
        124 => Some("Missile Turret"),
        125 => Some("Bunker"),
        // Zerg buildings
        131 => Some("Hatchery"),
        132 => Some("Lair"),
        133 => Some("Hive"),
        134 => Some("Nydus Canal"),
        135 => Some("Hydralisk Den"),
        136 => Some("Defiler Mound"),
        137 => Some("Greater Spire"),
        138 => Some("Queen's Nest"),
        139 => Some("Evolution Chamber"),
        140 => Some("Ultralisk Cavern"),
        141 => Some("Spire"),
        142 => Some("Spawning Pool"),
        143 => Some("Creep Colony"),
        144 => Some("Spore Colony"),
        146 => Some("Sunken Colony"),
        149 => Some("Extractor"),
        // Protoss buildings
        154 => Some("Nexus"),
        155 => Some("Robotics Facility"),
        156 => Some("Pylon"),
        157 => Some("Assimilator"),
        159 => Some("Observatory"),
        160 => Some("Gateway"),
        162 => Some("Photon Cannon"),
        163 => Some("Citadel of Adun"),
        164 => Some("Cybernetics Core"),
        165 => Some("Templar Archives"),
        166 => Some("Forge"),
        167 => Some("Stargate"),
        169 => Some("Fleet Beacon"),
        170 => Some("Arbiter Tribunal"),
        171 => Some("Robotics Support Bay"),
        172 => Some("Shield Battery"),
        _ => None,
    }
}

/// Resolves a tech id (Research command payload) to its display name.
#[must_use]
pub const fn tech_name(id: u8) -> Option<&'static str> {
    match id {
        0 => Some("Stim Packs"),
        1 => Some("Lockdown"),
        2 => Some("EMP Shockwave"),
        3 => Some("Spider Mines"),
        5 => Some("Siege Mode"),
        7 => Some("Irradiate"),
        8 => Some("Yamato Gun"),
        9 => Some("Cloaking Field"),
        10 => Some("Personnel Cloaking"),
        11 => Some("Burrowing"),
        13 => Some("Spawn Broodlings"),
        14 => Some("Plague"),
        15 => Some("Consume"),
        16 => Some("Ensnare"),
        19 => Some("Psionic Storm"),
        20 => Some("Hallucination"),
        21 => Some("Recall"),
        22 => Some("Stasis Field"),
        24 => Some("Restoration"),
        25 => Some("Disruption Web"),
        27 => Some("Mind Control"),
        30 => Some("Optical Flare"),
        32 => Some("Lurker Aspect"),
        _ => None,
    }
}

/// Resolves an upgrade id (Upgrade command payload) to its display name.
#[must_use]
pub const fn upgrade_name(id: u8) -> Option<&'static str> {
    match id {
        0 => Some("Terran Infantry Armor"),
        1 => Some("Terran Vehicle Plating"),
        2 => Some("Terran Ship Plating"),
        3 => Some("Zerg Carapace"),
        4 => Some("Zerg Flyer Carapace"),
        5 => Some("Protoss Ground Armor"),
        6 => Some("Protoss Air Armor"),
        7 => Some("Terran Infantry Weapons"),
        8 => Some("Terran Vehicle Weapons"),
        9 => Some("Terran Ship Weapons"),
        10 => Some("Zerg Melee Attacks"),
        11 => Some("Zerg Missile Attacks"),
        12 => Some("Zerg Flyer Attacks"),
        13 => Some("Protoss Ground Weapons"),
        14 => Some("Protoss Air Weapons"),
        15 => Some("Protoss Plasma Shields"),
        16 => Some("U-238 Shells"),
        17 => Some("Ion Thrusters"),
        19 => Some("Titan Reactor"),
        20 => Some("Ocular Implants"),
        21 => Some("Moebius Reactor"),
        22 => Some("Apollo Reactor"),
        23 => Some("Colossus Reactor"),
        24 => Some("Ventral Sacs"),
        25 => Some("Antennae"),
        26 => Some("Pneumatized Carapace"),
        27 => Some("Metabolic Boost"),
        28 => Some("Adrenal Glands"),
        29 => Some("Muscular Augments"),
        30 => Some("Grooved Spines"),
        31 => Some("Gamete Meiosis"),
        32 => Some("Metasynaptic Node"),
        33 => Some("Singularity Charge"),
        34 => Some("Leg Enhancements"),
        35 => Some("Scarab Damage"),
        36 => Some("Reaver Capacity"),
        37 => Some("Gravitic Drive"),
        38 => Some("Sensor Array"),
        39 => Some("Gravitic Boosters"),
        40 => Some("Khaydarin Amulet"),
        41 => Some("Apial Sensors"),
        42 => Some("Gravitic Thrusters"),
        43 => Some("Carrier Capacity"),
        44 => Some("Khaydarin Core"),
        47 => Some("Argus Jewel"),
        49 => Some("Argus Talisman"),
        54 => Some("Charon Boosters"),
        _ => None,
    }
}
