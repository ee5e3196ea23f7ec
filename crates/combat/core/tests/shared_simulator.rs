use std::thread;

use combat_core::{
    Army, Biome, BiomeBonusTable, CombatParameters, CombatSimulator, RaidSimulator, TroopTier,
    TroopType,
};

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn simulators_are_shareable() {
    assert_send_sync::<CombatSimulator>();
    assert_send_sync::<RaidSimulator>();
    assert_send_sync::<BiomeBonusTable>();
}

#[test]
fn threads_sharing_a_simulator_agree_bitwise() {
    let raid = RaidSimulator::new(CombatParameters::default()).unwrap();
    let table = BiomeBonusTable::standard(CombatParameters::DEFAULT_BIOME_BONUS_NUM);
    let raider = Army::new(TroopType::Paladin, TroopTier::T2, 4_321, 47);
    let defenders = [
        Army::new(TroopType::Knight, TroopTier::T1, 900, 12),
        Army::new(TroopType::Crossbowman, TroopTier::T3, 250, 30),
    ];

    let run = || {
        let battle = raid
            .combat()
            .simulate_battle(&raider, &defenders[0], Biome::Grassland, &table);
        let report = raid.simulate_raid(&raider, &defenders, Biome::Grassland, &table);
        (
            battle.attacker_damage.to_bits(),
            battle.defender_damage.to_bits(),
            report.raider_damage_taken.to_bits(),
            report.defender_damage_taken.to_bits(),
            report.success_chance.to_bits(),
        )
    };

    let (first, second) = thread::scope(|scope| {
        let first = scope.spawn(run);
        let second = scope.spawn(run);
        (first.join().unwrap(), second.join().unwrap())
    });

    assert_eq!(first, second);
    assert_eq!(first, run());
}
