use combat_core::{
    Army, Biome, BiomeBonusTable, CombatParameters, CombatSimulator, Fixed64, NeutralTerrain,
    RaidOutcome, RaidSimulator, TroopTier, TroopType, divide_with_precision,
};

fn raid_simulator() -> RaidSimulator {
    RaidSimulator::new(CombatParameters::default()).unwrap()
}

fn knight_t2(troops: u64) -> Army {
    Army::new(TroopType::Knight, TroopTier::T2, troops, 30)
}

fn crossbow_t1(troops: u64) -> Army {
    Army::new(TroopType::Crossbowman, TroopTier::T1, troops, 30)
}

#[test]
fn battles_are_bitwise_deterministic() {
    let sim = CombatSimulator::new(CombatParameters::default()).unwrap();
    let table = BiomeBonusTable::standard(CombatParameters::DEFAULT_BIOME_BONUS_NUM);

    for biome in [Biome::None, Biome::Beach, Biome::Taiga, Biome::Scorched] {
        for (attacker, defender) in [
            (knight_t2(100), crossbow_t1(300)),
            (crossbow_t1(12_345), knight_t2(99_999)),
            (Army::new(TroopType::Paladin, TroopTier::T3, 150_000, 55), knight_t2(1)),
        ] {
            let first = sim.simulate_battle(&attacker, &defender, biome, &table);
            let second = sim.simulate_battle(&attacker, &defender, biome, &table);
            assert_eq!(first.attacker_damage.to_bits(), second.attacker_damage.to_bits());
            assert_eq!(first.defender_damage.to_bits(), second.defender_damage.to_bits());
        }
    }
}

#[test]
fn raiding_nobody_is_a_free_success() {
    let raid = raid_simulator();
    let raider = knight_t2(100);

    let report = raid.simulate_raid(&raider, &[], Biome::None, &NeutralTerrain);
    assert!(report.is_successful());
    assert_eq!(report.outcome, RaidOutcome::Success);
    assert_eq!(report.success_chance, 100.0);
    assert_eq!(report.raider_damage_taken, 0.0);
    assert_eq!(report.defender_damage_taken, 0.0);
    assert!(report.damage_taken_per_defender.is_empty());

    let empty_guards = [crossbow_t1(0), knight_t2(0)];
    let report = raid.simulate_raid(&raider, &empty_guards, Biome::None, &NeutralTerrain);
    assert!(report.is_successful());
    assert_eq!(report.success_chance, 100.0);
    assert_eq!(report.raider_damage_taken, 0.0);
    assert_eq!(report.defender_damage_taken, 0.0);
    assert_eq!(report.damage_taken_per_defender, vec![0.0, 0.0]);
}

#[test]
fn raid_damage_is_a_fraction_of_battle_damage() {
    let raid = raid_simulator();
    let raider = knight_t2(100);
    let defender = crossbow_t1(300);

    let battle = raid
        .combat()
        .simulate_battle(&raider, &defender, Biome::None, &NeutralTerrain);
    let report = raid.simulate_raid(&raider, &[defender], Biome::None, &NeutralTerrain);

    assert!(report.defender_damage_taken < battle.attacker_damage);
    assert!(report.raider_damage_taken < battle.defender_damage);
    assert!((report.defender_damage_taken - battle.attacker_damage * 0.1).abs() < 1e-9);
}

#[test]
fn split_raider_against_two_equal_defenders_is_contested() {
    let raid = raid_simulator();
    let raider = knight_t2(100);
    let defenders = [crossbow_t1(300), crossbow_t1(300)];

    let report = raid.simulate_raid(&raider, &defenders, Biome::None, &NeutralTerrain);

    assert_eq!(report.outcome, RaidOutcome::Chance);
    assert!(report.success_chance > 0.0 && report.success_chance < 100.0);
    assert_eq!(report.damage_taken_per_defender.len(), 2);
    assert_eq!(
        report.damage_taken_per_defender[0].to_bits(),
        report.damage_taken_per_defender[1].to_bits()
    );
}

#[test]
fn raider_is_split_by_floor_division() {
    let raid = raid_simulator();
    let raider = knight_t2(101);
    let defenders = [crossbow_t1(300), crossbow_t1(300)];

    let split = raid.simulate_raid(&raider, &defenders, Biome::None, &NeutralTerrain);
    let single = raid.simulate_raid(&knight_t2(50), &defenders[..1], Biome::None, &NeutralTerrain);

    assert_eq!(
        split.damage_taken_per_defender[0].to_bits(),
        single.damage_taken_per_defender[0].to_bits()
    );
}

#[test]
fn raider_smaller_than_the_defence_sends_nobody() {
    let raid = raid_simulator();
    let raider = knight_t2(1);
    let defenders = [crossbow_t1(300), crossbow_t1(300)];

    let report = raid.simulate_raid(&raider, &defenders, Biome::None, &NeutralTerrain);

    assert_eq!(report.raider_damage_taken, 0.0);
    assert_eq!(report.defender_damage_taken, 0.0);
    assert_eq!(report.damage_taken_per_defender, vec![0.0, 0.0]);
    assert_eq!(report.outcome, RaidOutcome::Chance);
    assert_eq!(report.success_chance, 100.0);
}

#[test]
fn casualties_never_exceed_fielded_troops() {
    let params = CombatParameters::default().with_raid_percent_num(10_000);
    let raid = RaidSimulator::new(params).unwrap();
    let raider = Army::new(TroopType::Paladin, TroopTier::T3, 50_000, 60);
    let defenders = [crossbow_t1(3), crossbow_t1(0), crossbow_t1(7)];

    let report = raid.simulate_raid(&raider, &defenders, Biome::None, &NeutralTerrain);

    assert_eq!(report.damage_taken_per_defender, vec![3.0, 0.0, 7.0]);
    assert_eq!(report.defender_damage_taken, 10.0);
    assert_eq!(report.outcome, RaidOutcome::Success);
}

#[test]
fn exhausted_raider_fails() {
    let raid = raid_simulator();
    let raider = knight_t2(1_000).with_stamina(0);

    let report = raid.simulate_raid(&raider, &[crossbow_t1(100)], Biome::None, &NeutralTerrain);

    assert_eq!(report.defender_damage_taken, 0.0);
    assert_eq!(report.outcome, RaidOutcome::Failure);
    assert_eq!(report.success_chance, 0.0);
}

#[test]
fn preview_reports_what_is_left() {
    let raid = raid_simulator();
    let raider = knight_t2(100).with_stamina(50);
    let defenders = [crossbow_t1(300), crossbow_t1(300)];

    let report = raid.simulate_raid(&raider, &defenders, Biome::None, &NeutralTerrain);
    let preview = report.preview(&raider, &defenders, raid.parameters().stamina_attack_req);

    assert_eq!(preview.raider_stamina_left, 20);
    assert!(preview.raider_troops_left < 100.0);
    assert_eq!(preview.defender_troops_left.len(), 2);
    assert!(preview.defender_troops_left.iter().all(|left| *left < 300.0));
}

#[test]
fn fixed_point_multiples_convert_exactly() {
    let five = 5 * Fixed64::SCALE;
    assert_eq!(divide_with_precision(five, Fixed64::SCALE, 5, 2), Ok(5.00));
}
