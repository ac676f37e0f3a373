use terminal_strategist::policy::{ReinforceOutcome, ReinforceStop};
use terminal_strategist::shim::ArenaShim;
use terminal_strategist::*;

fn loc(x: u32, y: u32) -> Location {
    Location::from_coords(x, y)
}

fn default_policy() -> TurnPolicy {
    TurnPolicy::new(PolicyConfig::default()).unwrap()
}

fn spawned_turrets(report: &TurnReport) -> Vec<Location> {
    report
        .actions
        .iter()
        .filter_map(|action| match action {
            TurnAction::Spawn {
                unit_type: UnitType::Turret,
                location,
                ..
            } => Some(*location),
            _ => None,
        })
        .collect()
}

#[test]
fn opening_turn_builds_what_the_budget_allows() {
    let policy = default_policy();
    let mut arena = ArenaShim::new(0).with_resources(Player::Me, 19.0, 0.0);

    let (state, report) = policy.on_turn(&mut arena, PolicyState::default());

    assert_eq!(state.turns_played, 1);
    assert_eq!(report.play, AttackPlay::Hold);
    assert_eq!(
        spawned_turrets(&report),
        vec![loc(4, 13), loc(5, 13), loc(13, 13)]
    );
    assert!(arena.stationary_unit(loc(4, 13)).unwrap().upgraded);
    assert!(arena.stationary_unit(loc(5, 13)).unwrap().upgraded);
    assert!(!arena.stationary_unit(loc(13, 13)).unwrap().upgraded);
    assert!(!arena.contains_stationary_unit(loc(22, 13)));
    assert_eq!(
        report.reinforce.map(|outcome| outcome.stop),
        Some(ReinforceStop::Reserve)
    );
}

#[test]
fn quiet_turn_spreads_turrets_across_blocks() {
    let policy = default_policy();
    let mut arena = ArenaShim::new(3).with_resources(Player::Me, 10.0, 0.0);

    let (_, report) = policy.on_turn(&mut arena, PolicyState::default());

    assert_eq!(report.play, AttackPlay::Hold);
    assert_eq!(
        spawned_turrets(&report),
        vec![loc(4, 13), loc(13, 13), loc(14, 13)]
    );
    assert_eq!(arena.resources(Player::Me).sp, 1.0);
}

#[test]
fn lethal_threat_triggers_panic_with_every_mp() {
    let policy = default_policy();
    let mut arena = ArenaShim::new(5)
        .with_resources(Player::Me, 10.0, 8.0)
        .with_resources(Player::Opponent, 0.0, 40.0)
        .with_health(Player::Me, 30.0);

    let (_, report) = policy.on_turn(&mut arena, PolicyState::default());

    match report.play {
        AttackPlay::Panic { units, .. } => assert_eq!(units, 8),
        ref other => panic!("unexpected play {:?}", other),
    }
    assert_eq!(report.reinforce, None);
    assert!(spawned_turrets(&report).is_empty());
    assert_eq!(arena.deployed().len(), 1);
    assert_eq!(arena.deployed()[0].count, 8);
    assert_eq!(arena.structure_count(Player::Me), 0);
}

#[test]
fn all_out_clears_the_board_before_the_wave() {
    let policy = default_policy();
    let mut arena = ArenaShim::new(5)
        .with_resources(Player::Me, 8.0, 10.0)
        .with_resources(Player::Opponent, 0.0, 0.0)
        .with_health(Player::Me, 30.0)
        .with_health(Player::Opponent, 5.0)
        .with_structure(Player::Me, UnitType::Turret, loc(4, 13))
        .with_upgraded_structure(Player::Me, UnitType::Turret, loc(13, 13))
        .with_structure(Player::Me, UnitType::Wall, loc(13, 0));

    let (_, report) = policy.on_turn(&mut arena, PolicyState::default());

    assert_eq!(
        report.play,
        AttackPlay::AllOut {
            spawn: loc(13, 0),
            units: 10,
            cleared: 3,
        }
    );
    assert!(report.actions[..3]
        .iter()
        .all(|action| matches!(action, TurnAction::Remove { .. })));
    assert_eq!(
        report.actions[3],
        TurnAction::Spawn {
            unit_type: UnitType::Scout,
            location: loc(13, 0),
            count: 10,
        }
    );
    // Two supports of the shield line were affordable, each removed again.
    assert_eq!(
        report.actions[4..],
        [
            TurnAction::Spawn {
                unit_type: UnitType::Support,
                location: loc(13, 1),
                count: 1,
            },
            TurnAction::Remove {
                location: loc(13, 1)
            },
            TurnAction::Spawn {
                unit_type: UnitType::Support,
                location: loc(14, 2),
                count: 1,
            },
            TurnAction::Remove {
                location: loc(14, 2)
            },
        ]
    );
    assert_eq!(report.reinforce, None);
    assert_eq!(arena.structure_count(Player::Me), 0);
}

#[test]
fn normal_play_attacks_the_weakest_lane_and_drops_the_shield() {
    let policy = default_policy();
    let mut arena = ArenaShim::new(3)
        .with_resources(Player::Me, 10.0, 12.0)
        .with_structure(Player::Opponent, UnitType::Turret, loc(3, 14))
        .with_structure(Player::Opponent, UnitType::Turret, loc(5, 15));

    let (_, report) = policy.on_turn(&mut arena, PolicyState::default());

    assert_eq!(report.tally.weight(Lane::LeftCorner), 2);
    let spawn = match report.play {
        AttackPlay::Normal { lane, spawn, units } => {
            assert_eq!(lane, Lane::LeftMiddle);
            assert_eq!(units, 12);
            spawn
        }
        ref other => panic!("unexpected play {:?}", other),
    };
    assert_eq!(spawn.x() as u32 + spawn.y() as u32, 13);

    let shield = match report.actions[0] {
        TurnAction::Spawn {
            unit_type: UnitType::Support,
            location,
            ..
        } => location,
        ref other => panic!("unexpected first action {:?}", other),
    };
    assert_eq!(report.actions[2], TurnAction::Remove { location: shield });
    assert!(!arena.contains_stationary_unit(shield));
    assert_eq!(arena.deployed()[0].count, 12);
    assert!(report.reinforce.is_some());
}

#[test]
fn walled_foundation_is_repaired_on_later_turns() {
    let policy = TurnPolicy::new(PolicyConfig::walled_foundation()).unwrap();
    let foundation = policy.config().foundation.clone().unwrap();
    let mut arena = ArenaShim::new(1).with_resources(Player::Me, 36.0, 0.0);

    let (state, first) = policy.on_turn(&mut arena, PolicyState::default());
    assert_eq!(first.actions.len(), 12);
    for &wall in &foundation.walls {
        assert_eq!(
            arena.stationary_unit(wall).unwrap().unit_type,
            UnitType::Wall
        );
    }

    arena.attempt_remove(foundation.walls[1]);
    arena.set_turn(2);
    arena.set_resources(Player::Me, Resources { sp: 5.0, mp: 0.0 });

    let (state, second) = policy.on_turn(&mut arena, state);
    assert_eq!(state.turns_played, 2);

    let mut expected = vec![TurnAction::Spawn {
        unit_type: UnitType::Wall,
        location: foundation.walls[1],
        count: 1,
    }];
    expected.extend(
        foundation
            .walls
            .iter()
            .map(|&location| TurnAction::Upgrade { location }),
    );
    assert_eq!(second.actions, expected);
    for &wall in &foundation.walls {
        assert!(arena.stationary_unit(wall).unwrap().upgraded);
    }
}

#[test]
fn walled_foundation_reinforces_where_the_opponent_is_expected() {
    let policy = TurnPolicy::new(PolicyConfig::walled_foundation()).unwrap();
    let config = policy.config();
    let foundation = config.foundation.clone().unwrap();

    let mut arena = ArenaShim::new(3).with_resources(Player::Me, 9.0, 0.0);
    for &turret in &foundation.turrets {
        arena.place_structure(Player::Me, UnitType::Turret, turret, true);
    }
    for &wall in &foundation.walls {
        arena.place_structure(Player::Me, UnitType::Wall, wall, true);
    }
    for &spawn in &config.reinforce.anticipated.enemy_spawns {
        arena.script_path(spawn, None);
    }
    arena.script_path(loc(27, 14), Some(vec![loc(27, 14), loc(24, 10)]));

    let (_, report) = policy.on_turn(&mut arena, PolicyState::default());

    assert_eq!(report.play, AttackPlay::Hold);
    assert_eq!(
        report.actions,
        vec![
            TurnAction::Spawn {
                unit_type: UnitType::Turret,
                location: loc(22, 12),
                count: 1,
            },
            TurnAction::Upgrade {
                location: loc(22, 12)
            },
            TurnAction::Spawn {
                unit_type: UnitType::Wall,
                location: loc(22, 13),
                count: 1,
            },
        ]
    );
    assert_eq!(
        report.reinforce,
        Some(ReinforceOutcome {
            iterations: 1,
            actions: 3,
            stop: ReinforceStop::Reserve,
        })
    );
}

#[test]
fn compact_corners_holds_under_a_lethal_threat() {
    let policy = TurnPolicy::new(PolicyConfig::compact_corners()).unwrap();
    let mut arena = ArenaShim::new(5)
        .with_resources(Player::Me, 0.0, 8.0)
        .with_resources(Player::Opponent, 0.0, 40.0)
        .with_health(Player::Me, 30.0);

    let (_, report) = policy.on_turn(&mut arena, PolicyState::default());

    assert_eq!(report.play, AttackPlay::Hold);
    assert!(arena.deployed().is_empty());
}

#[test]
fn reactive_defense_covers_recorded_breaches() {
    let mut config = PolicyConfig::default();
    config.reactive_defense = true;
    config.reinforce.reserve = 3.0;
    let policy = TurnPolicy::new(config).unwrap();

    let mut state = PolicyState::default();
    state
        .record_action_frame(r#"{"events": {"breach": [[[3, 10], 1.0, 3, "9", 2]]}}"#)
        .unwrap();

    let mut arena = ArenaShim::new(7).with_resources(Player::Me, 3.0, 0.0);
    let (_, report) = policy.on_turn(&mut arena, state);

    assert_eq!(
        report.reinforce.map(|outcome| outcome.actions),
        Some(0)
    );
    assert_eq!(spawned_turrets(&report), vec![loc(3, 11)]);
}

#[test]
fn play_turn_submits_once() {
    let policy = default_policy();
    let mut arena = ArenaShim::new(4).with_resources(Player::Me, 5.0, 0.0);

    let (state, _) = policy.play_turn(&mut arena, PolicyState::default());
    let (state, _) = policy.play_turn(&mut arena, state);

    assert_eq!(arena.submitted_turns(), 2);
    assert_eq!(state.turns_played, 2);
}

#[test]
fn invalid_configuration_is_rejected_up_front() {
    let json = r#"{ "reinforce": { "blocks": [] } }"#;
    assert!(matches!(
        PolicyConfig::from_json(json),
        Err(ConfigError::NoBlocks)
    ));

    let mut config = PolicyConfig::compact_corners();
    config.opening.turrets.push(loc(0, 0));
    assert!(matches!(
        TurnPolicy::new(config),
        Err(ConfigError::OutOfOwnHalf { .. })
    ));
}

#[test]
fn policy_config_loads_from_json() {
    let config = PolicyConfig::from_json(
        r#"{
            "attack": { "mp_tiers": [ { "before_turn": 5, "min_mp": 5.0 } ], "late_min_mp": 8.0 },
            "reinforce": {
                "reserve": 0.0,
                "blocks": [ { "name": "center", "locations": [[13, 13], [14, 13]] } ]
            }
        }"#,
    )
    .unwrap();
    let policy = TurnPolicy::new(config).unwrap();
    let mut arena = ArenaShim::new(6).with_resources(Player::Me, 6.0, 0.0);

    let (_, report) = policy.on_turn(&mut arena, PolicyState::default());
    assert_eq!(spawned_turrets(&report), vec![loc(13, 13), loc(14, 13)]);
}
