//! Scenario tests that drive full rounds through the public API.

use burrow::{
    confusion_scroll, fireball_scroll, health_potion, lightning_scroll, orc, troll, Action, Actor,
    AiBehavior, BurrowResult, Color, Entity, EntityId, Fighter, GameConfig, GameMap, GameState,
    GameStatus, InputHandler, InputMode, PlayerInput, Position, RedrawCounter, Tile, TurnOutcome,
};

fn arena(player: Entity) -> BurrowResult<GameState> {
    let mut map = GameMap::new(20, 12);
    map.fill_rect(Position::new(1, 1), Position::new(18, 10), Tile::floor());
    GameState::new(map, player, GameConfig::new(42))
}

fn hero(position: Position, capacity: usize) -> Entity {
    Entity::actor(
        "Player",
        '@',
        Color::WHITE,
        position,
        Actor::new(Fighter::new(30, 2, 5)).with_inventory(capacity),
    )
}

fn give(state: &mut GameState, item: Entity) -> BurrowResult<EntityId> {
    let id = item.id;
    state.player_mut()?.require_inventory_mut()?.add(item);
    Ok(id)
}

fn health_of(state: &GameState, id: EntityId) -> i32 {
    state
        .map
        .entity(id)
        .and_then(|e| e.fighter())
        .map(|f| f.health())
        .unwrap_or(-1)
}

#[test]
fn test_moving_into_a_wall_does_not_advance() -> BurrowResult<()> {
    let mut state = arena(hero(Position::new(1, 1), 26))?;
    let player = state.player_id;
    let mut presenter = RedrawCounter::default();

    let outcome = state.handle_player_action(&Action::bump(player, -1, 0), &mut presenter)?;
    assert_eq!(outcome, TurnOutcome::NotAdvanced);
    assert_eq!(state.player()?.position, Position::new(1, 1));
    assert_eq!(state.turn_number, 0);
    assert_eq!(presenter.redraws, 0);
    Ok(())
}

#[test]
fn test_bumping_an_enemy_attacks_it() -> BurrowResult<()> {
    let mut state = arena(hero(Position::new(5, 5), 26))?;
    let player = state.player_id;
    let target = state.map.place_entity(Entity::actor(
        "Dummy",
        'd',
        Color::WHITE,
        Position::new(6, 5),
        Actor::new(Fighter::new(10, 2, 0)),
    ))?;
    let mut presenter = RedrawCounter::default();

    let outcome = state.handle_player_action(&Action::bump(player, 1, 0), &mut presenter)?;
    assert_eq!(outcome, TurnOutcome::Advanced);
    assert_eq!(health_of(&state, target), 7);
    assert_eq!(state.player()?.position, Position::new(5, 5));
    let last = state.log.last().map(|m| (m.text.clone(), m.color));
    assert_eq!(
        last,
        Some(("Player attacks Dummy for 3 hit points.".to_string(), Color::PLAYER_ATTACK))
    );
    Ok(())
}

#[test]
fn test_killing_an_orc_leaves_a_walkable_corpse() -> BurrowResult<()> {
    let mut state = arena(hero(Position::new(5, 5), 26))?;
    let player = state.player_id;
    let orc = state.map.place_entity(orc(Position::new(6, 5)))?;
    let mut presenter = RedrawCounter::default();

    // 10 hp, no defence, 5 damage per hit.
    state.handle_player_action(&Action::bump(player, 1, 0), &mut presenter)?;
    state.handle_player_action(&Action::bump(player, 1, 0), &mut presenter)?;

    let corpse = state.map.entity(orc).map(|e| (e.is_alive(), e.glyph, e.name.clone()));
    assert_eq!(corpse, Some((false, '%', "remains of Orc".to_string())));
    assert!(state.log.messages().any(|m| m.text == "Orc is dead!" && m.color == Color::ENEMY_DIE));
    // The orc got one swing in between: 3 power against 2 defence.
    assert_eq!(health_of(&state, player), 29);

    state.handle_player_action(&Action::bump(player, 1, 0), &mut presenter)?;
    assert_eq!(state.player()?.position, Position::new(6, 5));
    Ok(())
}

#[test]
fn test_troll_chases_and_hits_the_player() -> BurrowResult<()> {
    let mut state = arena(hero(Position::new(3, 5), 26))?;
    let player = state.player_id;
    let troll = state.map.place_entity(troll(Position::new(7, 5)))?;
    state.update_fov()?;
    let mut presenter = RedrawCounter::default();

    for _ in 0..3 {
        state.handle_player_action(&Action::wait(player), &mut presenter)?;
    }
    assert_eq!(
        state.map.entity(troll).map(|e| e.position),
        Some(Position::new(4, 5))
    );

    state.handle_player_action(&Action::wait(player), &mut presenter)?;
    assert_eq!(health_of(&state, player), 28);
    assert_eq!(presenter.redraws, 4);
    Ok(())
}

#[test]
fn test_pickup_with_full_inventory_is_refused() -> BurrowResult<()> {
    let mut state = arena(hero(Position::new(5, 5), 1))?;
    let player = state.player_id;
    give(&mut state, health_potion(Position::new(0, 0)))?;
    let floor_item = state.map.place_entity(health_potion(Position::new(5, 5)))?;
    let mut presenter = RedrawCounter::default();

    let outcome = state.handle_player_action(&Action::pick_up(player), &mut presenter)?;
    assert_eq!(outcome, TurnOutcome::NotAdvanced);
    assert!(state.map.entity(floor_item).is_some());
    let last = state.log.last().map(|m| (m.text.clone(), m.color));
    assert_eq!(
        last,
        Some(("Your inventory is full.".to_string(), Color::IMPOSSIBLE))
    );
    Ok(())
}

#[test]
fn test_pick_up_then_drop_round_trips_the_floor() -> BurrowResult<()> {
    let mut state = arena(hero(Position::new(5, 5), 26))?;
    let player = state.player_id;
    let potion = state.map.place_entity(health_potion(Position::new(5, 5)))?;
    let mut presenter = RedrawCounter::default();

    state.handle_player_action(&Action::pick_up(player), &mut presenter)?;
    assert!(state.map.entity(potion).is_none());
    assert!(state.player()?.require_inventory()?.contains(potion));

    state.handle_player_action(&Action::movement(player, 1, 1), &mut presenter)?;
    state.handle_player_action(&Action::drop_item(player, potion), &mut presenter)?;
    assert_eq!(
        state.map.entity(potion).map(|e| e.position),
        Some(Position::new(6, 6))
    );
    assert_eq!(
        state.log.last().map(|m| m.text.clone()),
        Some("You dropped the Health Potion.".to_string())
    );
    Ok(())
}

#[test]
fn test_healing_potion_is_consumed() -> BurrowResult<()> {
    let mut state = arena(hero(Position::new(5, 5), 26))?;
    let player = state.player_id;
    let potion = give(&mut state, health_potion(Position::new(0, 0)))?;
    let mut presenter = RedrawCounter::default();

    // Full health: refused, and the potion stays.
    let outcome =
        state.handle_player_action(&Action::use_item(player, potion, None), &mut presenter)?;
    assert_eq!(outcome, TurnOutcome::NotAdvanced);
    assert!(state.player()?.require_inventory()?.contains(potion));

    state.damage_actor(player, 10)?;
    state.handle_player_action(&Action::use_item(player, potion, None), &mut presenter)?;
    assert_eq!(health_of(&state, player), 24);
    assert!(!state.player()?.require_inventory()?.contains(potion));
    assert!(state
        .log
        .messages()
        .any(|m| m.text == "You consume the Health Potion, and recover 4 HP!"));
    Ok(())
}

#[test]
fn test_lightning_strikes_the_closest_enemy() -> BurrowResult<()> {
    let mut state = arena(hero(Position::new(5, 5), 26))?;
    let player = state.player_id;
    let near = state.map.place_entity(troll(Position::new(8, 5)))?;
    let far = state.map.place_entity(troll(Position::new(9, 7)))?;
    state.update_fov()?;
    let scroll = give(&mut state, lightning_scroll(Position::new(0, 0)))?;
    let mut presenter = RedrawCounter::default();

    state.handle_player_action(&Action::use_item(player, scroll, None), &mut presenter)?;
    assert!(!state.map.entity(near).map(|e| e.is_alive()).unwrap_or(true));
    assert!(state.map.entity(far).map(|e| e.is_alive()).unwrap_or(false));
    assert!(state.log.messages().any(|m| m.text
        == "A lightning bolt strikes the Troll with a loud thunder, for 20 damage!"));
    Ok(())
}

#[test]
fn test_confusion_through_the_input_handler() -> BurrowResult<()> {
    let mut state = arena(hero(Position::new(5, 5), 26))?;
    let orc = state.map.place_entity(orc(Position::new(9, 5)))?;
    state.update_fov()?;
    give(&mut state, confusion_scroll(Position::new(0, 0)))?;
    let mut handler = InputHandler::new();
    let mut presenter = RedrawCounter::default();

    assert!(handler
        .input_to_action(PlayerInput::UseItem(0), &mut state)?
        .is_none());
    assert!(matches!(handler.mode, InputMode::Targeting { .. }));

    let action = handler.input_to_action(PlayerInput::Target(Position::new(9, 5)), &mut state)?;
    let action = action.ok_or_else(|| burrow::BurrowError::InvalidState("no action".into()))?;
    state.handle_player_action(&action, &mut presenter)?;

    let ai = state.map.entity(orc).and_then(|e| e.ai().cloned());
    assert!(matches!(ai, Some(AiBehavior::Confused { turns_remaining: 9, .. })));
    assert!(state.player()?.require_inventory()?.is_empty());
    Ok(())
}

#[test]
fn test_fireball_burns_everything_in_range() -> BurrowResult<()> {
    let mut state = arena(hero(Position::new(3, 5), 26))?;
    let player = state.player_id;
    let a = state.map.place_entity(orc(Position::new(10, 5)))?;
    let b = state.map.place_entity(orc(Position::new(11, 6)))?;
    let spared = state.map.place_entity(troll(Position::new(16, 5)))?;
    state.update_fov()?;
    let scroll = give(&mut state, fireball_scroll(Position::new(0, 0)))?;
    let mut presenter = RedrawCounter::default();

    // Out of sight: refused.
    assert!(!state.map.is_visible(Position::new(18, 1)));
    let outcome = state.handle_player_action(
        &Action::use_item(player, scroll, Some(Position::new(18, 1))),
        &mut presenter,
    )?;
    assert_eq!(outcome, TurnOutcome::NotAdvanced);
    assert_eq!(
        state.log.last().map(|m| m.text.clone()),
        Some("You cannot target an area that you cannot see.".to_string())
    );

    state.handle_player_action(
        &Action::use_item(player, scroll, Some(Position::new(10, 5))),
        &mut presenter,
    )?;
    for id in [a, b] {
        assert!(!state.map.entity(id).map(|e| e.is_alive()).unwrap_or(true));
    }
    assert_eq!(health_of(&state, spared), 16);
    Ok(())
}

#[test]
fn test_player_death_ends_the_game() -> BurrowResult<()> {
    let mut state = arena(hero(Position::new(5, 5), 26))?;
    let player = state.player_id;
    state.map.place_entity(troll(Position::new(6, 5)))?;
    state.update_fov()?;
    state.set_actor_health(player, 1)?;
    let mut presenter = RedrawCounter::default();

    state.handle_player_action(&Action::wait(player), &mut presenter)?;
    assert_eq!(state.status, GameStatus::PlayerDied);
    assert!(state
        .log
        .messages()
        .any(|m| m.text == "You died!" && m.color == Color::PLAYER_DIE));

    let mut handler = InputHandler::new();
    assert!(handler
        .input_to_action(PlayerInput::Wait, &mut state)?
        .is_none());
    assert_eq!(handler.mode, InputMode::GameOver);
    let quit = handler.input_to_action(PlayerInput::Quit, &mut state)?;
    assert_eq!(quit.map(|a| a.kind), Some(burrow::ActionKind::Escape));
    Ok(())
}
