//! Turn sequencer: match start, turn close, and win detection.
//!
//! The sequencer owns the `waiting -> playing -> ended` state machine. It
//! fixes decks, opening hands, and turn order at start, and after every
//! successful play it applies the end-of-turn effects, checks for a winner,
//! and advances the turn pointer to the next living player.

use crate::cards::CardCatalog;
use crate::engine::state::{GamePhase, Match};
use crate::engine::{deck, MIN_PLAYERS, PASSIVE_CHARGE, STARTING_HAND_SIZE};
use crate::error::EngineError;

/// The `waiting -> playing` transition.
///
/// Builds and shuffles each player's weighted deck, deals the opening hands,
/// fixes the turn order as a random permutation, and points the turn at its
/// first entry. That first player is marked as having taken their first turn
/// so they do not get an extra draw before their first move.
pub(crate) fn start(game: &mut Match, catalog: &CardCatalog) -> Result<(), EngineError> {
    if game.phase != GamePhase::Waiting {
        return Err(EngineError::MatchAlreadyStarted(game.id.clone()));
    }
    if game.players.len() < MIN_PLAYERS {
        return Err(EngineError::NotEnoughPlayers(game.players.len()));
    }

    game.phase = GamePhase::Playing;
    game.log("The match has begun!");

    for idx in 0..game.players.len() {
        game.players[idx].deck = deck::build_deck(catalog, &mut game.rng);
        for _ in 0..STARTING_HAND_SIZE {
            deck::draw_card(game, idx, catalog);
        }
    }

    let mut order: Vec<_> = game.players.iter().map(|p| p.id.clone()).collect();
    game.rng.shuffle(&mut order);
    game.turn_order = order;

    let first = game.turn_order[0].clone();
    game.player_mut(&first)
        .expect("turn order entries are match players")
        .has_taken_first_turn = true;
    game.current_turn_player = Some(first);

    Ok(())
}

/// Close the acting player's turn after a successful play.
///
/// In order: bump the turn counter, passively charge the remaining hand,
/// tick the actor's auto-heal effects, check the win condition, and if the
/// match goes on, advance to the next living player (drawing them a card
/// unless their first-turn draw is suppressed).
pub(crate) fn close_turn(game: &mut Match, actor_idx: usize, catalog: &CardCatalog) {
    game.turn_count += 1;

    let actor_name = game.players[actor_idx].name.clone();
    for held in &mut game.players[actor_idx].hand {
        held.charge(PASSIVE_CHARGE);
    }
    game.log(format!(
        "{actor_name}'s remaining cards were automatically charged by {PASSIVE_CHARGE}."
    ));

    let effects = game.players[actor_idx].active_effects.clone();
    for effect in effects {
        let crate::core::ActiveEffect::AutoHeal { value } = effect;
        let old_hp = game.players[actor_idx].heal(value);
        let new_hp = game.players[actor_idx].hp;
        game.log(format!(
            "{actor_name} recovered {value} HP from auto-heal! (HP: {old_hp} -> {new_hp})"
        ));
    }

    let alive: Vec<_> = game.alive_players().map(|p| p.id.clone()).collect();
    if alive.len() <= 1 {
        game.phase = GamePhase::Ended;
        game.winner = alive.first().cloned();
        match &game.winner {
            Some(id) => {
                let name = game
                    .player(id)
                    .map(|p| p.name.clone())
                    .unwrap_or_default();
                game.log(format!("{name} wins the match!"));
            }
            None => game.log("The match ended with no survivors."),
        }
        return;
    }

    advance(game, actor_idx, catalog);
}

/// Move the turn pointer to the next living player in the fixed cyclic
/// order, then give them their turn-start draw.
///
/// Eliminated players stay in `turn_order` and are skipped; so are players
/// who left the match mid-game. The caller has already verified at least two
/// players are alive, so the scan terminates.
fn advance(game: &mut Match, actor_idx: usize, catalog: &CardCatalog) {
    let actor_id = game.players[actor_idx].id.clone();
    let current = game
        .turn_order
        .iter()
        .position(|id| *id == actor_id)
        .unwrap_or(0);

    let len = game.turn_order.len();
    let mut next = (current + 1) % len;
    while !game.is_alive(&game.turn_order[next]) {
        next = (next + 1) % len;
    }

    let next_id = game.turn_order[next].clone();
    game.current_turn_player = Some(next_id.clone());

    let next_idx = game
        .player_index(&next_id)
        .expect("alive turn order entry is a match player");
    if !game.players[next_idx].has_taken_first_turn {
        game.players[next_idx].has_taken_first_turn = true;
    } else {
        deck::draw_card(game, next_idx, catalog);
    }
}
