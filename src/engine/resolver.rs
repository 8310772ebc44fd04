//! Effect resolver: the `play_card` state transition.
//!
//! Validate-then-apply discipline: every precondition is checked before any
//! field of the match is touched, so a rejected play leaves the match
//! byte-for-byte unchanged. Resolution then mutates the match, appends log
//! lines, moves the played card to the discard pile, and hands off to the
//! turn sequencer.

use crate::cards::{CardCatalog, CardKind, InstanceId};
use crate::core::{ActiveEffect, PlayerId};
use crate::engine::state::Match;
use crate::engine::{turn, REPEAT_ATTACK_MIN_ALIVE};
use crate::error::EngineError;

/// Play one card from the acting player's hand.
///
/// On success the match has advanced past the turn close (§ turn sequencer);
/// on error nothing was mutated.
pub(crate) fn play_card(
    game: &mut Match,
    catalog: &CardCatalog,
    player_id: &PlayerId,
    card: InstanceId,
    target: Option<&PlayerId>,
) -> Result<(), EngineError> {
    if game.current_turn_player.as_ref() != Some(player_id) {
        return Err(EngineError::NotYourTurn);
    }
    let actor_idx = game
        .player_index(player_id)
        .expect("current turn player is in the match");
    let hand_idx = game.players[actor_idx]
        .hand_index(card)
        .ok_or(EngineError::CardNotInHand(card))?;

    let played = game.players[actor_idx].hand[hand_idx].clone();
    let actor_name = game.players[actor_idx].name.clone();

    match played.kind {
        CardKind::Attack => {
            // The repeat rule is checked before the target lookup, and only
            // applies while 4+ players are still alive.
            if game.alive_count() >= REPEAT_ATTACK_MIN_ALIVE {
                if let Some(target_id) = target {
                    if game.last_attacked.get(target_id) == Some(player_id) {
                        return Err(EngineError::RepeatedTargetForbidden);
                    }
                }
            }
            let target_idx = target
                .and_then(|id| game.player_index(id))
                .ok_or(EngineError::TargetNotFound)?;
            let target_id = game.players[target_idx].id.clone();
            let target_name = game.players[target_idx].name.clone();

            let mut damage = played.current_value;
            let victim = &mut game.players[target_idx];
            if !played.is_piercing {
                let shield_damage = victim.shield.min(damage);
                victim.shield -= shield_damage;
                damage -= shield_damage;
            }
            victim.hp -= damage;
            if victim.hp <= 0 {
                victim.hp = 0;
                game.log(format!(
                    "{actor_name}'s attack eliminated {target_name}!"
                ));
            } else {
                let hp = victim.hp;
                game.log(format!(
                    "{actor_name} dealt {damage} damage to {target_name}! (HP left: {hp})"
                ));
            }
            game.last_attacked.insert(target_id, player_id.clone());
        }

        CardKind::Shield => {
            let actor = &mut game.players[actor_idx];
            actor.shield += played.current_value;
            let total = actor.shield;
            let value = played.current_value;
            game.log(format!(
                "{actor_name} raised a {value} point shield! (total shield: {total})"
            ));
        }

        CardKind::Heal => resolve_heal(game, actor_idx, &actor_name, &played),

        CardKind::Charge => {
            // The boost amount is fixed before the sweep; the played card is
            // still in hand and is boosted along with the rest.
            let amount = played.current_value;
            for held in &mut game.players[actor_idx].hand {
                held.charge(amount);
            }
            game.log(format!(
                "{actor_name} played a charge card, boosting their hand by {amount}!"
            ));
        }
    }

    let spent = game.players[actor_idx].hand.remove(hand_idx);
    game.players[actor_idx].discard_pile.push(spent);

    turn::close_turn(game, actor_idx, catalog);
    Ok(())
}

/// The three heal modes, selected by flags in priority order:
/// persistent, then hp-share, then a plain one-shot heal.
fn resolve_heal(
    game: &mut Match,
    actor_idx: usize,
    actor_name: &str,
    played: &crate::cards::CardInstance,
) {
    let value = played.current_value;

    if played.is_persistent {
        game.players[actor_idx]
            .active_effects
            .push(ActiveEffect::AutoHeal { value });
        game.log(format!(
            "{actor_name} activated auto-heal! (+{value} HP every turn)"
        ));
    } else if played.is_hp_share {
        let actor_id = game.players[actor_idx].id.clone();
        let candidates: Vec<(String, i64)> = game
            .alive_players()
            .filter(|p| p.id != actor_id)
            .map(|p| (p.name.clone(), p.hp))
            .collect();

        match game.rng.choose(&candidates).cloned() {
            Some((other_name, other_hp)) => {
                let old_hp = game.players[actor_idx].hp;
                game.players[actor_idx].hp = other_hp;
                game.log(format!(
                    "{actor_name} copied {other_name}'s HP ({other_hp})! (HP: {old_hp} -> {other_hp})"
                ));
            }
            None => {
                game.log(format!(
                    "{actor_name} tried to copy another player's HP, but no one was there."
                ));
            }
        }
    } else {
        let old_hp = game.players[actor_idx].heal(value);
        let new_hp = game.players[actor_idx].hp;
        game.log(format!(
            "{actor_name} recovered {value} HP! (HP: {old_hp} -> {new_hp})"
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardDefinition, CardId, CardInstance};
    use crate::core::{MatchRng, Player};
    use crate::engine::state::{GamePhase, MatchId};

    const FILLER: CardId = CardId::new(99);

    fn catalog() -> CardCatalog {
        CardCatalog::from_definitions([CardDefinition::new(
            FILLER,
            "Pebble",
            CardKind::Attack,
            1,
        )])
    }

    /// A playing-phase match with stocked decks and no hands; the first
    /// listed player has the turn.
    fn battle_match(ids: &[&str]) -> Match {
        let mut game = Match::new(MatchId::from("m1"), MatchRng::new(7));
        for id in ids {
            let mut player = Player::new(PlayerId::from(*id), id.to_uppercase());
            player.deck = vec![FILLER; 10];
            player.has_taken_first_turn = true;
            game.players.push(player);
        }
        game.turn_order = ids.iter().map(|id| PlayerId::from(*id)).collect();
        game.current_turn_player = Some(PlayerId::from(ids[0]));
        game.phase = GamePhase::Playing;
        game
    }

    /// Put a freshly minted instance of `def` into `player`'s hand.
    fn give(game: &mut Match, player: &str, def: &CardDefinition) -> InstanceId {
        let instance_id = game.alloc_instance_id();
        let card = CardInstance::from_definition(instance_id, def);
        game.player_mut(&PlayerId::from(player))
            .unwrap()
            .hand
            .push(card);
        instance_id
    }

    fn attack(value: i64) -> CardDefinition {
        CardDefinition::new(CardId::new(1), "Smash", CardKind::Attack, value)
    }

    #[test]
    fn test_shield_absorbs_before_hp() {
        let catalog = catalog();
        let mut game = battle_match(&["a", "b"]);
        game.player_mut(&PlayerId::from("b")).unwrap().shield = 5;
        game.player_mut(&PlayerId::from("b")).unwrap().hp = 20;
        let card = give(&mut game, "a", &attack(8));

        play_card(
            &mut game,
            &catalog,
            &PlayerId::from("a"),
            card,
            Some(&PlayerId::from("b")),
        )
        .unwrap();

        let victim = game.player(&PlayerId::from("b")).unwrap();
        assert_eq!(victim.shield, 0);
        assert_eq!(victim.hp, 17);
    }

    #[test]
    fn test_piercing_bypasses_shield() {
        let catalog = catalog();
        let mut game = battle_match(&["a", "b"]);
        game.player_mut(&PlayerId::from("b")).unwrap().shield = 5;
        game.player_mut(&PlayerId::from("b")).unwrap().hp = 20;
        let card = give(&mut game, "a", &attack(8).piercing());

        play_card(
            &mut game,
            &catalog,
            &PlayerId::from("a"),
            card,
            Some(&PlayerId::from("b")),
        )
        .unwrap();

        let victim = game.player(&PlayerId::from("b")).unwrap();
        assert_eq!(victim.shield, 5);
        assert_eq!(victim.hp, 12);
    }

    #[test]
    fn test_attack_clamps_hp_at_zero_and_logs_elimination() {
        let catalog = catalog();
        let mut game = battle_match(&["a", "b", "c"]);
        game.player_mut(&PlayerId::from("b")).unwrap().hp = 3;
        let card = give(&mut game, "a", &attack(10));

        play_card(
            &mut game,
            &catalog,
            &PlayerId::from("a"),
            card,
            Some(&PlayerId::from("b")),
        )
        .unwrap();

        assert_eq!(game.player(&PlayerId::from("b")).unwrap().hp, 0);
        assert!(game.game_log.iter().any(|l| l.contains("eliminated B")));
        assert_eq!(
            game.last_attacked.get(&PlayerId::from("b")),
            Some(&PlayerId::from("a"))
        );
    }

    #[test]
    fn test_attack_requires_known_target() {
        let catalog = catalog();
        let mut game = battle_match(&["a", "b"]);
        let card = give(&mut game, "a", &attack(4));

        let err = play_card(&mut game, &catalog, &PlayerId::from("a"), card, None).unwrap_err();
        assert_eq!(err, EngineError::TargetNotFound);

        let ghost = PlayerId::from("ghost");
        let err = play_card(&mut game, &catalog, &PlayerId::from("a"), card, Some(&ghost))
            .unwrap_err();
        assert_eq!(err, EngineError::TargetNotFound);

        // Rejections left the card in hand and the turn open.
        assert_eq!(game.player(&PlayerId::from("a")).unwrap().hand.len(), 1);
        assert_eq!(game.current_turn_player, Some(PlayerId::from("a")));
    }

    #[test]
    fn test_repeat_attack_forbidden_with_four_alive() {
        let catalog = catalog();
        let mut game = battle_match(&["a", "b", "c", "d"]);
        game.last_attacked
            .insert(PlayerId::from("b"), PlayerId::from("a"));
        let card = give(&mut game, "a", &attack(2));

        let before = serde_json::to_string(&game).unwrap();
        let err = play_card(
            &mut game,
            &catalog,
            &PlayerId::from("a"),
            card,
            Some(&PlayerId::from("b")),
        )
        .unwrap_err();

        assert_eq!(err, EngineError::RepeatedTargetForbidden);
        assert_eq!(serde_json::to_string(&game).unwrap(), before);
    }

    #[test]
    fn test_repeat_attack_allowed_with_three_alive() {
        let catalog = catalog();
        let mut game = battle_match(&["a", "b", "c", "d"]);
        game.player_mut(&PlayerId::from("d")).unwrap().hp = 0;
        game.last_attacked
            .insert(PlayerId::from("b"), PlayerId::from("a"));
        let card = give(&mut game, "a", &attack(2));

        play_card(
            &mut game,
            &catalog,
            &PlayerId::from("a"),
            card,
            Some(&PlayerId::from("b")),
        )
        .unwrap();

        assert_eq!(game.player(&PlayerId::from("b")).unwrap().hp, 28);
    }

    #[test]
    fn test_shield_card_stacks() {
        let catalog = catalog();
        let mut game = battle_match(&["a", "b"]);
        game.player_mut(&PlayerId::from("a")).unwrap().shield = 2;
        let def = CardDefinition::new(CardId::new(2), "Wall", CardKind::Shield, 6);
        let card = give(&mut game, "a", &def);

        play_card(&mut game, &catalog, &PlayerId::from("a"), card, None).unwrap();

        assert_eq!(game.player(&PlayerId::from("a")).unwrap().shield, 8);
        assert!(game.game_log.iter().any(|l| l.contains("total shield: 8")));
    }

    #[test]
    fn test_plain_heal_clamps_at_max() {
        let catalog = catalog();
        let mut game = battle_match(&["a", "b"]);
        game.player_mut(&PlayerId::from("a")).unwrap().hp = 28;
        let def = CardDefinition::new(CardId::new(3), "Mend", CardKind::Heal, 10);
        let card = give(&mut game, "a", &def);

        play_card(&mut game, &catalog, &PlayerId::from("a"), card, None).unwrap();

        assert_eq!(game.player(&PlayerId::from("a")).unwrap().hp, 30);
    }

    #[test]
    fn test_persistent_heal_appends_and_stacks() {
        let catalog = catalog();
        let mut game = battle_match(&["a", "b"]);
        let def = CardDefinition::new(CardId::new(4), "Regrow", CardKind::Heal, 2).persistent();

        let card = give(&mut game, "a", &def);
        play_card(&mut game, &catalog, &PlayerId::from("a"), card, None).unwrap();

        // Hand the turn back to "a" by playing something for "b".
        let filler = give(&mut game, "b", &attack(1));
        play_card(
            &mut game,
            &catalog,
            &PlayerId::from("b"),
            filler,
            Some(&PlayerId::from("a")),
        )
        .unwrap();

        let card = give(&mut game, "a", &def);
        play_card(&mut game, &catalog, &PlayerId::from("a"), card, None).unwrap();

        let effects = &game.player(&PlayerId::from("a")).unwrap().active_effects;
        assert_eq!(effects.len(), 2);
        assert!(effects
            .iter()
            .all(|e| *e == ActiveEffect::AutoHeal { value: 2 }));
    }

    #[test]
    fn test_hp_share_copies_an_alive_opponent() {
        let catalog = catalog();
        let mut game = battle_match(&["a", "b", "c"]);
        game.player_mut(&PlayerId::from("a")).unwrap().hp = 4;
        game.player_mut(&PlayerId::from("b")).unwrap().hp = 21;
        // The only alive opponent is "b".
        game.player_mut(&PlayerId::from("c")).unwrap().hp = 0;
        let def = CardDefinition::new(CardId::new(5), "Mimic", CardKind::Heal, 0).hp_share();
        let card = give(&mut game, "a", &def);

        play_card(&mut game, &catalog, &PlayerId::from("a"), card, None).unwrap();

        assert_eq!(game.player(&PlayerId::from("a")).unwrap().hp, 21);
    }

    #[test]
    fn test_hp_share_without_opponent_is_a_logged_noop() {
        let catalog = catalog();
        let mut game = battle_match(&["a", "b"]);
        game.player_mut(&PlayerId::from("a")).unwrap().hp = 9;
        game.player_mut(&PlayerId::from("b")).unwrap().hp = 0;
        let def = CardDefinition::new(CardId::new(5), "Mimic", CardKind::Heal, 0).hp_share();
        let card = give(&mut game, "a", &def);

        play_card(&mut game, &catalog, &PlayerId::from("a"), card, None).unwrap();

        assert_eq!(game.player(&PlayerId::from("a")).unwrap().hp, 9);
        assert!(game
            .game_log
            .iter()
            .any(|l| l.contains("no one was there")));
    }

    #[test]
    fn test_charge_boosts_whole_hand_by_fixed_amount() {
        let catalog = catalog();
        let mut game = battle_match(&["a", "b"]);
        let charge_def = CardDefinition::new(CardId::new(6), "Amp", CardKind::Charge, 3);
        let card = give(&mut game, "a", &charge_def);
        let other = give(&mut game, "a", &attack(4));

        play_card(&mut game, &catalog, &PlayerId::from("a"), card, None).unwrap();

        // The played card was boosted along with the rest before discard.
        let actor = game.player(&PlayerId::from("a")).unwrap();
        let discarded = actor
            .discard_pile
            .iter()
            .find(|c| c.instance_id == card)
            .unwrap();
        assert_eq!(discarded.current_value, 6);

        // The held card got the charge plus the passive turn-close +2.
        let held = actor.hand.iter().find(|c| c.instance_id == other).unwrap();
        assert_eq!(held.current_value, 4 + 3 + 2);
    }

    #[test]
    fn test_not_your_turn_leaves_match_unchanged() {
        let catalog = catalog();
        let mut game = battle_match(&["a", "b"]);
        let card = give(&mut game, "b", &attack(4));

        let before = serde_json::to_string(&game).unwrap();
        let err = play_card(
            &mut game,
            &catalog,
            &PlayerId::from("b"),
            card,
            Some(&PlayerId::from("a")),
        )
        .unwrap_err();

        assert_eq!(err, EngineError::NotYourTurn);
        assert_eq!(serde_json::to_string(&game).unwrap(), before);
    }

    #[test]
    fn test_card_not_in_hand() {
        let catalog = catalog();
        let mut game = battle_match(&["a", "b"]);
        give(&mut game, "a", &attack(4));

        let bogus = InstanceId::new(777);
        let err = play_card(&mut game, &catalog, &PlayerId::from("a"), bogus, None).unwrap_err();
        assert_eq!(err, EngineError::CardNotInHand(bogus));
    }

    #[test]
    fn test_lethal_attack_ends_match_in_same_call() {
        let catalog = catalog();
        let mut game = battle_match(&["a", "b"]);
        game.player_mut(&PlayerId::from("b")).unwrap().hp = 5;
        let card = give(&mut game, "a", &attack(30));

        play_card(
            &mut game,
            &catalog,
            &PlayerId::from("a"),
            card,
            Some(&PlayerId::from("b")),
        )
        .unwrap();

        assert_eq!(game.phase, GamePhase::Ended);
        assert_eq!(game.winner, Some(PlayerId::from("a")));
    }
}
