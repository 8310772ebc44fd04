//! Deck engine: weighted deck construction, drawing, and reshuffling.
//!
//! Decks hold card ids only; a `CardInstance` is minted at draw time with a
//! fresh match-unique instance id. When a deck runs out, the discard pile is
//! reshuffled into a new deck. Both piles being empty at draw time is a
//! programmer error - every played card lands in the discard pile, so a
//! drained deck always has a non-empty discard behind it.

use crate::cards::{CardCatalog, CardId, CardInstance};
use crate::core::MatchRng;
use crate::engine::state::Match;

/// Build a shuffled weighted deck: each definition contributes `probability`
/// copies of its id.
#[must_use]
pub(crate) fn build_deck(catalog: &CardCatalog, rng: &mut MatchRng) -> Vec<CardId> {
    let mut deck = Vec::new();
    for def in catalog.iter() {
        for _ in 0..def.probability {
            deck.push(def.id);
        }
    }
    rng.shuffle(&mut deck);
    deck
}

/// Draw one card for the player at `player_idx`, reshuffling the discard
/// pile into a fresh deck first if the deck is empty.
pub(crate) fn draw_card(game: &mut Match, player_idx: usize, catalog: &CardCatalog) {
    let instance_id = game.alloc_instance_id();

    let Match { players, rng, .. } = game;
    let player = &mut players[player_idx];

    if player.deck.is_empty() {
        player.deck = player.discard_pile.drain(..).map(|c| c.card_id).collect();
        rng.shuffle(&mut player.deck);
    }

    let card_id = player
        .deck
        .pop()
        .expect("draw with empty deck and empty discard pile");
    let def = catalog.get_unchecked(card_id);
    player.hand.push(CardInstance::from_definition(instance_id, def));
}
