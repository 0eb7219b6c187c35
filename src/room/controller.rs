//! Room actor: owns the hand state and serializes every mutation.
//!
//! One controller task per room. All requests, timer expiries, and bot
//! decisions arrive through a single mpsc mailbox, so the hand state
//! needs no locks. Timers and bot calls are spawned tasks that post
//! back into the mailbox tagged with the turn generation they were
//! armed for; the controller bumps the generation whenever the turn
//! moves on and drops anything stale on arrival.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::bot::{coerce_action, fallback_action, AiDecisionProvider, DecisionContext};
use crate::game::{
    betting, hand, Chips, Deck, GamePhase, GameState, GameStateView, HandFlow, Player,
    PlayerAction, PlayerId,
};

use super::config::RoomConfig;
use super::events::{EventSink, Recipient, RoomEvent};
use super::messages::{RoomError, RoomMessage, RoomResult};
use super::RoomId;

const MAILBOX_CAPACITY: usize = 100;

/// Cloneable handle for sending requests to a room controller.
#[derive(Clone)]
pub struct RoomHandle {
    sender: mpsc::Sender<RoomMessage>,
    room_id: RoomId,
}

impl RoomHandle {
    #[must_use]
    pub fn room_id(&self) -> RoomId {
        self.room_id
    }

    /// Send a raw message to the room.
    pub async fn send(&self, message: RoomMessage) -> RoomResult {
        self.sender.send(message).await.map_err(|_| RoomError::Closed)
    }

    async fn request<F>(&self, build: F) -> RoomResult
    where
        F: FnOnce(oneshot::Sender<RoomResult>) -> RoomMessage,
    {
        let (tx, rx) = oneshot::channel();
        self.send(build(tx)).await?;
        rx.await.map_err(|_| RoomError::Closed)?
    }

    pub async fn join(
        &self,
        player_id: impl Into<PlayerId>,
        buy_in: Chips,
        is_bot: bool,
    ) -> RoomResult {
        let player_id = player_id.into();
        self.request(|response| RoomMessage::Join {
            player_id,
            buy_in,
            is_bot,
            response,
        })
        .await
    }

    pub async fn leave(&self, player_id: impl Into<PlayerId>) -> RoomResult {
        let player_id = player_id.into();
        self.request(|response| RoomMessage::Leave {
            player_id,
            response,
        })
        .await
    }

    pub async fn stand(&self, player_id: impl Into<PlayerId>) -> RoomResult {
        let player_id = player_id.into();
        self.request(|response| RoomMessage::Stand {
            player_id,
            response,
        })
        .await
    }

    pub async fn rejoin(&self, player_id: impl Into<PlayerId>) -> RoomResult {
        let player_id = player_id.into();
        self.request(|response| RoomMessage::Rejoin {
            player_id,
            response,
        })
        .await
    }

    pub async fn take_action(
        &self,
        player_id: impl Into<PlayerId>,
        action: PlayerAction,
    ) -> RoomResult {
        let player_id = player_id.into();
        self.request(|response| RoomMessage::TakeAction {
            player_id,
            action,
            response,
        })
        .await
    }

    /// Snapshot the room as seen by `viewer`. `None` until the first
    /// hand is dealt.
    pub async fn view(&self, viewer: Option<PlayerId>) -> Result<Option<GameStateView>, RoomError> {
        let (tx, rx) = oneshot::channel();
        self.send(RoomMessage::GetView {
            viewer,
            response: tx,
        })
        .await?;
        rx.await.map_err(|_| RoomError::Closed)
    }

    pub async fn close(&self) -> RoomResult {
        self.request(|response| RoomMessage::Close { response }).await
    }
}

/// A seat in the room's roster. Outlives individual hands; chips are
/// copied into the per-hand [`Player`] at the deal and back at turnover.
#[derive(Clone, Debug)]
struct Seat {
    id: PlayerId,
    chips: Chips,
    is_bot: bool,
    /// Sit out starting with the next hand. Set by explicit request or
    /// by the turn clock; cleared by rejoin.
    standing: bool,
    /// Remove the seat at the next turnover. Cleared by rejoin.
    leaving: bool,
}

/// The room actor. Created with [`GameController::new`], consumed by
/// [`GameController::run`].
pub struct GameController {
    id: RoomId,
    config: RoomConfig,
    inbox: mpsc::Receiver<RoomMessage>,
    /// Handed to timer and bot tasks so they can post back. Weak so the
    /// mailbox closes, and the actor exits, once every external
    /// [`RoomHandle`] is gone.
    sender: mpsc::WeakSender<RoomMessage>,
    sink: Arc<dyn EventSink>,
    provider: Arc<dyn AiDecisionProvider>,
    seats: Vec<Seat>,
    /// Joins received mid-hand, merged at turnover.
    pending_joins: Vec<Seat>,
    state: Option<GameState>,
    deck: Option<Deck>,
    /// Dealer of the last completed hand; the button moves to the next
    /// seated player at the next deal.
    last_dealer: Option<PlayerId>,
    /// Whether the last settled hand reached a true showdown. Gates
    /// hole-card reveal in post-hand views.
    last_showdown: bool,
    /// Turn generation. Bumped whenever the turn moves on; messages
    /// tagged with an older generation are dropped unexamined.
    generation: u64,
    turn_timer: Option<JoinHandle<()>>,
    closed: bool,
}

impl GameController {
    pub fn new(
        id: RoomId,
        config: RoomConfig,
        sink: Arc<dyn EventSink>,
        provider: Arc<dyn AiDecisionProvider>,
    ) -> (Self, RoomHandle) {
        let (sender, inbox) = mpsc::channel(MAILBOX_CAPACITY);
        let handle = RoomHandle {
            sender: sender.clone(),
            room_id: id,
        };
        let actor = Self {
            id,
            config,
            inbox,
            sender: sender.downgrade(),
            sink,
            provider,
            seats: Vec::new(),
            pending_joins: Vec::new(),
            state: None,
            deck: None,
            last_dealer: None,
            last_showdown: false,
            generation: 0,
            turn_timer: None,
            closed: false,
        };
        (actor, handle)
    }

    /// Run the actor loop until the room is closed or every handle is
    /// dropped. After close, queued messages are dropped without effect.
    pub async fn run(mut self) {
        log::info!("room {} '{}' starting", self.id, self.config.name);

        while let Some(message) = self.inbox.recv().await {
            self.handle_message(message);
            if self.closed {
                break;
            }
        }

        self.abort_turn_timer();
        log::info!("room {} '{}' stopped", self.id, self.config.name);
    }

    fn handle_message(&mut self, message: RoomMessage) {
        match message {
            RoomMessage::Join {
                player_id,
                buy_in,
                is_bot,
                response,
            } => {
                let result = self.handle_join(player_id, buy_in, is_bot);
                let _ = response.send(result);
            }
            RoomMessage::Leave {
                player_id,
                response,
            } => {
                let result = self.handle_leave(&player_id);
                let _ = response.send(result);
            }
            RoomMessage::Stand {
                player_id,
                response,
            } => {
                let result = self.handle_stand(&player_id);
                let _ = response.send(result);
            }
            RoomMessage::Rejoin {
                player_id,
                response,
            } => {
                let result = self.handle_rejoin(&player_id);
                let _ = response.send(result);
            }
            RoomMessage::TakeAction {
                player_id,
                action,
                response,
            } => {
                let result = self.handle_action(&player_id, action);
                let _ = response.send(result);
            }
            RoomMessage::GetView { viewer, response } => {
                let _ = response.send(self.build_view(viewer.as_ref()));
            }
            RoomMessage::Close { response } => {
                log::info!("room {}: close requested", self.id);
                self.closed = true;
                self.abort_turn_timer();
                let _ = response.send(Ok(()));
            }
            RoomMessage::TurnTimeout { generation } => {
                self.handle_turn_timeout(generation);
            }
            RoomMessage::BotDecision {
                generation,
                player_id,
                action,
            } => {
                self.handle_bot_decision(generation, &player_id, action);
            }
            RoomMessage::DealNextStreet { generation } => {
                if self.is_stale(generation, "run-out deal") {
                    return;
                }
                self.deal_next_street();
            }
            RoomMessage::BeginHand { generation } => {
                if self.is_stale(generation, "hand start") {
                    return;
                }
                self.start_hand();
            }
        }
    }

    fn is_stale(&self, generation: u64, what: &str) -> bool {
        if generation != self.generation {
            log::debug!(
                "room {}: dropping stale {what} (generation {generation}, current {})",
                self.id,
                self.generation
            );
            return true;
        }
        false
    }

    // --- roster ---------------------------------------------------------

    fn seat_mut(&mut self, id: &PlayerId) -> Option<&mut Seat> {
        self.seats.iter_mut().find(|s| &s.id == id)
    }

    fn is_seated(&self, id: &PlayerId) -> bool {
        self.seats.iter().any(|s| &s.id == id)
            || self.pending_joins.iter().any(|s| &s.id == id)
    }

    fn hand_in_progress(&self) -> bool {
        self.state
            .as_ref()
            .is_some_and(|s| s.phase != GamePhase::Showdown)
    }

    fn handle_join(&mut self, id: PlayerId, buy_in: Chips, is_bot: bool) -> RoomResult {
        if self.is_seated(&id) {
            return Err(RoomError::AlreadySeated);
        }
        if self.seats.len() + self.pending_joins.len() >= self.config.max_players {
            return Err(RoomError::RoomFull);
        }
        let seat = Seat {
            id: id.clone(),
            chips: buy_in,
            is_bot,
            standing: false,
            leaving: false,
        };
        if self.hand_in_progress() {
            log::info!("room {}: {id} queued to join at next hand", self.id);
            self.pending_joins.push(seat);
        } else {
            log::info!("room {}: {id} joined with ${buy_in}", self.id);
            self.seats.push(seat);
            self.maybe_schedule_hand();
        }
        Ok(())
    }

    fn handle_leave(&mut self, id: &PlayerId) -> RoomResult {
        if let Some(pos) = self.pending_joins.iter().position(|s| &s.id == id) {
            self.pending_joins.remove(pos);
            return Ok(());
        }
        let Some(seat) = self.seat_mut(id) else {
            return Err(RoomError::NotSeated);
        };
        seat.leaving = true;
        seat.standing = true;
        log::info!("room {}: {id} leaving", self.id);

        // Their seat folds out of the current hand immediately.
        if self.hand_in_progress() {
            self.fold_out(id);
        } else {
            self.remove_departed();
        }
        Ok(())
    }

    fn handle_stand(&mut self, id: &PlayerId) -> RoomResult {
        let Some(seat) = self.seat_mut(id) else {
            return Err(RoomError::NotSeated);
        };
        seat.standing = true;
        log::debug!("room {}: {id} standing at next hand", self.id);
        Ok(())
    }

    fn handle_rejoin(&mut self, id: &PlayerId) -> RoomResult {
        let room_id = self.id;
        let Some(seat) = self.seat_mut(id) else {
            return Err(RoomError::NotSeated);
        };
        seat.standing = false;
        seat.leaving = false;
        log::info!("room {room_id}: {id} rejoined");
        self.maybe_schedule_hand();
        Ok(())
    }

    /// Fold a player out of the running hand without it being their
    /// turn (leave or disconnect). If it was their turn the fold goes
    /// through the betting engine so the turn advances normally.
    fn fold_out(&mut self, id: &PlayerId) {
        let Some(state) = &mut self.state else {
            return;
        };
        let Some(seat_idx) = state.seat_of(id) else {
            return;
        };
        if !state.players[seat_idx].in_hand() {
            return;
        }

        if state.to_act == Some(seat_idx) {
            if betting::apply_action(state, id, &PlayerAction::Fold).is_ok() {
                self.after_action(id.clone(), PlayerAction::Fold, false);
            }
            return;
        }

        state.players[seat_idx].folded = true;
        self.emit(
            Recipient::Room,
            RoomEvent::ActionTaken {
                player_id: id.clone(),
                action: PlayerAction::Fold,
                timed_out: false,
            },
        );

        // An out-of-turn fold can end the hand or complete the round.
        let Some(state) = &self.state else {
            return;
        };
        if state.in_hand_count() <= 1 {
            self.finish_hand();
        } else if hand::betting_round_complete(state) {
            self.abort_turn_timer();
            self.advance_or_finish();
        } else {
            self.broadcast_state();
        }
    }

    // --- hand lifecycle -------------------------------------------------

    fn eligible_count(&self) -> usize {
        self.seats
            .iter()
            .filter(|s| !s.standing && !s.leaving && s.chips > 0)
            .count()
    }

    /// Arm the inter-hand timer if a new hand can begin.
    fn maybe_schedule_hand(&mut self) {
        if self.closed || self.hand_in_progress() || self.eligible_count() < 2 {
            return;
        }
        self.generation += 1;
        let generation = self.generation;
        log::debug!("room {}: next hand in {:?}", self.id, self.config.inter_hand_delay);
        let _ = self.post_after(
            self.config.inter_hand_delay,
            RoomMessage::BeginHand { generation },
        );
    }

    fn start_hand(&mut self) {
        let eligible: Vec<Seat> = self
            .seats
            .iter()
            .filter(|s| !s.standing && !s.leaving && s.chips > 0)
            .cloned()
            .collect();
        if eligible.len() < 2 {
            return;
        }

        // The button moves to the seat after the last hand's dealer.
        let dealer_idx = match self
            .last_dealer
            .as_ref()
            .and_then(|d| eligible.iter().position(|s| &s.id == d))
        {
            Some(pos) => (pos + 1) % eligible.len(),
            None => 0,
        };

        let players: Vec<Player> = eligible
            .iter()
            .enumerate()
            .map(|(idx, s)| Player::new(s.id.clone(), s.chips, idx, s.is_bot))
            .collect();

        let mut state = GameState::new_hand(players, dealer_idx, self.config.blinds());
        let mut deck = Deck::shuffled();
        hand::post_blinds(&mut state);
        if let Err(e) = hand::deal_hole_cards(&mut state, &mut deck) {
            // Cannot happen with a full deck and the seat cap, but the
            // room must keep trying rather than idle forever.
            log::error!("room {}: deal failed: {e}", self.id);
            self.maybe_schedule_hand();
            return;
        }
        state.to_act = hand::first_to_act(&state);

        log::info!(
            "room {}: hand started, {} players, dealer {}",
            self.id,
            state.players.len(),
            state.players[dealer_idx].id
        );

        self.state = Some(state);
        self.deck = Some(deck);
        self.last_showdown = false;
        self.emit_views(|view| RoomEvent::HandStarted { view });

        let Some(state) = &self.state else {
            return;
        };
        if hand::needs_runout(state) || state.to_act.is_none() {
            // Blinds put everyone all-in; run the board out.
            self.advance_or_finish();
        } else {
            self.begin_turn();
        }
    }

    /// Open the current seat's turn: bump the generation, then either
    /// dispatch the bot decision task or arm the human turn clock.
    fn begin_turn(&mut self) {
        self.abort_turn_timer();
        let Some(state) = &self.state else {
            return;
        };
        let Some(player) = state.current_player() else {
            return;
        };
        self.generation += 1;
        let generation = self.generation;
        let player_id = player.id.clone();

        if player.is_bot {
            let ctx = DecisionContext {
                player_id: player_id.clone(),
                hole_cards: player.hole_cards.clone(),
                view: GameStateView::sanitized(state, Some(&player_id), false),
                to_call: betting::amount_to_call(state, &player_id),
                min_raise: state.min_raise,
                can_check: betting::amount_to_call(state, &player_id) == 0,
            };
            let provider = Arc::clone(&self.provider);
            let sender = self.sender.clone();
            let deadline = self.config.bot_decision_timeout;
            let room_id = self.id;
            tokio::spawn(async move {
                let action = match tokio::time::timeout(deadline, provider.decide(ctx)).await {
                    Ok(Ok(payload)) => coerce_action(&payload),
                    Ok(Err(e)) => {
                        log::warn!("room {room_id}: provider failed for {player_id}: {e:#}");
                        None
                    }
                    Err(_) => {
                        log::warn!("room {room_id}: provider deadline for {player_id}");
                        None
                    }
                };
                if let Some(sender) = sender.upgrade() {
                    let _ = sender
                        .send(RoomMessage::BotDecision {
                            generation,
                            player_id,
                            action,
                        })
                        .await;
                }
            });
        } else {
            self.emit(
                Recipient::Player(player_id),
                RoomEvent::YourTurn {
                    time_budget: self.config.action_timeout,
                },
            );
            let handle = self.post_after(
                self.config.action_timeout,
                RoomMessage::TurnTimeout { generation },
            );
            self.turn_timer = Some(handle);
        }
    }

    fn handle_action(&mut self, id: &PlayerId, action: PlayerAction) -> RoomResult {
        let Some(state) = &mut self.state else {
            return Err(crate::game::GameError::NoHandInProgress.into());
        };
        if state.phase == GamePhase::Showdown {
            return Err(crate::game::GameError::NoHandInProgress.into());
        }
        betting::apply_action(state, id, &action).map_err(RoomError::Game)?;
        self.after_action(id.clone(), action, false);
        Ok(())
    }

    /// Common tail for every applied action: emit, then continue the
    /// hand per the flow decision.
    fn after_action(&mut self, actor: PlayerId, action: PlayerAction, timed_out: bool) {
        self.abort_turn_timer();
        log::debug!("room {}: {actor} {action}", self.id);
        self.emit(
            Recipient::Room,
            RoomEvent::ActionTaken {
                player_id: actor,
                action,
                timed_out,
            },
        );

        let Some(state) = &mut self.state else {
            return;
        };
        match hand::flow_after_action(state) {
            HandFlow::Continue(seat) => {
                state.to_act = Some(seat);
                self.broadcast_state();
                self.begin_turn();
            }
            HandFlow::AdvanceRound => self.advance_or_finish(),
            HandFlow::Finish => self.finish_hand(),
        }
    }

    /// The betting round is done: deal the next street now, or paced if
    /// the remaining board is a run-out.
    fn advance_or_finish(&mut self) {
        let Some(state) = &mut self.state else {
            return;
        };
        if hand::needs_runout(state) {
            // Nobody acts during a run-out.
            state.to_act = None;
            self.broadcast_state();
            self.generation += 1;
            let generation = self.generation;
            let _ = self.post_after(
                self.config.board_reveal_delay,
                RoomMessage::DealNextStreet { generation },
            );
        } else {
            self.deal_next_street();
        }
    }

    fn deal_next_street(&mut self) {
        let (Some(state), Some(deck)) = (&mut self.state, &mut self.deck) else {
            return;
        };
        if let Err(e) = hand::advance_round(state, deck) {
            // Deck underflow or phase error: the hand cannot continue,
            // settle what is on the table.
            log::error!("room {}: failed to advance, finishing hand: {e}", self.id);
            self.finish_hand();
            return;
        }

        let Some(state) = &mut self.state else {
            return;
        };
        if state.phase == GamePhase::Showdown {
            self.finish_hand();
            return;
        }
        log::debug!("room {}: dealt {}", self.id, state.phase);
        if hand::needs_runout(state) {
            state.to_act = None;
            self.broadcast_state();
            self.generation += 1;
            let generation = self.generation;
            let _ = self.post_after(
                self.config.board_reveal_delay,
                RoomMessage::DealNextStreet { generation },
            );
        } else {
            self.broadcast_state();
            self.begin_turn();
        }
    }

    fn finish_hand(&mut self) {
        self.abort_turn_timer();
        // Invalidate every outstanding timer and bot decision.
        self.generation += 1;
        let Some(state) = &mut self.state else {
            return;
        };
        let result = hand::settle(state);
        self.last_showdown = result.showdown;
        log::info!(
            "room {}: hand ended, pot ${}, {} winner(s)",
            self.id,
            result.winners.iter().map(|w| w.amount).sum::<Chips>(),
            result.winners.len()
        );

        self.emit_views(|view| RoomEvent::StateUpdated { view });
        self.emit(Recipient::Room, RoomEvent::HandEnded { result });

        self.turnover();
        self.maybe_schedule_hand();
    }

    /// Reconcile the roster after a hand: copy stacks back, move the
    /// button marker, drop departed and broke seats, refill broke bots,
    /// and merge queued joins.
    fn turnover(&mut self) {
        if let Some(state) = &self.state {
            for p in &state.players {
                if let Some(seat) = self.seats.iter_mut().find(|s| s.id == p.id) {
                    seat.chips = p.chips;
                }
            }
            self.last_dealer = Some(state.players[state.dealer_idx].id.clone());
        }

        let starting_stack = self.config.starting_stack;
        let room_id = self.id;
        for seat in &mut self.seats {
            if seat.chips == 0 && seat.is_bot {
                // Stand-in for the platform's external refill.
                log::debug!("room {room_id}: refilling bot {}", seat.id);
                seat.chips = starting_stack;
            }
        }
        self.seats.retain(|s| {
            if s.leaving {
                log::info!("room {room_id}: {} left with ${}", s.id, s.chips);
                return false;
            }
            if s.chips == 0 {
                log::info!("room {room_id}: {} is broke and leaves the table", s.id);
                return false;
            }
            true
        });
        self.seats.append(&mut self.pending_joins);
    }

    // --- timers and bots ------------------------------------------------

    fn handle_turn_timeout(&mut self, generation: u64) {
        if self.is_stale(generation, "turn timeout") {
            return;
        }
        let Some(state) = &mut self.state else {
            return;
        };
        let Some(player) = state.current_player() else {
            return;
        };
        let player_id = player.id.clone();
        let action = fallback_action(betting::amount_to_call(state, &player_id) == 0);
        log::warn!(
            "room {}: {player_id} timed out, room {action} for them",
            self.id
        );

        match betting::apply_action(state, &player_id, &action) {
            Ok(()) => {
                // Timed-out players sit out until they come back.
                if let Some(seat) = self.seat_mut(&player_id) {
                    seat.standing = true;
                }
                self.after_action(player_id, action, true);
            }
            Err(e) => log::error!("room {}: timeout fallback rejected: {e}", self.id),
        }
    }

    fn handle_bot_decision(
        &mut self,
        generation: u64,
        id: &PlayerId,
        action: Option<PlayerAction>,
    ) {
        if self.is_stale(generation, "bot decision") {
            return;
        }
        let Some(state) = &mut self.state else {
            return;
        };
        // Re-validate turn ownership; the hand may have moved on in
        // ways a generation match does not capture.
        if state.current_player().map(|p| &p.id) != Some(id) {
            log::debug!("room {}: dropping bot decision for {id}, not their turn", self.id);
            return;
        }

        let fallback = fallback_action(betting::amount_to_call(state, id) == 0);
        let chosen = action.unwrap_or(fallback);
        let applied = match betting::apply_action(state, id, &chosen) {
            Ok(()) => chosen,
            Err(e) => {
                // Illegal provider action degrades to the safe default.
                log::warn!("room {}: bot {id} chose illegal {chosen} ({e}), using {fallback}", self.id);
                match betting::apply_action(state, id, &fallback) {
                    Ok(()) => fallback,
                    Err(e) => {
                        log::error!("room {}: bot fallback rejected: {e}", self.id);
                        return;
                    }
                }
            }
        };
        self.after_action(id.clone(), applied, false);
    }

    fn post_after(&self, delay: Duration, message: RoomMessage) -> JoinHandle<()> {
        let sender = self.sender.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(sender) = sender.upgrade() {
                let _ = sender.send(message).await;
            }
        })
    }

    fn abort_turn_timer(&mut self) {
        if let Some(timer) = self.turn_timer.take() {
            timer.abort();
        }
    }

    // --- views and events -----------------------------------------------

    fn build_view(&self, viewer: Option<&PlayerId>) -> Option<GameStateView> {
        let state = self.state.as_ref()?;
        let showdown = state.phase == GamePhase::Showdown && self.last_showdown;
        Some(GameStateView::sanitized(state, viewer, showdown))
    }

    fn emit(&self, recipient: Recipient, event: RoomEvent) {
        if self.closed {
            return;
        }
        self.sink.emit(self.id, recipient, event);
    }

    fn broadcast_state(&self) {
        self.emit_views(|view| RoomEvent::StateUpdated { view });
    }

    /// Emit a view-carrying event: one per seated human with their own
    /// cards visible, plus a room-scoped copy with every card hidden
    /// (or revealed, after a true showdown).
    fn emit_views(&self, event: impl Fn(GameStateView) -> RoomEvent) {
        let Some(state) = &self.state else {
            return;
        };
        let showdown = state.phase == GamePhase::Showdown && self.last_showdown;
        for p in &state.players {
            if p.is_bot {
                continue;
            }
            let view = GameStateView::sanitized(state, Some(&p.id), showdown);
            self.emit(Recipient::Player(p.id.clone()), event(view));
        }
        let view = GameStateView::sanitized(state, None, showdown);
        self.emit(Recipient::Room, event(view));
    }

    fn remove_departed(&mut self) {
        let room_id = self.id;
        self.seats.retain(|s| {
            if s.leaving {
                log::info!("room {room_id}: {} left with ${}", s.id, s.chips);
                false
            } else {
                true
            }
        });
    }
}
