//! Round driver: an explicit state machine for the shuffle → lock → reveal
//! cycle, plus the wasm glue that binds it to the page.
//!
//! The machine itself never touches the DOM. Transitions return small values
//! the glue layer applies, which keeps the sequencing logic runnable under
//! host-side `cargo test` while the browser build drives it from interval /
//! timeout callbacks.

use std::cell::RefCell;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlButtonElement, HtmlElement, window};

use crate::config::GameConfig;
use crate::logic::{Hand, Outcome, pick_different, resolve};

// --- State machine -----------------------------------------------------------

/// Where a round currently is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// NPC hand cycling on the shuffle interval; the user may choose.
    Shuffling,
    /// User committed; NPC hand frozen, waiting for the reveal timer.
    LockedPendingReveal,
    /// Result on screen until the user restarts.
    ResultShown,
}

/// Data produced by [`RoundState::reveal`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reveal {
    pub user: Hand,
    pub npc: Hand,
    pub outcome: Outcome,
}

/// One round of janken. Owns the displayed NPC hand and the committed
/// choice; timer handles stay in the glue layer.
#[derive(Clone, Debug)]
pub struct RoundState {
    phase: Phase,
    npc_hand: Hand,
    committed: Option<(Hand, Hand)>,
}

impl RoundState {
    pub fn new() -> Self {
        Self {
            phase: Phase::Shuffling,
            npc_hand: Hand::Rock,
            committed: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The NPC hand currently on display.
    pub fn npc_hand(&self) -> Hand {
        self.npc_hand
    }

    /// Advance the shuffle display by one tick. The new hand always differs
    /// from the one currently shown so the animation visibly changes.
    /// No-op outside `Shuffling`.
    pub fn shuffle_tick(&mut self) -> Option<Hand> {
        if self.phase != Phase::Shuffling {
            return None;
        }
        self.npc_hand = pick_different(&Hand::ALL, self.npc_hand);
        Some(self.npc_hand)
    }

    /// Commit the user's hand. The NPC hand is frozen here with one final
    /// forced change against the frame shown at click time, but stays hidden
    /// until [`reveal`](Self::reveal). Returns `None` when the round is
    /// already locked or finished, which doubles as the re-entry guard for
    /// rapid clicks.
    pub fn choose(&mut self, user: Hand) -> Option<Hand> {
        if self.phase != Phase::Shuffling {
            return None;
        }
        let frozen = pick_different(&Hand::ALL, self.npc_hand);
        self.committed = Some((user, frozen));
        self.phase = Phase::LockedPendingReveal;
        Some(frozen)
    }

    /// Fire the reveal: resolve the committed pair and move to `ResultShown`.
    /// `None` unless a choice is pending.
    pub fn reveal(&mut self) -> Option<Reveal> {
        if self.phase != Phase::LockedPendingReveal {
            return None;
        }
        let (user, npc) = self.committed.take()?;
        self.phase = Phase::ResultShown;
        self.npc_hand = npc;
        Some(Reveal {
            user,
            npc,
            outcome: resolve(user, npc),
        })
    }

    /// Reset for a fresh round, valid from any phase.
    pub fn restart(&mut self) {
        self.phase = Phase::Shuffling;
        self.npc_hand = Hand::Rock;
        self.committed = None;
    }
}

impl Default for RoundState {
    fn default() -> Self {
        Self::new()
    }
}

// --- Presentation data --------------------------------------------------------

const BASE_EXPRESSION: &str = "assets/base.png";
const BASE_MESSAGE: &str = "「じゃーんけーん…ぽん！」のタイミングをねらってね。";
const JUDGING_MESSAGE: &str = "……判定中……";
const STATUS_SHUFFLING: &str = "シャッフル中";
const STATUS_JUDGING: &str = "判定中...";
const STATUS_RESULT: &str = "結果発表";
const NO_CHOICE_LABEL: &str = "未選択";
const UNKNOWN_HAND_LABEL: &str = "???";

const OUTCOME_CLASSES: [&str; 3] = ["is-win", "is-lose", "is-draw"];

fn hand_label(hand: Hand) -> &'static str {
    match hand {
        Hand::Rock => "グー",
        Hand::Scissors => "チョキ",
        Hand::Paper => "パー",
    }
}

fn hand_emoji(hand: Hand) -> &'static str {
    match hand {
        Hand::Rock => "✊",
        Hand::Scissors => "✌️",
        Hand::Paper => "🖐️",
    }
}

/// Overlay art for hands that have any. The rock pose is part of the base
/// illustration, so it hides the overlay instead.
fn hand_image(hand: Hand) -> Option<&'static str> {
    match hand {
        Hand::Rock => None,
        Hand::Scissors => Some("assets/Scissors.png"),
        Hand::Paper => Some("assets/Paper.png"),
    }
}

// --- DOM glue -----------------------------------------------------------------

/// Page elements resolved once at startup. Required elements abort startup
/// when missing; the rest degrade gracefully in test / embed contexts.
struct Dom {
    expression_layer: Element,
    hand_layer: Element,
    user_hand_label: Element,
    final_hand_label: Element,
    status_pill: Element,
    result_text: Element,
    result_bar: Element,
    hand_buttons: Vec<HtmlButtonElement>,
    restart_btn: Option<Element>,
    page: Option<HtmlElement>,
    frame: Option<Element>,
    vs_overlay: Option<Element>,
    npc_hand_emoji: Option<Element>,
}

/// Everything the timer and event callbacks mutate, behind one cell. The
/// closures live here so the browser-side function references they hand to
/// `setInterval` / `setTimeout` stay valid across rounds.
struct UiState {
    round: RoundState,
    config: GameConfig,
    dom: Dom,
    shuffle_timer: Option<i32>,
    reveal_timer: Option<i32>,
    shake_timer: Option<i32>,
    shuffle_cb: Closure<dyn FnMut()>,
    reveal_cb: Closure<dyn FnMut()>,
    shake_cb: Closure<dyn FnMut()>,
}

// RefCell::new isn't const on this toolchain; allow Clippy lint until a const initializer is feasible.
thread_local! {
    static UI_STATE: RefCell<Option<UiState>> = RefCell::new(None);
}

/// Wire the DOM, install listeners and timer callbacks, and start the first
/// shuffle. Called once from the crate's wasm entry points.
pub fn start_round_mode(config: GameConfig) -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let dom = resolve_dom(&doc)?;

    // Hand buttons commit the user's choice; the hand key rides on the
    // button's data-hand attribute. Buttons without a parseable key are
    // left inert rather than failing startup.
    for btn in &dom.hand_buttons {
        let Some(hand) = btn
            .get_attribute("data-hand")
            .and_then(|key| Hand::from_key(&key))
        else {
            continue;
        };
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| {
            UI_STATE.with(|cell| {
                if let Some(st) = cell.borrow_mut().as_mut() {
                    handle_user_choice(st, hand);
                }
            });
        }) as Box<dyn FnMut(_)>);
        btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    if let Some(restart) = &dom.restart_btn {
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| {
            UI_STATE.with(|cell| {
                if let Some(st) = cell.borrow_mut().as_mut() {
                    start_shuffle(st);
                }
            });
        }) as Box<dyn FnMut(_)>);
        restart.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    let shuffle_cb = Closure::wrap(Box::new(|| {
        UI_STATE.with(|cell| {
            if let Some(st) = cell.borrow_mut().as_mut() {
                if let Some(hand) = st.round.shuffle_tick() {
                    set_hand_visual(&st.dom, hand);
                }
            }
        });
    }) as Box<dyn FnMut()>);

    let reveal_cb = Closure::wrap(Box::new(|| {
        UI_STATE.with(|cell| {
            if let Some(st) = cell.borrow_mut().as_mut() {
                st.reveal_timer = None;
                if let Some(reveal) = st.round.reveal() {
                    announce_result(st, reveal);
                }
            }
        });
    }) as Box<dyn FnMut()>);

    let shake_cb = Closure::wrap(Box::new(|| {
        UI_STATE.with(|cell| {
            if let Some(st) = cell.borrow_mut().as_mut() {
                st.shake_timer = None;
                if let Some(page) = &st.dom.page {
                    page.class_list().remove_1("shake").ok();
                }
            }
        });
    }) as Box<dyn FnMut()>);

    let mut state = UiState {
        round: RoundState::new(),
        config,
        dom,
        shuffle_timer: None,
        reveal_timer: None,
        shake_timer: None,
        shuffle_cb,
        reveal_cb,
        shake_cb,
    };
    start_shuffle(&mut state);
    UI_STATE.with(|cell| {
        *cell.borrow_mut() = Some(state);
    });
    Ok(())
}

fn resolve_dom(doc: &Document) -> Result<Dom, JsValue> {
    let required = |id: &str| -> Result<Element, JsValue> {
        doc.get_element_by_id(id)
            .ok_or_else(|| JsValue::from_str(&format!("missing #{id} element")))
    };

    let mut hand_buttons = Vec::new();
    let nodes = doc.query_selector_all(".hand-btn")?;
    for i in 0..nodes.length() {
        if let Some(node) = nodes.item(i) {
            if let Ok(btn) = node.dyn_into::<HtmlButtonElement>() {
                hand_buttons.push(btn);
            }
        }
    }

    Ok(Dom {
        expression_layer: required("expression-layer")?,
        hand_layer: required("hand-layer")?,
        user_hand_label: required("user-hand-label")?,
        final_hand_label: required("final-hand-label")?,
        status_pill: required("status-pill")?,
        result_text: required("result-text")?,
        result_bar: required("result-bar")?,
        hand_buttons,
        restart_btn: doc.get_element_by_id("restart-btn"),
        page: doc
            .query_selector(".page")?
            .and_then(|el| el.dyn_into::<HtmlElement>().ok()),
        frame: doc.get_element_by_id("character-frame"),
        vs_overlay: doc.get_element_by_id("vs-overlay"),
        npc_hand_emoji: doc.get_element_by_id("npc-hand-emoji"),
    })
}

/// Reset all round state and UI, then start a new shuffle interval. Runs on
/// startup and on every restart click; stale timers are cancelled first so
/// no callback from a previous round can fire into the new one.
fn start_shuffle(st: &mut UiState) {
    clear_shuffle(st);
    clear_reveal(st);
    hide_vs_overlay(&st.dom);
    st.round.restart();

    clear_outcome_classes(&st.dom.result_bar);
    for btn in &st.dom.hand_buttons {
        clear_outcome_classes(btn);
    }
    st.dom.result_text.set_text_content(Some(BASE_MESSAGE));
    st.dom.user_hand_label.set_text_content(Some(NO_CHOICE_LABEL));
    st.dom
        .final_hand_label
        .set_text_content(Some(UNKNOWN_HAND_LABEL));
    set_npc_hand_emoji(&st.dom, st.round.npc_hand());
    st.dom.status_pill.set_text_content(Some(STATUS_SHUFFLING));
    st.dom.status_pill.class_list().remove_1("is-stopped").ok();
    if let Some(page) = &st.dom.page {
        page.class_list().remove_1("shake").ok();
    }
    if let Some(frame) = &st.dom.frame {
        frame.class_list().remove_1("is-paused").ok();
    }
    set_buttons_disabled(&st.dom, false);
    highlight_user_hand(&st.dom, None);
    set_expression(&st.dom, BASE_EXPRESSION);

    // First frame immediately, then on the interval.
    if let Some(hand) = st.round.shuffle_tick() {
        set_hand_visual(&st.dom, hand);
    }
    if let Some(win) = window() {
        st.shuffle_timer = win
            .set_interval_with_callback_and_timeout_and_arguments_0(
                st.shuffle_cb.as_ref().unchecked_ref(),
                st.config.shuffle_interval_ms as i32,
            )
            .ok();
    }
}

/// The primary interaction entry point: the user picked a hand.
fn handle_user_choice(st: &mut UiState, hand: Hand) {
    if st.round.choose(hand).is_none() {
        // Already locked or showing a result.
        return;
    }
    clear_shuffle(st);
    set_buttons_disabled(&st.dom, true);
    show_vs_overlay(&st.dom);
    st.dom.status_pill.set_text_content(Some(STATUS_JUDGING));
    st.dom.result_text.set_text_content(Some(JUDGING_MESSAGE));
    clear_outcome_classes(&st.dom.result_bar);
    for btn in &st.dom.hand_buttons {
        clear_outcome_classes(btn);
    }
    trigger_shake(st);
    if let Some(win) = window() {
        st.reveal_timer = win
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                st.reveal_cb.as_ref().unchecked_ref(),
                st.config.reveal_delay_ms as i32,
            )
            .ok();
    }
}

/// Apply the full result screen: expression, labels, status pill, result
/// bar and button outcome classes, all in one pass.
fn announce_result(st: &UiState, reveal: Reveal) {
    let dom = &st.dom;
    // Losing keeps the character's neutral face; win and draw swap in a
    // random expression from the pool.
    if reveal.outcome == Outcome::Lose {
        set_expression(dom, BASE_EXPRESSION);
    } else {
        set_expression(dom, st.config.expression_for().unwrap_or(BASE_EXPRESSION));
    }
    set_hand_visual(dom, reveal.npc);

    if let Some(frame) = &dom.frame {
        frame.class_list().add_1("is-paused").ok();
    }
    dom.user_hand_label
        .set_text_content(Some(hand_label(reveal.user)));
    dom.final_hand_label
        .set_text_content(Some(hand_label(reveal.npc)));
    highlight_user_hand(dom, Some(reveal.user));
    dom.result_text
        .set_text_content(Some(st.config.message_for(reveal.outcome)));

    dom.status_pill.set_text_content(Some(STATUS_RESULT));
    dom.status_pill.class_list().add_1("is-stopped").ok();

    let outcome_class = format!("is-{}", reveal.outcome.as_key());
    clear_outcome_classes(&dom.result_bar);
    dom.result_bar.class_list().add_1(&outcome_class).ok();
    for btn in &dom.hand_buttons {
        clear_outcome_classes(btn);
        let is_user = btn
            .get_attribute("data-hand")
            .and_then(|key| Hand::from_key(&key))
            == Some(reveal.user);
        if is_user {
            btn.class_list().add_1(&outcome_class).ok();
        }
    }
    hide_vs_overlay(dom);
}

/// Restart the page shake animation even when the class is already present;
/// the offset_height read in between forces a style recalculation.
fn trigger_shake(st: &mut UiState) {
    if st.dom.page.is_none() {
        return;
    }
    clear_shake(st);
    if let Some(page) = &st.dom.page {
        page.class_list().remove_1("shake").ok();
        let _ = page.offset_height();
        page.class_list().add_1("shake").ok();
    }
    st.shake_timer = window().and_then(|win| {
        win.set_timeout_with_callback_and_timeout_and_arguments_0(
            st.shake_cb.as_ref().unchecked_ref(),
            st.config.shake_duration_ms as i32,
        )
        .ok()
    });
}

fn clear_shuffle(st: &mut UiState) {
    if let Some(handle) = st.shuffle_timer.take() {
        if let Some(win) = window() {
            win.clear_interval_with_handle(handle);
        }
    }
}

fn clear_reveal(st: &mut UiState) {
    if let Some(handle) = st.reveal_timer.take() {
        if let Some(win) = window() {
            win.clear_timeout_with_handle(handle);
        }
    }
}

fn clear_shake(st: &mut UiState) {
    if let Some(handle) = st.shake_timer.take() {
        if let Some(win) = window() {
            win.clear_timeout_with_handle(handle);
        }
    }
}

fn set_buttons_disabled(dom: &Dom, disabled: bool) {
    for btn in &dom.hand_buttons {
        btn.set_disabled(disabled);
    }
}

fn set_npc_hand_emoji(dom: &Dom, hand: Hand) {
    if let Some(el) = &dom.npc_hand_emoji {
        el.set_text_content(Some(hand_emoji(hand)));
    }
}

/// Highlight the button matching the user's choice; `None` clears all.
fn highlight_user_hand(dom: &Dom, target: Option<Hand>) {
    for btn in &dom.hand_buttons {
        let hand = btn
            .get_attribute("data-hand")
            .and_then(|key| Hand::from_key(&key));
        let is_target = target.is_some() && hand == target;
        btn.class_list()
            .toggle_with_force("is-selected", is_target)
            .ok();
    }
}

/// Skip the attribute write when unchanged; swapping src forces a repaint.
fn set_expression(dom: &Dom, path: &str) {
    if dom.expression_layer.get_attribute("src").as_deref() != Some(path) {
        dom.expression_layer.set_attribute("src", path).ok();
    }
}

fn set_hand_visual(dom: &Dom, hand: Hand) {
    set_npc_hand_emoji(dom, hand);
    match hand_image(hand) {
        Some(src) => {
            dom.hand_layer.class_list().remove_1("is-hidden").ok();
            dom.hand_layer.set_attribute("src", src).ok();
        }
        None => {
            dom.hand_layer.class_list().add_1("is-hidden").ok();
        }
    }
}

fn clear_outcome_classes(el: &Element) {
    let classes = el.class_list();
    for class in OUTCOME_CLASSES {
        classes.remove_1(class).ok();
    }
}

fn show_vs_overlay(dom: &Dom) {
    if let Some(el) = &dom.vs_overlay {
        el.class_list().add_1("is-active").ok();
    }
}

fn hide_vs_overlay(dom: &Dom) {
    if let Some(el) = &dom.vs_overlay {
        el.class_list().remove_1("is-active").ok();
    }
}
