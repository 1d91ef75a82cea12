//! Tests for full sessions driven through a scripted messenger.

mod common;

use common::{Event, SILENCE, ScriptedMessenger, players};
use versus::{EndReason, GameSession, GameSettings, Reversi, SessionResult, VersusConfig};
use versus_rules::{Coord, GameKind, Marker, ReversiBoard, Score, Seat};

async fn play(kind: GameKind, messenger: &ScriptedMessenger, config: &VersusConfig) -> SessionResult {
    GameSession::new(kind, players(kind, "ann", "bo"), messenger, config)
        .start()
        .await
        .expect("session failed")
}

/// Who was asked to move, in order.
fn turn_order(messenger: &ScriptedMessenger) -> Vec<String> {
    messenger
        .prompts()
        .into_iter()
        .filter(|p| p.contains("'s turn!"))
        .filter_map(|p| p.split_whitespace().next().map(str::to_string))
        .collect()
}

fn assert_alternates(order: &[String], turns: usize) {
    assert_eq!(order.len(), turns, "{order:?}");
    for (i, name) in order.iter().enumerate() {
        let expected = if i % 2 == 0 { "ann" } else { "bo" };
        assert_eq!(name, expected, "turn {} in {order:?}", i + 1);
    }
}

#[tokio::test]
async fn test_tictactoe_diagonal_win() {
    let messenger = ScriptedMessenger::new()
        .script("ann", &["1 1", "2 2", "3 3"])
        .script("bo", &["1 2", "1 3"]);
    let result = play(GameKind::TicTacToe, &messenger, &VersusConfig::default()).await;

    let outcome = result.outcome().expect("no outcome");
    assert_eq!(outcome.winner().id(), "ann");
    assert_eq!(outcome.loser().id(), "bo");
    assert!(!*outcome.tie());
    assert_eq!(*outcome.reason(), EndReason::Line);
    assert!(messenger.saw_prompt("Winner is X, ann."));
}

#[tokio::test]
async fn test_turns_alternate_starting_with_seat_one() {
    let messenger = ScriptedMessenger::new()
        .script("ann", &["1 1", "2 2", "3 3"])
        .script("bo", &["1 2", "1 3"]);
    play(GameKind::TicTacToe, &messenger, &VersusConfig::default()).await;

    let turns: Vec<String> = messenger
        .prompts()
        .into_iter()
        .filter(|p| p.contains("'s turn!"))
        .collect();
    assert_eq!(turns.len(), 5);
    for (i, prompt) in turns.iter().enumerate() {
        let expected = if i % 2 == 0 { "ann X's turn!" } else { "bo O's turn!" };
        assert!(prompt.starts_with(expected), "{prompt}");
    }
}

#[tokio::test]
async fn test_bad_input_reprompts_without_losing_the_turn() {
    let messenger = ScriptedMessenger::new()
        .script("ann", &["hello", "1 1", "2 2", "3 3"])
        .script("bo", &["1 1", "9 9", "1 2", "1 3"]);
    let result = play(GameKind::TicTacToe, &messenger, &VersusConfig::default()).await;

    assert!(messenger.saw_prompt("off board range or incorrect format"));
    assert!(messenger.saw_prompt("that spot is already occupied"));
    assert_eq!(result.outcome().unwrap().winner().id(), "ann");
    assert_eq!(messenger.unread("bo"), 0);
}

#[tokio::test]
async fn test_second_timeout_loses() {
    let messenger = ScriptedMessenger::new().script("bo", &["1 1"]);
    let result = play(GameKind::TicTacToe, &messenger, &VersusConfig::default()).await;

    let outcome = result.outcome().unwrap();
    assert_eq!(outcome.winner().id(), "bo");
    assert_eq!(outcome.loser().id(), "ann");
    assert_eq!(*outcome.reason(), EndReason::Timeout);
    assert!(messenger.saw_notice("ann hurry up!"));
    assert!(messenger.saw_notice("game ended. bo is winner, because ann took too long."));
}

#[tokio::test]
async fn test_any_input_after_nudge_resets_timeout() {
    let messenger = ScriptedMessenger::new()
        .script("ann", &[SILENCE, "hello", SILENCE, "1 1", "2 2", "3 3"])
        .script("bo", &["1 2", "1 3"]);
    let result = play(GameKind::TicTacToe, &messenger, &VersusConfig::default()).await;

    let nudges = messenger.notices().iter().filter(|n| n.contains("hurry up!")).count();
    assert_eq!(nudges, 2);
    assert_eq!(result.outcome().unwrap().winner().id(), "ann");
}

#[tokio::test]
async fn test_end_agreement_is_a_draw() {
    let messenger = ScriptedMessenger::new()
        .script("ann", &["1 1", "end"])
        .script("bo", &["2 2", "yes"]);
    let result = play(GameKind::TicTacToe, &messenger, &VersusConfig::default()).await;

    let outcome = result.outcome().unwrap();
    assert!(*outcome.tie());
    assert_eq!(*outcome.reason(), EndReason::Agreement);
    assert!(messenger.saw_prompt("Draw!"));
    assert!(messenger.events().iter().any(|e| matches!(
        e,
        Event::Confirm { with, prompt } if with == "bo" && prompt.contains("wants to end the game")
    )));
}

#[tokio::test]
async fn test_refused_end_continues_play() {
    let messenger = ScriptedMessenger::new()
        .script("ann", &["end", "1 1", "2 2", "3 3"])
        .script("bo", &["no", "1 2", "1 3"]);
    let result = play(GameKind::TicTacToe, &messenger, &VersusConfig::default()).await;

    assert!(messenger.saw_prompt("your opponent wants to continue!"));
    assert_eq!(result.outcome().unwrap().winner().id(), "ann");
}

#[tokio::test]
async fn test_flush_keeps_the_turn() {
    let messenger = ScriptedMessenger::new()
        .script("ann", &["flush", "1 1", "2 2", "3 3"])
        .script("bo", &["1 2", "1 3"]);
    let result = play(GameKind::TicTacToe, &messenger, &VersusConfig::default()).await;

    assert!(messenger.events().contains(&Event::Flush));
    assert_eq!(result.outcome().unwrap().winner().id(), "ann");
}

#[tokio::test]
async fn test_connect_four_plays_by_reaction() {
    let messenger = ScriptedMessenger::new()
        .script("ann", &["1", "1", "1", "1"])
        .script("bo", &["2", "2", "2"]);
    let result = play(GameKind::ConnectFour, &messenger, &VersusConfig::default()).await;

    let glyphs: Vec<String> = (1..=7).map(|n| n.to_string()).collect();
    assert!(messenger.events().contains(&Event::Reactions(glyphs)));
    let outcome = result.outcome().unwrap();
    assert_eq!(outcome.winner().id(), "ann");
    assert_eq!(*outcome.reason(), EndReason::Line);
    assert!(messenger.saw_prompt("Winner is Yellow, ann."));
}

#[tokio::test]
async fn test_reversi_time_limit_forces_score() {
    let settings = GameSettings::for_game(GameKind::Reversi).with_time_limit_secs(Some(0));
    let config = VersusConfig::default().with_game(GameKind::Reversi, settings);
    let messenger = ScriptedMessenger::new();
    let result = play(GameKind::Reversi, &messenger, &config).await;

    let outcome = result.outcome().unwrap();
    assert!(*outcome.tie());
    assert_eq!(*outcome.reason(), EndReason::TimeLimit);
    assert_eq!(*outcome.score(), Some(Score { one: 2, two: 2 }));
    assert!(messenger.saw_prompt("Time's up - Draw! 2:2"));
}

#[tokio::test]
async fn test_reversi_end_agreement_compares_discs() {
    let messenger = ScriptedMessenger::new()
        .script("ann", &["3 5", "yes"])
        .script("bo", &["end"]);
    let result = play(GameKind::Reversi, &messenger, &VersusConfig::default()).await;

    let outcome = result.outcome().unwrap();
    assert_eq!(outcome.winner().id(), "ann");
    assert_eq!(*outcome.score(), Some(Score { one: 4, two: 1 }));
    assert!(messenger.saw_prompt("Winner is Black, ann. 4:1"));
}

#[tokio::test]
async fn test_weiqi_end_agreement_scores_territory() {
    let messenger = ScriptedMessenger::new()
        .script("ann", &["4 4", "yes"])
        .script("bo", &["end"]);
    let result = play(GameKind::Weiqi, &messenger, &VersusConfig::default()).await;

    let outcome = result.outcome().unwrap();
    assert_eq!(outcome.winner().id(), "ann");
    assert_eq!(*outcome.reason(), EndReason::Agreement);
}

const LAYOUT: [&str; 15] = [
    "ok", "left", "ok", "left", "left", "ok", "left", "left", "left", "ok", "left", "left",
    "left", "left", "ok",
];

#[tokio::test]
async fn test_battleship_layout_timeout_aborts() {
    let messenger = ScriptedMessenger::new()
        .script("ann", &["ok"])
        .script("bo", &LAYOUT);
    let result = play(GameKind::Battleship, &messenger, &VersusConfig::default()).await;

    assert!(matches!(result, SessionResult::Aborted { .. }));
    assert!(messenger.privates_to("ann").contains(&"You timed out.".to_string()));
    assert!(messenger.privates_to("bo").contains(&"Your opponent timed out.".to_string()));
    assert!(messenger.saw_notice("ann timed out."));
}

/// Both fleets laid out, then ann sinks every ship while bo misses 16 times.
fn battleship_scripts() -> (Vec<&'static str>, Vec<&'static str>) {
    let mut ann: Vec<&str> = LAYOUT.to_vec();
    ann.extend([
        "5 3", "5 4", "5 5", "5 6", "5 7", "4 4", "4 5", "4 6", "4 7", "3 4", "3 5", "3 6", "2 4",
        "2 5", "2 6", "1 5", "1 6",
    ]);
    let mut bo: Vec<&str> = LAYOUT.to_vec();
    bo.extend([
        "6 1", "6 2", "6 3", "6 4", "6 5", "6 6", "6 7", "6 8", "6 9", "6 10", "7 1", "7 2",
        "7 3", "7 4", "7 5", "7 6",
    ]);
    (ann, bo)
}

#[tokio::test]
async fn test_battleship_red_sinks_every_ship() {
    let (ann, bo) = battleship_scripts();
    let messenger = ScriptedMessenger::new().script("ann", &ann).script("bo", &bo);
    let result = play(GameKind::Battleship, &messenger, &VersusConfig::default()).await;

    let outcome = result.outcome().unwrap();
    assert_eq!(outcome.winner().id(), "ann");
    assert_eq!(*outcome.reason(), EndReason::FleetSunk);
    assert_eq!(*outcome.score(), Some(Score { one: 17, two: 0 }));
    assert!(messenger.saw_notice("Red: ann, Blue: bo"));
    assert!(messenger.saw_notice("Carrier sunk!"));
    assert!(messenger.saw_notice("Miss!"));
    assert!(messenger.saw_notice("Red's Ocean"));
    assert!(messenger.saw_prompt("Winner is Red, ann. 17:0"));
    assert_eq!(messenger.unread("ann"), 0);
    assert_eq!(messenger.unread("bo"), 0);
    assert_alternates(&turn_order(&messenger), 33);
}

#[tokio::test]
async fn test_battleship_layout_timeout_by_seat_two_aborts() {
    let messenger = ScriptedMessenger::new()
        .script("ann", &LAYOUT)
        .script("bo", &["ok", "left"]);
    let result = play(GameKind::Battleship, &messenger, &VersusConfig::default()).await;

    assert!(matches!(result, SessionResult::Aborted { .. }));
    assert!(messenger.privates_to("bo").contains(&"You timed out.".to_string()));
    assert!(messenger.privates_to("ann").contains(&"Your opponent timed out.".to_string()));
    assert!(!messenger.privates_to("ann").contains(&"You timed out.".to_string()));
    assert!(messenger.saw_notice("bo timed out."));
    assert!(!messenger.saw_notice("ann timed out."));
    assert!(turn_order(&messenger).is_empty());
}

#[tokio::test]
async fn test_connect_four_turns_alternate() {
    let messenger = ScriptedMessenger::new()
        .script("ann", &["1", "1", "1", "1"])
        .script("bo", &["2", "2", "2"]);
    play(GameKind::ConnectFour, &messenger, &VersusConfig::default()).await;

    let order = turn_order(&messenger);
    assert_alternates(&order, 7);
    assert!(messenger.saw_prompt("ann Yellow's turn! (pick a column)"));
}

#[tokio::test]
async fn test_reversi_turns_alternate() {
    // bo stays silent on the fourth turn and loses on time.
    let messenger = ScriptedMessenger::new()
        .script("ann", &["3 5", "6 4"])
        .script("bo", &["5 6"]);
    let result = play(GameKind::Reversi, &messenger, &VersusConfig::default()).await;

    assert_alternates(&turn_order(&messenger), 4);
    let outcome = result.outcome().unwrap();
    assert_eq!(outcome.winner().id(), "ann");
    assert_eq!(*outcome.reason(), EndReason::Timeout);
    assert!(messenger.saw_notice("Time limit: 10 minutes!"));
}

#[tokio::test]
async fn test_weiqi_turns_alternate() {
    let messenger = ScriptedMessenger::new()
        .script("ann", &["4 4", "6 6"])
        .script("bo", &["5 5"]);
    let result = play(GameKind::Weiqi, &messenger, &VersusConfig::default()).await;

    assert_alternates(&turn_order(&messenger), 4);
    assert_eq!(result.outcome().unwrap().winner().id(), "ann");
    assert!(messenger.saw_notice("Time limit: 20 minutes!"));
    assert!(messenger.saw_notice("Black: ann, White: bo"));
}

#[tokio::test]
async fn test_reversi_pass_then_no_moves_scores_the_board() {
    // Black cannot flank the corner disc, White can flank the black one.
    let mut board = ReversiBoard::empty();
    board.seed(Coord::new(1, 1), Marker::Stone(Seat::Two));
    board.seed(Coord::new(2, 1), Marker::Stone(Seat::One));
    let messenger = ScriptedMessenger::new().script("bo", &["3 1"]);
    let result = GameSession::with_variant(
        Box::new(Reversi::from_board(board)),
        players(GameKind::Reversi, "ann", "bo"),
        &messenger,
        &VersusConfig::default(),
    )
    .start()
    .await
    .expect("session failed");

    assert!(messenger.saw_notice("ann has no legal move and passes."));
    assert_eq!(turn_order(&messenger), vec!["bo".to_string()]);
    let outcome = result.outcome().unwrap();
    assert_eq!(outcome.winner().id(), "bo");
    assert_eq!(*outcome.reason(), EndReason::NoMoves);
    assert_eq!(*outcome.score(), Some(Score { one: 0, two: 3 }));
    assert!(messenger.saw_prompt("Winner is White, bo. 3:0"));
}
