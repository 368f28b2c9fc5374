use std::cell::RefCell;
use std::rc::Rc;

use sweeper_core::*;

const FIXTURE: &str = "
    0000000
    0000100
    0001000
    1000000
    0000000
    0000000
    0000000
    0000000
";

fn fixture() -> GameController {
    GameController::from_board(FIXTURE.parse().unwrap())
}

/// `#` hidden, `F` flagged, `.` revealed zero, digits for revealed counts.
fn render(game: &GameController) -> String {
    let (height, width) = game.size();
    let mut out = String::new();
    for row in 0..height {
        for col in 0..width {
            let view = game.tile_view((row, col)).unwrap();
            out.push(match (view.is_flagged(), view.mined_neighbor_count()) {
                (true, _) => 'F',
                (false, None) => '#',
                (false, Some(0)) => '.',
                (false, Some(count)) => char::from(b'0' + count),
            });
        }
        out.push('\n');
    }
    out
}

fn neighbors(game: &GameController, coords: Coord2) -> Vec<Coord2> {
    Board::new(game.size())
        .unwrap()
        .neighbors_of(coords)
        .unwrap()
        .into_vec()
}

#[test]
fn fixture_loads() {
    let game = fixture();

    assert_eq!(game.size(), (8, 7));
    assert_eq!(game.amount_of_mines(), 3);
    assert!(!game.is_first_move());
}

#[test]
fn first_click_area_never_holds_the_mine() {
    for seed in 0..200 {
        let mut board = Board::new((8, 8)).unwrap();
        let mut generator = Generator::new(RandomMineGenerator::new(seed));

        generator.generate(&mut board, (6, 6), 1).unwrap();

        assert_eq!(board.mine_count(), 1);
        assert!(!board[(6, 6)].is_mine());
        for coords in board.neighbors_of((6, 6)).unwrap() {
            assert!(!board[coords].is_mine(), "seed {seed} mined {coords:?}");
        }
    }
}

#[test]
fn first_click_opens_its_neighborhood() {
    for seed in 0..50 {
        let config = GameConfig::new((8, 8), 1).with_seed(seed);
        let mut game = GameController::new(config).unwrap();

        game.primary_action((6, 6)).unwrap();

        assert_ne!(game.end_state(), EndState::Lost);
        assert_eq!(game.tile_view((6, 6)).unwrap().mined_neighbor_count(), Some(0));
        for coords in neighbors(&game, (6, 6)) {
            assert!(game.tile_view(coords).unwrap().is_revealed());
        }
    }
}

#[test]
fn clicking_empty_tile_cascades() {
    let mut game = fixture();

    assert_eq!(game.primary_action((6, 6)).unwrap(), ActionOutcome::Revealed);

    assert_eq!(
        render(&game),
        "\
#####1.
#####1.
####21.
#1111..
11.....
.......
.......
.......
"
    );
}

#[test]
fn win_by_flagging() {
    let mut game = fixture();

    game.secondary_action((1, 4)).unwrap();
    game.secondary_action((2, 3)).unwrap();
    assert_eq!(game.end_state(), EndState::Undecided);
    game.secondary_action((3, 0)).unwrap();

    assert_eq!(game.end_state(), EndState::Won);
    assert_eq!(game.mines_remaining(), 0);
}

#[test]
fn win_by_revealing() {
    let mut game = fixture();
    let mines = [(1, 4), (2, 3), (3, 0)];

    for row in 0..8 {
        for col in 0..7 {
            if !mines.contains(&(row, col)) {
                game.primary_action((row, col)).unwrap();
            }
        }
    }

    assert_eq!(game.end_state(), EndState::Won);
}

#[test]
fn clicking_mine_loses() {
    let mut game = fixture();

    game.secondary_action((1, 4)).unwrap();
    game.primary_action((1, 4)).unwrap();
    assert_eq!(game.end_state(), EndState::Undecided);

    game.secondary_action((1, 4)).unwrap();
    assert_eq!(game.primary_action((1, 4)).unwrap(), ActionOutcome::Exploded);

    assert_eq!(game.end_state(), EndState::Lost);
    assert!(game.tile_view((1, 4)).unwrap().is_revealed());
}

#[test]
fn flag_blocks_reveal_until_removed() {
    let mut game = fixture();

    game.toggle_input_mode();
    game.primary_action((0, 0)).unwrap();
    assert!(game.tile_view((0, 0)).unwrap().is_flagged());
    game.toggle_input_mode();

    game.primary_action((0, 0)).unwrap();
    assert!(!game.tile_view((0, 0)).unwrap().is_revealed());

    game.secondary_action((0, 0)).unwrap();
    assert!(!game.tile_view((0, 0)).unwrap().is_flagged());
    game.primary_action((0, 0)).unwrap();
    assert!(game.tile_view((0, 0)).unwrap().is_revealed());
}

#[test]
fn clicking_number_chords_once_flagged() {
    let mut game = fixture();
    let around = neighbors(&game, (1, 3));

    game.primary_action((1, 3)).unwrap();
    game.primary_action((1, 3)).unwrap();
    assert!(around.iter().all(|&pos| !game.tile_view(pos).unwrap().is_revealed()));

    game.secondary_action((1, 4)).unwrap();
    game.primary_action((1, 3)).unwrap();
    assert!(around.iter().all(|&pos| !game.tile_view(pos).unwrap().is_revealed()));

    game.secondary_action((2, 3)).unwrap();
    game.primary_action((1, 3)).unwrap();
    for pos in around {
        let view = game.tile_view(pos).unwrap();
        assert_ne!(view.is_flagged(), view.is_revealed(), "{pos:?}");
    }
    assert_eq!(game.end_state(), EndState::Undecided);
}

#[test]
fn observer_fires_once_per_game() {
    let mut game = fixture();
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    game.on_end_state(move |state| sink.borrow_mut().push(state));

    game.primary_action((6, 6)).unwrap();
    assert!(events.borrow().is_empty());

    game.primary_action((3, 0)).unwrap();
    game.primary_action((1, 4)).unwrap();
    game.secondary_action((2, 3)).unwrap();

    assert_eq!(*events.borrow(), vec![EndState::Lost]);
}

#[test]
fn mines_are_disclosed_after_the_end() {
    let mut game = fixture();

    assert_eq!(game.tile_view((2, 3)).unwrap().is_mine(), None);
    game.primary_action((3, 0)).unwrap();

    assert_eq!(game.tile_view((2, 3)).unwrap().is_mine(), Some(true));
    assert_eq!(game.tile_view((6, 6)).unwrap().is_mine(), Some(false));
}

#[test]
fn winnable_board_is_solvable_from_first_click() {
    let config = GameConfig::new((9, 9), 10)
        .with_seed(2024)
        .with_winnable_required(true);
    let verdicts = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&verdicts);
    let mut game = GameController::new(config)
        .unwrap()
        .with_winnability(move |board: &Board, start: Coord2| {
            let solvable = LogicSolvable.is_winnable(board, start);
            sink.borrow_mut().push(solvable);
            solvable
        });

    game.primary_action((4, 4)).unwrap();

    let verdicts = verdicts.borrow();
    assert!(!verdicts.is_empty());
    assert_eq!(verdicts.last(), Some(&true));
    assert!(verdicts[..verdicts.len() - 1].iter().all(|&solvable| !solvable));
    assert_ne!(game.end_state(), EndState::Lost);
    assert!(game.tile_view((4, 4)).unwrap().is_revealed());
}

#[test]
fn winnable_requirement_retries_rejected_layouts() {
    let config = GameConfig::new((9, 9), 10)
        .with_seed(7)
        .with_winnable_required(true);
    let calls = Rc::new(RefCell::new(0u32));
    let counter = Rc::clone(&calls);
    let mut game = GameController::new(config)
        .unwrap()
        .with_winnability(move |_: &Board, _: Coord2| {
            *counter.borrow_mut() += 1;
            *counter.borrow() > 3
        });

    game.primary_action((4, 4)).unwrap();

    assert_eq!(*calls.borrow(), 4);
    assert!(!game.is_first_move());
}
