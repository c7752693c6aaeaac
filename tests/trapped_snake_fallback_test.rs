// Integration test for the trapped snake fallback
//
// When no move can be proven safe the autopilot still commits the best-guess
// coil move instead of giving up, and the game only ends once the head
// really has no Free neighbor left.

use autopilot_snake::config::Config;
use autopilot_snake::game::Game;
use autopilot_snake::types::{Coord, Direction, GameStatus, MoveMethod};

fn board_config(width: i32, height: i32) -> Config {
    let mut config = Config::default_hardcoded();
    config.board.canvas_width = width * config.board.cell_size;
    config.board.canvas_height = height * config.board.cell_size;
    config.game.seed = Some(1);
    config
}

/// 4x4 zigzag covering every tile but the top left corner, head first.
/// Head at (1,3), tail at (0,0).
fn almost_full_snake() -> Vec<Coord> {
    let mut path = Vec::new();
    for y in 0..4 {
        if y % 2 == 0 {
            path.extend((0..4).map(|x| Coord::new(x, y)));
        } else {
            path.extend((0..4).rev().map(|x| Coord::new(x, y)));
        }
    }
    path.pop();
    path.reverse();
    path
}

/// Snake fills all but one tile; the last tile is reachable but a dead end
/// because the vacating tail is on the far side of the board.
#[test]
fn test_trapped_snake_takes_fallback_move() {
    let snake = almost_full_snake();
    assert_eq!(snake[0], Coord::new(1, 3));
    assert_eq!(snake.len(), 15);

    let mut game = Game::with_snake(board_config(4, 4), &snake, Some(Coord::new(0, 3)));
    assert_eq!(game.status(), GameStatus::Running);

    let report = game.tick();
    let decision = report.decision.expect("the corner is still open");

    assert_eq!(decision.method, MoveMethod::FallbackCoil);
    assert_eq!(decision.direction, Direction::Left);
    assert_eq!(decision.next, Coord::new(0, 3));
    assert!(report.ate_food);
    assert_eq!(game.stats().fallback_coil, 1);

    // Growth pending keeps the tail in place, so the head is now sealed in
    assert_eq!(report.status, GameStatus::GameOver);
    assert!(game.tick().decision.is_none());
}

/// With an open board the fallback is never needed
#[test]
fn test_open_board_does_not_fall_back() {
    let mut game = Game::with_snake(
        board_config(16, 16),
        &[Coord::new(8, 8), Coord::new(8, 7), Coord::new(8, 6), Coord::new(8, 5)],
        Some(Coord::new(2, 2)),
    );

    for _ in 0..20 {
        game.tick();
    }

    assert_eq!(game.stats().fallback_coil, 0);
    assert_eq!(game.status(), GameStatus::Running);
}
